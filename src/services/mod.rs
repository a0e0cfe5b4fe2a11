// src/services/mod.rs

pub mod generator;
pub mod identity;
pub mod quiz_source;
