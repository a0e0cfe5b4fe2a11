// src/handlers/mod.rs

pub mod auth;
pub mod generate;
pub mod home;
pub mod quiz;
