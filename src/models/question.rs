// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A single multiple-choice question as delivered by a quiz source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The text shown to the user.
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    /// Options in display order. The position of an option is its identifier.
    #[validate(custom(function = validate_answers))]
    pub answers: Vec<String>,

    /// Must match exactly one entry of `answers`.
    #[validate(length(min = 1, max = 500))]
    pub correct_answer: String,

    /// Provenance label (e.g. the slide deck the question came from).
    #[validate(length(max = 500))]
    pub source: String,
}

/// Ordered questions of one quiz attempt.
pub type QuestionSet = Vec<Question>;

impl Question {
    pub fn new(
        question: impl Into<String>,
        answers: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answers: answers.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
            source: source.into(),
        }
    }

    /// Whether the answer at `index` is the correct one (exact string match).
    pub fn is_correct(&self, index: usize) -> bool {
        self.answers
            .get(index)
            .is_some_and(|answer| *answer == self.correct_answer)
    }

    /// Field validation plus the cross-field rule that the correct answer
    /// appears exactly once among the options.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;

        let matches = self
            .answers
            .iter()
            .filter(|answer| **answer == self.correct_answer)
            .count();
        match matches {
            1 => Ok(()),
            0 => Err(format!(
                "correct answer '{}' is not one of the options",
                self.correct_answer
            )),
            n => Err(format!(
                "correct answer '{}' appears {} times among the options",
                self.correct_answer, n
            )),
        }
    }
}

fn validate_answers(answers: &[String]) -> Result<(), ValidationError> {
    if answers.is_empty() {
        return Err(ValidationError::new("answers_cannot_be_empty"));
    }
    for answer in answers {
        if answer.len() > 500 {
            return Err(ValidationError::new("answer_too_long"));
        }
    }
    Ok(())
}

/// DTO for sending a question to the client (excludes the correct answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub question: String,
    pub answers: Vec<String>,
    pub source: String,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            question: q.question.clone(),
            answers: q.answers.clone(),
            source: q.source.clone(),
        }
    }
}

/// The questions served when no catalog is configured.
pub fn sample_questions() -> QuestionSet {
    vec![
        Question::new(
            "What is the capital of France?",
            ["Paris", "Blah", "Bleh", "Blue"],
            "Paris",
            "slides-week-1.pdf",
        ),
        Question::new(
            "What is the capital of Germany?",
            ["Blah", "Berlin", "Bleh", "Blue"],
            "Berlin",
            "slides-week-1.pdf",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_questions_are_well_formed() {
        for q in sample_questions() {
            assert!(q.check().is_ok(), "{:?}", q);
        }
    }

    #[test]
    fn check_rejects_missing_and_duplicate_correct_answer() {
        let missing = Question::new("2+2?", ["3", "5"], "4", "");
        assert!(missing.check().unwrap_err().contains("not one of the options"));

        let twice = Question::new("2+2?", ["4", "4"], "4", "");
        assert!(twice.check().unwrap_err().contains("2 times"));
    }

    #[test]
    fn check_rejects_empty_options() {
        let q = Question::new("2+2?", Vec::<String>::new(), "4", "");
        assert!(q.check().is_err());
    }

    #[test]
    fn deserializes_camel_case() {
        let q: Question = serde_json::from_str(
            r#"{"question":"2+2?","answers":["3","4"],"correctAnswer":"4","source":"mental"}"#,
        )
        .unwrap();
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert!(!q.is_correct(7));
    }
}
