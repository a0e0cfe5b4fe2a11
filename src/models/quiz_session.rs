// src/models/quiz_session.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::question::{Question, QuestionSet};

/// Where an attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "question", rename_all = "camelCase")]
pub enum QuizState {
    /// Waiting for the user to pick (or change) an answer to question `i`.
    Answering(usize),
    /// Question `i` has been graded and its answer is locked.
    Graded(usize),
    /// The user advanced past the last question.
    Complete,
}

/// The operations a caller can attempt on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizOperation {
    Select,
    Submit,
    Advance,
}

impl fmt::Display for QuizOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizOperation::Select => "select answer",
            QuizOperation::Submit => "submit answer",
            QuizOperation::Advance => "advance",
        };
        f.write_str(name)
    }
}

/// Rejection reasons for session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The answer index does not exist for the current question.
    InvalidArgument {
        answer_index: usize,
        answer_count: usize,
    },
    /// The operation is not allowed in the current state.
    IllegalStateTransition {
        operation: QuizOperation,
        state: QuizState,
    },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InvalidArgument {
                answer_index,
                answer_count,
            } => write!(
                f,
                "answer index {} is out of range (question has {} answers)",
                answer_index, answer_count
            ),
            QuizError::IllegalStateTransition { operation, state } => {
                write!(f, "cannot {} while in state {:?}", operation, state)
            }
        }
    }
}

impl std::error::Error for QuizError {}

/// Number of correctly answered questions out of the whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// 1-based position of the current question, e.g. "Question 1 of 2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.position, self.total)
    }
}

/// How a single option of the current question should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerMark {
    Neutral,
    Selected,
    Correct,
    Wrong,
}

/// Message shown after a question has been graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Feedback {
    Correct,
    Wrong { correct_answer: String },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => f.write_str("Correct!"),
            Feedback::Wrong { correct_answer } => {
                write!(f, "Wrong. The correct answer is: {}", correct_answer)
            }
        }
    }
}

/// Emitted to observers after every accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    AnswerSelected { question: usize, answer: usize },
    AnswerGraded { question: usize, correct: bool },
    /// The session moved on; `question` is the new current index.
    Advanced { question: usize },
    Completed { score: Score },
}

/// One graded question in a serialized result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub index: usize,
    pub question: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

/// Snapshot of an attempt suitable for returning to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub complete: bool,
    pub score: Score,
    pub answers: Vec<AnswerRecord>,
}

type Observer = Box<dyn FnMut(&QuizEvent) + Send>;

/// In-memory state of one quiz attempt.
///
/// The session owns its question set. Every operation validates its
/// precondition and returns a [`QuizError`] instead of changing state when the
/// call is not allowed, so callers never depend on disabled buttons for
/// correctness.
pub struct QuizSession {
    questions: QuestionSet,
    current_index: usize,
    selected: BTreeMap<usize, usize>,
    outcomes: BTreeMap<usize, bool>,
    submitted: bool,
    complete: bool,
    observers: Vec<Observer>,
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.questions.len())
            .field("state", &self.state())
            .field("selected", &self.selected)
            .field("outcomes", &self.outcomes)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl QuizSession {
    /// Starts an attempt. An empty set is complete from the start.
    pub fn new(questions: QuestionSet) -> Self {
        let complete = questions.is_empty();
        Self {
            questions,
            current_index: 0,
            selected: BTreeMap::new(),
            outcomes: BTreeMap::new(),
            submitted: false,
            complete,
            observers: Vec::new(),
        }
    }

    /// Registers a callback that receives every accepted transition.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&QuizEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> QuizState {
        if self.complete {
            QuizState::Complete
        } else if self.submitted {
            QuizState::Graded(self.current_index)
        } else {
            QuizState::Answering(self.current_index)
        }
    }

    /// Chooses an answer for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, answer_index: usize) -> Result<(), QuizError> {
        let index = match self.state() {
            QuizState::Answering(i) => i,
            state => return Err(self.reject(QuizOperation::Select, state)),
        };

        let answer_count = self.questions[index].answers.len();
        if answer_index >= answer_count {
            return Err(QuizError::InvalidArgument {
                answer_index,
                answer_count,
            });
        }

        self.selected.insert(index, answer_index);
        self.emit(QuizEvent::AnswerSelected {
            question: index,
            answer: answer_index,
        });
        Ok(())
    }

    /// Grades the current selection and locks it.
    pub fn submit_current_answer(&mut self) -> Result<(), QuizError> {
        let state = self.state();
        let (index, answer) = match (state, self.selected.get(&self.current_index)) {
            (QuizState::Answering(i), Some(&answer)) => (i, answer),
            _ => return Err(self.reject(QuizOperation::Submit, state)),
        };

        let correct = self.questions[index].is_correct(answer);
        self.outcomes.insert(index, correct);
        self.submitted = true;

        tracing::debug!(question = index, answer, correct, "answer graded");
        self.emit(QuizEvent::AnswerGraded {
            question: index,
            correct,
        });
        Ok(())
    }

    /// Moves past a graded question, or completes the attempt on the last one.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        let index = match self.state() {
            QuizState::Graded(i) => i,
            state => return Err(self.reject(QuizOperation::Advance, state)),
        };

        if index + 1 < self.questions.len() {
            self.current_index = index + 1;
            self.submitted = false;
            self.emit(QuizEvent::Advanced {
                question: self.current_index,
            });
        } else {
            self.complete = true;
            let score = self.score();
            tracing::debug!(correct = score.correct, total = score.total, "quiz complete");
            self.emit(QuizEvent::Completed { score });
        }
        Ok(())
    }

    pub fn score(&self) -> Score {
        Score {
            correct: self.outcomes.values().filter(|&&correct| correct).count(),
            total: self.questions.len(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question being answered or reviewed; `None` once complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.complete {
            None
        } else {
            self.questions.get(self.current_index)
        }
    }

    pub fn selected_answer(&self, question: usize) -> Option<usize> {
        self.selected.get(&question).copied()
    }

    pub fn outcome(&self, question: usize) -> Option<bool> {
        self.outcomes.get(&question).copied()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.current_question().map(|_| Progress {
            position: self.current_index + 1,
            total: self.questions.len(),
        })
    }

    /// Highlighting for each option of the current question.
    pub fn answer_marks(&self) -> Vec<AnswerMark> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        let selected = self.selected_answer(self.current_index);

        (0..question.answers.len())
            .map(|i| {
                let is_selected = selected == Some(i);
                if !self.submitted {
                    if is_selected {
                        AnswerMark::Selected
                    } else {
                        AnswerMark::Neutral
                    }
                } else if question.is_correct(i) {
                    AnswerMark::Correct
                } else if is_selected {
                    AnswerMark::Wrong
                } else {
                    AnswerMark::Neutral
                }
            })
            .collect()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        let QuizState::Graded(i) = self.state() else {
            return None;
        };
        match self.outcome(i) {
            Some(true) => Some(Feedback::Correct),
            _ => Some(Feedback::Wrong {
                correct_answer: self.questions[i].correct_answer.clone(),
            }),
        }
    }

    /// Label for the button that calls [`QuizSession::advance`].
    pub fn advance_label(&self) -> Option<&'static str> {
        match self.state() {
            QuizState::Graded(i) if i + 1 < self.questions.len() => Some("Next Question"),
            QuizState::Graded(_) => Some("Finish Quiz"),
            _ => None,
        }
    }

    pub fn result(&self) -> QuizResult {
        let answers = self
            .outcomes
            .iter()
            .filter_map(|(&index, &correct)| {
                let question = self.questions.get(index)?;
                let selected = self.selected.get(&index)?;
                Some(AnswerRecord {
                    index,
                    question: question.question.clone(),
                    selected_answer: question.answers.get(*selected)?.clone(),
                    correct_answer: question.correct_answer.clone(),
                    correct,
                })
            })
            .collect();

        QuizResult {
            complete: self.complete,
            score: self.score(),
            answers,
        }
    }

    fn reject(&self, operation: QuizOperation, state: QuizState) -> QuizError {
        tracing::debug!(%operation, ?state, "rejected quiz operation");
        QuizError::IllegalStateTransition { operation, state }
    }

    fn emit(&mut self, event: QuizEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
