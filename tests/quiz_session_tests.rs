// tests/quiz_session_tests.rs

use std::sync::{Arc, Mutex};

use quiz_api::models::{
    question::{Question, sample_questions},
    quiz_session::{
        AnswerMark, Feedback, QuizError, QuizEvent, QuizOperation, QuizSession, QuizState, Score,
    },
};

fn two_plus_two() -> Question {
    Question::new("2+2?", ["3", "4"], "4", "mental")
}

fn answer(session: &mut QuizSession, index: usize) {
    session.select_answer(index).unwrap();
    session.submit_current_answer().unwrap();
    session.advance().unwrap();
}

#[test]
fn empty_set_starts_complete() {
    let mut session = QuizSession::new(vec![]);

    assert_eq!(session.state(), QuizState::Complete);
    assert!(session.is_complete());
    assert_eq!(session.score(), Score { correct: 0, total: 0 });
    assert!(session.current_question().is_none());
    assert!(session.progress().is_none());
    assert!(matches!(
        session.select_answer(0),
        Err(QuizError::IllegalStateTransition { .. })
    ));
}

#[test]
fn correct_answer_scores_one_of_one() {
    let mut session = QuizSession::new(vec![two_plus_two()]);

    session.select_answer(1).unwrap();
    session.submit_current_answer().unwrap();
    assert_eq!(session.outcome(0), Some(true));
    assert_eq!(session.state(), QuizState::Graded(0));

    session.advance().unwrap();
    assert_eq!(session.state(), QuizState::Complete);
    assert_eq!(session.score(), Score { correct: 1, total: 1 });
}

#[test]
fn wrong_answer_scores_zero_of_one() {
    let mut session = QuizSession::new(vec![two_plus_two()]);

    session.select_answer(0).unwrap();
    session.submit_current_answer().unwrap();
    assert_eq!(session.outcome(0), Some(false));

    session.advance().unwrap();
    assert!(session.is_complete());
    assert_eq!(session.score(), Score { correct: 0, total: 1 });
}

#[test]
fn submit_without_selection_is_rejected() {
    let mut session = QuizSession::new(vec![two_plus_two()]);

    let err = session.submit_current_answer().unwrap_err();

    assert_eq!(
        err,
        QuizError::IllegalStateTransition {
            operation: QuizOperation::Submit,
            state: QuizState::Answering(0),
        }
    );
    assert_eq!(session.state(), QuizState::Answering(0));
    assert_eq!(session.outcome(0), None);
}

#[test]
fn mixed_results_over_two_questions() {
    let mut session = QuizSession::new(sample_questions());

    answer(&mut session, 0); // Paris, correct
    answer(&mut session, 0); // Blah, wrong

    assert!(session.is_complete());
    assert_eq!(session.score(), Score { correct: 1, total: 2 });
}

#[test]
fn completing_takes_one_advance_per_question() {
    let questions: Vec<Question> = (0..5).map(|_| two_plus_two()).collect();
    let mut session = QuizSession::new(questions);

    let mut advances = 0;
    while !session.is_complete() {
        session.select_answer(1).unwrap();
        session.submit_current_answer().unwrap();
        session.advance().unwrap();
        advances += 1;
    }

    assert_eq!(advances, 5);
}

#[test]
fn total_counts_unanswered_questions() {
    let mut session = QuizSession::new(sample_questions());
    answer(&mut session, 0);

    assert!(!session.is_complete());
    assert_eq!(session.score(), Score { correct: 1, total: 2 });
}

#[test]
fn last_selection_wins() {
    let mut session = QuizSession::new(vec![two_plus_two()]);

    session.select_answer(0).unwrap();
    session.select_answer(1).unwrap();
    session.select_answer(0).unwrap();

    assert_eq!(session.selected_answer(0), Some(0));
    session.submit_current_answer().unwrap();
    assert_eq!(session.outcome(0), Some(false));
}

#[test]
fn out_of_range_selection_is_rejected() {
    let mut session = QuizSession::new(vec![two_plus_two()]);

    assert_eq!(
        session.select_answer(2),
        Err(QuizError::InvalidArgument {
            answer_index: 2,
            answer_count: 2,
        })
    );
    assert_eq!(session.selected_answer(0), None);
}

#[test]
fn graded_answer_is_locked() {
    let mut session = QuizSession::new(sample_questions());
    session.select_answer(0).unwrap();
    session.submit_current_answer().unwrap();

    assert!(session.select_answer(1).is_err());
    assert!(session.submit_current_answer().is_err());
    assert_eq!(session.selected_answer(0), Some(0));
    assert_eq!(session.outcome(0), Some(true));

    session.advance().unwrap();
    answer(&mut session, 3);

    // Grading later questions leaves earlier outcomes alone.
    assert_eq!(session.outcome(0), Some(true));
    assert_eq!(session.outcome(1), Some(false));
}

#[test]
fn advance_requires_grading() {
    let mut session = QuizSession::new(vec![two_plus_two()]);
    session.select_answer(1).unwrap();

    assert!(matches!(
        session.advance(),
        Err(QuizError::IllegalStateTransition {
            operation: QuizOperation::Advance,
            ..
        })
    ));
    assert_eq!(session.current_index(), 0);
}

#[test]
fn complete_session_rejects_everything() {
    let mut session = QuizSession::new(vec![two_plus_two()]);
    answer(&mut session, 1);

    for result in [
        session.select_answer(0),
        session.submit_current_answer(),
        session.advance(),
    ] {
        assert!(matches!(
            result,
            Err(QuizError::IllegalStateTransition {
                state: QuizState::Complete,
                ..
            })
        ));
    }
    assert_eq!(session.score(), Score { correct: 1, total: 1 });
}

#[test]
fn marks_and_feedback_follow_grading() {
    let mut session = QuizSession::new(sample_questions());

    assert_eq!(session.progress().unwrap().to_string(), "Question 1 of 2");
    assert_eq!(session.answer_marks(), vec![AnswerMark::Neutral; 4]);

    session.select_answer(2).unwrap();
    assert_eq!(
        session.answer_marks(),
        vec![
            AnswerMark::Neutral,
            AnswerMark::Neutral,
            AnswerMark::Selected,
            AnswerMark::Neutral,
        ]
    );
    assert!(session.feedback().is_none());
    assert!(session.advance_label().is_none());

    session.submit_current_answer().unwrap();
    assert_eq!(
        session.answer_marks(),
        vec![
            AnswerMark::Correct,
            AnswerMark::Neutral,
            AnswerMark::Wrong,
            AnswerMark::Neutral,
        ]
    );
    let feedback = session.feedback().unwrap();
    assert_eq!(
        feedback,
        Feedback::Wrong {
            correct_answer: "Paris".to_string()
        }
    );
    assert_eq!(feedback.to_string(), "Wrong. The correct answer is: Paris");
    assert_eq!(session.advance_label(), Some("Next Question"));

    session.advance().unwrap();
    session.select_answer(1).unwrap();
    session.submit_current_answer().unwrap();
    assert_eq!(session.feedback().unwrap().to_string(), "Correct!");
    assert_eq!(session.advance_label(), Some("Finish Quiz"));

    session.advance().unwrap();
    assert!(session.answer_marks().is_empty());
    assert!(session.feedback().is_none());
}

#[test]
fn observers_see_each_accepted_transition() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut session = QuizSession::new(vec![two_plus_two()]);
    let sink = events.clone();
    session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let _ = session.submit_current_answer(); // rejected, no event
    session.select_answer(1).unwrap();
    session.submit_current_answer().unwrap();
    session.advance().unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            QuizEvent::AnswerSelected {
                question: 0,
                answer: 1
            },
            QuizEvent::AnswerGraded {
                question: 0,
                correct: true
            },
            QuizEvent::Completed {
                score: Score { correct: 1, total: 1 }
            },
        ]
    );
}

#[test]
fn result_lists_graded_answers() {
    let mut session = QuizSession::new(sample_questions());
    answer(&mut session, 0);
    answer(&mut session, 2);

    let result = session.result();
    assert!(result.complete);
    assert_eq!(result.answers.len(), 2);
    assert_eq!(result.answers[1].selected_answer, "Bleh");
    assert_eq!(result.answers[1].correct_answer, "Berlin");
    assert!(!result.answers[1].correct);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["score"]["correct"], 1);
    assert_eq!(json["answers"][0]["selectedAnswer"], "Paris");
}

#[test]
fn malformed_question_can_never_score() {
    let mut session = QuizSession::new(vec![Question::new("2+2?", ["3", "5"], "4", "")]);
    answer(&mut session, 0);
    assert_eq!(session.score(), Score { correct: 0, total: 1 });
}
