//! Answer evaluation.
//!
//! Grading rules by question kind:
//! - multiple-choice: exact, case-sensitive match with the key.
//! - true-false: exact match with the literal `"true"` or `"false"`.
//! - short-answer: the trimmed, lowercased answer contains the trimmed,
//!   lowercased key. This accepts extended phrasing ("the OPA1 gene") and
//!   also any wrong answer that happens to contain the key.

use crate::error::QuizError;
use crate::model::{Question, QuestionKind};

/// Decide whether `submitted` answers `question` correctly.
///
/// Callers must not pass blank input; see [`check_submission`].
pub fn evaluate(question: &Question, submitted: &str) -> bool {
    match &question.kind {
        QuestionKind::MultipleChoice { correct_answer, .. } => {
            submitted == correct_answer.as_str()
        }
        QuestionKind::TrueFalse { correct_answer } => {
            let literal = if *correct_answer { "true" } else { "false" };
            submitted == literal
        }
        QuestionKind::ShortAnswer { correct_answer } => {
            normalize(submitted).contains(&normalize(correct_answer))
        }
    }
}

/// Reject blank or whitespace-only input before it reaches grading.
///
/// Returns the input untouched so exact comparisons still see what the
/// user chose.
pub fn check_submission(raw: &str) -> Result<&str, QuizError> {
    if raw.trim().is_empty() {
        Err(QuizError::BlankSubmission)
    } else {
        Ok(raw)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
