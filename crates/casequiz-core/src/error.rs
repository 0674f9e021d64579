//! Error types for quiz sessions and catalog loading.
//!
//! A missing case or quiz is not an error: lookups return `Option`. The
//! types here cover rejected submissions and broken data invariants.

use thiserror::Error;

/// Errors raised while recording answers in a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The submitted answer was empty or whitespace only.
    #[error("answer is blank")]
    BlankSubmission,

    /// The question id does not belong to the quiz being taken.
    #[error("question {question_id} is not part of quiz {quiz_id}")]
    UnknownQuestion { quiz_id: String, question_id: String },
}

impl QuizError {
    /// Returns `true` if this error means the caller broke the session
    /// contract, as opposed to the user typing nothing.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, QuizError::UnknownQuestion { .. })
    }
}

/// Integrity defects found while turning catalog data into a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A question declared a `type` outside the three known kinds.
    #[error("question {question_id}: unknown question type '{kind}'")]
    UnknownQuestionKind { question_id: String, kind: String },

    /// A multiple-choice question with no options.
    #[error("question {question_id}: multiple-choice question has no options")]
    MissingOptions { question_id: String },

    /// A multiple-choice key that is not one of the listed options.
    #[error("question {question_id}: correct answer '{answer}' is not one of the options")]
    AnswerNotAnOption { question_id: String, answer: String },

    /// A true-false key other than the literals `true` and `false`.
    #[error("question {question_id}: true-false answer must be \"true\" or \"false\", got '{answer}'")]
    InvalidTrueFalse { question_id: String, answer: String },

    #[error("duplicate case id: {0}")]
    DuplicateCase(String),

    #[error("duplicate quiz id: {0}")]
    DuplicateQuiz(String),

    #[error("quiz {quiz_id}: duplicate question id {question_id}")]
    DuplicateQuestion { quiz_id: String, question_id: String },

    /// The quiz's `case_id` does not resolve to a loaded case.
    #[error("quiz {quiz_id} references unknown case {case_id}")]
    DanglingCase { quiz_id: String, case_id: String },

    /// Two quizzes are bound to the same case.
    #[error("case {case_id} has more than one quiz ({first}, {second})")]
    SharedCase {
        case_id: String,
        first: String,
        second: String,
    },

    #[error("quiz {0} has no questions")]
    EmptyQuiz(String),

    #[error("case {0}: patient age must be positive")]
    InvalidAge(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_question_is_contract_violation() {
        let err = QuizError::UnknownQuestion {
            quiz_id: "quiz-1".into(),
            question_id: "q9-9".into(),
        };
        assert!(err.is_contract_violation());
        assert!(!QuizError::BlankSubmission.is_contract_violation());
    }

    #[test]
    fn catalog_error_messages_name_the_offender() {
        let err = CatalogError::DanglingCase {
            quiz_id: "quiz-3".into(),
            case_id: "case-3".into(),
        };
        assert_eq!(err.to_string(), "quiz quiz-3 references unknown case case-3");
    }
}
