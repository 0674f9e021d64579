//! Quiz session tracking and scoring.
//!
//! A [`QuizSession`] is one attempt at one quiz. It keeps at most one graded
//! submission per question; answering a question again replaces the earlier
//! submission. Once every question has a submission the session is
//! [`SessionState::Completed`] and stays there.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::evaluator::{check_submission, evaluate};
use crate::model::{AnswerSubmission, Question, QuizDefinition};

/// Lowest score in the high band.
pub const HIGH_BAND_MIN: u32 = 80;
/// Lowest score in the medium band.
pub const MEDIUM_BAND_MIN: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Completed,
}

/// Coarse classification of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Anything below the high band suggests going back over the case.
    pub fn needs_review(self) -> bool {
        self != ScoreBand::High
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::High => write!(f, "high"),
            ScoreBand::Medium => write!(f, "medium"),
            ScoreBand::Low => write!(f, "low"),
        }
    }
}

/// Classify a percentage score.
pub fn score_band(score: u32) -> ScoreBand {
    if score >= HIGH_BAND_MIN {
        ScoreBand::High
    } else if score >= MEDIUM_BAND_MIN {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}

/// What to show the user after an answer is graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub is_correct: bool,
    pub explanation: String,
    /// The correct answer, only for wrong answers to questions whose key
    /// may be revealed.
    pub revealed_answer: Option<String>,
}

/// One attempt at a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession<'q> {
    quiz: &'q QuizDefinition,
    answers: HashMap<String, AnswerSubmission>,
    state: SessionState,
}

impl<'q> QuizSession<'q> {
    pub fn new(quiz: &'q QuizDefinition) -> Self {
        Self {
            quiz,
            answers: HashMap::with_capacity(quiz.questions.len()),
            state: SessionState::InProgress,
        }
    }

    pub fn quiz(&self) -> &'q QuizDefinition {
        self.quiz
    }

    /// Grade and store an answer, replacing any earlier answer to the same
    /// question.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        submitted: &str,
    ) -> Result<Feedback, QuizError> {
        let quiz = self.quiz;
        let question = quiz
            .question(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion {
                quiz_id: quiz.id.clone(),
                question_id: question_id.to_string(),
            })?;
        let submitted = check_submission(submitted)?;

        let is_correct = evaluate(question, submitted);
        let replaced = self
            .answers
            .insert(
                question.id.clone(),
                AnswerSubmission {
                    question_id: question.id.clone(),
                    answer: submitted.to_string(),
                    is_correct,
                },
            )
            .is_some();

        tracing::debug!(
            quiz = %quiz.id,
            question = %question.id,
            is_correct,
            replaced,
            "answer recorded"
        );

        if self.state == SessionState::InProgress && self.answers.len() == self.total_questions()
        {
            self.state = SessionState::Completed;
            tracing::debug!(quiz = %quiz.id, score = self.score(), "quiz completed");
        }

        Ok(Feedback {
            is_correct,
            explanation: question.explanation.clone(),
            revealed_answer: if is_correct {
                None
            } else {
                question.revealed_answer()
            },
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    /// Number of distinct questions answered.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.values().filter(|a| a.is_correct).count()
    }

    pub fn submission(&self, question_id: &str) -> Option<&AnswerSubmission> {
        self.answers.get(question_id)
    }

    /// Submissions in quiz order.
    pub fn submissions(&self) -> Vec<&AnswerSubmission> {
        self.quiz
            .questions
            .iter()
            .filter_map(|q| self.answers.get(&q.id))
            .collect()
    }

    /// Questions without a submission yet, in quiz order.
    pub fn unanswered(&self) -> Vec<&'q Question> {
        self.quiz
            .questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .collect()
    }

    /// Answered share of the quiz as a percentage in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            return 0.0;
        }
        self.answered_count() as f64 / total as f64 * 100.0
    }

    /// Correct share of the whole quiz as a whole percentage, rounded half
    /// up. Unanswered questions count as not correct.
    pub fn score(&self) -> u32 {
        let total = self.total_questions() as u64;
        if total == 0 {
            return 0;
        }
        let correct = self.correct_count() as u64;
        // floor(100c/t + 1/2) without leaving integers
        ((200 * correct + total) / (2 * total)) as u32
    }

    pub fn score_band(&self) -> ScoreBand {
        score_band(self.score())
    }
}
