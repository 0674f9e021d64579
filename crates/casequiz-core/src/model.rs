//! Core data model types for casequiz.
//!
//! Case records and quizzes are loaded once and never mutated. Answer
//! submissions live only as long as the quiz session that graded them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters of the presenting complaint shown in listings.
const SUMMARY_CHARS: usize = 150;

/// One clinical case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Unique identifier, e.g. `case-1`.
    pub id: String,
    pub title: String,
    pub demographics: Demographics,
    pub presenting_complaint: String,
    /// Past medical history, in the order it is presented.
    #[serde(default)]
    pub past_history: Vec<String>,
    pub examination: ExaminationFindings,
    #[serde(default)]
    pub investigations: Vec<Investigation>,
    pub diagnosis: String,
    /// Management steps, in order.
    #[serde(default)]
    pub management_plan: Vec<String>,
    /// Free-text category tag, e.g. `retinal-vascular`.
    pub category: String,
}

impl CaseRecord {
    /// Category tag as shown on a badge: the first hyphen becomes a space.
    pub fn category_label(&self) -> String {
        self.category.replacen('-', " ", 1)
    }

    /// Presenting complaint cut down for a library card.
    pub fn summary(&self) -> String {
        if self.presenting_complaint.chars().count() <= SUMMARY_CHARS {
            return self.presenting_complaint.clone();
        }
        let head: String = self
            .presenting_complaint
            .chars()
            .take(SUMMARY_CHARS)
            .collect();
        format!("{head}...")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub age: u32,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

impl fmt::Display for Demographics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}yo {}", self.age, self.gender)?;
        if let Some(occupation) = &self.occupation {
            write!(f, ", {occupation}")?;
        }
        Ok(())
    }
}

/// Fixed set of examination fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationFindings {
    pub visual_acuity: String,
    pub pupils: String,
    pub extraocular_movements: String,
    pub anterior_segment: String,
    pub posterior_segment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intraocular_pressure: Option<String>,
}

impl ExaminationFindings {
    /// Labelled fields in display order, skipping the ones not recorded.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("Visual acuity", self.visual_acuity.as_str()),
            ("Pupils", self.pupils.as_str()),
            ("Extraocular movements", self.extraocular_movements.as_str()),
            ("Anterior segment", self.anterior_segment.as_str()),
            ("Posterior segment", self.posterior_segment.as_str()),
        ];
        if let Some(iop) = &self.intraocular_pressure {
            fields.push(("Intraocular pressure", iop.as_str()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigation {
    pub description: String,
    pub findings: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<InvestigationImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigationImage {
    pub url: String,
    pub caption: String,
}

/// The quiz attached to exactly one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: String,
    /// Id of the case this quiz belongs to.
    pub case_id: String,
    /// Questions in display order.
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// A single quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within its quiz, e.g. `q1-3`.
    pub id: String,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Shown after grading whatever the outcome.
    pub explanation: String,
}

impl Question {
    /// The key to show after a wrong answer. Short-answer keys are never
    /// revealed since any phrasing containing them is accepted.
    pub fn revealed_answer(&self) -> Option<String> {
        match &self.kind {
            QuestionKind::MultipleChoice { correct_answer, .. } => Some(correct_answer.clone()),
            QuestionKind::TrueFalse { correct_answer } => Some(correct_answer.to_string()),
            QuestionKind::ShortAnswer { .. } => None,
        }
    }

    /// Choices offered to the user, if the kind has a fixed set.
    pub fn choices(&self) -> Vec<&str> {
        match &self.kind {
            QuestionKind::MultipleChoice { options, .. } => {
                options.iter().map(String::as_str).collect()
            }
            QuestionKind::TrueFalse { .. } => vec!["true", "false"],
            QuestionKind::ShortAnswer { .. } => Vec::new(),
        }
    }
}

/// Kind-specific part of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    TrueFalse {
        correct_answer: bool,
    },
    ShortAnswer {
        correct_answer: String,
    },
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple-choice",
            QuestionKind::TrueFalse { .. } => "true-false",
            QuestionKind::ShortAnswer { .. } => "short-answer",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One graded answer held by a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub answer: String,
    pub is_correct: bool,
}
