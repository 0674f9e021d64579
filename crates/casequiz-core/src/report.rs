//! Attempt reports with JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::CaseRecord;
use crate::session::{QuizSession, ScoreBand, SessionState};

/// Summary of one quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub case: CaseSummary,
    pub quiz_id: String,
    pub state: SessionState,
    /// One entry per question in quiz order, answered or not.
    pub answers: Vec<AnswerLine>,
    pub correct: usize,
    pub total: usize,
    /// Whole-percentage score.
    pub score: u32,
    pub band: ScoreBand,
}

/// The case an attempt was about (without the full case record).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerLine {
    pub question_id: String,
    pub question: String,
    /// `None` when the question was left unanswered.
    pub answer: Option<String>,
    pub is_correct: bool,
}

impl AttemptReport {
    /// Snapshot a session.
    pub fn from_session(case: &CaseRecord, session: &QuizSession<'_>) -> Self {
        let answers = session
            .quiz()
            .questions
            .iter()
            .map(|q| {
                let submission = session.submission(&q.id);
                AnswerLine {
                    question_id: q.id.clone(),
                    question: q.prompt.clone(),
                    answer: submission.map(|s| s.answer.clone()),
                    is_correct: submission.is_some_and(|s| s.is_correct),
                }
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            case: CaseSummary {
                id: case.id.clone(),
                title: case.title.clone(),
                category: case.category.clone(),
            },
            quiz_id: session.quiz().id.clone(),
            state: session.state(),
            answers,
            correct: session.correct_count(),
            total: session.total_questions(),
            score: session.score(),
            band: session.score_band(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
