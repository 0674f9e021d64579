//! Read-only case and quiz repository.
//!
//! Construction is the single place catalog integrity is enforced, so every
//! quiz handed out by a repository resolves to a case and every lookup after
//! that is infallible apart from "not found".

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::CatalogError;
use crate::model::{CaseRecord, QuizDefinition};
use crate::parser::{self, Catalog};
use crate::seed;

/// In-memory catalog of cases and their quizzes, addressable by id.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    cases: Vec<CaseRecord>,
    quizzes: Vec<QuizDefinition>,
    case_index: HashMap<String, usize>,
    quiz_index: HashMap<String, usize>,
    quiz_by_case: HashMap<String, usize>,
}

impl CaseRepository {
    /// Build a repository, rejecting any broken cross-reference.
    pub fn new(
        cases: Vec<CaseRecord>,
        quizzes: Vec<QuizDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut case_index = HashMap::with_capacity(cases.len());
        for (idx, case) in cases.iter().enumerate() {
            if case.demographics.age == 0 {
                return Err(CatalogError::InvalidAge(case.id.clone()));
            }
            if case_index.insert(case.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateCase(case.id.clone()));
            }
        }

        let mut quiz_index = HashMap::with_capacity(quizzes.len());
        let mut quiz_by_case: HashMap<String, usize> = HashMap::with_capacity(quizzes.len());
        for (idx, quiz) in quizzes.iter().enumerate() {
            if quiz_index.insert(quiz.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateQuiz(quiz.id.clone()));
            }
            if !case_index.contains_key(&quiz.case_id) {
                return Err(CatalogError::DanglingCase {
                    quiz_id: quiz.id.clone(),
                    case_id: quiz.case_id.clone(),
                });
            }
            if let Some(&first) = quiz_by_case.get(&quiz.case_id) {
                return Err(CatalogError::SharedCase {
                    case_id: quiz.case_id.clone(),
                    first: quizzes[first].id.clone(),
                    second: quiz.id.clone(),
                });
            }
            if quiz.questions.is_empty() {
                return Err(CatalogError::EmptyQuiz(quiz.id.clone()));
            }
            let mut seen = HashSet::new();
            for question in &quiz.questions {
                if !seen.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestion {
                        quiz_id: quiz.id.clone(),
                        question_id: question.id.clone(),
                    });
                }
            }
            quiz_by_case.insert(quiz.case_id.clone(), idx);
        }

        tracing::debug!(
            cases = cases.len(),
            quizzes = quizzes.len(),
            "case repository built"
        );

        Ok(Self {
            cases,
            quizzes,
            case_index,
            quiz_index,
            quiz_by_case,
        })
    }

    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        Self::new(catalog.cases, catalog.quizzes)
    }

    /// Repository over the built-in seed catalog.
    pub fn builtin() -> Result<Self> {
        let catalog = seed::builtin_catalog()?;
        Self::from_catalog(catalog).context("built-in catalog is inconsistent")
    }

    /// Repository over a catalog file or a directory of catalog files.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = parser::load_catalog(path)?;
        let repo = Self::from_catalog(catalog)
            .with_context(|| format!("invalid catalog: {}", path.display()))?;
        tracing::info!(
            "loaded {} case(s) from {}",
            repo.cases.len(),
            path.display()
        );
        Ok(repo)
    }

    /// Look up a case by exact id.
    pub fn find_case_by_id(&self, id: &str) -> Option<&CaseRecord> {
        self.case_index.get(id).map(|&idx| &self.cases[idx])
    }

    /// Look up the quiz bound to a case.
    pub fn find_quiz_by_case_id(&self, case_id: &str) -> Option<&QuizDefinition> {
        self.quiz_by_case.get(case_id).map(|&idx| &self.quizzes[idx])
    }

    pub fn find_quiz_by_id(&self, id: &str) -> Option<&QuizDefinition> {
        self.quiz_index.get(id).map(|&idx| &self.quizzes[idx])
    }

    /// All cases in catalog order.
    pub fn cases(&self) -> &[CaseRecord] {
        &self.cases
    }

    pub fn quizzes(&self) -> &[QuizDefinition] {
        &self.quizzes
    }

    /// Distinct category tags in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.cases
            .iter()
            .map(|c| c.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn cases_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CaseRecord> + 'a {
        self.cases.iter().filter(move |c| c.category == category)
    }
}
