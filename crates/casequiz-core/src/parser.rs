//! TOML catalog parser.
//!
//! Loads case and quiz catalogs from TOML files and directories, converts
//! raw question tables into typed questions, and reports soft warnings.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{CaseRecord, Question, QuestionKind, QuizDefinition};

/// Cases and quizzes as read from one or more catalog files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub cases: Vec<CaseRecord>,
    pub quizzes: Vec<QuizDefinition>,
}

impl Catalog {
    /// Append another catalog, keeping file order.
    pub fn merge(&mut self, other: Catalog) {
        self.cases.extend(other.cases);
        self.quizzes.extend(other.quizzes);
    }
}

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    cases: Vec<CaseRecord>,
    #[serde(default)]
    quizzes: Vec<TomlQuiz>,
}

#[derive(Debug, Deserialize)]
struct TomlQuiz {
    id: String,
    case_id: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    correct_answer: String,
    #[serde(default)]
    explanation: String,
}

impl TryFrom<TomlQuestion> for Question {
    type Error = CatalogError;

    fn try_from(raw: TomlQuestion) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "multiple-choice" => {
                let options = raw.options.unwrap_or_default();
                if options.is_empty() {
                    return Err(CatalogError::MissingOptions {
                        question_id: raw.id,
                    });
                }
                if !options.contains(&raw.correct_answer) {
                    return Err(CatalogError::AnswerNotAnOption {
                        question_id: raw.id,
                        answer: raw.correct_answer,
                    });
                }
                QuestionKind::MultipleChoice {
                    options,
                    correct_answer: raw.correct_answer,
                }
            }
            "true-false" => {
                let correct_answer = match raw.correct_answer.as_str() {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(CatalogError::InvalidTrueFalse {
                            question_id: raw.id,
                            answer: raw.correct_answer,
                        })
                    }
                };
                QuestionKind::TrueFalse { correct_answer }
            }
            "short-answer" => QuestionKind::ShortAnswer {
                correct_answer: raw.correct_answer,
            },
            _ => {
                return Err(CatalogError::UnknownQuestionKind {
                    question_id: raw.id,
                    kind: raw.kind,
                })
            }
        };

        Ok(Question {
            id: raw.id,
            prompt: raw.question,
            kind,
            explanation: raw.explanation,
        })
    }
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let quizzes = parsed
        .quizzes
        .into_iter()
        .map(|quiz| {
            let questions = quiz
                .questions
                .into_iter()
                .map(Question::try_from)
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("invalid quiz {} in {}", quiz.id, source_path.display()))?;
            Ok(QuizDefinition {
                id: quiz.id,
                case_id: quiz.case_id,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog {
        cases: parsed.cases,
        quizzes,
    })
}

/// A catalog file under a directory that failed to parse or convert.
#[derive(Debug)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Result of reading every catalog file under a directory.
#[derive(Debug, Default)]
pub struct CatalogScan {
    pub catalog: Catalog,
    pub rejected: Vec<RejectedFile>,
}

/// Recursively read all `.toml` catalog files under a directory.
///
/// Good files are merged in file-name order; files that fail are collected
/// in `rejected` instead of aborting the walk, so callers can report all of
/// them at once.
pub fn scan_catalog_directory(dir: &Path) -> Result<CatalogScan> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut scan = CatalogScan::default();
    for path in paths {
        if path.is_dir() {
            let nested = scan_catalog_directory(&path)?;
            scan.catalog.merge(nested.catalog);
            scan.rejected.extend(nested.rejected);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(parsed) => scan.catalog.merge(parsed),
                Err(error) => {
                    tracing::warn!("rejected {}: {:#}", path.display(), error);
                    scan.rejected.push(RejectedFile { path, error });
                }
            }
        }
    }

    Ok(scan)
}

/// Read a single file or a directory without failing on bad files.
pub fn scan_catalog(path: &Path) -> Result<CatalogScan> {
    if path.is_dir() {
        scan_catalog_directory(path)
    } else {
        Ok(CatalogScan {
            catalog: parse_catalog(path)?,
            rejected: Vec::new(),
        })
    }
}

/// Load and merge all `.toml` catalog files under a directory.
///
/// Any file that fails to parse fails the whole load.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    let scan = scan_catalog_directory(dir)?;
    let count = scan.rejected.len();
    match scan.rejected.into_iter().next() {
        Some(first) => Err(first.error.context(format!(
            "{count} catalog file(s) rejected under {}, first: {}",
            dir.display(),
            first.path.display()
        ))),
        None => Ok(scan.catalog),
    }
}

/// Load a catalog from either a single file or a directory.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// A non-fatal issue found in a catalog.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The case or quiz the warning is about.
    pub subject: Option<String>,
    pub message: String,
}

/// Check a catalog for issues that do not stop it from loading.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Cases nobody can be quizzed on
    let quizzed: HashSet<&str> = catalog.quizzes.iter().map(|q| q.case_id.as_str()).collect();
    for case in &catalog.cases {
        if !quizzed.contains(case.id.as_str()) {
            warnings.push(ValidationWarning {
                subject: Some(case.id.clone()),
                message: "case has no quiz".into(),
            });
        }
    }

    for quiz in &catalog.quizzes {
        for question in &quiz.questions {
            if question.explanation.trim().is_empty() {
                warnings.push(ValidationWarning {
                    subject: Some(quiz.id.clone()),
                    message: format!("question {} has no explanation", question.id),
                });
            }

            match &question.kind {
                // An empty key is a substring of every answer
                QuestionKind::ShortAnswer { correct_answer } if correct_answer.trim().is_empty() => {
                    warnings.push(ValidationWarning {
                        subject: Some(quiz.id.clone()),
                        message: format!(
                            "question {} has a blank short-answer key and accepts any answer",
                            question.id
                        ),
                    });
                }
                QuestionKind::MultipleChoice { options, .. } => {
                    let mut seen = HashSet::new();
                    if options.iter().any(|o| !seen.insert(o)) {
                        warnings.push(ValidationWarning {
                            subject: Some(quiz.id.clone()),
                            message: format!("question {} repeats an option", question.id),
                        });
                    }
                }
                _ => {}
            }
        }
    }

    warnings
}
