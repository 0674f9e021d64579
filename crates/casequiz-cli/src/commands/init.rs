//! The `casequiz init` command.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_FILE: &str = "casequiz.toml";
const EXAMPLE_FILE: &str = "catalogs/example.toml";

/// Scaffold a starter config and example catalog under `dir`.
pub fn execute(dir: &Path) -> Result<()> {
    for (relative, contents) in [(CONFIG_FILE, SAMPLE_CONFIG), (EXAMPLE_FILE, EXAMPLE_CATALOG)] {
        if write_new(&dir.join(relative), contents)? {
            println!("Created {relative}");
        } else {
            println!("{relative} already exists, skipping.");
        }
    }

    println!("\nNext steps:");
    println!("  1. Add cases to {EXAMPLE_FILE}");
    println!("  2. Run: casequiz validate --catalog catalogs");
    println!("  3. Run: casequiz quiz --case example-1");

    Ok(())
}

/// Create `path` with `contents` unless it already exists.
///
/// Returns `false` when an existing file was left untouched.
fn write_new(path: &Path, contents: &str) -> Result<bool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to create {}", path.display()))
        }
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

const SAMPLE_CONFIG: &str = r#"# casequiz configuration

# Catalog file or directory; remove to use the built-in cases.
catalog = "catalogs"

# Where `casequiz quiz --save` writes attempt reports.
output_dir = "./casequiz-results"

show_explanations = true
"#;

const EXAMPLE_CATALOG: &str = r#"[[cases]]
id = "example-1"
title = "Central Serous Chorioretinopathy"
presenting_complaint = "Blurred and distorted central vision in the left eye for two weeks."
past_history = ["Oral prednisolone course for asthma one month ago"]
diagnosis = "Central serous chorioretinopathy"
management_plan = ["Stop steroids where safe", "Review with OCT in 6 weeks"]
category = "medical-retina"

[cases.demographics]
age = 38
gender = "Male"
occupation = "Software Engineer"

[cases.examination]
visual_acuity = "OD: 6/6, OS: 6/12"
pupils = "Equal, reactive, no RAPD"
extraocular_movements = "Full in both eyes"
anterior_segment = "Both eyes: quiet"
posterior_segment = "OS: round serous elevation of the macula"

[[cases.investigations]]
description = "OCT Macula"
findings = "Subretinal fluid at the fovea of the left eye."

[[quizzes]]
id = "example-quiz-1"
case_id = "example-1"

[[quizzes.questions]]
id = "ex1-1"
type = "multiple-choice"
question = "Which medication is a recognised risk factor?"
options = ["Corticosteroids", "Metformin", "Amlodipine"]
correct_answer = "Corticosteroids"
explanation = "Exogenous corticosteroids are the classic trigger."

[[quizzes.questions]]
id = "ex1-2"
type = "true-false"
question = "Most acute cases need laser treatment."
correct_answer = "false"
explanation = "Most acute episodes resolve spontaneously within months."

[[quizzes.questions]]
id = "ex1-3"
type = "short-answer"
question = "Which imaging test best shows the subretinal fluid?"
correct_answer = "OCT"
explanation = "OCT shows subretinal fluid directly and is used for follow-up."
"#;

#[cfg(test)]
mod tests {
    use super::*;

    use casequiz_core::parser::{parse_catalog_str, validate_catalog};
    use casequiz_core::repository::CaseRepository;

    #[test]
    fn example_catalog_is_valid() {
        let catalog = parse_catalog_str(EXAMPLE_CATALOG, Path::new("example.toml")).unwrap();
        assert!(validate_catalog(&catalog).is_empty());
        let repo = CaseRepository::from_catalog(catalog).unwrap();
        assert_eq!(repo.find_quiz_by_case_id("example-1").unwrap().questions.len(), 3);
    }

    #[test]
    fn scaffold_writes_files_that_load() {
        let dir = tempfile::tempdir().unwrap();
        execute(dir.path()).unwrap();

        let repo = CaseRepository::load(&dir.path().join("catalogs")).unwrap();
        assert!(repo.find_case_by_id("example-1").is_some());
        let config =
            casequiz_core::config::load_config_from(Some(&dir.path().join(CONFIG_FILE))).unwrap();
        assert_eq!(config.catalog, Some(std::path::PathBuf::from("catalogs")));
    }

    #[test]
    fn existing_files_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILE);
        std::fs::write(&config, "show_explanations = false\n").unwrap();

        assert!(!write_new(&config, SAMPLE_CONFIG).unwrap());
        assert_eq!(
            std::fs::read_to_string(&config).unwrap(),
            "show_explanations = false\n"
        );
        assert!(write_new(&dir.path().join(EXAMPLE_FILE), EXAMPLE_CATALOG).unwrap());
    }

    #[test]
    fn sample_config_parses() {
        let config: casequiz_core::config::CasequizConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert!(config.show_explanations);
    }
}
