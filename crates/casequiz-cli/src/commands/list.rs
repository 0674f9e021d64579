//! The `casequiz list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use casequiz_core::model::CaseRecord;

pub fn execute(
    category: Option<String>,
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (repo, _config) = super::open_repository(catalog, config_path)?;

    let cases: Vec<&CaseRecord> = match category.as_deref() {
        Some(tag) => repo.cases_in_category(tag).collect(),
        None => repo.cases().iter().collect(),
    };

    if cases.is_empty() {
        match category.as_deref() {
            Some(tag) => println!(
                "No cases in category '{tag}'. Available: {}",
                repo.categories().join(", ")
            ),
            None => println!("No cases found."),
        }
        return Ok(());
    }

    println!(
        "Library: {} case(s) across {} specialty tag(s)",
        repo.cases().len(),
        repo.categories().len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Title",
        "Category",
        "Patient",
        "VA",
        "Presenting complaint",
        "Quiz",
    ]);
    for case in &cases {
        let questions = repo
            .find_quiz_by_case_id(&case.id)
            .map(|q| format!("{} questions", q.questions.len()))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&case.id),
            Cell::new(&case.title),
            Cell::new(case.category_label()),
            Cell::new(&case.demographics),
            Cell::new(&case.examination.visual_acuity),
            Cell::new(case.summary()),
            Cell::new(questions),
        ]);
    }

    println!("{table}");
    println!("{} case(s)", cases.len());

    Ok(())
}
