//! The `casequiz validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use casequiz_core::parser::{scan_catalog, validate_catalog};
use casequiz_core::repository::CaseRepository;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    if !catalog_path.exists() {
        anyhow::bail!("catalog not found: {}", catalog_path.display());
    }

    let scan = scan_catalog(&catalog_path)?;
    println!(
        "Catalog: {} ({} cases, {} quizzes)",
        catalog_path.display(),
        scan.catalog.cases.len(),
        scan.catalog.quizzes.len()
    );

    for rejected in &scan.rejected {
        println!("  [{}] ERROR: {:#}", rejected.path.display(), rejected.error);
    }

    let warnings = validate_catalog(&scan.catalog);
    for w in &warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if !scan.rejected.is_empty() {
        anyhow::bail!(
            "{} catalog file(s) rejected under {}",
            scan.rejected.len(),
            catalog_path.display()
        );
    }

    // Hard integrity errors fail the command
    CaseRepository::from_catalog(scan.catalog)
        .with_context(|| format!("invalid catalog: {}", catalog_path.display()))?;

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
