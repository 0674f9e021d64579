//! The `casequiz show` command.

use std::path::PathBuf;

use anyhow::Result;

use casequiz_core::model::CaseRecord;

pub fn execute(
    case_id: String,
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (repo, _config) = super::open_repository(catalog, config_path)?;

    let Some(case) = repo.find_case_by_id(&case_id) else {
        println!("Case Not Found: no case with id '{case_id}'.");
        println!("Run `casequiz list` to see the case library.");
        return Ok(());
    };

    print_case(case);

    match repo.find_quiz_by_case_id(&case.id) {
        Some(quiz) => println!(
            "\nTest your understanding: casequiz quiz --case {} ({} questions)",
            case.id,
            quiz.questions.len()
        ),
        None => println!("\nNo quiz is available for this case."),
    }

    Ok(())
}

fn print_case(case: &CaseRecord) {
    println!("{}", case.title);
    println!("[{}]", case.category_label());

    println!("\nPatient");
    println!("  {}", case.demographics);

    println!("\nPresenting complaint");
    println!("  {}", case.presenting_complaint);

    if !case.past_history.is_empty() {
        println!("\nPast history");
        for item in &case.past_history {
            println!("  - {item}");
        }
    }

    println!("\nExamination");
    for (label, value) in case.examination.fields() {
        println!("  {label}: {value}");
    }

    if !case.investigations.is_empty() {
        println!("\nInvestigations");
        for inv in &case.investigations {
            println!("  {}", inv.description);
            println!("    {}", inv.findings);
            for image in &inv.images {
                println!("    [image] {} ({})", image.caption, image.url);
            }
        }
    }

    println!("\nDiagnosis");
    println!("  {}", case.diagnosis);

    if !case.management_plan.is_empty() {
        println!("\nManagement plan");
        for (i, step) in case.management_plan.iter().enumerate() {
            println!("  {}. {step}", i + 1);
        }
    }
}
