//! The `casequiz review` command.

use std::path::PathBuf;

use anyhow::Result;

use casequiz_core::report::AttemptReport;
use casequiz_core::session::SessionState;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = AttemptReport::load_json(&report_path)?;

    println!("Attempt {} ({})", report.id, report.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("Case: {} [{}]", report.case.title, report.case.id);

    for line in &report.answers {
        let mark = match (&line.answer, line.is_correct) {
            (None, _) => "-",
            (Some(_), true) => "OK",
            (Some(_), false) => "X",
        };
        println!(
            "  {mark:>2} {} {}: {}",
            line.question_id,
            line.question,
            line.answer.as_deref().unwrap_or("(unanswered)")
        );
    }

    match report.state {
        SessionState::Completed => println!(
            "Score: {}% ({}), {} of {} correct",
            report.score, report.band, report.correct, report.total
        ),
        SessionState::InProgress => println!(
            "Incomplete attempt: {} of {} answered",
            report.answers.iter().filter(|a| a.answer.is_some()).count(),
            report.total
        ),
    }

    Ok(())
}
