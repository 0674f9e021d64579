//! The `casequiz quiz` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use casequiz_core::evaluator::check_submission;
use casequiz_core::model::Question;
use casequiz_core::report::AttemptReport;
use casequiz_core::session::{Feedback, QuizSession};

pub fn execute(
    case_id: String,
    answers: Vec<String>,
    save: bool,
    output: Option<PathBuf>,
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (repo, config) = super::open_repository(catalog, config_path)?;

    let (Some(case), Some(quiz)) = (
        repo.find_case_by_id(&case_id),
        repo.find_quiz_by_case_id(&case_id),
    ) else {
        println!("Quiz Not Found: no quiz for case '{case_id}'.");
        println!("Run `casequiz list` to see the case library.");
        return Ok(());
    };

    let scripted = answers
        .iter()
        .map(|a| parse_answer_flag(a))
        .collect::<Result<Vec<_>>>()?;

    println!("Quiz: {}", case.title);
    println!(
        "Test your understanding of this case with {} questions.\n",
        quiz.questions.len()
    );

    let mut session = QuizSession::new(quiz);

    if scripted.is_empty() {
        let stdin = io::stdin();
        run_interactive(&mut session, stdin.lock(), config.show_explanations)?;
    } else {
        for (question_id, raw) in scripted {
            let answer = quiz
                .question(question_id)
                .map(|q| resolve_choice(q, raw))
                .unwrap_or_else(|| raw.to_string());
            let feedback = session
                .record_answer(question_id, &answer)
                .with_context(|| format!("cannot record answer for {question_id}"))?;
            println!("[{question_id}] {answer}");
            print_feedback(&feedback, config.show_explanations);
            print_progress(&session);
        }
    }

    print_summary(&session);

    if save {
        let dir = output.unwrap_or(config.output_dir);
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("attempt-{}-{timestamp}.json", case.id));
        AttemptReport::from_session(case, &session).save_json(&path)?;
        eprintln!("Attempt saved to: {}", path.display());
    }

    Ok(())
}

/// Split a `QUESTION_ID=ANSWER` flag.
fn parse_answer_flag(flag: &str) -> Result<(&str, &str)> {
    match flag.split_once('=') {
        Some((id, answer)) if !id.trim().is_empty() => Ok((id.trim(), answer)),
        _ => anyhow::bail!("invalid --answer '{flag}', expected QUESTION_ID=ANSWER"),
    }
}

/// Map a 1-based choice number onto the option text; anything else is
/// taken as typed.
fn resolve_choice(question: &Question, input: &str) -> String {
    let choices = question.choices();
    // Option text wins over its position
    if choices.contains(&input) {
        return input.to_string();
    }
    if let Ok(n) = input.trim().parse::<usize>() {
        if (1..=choices.len()).contains(&n) {
            return choices[n - 1].to_string();
        }
    }
    input.to_string()
}

fn run_interactive<R: BufRead>(
    session: &mut QuizSession<'_>,
    mut input: R,
    show_explanations: bool,
) -> Result<()> {
    let quiz = session.quiz();
    let total = quiz.questions.len();

    for (idx, question) in quiz.questions.iter().enumerate() {
        println!("Question {} of {total}", idx + 1);
        println!("{}", question.prompt);
        for (i, choice) in question.choices().iter().enumerate() {
            println!("  {}) {choice}", i + 1);
        }

        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                println!(
                    "\nQuiz abandoned after {} of {total} questions.",
                    session.answered_count()
                );
                return Ok(());
            }

            let raw = line.trim_end_matches(['\r', '\n']);
            if check_submission(raw).is_err() {
                println!("Please enter an answer.");
                continue;
            }

            let answer = resolve_choice(question, raw);
            let feedback = session.record_answer(&question.id, &answer)?;
            print_feedback(&feedback, show_explanations);
            print_progress(session);
            break;
        }
    }

    Ok(())
}

fn print_feedback(feedback: &Feedback, show_explanations: bool) {
    if feedback.is_correct {
        println!("Correct!");
    } else {
        println!("Incorrect");
    }
    if show_explanations {
        println!("{}", feedback.explanation);
    }
    if let Some(answer) = &feedback.revealed_answer {
        println!("Correct answer: {answer}");
    }
}

fn print_progress(session: &QuizSession<'_>) {
    println!(
        "Progress: {} / {} completed ({:.0}%)\n",
        session.answered_count(),
        session.total_questions(),
        session.progress()
    );
}

fn print_summary(session: &QuizSession<'_>) {
    if !session.is_complete() {
        println!(
            "{} / {} completed. Answer the remaining questions to see your score.",
            session.answered_count(),
            session.total_questions()
        );
        return;
    }

    let band = session.score_band();
    println!("Quiz Completed!");
    println!("Score: {}% ({band})", session.score());
    println!(
        "You got {} out of {} questions correct.",
        session.correct_count(),
        session.total_questions()
    );
    if band.needs_review() {
        println!("Consider reviewing the case details and explanations to improve your understanding.");
    }
}
