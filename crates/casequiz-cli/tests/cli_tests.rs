//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary from an empty directory so no local casequiz.toml or
/// log filter leaks in.
fn casequiz(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("casequiz").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("CASEQUIZ_CATALOG")
        .env_remove("RUST_LOG")
        .env("HOME", dir.path());
    cmd
}

#[test]
fn list_builtin_cases() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Embolic Photopsias from Atrial Myxoma"))
        .stdout(predicate::str::contains("Autosomal Dominant Optic Atrophy"))
        .stdout(predicate::str::contains("retinal vascular"))
        .stdout(predicate::str::contains("54yo Male, School Teacher"))
        .stdout(predicate::str::contains("Library: 2 case(s) across 2 specialty tag(s)"))
        .stdout(predicate::str::contains("2 case(s)"));
}

#[test]
fn list_filters_by_category() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["list", "--category", "neuro-ophthalmology"])
        .assert()
        .success()
        .stdout(predicate::str::contains("case-2"))
        .stdout(predicate::str::contains("case-1").not())
        .stdout(predicate::str::contains("across 2 specialty tag(s)"))
        .stdout(predicate::str::contains("1 case(s)"));
}

#[test]
fn list_unknown_category() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["list", "--category", "cornea"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cases in category 'cornea'"));
}

#[test]
fn show_case_detail() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["show", "--case", "case-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("54yo Male, School Teacher"))
        .stdout(predicate::str::contains("Intraocular pressure: OD: 16mmHg"))
        .stdout(predicate::str::contains("[image] Right eye fundus"))
        .stdout(predicate::str::contains("1. Genetic counseling"))
        .stdout(predicate::str::contains("casequiz quiz --case case-2"));
}

#[test]
fn show_unknown_case_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["show", "--case", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Case Not Found"));
}

#[test]
fn scripted_quiz_completes_with_score() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args([
            "quiz",
            "--case",
            "case-1",
            "--answer",
            "q1-1=Atrial myxoma",
            "--answer",
            "q1-2=true",
            "--answer",
            "q1-3=cardiothoracic surgery referral",
            "--answer",
            "q1-4=2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct answer: false"))
        .stdout(predicate::str::contains("Progress: 3 / 4 completed (75%)"))
        .stdout(predicate::str::contains("Quiz Completed!"))
        .stdout(predicate::str::contains("Score: 75% (medium)"))
        .stdout(predicate::str::contains("You got 3 out of 4 questions correct."))
        .stdout(predicate::str::contains("Consider reviewing"));
}

#[test]
fn scripted_quiz_partial_has_no_score() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["quiz", "--case", "case-2", "--answer", "q2-3=the OPA1 gene"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("1 / 4 completed"))
        .stdout(predicate::str::contains("Quiz Completed!").not());
}

#[test]
fn interactive_quiz_reads_stdin() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["quiz", "--case", "case-2"])
        .write_stdin("2\n\nfalse\nOPA1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 4"))
        .stdout(predicate::str::contains("Please enter an answer."))
        .stdout(predicate::str::contains("Score: 100% (high)"))
        .stdout(predicate::str::contains("Consider reviewing").not());
}

#[test]
fn quiz_rejects_foreign_question() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["quiz", "--case", "case-1", "--answer", "q2-1=Mitochondrial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not part of quiz quiz-1"));
}

#[test]
fn quiz_rejects_blank_scripted_answer() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["quiz", "--case", "case-1", "--answer", "q1-3=  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("answer is blank"));
}

#[test]
fn quiz_unknown_case_is_not_found() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["quiz", "--case", "case-9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz Not Found"));
}

#[test]
fn quiz_save_then_review() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("results");

    casequiz(&dir)
        .args(["quiz", "--case", "case-2", "--save", "--output"])
        .arg(&out)
        .args(["--answer", "q2-1=Mitochondrial", "--answer", "q2-2=false"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Attempt saved to:"));

    let saved: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(saved.len(), 1);
    let path = saved[0].as_ref().unwrap().path();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["quiz_id"], "quiz-2");
    assert_eq!(json["state"], "in_progress");
    assert_eq!(json["correct"], 1);

    casequiz(&dir)
        .arg("review")
        .arg("--report")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Autosomal Dominant Optic Atrophy"))
        .stdout(predicate::str::contains("(unanswered)"))
        .stdout(predicate::str::contains("Incomplete attempt: 2 of 4 answered"));
}

#[test]
fn init_then_validate_and_use_catalog() {
    let dir = TempDir::new().unwrap();

    casequiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created casequiz.toml"))
        .stdout(predicate::str::contains("Created catalogs/example.toml"));

    casequiz(&dir)
        .args(["validate", "--catalog", "catalogs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cases, 1 quizzes"))
        .stdout(predicate::str::contains("Catalog valid."));

    // casequiz.toml now points at the example catalog
    casequiz(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Central Serous Chorioretinopathy"))
        .stdout(predicate::str::contains("case-1").not());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    casequiz(&dir).arg("init").assert().success();

    casequiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_into_other_directory() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["init", "--dir", "course"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created catalogs/example.toml"));

    assert!(dir.path().join("course/casequiz.toml").is_file());
    casequiz(&dir)
        .args(["validate", "--catalog", "course/catalogs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog valid."));
}

#[test]
fn validate_reports_dangling_quiz() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[[quizzes]]
id = "quiz-x"
case_id = "case-x"

[[quizzes.questions]]
id = "qx-1"
type = "short-answer"
question = "?"
correct_answer = "yes"
explanation = "because"
"#,
    )
    .unwrap();

    casequiz(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("references unknown case case-x"));
}

#[test]
fn validate_rejects_unknown_question_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[[quizzes]]
id = "quiz-x"
case_id = "case-x"

[[quizzes.questions]]
id = "qx-1"
type = "essay"
question = "?"
correct_answer = "yes"
"#,
    )
    .unwrap();

    casequiz(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question type 'essay'"));
}

#[test]
fn bad_file_in_catalog_directory_fails_load() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir).arg("init").assert().success();
    std::fs::write(
        dir.path().join("catalogs").join("bad.toml"),
        r#"
[[quizzes]]
id = "quiz-x"
case_id = "example-1"

[[quizzes.questions]]
id = "qx-1"
type = "essay"
question = "?"
correct_answer = "yes"
"#,
    )
    .unwrap();

    casequiz(&dir)
        .args(["validate", "--catalog", "catalogs"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 cases, 1 quizzes"))
        .stdout(predicate::str::contains("bad.toml"))
        .stdout(predicate::str::contains("unknown question type 'essay'"))
        .stdout(predicate::str::contains("Catalog valid.").not())
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("1 catalog file(s) rejected"));

    // casequiz.toml points at the same directory
    casequiz(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.toml"));
}

#[test]
fn validate_nonexistent_catalog() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .args(["validate", "--catalog", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clinical case studies with graded quizzes"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    casequiz(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("casequiz"));
}
