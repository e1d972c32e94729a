use assert_cmd::Command;
use predicates::prelude::*;

fn finlog(journal: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("finlog_cli").expect("binary builds");
    cmd.env("FINLOG_CLI_SCRIPT", "1")
        .env("FINLOG_DATA_FILE", journal);
    cmd
}

#[test]
fn script_session_produces_summary_report() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    finlog(&journal)
        .write_stdin(
            "income 1000 Salary /d 2026-08-01\n\
             expense 50 Groceries /c food /d 2026-08-02\n\
             expense 20 \"Bus fare\" /c transport /d 2026-08-03\n\
             summary 8 2026\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Summary for August 2026:"))
        .stdout(predicate::str::contains("Total Income: $1000.00"))
        .stdout(predicate::str::contains("Total Expenses: $70.00"))
        .stdout(predicate::str::contains("No budget set for August 2026."))
        .stdout(predicate::str::contains("1. FOOD: $50.00"))
        .stdout(predicate::str::contains("2. TRANSPORT: $20.00"))
        .stdout(predicate::str::contains("Tags Summary:").not());
}

#[test]
fn journal_persists_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    finlog(&journal)
        .write_stdin("income 250 Refund /d 2026-08-05\nexit\n")
        .assert()
        .success();

    finlog(&journal)
        .write_stdin("list\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Income] $250.00 - Refund"));
}

#[test]
fn budget_section_reflects_set_budget() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    finlog(&journal)
        .write_stdin(
            "setbudget 8 2026 100\n\
             expense 130 Repairs /c others /d 2026-08-10\n\
             summary 8 2026\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for August 2026: $100.00"))
        .stdout(predicate::str::contains("Budget exceeded by: $30.00"));
}

#[test]
fn invalid_delete_range_reports_error_and_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    finlog(&journal)
        .write_stdin(
            "income 10 Tip /d 2026-08-01\n\
             delete 4\n\
             list\n\
             exit\n",
        )
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Invalid index range. There are only 1 transactions.",
        ))
        .stdout(predicate::str::contains("[Income] $10.00 - Tip"));
}

#[test]
fn unknown_command_suggests_alternative() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    finlog(&journal)
        .write_stdin("sumary 8 2026\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Did you mean `summary`?"));
}
