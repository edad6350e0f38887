use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nomad(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nomad").unwrap();
    cmd.env("NOMAD_FINANCE_DATA_DIR", dir.path())
        .env_remove("NOMAD_HOST_USER")
        .env_remove("NOMAD_HOST_FIRST_NAME")
        .env_remove("NOMAD_HOST_VERSION")
        .env_remove("NOMAD_REMOTE_URL")
        .env_remove("NOMAD_REMOTE_KEY")
        .env_remove("NOMAD_ALLOWED_USER")
        .env_remove("NOMAD_ACCOUNT_SECRET")
        .env_remove("NOMAD_LOCAL_FALLBACK")
        .env_remove("RUST_LOG");
    cmd
}

fn empty_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"demo_data": false}"#).unwrap();
    dir
}

#[test]
fn test_expense_add_then_list() {
    let dir = empty_workspace();

    nomad(&dir)
        .args(["expense", "add", "450", "--category", "coffee", "--date", "2025-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("450.00 ETB"));

    nomad(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-02"))
        .stdout(predicate::str::contains("Coffee"));

    assert!(dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn test_unknown_category_fails() {
    let dir = empty_workspace();
    nomad(&dir)
        .args(["expense", "add", "10", "--category", "yachts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn test_spending_report() {
    let dir = empty_workspace();
    for (amount, category) in [("900", "food"), ("300", "rent"), ("600", "food")] {
        nomad(&dir)
            .args(["expense", "add", amount, "--category", category, "--date", "2025-03-02"])
            .assert()
            .success();
    }

    nomad(&dir)
        .args(["report", "spending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1800.00 ETB"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn test_income_report_counts_loans_against_assets() {
    let dir = empty_workspace();
    nomad(&dir)
        .args(["asset", "add", "Wallet", "500"])
        .assert()
        .success();
    nomad(&dir)
        .args(["asset", "add", "Bank", "200", "--type", "loan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$200.00"));

    nomad(&dir)
        .args(["report", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$300.00"));
}

#[test]
fn test_demo_seed_on_first_run() {
    let dir = TempDir::new().unwrap();
    nomad(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo User"));

    nomad(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WiFi Bill"));
}

#[test]
fn test_denied_host_user_exits_non_zero() {
    let dir = empty_workspace();
    nomad(&dir)
        .env("NOMAD_ALLOWED_USER", "sam")
        .args(["--host-user", "eve", "expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Allowed: @sam, Found: @eve"));

    assert!(!dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn test_allowed_host_user_without_remote_runs_locally() {
    let dir = empty_workspace();
    nomad(&dir)
        .env("NOMAD_ALLOWED_USER", "sam")
        .args(["--host-user", "SAM", "--host-first-name", "Sam", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local only"))
        .stdout(predicate::str::contains("Hello, Sam"));
}

#[test]
fn test_reset_requires_confirmation() {
    let dir = empty_workspace();
    nomad(&dir)
        .args(["income", "add", "1500", "Retainer", "--kind", "stable"])
        .assert()
        .success();

    nomad(&dir)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    nomad(&dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Retainer"));

    nomad(&dir).args(["reset", "--yes"]).assert().success();
    nomad(&dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No incomes found."));
}

#[test]
fn test_settings_set_rate() {
    let dir = empty_workspace();
    nomad(&dir)
        .args(["settings", "set", "--rate", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 USD = 150 ETB"));

    nomad(&dir)
        .args(["settings", "set", "--rate=-3"])
        .assert()
        .failure();
}
