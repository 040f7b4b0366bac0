use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger_core_cli").unwrap();
    cmd.env("LEDGER_CORE_CLI_SCRIPT", "1")
        .env("LEDGER_CORE_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_runs_add_list_chart_flow() {
    let home = TempDir::new().unwrap();
    let input = "\
add date=2024-03-01 category=food description=groceries amount=100 payment=cash
add date=2024-03-02 category=rent \"description=march rent\" amount=300 payment=transfer
add date=2024-04-02 category=travel description=train amount=50 payment=card
list
chart 2024-03 --json
exit
";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added entry"))
        .stdout(contains("march rent"))
        .stdout(contains("3 of 3 entries"))
        .stdout(contains("\"name\": \"food\""))
        .stdout(contains("\"value\": 0.25"))
        .stdout(contains("travel").count(1));
}

#[test]
fn script_mode_reports_validation_errors() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("add date=2024-13-01 category=food description=x amount=ten payment=cash\nlist\n")
        .assert()
        .success()
        .stdout(contains("Entry not saved"))
        .stdout(contains("Date: Use YYYY-MM-DD format"))
        .stdout(contains("Amount: Enter a numeric value"))
        .stdout(contains("No entries recorded yet"));
}

#[test]
fn script_mode_views_and_empty_chart() {
    let home = TempDir::new().unwrap();
    let input = "\
add date=2024-01-05 category=food description=bread amount=4 payment=cash
add date=2024-01-20 category=rent description=flat amount=900 payment=transfer
filter 2024-01-10 -
list
chart 2023-12
";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("1 of 2 entries"))
        .stdout(contains("flat"))
        .stdout(contains("bread").not())
        .stdout(contains("No data for 2023-12"));
}

#[test]
fn script_mode_persists_config() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("config set currency eur\n")
        .assert()
        .success()
        .stdout(contains("Updated `currency`"));

    let saved = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(saved.contains("\"EUR\""));

    script_command(&home)
        .write_stdin("config show\n")
        .assert()
        .success()
        .stdout(contains("EUR"));
}

#[test]
fn unknown_command_gets_suggestion() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("lst\n")
        .assert()
        .success()
        .stdout(contains("Suggestion: `list`?"));
}

#[test]
fn version_flag_prints_build_summary() {
    Command::cargo_bin("ledger_core_cli")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("ledger_core"));
}

#[test]
fn unexpected_argument_exits_with_usage() {
    Command::cargo_bin("ledger_core_cli")
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(contains("usage: ledger_core_cli"));
}

#[test]
fn help_lists_commands_by_group() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("help\nadd date=2024-03-01 category=food description=tea amount=3 payment=cash\nls\n")
        .assert()
        .success()
        .stdout(contains("Entries:"))
        .stdout(contains("Reports:"))
        .stdout(contains("chart [YYYY-MM] [--json]"))
        .stdout(contains("1 of 1 entries"));
}
