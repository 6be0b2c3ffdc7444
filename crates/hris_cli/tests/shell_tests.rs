mod common;

use common::Sandbox;
use predicates::prelude::*;

const SIGN_UP: &str = "open /register
set email hr@example.com
set password 'correct horse'
submit
";

#[test]
fn init_creates_schema_once() {
    let sandbox = Sandbox::new();

    sandbox
        .hris()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema initialized"));

    sandbox
        .hris()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema ready"));
}

#[test]
fn anonymous_shell_starts_on_sign_in() {
    let sandbox = Sandbox::new();

    sandbox
        .hris()
        .write_stdin("open /employees\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Sign In [/login] =="))
        .stdout(predicate::str::contains("Employees (/employees)").not());
}

#[test]
fn register_account_then_employee_and_search() {
    let sandbox = Sandbox::new();
    let script = format!(
        "{SIGN_UP}open /register-employee
set company_name Acme
set full_name \"Bob Smith\"
set email bob@example.com
set department Sales
set position Rep
submit
search SALES
search nobody
quit
"
    );

    sandbox
        .hris()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("signed in as hr@example.com"))
        .stdout(predicate::str::contains("No employees added yet."))
        .stdout(predicate::str::contains("Bob Smith | bob@example.com | Acme | Sales | Rep"))
        .stdout(predicate::str::contains("No employees found matching your search."));
}

#[test]
fn invalid_employee_input_shows_field_errors() {
    let sandbox = Sandbox::new();
    let script = format!(
        "{SIGN_UP}open /register-employee
set email not-an-email
submit
quit
"
    );

    sandbox
        .hris()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Company name is required"))
        .stdout(predicate::str::contains("Invalid email address"))
        .stdout(predicate::str::contains("error: the form has validation errors"));
}

#[test]
fn sign_out_returns_to_login_and_guards_routes() {
    let sandbox = Sandbox::new();
    let script = format!("{SIGN_UP}signout\nopen /register-employee\nquit\n");

    let assert = sandbox.hris().write_stdin(script).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let tail = stdout.rsplit("signed in as").next().unwrap();
    assert!(tail.contains("== Sign In [/login] =="));
    assert!(!tail.contains("Register Employee [/register-employee]"));
}

#[test]
fn bad_input_lines_are_reported_and_the_shell_continues() {
    let sandbox = Sandbox::new();

    sandbox
        .hris()
        .write_stdin("delete everything\nset email 'unterminated\nopen /payroll\nhelp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command `delete`"))
        .stdout(predicate::str::contains("error: unterminated quote"))
        .stdout(predicate::str::contains("error: unknown route `/payroll`"))
        .stdout(predicate::str::contains("search [term]"));
}

#[test]
fn missing_config_file_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .hris()
        .arg("--config")
        .arg(sandbox.path().join("absent.toml"))
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
