mod common;

use common::StubBackend;
use hris_core::app::{App, AppError, Page};
use hris_core::backend::Backend;
use hris_core::repo::bootstrap::SchemaStatus;
use hris_core::view::employee_list::ListState;
use hris_core::view::shell::{Layout, Route};
use hris_core::LocalBackend;
use std::time::Duration;

fn started_app() -> App<StubBackend> {
    let mut app = App::new(StubBackend::empty());
    assert_eq!(app.start().unwrap(), SchemaStatus::Initialized);
    app
}

fn register_account(app: &mut App<StubBackend>) {
    app.open_path("/register").unwrap();
    app.set_field("email", "hr@example.com").unwrap();
    app.set_field("password", "correct horse").unwrap();
    assert_eq!(app.submit().unwrap(), Route::Employees);
}

#[test]
fn anonymous_start_lands_on_login_without_navigation() {
    let mut app = started_app();

    assert_eq!(app.route(), Route::Login);
    assert_eq!(app.layout(), Layout::Bare);
    assert_eq!(app.open_path("/employees").unwrap(), Route::Login);
    assert_eq!(app.open_path("/register-employee").unwrap(), Route::Login);
    assert_eq!(app.backend().selects.get(), 0);
}

#[test]
fn registering_an_account_opens_the_employee_list() {
    let mut app = started_app();
    register_account(&mut app);

    assert_eq!(app.layout(), Layout::Navigation);
    assert_eq!(app.backend().selects.get(), 1);
    match app.page() {
        Page::Employees(list) => assert_eq!(list.state(), &ListState::Loaded(Vec::new())),
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn registering_an_employee_returns_to_the_list() {
    let mut app = started_app();
    register_account(&mut app);

    app.open_path("/register-employee").unwrap();
    for (field, value) in [
        ("company_name", "Acme"),
        ("full_name", "Bob Smith"),
        ("email", "bob@example.com"),
        ("department", "Sales"),
        ("position", "Rep"),
    ] {
        app.set_field(field, value).unwrap();
    }
    assert_eq!(app.submit().unwrap(), Route::Employees);

    match app.page() {
        Page::Employees(list) => assert_eq!(list.visible_rows().len(), 1),
        other => panic!("unexpected page: {other:?}"),
    }
    app.search("SALES").unwrap();
    app.retry().unwrap();
    assert_eq!(app.backend().selects.get(), 3);
}

#[test]
fn sign_out_clears_session_and_guards_employee_routes() {
    let mut app = started_app();
    register_account(&mut app);

    assert_eq!(app.sign_out(), Route::Login);
    assert!(!app.auth().is_authenticated());
    assert_eq!(app.layout(), Layout::Bare);
    assert_eq!(app.open_path("/employees").unwrap(), Route::Login);
}

#[test]
fn failed_sign_up_stays_silent_but_failed_sign_in_is_shown() {
    let mut app = started_app();
    app.backend().sign_up("hr@example.com", "pw").unwrap();

    app.open_path("/register").unwrap();
    app.set_field("email", "hr@example.com").unwrap();
    app.set_field("password", "other").unwrap();
    assert_eq!(app.submit().unwrap(), Route::Register);
    assert!(!app.auth().is_authenticated());

    app.open_path("/login").unwrap();
    app.set_field("email", "hr@example.com").unwrap();
    app.set_field("password", "wrong").unwrap();
    assert_eq!(app.submit().unwrap(), Route::Login);
    match app.page() {
        Page::Login(form) => assert_eq!(form.error(), Some("Invalid login credentials")),
        other => panic!("unexpected page: {other:?}"),
    }

    app.set_field("password", "pw").unwrap();
    assert_eq!(app.submit().unwrap(), Route::Employees);
}

#[test]
fn page_actions_are_checked_against_the_mounted_page() {
    let mut app = started_app();

    assert!(matches!(
        app.search("ada"),
        Err(AppError::Unavailable {
            action: "search",
            route: Route::Login
        })
    ));
    assert!(matches!(
        app.set_field("department", "Sales"),
        Err(AppError::UnknownField { .. })
    ));
    assert!(matches!(
        app.open_path("/payroll"),
        Err(AppError::UnknownRoute(_))
    ));
    assert!(matches!(app.submit(), Err(AppError::Rejected(_))));
}

#[test]
fn expired_session_is_redirected_to_login() {
    let backend = LocalBackend::open_in_memory()
        .unwrap()
        .with_session_ttl(Duration::from_millis(1));
    let mut app = App::new(backend);
    app.start().unwrap();
    app.open_path("/register").unwrap();
    app.set_field("email", "hr@example.com").unwrap();
    app.set_field("password", "pw").unwrap();
    app.submit().unwrap();

    std::thread::sleep(Duration::from_millis(20));

    assert_eq!(app.open_path("/employees").unwrap(), Route::Login);
    assert!(!app.auth().is_authenticated());
}
