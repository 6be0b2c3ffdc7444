//! Plain-text rendering of the mounted page.

use hris_core::app::Page;
use hris_core::model::employee::{Employee, EmployeeField};
use hris_core::view::credentials::{CredentialField, Credentials};
use hris_core::view::shell::{Layout, NavAction, NAV_ITEMS};
use hris_core::view::{EmployeeFormView, EmployeeListView, ListState};
use hris_core::{App, Backend};
use std::fmt::Write;

/// Renders chrome (when signed in) and the current page.
pub fn page<B: Backend>(app: &App<B>) -> String {
    let mut out = String::new();

    if app.layout() == Layout::Navigation {
        let links = NAV_ITEMS
            .iter()
            .map(|item| match item.action {
                NavAction::Open(route) => format!("{} ({})", item.label, route),
                NavAction::SignOut => format!("{} (signout)", item.label),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "HRIS | {links}");
        if let Some(user) = app.auth().user() {
            let _ = writeln!(out, "signed in as {}", user.email);
        }
    }

    let route = app.route();
    let _ = writeln!(out, "== {} [{}] ==", route.title(), route);

    match app.page() {
        Page::Login(form) => {
            credentials(&mut out, form.input(), |field| form.field_error(field));
            if let Some(error) = form.error() {
                let _ = writeln!(out, "error: {error}");
            }
            out.push_str("No account yet? open /register");
        }
        Page::Register(form) => {
            credentials(&mut out, form.input(), |field| form.field_error(field));
            out.push_str("Already have an account? open /login");
        }
        Page::Employees(list) => employee_list(&mut out, list),
        Page::RegisterEmployee(form) => employee_form(&mut out, form),
    }

    out.trim_end().to_string()
}

fn credentials<'a>(
    out: &mut String,
    input: &Credentials,
    field_error: impl Fn(CredentialField) -> Option<&'a str>,
) {
    for field in CredentialField::ALL {
        let value = match field {
            CredentialField::Password if !input.password.is_empty() => "********",
            _ => input.field(field),
        };
        let _ = writeln!(out, "{:<14} {}", format!("{}:", field.label()), value);
        if let Some(message) = field_error(field) {
            let _ = writeln!(out, "  ! {message}");
        }
    }
}

fn employee_form(out: &mut String, form: &EmployeeFormView) {
    for field in EmployeeField::ALL {
        let _ = writeln!(
            out,
            "{:<15} {}",
            format!("{}:", field.label()),
            form.input().field(field)
        );
        if let Some(err) = form.field_error(field) {
            let _ = writeln!(out, "  ! {err}");
        }
    }
    if let Some(error) = form.submit_error() {
        let _ = writeln!(out, "error: {error}");
    }
}

fn employee_list(out: &mut String, list: &EmployeeListView) {
    match list.state() {
        ListState::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        ListState::Failed(message) => {
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "Type `retry` to try again.");
        }
        ListState::Loaded(_) => {
            if !list.search_term().is_empty() {
                let _ = writeln!(out, "search: {}", list.search_term());
            }
            match list.empty_message() {
                Some(message) => {
                    let _ = writeln!(out, "{message}");
                }
                None => {
                    let _ = writeln!(out, "Name | Email | Company | Department | Position");
                    for employee in list.visible_rows() {
                        let _ = writeln!(out, "{}", employee_row(employee));
                    }
                }
            }
        }
    }
}

fn employee_row(employee: &Employee) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        employee.full_name,
        employee.email,
        employee.company_name,
        employee.department,
        employee.position
    )
}
