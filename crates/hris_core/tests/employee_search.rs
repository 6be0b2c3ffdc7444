mod common;

use common::{ada, bob, StubBackend};
use hris_core::repo::employee_repo::{BackendEmployeeRepository, EmployeeRepository};
use hris_core::search::filter::filter_employees;
use hris_core::view::employee_list::{EmployeeListView, EMPTY_MESSAGE, NO_MATCH_MESSAGE};

fn names(rows: &[&hris_core::Employee]) -> Vec<String> {
    rows.iter().map(|row| row.full_name.clone()).collect()
}

#[test]
fn search_is_case_insensitive_or_across_fields() {
    let backend = StubBackend::ready();
    let repo = BackendEmployeeRepository::new(&backend);
    repo.create_employee(&ada()).unwrap();
    repo.create_employee(&bob()).unwrap();
    let employees = repo.get_employees().unwrap();

    assert_eq!(names(&filter_employees(&employees, "eng")), vec!["Ada Lovelace"]);
    assert_eq!(filter_employees(&employees, "A").len(), 2);
    assert_eq!(names(&filter_employees(&employees, "SALES")), vec!["Bob Smith"]);
    assert_eq!(filter_employees(&employees, "").len(), 2);
    assert!(filter_employees(&employees, "payroll").is_empty());
}

#[test]
fn list_view_filters_without_refetching() {
    let backend = StubBackend::ready();
    let repo = BackendEmployeeRepository::new(&backend);
    repo.create_employee(&ada()).unwrap();
    repo.create_employee(&bob()).unwrap();

    let mut view = EmployeeListView::new();
    view.fetch(&repo);
    assert_eq!(backend.selects.get(), 1);
    assert_eq!(view.visible_rows().len(), 2);

    view.set_search("acme");
    assert_eq!(names(&view.visible_rows()), vec!["Bob Smith"]);

    view.set_search("nobody");
    assert!(view.visible_rows().is_empty());
    assert_eq!(view.empty_message(), Some(NO_MATCH_MESSAGE));

    view.set_search("");
    assert_eq!(view.visible_rows().len(), 2);
    assert_eq!(view.empty_message(), None);
    assert_eq!(backend.selects.get(), 1);
}

#[test]
fn empty_list_has_its_own_message() {
    let backend = StubBackend::ready();
    let mut view = EmployeeListView::new();
    view.fetch(&BackendEmployeeRepository::new(&backend));

    assert_eq!(view.empty_message(), Some(EMPTY_MESSAGE));
}
