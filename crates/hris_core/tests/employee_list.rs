mod common;

use common::{ada, StubBackend};
use hris_core::repo::employee_repo::{BackendEmployeeRepository, EmployeeRepository};
use hris_core::view::employee_list::{EmployeeListView, ListState, FETCH_FAILED_MESSAGE};

#[test]
fn list_starts_loading_and_then_shows_rows() {
    let backend = StubBackend::ready();
    let repo = BackendEmployeeRepository::new(&backend);
    repo.create_employee(&ada()).unwrap();

    let mut view = EmployeeListView::new();
    assert_eq!(view.state(), &ListState::Loading);

    view.fetch(&repo);
    match view.state() {
        ListState::Loaded(rows) => assert_eq!(rows.len(), 1),
        other => panic!("unexpected state: {other:?}"),
    }
}

#[test]
fn failure_shows_generic_message_and_retry_recovers() {
    let backend = StubBackend::ready();
    let repo = BackendEmployeeRepository::new(&backend);
    repo.create_employee(&ada()).unwrap();
    backend.failing_selects.set(1);

    let mut view = EmployeeListView::new();
    view.fetch(&repo);
    assert_eq!(
        view.state(),
        &ListState::Failed(FETCH_FAILED_MESSAGE.to_string())
    );
    assert!(view.visible_rows().is_empty());
    assert_eq!(view.empty_message(), None);

    let retry = view.begin_fetch();
    assert_eq!(view.state(), &ListState::Loading);
    let result = retry.execute(&repo).unwrap();
    assert!(view.finish_fetch(retry, result));
    assert_eq!(view.visible_rows().len(), 1);
    assert_eq!(backend.selects.get(), 2);
}

#[test]
fn superseded_fetch_result_is_ignored() {
    let backend = StubBackend::ready();
    let repo = BackendEmployeeRepository::new(&backend);

    let mut view = EmployeeListView::new();
    let stale = view.begin_fetch();
    let fresh = view.begin_fetch();

    repo.create_employee(&ada()).unwrap();
    let fresh_result = fresh.execute(&repo).unwrap();
    assert!(view.finish_fetch(fresh, fresh_result));

    assert!(!view.finish_fetch(stale, Ok(Vec::new())));
    assert_eq!(view.visible_rows().len(), 1);
}
