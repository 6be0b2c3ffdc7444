#![allow(dead_code)]

use hris_core::backend::{Backend, BackendError, BackendResult, EmployeeInsert, LocalBackend};
use hris_core::model::employee::{Employee, EmployeeId, NewEmployee};
use hris_core::model::user::{Session, User};
use hris_core::repo::bootstrap::ensure_schema;
use std::cell::Cell;

/// How the stub answers the employee table read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRead {
    Delegate,
    Unavailable,
}

/// Backend wrapper that counts calls and injects failures.
pub struct StubBackend {
    inner: LocalBackend,
    pub table_reads: Cell<usize>,
    pub inserts: Cell<usize>,
    pub selects: Cell<usize>,
    pub rpcs: Cell<usize>,
    pub table_read: Cell<TableRead>,
    /// Number of upcoming `select_employees` calls that fail.
    pub failing_selects: Cell<usize>,
    pub failing_inserts: Cell<usize>,
    pub failing_rpcs: Cell<usize>,
    pub null_payload: Cell<bool>,
}

impl StubBackend {
    /// Fresh in-memory backend without the employee table.
    pub fn empty() -> Self {
        Self {
            inner: LocalBackend::open_in_memory().unwrap(),
            table_reads: Cell::new(0),
            inserts: Cell::new(0),
            selects: Cell::new(0),
            rpcs: Cell::new(0),
            table_read: Cell::new(TableRead::Delegate),
            failing_selects: Cell::new(0),
            failing_inserts: Cell::new(0),
            failing_rpcs: Cell::new(0),
            null_payload: Cell::new(false),
        }
    }

    /// In-memory backend with the employee table already created.
    pub fn ready() -> Self {
        let stub = Self::empty();
        ensure_schema(&stub.inner).unwrap();
        stub
    }

    pub fn inner(&self) -> &LocalBackend {
        &self.inner
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

fn take_failure(counter: &Cell<usize>) -> bool {
    let remaining = counter.get();
    if remaining == 0 {
        return false;
    }
    counter.set(remaining - 1);
    true
}

impl Backend for StubBackend {
    fn select_employee_ids(&self, limit: u32) -> BackendResult<Vec<EmployeeId>> {
        bump(&self.table_reads);
        match self.table_read.get() {
            TableRead::Delegate => self.inner.select_employee_ids(limit),
            TableRead::Unavailable => Err(BackendError::Unavailable("connection refused".to_string())),
        }
    }

    fn insert_employee(&self, row: &EmployeeInsert) -> BackendResult<Employee> {
        bump(&self.inserts);
        if take_failure(&self.failing_inserts) {
            return Err(BackendError::Unavailable("connection reset".to_string()));
        }
        self.inner.insert_employee(row)
    }

    fn select_employees(&self) -> BackendResult<Option<Vec<Employee>>> {
        bump(&self.selects);
        if take_failure(&self.failing_selects) {
            return Err(BackendError::Unavailable("connection reset".to_string()));
        }
        if self.null_payload.get() {
            return Ok(None);
        }
        self.inner.select_employees()
    }

    fn rpc(&self, procedure: &str) -> BackendResult<()> {
        bump(&self.rpcs);
        if take_failure(&self.failing_rpcs) {
            return Err(BackendError::Unavailable("procedure timed out".to_string()));
        }
        self.inner.rpc(procedure)
    }

    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.inner.sign_up(email, password)
    }

    fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.inner.sign_in(email, password)
    }

    fn sign_out(&self, session: &Session) -> BackendResult<()> {
        self.inner.sign_out(session)
    }

    fn session_user(&self, session: &Session) -> BackendResult<Option<User>> {
        self.inner.session_user(session)
    }
}

pub fn ada() -> NewEmployee {
    NewEmployee::new(
        "Ada Lovelace",
        "ada@example.com",
        "Analytical Engines Ltd",
        "Engineering",
        "Lead",
    )
}

pub fn bob() -> NewEmployee {
    NewEmployee::new("Bob Smith", "bob@example.com", "Acme", "Sales", "Rep")
}
