//! Embedded SQLite-hosted backend.
//!
//! # Responsibility
//! - Serve employee table reads/writes, remote procedures and the auth
//!   service from a single SQLite connection.
//! - Translate SQLite failures into backend error classes.
//!
//! # Invariants
//! - Employee ids are generated here, never by callers.
//! - Reads of a missing `employees` table fail with
//!   `BackendError::RelationNotFound`.
//! - Passwords are stored only as Argon2 PHC strings.
//! - Tokens, emails and passwords never appear in log lines.

use super::password::{hash_password, verify_password};
use super::procedures::procedure_sql;
use super::{Backend, BackendError, BackendResult, EmployeeInsert, EMPLOYEES_TABLE};
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::user::{Session, User};
use chrono::{DateTime, Duration, Utc};
use log::info;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    email,
    company_name,
    department,
    position,
    created_at
FROM employees";

/// SQLite-hosted implementation of [`Backend`].
pub struct LocalBackend {
    conn: Connection,
    session_ttl: Duration,
}

impl LocalBackend {
    pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

    /// Opens (or creates) a backend database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory backend.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            session_ttl: Duration::seconds(Self::DEFAULT_SESSION_TTL_SECS as i64),
        }
    }

    /// Overrides how long issued sessions stay valid.
    pub fn with_session_ttl(mut self, ttl: std::time::Duration) -> Self {
        self.session_ttl = Duration::from_std(ttl).unwrap_or(Duration::MAX);
        self
    }

    /// Inserts a fresh session row on `conn`, which may be an open transaction.
    fn issue_session(&self, conn: &Connection, user: User) -> BackendResult<Session> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());

        conn.execute(
            "INSERT INTO auth_sessions (token, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                token,
                user.id.to_string(),
                now.timestamp_millis(),
                expires_at.timestamp_millis(),
            ],
        )?;

        Ok(Session {
            user,
            access_token: token,
            expires_at,
        })
    }
}

impl Backend for LocalBackend {
    fn select_employee_ids(&self, limit: u32) -> BackendResult<Vec<EmployeeId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM employees LIMIT ?1;")
            .map_err(|err| map_table_error(err, EMPLOYEES_TABLE))?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut ids = Vec::new();

        while let Some(row) = rows.next()? {
            let id_text: String = row.get(0)?;
            ids.push(parse_uuid(&id_text, "employees.id")?);
        }

        Ok(ids)
    }

    fn insert_employee(&self, row: &EmployeeInsert) -> BackendResult<Employee> {
        let id = Uuid::new_v4();
        let fields = &row.fields;

        self.conn
            .execute(
                "INSERT INTO employees (
                    id,
                    full_name,
                    email,
                    company_name,
                    department,
                    position,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    id.to_string(),
                    fields.full_name.as_str(),
                    fields.email.as_str(),
                    fields.company_name.as_str(),
                    fields.department.as_str(),
                    fields.position.as_str(),
                    row.created_at.timestamp_millis(),
                ],
            )
            .map_err(|err| map_table_error(err, EMPLOYEES_TABLE))?;

        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        stmt.query_row([id.to_string()], |row| Ok(parse_employee_row(row)))?
    }

    fn select_employees(&self) -> BackendResult<Option<Vec<Employee>>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{EMPLOYEE_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
            ))
            .map_err(|err| map_table_error(err, EMPLOYEES_TABLE))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(Some(employees))
    }

    fn rpc(&self, procedure: &str) -> BackendResult<()> {
        let sql = procedure_sql(procedure)
            .ok_or_else(|| BackendError::ProcedureNotFound(procedure.to_string()))?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.commit()?;
        info!("event=rpc module=backend status=ok procedure={procedure}");
        Ok(())
    }

    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(BackendError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }

        let password_hash =
            hash_password(password).map_err(|err| BackendError::PasswordHash(err.to_string()))?;
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };

        // Account and first session commit together or not at all.
        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO auth_users (id, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                user.id.to_string(),
                user.email.as_str(),
                password_hash,
                Utc::now().timestamp_millis(),
            ],
        );
        if let Err(err) = inserted {
            let duplicate =
                constraint_message(&err).is_some_and(|message| message.contains("auth_users.email"));
            return Err(if duplicate {
                BackendError::UserAlreadyExists
            } else {
                err.into()
            });
        }

        let session = self.issue_session(&tx, user)?;
        tx.commit()?;
        info!(
            "event=auth_sign_up module=backend status=ok user_id={}",
            session.user.id
        );
        Ok(session)
    }

    fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        let found = self
            .conn
            .query_row(
                "SELECT id, email, password_hash FROM auth_users WHERE email = ?1;",
                [email.trim()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((id_text, stored_email, password_hash)) = found else {
            info!("event=auth_sign_in module=backend status=error error_code=invalid_credentials");
            return Err(BackendError::InvalidCredentials);
        };
        if !verify_password(password, &password_hash) {
            info!("event=auth_sign_in module=backend status=error error_code=invalid_credentials");
            return Err(BackendError::InvalidCredentials);
        }

        let user = User {
            id: parse_uuid(&id_text, "auth_users.id")?,
            email: stored_email,
        };
        info!(
            "event=auth_sign_in module=backend status=ok user_id={}",
            user.id
        );
        self.issue_session(&self.conn, user)
    }

    fn sign_out(&self, session: &Session) -> BackendResult<()> {
        let changed = self.conn.execute(
            "UPDATE auth_sessions SET revoked = 1 WHERE token = ?1 AND revoked = 0;",
            [session.access_token.as_str()],
        )?;
        info!(
            "event=auth_sign_out module=backend status=ok user_id={} revoked={changed}",
            session.user.id
        );
        Ok(())
    }

    fn session_user(&self, session: &Session) -> BackendResult<Option<User>> {
        let found = self
            .conn
            .query_row(
                "SELECT u.id, u.email
                 FROM auth_sessions s
                 JOIN auth_users u ON u.id = s.user_id
                 WHERE s.token = ?1
                   AND s.revoked = 0
                   AND s.expires_at > ?2;",
                params![session.access_token.as_str(), Utc::now().timestamp_millis()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match found {
            Some((id_text, email)) => Ok(Some(User {
                id: parse_uuid(&id_text, "auth_users.id")?,
                email,
            })),
            None => Ok(None),
        }
    }
}

fn parse_employee_row(row: &Row<'_>) -> BackendResult<Employee> {
    let id_text: String = row.get("id")?;
    let created_ms: i64 = row.get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_ms).ok_or_else(|| {
        BackendError::InvalidData(format!(
            "invalid created_at value `{created_ms}` in employees.created_at"
        ))
    })?;

    Ok(Employee {
        id: parse_uuid(&id_text, "employees.id")?,
        full_name: row.get("full_name")?,
        email: row.get("email")?,
        company_name: row.get("company_name")?,
        department: row.get("department")?,
        position: row.get("position")?,
        created_at,
    })
}

fn parse_uuid(value: &str, column: &str) -> BackendResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| BackendError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn map_table_error(err: rusqlite::Error, table: &str) -> BackendError {
    if let rusqlite::Error::SqliteFailure(_, Some(message)) = &err {
        if message.starts_with("no such table") {
            return BackendError::RelationNotFound(table.to_string());
        }
    }
    if let Some(message) = constraint_message(&err) {
        return BackendError::Constraint(message.to_string());
    }
    err.into()
}

fn constraint_message(err: &rusqlite::Error) -> Option<&str> {
    match err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(message.as_deref().unwrap_or("constraint failed"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::LocalBackend;
    use crate::backend::{Backend, BackendError, EmployeeInsert, INITIALIZE_DATABASE};
    use crate::model::employee::NewEmployee;
    use chrono::Utc;

    fn backend_with_table() -> LocalBackend {
        let backend = LocalBackend::open_in_memory().unwrap();
        backend.rpc(INITIALIZE_DATABASE).unwrap();
        backend
    }

    fn insert(fields: NewEmployee) -> EmployeeInsert {
        EmployeeInsert {
            fields,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reads_before_initialization_report_relation_not_found() {
        let backend = LocalBackend::open_in_memory().unwrap();
        let err = backend.select_employee_ids(1).unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
        assert!(backend.select_employees().unwrap_err().is_not_found());
    }

    #[test]
    fn initialize_database_is_idempotent() {
        let backend = backend_with_table();
        backend.rpc(INITIALIZE_DATABASE).unwrap();
        assert!(backend.select_employee_ids(1).unwrap().is_empty());
    }

    #[test]
    fn failed_initialization_leaves_no_partial_schema() {
        let backend = LocalBackend::open_in_memory().unwrap();
        backend
            .conn
            .execute_batch("CREATE TABLE idx_employees_created_at (x INTEGER);")
            .unwrap();

        assert!(backend.rpc(INITIALIZE_DATABASE).is_err());
        assert!(backend.select_employee_ids(1).unwrap_err().is_not_found());
    }

    #[test]
    fn failed_session_issue_rolls_back_the_account() {
        let backend = LocalBackend::open_in_memory().unwrap();
        backend
            .conn
            .execute_batch("DROP TABLE auth_sessions;")
            .unwrap();

        assert!(backend.sign_up("hr@acme.test", "secret").is_err());
        let users: i64 = backend
            .conn
            .query_row("SELECT COUNT(*) FROM auth_users;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(users, 0);
    }

    #[test]
    fn unknown_procedure_is_reported() {
        let backend = LocalBackend::open_in_memory().unwrap();
        let err = backend.rpc("drop_everything").unwrap_err();
        assert!(matches!(err, BackendError::ProcedureNotFound(name) if name == "drop_everything"));
    }

    #[test]
    fn server_side_constraints_reject_blank_fields() {
        let backend = backend_with_table();
        let err = backend
            .insert_employee(&insert(NewEmployee::new(
                " ",
                "ada@example.com",
                "Acme",
                "Engineering",
                "Lead",
            )))
            .unwrap_err();
        assert!(matches!(err, BackendError::Constraint(_)), "unexpected error: {err}");
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let backend = backend_with_table();
        let fields = NewEmployee::new("Ada", "ada@example.com", "Acme", "Eng", "Lead");
        let first = backend.insert_employee(&insert(fields.clone())).unwrap();
        let second = backend.insert_employee(&insert(fields)).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn duplicate_sign_up_is_rejected_case_insensitively() {
        let backend = LocalBackend::open_in_memory().unwrap();
        backend.sign_up("hr@acme.test", "secret").unwrap();
        let err = backend.sign_up("HR@acme.test", "other").unwrap_err();
        assert!(matches!(err, BackendError::UserAlreadyExists));
    }

    #[test]
    fn sign_up_requires_email_and_password() {
        let backend = LocalBackend::open_in_memory().unwrap();
        assert!(matches!(
            backend.sign_up("  ", "secret").unwrap_err(),
            BackendError::InvalidInput(_)
        ));
        assert!(matches!(
            backend.sign_up("hr@acme.test", "").unwrap_err(),
            BackendError::InvalidInput(_)
        ));
    }

    #[test]
    fn zero_ttl_sessions_are_immediately_invalid() {
        let backend = LocalBackend::open_in_memory()
            .unwrap()
            .with_session_ttl(std::time::Duration::ZERO);
        let session = backend.sign_up("hr@acme.test", "secret").unwrap();
        assert_eq!(backend.session_user(&session).unwrap(), None);
    }
}
