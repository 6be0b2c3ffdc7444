//! Remote procedures served by the embedded backend.

/// Creates the employee table when it is absent.
pub const INITIALIZE_DATABASE: &str = "initialize_database";

const INITIALIZE_DATABASE_SQL: &str = "
CREATE TABLE IF NOT EXISTS employees (
    id           TEXT PRIMARY KEY NOT NULL,
    full_name    TEXT NOT NULL CHECK (length(trim(full_name)) > 0),
    email        TEXT NOT NULL CHECK (email LIKE '%_@_%._%'),
    company_name TEXT NOT NULL CHECK (length(trim(company_name)) > 0),
    department   TEXT NOT NULL CHECK (length(trim(department)) > 0),
    position     TEXT NOT NULL CHECK (length(trim(position)) > 0),
    created_at   INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_employees_created_at ON employees(created_at DESC);
";

/// Returns the SQL body of a known procedure.
pub(super) fn procedure_sql(name: &str) -> Option<&'static str> {
    match name {
        INITIALIZE_DATABASE => Some(INITIALIZE_DATABASE_SQL),
        _ => None,
    }
}
