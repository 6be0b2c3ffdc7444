//! Employee domain model and input validation.
//!
//! # Responsibility
//! - Define the persisted employee record and the five-field input shape.
//! - Provide the validation rules used by forms and the repository write path.
//!
//! # Invariants
//! - `id` is server-assigned and immutable.
//! - `company_name` is free text. The system is deliberately tenant-less:
//!   no account or tenant entity is referenced from an employee.
//! - Email validation here is a fast-path check; the backend stays
//!   authoritative for what it accepts.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Opaque, server-assigned employee identifier.
pub type EmployeeId = Uuid;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email regex")
});

/// Persisted employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub department: String,
    pub position: String,
    /// Stamped by the client at insert time; millisecond precision.
    pub created_at: DateTime<Utc>,
}

/// The five text fields required to register an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub department: String,
    pub position: String,
}

/// Input fields of [`NewEmployee`], in form display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    CompanyName,
    FullName,
    Email,
    Department,
    Position,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 5] = [
        Self::CompanyName,
        Self::FullName,
        Self::Email,
        Self::Department,
        Self::Position,
    ];

    /// Stable snake_case key, matching the storage column name.
    pub fn key(self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Department => "department",
            Self::Position => "position",
        }
    }

    /// Human-readable form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::Department => "Department",
            Self::Position => "Position",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl Display for EmployeeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-level validation failure for employee input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmployeeValidationError {
    #[error("{}", required_message(.0))]
    Required(EmployeeField),
    #[error("Invalid email address")]
    InvalidEmail,
}

impl EmployeeValidationError {
    /// Field this error belongs to.
    pub fn field(&self) -> EmployeeField {
        match self {
            Self::Required(field) => *field,
            Self::InvalidEmail => EmployeeField::Email,
        }
    }
}

fn required_message(field: &EmployeeField) -> &'static str {
    match field {
        EmployeeField::CompanyName => "Company name is required",
        EmployeeField::FullName => "Full name is required",
        EmployeeField::Email => "Email is required",
        EmployeeField::Department => "Department is required",
        EmployeeField::Position => "Position is required",
    }
}

/// Returns whether `value` has the accepted email shape (case-insensitive).
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

impl NewEmployee {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        company_name: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            company_name: company_name.into(),
            department: department.into(),
            position: position.into(),
        }
    }

    pub fn field(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::CompanyName => &self.company_name,
            EmployeeField::FullName => &self.full_name,
            EmployeeField::Email => &self.email,
            EmployeeField::Department => &self.department,
            EmployeeField::Position => &self.position,
        }
    }

    pub fn set_field(&mut self, field: EmployeeField, value: impl Into<String>) {
        let slot = match field {
            EmployeeField::CompanyName => &mut self.company_name,
            EmployeeField::FullName => &mut self.full_name,
            EmployeeField::Email => &mut self.email,
            EmployeeField::Department => &mut self.department,
            EmployeeField::Position => &mut self.position,
        };
        *slot = value.into();
    }

    /// Collects every field-level error, in form display order.
    ///
    /// Whitespace-only values count as missing.
    pub fn validation_errors(&self) -> Vec<EmployeeValidationError> {
        let mut errors = Vec::new();
        for field in EmployeeField::ALL {
            let value = self.field(field).trim();
            if value.is_empty() {
                errors.push(EmployeeValidationError::Required(field));
            } else if field == EmployeeField::Email && !is_valid_email(value) {
                errors.push(EmployeeValidationError::InvalidEmail);
            }
        }
        errors
    }

    /// Validates input and returns the first error, if any.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            department: self.department.trim().to_string(),
            position: self.position.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, EmployeeField, EmployeeValidationError, NewEmployee};

    fn ada() -> NewEmployee {
        NewEmployee::new(
            "Ada Lovelace",
            "ada@example.com",
            "Analytical Engines Ltd",
            "Engineering",
            "Lead",
        )
    }

    #[test]
    fn valid_input_passes() {
        assert!(ada().validate().is_ok());
        assert!(ada().validation_errors().is_empty());
    }

    #[test]
    fn email_pattern_is_case_insensitive() {
        assert!(is_valid_email("ADA@EXAMPLE.COM"));
        assert!(is_valid_email("first.last+hr@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@example.c"));
    }

    #[test]
    fn empty_form_reports_every_field_in_display_order() {
        let errors = NewEmployee::default().validation_errors();
        let fields = errors.iter().map(|err| err.field()).collect::<Vec<_>>();
        assert_eq!(fields, EmployeeField::ALL.to_vec());
        assert_eq!(errors[0].to_string(), "Company name is required");
        assert_eq!(errors[2].to_string(), "Email is required");
    }

    #[test]
    fn invalid_email_is_reported_once() {
        let mut input = ada();
        input.email = "not-an-email".to_string();
        assert_eq!(
            input.validation_errors(),
            vec![EmployeeValidationError::InvalidEmail]
        );
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "Invalid email address"
        );
    }

    #[test]
    fn whitespace_only_value_counts_as_missing() {
        let mut input = ada();
        input.department = "   ".to_string();
        assert_eq!(
            input.validate(),
            Err(EmployeeValidationError::Required(EmployeeField::Department))
        );
    }

    #[test]
    fn field_keys_roundtrip() {
        for field in EmployeeField::ALL {
            assert_eq!(EmployeeField::from_key(field.key()), Some(field));
        }
        assert_eq!(EmployeeField::from_key(" Email "), Some(EmployeeField::Email));
        assert_eq!(EmployeeField::from_key("salary"), None);
    }
}
