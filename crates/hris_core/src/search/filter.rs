//! In-memory substring filter over employee rows.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment.
//! - A row matches when ANY of full name, email, department, company or
//!   position contains the term.
//! - An empty term matches every row.
//! - Input order is preserved.

use crate::model::employee::Employee;

/// Pre-normalized search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    needle: String,
}

impl EmployeeFilter {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        [
            employee.full_name.as_str(),
            employee.email.as_str(),
            employee.department.as_str(),
            employee.company_name.as_str(),
            employee.position.as_str(),
        ]
        .into_iter()
        .any(|value| value.to_lowercase().contains(&self.needle))
    }

    /// Returns matching rows in their original order.
    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees
            .iter()
            .filter(|employee| self.matches(employee))
            .collect()
    }
}

/// Filters `employees` by `term`; see [`EmployeeFilter`].
pub fn filter_employees<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    EmployeeFilter::new(term).apply(employees)
}

#[cfg(test)]
mod tests {
    use super::EmployeeFilter;
    use crate::model::employee::Employee;
    use chrono::Utc;
    use uuid::Uuid;

    fn employee(full_name: &str, email: &str, position: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            company_name: "Acme".to_string(),
            department: "Ops".to_string(),
            position: position.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_term_matches_everything() {
        let filter = EmployeeFilter::new("");
        assert!(filter.is_empty());
        assert!(filter.matches(&employee("Ada", "ada@example.com", "Lead")));
    }

    #[test]
    fn term_is_matched_against_email_and_position() {
        let row = employee("Grace Hopper", "grace@navy.example", "Rear Admiral");
        assert!(EmployeeFilter::new("NAVY").matches(&row));
        assert!(EmployeeFilter::new("admiral").matches(&row));
        assert!(!EmployeeFilter::new("lovelace").matches(&row));
    }

    #[test]
    fn whitespace_is_part_of_the_term() {
        let row = employee("Grace Hopper", "grace@navy.example", "Admiral");
        assert!(EmployeeFilter::new("e h").matches(&row));
        assert!(!EmployeeFilter::new(" grace  ").matches(&row));
    }
}
