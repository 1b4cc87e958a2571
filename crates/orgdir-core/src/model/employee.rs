//! Employee entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::component::{ComponentKind, OrgComponent};
use super::EmployeeId;
use crate::error::{Error, Result};

/// Position assigned to employees that have none.
pub const DEFAULT_POSITION: &str = "Other";

/// Inclusive upper bound of the performance score range.
pub const MAX_PERFORMANCE: f64 = 100.0;

/// A single employee, always owned by exactly one department.
///
/// Fields are private so that every construction and mutation path goes
/// through validation: salary is never negative, performance stays within
/// `[0, 100]`, and the position is never empty (it falls back to
/// [`DEFAULT_POSITION`]). The hire date has no setter; an update replaces
/// the record wholesale with values taken from a prior read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    hire_date: DateTime<Utc>,
    position: String,
    salary: f64,
    performance: f64,
}

impl Employee {
    /// Create an employee with the default position and zeroed pay figures.
    pub fn new(id: EmployeeId, name: impl Into<String>, hire_date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            hire_date,
            position: DEFAULT_POSITION.to_string(),
            salary: 0.0,
            performance: 0.0,
        }
    }

    /// Full constructor used when hydrating stored records.
    ///
    /// An absent or empty position falls back to [`DEFAULT_POSITION`];
    /// salary and performance are validated, not clamped.
    pub fn with_details(
        id: EmployeeId,
        name: impl Into<String>,
        hire_date: DateTime<Utc>,
        position: Option<&str>,
        salary: f64,
        performance: f64,
    ) -> Result<Self> {
        let mut employee = Self::new(id, name, hire_date);
        if let Some(position) = position {
            employee.set_position(position);
        }
        employee.set_salary(salary)?;
        employee.set_performance(performance)?;
        Ok(employee)
    }

    /// Identifier, unique within the owning organization.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Employee name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hire date, handed out by value.
    pub fn hire_date(&self) -> DateTime<Utc> {
        self.hire_date
    }

    /// Current position, [`DEFAULT_POSITION`] when none was assigned.
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Current salary.
    pub fn salary(&self) -> f64 {
        self.salary
    }

    /// Current performance score.
    pub fn performance(&self) -> f64 {
        self.performance
    }

    /// Assign a position. Empty input resets to [`DEFAULT_POSITION`].
    pub fn set_position(&mut self, position: &str) {
        if position.is_empty() {
            self.position = DEFAULT_POSITION.to_string();
        } else {
            self.position = position.to_string();
        }
    }

    /// Assign a salary. Negative or non-finite values are rejected.
    pub fn set_salary(&mut self, salary: f64) -> Result<()> {
        if !salary.is_finite() || salary < 0.0 {
            return Err(Error::Validation(format!(
                "salary must be non-negative, got {salary}"
            )));
        }
        self.salary = salary;
        Ok(())
    }

    /// Assign a performance score. Values outside `[0, 100]` are rejected.
    pub fn set_performance(&mut self, performance: f64) -> Result<()> {
        if !performance.is_finite() || !(0.0..=MAX_PERFORMANCE).contains(&performance) {
            return Err(Error::Validation(format!(
                "performance must be within [0, {MAX_PERFORMANCE}], got {performance}"
            )));
        }
        self.performance = performance;
        Ok(())
    }
}

impl OrgComponent for Employee {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Employee
    }

    fn children(&self) -> Vec<&dyn OrgComponent> {
        Vec::new()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Employee: {} (ID: {}) Hired at: {}",
            self.name, self.id, self.hire_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hire_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let employee = Employee::new(7, "Alice", hire_date());
        assert_eq!(employee.id(), 7);
        assert_eq!(employee.name(), "Alice");
        assert_eq!(employee.hire_date(), hire_date());
        assert_eq!(employee.position(), DEFAULT_POSITION);
        assert_eq!(employee.salary(), 0.0);
        assert_eq!(employee.performance(), 0.0);
    }

    #[test]
    fn test_with_details_validates() {
        let employee =
            Employee::with_details(1, "Bob", hire_date(), Some("Engineer"), 85000.0, 72.5)
                .unwrap();
        assert_eq!(employee.position(), "Engineer");
        assert_eq!(employee.salary(), 85000.0);
        assert_eq!(employee.performance(), 72.5);

        assert!(Employee::with_details(1, "Bob", hire_date(), None, -1.0, 0.0).is_err());
        assert!(Employee::with_details(1, "Bob", hire_date(), None, 0.0, 100.5).is_err());
    }

    #[test]
    fn test_empty_position_falls_back() {
        let employee = Employee::with_details(2, "Cara", hire_date(), Some(""), 0.0, 0.0).unwrap();
        assert_eq!(employee.position(), DEFAULT_POSITION);

        let mut employee = Employee::new(2, "Cara", hire_date());
        employee.set_position("Manager");
        assert_eq!(employee.position(), "Manager");
        employee.set_position("");
        assert_eq!(employee.position(), DEFAULT_POSITION);
    }

    #[test]
    fn test_salary_and_performance_bounds() {
        let mut employee = Employee::new(3, "Dan", hire_date());
        employee.set_salary(50000.0).unwrap();
        assert_eq!(employee.salary(), 50000.0);
        assert!(employee.set_salary(-0.01).is_err());
        assert!(employee.set_salary(f64::NAN).is_err());
        assert_eq!(employee.salary(), 50000.0);

        employee.set_performance(100.0).unwrap();
        assert!(employee.set_performance(100.1).is_err());
        assert!(employee.set_performance(-5.0).is_err());
        assert_eq!(employee.performance(), 100.0);
    }

    #[test]
    fn test_display_format() {
        let employee = Employee::new(9, "Eve", hire_date());
        assert_eq!(
            employee.to_string(),
            format!("Employee: Eve (ID: 9) Hired at: {}", hire_date())
        );
    }

    #[test]
    fn test_component_view() {
        let employee = Employee::new(4, "Fay", hire_date());
        let component: &dyn OrgComponent = &employee;
        assert_eq!(component.id(), 4);
        assert_eq!(component.name(), "Fay");
        assert_eq!(component.kind(), ComponentKind::Employee);
        assert!(component.children().is_empty());
    }

    #[test]
    fn test_equality_is_by_value() {
        let a = Employee::with_details(5, "Gil", hire_date(), Some("Analyst"), 1000.0, 50.0)
            .unwrap();
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.set_salary(1500.0).unwrap();
        assert_ne!(a, c);
    }
}
