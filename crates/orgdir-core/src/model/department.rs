//! Department entity.

use serde::Serialize;
use std::fmt;

use super::component::{ComponentKind, OrgComponent};
use super::employee::Employee;
use super::stats::DeptStats;
use super::{DepartmentId, EmployeeId};
use crate::error::{Error, Result};

/// A department of one organization, holding its employees.
///
/// Employee IDs are unique within the department and the collection is kept
/// in ascending ID order. The head, when set, always refers to a current
/// member; it is a plain ID rather than a second copy of the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
    head_id: Option<EmployeeId>,
    employees: Vec<Employee>,
}

impl Department {
    /// Create an empty department with no head.
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            head_id: None,
            employees: Vec::new(),
        }
    }

    /// Full constructor used when hydrating stored records.
    ///
    /// Employees are sorted by ID; duplicate IDs and a head that is not a
    /// member are rejected.
    pub fn with_employees(
        id: DepartmentId,
        name: impl Into<String>,
        head_id: Option<EmployeeId>,
        mut employees: Vec<Employee>,
    ) -> Result<Self> {
        employees.sort_by_key(Employee::id);
        if employees.windows(2).any(|w| w[0].id() == w[1].id()) {
            return Err(Error::Validation(format!(
                "duplicate employee ID in department [{id}]"
            )));
        }

        let mut department = Self {
            id,
            name: name.into(),
            head_id: None,
            employees,
        };
        department.set_head(head_id)?;
        Ok(department)
    }

    /// Identifier, unique within the owning organization.
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    /// Department name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ID of the department head, if one is assigned.
    pub fn head_id(&self) -> Option<EmployeeId> {
        self.head_id
    }

    /// The department head's record, if one is assigned.
    pub fn head(&self) -> Option<&Employee> {
        self.head_id.and_then(|id| self.employee(id))
    }

    /// Employees in ascending ID order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Look up one employee of this department.
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.employees
            .binary_search_by_key(&employee_id, Employee::id)
            .ok()
            .map(|idx| &self.employees[idx])
    }

    /// True when an employee with the given ID belongs to this department.
    pub fn contains_employee(&self, employee_id: EmployeeId) -> bool {
        self.employees
            .binary_search_by_key(&employee_id, Employee::id)
            .is_ok()
    }

    /// Rename the department.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Assign or clear the department head. A head must be a member.
    pub fn set_head(&mut self, head_id: Option<EmployeeId>) -> Result<()> {
        if let Some(id) = head_id {
            if !self.contains_employee(id) {
                return Err(Error::Validation(format!(
                    "head [{id}] is not a member of department [{}]",
                    self.id
                )));
            }
        }
        self.head_id = head_id;
        Ok(())
    }

    /// Insert an employee, keeping ascending ID order. Returns `false`
    /// when the ID is already taken within this department.
    pub fn add_employee(&mut self, employee: Employee) -> bool {
        match self
            .employees
            .binary_search_by_key(&employee.id(), Employee::id)
        {
            Ok(_) => false,
            Err(idx) => {
                self.employees.insert(idx, employee);
                true
            }
        }
    }

    /// Replace the record of an existing member wholesale. Returns `false`
    /// when no member has the given ID; never inserts.
    pub fn replace_employee(&mut self, employee: &Employee) -> bool {
        match self
            .employees
            .binary_search_by_key(&employee.id(), Employee::id)
        {
            Ok(idx) => {
                self.employees[idx] = employee.clone();
                true
            }
            Err(_) => false,
        }
    }

    /// Salary aggregates over current members.
    pub fn salary_stats(&self) -> DeptStats {
        let values: Vec<f64> = self.employees.iter().map(Employee::salary).collect();
        DeptStats::from_values(&values)
    }

    /// Performance aggregates over current members.
    pub fn performance_stats(&self) -> DeptStats {
        let values: Vec<f64> = self.employees.iter().map(Employee::performance).collect();
        DeptStats::from_values(&values)
    }
}

impl OrgComponent for Department {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Department
    }

    fn children(&self) -> Vec<&dyn OrgComponent> {
        self.employees
            .iter()
            .map(|e| e as &dyn OrgComponent)
            .collect()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Department: {} (ID: {})", self.name, self.id)
    }
}
