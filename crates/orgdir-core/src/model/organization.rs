//! Organization entity, the aggregate root of one tenant's data.

use serde::Serialize;
use std::fmt;

use super::component::{ComponentKind, OrgComponent};
use super::department::Department;
use super::employee::Employee;
use super::{DepartmentId, EmployeeId, OrgId};
use crate::error::{Error, Result};

/// One tenant's complete hierarchy: the organization and every department
/// and employee under it.
///
/// Department IDs are unique within the organization and kept in ascending
/// order; employee IDs are unique across the whole organization, not just
/// within their department. All write paths below preserve both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    id: OrgId,
    name: String,
    departments: Vec<Department>,
}

impl Organization {
    /// Create an organization with no departments. The name must be
    /// non-empty.
    pub fn new(id: OrgId, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Validation(format!(
                "organization [{id}] requires a non-empty name"
            )));
        }
        Ok(Self {
            id,
            name,
            departments: Vec::new(),
        })
    }

    /// Full constructor used when hydrating stored records.
    ///
    /// Departments are sorted by ID; duplicate department IDs and employee
    /// IDs reused across departments are rejected.
    pub fn with_departments(
        id: OrgId,
        name: impl Into<String>,
        departments: Vec<Department>,
    ) -> Result<Self> {
        let mut organization = Self::new(id, name)?;
        for department in departments {
            organization.push_department(department)?;
        }
        Ok(organization)
    }

    /// Tenant key of this organization.
    pub fn id(&self) -> OrgId {
        self.id
    }

    /// Organization name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Departments in ascending ID order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Look up one department.
    pub fn department(&self, department_id: DepartmentId) -> Option<&Department> {
        self.departments
            .binary_search_by_key(&department_id, Department::id)
            .ok()
            .map(|idx| &self.departments[idx])
    }

    /// All employees of the organization in ascending ID order, regardless
    /// of department.
    pub fn employees(&self) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = self
            .departments
            .iter()
            .flat_map(|d| d.employees().iter())
            .collect();
        employees.sort_by_key(|e| e.id());
        employees
    }

    /// Look up one employee anywhere in the organization.
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.departments
            .iter()
            .find_map(|d| d.employee(employee_id))
    }

    /// True when an employee with the given ID exists anywhere in the
    /// organization.
    pub fn contains_employee(&self, employee_id: EmployeeId) -> bool {
        self.departments
            .iter()
            .any(|d| d.contains_employee(employee_id))
    }

    /// Insert a department, keeping ascending ID order. Duplicate
    /// department IDs and employee IDs already taken elsewhere in the
    /// organization are rejected.
    pub fn push_department(&mut self, department: Department) -> Result<()> {
        let idx = match self
            .departments
            .binary_search_by_key(&department.id(), Department::id)
        {
            Ok(_) => {
                return Err(Error::Validation(format!(
                    "duplicate department ID [{}] in organization [{}]",
                    department.id(),
                    self.id
                )));
            }
            Err(idx) => idx,
        };
        if let Some(employee) = department
            .employees()
            .iter()
            .find(|e| self.contains_employee(e.id()))
        {
            return Err(Error::Validation(format!(
                "employee ID [{}] already taken in organization [{}]",
                employee.id(),
                self.id
            )));
        }
        self.departments.insert(idx, department);
        Ok(())
    }

    /// Replace an existing employee's record wholesale. Returns `false`
    /// when no employee has the given ID; never inserts.
    pub fn update_employee(&mut self, employee: &Employee) -> bool {
        self.departments
            .iter_mut()
            .any(|d| d.replace_employee(employee))
    }

    /// Replace an existing department's name and head assignment. The
    /// employee collection is not touched; the head is validated against
    /// current membership. Returns `Ok(false)` when no department has the
    /// given ID.
    pub fn update_department(&mut self, department: &Department) -> Result<bool> {
        let idx = match self
            .departments
            .binary_search_by_key(&department.id(), Department::id)
        {
            Ok(idx) => idx,
            Err(_) => return Ok(false),
        };
        let target = &mut self.departments[idx];
        target.set_head(department.head_id())?;
        target.set_name(department.name());
        Ok(true)
    }

    /// Add a new employee to the given department. Returns `false` when
    /// the department does not exist or the employee ID is already taken
    /// anywhere in the organization.
    pub fn add_employee_to_department(
        &mut self,
        department_id: DepartmentId,
        employee: Employee,
    ) -> bool {
        if self.contains_employee(employee.id()) {
            return false;
        }
        let idx = match self
            .departments
            .binary_search_by_key(&department_id, Department::id)
        {
            Ok(idx) => idx,
            Err(_) => return false,
        };
        self.departments[idx].add_employee(employee)
    }
}

impl OrgComponent for Organization {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Organization
    }

    fn children(&self) -> Vec<&dyn OrgComponent> {
        self.departments
            .iter()
            .map(|d| d as &dyn OrgComponent)
            .collect()
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Organization: {} (ID: {})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn employee(id: EmployeeId) -> Employee {
        let hired = Utc.with_ymd_and_hms(2023, 3, 10, 0, 0, 0).unwrap();
        Employee::new(id, format!("emp-{id}"), hired)
    }

    fn sample_org() -> Organization {
        let mut eng = Department::new(1, "Engineering");
        eng.add_employee(employee(1));
        eng.add_employee(employee(3));
        let mut sales = Department::new(2, "Sales");
        sales.add_employee(employee(2));
        Organization::with_departments(10, "Acme", vec![sales, eng]).unwrap()
    }

    #[test]
    fn test_name_must_be_non_empty() {
        assert!(Organization::new(1, "").is_err());
        assert!(Organization::new(1, "Acme").is_ok());
    }

    #[test]
    fn test_departments_sorted_and_unique() {
        let org = sample_org();
        let ids: Vec<DepartmentId> = org.departments().iter().map(Department::id).collect();
        assert_eq!(ids, vec![1, 2]);

        let dup = Organization::with_departments(
            10,
            "Acme",
            vec![Department::new(1, "A"), Department::new(1, "B")],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_employee_ids_unique_across_departments() {
        let mut a = Department::new(1, "A");
        a.add_employee(employee(7));
        let mut b = Department::new(2, "B");
        b.add_employee(employee(7));
        assert!(Organization::with_departments(10, "Acme", vec![a, b]).is_err());
    }

    #[test]
    fn test_employees_flattened_in_id_order() {
        let org = sample_org();
        let ids: Vec<EmployeeId> = org.employees().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(org.employee(2).unwrap().name(), "emp-2");
        assert!(org.employee(99).is_none());
    }

    #[test]
    fn test_update_employee_never_inserts() {
        let mut org = sample_org();
        let mut updated = employee(2);
        updated.set_salary(4000.0).unwrap();
        assert!(org.update_employee(&updated));
        assert_eq!(org.employee(2).unwrap().salary(), 4000.0);

        assert!(!org.update_employee(&employee(42)));
        assert!(org.employee(42).is_none());
    }

    #[test]
    fn test_update_department_keeps_members() {
        let mut org = sample_org();
        let mut change = Department::new(1, "Platform");
        change.add_employee(employee(3));
        change.set_head(Some(3)).unwrap();

        assert!(org.update_department(&change).unwrap());
        let dept = org.department(1).unwrap();
        assert_eq!(dept.name(), "Platform");
        assert_eq!(dept.head_id(), Some(3));
        assert_eq!(dept.employees().len(), 2);

        assert!(!org.update_department(&Department::new(9, "Ghost")).unwrap());
    }

    #[test]
    fn test_update_department_rejects_foreign_head() {
        let mut org = sample_org();
        let mut change = Department::new(1, "Platform");
        change.add_employee(employee(2));
        change.set_head(Some(2)).unwrap();

        // employee 2 belongs to Sales, not Engineering
        assert!(org.update_department(&change).is_err());
        assert_eq!(org.department(1).unwrap().name(), "Engineering");
    }

    #[test]
    fn test_add_employee_to_department() {
        let mut org = sample_org();
        assert!(org.add_employee_to_department(2, employee(4)));
        assert!(org.department(2).unwrap().contains_employee(4));

        // ID taken in a different department
        assert!(!org.add_employee_to_department(2, employee(1)));
        // unknown department
        assert!(!org.add_employee_to_department(9, employee(5)));
    }

    #[test]
    fn test_component_tree() {
        let org = sample_org();
        let component: &dyn OrgComponent = &org;
        assert_eq!(component.kind(), ComponentKind::Organization);
        assert_eq!(component.name(), "Acme");

        let departments = component.children();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0].kind(), ComponentKind::Department);
        assert_eq!(departments[0].children().len(), 2);
    }
}
