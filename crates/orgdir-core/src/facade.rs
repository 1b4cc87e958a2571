//! Per-organization facade.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{Department, DepartmentId, Employee, EmployeeId, Organization, OrgId};
use crate::store::DirectoryStore;

/// Tenant-scoped view over the directory: every call is bound to the one
/// organization ID the facade was created for.
///
/// Instances are created and cached by
/// [`FacadeRegistry`](crate::registry::FacadeRegistry); the storage
/// connection is captured at creation time and kept for the facade's
/// lifetime. Results pass through unchanged, absent reads stay `None` and
/// rejected writes stay `false`.
pub struct OrgFacade {
    org_id: OrgId,
    connection: Arc<dyn DirectoryStore>,
}

impl std::fmt::Debug for OrgFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrgFacade")
            .field("org_id", &self.org_id)
            .finish_non_exhaustive()
    }
}

impl OrgFacade {
    pub(crate) fn new(org_id: OrgId, connection: Arc<dyn DirectoryStore>) -> Self {
        Self { org_id, connection }
    }

    /// The organization this facade is bound to.
    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// Load the organization with its full hierarchy.
    pub async fn get_organization(&self) -> Result<Option<Organization>> {
        self.connection.get_organization(self.org_id).await
    }

    /// Departments in ascending ID order.
    pub async fn get_departments(&self) -> Result<Vec<Department>> {
        self.connection.get_departments(self.org_id).await
    }

    /// All employees in ascending ID order, regardless of department.
    pub async fn get_employees(&self) -> Result<Vec<Employee>> {
        self.connection.get_employees(self.org_id).await
    }

    /// Look up one employee.
    pub async fn get_employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>> {
        self.connection.get_employee(self.org_id, employee_id).await
    }

    /// Look up one department.
    pub async fn get_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Option<Department>> {
        self.connection
            .get_department(self.org_id, department_id)
            .await
    }

    /// Replace an existing employee's record. `true` iff the employee ID
    /// already exists in this organization.
    pub async fn update_employee(&self, employee: &Employee) -> Result<bool> {
        self.connection.update_employee(self.org_id, employee).await
    }

    /// Replace an existing department's name and head assignment.
    pub async fn update_department(&self, department: &Department) -> Result<bool> {
        self.connection
            .update_department(self.org_id, department)
            .await
    }

    /// Add a new employee to a department.
    pub async fn add_employee_to_department(
        &self,
        department_id: DepartmentId,
        employee: &Employee,
    ) -> Result<bool> {
        self.connection
            .add_employee_to_department(self.org_id, department_id, employee)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_facade_is_bound_to_one_org() {
        let store = Arc::new(MemoryStore::with_sample_data());
        let facade = OrgFacade::new(1, store.clone());
        assert_eq!(facade.org_id(), 1);

        // employee 3 exists in org 1 only
        assert!(facade.get_employee(3).await.unwrap().is_some());
        let other = OrgFacade::new(2, store);
        assert!(other.get_employee(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_through_facade_is_visible() {
        let store = Arc::new(MemoryStore::with_sample_data());
        let facade = OrgFacade::new(1, store);

        let mut emp = facade.get_employee(1).await.unwrap().unwrap();
        emp.set_position("Tech Lead");
        assert!(facade.update_employee(&emp).await.unwrap());
        assert_eq!(
            facade.get_employee(1).await.unwrap().unwrap().position(),
            "Tech Lead"
        );
    }
}
