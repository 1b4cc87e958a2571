//! Storage backends for organizational data.
//!
//! Every backend implements [`DirectoryStore`] with identical observable
//! behavior; callers cannot tell the in-memory reference backend from the
//! SQLite one apart from persistence. There is no caching in this layer,
//! each call reflects backend state at call time.

mod backend;
mod memory;
pub mod seed;
mod sqlite;

pub use backend::{StorageBackend, StorageConfig};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Department, DepartmentId, Employee, EmployeeId, Organization, OrgId};

/// Storage connection shared by all backends.
///
/// Reads return `Ok(None)` (or an empty collection) for unknown IDs,
/// including non-positive ones; writes return `Ok(false)` without mutating
/// anything when the target is missing. Errors are reserved for backend
/// failures and invariant violations.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Load one organization with its full hierarchy.
    async fn get_organization(&self, org_id: OrgId) -> Result<Option<Organization>>;

    /// Departments of an organization in ascending ID order; empty when
    /// the organization is unknown.
    async fn get_departments(&self, org_id: OrgId) -> Result<Vec<Department>>;

    /// All employees of an organization in ascending ID order, regardless
    /// of department; empty when the organization is unknown.
    async fn get_employees(&self, org_id: OrgId) -> Result<Vec<Employee>>;

    /// Look up one employee.
    async fn get_employee(
        &self,
        org_id: OrgId,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>>;

    /// Look up one department with its employees.
    async fn get_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
    ) -> Result<Option<Department>>;

    /// Replace an existing employee's record wholesale. `true` iff an
    /// employee with that ID exists under the organization; never creates.
    async fn update_employee(&self, org_id: OrgId, employee: &Employee) -> Result<bool>;

    /// Replace an existing department's name and head assignment, keeping
    /// its employees. `true` iff the department exists; never creates. A
    /// head outside the department is a validation error.
    async fn update_department(&self, org_id: OrgId, department: &Department) -> Result<bool>;

    /// Add a new employee to a department. `true` iff the department
    /// exists and the employee ID is free across the whole organization.
    async fn add_employee_to_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
        employee: &Employee,
    ) -> Result<bool>;

    /// Remove an organization with all its departments and employees,
    /// atomically. `true` iff it existed.
    async fn remove_organization(&self, org_id: OrgId) -> Result<bool>;
}
