//! In-memory storage backend.
//!
//! The reference backend: a `HashMap` of whole organizations behind one
//! `RwLock`. Writes replace entire records under the write lock, so
//! concurrent updates are last-writer-wins and readers never observe a
//! torn record. Data is lost on restart; use [`super::SqliteStore`] when
//! persistence matters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{seed, DirectoryStore};
use crate::error::Result;
use crate::model::{Department, DepartmentId, Employee, EmployeeId, Organization, OrgId};

/// In-memory directory store for development and tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    organizations: Arc<RwLock<HashMap<OrgId, Organization>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the canonical sample dataset.
    pub fn with_sample_data() -> Self {
        let mut organizations = HashMap::new();
        for organization in seed::sample_organizations() {
            organizations.insert(organization.id(), organization);
        }
        Self {
            organizations: Arc::new(RwLock::new(organizations)),
        }
    }

    /// Insert a whole organization. `true` iff the ID was free.
    pub async fn insert_organization(&self, organization: &Organization) -> Result<bool> {
        let mut organizations = self.organizations.write().await;
        if organizations.contains_key(&organization.id()) {
            return Ok(false);
        }
        debug!(org_id = organization.id(), "organization inserted");
        organizations.insert(organization.id(), organization.clone());
        Ok(true)
    }

    /// Number of stored organizations.
    pub async fn organization_count(&self) -> usize {
        self.organizations.read().await.len()
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn get_organization(&self, org_id: OrgId) -> Result<Option<Organization>> {
        let organizations = self.organizations.read().await;
        Ok(organizations.get(&org_id).cloned())
    }

    async fn get_departments(&self, org_id: OrgId) -> Result<Vec<Department>> {
        let organizations = self.organizations.read().await;
        Ok(organizations
            .get(&org_id)
            .map(|org| org.departments().to_vec())
            .unwrap_or_default())
    }

    async fn get_employees(&self, org_id: OrgId) -> Result<Vec<Employee>> {
        let organizations = self.organizations.read().await;
        Ok(organizations
            .get(&org_id)
            .map(|org| org.employees().into_iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_employee(
        &self,
        org_id: OrgId,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>> {
        let organizations = self.organizations.read().await;
        Ok(organizations
            .get(&org_id)
            .and_then(|org| org.employee(employee_id))
            .cloned())
    }

    async fn get_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
    ) -> Result<Option<Department>> {
        let organizations = self.organizations.read().await;
        Ok(organizations
            .get(&org_id)
            .and_then(|org| org.department(department_id))
            .cloned())
    }

    async fn update_employee(&self, org_id: OrgId, employee: &Employee) -> Result<bool> {
        let mut organizations = self.organizations.write().await;
        let updated = organizations
            .get_mut(&org_id)
            .map(|org| org.update_employee(employee))
            .unwrap_or(false);
        if updated {
            debug!(org_id = org_id, employee_id = employee.id(), "employee updated");
        }
        Ok(updated)
    }

    async fn update_department(&self, org_id: OrgId, department: &Department) -> Result<bool> {
        let mut organizations = self.organizations.write().await;
        let updated = match organizations.get_mut(&org_id) {
            Some(org) => org.update_department(department)?,
            None => false,
        };
        if updated {
            debug!(
                org_id = org_id,
                department_id = department.id(),
                "department updated"
            );
        }
        Ok(updated)
    }

    async fn add_employee_to_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
        employee: &Employee,
    ) -> Result<bool> {
        let mut organizations = self.organizations.write().await;
        let added = organizations
            .get_mut(&org_id)
            .map(|org| org.add_employee_to_department(department_id, employee.clone()))
            .unwrap_or(false);
        if added {
            debug!(
                org_id = org_id,
                department_id = department_id,
                employee_id = employee.id(),
                "employee added"
            );
        }
        Ok(added)
    }

    async fn remove_organization(&self, org_id: OrgId) -> Result<bool> {
        let mut organizations = self.organizations.write().await;
        let removed = organizations.remove(&org_id).is_some();
        if removed {
            debug!(org_id = org_id, "organization removed");
        }
        Ok(removed)
    }
}
