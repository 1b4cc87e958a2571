//! Config-driven storage backend selection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DirectoryStore, MemoryStore, SqliteStore};
use crate::error::{Error, Result};
use crate::model::{Department, DepartmentId, Employee, EmployeeId, Organization, OrgId};

/// Storage backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type: "memory" or "sqlite"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// SQLite database path (only used when backend = "sqlite")
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,

    /// Pre-populate the memory backend with the sample dataset. SQLite
    /// databases are seeded explicitly via the seed-db command instead.
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_sqlite_path() -> String {
    "orgdir.db".to_string()
}

fn default_seed() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sqlite_path: default_sqlite_path(),
            seed: default_seed(),
        }
    }
}

/// Unified directory backend wrapping the concrete store implementations.
pub enum StorageBackend {
    /// In-memory storage (development and tests)
    Memory(MemoryStore),
    /// SQLite storage (persistent)
    Sqlite(SqliteStore),
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory(_) => f.write_str("Memory"),
            Self::Sqlite(_) => f.write_str("Sqlite"),
        }
    }
}

impl StorageBackend {
    /// Create a backend from configuration. Unknown backend names are a
    /// configuration error, never silently defaulted.
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.backend.as_str() {
            "memory" => {
                let store = if config.seed {
                    MemoryStore::with_sample_data()
                } else {
                    MemoryStore::new()
                };
                info!(seeded = config.seed, "using in-memory storage backend");
                Ok(Self::Memory(store))
            }
            "sqlite" => {
                let store = SqliteStore::new(&config.sqlite_path).await?;
                Ok(Self::Sqlite(store))
            }
            other => Err(Error::Configuration(format!(
                "unknown storage backend: '{other}'. Use 'memory' or 'sqlite'."
            ))),
        }
    }

    /// Insert a whole organization. `true` iff the ID was free.
    pub async fn insert_organization(&self, organization: &Organization) -> Result<bool> {
        match self {
            Self::Memory(store) => store.insert_organization(organization).await,
            Self::Sqlite(store) => store.insert_organization(organization).await,
        }
    }
}

#[async_trait]
impl DirectoryStore for StorageBackend {
    async fn get_organization(&self, org_id: OrgId) -> Result<Option<Organization>> {
        match self {
            Self::Memory(store) => store.get_organization(org_id).await,
            Self::Sqlite(store) => store.get_organization(org_id).await,
        }
    }

    async fn get_departments(&self, org_id: OrgId) -> Result<Vec<Department>> {
        match self {
            Self::Memory(store) => store.get_departments(org_id).await,
            Self::Sqlite(store) => store.get_departments(org_id).await,
        }
    }

    async fn get_employees(&self, org_id: OrgId) -> Result<Vec<Employee>> {
        match self {
            Self::Memory(store) => store.get_employees(org_id).await,
            Self::Sqlite(store) => store.get_employees(org_id).await,
        }
    }

    async fn get_employee(
        &self,
        org_id: OrgId,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>> {
        match self {
            Self::Memory(store) => store.get_employee(org_id, employee_id).await,
            Self::Sqlite(store) => store.get_employee(org_id, employee_id).await,
        }
    }

    async fn get_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
    ) -> Result<Option<Department>> {
        match self {
            Self::Memory(store) => store.get_department(org_id, department_id).await,
            Self::Sqlite(store) => store.get_department(org_id, department_id).await,
        }
    }

    async fn update_employee(&self, org_id: OrgId, employee: &Employee) -> Result<bool> {
        match self {
            Self::Memory(store) => store.update_employee(org_id, employee).await,
            Self::Sqlite(store) => store.update_employee(org_id, employee).await,
        }
    }

    async fn update_department(&self, org_id: OrgId, department: &Department) -> Result<bool> {
        match self {
            Self::Memory(store) => store.update_department(org_id, department).await,
            Self::Sqlite(store) => store.update_department(org_id, department).await,
        }
    }

    async fn add_employee_to_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
        employee: &Employee,
    ) -> Result<bool> {
        match self {
            Self::Memory(store) => {
                store
                    .add_employee_to_department(org_id, department_id, employee)
                    .await
            }
            Self::Sqlite(store) => {
                store
                    .add_employee_to_department(org_id, department_id, employee)
                    .await
            }
        }
    }

    async fn remove_organization(&self, org_id: OrgId) -> Result<bool> {
        match self {
            Self::Memory(store) => store.remove_organization(org_id).await,
            Self::Sqlite(store) => store.remove_organization(org_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_from_config_memory() {
        let config = StorageConfig {
            backend: "memory".to_string(),
            seed: true,
            ..Default::default()
        };
        let backend = StorageBackend::from_config(&config).await.unwrap();
        assert!(backend.get_organization(1).await.unwrap().is_some());

        let unseeded = StorageConfig {
            backend: "memory".to_string(),
            seed: false,
            ..Default::default()
        };
        let backend = StorageBackend::from_config(&unseeded).await.unwrap();
        assert!(backend.get_organization(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_config_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: "sqlite".to_string(),
            sqlite_path: temp_dir
                .path()
                .join("backend_test.db")
                .to_string_lossy()
                .to_string(),
            seed: false,
        };
        let backend = StorageBackend::from_config(&config).await.unwrap();
        assert!(backend.get_organization(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_config_unknown_backend() {
        let config = StorageConfig {
            backend: "postgres".to_string(),
            ..Default::default()
        };
        let err = StorageBackend::from_config(&config).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
