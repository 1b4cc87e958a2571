//! Orgdir Core - Multi-tenant Organizational Directory
//!
//! This crate provides the core of the orgdir directory service:
//! - Model: organizations, departments, and employees with validated
//!   invariants, plus per-department statistics
//! - Store: the `DirectoryStore` abstraction with interchangeable
//!   in-memory and SQLite backends
//! - Registry: one cached facade per organization, safe under concurrent
//!   lookup, update, and removal
//! - Facade: the tenant-scoped view all callers go through

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod facade;
pub mod model;
pub mod registry;
pub mod store;

pub use error::{Error, Result};
pub use facade::OrgFacade;
pub use model::{
    ComponentKind, Department, DepartmentId, DeptStats, Employee, EmployeeId, OrgComponent,
    Organization, OrgId, DEFAULT_POSITION, MAX_PERFORMANCE,
};
pub use registry::FacadeRegistry;
pub use store::{DirectoryStore, MemoryStore, SqliteStore, StorageBackend, StorageConfig};
