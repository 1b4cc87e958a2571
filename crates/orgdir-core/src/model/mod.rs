//! Entity model of the organizational hierarchy.
//!
//! An [`Organization`] owns [`Department`]s, which own [`Employee`]s. All
//! three expose the uniform [`OrgComponent`] view. Entities validate their
//! invariants at construction and mutation time, so a value of one of these
//! types is always well-formed.

mod component;
mod department;
mod employee;
mod organization;
mod stats;

pub use component::{ComponentKind, OrgComponent};
pub use department::Department;
pub use employee::{Employee, DEFAULT_POSITION, MAX_PERFORMANCE};
pub use organization::Organization;
pub use stats::DeptStats;

/// Tenant key of an organization, assigned externally.
pub type OrgId = i64;

/// Department identifier, unique within one organization.
pub type DepartmentId = i64;

/// Employee identifier, unique within one organization.
pub type EmployeeId = i64;
