//! Uniform read-only view over the organizational hierarchy.

use serde::Serialize;
use std::fmt;

/// Kind tag for nodes of the organizational hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    /// Top-level tenant entity
    Organization,
    /// A department owned by one organization
    Department,
    /// A leaf employee owned by one department
    Employee,
}

impl ComponentKind {
    /// Stable string form of the kind tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Organization => "Organization",
            ComponentKind::Department => "Department",
            ComponentKind::Employee => "Employee",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared capability of every node in the hierarchy: identity, display name,
/// kind tag, and immediate children.
///
/// The hierarchy is closed — exactly `Organization`, `Department`, and
/// `Employee` implement this trait. An organization's children are its
/// departments, a department's children are its employees, and an employee
/// has none.
pub trait OrgComponent {
    /// Externally assigned identifier of this node.
    fn id(&self) -> i64;

    /// Display name of this node.
    fn name(&self) -> &str;

    /// Kind tag of this node.
    fn kind(&self) -> ComponentKind;

    /// Immediate children, in ascending ID order.
    fn children(&self) -> Vec<&dyn OrgComponent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ComponentKind::Organization.to_string(), "Organization");
        assert_eq!(ComponentKind::Department.as_str(), "Department");
        assert_eq!(ComponentKind::Employee.to_string(), "Employee");
    }
}
