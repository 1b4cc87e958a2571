//! Canonical sample dataset.
//!
//! Shared by the seeded memory backend, the seed-db command, and test
//! fixtures. The contents are fixed: organization 1 ("Acme Logistics")
//! carries employee 1 at salary 1000.0, and both organizations reuse
//! the same department and employee IDs to show that identity is scoped
//! per organization.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::model::{Department, Employee, Organization};

/// The sample organizations, rebuilt on every call.
pub fn sample_organizations() -> Vec<Organization> {
    build_sample().expect("sample dataset is well-formed")
}

fn hired(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
}

fn build_sample() -> Result<Vec<Organization>> {
    let engineering = Department::with_employees(
        1,
        "Engineering",
        Some(2),
        vec![
            Employee::with_details(
                1,
                "Grace Field",
                hired(2021, 3, 15),
                Some("Software Engineer"),
                1000.0,
                75.0,
            )?,
            Employee::with_details(
                2,
                "Omar Haddad",
                hired(2019, 11, 2),
                Some("Platform Engineer"),
                2400.0,
                88.0,
            )?,
        ],
    )?;

    let logistics = Department::with_employees(
        2,
        "Logistics",
        Some(4),
        vec![
            Employee::with_details(
                3,
                "Ines Castro",
                hired(2022, 6, 20),
                Some("Dispatcher"),
                1800.0,
                64.0,
            )?,
            Employee::with_details(
                4,
                "Leo Brandt",
                hired(2020, 1, 9),
                Some("Fleet Manager"),
                2900.0,
                91.0,
            )?,
        ],
    )?;

    let research = Department::with_employees(
        1,
        "Research",
        Some(1),
        vec![
            Employee::with_details(
                1,
                "Nadia Petrov",
                hired(2018, 9, 1),
                Some("Research Scientist"),
                3100.0,
                95.0,
            )?,
            Employee::with_details(
                2,
                "Tomas Okafor",
                hired(2023, 2, 13),
                Some("Lab Technician"),
                1500.0,
                70.0,
            )?,
        ],
    )?;

    Ok(vec![
        Organization::with_departments(1, "Acme Logistics", vec![engineering, logistics])?,
        Organization::with_departments(2, "Borealis Labs", vec![research])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape_is_stable() {
        let orgs = sample_organizations();
        assert_eq!(orgs.len(), 2);

        let acme = &orgs[0];
        assert_eq!(acme.id(), 1);
        assert_eq!(acme.departments().len(), 2);
        assert_eq!(acme.employee(1).unwrap().salary(), 1000.0);
        assert_eq!(acme.department(1).unwrap().head_id(), Some(2));

        let borealis = &orgs[1];
        assert_eq!(borealis.id(), 2);
        assert!(borealis.employee(1).is_some());
    }
}
