//! SQLite storage backend.
//!
//! Persistent directory storage over an embedded SQLite database. The
//! schema is created on open; organizations, departments, and employees
//! live in three tables keyed by `(org_id, id)`, which makes employee IDs
//! unique across the whole organization. Multi-row writes run inside one
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::DirectoryStore;
use crate::error::{Error, Result};
use crate::model::{Department, DepartmentId, Employee, EmployeeId, Organization, OrgId};

type EmployeeRow = (i64, String, String, String, f64, f64);

/// SQLite directory store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a database file and initialize the schema.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Configuration(format!("failed to create database directory: {e}"))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .map_err(|e| Error::Configuration(format!("invalid sqlite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("failed to connect to sqlite: {e}")))?;

        let store = Self { pool };
        store.init_schema().await?;

        info!(path = %path.display(), "sqlite directory store initialized");
        Ok(store)
    }

    /// Open a private in-memory database, for tests.
    ///
    /// Capped at one connection: every connection to `sqlite::memory:`
    /// gets its own database, so a larger pool would split the data.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| Error::Configuration(format!("invalid sqlite path: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("failed to connect to sqlite: {e}")))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS organizations (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to create organizations table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS departments (
                org_id INTEGER NOT NULL,
                id INTEGER NOT NULL,
                name TEXT NOT NULL,
                head_id INTEGER,
                PRIMARY KEY (org_id, id),
                FOREIGN KEY (org_id) REFERENCES organizations(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to create departments table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                org_id INTEGER NOT NULL,
                dept_id INTEGER NOT NULL,
                id INTEGER NOT NULL,
                name TEXT NOT NULL,
                hire_date TEXT NOT NULL,
                position TEXT NOT NULL,
                salary REAL NOT NULL,
                performance REAL NOT NULL,
                PRIMARY KEY (org_id, id),
                FOREIGN KEY (org_id, dept_id) REFERENCES departments(org_id, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to create employees table: {e}")))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_employees_dept ON employees(org_id, dept_id)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to create index: {e}")))?;

        debug!("sqlite directory schema initialized");
        Ok(())
    }

    /// Insert a whole organization in one transaction. `true` iff the ID
    /// was free.
    pub async fn insert_organization(&self, organization: &Organization) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(format!("failed to begin transaction: {e}")))?;

        let taken: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM organizations WHERE id = ?")
            .bind(organization.id())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("failed to check organization: {e}")))?;
        if taken.is_some() {
            return Ok(false);
        }

        sqlx::query("INSERT INTO organizations (id, name) VALUES (?, ?)")
            .bind(organization.id())
            .bind(organization.name())
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("failed to insert organization: {e}")))?;

        for department in organization.departments() {
            sqlx::query("INSERT INTO departments (org_id, id, name, head_id) VALUES (?, ?, ?, ?)")
                .bind(organization.id())
                .bind(department.id())
                .bind(department.name())
                .bind(department.head_id())
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::Database(format!("failed to insert department: {e}")))?;

            for employee in department.employees() {
                sqlx::query(
                    r#"
                    INSERT INTO employees
                        (org_id, dept_id, id, name, hire_date, position, salary, performance)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(organization.id())
                .bind(department.id())
                .bind(employee.id())
                .bind(employee.name())
                .bind(employee.hire_date().to_rfc3339())
                .bind(employee.position())
                .bind(employee.salary())
                .bind(employee.performance())
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::Database(format!("failed to insert employee: {e}")))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| Error::Database(format!("failed to commit transaction: {e}")))?;

        debug!(org_id = organization.id(), "organization inserted");
        Ok(true)
    }

    async fn load_departments(&self, org_id: OrgId) -> Result<Vec<Department>> {
        let dept_rows: Vec<(i64, String, Option<i64>)> =
            sqlx::query_as("SELECT id, name, head_id FROM departments WHERE org_id = ? ORDER BY id")
                .bind(org_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| Error::Database(format!("failed to load departments: {e}")))?;

        let emp_rows: Vec<(i64, i64, String, String, String, f64, f64)> = sqlx::query_as(
            r#"
            SELECT dept_id, id, name, hire_date, position, salary, performance
            FROM employees WHERE org_id = ? ORDER BY id
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to load employees: {e}")))?;

        let mut by_dept: HashMap<DepartmentId, Vec<Employee>> = HashMap::new();
        for (dept_id, id, name, hire_date, position, salary, performance) in emp_rows {
            by_dept
                .entry(dept_id)
                .or_default()
                .push(employee_from_row((id, name, hire_date, position, salary, performance))?);
        }

        let mut departments = Vec::with_capacity(dept_rows.len());
        for (id, name, head_id) in dept_rows {
            let employees = by_dept.remove(&id).unwrap_or_default();
            departments.push(Department::with_employees(id, name, head_id, employees)?);
        }
        Ok(departments)
    }
}

fn employee_from_row(row: EmployeeRow) -> Result<Employee> {
    let (id, name, hire_date, position, salary, performance) = row;
    let hired = DateTime::parse_from_rfc3339(&hire_date)
        .map_err(|e| Error::Database(format!("invalid hire date for employee [{id}]: {e}")))?
        .with_timezone(&Utc);
    Employee::with_details(id, name, hired, Some(&position), salary, performance)
}

#[async_trait]
impl DirectoryStore for SqliteStore {
    async fn get_organization(&self, org_id: OrgId) -> Result<Option<Organization>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT name FROM organizations WHERE id = ?")
            .bind(org_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("failed to load organization: {e}")))?;

        match row {
            Some((name,)) => {
                let departments = self.load_departments(org_id).await?;
                Ok(Some(Organization::with_departments(org_id, name, departments)?))
            }
            None => Ok(None),
        }
    }

    async fn get_departments(&self, org_id: OrgId) -> Result<Vec<Department>> {
        self.load_departments(org_id).await
    }

    async fn get_employees(&self, org_id: OrgId) -> Result<Vec<Employee>> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, name, hire_date, position, salary, performance
            FROM employees WHERE org_id = ? ORDER BY id
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to load employees: {e}")))?;

        rows.into_iter().map(employee_from_row).collect()
    }

    async fn get_employee(
        &self,
        org_id: OrgId,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, name, hire_date, position, salary, performance
            FROM employees WHERE org_id = ? AND id = ?
            "#,
        )
        .bind(org_id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to load employee: {e}")))?;

        row.map(employee_from_row).transpose()
    }

    async fn get_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
    ) -> Result<Option<Department>> {
        let row: Option<(String, Option<i64>)> =
            sqlx::query_as("SELECT name, head_id FROM departments WHERE org_id = ? AND id = ?")
                .bind(org_id)
                .bind(department_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| Error::Database(format!("failed to load department: {e}")))?;

        let (name, head_id) = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let emp_rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, name, hire_date, position, salary, performance
            FROM employees WHERE org_id = ? AND dept_id = ? ORDER BY id
            "#,
        )
        .bind(org_id)
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to load employees: {e}")))?;

        let employees = emp_rows
            .into_iter()
            .map(employee_from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Department::with_employees(
            department_id,
            name,
            head_id,
            employees,
        )?))
    }

    async fn update_employee(&self, org_id: OrgId, employee: &Employee) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, hire_date = ?, position = ?, salary = ?, performance = ?
            WHERE org_id = ? AND id = ?
            "#,
        )
        .bind(employee.name())
        .bind(employee.hire_date().to_rfc3339())
        .bind(employee.position())
        .bind(employee.salary())
        .bind(employee.performance())
        .bind(org_id)
        .bind(employee.id())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to update employee: {e}")))?;

        let updated = result.rows_affected() > 0;
        if updated {
            debug!(org_id = org_id, employee_id = employee.id(), "employee updated");
        }
        Ok(updated)
    }

    async fn update_department(&self, org_id: OrgId, department: &Department) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(format!("failed to begin transaction: {e}")))?;

        let exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM departments WHERE org_id = ? AND id = ?")
                .bind(org_id)
                .bind(department.id())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| Error::Database(format!("failed to check department: {e}")))?;
        if exists.is_none() {
            return Ok(false);
        }

        if let Some(head_id) = department.head_id() {
            let member: Option<(i64,)> =
                sqlx::query_as("SELECT 1 FROM employees WHERE org_id = ? AND dept_id = ? AND id = ?")
                    .bind(org_id)
                    .bind(department.id())
                    .bind(head_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| Error::Database(format!("failed to check head: {e}")))?;
            if member.is_none() {
                return Err(Error::Validation(format!(
                    "head [{head_id}] is not a member of department [{}]",
                    department.id()
                )));
            }
        }

        sqlx::query("UPDATE departments SET name = ?, head_id = ? WHERE org_id = ? AND id = ?")
            .bind(department.name())
            .bind(department.head_id())
            .bind(org_id)
            .bind(department.id())
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("failed to update department: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(format!("failed to commit transaction: {e}")))?;

        debug!(org_id = org_id, department_id = department.id(), "department updated");
        Ok(true)
    }

    async fn add_employee_to_department(
        &self,
        org_id: OrgId,
        department_id: DepartmentId,
        employee: &Employee,
    ) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(format!("failed to begin transaction: {e}")))?;

        let dept: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM departments WHERE org_id = ? AND id = ?")
                .bind(org_id)
                .bind(department_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| Error::Database(format!("failed to check department: {e}")))?;
        if dept.is_none() {
            return Ok(false);
        }

        // ID uniqueness is organization-wide, not per department
        let taken: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM employees WHERE org_id = ? AND id = ?")
                .bind(org_id)
                .bind(employee.id())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| Error::Database(format!("failed to check employee: {e}")))?;
        if taken.is_some() {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO employees
                (org_id, dept_id, id, name, hire_date, position, salary, performance)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(org_id)
        .bind(department_id)
        .bind(employee.id())
        .bind(employee.name())
        .bind(employee.hire_date().to_rfc3339())
        .bind(employee.position())
        .bind(employee.salary())
        .bind(employee.performance())
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::Database(format!("failed to insert employee: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(format!("failed to commit transaction: {e}")))?;

        debug!(
            org_id = org_id,
            department_id = department_id,
            employee_id = employee.id(),
            "employee added"
        );
        Ok(true)
    }

    async fn remove_organization(&self, org_id: OrgId) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(format!("failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM employees WHERE org_id = ?")
            .bind(org_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("failed to delete employees: {e}")))?;

        sqlx::query("DELETE FROM departments WHERE org_id = ?")
            .bind(org_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("failed to delete departments: {e}")))?;

        let result = sqlx::query("DELETE FROM organizations WHERE id = ?")
            .bind(org_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(format!("failed to delete organization: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(format!("failed to commit transaction: {e}")))?;

        let removed = result.rows_affected() > 0;
        if removed {
            debug!(org_id = org_id, "organization removed");
        }
        Ok(removed)
    }
}
