//! Departments API endpoints
//!
//! GET  /api/v1/organizations/:org_id/departments/:dept_id                   - Department info
//! GET  /api/v1/organizations/:org_id/departments/:dept_id/stats/performance - Performance stats
//! GET  /api/v1/organizations/:org_id/departments/:dept_id/stats/salary      - Salary stats
//! PUT  /api/v1/organizations/:org_id/departments/:dept_id/head              - Assign the head
//! POST /api/v1/organizations/:org_id/departments/:dept_id/employees         - Hire an employee

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use orgdir_core::{Department, DepartmentId, DeptStats, Employee, EmployeeId, OrgId};
use serde::Deserialize;

use super::{ApiError, ApiResponse, ApiResult, ApiState};

/// Request to assign (or clear) the department head.
#[derive(Debug, Deserialize)]
pub struct SetHeadRequest {
    /// ID of the member to promote; `null` clears the head
    pub head_id: Option<EmployeeId>,
}

/// Request to hire a new employee into the department.
#[derive(Debug, Deserialize)]
pub struct HireEmployeeRequest {
    /// ID for the new employee, unique within the organization
    pub id: EmployeeId,
    /// Employee name
    pub name: String,
    /// Hire date
    pub hire_date: DateTime<Utc>,
    /// Position; empty or absent falls back to the default
    #[serde(default)]
    pub position: Option<String>,
    /// Starting salary
    #[serde(default)]
    pub salary: f64,
    /// Initial performance score
    #[serde(default)]
    pub performance: f64,
}

async fn load_department(
    state: &ApiState,
    org_id: OrgId,
    dept_id: DepartmentId,
) -> Result<Department, ApiError> {
    let facade = state.registry().get_instance(org_id).await?;
    facade.get_department(dept_id).await?.ok_or_else(|| {
        ApiError::not_found(format!(
            "department [{dept_id}] not found in organization [{org_id}]"
        ))
    })
}

/// Department info.
async fn get_department_info(
    State(state): State<ApiState>,
    Path((org_id, dept_id)): Path<(OrgId, DepartmentId)>,
) -> ApiResult<Department> {
    let department = load_department(&state, org_id, dept_id).await?;
    Ok(Json(ApiResponse::success(department)))
}

/// Performance statistics over the department's employees.
async fn department_performance_stats(
    State(state): State<ApiState>,
    Path((org_id, dept_id)): Path<(OrgId, DepartmentId)>,
) -> ApiResult<DeptStats> {
    let department = load_department(&state, org_id, dept_id).await?;
    Ok(Json(ApiResponse::success(department.performance_stats())))
}

/// Salary statistics over the department's employees.
async fn department_salary_stats(
    State(state): State<ApiState>,
    Path((org_id, dept_id)): Path<(OrgId, DepartmentId)>,
) -> ApiResult<DeptStats> {
    let department = load_department(&state, org_id, dept_id).await?;
    Ok(Json(ApiResponse::success(department.salary_stats())))
}

/// Assign or clear the department head.
async fn set_department_head(
    State(state): State<ApiState>,
    Path((org_id, dept_id)): Path<(OrgId, DepartmentId)>,
    Json(request): Json<SetHeadRequest>,
) -> ApiResult<Department> {
    let facade = state.registry().get_instance(org_id).await?;
    let mut department = load_department(&state, org_id, dept_id).await?;
    department.set_head(request.head_id)?;

    if !facade.update_department(&department).await? {
        return Err(ApiError::update_failed(format!(
            "failed to update department [{dept_id}]"
        )));
    }
    Ok(Json(ApiResponse::success(department)))
}

/// Hire a new employee into the department.
async fn hire_employee(
    State(state): State<ApiState>,
    Path((org_id, dept_id)): Path<(OrgId, DepartmentId)>,
    Json(request): Json<HireEmployeeRequest>,
) -> ApiResult<Employee> {
    let facade = state.registry().get_instance(org_id).await?;
    // confirm the department before attempting the write, so an unknown
    // target is a 404 rather than a failed update
    load_department(&state, org_id, dept_id).await?;

    let employee = Employee::with_details(
        request.id,
        request.name,
        request.hire_date,
        request.position.as_deref(),
        request.salary,
        request.performance,
    )?;

    if !facade.add_employee_to_department(dept_id, &employee).await? {
        return Err(ApiError::update_failed(format!(
            "failed to add employee [{}]: ID already taken in organization [{org_id}]",
            employee.id()
        )));
    }
    Ok(Json(ApiResponse::success(employee)))
}

/// Create department routes
pub fn departments_routes(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/organizations/:org_id/departments/:dept_id",
            get(get_department_info),
        )
        .route(
            "/api/v1/organizations/:org_id/departments/:dept_id/stats/performance",
            get(department_performance_stats),
        )
        .route(
            "/api/v1/organizations/:org_id/departments/:dept_id/stats/salary",
            get(department_salary_stats),
        )
        .route(
            "/api/v1/organizations/:org_id/departments/:dept_id/head",
            put(set_department_head),
        )
        .route(
            "/api/v1/organizations/:org_id/departments/:dept_id/employees",
            post(hire_employee),
        )
        .with_state(state)
}
