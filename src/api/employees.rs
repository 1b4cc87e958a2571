//! Employees API endpoints
//!
//! GET /api/v1/organizations/:org_id/employees/:emp_id             - Employee info
//! PUT /api/v1/organizations/:org_id/employees/:emp_id/position    - Set position
//! PUT /api/v1/organizations/:org_id/employees/:emp_id/salary      - Set salary
//! PUT /api/v1/organizations/:org_id/employees/:emp_id/performance - Set performance

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use orgdir_core::{Employee, EmployeeId, OrgFacade, OrgId};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, ApiResult, ApiState};

/// Request to set an employee's position.
#[derive(Debug, Deserialize)]
pub struct SetPositionRequest {
    /// New position; empty resets to the default
    pub position: String,
}

/// Request to set an employee's salary.
#[derive(Debug, Deserialize)]
pub struct SetSalaryRequest {
    /// New salary, non-negative
    pub salary: f64,
}

/// Request to set an employee's performance score.
#[derive(Debug, Deserialize)]
pub struct SetPerformanceRequest {
    /// New performance score, within [0, 100]
    pub performance: f64,
}

async fn load_employee(
    state: &ApiState,
    org_id: OrgId,
    emp_id: EmployeeId,
) -> Result<(Arc<OrgFacade>, Employee), ApiError> {
    let facade = state.registry().get_instance(org_id).await?;
    let employee = facade.get_employee(emp_id).await?.ok_or_else(|| {
        ApiError::not_found(format!(
            "employee [{emp_id}] not found in organization [{org_id}]"
        ))
    })?;
    Ok((facade, employee))
}

async fn store_employee(facade: &OrgFacade, employee: &Employee) -> Result<(), ApiError> {
    if !facade.update_employee(employee).await? {
        return Err(ApiError::update_failed(format!(
            "failed to update employee [{}]",
            employee.id()
        )));
    }
    Ok(())
}

/// Employee info.
async fn get_employee_info(
    State(state): State<ApiState>,
    Path((org_id, emp_id)): Path<(OrgId, EmployeeId)>,
) -> ApiResult<Employee> {
    let (_, employee) = load_employee(&state, org_id, emp_id).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// Set an employee's position.
async fn set_employee_position(
    State(state): State<ApiState>,
    Path((org_id, emp_id)): Path<(OrgId, EmployeeId)>,
    Json(request): Json<SetPositionRequest>,
) -> ApiResult<Employee> {
    let (facade, mut employee) = load_employee(&state, org_id, emp_id).await?;
    employee.set_position(&request.position);
    store_employee(&facade, &employee).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// Set an employee's salary.
async fn set_employee_salary(
    State(state): State<ApiState>,
    Path((org_id, emp_id)): Path<(OrgId, EmployeeId)>,
    Json(request): Json<SetSalaryRequest>,
) -> ApiResult<Employee> {
    let (facade, mut employee) = load_employee(&state, org_id, emp_id).await?;
    employee.set_salary(request.salary)?;
    store_employee(&facade, &employee).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// Set an employee's performance score.
async fn set_employee_performance(
    State(state): State<ApiState>,
    Path((org_id, emp_id)): Path<(OrgId, EmployeeId)>,
    Json(request): Json<SetPerformanceRequest>,
) -> ApiResult<Employee> {
    let (facade, mut employee) = load_employee(&state, org_id, emp_id).await?;
    employee.set_performance(request.performance)?;
    store_employee(&facade, &employee).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// Create employee routes
pub fn employees_routes(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/organizations/:org_id/employees/:emp_id",
            get(get_employee_info),
        )
        .route(
            "/api/v1/organizations/:org_id/employees/:emp_id/position",
            put(set_employee_position),
        )
        .route(
            "/api/v1/organizations/:org_id/employees/:emp_id/salary",
            put(set_employee_salary),
        )
        .route(
            "/api/v1/organizations/:org_id/employees/:emp_id/performance",
            put(set_employee_performance),
        )
        .with_state(state)
}
