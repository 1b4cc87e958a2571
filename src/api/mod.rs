//! Web API module for orgdir
//!
//! The command layer: translates HTTP requests into facade registry and
//! facade calls and maps core errors to transport codes. Handlers never
//! touch the storage connection directly.

pub mod departments;
pub mod employees;
pub mod health;
pub mod organizations;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use orgdir_core::{Error, FacadeRegistry};
use serde::Serialize;
use std::sync::Arc;

pub use departments::departments_routes;
pub use employees::employees_routes;
pub use health::health_routes;
pub use organizations::organizations_routes;

/// Shared handler state: the facade registry every request goes through.
#[derive(Clone)]
pub struct ApiState {
    registry: Arc<FacadeRegistry>,
}

impl ApiState {
    /// Create the API state around a registry.
    pub fn new(registry: Arc<FacadeRegistry>) -> Self {
        Self { registry }
    }

    /// The facade registry.
    pub fn registry(&self) -> &FacadeRegistry {
        &self.registry
    }
}

/// Uniform response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler: a status code plus the envelope.
///
/// Core errors carry their own category; absent read results and rejected
/// writes are `Ok` values in the core and are converted here, at the
/// boundary.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 404 for an absent employee/department or a failed removal.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// 500 for a write that returned `false` after the target was read.
    pub fn update_failed(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Status code this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Error message placed in the envelope.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::OrgNotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Configuration(_) | Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

/// Handler result alias.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Create the API router with all endpoints
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(organizations_routes(state.clone()))
        .merge(departments_routes(state.clone()))
        .merge(employees_routes(state))
}
