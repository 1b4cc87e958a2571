//! Organizations API endpoints
//!
//! GET    /api/v1/organizations/:org_id - Organization info with departments
//! DELETE /api/v1/organizations/:org_id - Remove organization data and facade

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use orgdir_core::{Organization, OrgId};
use serde::Serialize;

use super::{ApiError, ApiResponse, ApiResult, ApiState};

/// Response from removing an organization.
#[derive(Debug, Serialize)]
pub struct RemoveOrgResponse {
    pub org_id: OrgId,
    pub removed: bool,
}

/// Organization info.
async fn get_org_info(
    State(state): State<ApiState>,
    Path(org_id): Path<OrgId>,
) -> ApiResult<Organization> {
    let facade = state.registry().get_instance(org_id).await?;
    match facade.get_organization().await? {
        Some(organization) => Ok(Json(ApiResponse::success(organization))),
        // removed between facade creation and this read
        None => Err(ApiError::not_found(format!(
            "organization [{org_id}] not found"
        ))),
    }
}

/// Remove an organization.
async fn remove_organization(
    State(state): State<ApiState>,
    Path(org_id): Path<OrgId>,
) -> ApiResult<RemoveOrgResponse> {
    if !state.registry().remove_organization(org_id).await? {
        return Err(ApiError::not_found(format!(
            "organization [{org_id}] not found"
        )));
    }
    Ok(Json(ApiResponse::success(RemoveOrgResponse {
        org_id,
        removed: true,
    })))
}

/// Create organization routes
pub fn organizations_routes(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/organizations/:org_id",
            get(get_org_info).delete(remove_organization),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::seeded_state;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_org_info() {
        let state = seeded_state();
        let response = get_org_info(State(state), Path(1)).await.unwrap();
        assert!(response.0.success);
        let org = response.0.data.unwrap();
        assert_eq!(org.name(), "Acme Logistics");
        assert_eq!(org.departments().len(), 2);
    }

    #[tokio::test]
    async fn test_get_unknown_org_is_404() {
        let state = seeded_state();
        let err = get_org_info(State(state), Path(999)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_then_lookup() {
        let state = seeded_state();
        let response = remove_organization(State(state.clone()), Path(1))
            .await
            .unwrap();
        assert!(response.0.data.unwrap().removed);

        let err = get_org_info(State(state.clone()), Path(1)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = remove_organization(State(state), Path(1)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
