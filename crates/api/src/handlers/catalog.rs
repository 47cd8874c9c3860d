//! Handlers for the static catalog: roles with capabilities, and plans.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use fibem_core::capabilities::{capabilities_for, RoleCapabilities};
use fibem_core::catalog::{plans_for_role, SubscriptionPlan};
use fibem_core::role::{Role, RoleCategory, ALL_ROLES};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One role entry in `GET /catalog/roles`.
#[derive(Debug, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    pub category: RoleCategory,
    pub is_free: bool,
    pub capabilities: &'static RoleCapabilities,
}

/// Query parameters for `GET /catalog/plans`.
#[derive(Debug, Deserialize)]
pub struct PlansParams {
    pub role: Role,
}

/// GET /api/catalog/roles
///
/// All registerable roles in presentation order, with display copy and the
/// permission/limit table.
pub async fn list_roles(State(_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let roles: Vec<RoleInfo> = ALL_ROLES
        .iter()
        .map(|&role| RoleInfo {
            role,
            label: role.label(),
            description: role.description(),
            category: role.category(),
            is_free: role.is_free(),
            capabilities: capabilities_for(role),
        })
        .collect();

    Ok(Json(DataResponse { data: roles }))
}

/// GET /api/catalog/plans?role=...
///
/// Plans available to a role, in display order. Empty for free roles.
pub async fn list_plans(
    State(_state): State<AppState>,
    Query(params): Query<PlansParams>,
) -> AppResult<impl IntoResponse> {
    let plans: Vec<&'static SubscriptionPlan> = plans_for_role(params.role);
    Ok(Json(DataResponse { data: plans }))
}
