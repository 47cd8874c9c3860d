//! Route definitions for the static catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET /roles        -> list_roles
/// GET /plans?role=  -> list_plans
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(catalog::list_roles))
        .route("/plans", get(catalog::list_plans))
}
