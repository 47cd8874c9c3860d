pub mod auth;
pub mod catalog;
pub mod health;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/*                     register, login, me
/// /registration/sessions/*    wizard sessions
/// /catalog/*                  roles, plans
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/registration/sessions", registration::router())
        .nest("/catalog", catalog::router())
}
