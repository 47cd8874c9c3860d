//! Route definitions for the registration wizard.
//!
//! Mounted at `/registration/sessions` by `api_routes()`.
//!
//! ```text
//! POST   /                         create_session
//! GET    /{id}                     get_session
//! PUT    /{id}/role                set_role
//! PUT    /{id}/user-info           update_user_info
//! PUT    /{id}/company-info        update_company_info
//! PUT    /{id}/candidate-info      update_candidate_info
//! PUT    /{id}/freelancer-info     update_freelancer_info
//! PUT    /{id}/plan                set_plan
//! POST   /{id}/advance             advance
//! POST   /{id}/back                go_back
//! POST   /{id}/payment             submit_payment
//! POST   /{id}/abandon             abandon_session
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Registration wizard routes -- mounted at `/registration/sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registration::create_session))
        .route("/{id}", get(registration::get_session))
        .route("/{id}/role", put(registration::set_role))
        .route("/{id}/user-info", put(registration::update_user_info))
        .route("/{id}/company-info", put(registration::update_company_info))
        .route(
            "/{id}/candidate-info",
            put(registration::update_candidate_info),
        )
        .route(
            "/{id}/freelancer-info",
            put(registration::update_freelancer_info),
        )
        .route("/{id}/plan", put(registration::set_plan))
        .route("/{id}/advance", post(registration::advance))
        .route("/{id}/back", post(registration::go_back))
        .route("/{id}/payment", post(registration::submit_payment))
        .route("/{id}/abandon", post(registration::abandon_session))
}
