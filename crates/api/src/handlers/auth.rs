//! Handlers for the `/auth` resource (register, login, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fibem_core::draft::RegistrationDraft;
use fibem_core::error::CoreError;
use fibem_core::role::Role;
use fibem_core::wizard::{self, MAX_STEP};

use crate::accounts::Account;
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::sessions::PaymentState;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` -- the contract the web client
/// submits at the end of the wizard.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// 1-based wizard step the client submitted from; must be the last step.
    pub step: u8,
    /// The full draft aggregated across the wizard.
    pub registration_data: RegistrationDraft,
    /// The wizard session this submission concludes. Required for paying,
    /// non-trial roles: the session must carry a succeeded payment.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Response body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account info embedded in [`AuthResponse`] and `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<&Account> for UserInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// A register outcome the client acts on: `success: false` plus a message.
fn rejected(status: StatusCode, message: String) -> (StatusCode, Json<RegisterResponse>) {
    (
        status,
        Json(RegisterResponse {
            success: false,
            error: Some(message),
            redirect_to: None,
        }),
    )
}

/// POST /api/auth/register
///
/// Final wizard submission. Re-validates the full draft server-side, checks
/// the session's payment outcome for paying non-trial roles, hashes the
/// password, and creates the account. On success the client is pointed at
/// the dashboard (`?trial=true` for trial signups). Client-facing failures
/// keep the `{ success, error }` contract rather than the generic error
/// envelope.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    if input.step != MAX_STEP {
        return Ok(rejected(
            StatusCode::BAD_REQUEST,
            format!(
                "Registration submits from step {MAX_STEP}, got step {}",
                input.step
            ),
        ));
    }

    let draft = input.registration_data;

    // A lying or stale session id counts the same as no payment at all.
    let payment_completed = match input.session_id {
        Some(session_id) => state
            .sessions
            .get(session_id)
            .await
            .is_ok_and(|s| matches!(s.payment, PaymentState::Succeeded { .. })),
        None => false,
    };

    if let Err(err) = wizard::validate_submission(&draft, payment_completed) {
        return Ok(rejected(StatusCode::BAD_REQUEST, err.to_string()));
    }

    // validate_submission guarantees a role.
    let role = draft
        .role
        .ok_or_else(|| AppError::InternalError("Validated draft without a role".into()))?;

    let password_hash = hash_password(&draft.user_info.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let on_trial = draft.use_trial && !role.is_free();
    let account = Account {
        id: Uuid::new_v4(),
        email: draft.user_info.email.clone(),
        password_hash,
        first_name: draft.user_info.first_name.clone(),
        last_name: draft.user_info.last_name.clone(),
        role,
        plan_id: if role.is_free() { None } else { draft.plan_id.clone() },
        on_trial,
        created_at: Utc::now(),
    };
    let account_id = account.id;
    match state.accounts.insert(account).await {
        Ok(()) => {}
        Err(CoreError::Conflict(message)) => {
            return Ok(rejected(StatusCode::CONFLICT, message));
        }
        Err(err) => return Err(AppError::Core(err)),
    }

    // The wizard run is complete; its session has served its purpose.
    if let Some(session_id) = input.session_id {
        state.sessions.remove(session_id).await.ok();
    }

    tracing::info!(
        account_id = %account_id,
        role = role.as_str(),
        on_trial,
        "Account registered"
    );

    let redirect_to = if on_trial {
        "/dashboard?trial=true".to_string()
    } else {
        "/dashboard".to_string()
    };

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            error: None,
            redirect_to: Some(redirect_to),
        }),
    ))
}

/// POST /api/auth/login
///
/// Credentials sign-in. Returns an access token and the public profile.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let account = state
        .accounts
        .find_by_email(&input.email)
        .await
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let access_token = generate_access_token(account.id, account.role.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(account_id = %account.id, "Login succeeded");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(&account),
    }))
}

/// GET /api/auth/me
///
/// Profile of the authenticated account.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserInfo>> {
    let account = state
        .accounts
        .find_by_id(auth.account_id)
        .await
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    Ok(Json(UserInfo::from(&account)))
}
