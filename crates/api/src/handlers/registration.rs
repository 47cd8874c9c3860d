//! Handlers for the registration wizard sessions.
//!
//! One merge-update endpoint per draft sub-record, scalar setters for role
//! and plan choice, gated forward navigation, unconditional backward
//! navigation, and the step-4 payment submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use fibem_core::catalog::{find_plan, BillingPeriod};
use fibem_core::draft::{
    CandidateInfoPatch, CompanyInfoPatch, FreelancerInfoPatch, UserInfoPatch,
};
use fibem_core::error::CoreError;
use fibem_core::payment::{compute_total, validate_method, PaymentMethod};
use fibem_core::role::Role;
use fibem_core::wizard::{self, RegistrationStep};

use crate::error::{AppError, AppResult};
use crate::gateway::ChargeOutcome;
use crate::response::DataResponse;
use crate::sessions::{PaymentState, RegistrationSession};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `PUT /registration/sessions/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleBody {
    pub role: Role,
}

/// Body for `PUT /registration/sessions/{id}/plan`.
///
/// `plan_id` distinguishes "absent" (keep the current choice) from an
/// explicit `null` (clear the choice), hence the nested `Option`.
#[derive(Debug, Deserialize)]
pub struct SetPlanBody {
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub plan_id: Option<Option<String>>,
    pub billing_period: Option<BillingPeriod>,
    pub use_trial: Option<bool>,
}

/// Present fields deserialize to `Some(..)` even when the value is `null`;
/// absent fields fall back to the `None` default.
fn deserialize_explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body for `POST /registration/sessions/{id}/back`.
#[derive(Debug, Deserialize)]
pub struct GoBackBody {
    /// 1-based target step; must be earlier than the current step.
    pub to_step: u8,
}

/// Body for `POST /registration/sessions/{id}/payment`.
///
/// Trial and free-role submissions may omit the method; nothing is charged.
#[derive(Debug, Deserialize)]
pub struct SubmitPaymentBody {
    pub method: Option<PaymentMethod>,
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /registration/sessions
///
/// Start a new wizard session on step 1 with an empty draft.
pub async fn create_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.sessions.create().await;
    tracing::info!(session_id = %session.id, "Registration session created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /registration/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /registration/sessions/{id}/abandon
///
/// Discard the session and everything collected so far. Returns 204.
pub async fn abandon_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.sessions.remove(id).await?;
    tracing::info!(session_id = %id, "Registration session abandoned");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Draft updates
// ---------------------------------------------------------------------------

/// PUT /registration/sessions/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetRoleBody>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .sessions
        .update(id, |session| {
            session.draft.set_role(body.role);
            Ok(session.clone())
        })
        .await?;

    tracing::info!(session_id = %id, role = body.role.as_str(), "Role selected");
    Ok(Json(DataResponse { data: session }))
}

/// PUT /registration/sessions/{id}/user-info
pub async fn update_user_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UserInfoPatch>,
) -> AppResult<impl IntoResponse> {
    patch
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let session = state
        .sessions
        .update(id, |session| {
            session.draft.apply_user_info(patch);
            Ok(session.clone())
        })
        .await?;

    tracing::debug!(session_id = %id, "User info updated");
    Ok(Json(DataResponse { data: session }))
}

/// PUT /registration/sessions/{id}/company-info
pub async fn update_company_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CompanyInfoPatch>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .sessions
        .update(id, |session| {
            session.draft.apply_company_info(patch)?;
            Ok(session.clone())
        })
        .await?;

    tracing::debug!(session_id = %id, "Company info updated");
    Ok(Json(DataResponse { data: session }))
}

/// PUT /registration/sessions/{id}/candidate-info
pub async fn update_candidate_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CandidateInfoPatch>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .sessions
        .update(id, |session| {
            session.draft.apply_candidate_info(patch)?;
            Ok(session.clone())
        })
        .await?;

    tracing::debug!(session_id = %id, "Candidate info updated");
    Ok(Json(DataResponse { data: session }))
}

/// PUT /registration/sessions/{id}/freelancer-info
pub async fn update_freelancer_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FreelancerInfoPatch>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .sessions
        .update(id, |session| {
            session.draft.apply_freelancer_info(patch)?;
            Ok(session.clone())
        })
        .await?;

    tracing::debug!(session_id = %id, "Freelancer info updated");
    Ok(Json(DataResponse { data: session }))
}

/// PUT /registration/sessions/{id}/plan
pub async fn set_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetPlanBody>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .sessions
        .update(id, |session| {
            if let Some(plan_id) = body.plan_id {
                session.draft.set_plan(plan_id);
            }
            if let Some(period) = body.billing_period {
                session.draft.set_billing_period(period);
            }
            if let Some(use_trial) = body.use_trial {
                session.draft.set_use_trial(use_trial);
            }
            Ok(session.clone())
        })
        .await?;

    tracing::info!(
        session_id = %id,
        plan_id = session.draft.plan_id.as_deref().unwrap_or("-"),
        use_trial = session.draft.use_trial,
        "Plan choice updated"
    );
    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// POST /registration/sessions/{id}/advance
///
/// Move forward one step. Gated by the current step's validator; an
/// incomplete step leaves the session unchanged.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .sessions
        .update(id, |session| {
            let next = wizard::validate_advance(session.current_step, &session.draft)?;
            let from = session.current_step;
            session.current_step = next;
            tracing::info!(
                session_id = %session.id,
                from_step = from.to_number(),
                to_step = next.to_number(),
                "Registration session advanced"
            );
            Ok(session.clone())
        })
        .await?;

    Ok(Json(DataResponse { data: session }))
}

/// POST /registration/sessions/{id}/back
///
/// Move back to any earlier step. Unconditional; clears nothing.
pub async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<GoBackBody>,
) -> AppResult<impl IntoResponse> {
    let target = RegistrationStep::from_number(body.to_step)?;

    let session = state
        .sessions
        .update(id, |session| {
            wizard::validate_retreat(session.current_step, target)?;
            let from = session.current_step;
            session.current_step = target;
            tracing::info!(
                session_id = %session.id,
                from_step = from.to_number(),
                to_step = target.to_number(),
                "Registration session went back"
            );
            Ok(session.clone())
        })
        .await?;

    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// Outcome of the locked preflight: either the attempt settled in place
/// (trial/free) or a charge was planned and the session marked processing.
enum Preflight {
    Settled(RegistrationSession),
    Charge {
        method: PaymentMethod,
        amount_cents: i64,
        total: f64,
    },
}

/// POST /registration/sessions/{id}/payment
///
/// Step-4 submission. Trial and free-role flows complete immediately without
/// touching the gateway. Paid flows validate the method locally, then charge
/// through the gateway; a decline is recorded on the session and returned as
/// a normal outcome so the client can retry.
///
/// The step check, the in-progress conflict check, and the transition to
/// `processing` all happen inside one `update` closure; a second concurrent
/// submit cannot slip between them and trigger a double charge.
pub async fn submit_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitPaymentBody>,
) -> AppResult<impl IntoResponse> {
    let method = body.method;
    let preflight = state
        .sessions
        .update(id, move |session| {
            if session.current_step != RegistrationStep::Payment {
                return Err(CoreError::Validation(format!(
                    "Payment is only available on step {} ({})",
                    RegistrationStep::Payment.to_number(),
                    RegistrationStep::Payment.label()
                )));
            }
            if matches!(session.payment, PaymentState::Processing) {
                return Err(CoreError::Conflict(
                    "A payment attempt is already in progress".to_string(),
                ));
            }

            let role = session
                .draft
                .role
                .ok_or_else(|| CoreError::Validation("No role selected".to_string()))?;

            // Trial and free-role paths settle under the same lock.
            if role.is_free() || session.draft.use_trial {
                session.payment = PaymentState::Succeeded {
                    charge_id: None,
                    total: 0.0,
                };
                return Ok(Preflight::Settled(session.clone()));
            }

            let plan_id = session.draft.plan_id.as_deref().ok_or_else(|| {
                CoreError::Validation("No subscription plan selected".to_string())
            })?;
            let plan = find_plan(role, plan_id).ok_or_else(|| CoreError::NotFound {
                entity: "SubscriptionPlan",
                id: plan_id.to_string(),
            })?;

            let method = method
                .ok_or_else(|| CoreError::Validation("A payment method is required".to_string()))?;
            validate_method(&method)?;

            let total = compute_total(Some(plan), session.draft.billing_period, false);
            session.payment = PaymentState::Processing;
            Ok(Preflight::Charge {
                method,
                amount_cents: (total * 100.0).round() as i64,
                total,
            })
        })
        .await?;

    let (method, amount_cents, total) = match preflight {
        Preflight::Settled(session) => {
            tracing::info!(session_id = %id, "Payment skipped (trial/free)");
            return Ok(Json(DataResponse { data: session }));
        }
        Preflight::Charge {
            method,
            amount_cents,
            total,
        } => (method, amount_cents, total),
    };

    match state.gateway.charge(amount_cents, &method).await {
        Ok(ChargeOutcome::Approved { charge_id }) => {
            let session = record_payment(
                &state,
                id,
                PaymentState::Succeeded {
                    charge_id: Some(charge_id),
                    total,
                },
            )
            .await?;
            tracing::info!(session_id = %id, amount_cents, "Payment approved");
            Ok(Json(DataResponse { data: session }))
        }
        Ok(ChargeOutcome::Declined { reason }) => {
            let session =
                record_payment(&state, id, PaymentState::Failed { reason: reason.clone() })
                    .await?;
            tracing::info!(session_id = %id, reason = %reason, "Payment declined");
            Ok(Json(DataResponse { data: session }))
        }
        Err(err) => {
            record_payment(
                &state,
                id,
                PaymentState::Failed {
                    reason: "Payment provider unavailable".to_string(),
                },
            )
            .await?;
            Err(AppError::Gateway(err))
        }
    }
}

/// Record the final payment state on the session and return a snapshot.
async fn record_payment(
    state: &AppState,
    id: Uuid,
    payment: PaymentState,
) -> Result<RegistrationSession, CoreError> {
    state
        .sessions
        .update(id, |session| {
            session.payment = payment;
            Ok(session.clone())
        })
        .await
}
