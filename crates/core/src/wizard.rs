//! Registration wizard step machine and per-step validators.
//!
//! Four ordered steps. Forward navigation is gated by the current step's
//! validator; backward navigation to any earlier step is unconditional and
//! never clears data. Validation failure is preventive: the caller gets a
//! `Validation` error naming the blocked step, not a field-level report.

use serde::{Deserialize, Serialize};

use crate::draft::RegistrationDraft;
use crate::error::CoreError;
use crate::payment::is_adult_today;
use crate::role::RoleCategory;

/// Minimum password length accepted at step 2.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The four wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    /// Step 1: profile / role selection.
    Profile,
    /// Step 2: personal and role-specific information.
    Details,
    /// Step 3: subscription plan selection.
    Plan,
    /// Step 4: payment and final confirmation.
    Payment,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 4;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl RegistrationStep {
    /// Convert a 1-based step number to a `RegistrationStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Profile),
            2 => Ok(Self::Details),
            3 => Ok(Self::Plan),
            4 => Ok(Self::Payment),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Profile => 1,
            Self::Details => 2,
            Self::Plan => 3,
            Self::Payment => 4,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Details => "Your Information",
            Self::Plan => "Plan",
            Self::Payment => "Payment",
        }
    }
}

// ---------------------------------------------------------------------------
// Step validators
// ---------------------------------------------------------------------------

/// Step 1 gate: a role must be selected.
pub fn can_leave_profile(draft: &RegistrationDraft) -> bool {
    draft.role.is_some()
}

/// Step 2 gate: the canonical details validator.
///
/// Requires the always-required account fields, accepted terms, a password of
/// at least [`MIN_PASSWORD_LENGTH`] matching its confirmation, the
/// role-conditional mandatory fields, and (for candidates with a birth date)
/// a calendar age of at least 18.
pub fn can_leave_details(draft: &RegistrationDraft) -> bool {
    let Some(role) = draft.role else {
        return false;
    };
    let user = &draft.user_info;

    let base_ok = !user.email.is_empty()
        && !user.password.is_empty()
        && !user.first_name.is_empty()
        && !user.last_name.is_empty()
        && user.accept_terms;
    if !base_ok {
        return false;
    }

    if user.password.len() < MIN_PASSWORD_LENGTH || user.password != user.confirm_password {
        return false;
    }

    match role.category() {
        RoleCategory::Company => draft
            .company_details()
            .is_some_and(|c| !c.company_name.is_empty() && !c.siret_siren.is_empty()),
        RoleCategory::Candidate => draft.candidate_details().is_some_and(|c| {
            !c.current_status.is_empty()
                && c.birth_date.is_none_or(is_adult_today)
        }),
        RoleCategory::Freelancer => draft
            .freelancer_details()
            .is_some_and(|f| !f.business_name.is_empty()),
        RoleCategory::Individual => true,
    }
}

/// Step 3 gate: a plan must be chosen unless the role registers for free.
pub fn can_leave_plan(draft: &RegistrationDraft) -> bool {
    match draft.role {
        Some(role) if role.is_free() => true,
        Some(role) => draft
            .plan_id
            .as_deref()
            .is_some_and(|id| crate::catalog::find_plan(role, id).is_some()),
        None => false,
    }
}

/// Whether `advance()` from the given step is currently permitted.
///
/// Step 4 has no forward validator; submission is the terminal action.
pub fn can_advance(step: RegistrationStep, draft: &RegistrationDraft) -> bool {
    match step {
        RegistrationStep::Profile => can_leave_profile(draft),
        RegistrationStep::Details => can_leave_details(draft),
        RegistrationStep::Plan => can_leave_plan(draft),
        RegistrationStep::Payment => false,
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Validate a forward transition from `current`, returning the next step.
pub fn validate_advance(
    current: RegistrationStep,
    draft: &RegistrationDraft,
) -> Result<RegistrationStep, CoreError> {
    if current == RegistrationStep::Payment {
        return Err(CoreError::Validation(
            "Already on the final step; submit the registration instead".to_string(),
        ));
    }
    if !can_advance(current, draft) {
        return Err(CoreError::Validation(format!(
            "Step {} ({}) is incomplete",
            current.to_number(),
            current.label()
        )));
    }
    RegistrationStep::from_number(current.to_number() + 1)
}

/// Validate a backward transition to any earlier step.
///
/// Backward navigation is unconditional and clears nothing; only the
/// direction is checked.
pub fn validate_retreat(
    current: RegistrationStep,
    target: RegistrationStep,
) -> Result<(), CoreError> {
    if target >= current {
        return Err(CoreError::Validation(format!(
            "Cannot go back from step {} to step {}",
            current.to_number(),
            target.to_number()
        )));
    }
    Ok(())
}

/// Full-draft check run at final submission.
///
/// Re-runs every step gate against the submitted aggregate so a client
/// cannot skip ahead by posting directly. `payment_completed` reports
/// whether a successful payment was recorded for this run of the wizard;
/// paying roles that are not trialing must have one before an account may
/// be created.
pub fn validate_submission(
    draft: &RegistrationDraft,
    payment_completed: bool,
) -> Result<(), CoreError> {
    if !can_leave_profile(draft) {
        return Err(CoreError::Validation("No role selected".to_string()));
    }
    if !can_leave_details(draft) {
        return Err(CoreError::Validation(
            "Personal information is incomplete".to_string(),
        ));
    }
    if !can_leave_plan(draft) {
        return Err(CoreError::Validation(
            "No subscription plan selected".to_string(),
        ));
    }
    let payment_required = draft.role.is_some_and(|r| !r.is_free()) && !draft.use_trial;
    if payment_required && !payment_completed {
        return Err(CoreError::Validation(
            "Payment has not been completed".to_string(),
        ));
    }
    Ok(())
}
