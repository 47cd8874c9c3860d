//! The registration draft aggregate built up across the wizard steps.
//!
//! Role-conditional profile data is a tagged union keyed by the role
//! category, so a candidate draft cannot carry a `company_name`. The draft
//! is mutated only through the named merge-update operations; each one is a
//! shallow merge that preserves fields absent from the patch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::BillingPeriod;
use crate::error::CoreError;
use crate::role::{Role, RoleCategory};

// ---------------------------------------------------------------------------
// Sub-records
// ---------------------------------------------------------------------------

/// Account fields collected in step 2, required for every role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub accept_terms: bool,
    pub accept_marketing: bool,
}

/// Company profile for POS and recruitment company roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetails {
    pub company_name: String,
    pub siret_siren: String,
    pub company_size: String,
    pub industry: String,
}

/// Job-seeker profile for candidate roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateDetails {
    pub current_status: String,
    pub birth_date: Option<NaiveDate>,
    pub skills: Vec<String>,
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub remote_work: bool,
    pub years_experience: u32,
}

/// Independent-professional profile for freelancer roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreelancerDetails {
    pub business_name: String,
    pub siret_siren: String,
    pub profession: String,
    pub daily_rate: Option<f64>,
}

/// Role-conditional profile data, keyed by role category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum RoleDetails {
    Company(CompanyDetails),
    Candidate(CandidateDetails),
    Freelancer(FreelancerDetails),
    #[default]
    None,
}

impl RoleDetails {
    /// The empty sub-record for a role category.
    pub fn default_for(category: RoleCategory) -> Self {
        match category {
            RoleCategory::Company => Self::Company(CompanyDetails::default()),
            RoleCategory::Candidate => Self::Candidate(CandidateDetails::default()),
            RoleCategory::Freelancer => Self::Freelancer(FreelancerDetails::default()),
            RoleCategory::Individual => Self::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// Shallow-merge patch for [`UserInfo`]. `None` fields keep the draft value.
///
/// Format rules (email shape) are checked here via `validator`; presence and
/// cross-field rules belong to the step-2 wizard gate.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserInfoPatch {
    #[validate(email)]
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub accept_terms: Option<bool>,
    pub accept_marketing: Option<bool>,
}

/// Shallow-merge patch for [`CompanyDetails`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyInfoPatch {
    pub company_name: Option<String>,
    pub siret_siren: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
}

/// Shallow-merge patch for [`CandidateDetails`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateInfoPatch {
    pub current_status: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub skills: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub job_types: Option<Vec<String>>,
    pub remote_work: Option<bool>,
    pub years_experience: Option<u32>,
}

/// Shallow-merge patch for [`FreelancerDetails`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FreelancerInfoPatch {
    pub business_name: Option<String>,
    pub siret_siren: Option<String>,
    pub profession: Option<String>,
    pub daily_rate: Option<f64>,
}

macro_rules! merge {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Everything collected across the four wizard steps.
///
/// Created empty when a wizard session starts and discarded after a
/// successful submission; there is no persistence or resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationDraft {
    pub role: Option<Role>,
    pub user_info: UserInfo,
    pub details: RoleDetails,
    pub plan_id: Option<String>,
    pub billing_period: BillingPeriod,
    pub use_trial: bool,
}

impl RegistrationDraft {
    /// Select (or change) the role.
    ///
    /// Changing to a role of a different category resets the role-conditional
    /// sub-record and the plan choice; both are scoped to the old role and
    /// would otherwise go stale. Within-category changes keep them.
    pub fn set_role(&mut self, role: Role) {
        let category_changed = self.role.map(|r| r.category()) != Some(role.category());
        self.role = Some(role);
        if category_changed {
            self.details = RoleDetails::default_for(role.category());
            self.plan_id = None;
        }
    }

    pub fn set_plan(&mut self, plan_id: Option<String>) {
        self.plan_id = plan_id;
    }

    pub fn set_billing_period(&mut self, period: BillingPeriod) {
        self.billing_period = period;
    }

    pub fn set_use_trial(&mut self, use_trial: bool) {
        self.use_trial = use_trial;
    }

    /// Merge account fields collected in step 2.
    pub fn apply_user_info(&mut self, patch: UserInfoPatch) {
        merge!(
            self.user_info,
            patch,
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            phone,
            accept_terms,
            accept_marketing,
        );
    }

    /// Merge company profile fields. Fails unless the selected role is a
    /// company-category role.
    pub fn apply_company_info(&mut self, patch: CompanyInfoPatch) -> Result<(), CoreError> {
        self.require_category(RoleCategory::Company, "company")?;
        if !matches!(self.details, RoleDetails::Company(_)) {
            self.details = RoleDetails::Company(CompanyDetails::default());
        }
        if let RoleDetails::Company(details) = &mut self.details {
            merge!(details, patch, company_name, siret_siren, company_size, industry);
        }
        Ok(())
    }

    /// Merge candidate profile fields. Fails unless the selected role is a
    /// candidate role. `birth_date` is merge-only like every other field: a
    /// patch without one keeps the existing value.
    pub fn apply_candidate_info(&mut self, patch: CandidateInfoPatch) -> Result<(), CoreError> {
        self.require_category(RoleCategory::Candidate, "candidate")?;
        if !matches!(self.details, RoleDetails::Candidate(_)) {
            self.details = RoleDetails::Candidate(CandidateDetails::default());
        }
        if let RoleDetails::Candidate(details) = &mut self.details {
            if let Some(birth_date) = patch.birth_date {
                details.birth_date = Some(birth_date);
            }
            merge!(
                details,
                patch,
                current_status,
                skills,
                locations,
                job_types,
                remote_work,
                years_experience,
            );
        }
        Ok(())
    }

    /// Merge freelancer profile fields. Fails unless the selected role is a
    /// freelancer role.
    pub fn apply_freelancer_info(&mut self, patch: FreelancerInfoPatch) -> Result<(), CoreError> {
        self.require_category(RoleCategory::Freelancer, "freelancer")?;
        if !matches!(self.details, RoleDetails::Freelancer(_)) {
            self.details = RoleDetails::Freelancer(FreelancerDetails::default());
        }
        if let RoleDetails::Freelancer(details) = &mut self.details {
            if let Some(daily_rate) = patch.daily_rate {
                details.daily_rate = Some(daily_rate);
            }
            merge!(details, patch, business_name, siret_siren, profession);
        }
        Ok(())
    }

    /// The company sub-record, when present.
    pub fn company_details(&self) -> Option<&CompanyDetails> {
        match &self.details {
            RoleDetails::Company(details) => Some(details),
            _ => None,
        }
    }

    /// The candidate sub-record, when present.
    pub fn candidate_details(&self) -> Option<&CandidateDetails> {
        match &self.details {
            RoleDetails::Candidate(details) => Some(details),
            _ => None,
        }
    }

    /// The freelancer sub-record, when present.
    pub fn freelancer_details(&self) -> Option<&FreelancerDetails> {
        match &self.details {
            RoleDetails::Freelancer(details) => Some(details),
            _ => None,
        }
    }

    fn require_category(&self, wanted: RoleCategory, name: &str) -> Result<(), CoreError> {
        match self.role {
            Some(role) if role.category() == wanted => Ok(()),
            Some(role) => Err(CoreError::Validation(format!(
                "Role '{}' has no {name} profile",
                role.as_str()
            ))),
            None => Err(CoreError::Validation(format!(
                "Select a role before filling in the {name} profile"
            ))),
        }
    }
}
