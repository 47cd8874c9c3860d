//! Account roles across the three FIBEM verticals (point of sale,
//! recruitment, freelance/consumer).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The nine account roles a user can register as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PosAdmin,
    PosManager,
    CompanyAdmin,
    Recruiter,
    Candidate,
    CandidatePremium,
    Freelancer,
    FreelancerPlus,
    Individual,
}

/// Coarse role grouping that drives which profile sub-record the
/// registration wizard collects in step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Roles attached to a registered company (POS and recruitment).
    Company,
    /// Job-seeker roles.
    Candidate,
    /// Independent professionals billing under their own business.
    Freelancer,
    /// Plain consumer accounts with no professional profile.
    Individual,
}

/// All roles, in the order they are presented during registration.
pub const ALL_ROLES: [Role; 9] = [
    Role::PosAdmin,
    Role::PosManager,
    Role::CompanyAdmin,
    Role::Recruiter,
    Role::Candidate,
    Role::CandidatePremium,
    Role::Freelancer,
    Role::FreelancerPlus,
    Role::Individual,
];

impl Role {
    /// Parse a role string from the wire / storage.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pos_admin" => Ok(Self::PosAdmin),
            "pos_manager" => Ok(Self::PosManager),
            "company_admin" => Ok(Self::CompanyAdmin),
            "recruiter" => Ok(Self::Recruiter),
            "candidate" => Ok(Self::Candidate),
            "candidate_premium" => Ok(Self::CandidatePremium),
            "freelancer" => Ok(Self::Freelancer),
            "freelancer_plus" => Ok(Self::FreelancerPlus),
            "individual" => Ok(Self::Individual),
            _ => Err(CoreError::Validation(format!("Unknown role '{s}'"))),
        }
    }

    /// Convert to the snake_case wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PosAdmin => "pos_admin",
            Self::PosManager => "pos_manager",
            Self::CompanyAdmin => "company_admin",
            Self::Recruiter => "recruiter",
            Self::Candidate => "candidate",
            Self::CandidatePremium => "candidate_premium",
            Self::Freelancer => "freelancer",
            Self::FreelancerPlus => "freelancer_plus",
            Self::Individual => "individual",
        }
    }

    /// The profile category this role belongs to.
    pub fn category(&self) -> RoleCategory {
        match self {
            Self::PosAdmin | Self::PosManager | Self::CompanyAdmin | Self::Recruiter => {
                RoleCategory::Company
            }
            Self::Candidate | Self::CandidatePremium => RoleCategory::Candidate,
            Self::Freelancer | Self::FreelancerPlus => RoleCategory::Freelancer,
            Self::Individual => RoleCategory::Individual,
        }
    }

    /// Whether the role registers without a subscription plan.
    ///
    /// Free roles skip the plan-selection step entirely and never reach the
    /// payment gateway.
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Candidate | Self::Individual)
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PosAdmin => "Point-of-Sale Administrator",
            Self::PosManager => "Point-of-Sale Manager",
            Self::CompanyAdmin => "Company Administrator",
            Self::Recruiter => "Recruiter",
            Self::Candidate => "Candidate",
            Self::CandidatePremium => "Premium Candidate",
            Self::Freelancer => "Freelancer",
            Self::FreelancerPlus => "Freelancer Plus",
            Self::Individual => "Individual",
        }
    }

    /// Short marketing description shown on the profile-selection step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PosAdmin => "Run your point of sale: registers, stock, and staff accounts.",
            Self::PosManager => "Manage a single register and its daily operations.",
            Self::CompanyAdmin => "Publish job offers and manage your recruitment team.",
            Self::Recruiter => "Source candidates and manage your own job postings.",
            Self::Candidate => "Apply to jobs and build your profile, free of charge.",
            Self::CandidatePremium => "Stand out with profile boosts and application insights.",
            Self::Freelancer => "Invoice clients and showcase your services.",
            Self::FreelancerPlus => "Everything in Freelancer plus quotes and priority listing.",
            Self::Individual => "Browse the marketplace with a free personal account.",
        }
    }
}
