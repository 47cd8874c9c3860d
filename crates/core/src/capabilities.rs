//! Static role → permission/limit table.
//!
//! Compiled-in configuration consumed by the API layer; never mutated at
//! runtime. Limits of `None` mean unlimited.

use serde::Serialize;

use crate::role::Role;

/// Permission flags and numeric limits attached to a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleCapabilities {
    pub can_post_jobs: bool,
    pub can_apply_to_jobs: bool,
    pub can_manage_pos: bool,
    pub can_invoice: bool,
    pub can_manage_team: bool,
    /// Maximum team-member accounts, `None` = unlimited.
    pub max_users: Option<u32>,
    /// Maximum simultaneously published job posts.
    pub max_job_posts: Option<u32>,
    /// Maximum open quotes (freelancer roles).
    pub max_active_quotes: Option<u32>,
}

/// Look up the capability set for a role.
pub fn capabilities_for(role: Role) -> &'static RoleCapabilities {
    match role {
        Role::PosAdmin => &POS_ADMIN,
        Role::PosManager => &POS_MANAGER,
        Role::CompanyAdmin => &COMPANY_ADMIN,
        Role::Recruiter => &RECRUITER,
        Role::Candidate => &CANDIDATE,
        Role::CandidatePremium => &CANDIDATE_PREMIUM,
        Role::Freelancer => &FREELANCER,
        Role::FreelancerPlus => &FREELANCER_PLUS,
        Role::Individual => &INDIVIDUAL,
    }
}

static POS_ADMIN: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: false,
    can_manage_pos: true,
    can_invoice: true,
    can_manage_team: true,
    max_users: None,
    max_job_posts: Some(0),
    max_active_quotes: Some(0),
};

static POS_MANAGER: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: false,
    can_manage_pos: true,
    can_invoice: true,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(0),
    max_active_quotes: Some(0),
};

static COMPANY_ADMIN: RoleCapabilities = RoleCapabilities {
    can_post_jobs: true,
    can_apply_to_jobs: false,
    can_manage_pos: false,
    can_invoice: false,
    can_manage_team: true,
    max_users: Some(25),
    max_job_posts: Some(50),
    max_active_quotes: Some(0),
};

static RECRUITER: RoleCapabilities = RoleCapabilities {
    can_post_jobs: true,
    can_apply_to_jobs: false,
    can_manage_pos: false,
    can_invoice: false,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(10),
    max_active_quotes: Some(0),
};

static CANDIDATE: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: true,
    can_manage_pos: false,
    can_invoice: false,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(0),
    max_active_quotes: Some(0),
};

static CANDIDATE_PREMIUM: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: true,
    can_manage_pos: false,
    can_invoice: false,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(0),
    max_active_quotes: Some(0),
};

static FREELANCER: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: true,
    can_manage_pos: false,
    can_invoice: true,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(0),
    max_active_quotes: Some(10),
};

static FREELANCER_PLUS: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: true,
    can_manage_pos: false,
    can_invoice: true,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(0),
    max_active_quotes: None,
};

static INDIVIDUAL: RoleCapabilities = RoleCapabilities {
    can_post_jobs: false,
    can_apply_to_jobs: false,
    can_manage_pos: false,
    can_invoice: false,
    can_manage_team: false,
    max_users: Some(1),
    max_job_posts: Some(0),
    max_active_quotes: Some(0),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::ALL_ROLES;

    #[test]
    fn every_role_has_capabilities() {
        for role in ALL_ROLES {
            // Must not panic, and team management implies more than one seat.
            let caps = capabilities_for(role);
            if caps.can_manage_team {
                assert!(caps.max_users.is_none() || caps.max_users > Some(1));
            }
        }
    }

    #[test]
    fn candidates_apply_but_never_post() {
        for role in [Role::Candidate, Role::CandidatePremium] {
            let caps = capabilities_for(role);
            assert!(caps.can_apply_to_jobs);
            assert!(!caps.can_post_jobs);
        }
    }

    #[test]
    fn pos_roles_manage_pos() {
        assert!(capabilities_for(Role::PosAdmin).can_manage_pos);
        assert!(capabilities_for(Role::PosManager).can_manage_pos);
        assert!(!capabilities_for(Role::Recruiter).can_manage_pos);
    }
}
