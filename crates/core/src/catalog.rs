//! Static subscription-plan catalog.
//!
//! One ordered plan list per paying role; free roles have no plans. The
//! catalog is compiled in and looked up by `(role, plan_id)`; it is never
//! mutated at runtime.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Billing cadence for a subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

/// A single feature line on a plan card.
#[derive(Debug, Clone, Serialize)]
pub struct PlanFeature {
    pub name: &'static str,
    pub included: bool,
}

/// A subscription plan as presented on the plan-selection step.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub role: Role,
    /// Price per month in euros, VAT excluded.
    pub price_monthly: f64,
    /// Price per year in euros, VAT excluded.
    pub price_yearly: f64,
    /// Free-trial length in days (0 = no trial offered).
    pub trial_days: u32,
    pub features: Vec<PlanFeature>,
    pub is_popular: bool,
    pub is_best_value: bool,
    pub max_users: Option<u32>,
    pub max_job_posts: Option<u32>,
}

impl SubscriptionPlan {
    /// VAT-excluded price for the given billing period.
    pub fn price_for(&self, period: BillingPeriod) -> f64 {
        match period {
            BillingPeriod::Monthly => self.price_monthly,
            BillingPeriod::Yearly => self.price_yearly,
        }
    }
}

fn feature(name: &'static str, included: bool) -> PlanFeature {
    PlanFeature { name, included }
}

static CATALOG: LazyLock<Vec<SubscriptionPlan>> = LazyLock::new(|| {
    vec![
        SubscriptionPlan {
            id: "pos-starter",
            name: "POS Starter",
            role: Role::PosAdmin,
            price_monthly: 29.90,
            price_yearly: 299.00,
            trial_days: 14,
            features: vec![
                feature("1 register", true),
                feature("Stock management", true),
                feature("Daily sales reports", true),
                feature("Multi-site dashboard", false),
            ],
            is_popular: true,
            is_best_value: false,
            max_users: Some(3),
            max_job_posts: None,
        },
        SubscriptionPlan {
            id: "pos-pro",
            name: "POS Pro",
            role: Role::PosAdmin,
            price_monthly: 59.90,
            price_yearly: 599.00,
            trial_days: 14,
            features: vec![
                feature("Unlimited registers", true),
                feature("Stock management", true),
                feature("Daily sales reports", true),
                feature("Multi-site dashboard", true),
            ],
            is_popular: false,
            is_best_value: true,
            max_users: None,
            max_job_posts: None,
        },
        SubscriptionPlan {
            id: "pos-seat",
            name: "POS Seat",
            role: Role::PosManager,
            price_monthly: 12.90,
            price_yearly: 129.00,
            trial_days: 7,
            features: vec![
                feature("1 register", true),
                feature("Daily sales reports", true),
                feature("Stock management", false),
            ],
            is_popular: false,
            is_best_value: false,
            max_users: Some(1),
            max_job_posts: None,
        },
        SubscriptionPlan {
            id: "recruit-business",
            name: "Recruit Business",
            role: Role::CompanyAdmin,
            price_monthly: 79.90,
            price_yearly: 799.00,
            trial_days: 14,
            features: vec![
                feature("50 active job posts", true),
                feature("Candidate search", true),
                feature("Team seats", true),
                feature("Dedicated account manager", false),
            ],
            is_popular: true,
            is_best_value: false,
            max_users: Some(25),
            max_job_posts: Some(50),
        },
        SubscriptionPlan {
            id: "recruit-enterprise",
            name: "Recruit Enterprise",
            role: Role::CompanyAdmin,
            price_monthly: 149.90,
            price_yearly: 1499.00,
            trial_days: 30,
            features: vec![
                feature("Unlimited job posts", true),
                feature("Candidate search", true),
                feature("Team seats", true),
                feature("Dedicated account manager", true),
            ],
            is_popular: false,
            is_best_value: true,
            max_users: None,
            max_job_posts: None,
        },
        SubscriptionPlan {
            id: "recruit-solo",
            name: "Recruit Solo",
            role: Role::Recruiter,
            price_monthly: 39.90,
            price_yearly: 399.00,
            trial_days: 14,
            features: vec![
                feature("10 active job posts", true),
                feature("Candidate search", true),
                feature("Team seats", false),
            ],
            is_popular: false,
            is_best_value: false,
            max_users: Some(1),
            max_job_posts: Some(10),
        },
        SubscriptionPlan {
            id: "candidate-boost",
            name: "Candidate Boost",
            role: Role::CandidatePremium,
            price_monthly: 9.90,
            price_yearly: 99.00,
            trial_days: 7,
            features: vec![
                feature("Profile highlighted to recruiters", true),
                feature("Application read receipts", true),
                feature("Salary insights", true),
            ],
            is_popular: true,
            is_best_value: false,
            max_users: Some(1),
            max_job_posts: None,
        },
        SubscriptionPlan {
            id: "freelance-essential",
            name: "Freelance Essential",
            role: Role::Freelancer,
            price_monthly: 19.90,
            price_yearly: 199.00,
            trial_days: 14,
            features: vec![
                feature("Invoicing", true),
                feature("Public service page", true),
                feature("10 open quotes", true),
                feature("Priority listing", false),
            ],
            is_popular: true,
            is_best_value: false,
            max_users: Some(1),
            max_job_posts: None,
        },
        SubscriptionPlan {
            id: "freelance-plus",
            name: "Freelance Plus",
            role: Role::FreelancerPlus,
            price_monthly: 34.90,
            price_yearly: 349.00,
            trial_days: 14,
            features: vec![
                feature("Invoicing", true),
                feature("Public service page", true),
                feature("Unlimited quotes", true),
                feature("Priority listing", true),
            ],
            is_popular: false,
            is_best_value: true,
            max_users: Some(1),
            max_job_posts: None,
        },
    ]
});

/// The full catalog, in display order.
pub fn catalog() -> &'static [SubscriptionPlan] {
    &CATALOG
}

/// Plans available to a role, in display order. Empty for free roles.
pub fn plans_for_role(role: Role) -> Vec<&'static SubscriptionPlan> {
    CATALOG.iter().filter(|p| p.role == role).collect()
}

/// Look up a plan by `(role, plan_id)`.
pub fn find_plan(role: Role, plan_id: &str) -> Option<&'static SubscriptionPlan> {
    CATALOG.iter().find(|p| p.role == role && p.id == plan_id)
}
