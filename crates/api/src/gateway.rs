//! Payment gateway seam.
//!
//! [`PaymentGateway`] is the production integration point for a real payment
//! provider. The shipped [`SimulatedGateway`] stands in for it: after a
//! configured latency it declines with a fixed probability and approves
//! otherwise. A decline is a normal charge outcome, not an error; errors are
//! reserved for the provider being unreachable.

use std::time::Duration;

use async_trait::async_trait;
use fibem_core::payment::PaymentMethod;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Failure to talk to the payment provider at all.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// Result of a charge attempt that reached the provider.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChargeOutcome {
    Approved { charge_id: String },
    Declined { reason: String },
}

/// Interface to the payment provider.
///
/// `amount_cents` is the VAT-included total in euro cents. Implementations
/// must already have validated the method locally before charging.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        amount_cents: i64,
        method: &PaymentMethod,
    ) -> Result<ChargeOutcome, GatewayError>;
}

/// Simulated provider: fixed-probability declines after a fixed latency.
pub struct SimulatedGateway {
    decline_probability: f64,
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(decline_probability: f64, latency: Duration) -> Self {
        Self {
            decline_probability: decline_probability.clamp(0.0, 1.0),
            latency,
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(
        &self,
        amount_cents: i64,
        _method: &PaymentMethod,
    ) -> Result<ChargeOutcome, GatewayError> {
        tokio::time::sleep(self.latency).await;

        if rand::rng().random_bool(self.decline_probability) {
            tracing::info!(amount_cents, "Simulated charge declined");
            return Ok(ChargeOutcome::Declined {
                reason: "Card declined by the issuer".to_string(),
            });
        }

        let charge_id = format!("sim_{}", Uuid::new_v4().simple());
        tracing::info!(amount_cents, charge_id = %charge_id, "Simulated charge approved");
        Ok(ChargeOutcome::Approved { charge_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_method() -> PaymentMethod {
        PaymentMethod::Card {
            number: "4111111111111111".to_string(),
            expiry: "12/27".to_string(),
            cvc: "123".to_string(),
            holder: "J MARTIN".to_string(),
        }
    }

    #[tokio::test]
    async fn zero_probability_always_approves() {
        let gateway = SimulatedGateway::new(0.0, Duration::ZERO);
        for _ in 0..10 {
            let outcome = gateway.charge(3588, &test_method()).await.unwrap();
            assert_matches!(outcome, ChargeOutcome::Approved { .. });
        }
    }

    #[tokio::test]
    async fn full_probability_always_declines() {
        let gateway = SimulatedGateway::new(1.0, Duration::ZERO);
        for _ in 0..10 {
            let outcome = gateway.charge(3588, &test_method()).await.unwrap();
            assert_matches!(outcome, ChargeOutcome::Declined { .. });
        }
    }

    #[tokio::test]
    async fn out_of_range_probability_is_clamped() {
        let gateway = SimulatedGateway::new(7.5, Duration::ZERO);
        let outcome = gateway.charge(100, &test_method()).await.unwrap();
        assert_matches!(outcome, ChargeOutcome::Declined { .. });
    }
}
