//! In-memory registration wizard sessions.
//!
//! Each session owns one [`RegistrationDraft`] and a current-step pointer.
//! Sessions are created when the wizard mounts, mutated only through the
//! handlers, and dropped on submission or abandonment; there is no
//! persistence or resume (spelled out as a product decision, not an
//! implementation gap).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fibem_core::draft::RegistrationDraft;
use fibem_core::error::CoreError;
use fibem_core::wizard::RegistrationStep;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Where the step-4 payment attempt currently stands.
///
/// `failed` is recoverable: the next submit attempt starts over. `succeeded`
/// is terminal for the step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    Idle,
    Processing,
    Succeeded {
        /// `None` for trial and free-role completions (nothing was charged).
        charge_id: Option<String>,
        /// VAT-included total that was charged.
        total: f64,
    },
    Failed {
        reason: String,
    },
}

/// One in-flight run of the registration wizard.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSession {
    pub id: Uuid,
    pub current_step: RegistrationStep,
    pub draft: RegistrationDraft,
    pub payment: PaymentState,
    pub created_at: DateTime<Utc>,
}

/// In-memory session registry keyed by session id.
///
/// The write lock serializes mutation; within a session there is a single
/// mutator anyway (the one client driving its wizard).
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, RegistrationSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session on step 1 and return a snapshot of it.
    pub async fn create(&self) -> RegistrationSession {
        let session = RegistrationSession {
            id: Uuid::new_v4(),
            current_step: RegistrationStep::Profile,
            draft: RegistrationDraft::default(),
            payment: PaymentState::Idle,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Snapshot a session by id.
    pub async fn get(&self, id: Uuid) -> Result<RegistrationSession, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "RegistrationSession",
                id: id.to_string(),
            })
    }

    /// Mutate a session under the write lock.
    ///
    /// The closure runs with exclusive access; returning `Err` leaves any
    /// changes it already made in place, so closures should validate before
    /// mutating.
    pub async fn update<T>(
        &self,
        id: Uuid,
        mutate: impl FnOnce(&mut RegistrationSession) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "RegistrationSession",
            id: id.to_string(),
        })?;
        mutate(session)
    }

    /// Drop a session (successful submission or explicit abandonment).
    pub async fn remove(&self, id: Uuid) -> Result<(), CoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(CoreError::NotFound {
                entity: "RegistrationSession",
                id: id.to_string(),
            })
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
