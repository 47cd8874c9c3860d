use std::sync::Arc;

use crate::accounts::AccountStore;
use crate::config::ServerConfig;
use crate::gateway::PaymentGateway;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT secret, payment tuning).
    pub config: Arc<ServerConfig>,
    /// In-memory registration wizard sessions.
    pub sessions: Arc<SessionStore>,
    /// In-memory registered accounts.
    pub accounts: Arc<AccountStore>,
    /// Payment provider integration (simulated in this build).
    pub gateway: Arc<dyn PaymentGateway>,
}
