use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Simulated payment gateway tuning.
    pub payment: PaymentConfig,
}

/// Tuning for the simulated payment gateway.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Probability in `[0, 1]` that a locally valid charge is declined.
    pub decline_probability: f64,
    /// Simulated gateway latency in milliseconds.
    pub latency_ms: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `PAYMENT_DECLINE_PROBABILITY` | `0.2`                   |
    /// | `PAYMENT_LATENCY_MS`          | `1500`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let decline_probability: f64 = std::env::var("PAYMENT_DECLINE_PROBABILITY")
            .unwrap_or_else(|_| "0.2".into())
            .parse()
            .expect("PAYMENT_DECLINE_PROBABILITY must be a valid f64");
        assert!(
            (0.0..=1.0).contains(&decline_probability),
            "PAYMENT_DECLINE_PROBABILITY must be within [0, 1]"
        );

        let latency_ms: u64 = std::env::var("PAYMENT_LATENCY_MS")
            .unwrap_or_else(|_| "1500".into())
            .parse()
            .expect("PAYMENT_LATENCY_MS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            payment: PaymentConfig {
                decline_probability,
                latency_ms,
            },
        }
    }
}
