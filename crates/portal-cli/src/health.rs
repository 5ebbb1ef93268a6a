//! Backend health check
//!
//! One-shot `GET /api/ping`. There is no polling; callers re-check
//! explicitly.

use crate::api::ApiClient;
use std::fmt;
use tracing::{debug, warn};

/// Reported backend availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    /// No check has completed yet
    #[default]
    Unknown,
    Online,
    Offline,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Unknown => write!(f, "Checking…"),
            HealthStatus::Online => write!(f, "Online"),
            HealthStatus::Offline => write!(f, "Offline"),
        }
    }
}

/// Holds the last known backend status
#[derive(Debug, Default)]
pub struct HealthMonitor {
    status: HealthStatus,
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    /// Ping the backend and record the outcome
    ///
    /// Online only for a 2xx JSON reply whose `ok` is `true`. Everything else,
    /// including transport errors, is Offline.
    pub async fn check(&mut self, client: &ApiClient) -> HealthStatus {
        self.status = match client.ping().await {
            Ok(reply) if reply.ok => HealthStatus::Online,
            Ok(_) => {
                debug!(url = %client.base_url(), "Ping answered ok=false");
                HealthStatus::Offline
            },
            Err(e) => {
                warn!(url = %client.base_url(), error = %e, "Backend unreachable");
                HealthStatus::Offline
            },
        };
        self.status
    }
}
