//! `portal ping` command implementation
//!
//! Checks backend availability once and reports it.

use super::CommandContext;
use crate::error::{CliError, Result};
use crate::health::HealthStatus;
use serde_json::json;

/// Ping the backend; exits non-zero when it is offline
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let status = ctx.report_health().await;
    let online = status == HealthStatus::Online;

    if ctx.json {
        println!(
            "{}",
            json!({ "api_url": ctx.client.base_url(), "online": online })
        );
    }

    if online {
        Ok(())
    } else {
        Err(CliError::Submission(format!(
            "Backend at {} is offline.",
            ctx.client.base_url()
        )))
    }
}
