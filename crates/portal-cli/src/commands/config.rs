//! `portal config` command implementation
//!
//! Shows the effective configuration after defaults, file, environment and
//! flags have been merged.

use crate::config::{Config, ENV_API_TIMEOUT_SECS, ENV_API_URL, ENV_CONFIG_FILE};
use crate::error::Result;
use colored::Colorize;

/// Show all configuration
pub fn show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Portal CLI Configuration:".cyan().bold());
    println!();
    println!("{:<15} {}", "api_url:", config.api_url());
    println!("{:<15} {}", "timeout_secs:", config.timeout_secs);
    println!("{:<15} {}", "no_color:", config.no_color);
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  {:<24} - Backend base URL", ENV_API_URL);
    println!("  {:<24} - Request timeout in seconds", ENV_API_TIMEOUT_SECS);
    println!("  {:<24} - TOML config file", ENV_CONFIG_FILE);
    println!("  {:<24} - Disable colors", "NO_COLOR");

    Ok(())
}
