//! Environment variable management
//!
//! Handles loading of `.env` files and building [`Settings`] from the environment.

use anyhow::{anyhow, Result};
use std::env;

use crate::models::Settings;

pub const VERBOSE_VAR: &str = "STACKGUARD_VERBOSE";
pub const DISABLED_RULES_VAR: &str = "STACKGUARD_DISABLED_RULES";
pub const REPORT_SUPPRESSED_VAR: &str = "STACKGUARD_REPORT_SUPPRESSED";

/// Load environment variables from .env file
///
/// Does not fail if .env file doesn't exist (optional configuration).
pub fn load_env() -> Result<()> {
    dotenv::dotenv().ok();
    Ok(())
}

/// Parse a boolean flag
///
/// Accepts `true/false`, `1/0`, `yes/no` (case-insensitive).
pub fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(anyhow!(
            "{} must be a boolean (true/false, 1/0, yes/no), got '{}'",
            name,
            other
        )),
    }
}

fn bool_var(name: &str) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => parse_bool(name, &raw),
        Err(_) => Ok(false),
    }
}

/// Split a comma-separated rule id list, dropping blanks
pub fn parse_rule_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build [`Settings`] from `STACKGUARD_*` variables
///
/// Unset variables fall back to the defaults.
///
/// # Errors
/// Returns error if a boolean variable holds something other than a boolean
pub fn settings_from_env() -> Result<Settings> {
    Ok(Settings {
        verbose: bool_var(VERBOSE_VAR)?,
        disabled_rules: env::var(DISABLED_RULES_VAR)
            .map(|raw| parse_rule_list(&raw))
            .unwrap_or_default(),
        report_suppressed: bool_var(REPORT_SUPPRESSED_VAR)?,
    })
}
