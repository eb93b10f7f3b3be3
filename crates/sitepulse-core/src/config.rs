use std::path::PathBuf;

use crate::issue::BacklogCaps;
use crate::ConfigError;

/// Engine tunables. Scoring calibration constants are deliberately not here;
/// they are part of the versioned scoring algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub log_level: String,
    pub niche_vocab_path: Option<PathBuf>,
    pub backlog_caps: BacklogCaps,
    pub top_issues: usize,
    pub near_duplicate_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            niche_vocab_path: None,
            backlog_caps: BacklogCaps::default(),
            top_issues: 5,
            near_duplicate_threshold: 0.90,
        }
    }
}

/// Load engine configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_engine_config() -> Result<EngineConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_engine_config(|key| std::env::var(key))
}

/// Build engine configuration using the provided env-var lookup function.
///
/// Every variable is optional; decoupling the lookup keeps this testable
/// with a plain `HashMap`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unparseable or out-of-range values.
pub fn build_engine_config<F>(lookup: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = EngineConfig::default();

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let log_level = lookup("SITEPULSE_LOG_LEVEL").unwrap_or(defaults.log_level);
    let niche_vocab_path = lookup("SITEPULSE_NICHE_VOCAB_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let backlog_caps = BacklogCaps {
        critical: parse_usize(
            "SITEPULSE_BACKLOG_CRITICAL_CAP",
            defaults.backlog_caps.critical,
        )?,
        warning: parse_usize(
            "SITEPULSE_BACKLOG_WARNING_CAP",
            defaults.backlog_caps.warning,
        )?,
        opportunity: parse_usize(
            "SITEPULSE_BACKLOG_OPPORTUNITY_CAP",
            defaults.backlog_caps.opportunity,
        )?,
    };
    let top_issues = parse_usize("SITEPULSE_TOP_ISSUES", defaults.top_issues)?;

    let near_duplicate_threshold = match lookup("SITEPULSE_NEAR_DUP_THRESHOLD") {
        Ok(raw) => parse_threshold(&raw)?,
        Err(_) => defaults.near_duplicate_threshold,
    };

    Ok(EngineConfig {
        log_level,
        niche_vocab_path,
        backlog_caps,
        top_issues,
        near_duplicate_threshold,
    })
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "SITEPULSE_NEAR_DUP_THRESHOLD".to_string(),
        reason,
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(e.to_string()))?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(invalid(format!("{value} is outside (0, 1]")))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
