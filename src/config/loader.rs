//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiRedactConfig;
use crate::domain::errors::RedactError;
use crate::domain::result::Result;
use crate::redaction::config::RedactionFormat;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env placeholder regex")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PiiRedactConfig
/// 4. Applies environment variable overrides (PIIREDACT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use piiredact::config::load_config;
///
/// let config = load_config("piiredact.toml")?;
/// println!("format: {}", config.redaction.redaction_format.as_str());
/// # Ok::<(), piiredact::domain::RedactError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiRedactConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedactError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedactError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Load configuration from TOML text, with the same substitution, overrides
/// and validation as [`load_config`]
pub fn load_config_str(contents: &str) -> Result<PiiRedactConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: PiiRedactConfig = toml::from_str(&contents)
        .map_err(|e| RedactError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RedactError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Defaults with environment overrides applied, for running without a file
pub fn default_config() -> Result<PiiRedactConfig> {
    load_config_str("")
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed_line = ENV_PLACEHOLDER.replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RedactError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PIIREDACT_* prefix
///
/// Environment variables follow the pattern: PIIREDACT_<SECTION>_<KEY>
fn apply_env_overrides(config: &mut PiiRedactConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PIIREDACT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("PIIREDACT_REDACTION_FORMAT") {
        config.redaction.redaction_format = RedactionFormat::new(val);
    }
    if let Ok(val) = std::env::var("PIIREDACT_REDACTION_MAX_CONCURRENCY") {
        config.redaction.max_concurrency = val.parse().map_err(|_| {
            RedactError::Configuration(format!(
                "PIIREDACT_REDACTION_MAX_CONCURRENCY must be an integer, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("PIIREDACT_REDACTION_LOGGING") {
        config.redaction.logging = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("PIIREDACT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PIIREDACT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
