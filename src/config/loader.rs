//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FeedAppConfig;
use crate::domain::errors::FeedError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "CATALOG_FEED_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FeedAppConfig
/// 4. Applies environment variable overrides (CATALOG_FEED_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`FeedError::Configuration`] if the file cannot be read or parsed,
/// a referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use catalog_feed::config::loader::load_config;
///
/// let config = load_config("catalog-feed.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FeedAppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FeedError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FeedError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, overrides and validation as [`load_config`].
pub fn parse_config(contents: &str) -> Result<FeedAppConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: FeedAppConfig = toml::from_str(&contents)
        .map_err(|e| FeedError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        FeedError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FeedError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(FeedError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using CATALOG_FEED_* prefix
///
/// Environment variables follow the pattern: CATALOG_FEED_<SECTION>_<KEY>
/// For example: CATALOG_FEED_FEED_PAGE_SIZE, CATALOG_FEED_EXPORT_OUTPUT_PATH
fn apply_env_overrides(config: &mut FeedAppConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Feed overrides
    if let Some(val) = env_override("FEED_DOMAIN_ID") {
        config.feed.domain_id = parse_override("FEED_DOMAIN_ID", &val)?;
    }
    if let Some(val) = env_override("FEED_PAGE_SIZE") {
        config.feed.page_size = parse_override("FEED_PAGE_SIZE", &val)?;
    }
    if let Some(val) = env_override("FEED_OUT_OF_STOCK_DELIVERY_DAYS") {
        config.feed.out_of_stock_delivery_days =
            parse_override("FEED_OUT_OF_STOCK_DELIVERY_DAYS", &val)?;
    }
    if let Some(val) = env_override("FEED_IMAGE_MAX_WIDTH") {
        config.feed.image_max_width = parse_override("FEED_IMAGE_MAX_WIDTH", &val)?;
    }
    if let Some(val) = env_override("FEED_IMAGE_MAX_HEIGHT") {
        config.feed.image_max_height = parse_override("FEED_IMAGE_MAX_HEIGHT", &val)?;
    }

    // Export overrides
    if let Some(val) = env_override("EXPORT_OUTPUT_PATH") {
        config.export.output_path = val;
    }
    if let Some(val) = env_override("EXPORT_MAX_RETRIES") {
        config.export.max_retries = parse_override("EXPORT_MAX_RETRIES", &val)?;
    }
    if let Some(val) = env_override("EXPORT_START_CURSOR") {
        config.export.start_cursor = Some(parse_override("EXPORT_START_CURSOR", &val)?);
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        FeedError::Configuration(format!(
            "Invalid value '{}' for {}{}: {}",
            value, ENV_PREFIX, key, e
        ))
    })
}
