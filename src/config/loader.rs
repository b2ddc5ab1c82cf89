//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use crate::domain::errors::ExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SNAPSHOT_EXPORT_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ExporterConfig
/// 4. Applies environment variable overrides (SNAPSHOT_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use snapshot_export::config::loader::load_config;
///
/// let config = load_config("snapshot-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails.
pub fn load_config_from_str(contents: &str) -> Result<ExporterConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ExporterConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comment lines are copied through untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
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
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env(key) {
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            ExportError::Configuration(format!(
                "Invalid value '{raw}' for environment variable {ENV_PREFIX}{key}"
            ))
        }),
        None => Ok(None),
    }
}

/// Applies environment variable overrides using SNAPSHOT_EXPORT_* prefix
///
/// Environment variables follow the pattern: SNAPSHOT_EXPORT_<SECTION>_<KEY>
/// For example: SNAPSHOT_EXPORT_SNAPSHOT_SENDER_ENABLED
fn apply_env_overrides(config: &mut ExporterConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env("APPLICATION_NAME") {
        config.application.name = val;
    }

    // Snapshot sender overrides
    let sender = &mut config.snapshot_sender;
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_ENABLED")? {
        sender.enabled = val;
    }
    if let Some(val) = env("SNAPSHOT_SENDER_QUEUE_URL") {
        sender.queue_url = val;
    }
    if let Some(val) = env("SNAPSHOT_SENDER_REGION") {
        sender.region = val;
    }
    if let Some(val) = env("SNAPSHOT_SENDER_ENDPOINT_URL") {
        sender.endpoint_url = Some(val);
    }
    if let Some(val) = env("SNAPSHOT_SENDER_EXPORT_DATE") {
        sender.export_date = val;
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_REPROCESS_FILES")? {
        sender.reprocess_files = val;
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_SHUTDOWN_FLAG")? {
        sender.shutdown_flag = val;
    }
    if let Some(val) = env("SNAPSHOT_SENDER_SNAPSHOT_TYPE") {
        sender.snapshot_type = val;
    }
    if let Some(val) = env("SNAPSHOT_SENDER_TOPIC_NAME") {
        sender.topic_name = val;
    }
    if let Some(val) = env("SNAPSHOT_SENDER_CORRELATION_ID") {
        sender.correlation_id = Some(val);
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_DELAY_SECONDS")? {
        sender.delay_seconds = val;
    }

    // Retry overrides
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_RETRY_MAX_ATTEMPTS")? {
        sender.retry.max_attempts = val;
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_RETRY_INITIAL_DELAY_MS")? {
        sender.retry.initial_delay_ms = val;
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_RETRY_MULTIPLIER")? {
        sender.retry.multiplier = val;
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_RETRY_MAX_DELAY_MS")? {
        sender.retry.max_delay_ms = val;
    }
    if let Some(val) = env_parsed("SNAPSHOT_SENDER_RETRY_TRANSIENT_ONLY")? {
        sender.retry.transient_only = val;
    }

    // Validator overrides
    if let Some(val) = env("VALIDATOR_DEFAULT_TYPE") {
        config.validator.default_type = val;
    }

    // Logging overrides
    if let Some(val) = env_parsed("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_parsed("LOGGING_CONSOLE_JSON")? {
        config.logging.console_json = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LOADER_TEST_VAR", "test_value");
        let input = "queue_url = \"${LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "queue_url = \"test_value\"\n");
        std::env::remove_var("LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LOADER_MISSING_VAR");
        let input = "queue_url = \"${LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("LOADER_COMMENTED_VAR");
        let input = "# queue_url = \"${LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[snapshot_sender]
queue_url = "http://aws:4566/000000000000/snapshot-sender"
export_date = "2020-06-05"
topic_name = "db.database.collection"
snapshot_type = "incremental"

[snapshot_sender.retry]
max_attempts = 5
initial_delay_ms = 10
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.snapshot_sender.topic_name, "db.database.collection");
        assert_eq!(config.snapshot_sender.retry.max_attempts, 5);
        assert_eq!(config.snapshot_sender.delay_seconds, 30);
        assert_eq!(config.validator.default_type, "TYPE_NOT_SET");
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let err = load_config_from_str("[snapshot_sender\nqueue_url = ").unwrap_err();
        assert!(matches!(err, ExportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
