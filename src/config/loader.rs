//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, EligoConfig};
use super::secret::secret_string;
use crate::domain::errors::EligoError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EligoConfig
/// 4. Applies environment variable overrides (ELIGO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`EligoError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use eligo::config::loader::load_config;
///
/// let config = load_config("eligo.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EligoConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EligoError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EligoError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses, overrides and validates configuration held in memory
///
/// # Errors
///
/// Same as [`load_config`] minus the file access failures.
pub fn load_config_from_str(contents: &str) -> Result<EligoConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: EligoConfig = toml::from_str(&contents)
        .map_err(|e| EligoError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        EligoError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EligoError::Configuration(format!("Invalid substitution pattern: {e}")))?;
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
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
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
        return Err(EligoError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        EligoError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using ELIGO_* prefix
///
/// Environment variables follow the pattern: ELIGO_<SECTION>_<KEY>,
/// e.g. ELIGO_DATABASE_TARGET or ELIGO_SIMULATION_SEED.
fn apply_env_overrides(config: &mut EligoConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ELIGO_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ELIGO_DATABASE_TARGET") {
        config.database_target = match val.to_lowercase().as_str() {
            "postgresql" => DatabaseTarget::PostgreSQL,
            "memory" => DatabaseTarget::Memory,
            other => {
                return Err(EligoError::Configuration(format!(
                    "Invalid ELIGO_DATABASE_TARGET '{other}'. Must be one of: postgresql, memory"
                )))
            }
        };
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("ELIGO_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("ELIGO_POSTGRESQL_MAX_CONNECTIONS") {
            pg_config.max_connections = parse_override("ELIGO_POSTGRESQL_MAX_CONNECTIONS", &val)?;
        }
        if let Ok(val) = std::env::var("ELIGO_POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
    }

    if let Ok(val) = std::env::var("ELIGO_SIMULATION_SEED") {
        config.simulation.seed = Some(parse_override("ELIGO_SIMULATION_SEED", &val)?);
    }
    if let Ok(val) = std::env::var("ELIGO_SIMULATION_BATCH_CONCURRENCY") {
        config.simulation.batch_concurrency =
            parse_override("ELIGO_SIMULATION_BATCH_CONCURRENCY", &val)?;
    }

    if let Ok(val) = std::env::var("ELIGO_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("ELIGO_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("ELIGO_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
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
        std::env::set_var("ELIGO_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${ELIGO_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"");
        std::env::remove_var("ELIGO_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ELIGO_LOADER_MISSING_VAR");
        let input = "password = \"${ELIGO_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("ELIGO_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# password = \"${ELIGO_LOADER_COMMENTED_VAR}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-eligo.toml");
        assert!(matches!(result, Err(EligoError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
database_target = "memory"

[application]
log_level = "debug"

[simulation]
seed = 42
batch_concurrency = 4
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.database_target, DatabaseTarget::Memory);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.batch_concurrency, 4);
    }

    #[test]
    fn test_load_config_rejects_unknown_target() {
        let result = load_config_from_str("database_target = \"cassandra\"\n");
        assert!(matches!(result, Err(EligoError::Configuration(_))));
    }
}
