//! Configuration loading.
//!
//! The environment is the primary source (every recognized variable
//! overrides the snapshot). An optional TOML file may seed the snapshot
//! first; anything it sets can still be overridden from the environment.

use std::net::IpAddr;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables recognized by the loader.
pub const ENV_USER: &str = "PROXY_USER";
pub const ENV_PASSWORD: &str = "PROXY_PASSWORD";
pub const ENV_PORT: &str = "PROXY_PORT";
pub const ENV_LISTEN_IP: &str = "PROXY_LISTEN_IP";
pub const ENV_ALLOWED_DEST_FQDN: &str = "ALLOWED_DEST_FQDN";
pub const ENV_ALLOWED_IPS: &str = "ALLOWED_IPS";
pub const ENV_REQUIRE_AUTH: &str = "REQUIRE_AUTH";
pub const ENV_MAX_CONNECTIONS: &str = "MAX_CONNECTIONS";
pub const ENV_TIMEOUT: &str = "TIMEOUT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {message}")]
    Env { key: &'static str, message: String },
    #[error("Validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load the configuration snapshot: defaults, then an optional TOML file,
/// then the process environment, then semantic validation.
pub fn load_config(file: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut config = match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServerConfig::default(),
    };

    apply_env(&mut config)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay recognized environment variables onto the snapshot.
fn apply_env(config: &mut ServerConfig) -> Result<(), ConfigError> {
    if let Some(user) = env_var(ENV_USER) {
        config.user = user;
    }
    if let Some(password) = env_var(ENV_PASSWORD) {
        config.password = password;
    }
    if let Some(port) = env_var(ENV_PORT) {
        config.port = parse(ENV_PORT, &port)?;
    }
    if let Some(ip) = env_var(ENV_LISTEN_IP) {
        config.listen_ip = ip;
    }
    if let Some(pattern) = env_var(ENV_ALLOWED_DEST_FQDN) {
        config.allowed_dest_fqdn = pattern;
    }
    if let Some(ips) = env_var(ENV_ALLOWED_IPS) {
        config.allowed_ips = parse_ip_list(&ips)?;
    }
    if let Some(flag) = env_var(ENV_REQUIRE_AUTH) {
        config.require_auth = parse_bool(ENV_REQUIRE_AUTH, &flag)?;
    }
    if let Some(max) = env_var(ENV_MAX_CONNECTIONS) {
        config.max_connections = parse(ENV_MAX_CONNECTIONS, &max)?;
    }
    if let Some(timeout) = env_var(ENV_TIMEOUT) {
        config.timeout_secs = parse(ENV_TIMEOUT, &timeout)?;
    }
    Ok(())
}

fn env_var(key: &'static str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Env {
        key,
        message: e.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::Env {
            key,
            message: format!("expected a boolean, got {other:?}"),
        }),
    }
}

/// Parse a comma-separated IP list, e.g. "10.0.0.1,10.0.0.2".
fn parse_ip_list(value: &str) -> Result<Vec<IpAddr>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse::<IpAddr>(ENV_ALLOWED_IPS, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ip_list_with_whitespace() {
        let ips = parse_ip_list("10.0.0.1, 10.0.0.2 ,::1").unwrap();
        assert_eq!(ips.len(), 3);
        assert_eq!(ips[0], "10.0.0.1".parse::<IpAddr>().unwrap());
        assert_eq!(ips[2], "::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn rejects_garbage_ip_entry() {
        let err = parse_ip_list("10.0.0.1,not-an-ip").unwrap_err();
        assert!(matches!(err, ConfigError::Env { key, .. } if key == ENV_ALLOWED_IPS));
    }

    #[test]
    fn parses_bool_variants() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "yes").is_err());
    }

    #[test]
    fn toml_file_seeds_snapshot() {
        let dir = std::env::temp_dir().join("relay-gate-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "user = \"admin\"\npassword = \"secret\"\nport = 9050\nmax_connections = 7\n",
        )
        .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.port, 9050);
        assert_eq!(config.max_connections, 7);
        // Untouched fields keep their defaults.
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/relay-gate.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
