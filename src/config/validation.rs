//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and the env loader handle syntactic)
//! - Enforce the credential invariant (require_auth implies a non-empty pair)
//! - Validate value ranges (max_connections > 0, timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before any listener is bound; a failure is fatal at startup

use crate::config::schema::ServerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("require_auth is enabled but user is empty")]
    MissingUser,
    #[error("require_auth is enabled but password is empty")]
    MissingPassword,
    #[error("max_connections must be a positive integer")]
    ZeroMaxConnections,
    #[error("timeout_secs must be a positive integer")]
    ZeroTimeout,
}

/// Validate a configuration snapshot, collecting every violation.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.require_auth {
        if config.user.is_empty() {
            errors.push(ValidationError::MissingUser);
        }
        if config.password.is_empty() {
            errors.push(ValidationError::MissingPassword);
        }
    }

    if config.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
