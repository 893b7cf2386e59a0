//! Credential-verification policy.
//!
//! # Responsibilities
//! - Select the authenticator mode once at startup
//! - Verify a presented credential pair during protocol negotiation
//!
//! # Design Decisions
//! - Tagged variant (Open / UserPass) chosen once and injected by
//!   reference into the protocol engine; never re-evaluated per connection
//! - Open mode is a deliberate insecure mode and logs a warning at startup

use crate::config::{ServerConfig, ValidationError};

/// Credential-verification mode, fixed for the server's lifetime.
#[derive(Debug, Clone)]
pub enum Authenticator {
    /// No credential check.
    Open,
    /// Single static credential pair.
    UserPass { username: String, password: String },
}

impl Authenticator {
    /// Select the mode from the configuration snapshot.
    ///
    /// Fails when authentication is required but either credential is
    /// empty; callers treat that as fatal before any listener is bound.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Vec<ValidationError>> {
        if !config.require_auth {
            tracing::warn!("authentication disabled: relay will accept unauthenticated clients");
            return Ok(Self::Open);
        }

        let mut errors = Vec::new();
        if config.user.is_empty() {
            errors.push(ValidationError::MissingUser);
        }
        if config.password.is_empty() {
            errors.push(ValidationError::MissingPassword);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self::UserPass {
            username: config.user.clone(),
            password: config.password.clone(),
        })
    }

    /// Verify a credential pair presented by a client.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        match self {
            Self::Open => true,
            Self::UserPass {
                username: expected_user,
                password: expected_pass,
            } => username == expected_user && password == expected_pass,
        }
    }

    /// True when clients must present credentials.
    pub fn requires_credentials(&self) -> bool {
        matches!(self, Self::UserPass { .. })
    }
}
