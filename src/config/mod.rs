//! Configuration subsystem.
//!
//! # Responsibilities
//! - Define the immutable configuration snapshot
//! - Load it from an optional TOML file and the process environment
//! - Validate it before any listener is bound

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ServerConfig;
pub use validation::{validate_config, ValidationError};
