//! Access control rule engine.
//!
//! # Responsibilities
//! - Source-IP allow-list, enforced at admission time
//! - Destination-hostname rules, consulted by the protocol engine
//!
//! Both are derived once from the configuration snapshot and read-only
//! for the server's lifetime; no locking is required.

pub mod destination;
pub mod source;

pub use destination::DestinationRule;
pub use source::SourceFilter;
