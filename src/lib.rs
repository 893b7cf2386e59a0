//! Admission-controlled front end for a relay protocol engine.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                RELAY FRONT END                │
//!                       │                                               │
//!   Client Connection   │  ┌───────────┐    ┌───────────┐              │
//!   ────────────────────┼─▶│ admission │───▶│   idle    │──┐           │
//!                       │  │   gate    │    │  timeout  │  │           │
//!                       │  └─────┬─────┘    └───────────┘  │           │
//!                       │        │                         ▼           │
//!                       │  source-IP filter        ┌──────────────┐    │
//!                       │  (pre-negotiation)       │   protocol   │────┼──▶ Destination
//!                       │                          │    engine    │    │
//!                       │  ┌────────────────────┐  └──────┬───────┘    │
//!                       │  │   relay policy     │◀────────┘            │
//!                       │  │ auth + dest rules  │  consulted per conn  │
//!                       │  └────────────────────┘                      │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! The crate enforces admission (bounded concurrent connections with
//! blocking backpressure), sliding idle timeouts, and access control
//! (source-IP allow-list, destination-FQDN pattern, optional static
//! credentials). The relay protocol itself lives behind the
//! [`engine::ProtocolEngine`] trait.

// Core subsystems
pub mod access;
pub mod auth;
pub mod config;
pub mod engine;
pub mod net;
pub mod server;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use engine::{ProtocolEngine, RelayPolicy};
pub use lifecycle::Shutdown;
pub use server::Server;
