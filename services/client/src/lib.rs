//! services/client/src/lib.rs
//!
//! The client shell: configuration, the HTTP adapter for the marketplace
//! API, and the wiring that hands the core stores to a hosting UI.

pub mod adapters;
pub mod config;
pub mod error;
pub mod shell;

pub use config::Config;
pub use error::ClientError;
pub use shell::{init_tracing, AppShell};
