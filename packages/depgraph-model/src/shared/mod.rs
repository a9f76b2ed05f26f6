//! Shared module - Common types and utilities
//!
//! Types shared by every feature: the build-engine input models, the
//! serializable output models, and the ports the engine is reached through.

pub mod models;
pub mod ports;
pub mod utils;

// Re-exports for convenience
pub use models::*;
