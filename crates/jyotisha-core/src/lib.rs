//! Shared types, error taxonomy, and frozen configuration for the Jyotisha
//! computation engine. Every other crate in the workspace depends on this one
//! and on nothing else in common.

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::JyotishaError;
pub use types::*;
