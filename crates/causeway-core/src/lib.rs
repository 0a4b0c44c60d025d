//! # causeway-core
//!
//! Foundation crate for the Causeway causal event engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CausewayConfig;
pub use errors::{CausewayError, CausewayResult};
pub use intent::Intent;
pub use models::{CausalRelation, ChainNode, Direction, Document, Entity, Event};
