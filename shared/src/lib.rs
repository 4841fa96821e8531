//! Shared types and models for the Rice Retail Dashboard
//!
//! This crate contains the wire models, formatting helpers and pure
//! calculations shared between the dashboard client and the browser
//! (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
