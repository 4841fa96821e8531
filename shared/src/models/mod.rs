//! Domain models for the Rice Retail Dashboard

mod analytics;
mod inventory;
mod prediction;
mod sales;

pub use analytics::*;
pub use inventory::*;
pub use prediction::*;
pub use sales::*;
