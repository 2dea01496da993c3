//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

pub mod engine;
mod report;
mod screening;

pub use report::{contributing_factors, generate_summary, SummaryReports};
pub use screening::{HistorySummary, ScreeningService};
