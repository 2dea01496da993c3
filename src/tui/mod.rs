//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a questionnaire-driven interface for:
//! - Dashboard with history overview
//! - Symptom questionnaire input
//! - Explainable screening results

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::Theme;
