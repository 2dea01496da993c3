//! # CycleSense
//!
//! Local-first, explainable PCOS pattern screening.
//!
//! This crate provides:
//! - A deterministic, rule-based scoring engine mapping questionnaire
//!   answers to five symptom-cluster signals, a risk tier, a dominant
//!   pattern with rationale, a confidence percentage, and a consultation
//!   recommendation
//! - Plain-text report generation for users and clinicians
//! - A terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (answers, signals, assessments)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, QuestionnaireAnswers, RiskLevel, ScreeningRecord};

/// Result type for CycleSense operations
pub type Result<T> = std::result::Result<T, CyclesenseError>;

/// Main error type for CycleSense
#[derive(Debug, thiserror::Error)]
pub enum CyclesenseError {
    #[error("Invalid questionnaire input: {0}")]
    Validation(#[from] domain::AnswerError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
