//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external service
//! dependencies. All types are serializable and validated at the
//! answer boundary.

mod answers;
mod assessment;

pub use answers::{
    Acne, ActivityLevel, AnswerError, AnswersDraft, CycleLength, DietPattern, FacialHair,
    FamilyHistory, Frequency, HairLoss, MissedPeriods, PeriodPain, QuestionnaireAnswers,
    SleepQuality, WeightChange, AGE_RANGE, STRESS_RANGE,
};
pub use assessment::{
    Assessment, PcosPattern, RiskLevel, ScreeningRecord, SignalVector, RISK_DISPLAY_CEILING,
    SIGNAL_DISPLAY_CEILING,
};
