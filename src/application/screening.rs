//! Screening service: Orchestrates questionnaire evaluation.
//!
//! This service coordinates:
//! - Input validation
//! - Engine evaluation
//! - History persistence
//!
//! The engine stays pure and stateless; all cross-call state (history,
//! counts) lives behind the storage port, owned by the caller that
//! constructs the service.

use std::sync::Arc;

use crate::application::engine;
use crate::domain::{QuestionnaireAnswers, RiskLevel, ScreeningRecord};
use crate::ports::Storage;
use crate::CyclesenseError;

/// Aggregated view of recent screenings for the dashboard.
///
/// Deliberately coarse: tier counts only, never individual answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistorySummary {
    pub total: usize,
    pub low: u32,
    pub moderate: u32,
    pub high: u32,
    pub consult_recommended: u32,
}

/// Service for running screenings and maintaining local history.
pub struct ScreeningService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> ScreeningService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new screening service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Run a full screening on a validated answer record.
    ///
    /// The evaluation itself cannot partially fail; persistence failures
    /// are logged but do not discard the completed assessment.
    ///
    /// # Errors
    /// Returns error if the answers fail validation.
    pub fn run_screening(
        &self,
        answers: &QuestionnaireAnswers,
    ) -> Result<ScreeningRecord, CyclesenseError> {
        let assessment = engine::evaluate(answers)?;
        let record = ScreeningRecord::new(assessment);

        if let Err(e) = self.storage.save_screening(&record) {
            tracing::warn!("Failed to save screening: {:?}", e);
        }

        tracing::info!(
            "Screening complete: risk={}, pattern={}, consult={}",
            record.assessment.risk_level,
            record.assessment.pattern,
            record.assessment.doctor_needed
        );

        Ok(record)
    }

    /// Summarize recent screenings (up to `limit`) by risk tier.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn history_summary(&self, limit: usize) -> Result<HistorySummary, CyclesenseError> {
        let records = self
            .storage
            .load_recent_screenings(limit)
            .map_err(|e| CyclesenseError::Storage(e.into()))?;

        let mut summary = HistorySummary {
            total: records.len(),
            ..HistorySummary::default()
        };
        for record in &records {
            match record.assessment.risk_level {
                RiskLevel::Low => summary.low += 1,
                RiskLevel::Moderate => summary.moderate += 1,
                RiskLevel::High => summary.high += 1,
            }
            if record.assessment.doctor_needed {
                summary.consult_recommended += 1;
            }
        }

        Ok(summary)
    }

    /// Get total screening count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn screening_count(&self) -> Result<usize, CyclesenseError> {
        self.storage
            .count_screenings()
            .map_err(|e| CyclesenseError::Storage(e.into()))
    }

    /// Delete all stored screening history.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn clear_history(&self) -> Result<(), CyclesenseError> {
        tracing::warn!("Clearing all screening history");
        self.storage
            .clear_all()
            .map_err(|e| CyclesenseError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::{
        CycleLength, FacialHair, Frequency, PeriodPain, SleepQuality, WeightChange,
    };

    fn create_test_service() -> ScreeningService<SqliteStorage> {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        ScreeningService::new(storage)
    }

    fn sample_answers() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            cycle_length: CycleLength::Irregular,
            period_pain: PeriodPain::Occasional,
            stress_level: 8,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            sugar_cravings: Frequency::No,
            weight_change: WeightChange::No,
            facial_hair: FacialHair::No,
            age: Some(26),
            missed_periods: None,
            acne: None,
            hair_loss: None,
            anxiety: None,
            activity_level: None,
            diet_pattern: None,
            family_history: None,
        }
    }

    #[test]
    fn test_screening_pipeline() {
        let service = create_test_service();

        let record = service
            .run_screening(&sample_answers())
            .expect("Should run screening");

        assert_eq!(record.assessment.risk_score, record.assessment.signals.total());
        assert_eq!(service.screening_count().expect("Should count"), 1);
    }

    #[test]
    fn test_history_summary_buckets() {
        let service = create_test_service();
        service
            .run_screening(&sample_answers())
            .expect("Should run screening");

        let summary = service.history_summary(10).expect("Should summarize");
        assert_eq!(summary.total, 1);
        // stress 4+2+2=8, cycle 2, inflammation 1+1=2 => score 12, moderate
        assert_eq!(summary.moderate, 1);
        assert_eq!(summary.high, 0);
    }

    #[test]
    fn test_clear_history() {
        let service = create_test_service();
        service
            .run_screening(&sample_answers())
            .expect("Should run screening");
        service.clear_history().expect("Should clear");
        assert_eq!(service.screening_count().expect("Should count"), 0);
    }
}
