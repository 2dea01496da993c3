//! SQLite adapter: Implementation of Storage.
//!
//! Provides local persistence for screening history. All data stays on
//! the local machine; nothing is transmitted.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex (from
//! panic in another thread) will cause panic. This fail-fast behavior is
//! intentional for data integrity in healthcare applications.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::domain::{
    Assessment, PcosPattern, RiskLevel, ScreeningRecord, SignalVector,
};
use crate::ports::{ScreeningPage, Storage};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// SQLite storage adapter.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS screenings (
                id TEXT PRIMARY KEY,
                cycle_signal INTEGER NOT NULL,
                stress_signal INTEGER NOT NULL,
                insulin_signal INTEGER NOT NULL,
                androgen_signal INTEGER NOT NULL,
                inflammation_signal INTEGER NOT NULL,
                risk_score INTEGER NOT NULL,
                risk_level TEXT NOT NULL,
                pattern TEXT NOT NULL,
                explanation TEXT NOT NULL,
                confidence REAL NOT NULL,
                doctor_needed INTEGER NOT NULL,
                doctor_reasons TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_screenings_created
                ON screenings(created_at DESC);
            ",
        )?;

        Ok(())
    }

    /// Convert RiskLevel to string for storage.
    fn risk_level_to_string(level: RiskLevel) -> &'static str {
        match level {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Convert string to RiskLevel.
    fn string_to_risk_level(s: &str) -> RiskLevel {
        match s.to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Moderate,
        }
    }

    /// Convert PcosPattern to string for storage.
    fn pattern_to_string(pattern: PcosPattern) -> &'static str {
        match pattern {
            PcosPattern::Adrenal => "adrenal",
            PcosPattern::InsulinResistant => "insulin_resistant",
            PcosPattern::Lean => "lean",
            PcosPattern::Inflammatory => "inflammatory",
            PcosPattern::Unclear => "unclear",
        }
    }

    /// Convert string to PcosPattern.
    fn string_to_pattern(s: &str) -> PcosPattern {
        match s {
            "adrenal" => PcosPattern::Adrenal,
            "insulin_resistant" => PcosPattern::InsulinResistant,
            "lean" => PcosPattern::Lean,
            "inflammatory" => PcosPattern::Inflammatory,
            _ => PcosPattern::Unclear,
        }
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScreeningRecord> {
        let id: String = row.get(0)?;
        let signals = SignalVector {
            cycle: row.get(1)?,
            stress: row.get(2)?,
            insulin: row.get(3)?,
            androgen: row.get(4)?,
            inflammation: row.get(5)?,
        };
        let risk_score: u32 = row.get(6)?;
        let risk_level_str: String = row.get(7)?;
        let pattern_str: String = row.get(8)?;
        let explanation: String = row.get(9)?;
        let confidence: f64 = row.get(10)?;
        let doctor_needed: i64 = row.get(11)?;
        let doctor_reasons_json: String = row.get(12)?;
        let created_at_str: String = row.get(13)?;

        let doctor_reasons: Vec<String> =
            serde_json::from_str(&doctor_reasons_json).unwrap_or_default();

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| chrono::Utc::now());

        Ok(ScreeningRecord {
            id,
            assessment: Assessment {
                signals,
                risk_score,
                risk_level: Self::string_to_risk_level(&risk_level_str),
                pattern: Self::string_to_pattern(&pattern_str),
                explanation,
                confidence,
                doctor_needed: doctor_needed != 0,
                doctor_reasons,
            },
            created_at,
        })
    }
}

impl Storage for SqliteStorage {
    type Error = StorageError;

    fn save_screening(&self, record: &ScreeningRecord) -> Result<(), Self::Error> {
        let reasons_json = serde_json::to_string(&record.assessment.doctor_reasons)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let conn = self.conn.lock().expect("Lock failed");

        let a = &record.assessment;
        conn.execute(
            r"
            INSERT INTO screenings (
                id, cycle_signal, stress_signal, insulin_signal,
                androgen_signal, inflammation_signal, risk_score, risk_level,
                pattern, explanation, confidence, doctor_needed,
                doctor_reasons, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ",
            params![
                record.id,
                a.signals.cycle,
                a.signals.stress,
                a.signals.insulin,
                a.signals.androgen,
                a.signals.inflammation,
                a.risk_score,
                Self::risk_level_to_string(a.risk_level),
                Self::pattern_to_string(a.pattern),
                a.explanation,
                a.confidence,
                i64::from(a.doctor_needed),
                reasons_json,
                record.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Saved screening {} to storage", record.id);
        Ok(())
    }

    fn load_recent_screenings(&self, limit: usize) -> Result<Vec<ScreeningRecord>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt = conn.prepare(
            r"
            SELECT id, cycle_signal, stress_signal, insulin_signal,
                   androgen_signal, inflammation_signal, risk_score, risk_level,
                   pattern, explanation, confidence, doctor_needed,
                   doctor_reasons, created_at
            FROM screenings
            ORDER BY created_at DESC
            LIMIT ?1
            ",
        )?;

        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn load_screenings_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<ScreeningPage, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM screenings", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(
            r"
            SELECT id, cycle_signal, stress_signal, insulin_signal,
                   androgen_signal, inflammation_signal, risk_score, risk_level,
                   pattern, explanation, confidence, doctor_needed,
                   doctor_reasons, created_at
            FROM screenings
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            ",
        )?;

        let items = stmt
            .query_map(params![limit as i64, offset as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScreeningPage::new(
            items,
            total_count as usize,
            offset,
            limit,
        ))
    }

    fn count_screenings(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM screenings", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM screenings", [])?;
        tracing::info!("Cleared all screenings from storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Assessment, PcosPattern, RiskLevel, ScreeningRecord, SignalVector};

    fn sample_record() -> ScreeningRecord {
        ScreeningRecord::new(Assessment {
            signals: SignalVector {
                cycle: 3,
                stress: 8,
                insulin: 0,
                androgen: 0,
                inflammation: 3,
            },
            risk_score: 14,
            risk_level: RiskLevel::High,
            pattern: PcosPattern::Adrenal,
            explanation: PcosPattern::Adrenal.explanation().to_string(),
            confidence: 70.0,
            doctor_needed: true,
            doctor_reasons: vec![
                "overall high risk pattern".to_string(),
                "severe pain with cycle irregularity".to_string(),
            ],
        })
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let record = sample_record();

        storage.save_screening(&record).expect("Should save");

        let loaded = storage
            .load_recent_screenings(10)
            .expect("Should load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, record.id);
        assert_eq!(loaded[0].assessment, record.assessment);
    }

    #[test]
    fn test_count_and_clear() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        storage.save_screening(&sample_record()).expect("Should save");
        storage.save_screening(&sample_record()).expect("Should save");

        assert_eq!(storage.count_screenings().expect("Should count"), 2);

        storage.clear_all().expect("Should clear");
        assert_eq!(storage.count_screenings().expect("Should count"), 0);
    }

    #[test]
    fn test_pagination() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        for _ in 0..5 {
            storage.save_screening(&sample_record()).expect("Should save");
        }

        let page = storage
            .load_screenings_paginated(0, 2)
            .expect("Should page");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert!(page.has_more);
        assert_eq!(page.next_offset(), Some(2));

        let last = storage
            .load_screenings_paginated(4, 2)
            .expect("Should page");
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_more);
    }
}
