//! Storage port: Trait for persistent screening history.
//!
//! This trait abstracts the storage backend (SQLite) from the application
//! logic. The engine itself never touches storage; only the screening
//! service does, after an assessment is complete.

use crate::domain::ScreeningRecord;

/// A page of screening records with pagination metadata.
#[derive(Debug, Clone)]
pub struct ScreeningPage {
    /// Records in this page
    pub items: Vec<ScreeningRecord>,
    /// Total count of all records (for UI pagination)
    pub total_count: usize,
    /// Current page offset
    pub offset: usize,
    /// Page size limit
    pub limit: usize,
    /// Whether there are more pages
    pub has_more: bool,
}

impl ScreeningPage {
    /// Create a new page.
    #[must_use]
    pub fn new(items: Vec<ScreeningRecord>, total_count: usize, offset: usize, limit: usize) -> Self {
        let has_more = offset + items.len() < total_count;
        Self {
            items,
            total_count,
            offset,
            limit,
            has_more,
        }
    }

    /// Get the next page offset.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        if self.has_more {
            Some(self.offset + self.limit)
        } else {
            None
        }
    }
}

/// Trait for local storage operations.
///
/// All data is stored locally and never transmitted.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a completed screening.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_screening(&self, record: &ScreeningRecord) -> Result<(), Self::Error>;

    /// Load recent screenings (up to `limit`), newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent_screenings(&self, limit: usize) -> Result<Vec<ScreeningRecord>, Self::Error>;

    /// Load screenings with pagination.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_screenings_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<ScreeningPage, Self::Error>;

    /// Get the total count of stored screenings.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count_screenings(&self) -> Result<usize, Self::Error>;

    /// Delete all stored screenings.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
