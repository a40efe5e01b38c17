//! Frontier model timeline
//!
//! A short ascending-by-date list of "most capable publicly known model"
//! entries, queried by "which model was the frontier as of date D". The
//! list is static configuration, loaded once and never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One entry in the frontier model timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierModelEntry {
    effective_date: NaiveDate,
    name: String,
    org: String,
    training_compute_log10_flop: f64,
}

impl FrontierModelEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(
        effective_date: NaiveDate,
        name: impl Into<String>,
        org: impl Into<String>,
        training_compute_log10_flop: f64,
    ) -> Self {
        Self {
            effective_date,
            name: name.into(),
            org: org.into(),
            training_compute_log10_flop,
        }
    }

    /// Date from which this model counts as the frontier.
    #[must_use]
    pub const fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Releasing organization.
    #[must_use]
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Training compute as a log10 FLOP exponent.
    #[must_use]
    pub const fn training_compute_log10_flop(&self) -> f64 {
        self.training_compute_log10_flop
    }
}

/// Ascending-by-date sequence of frontier model entries.
#[derive(Debug, Default)]
pub struct FrontierTimeline {
    entries: Vec<FrontierModelEntry>,
}

impl FrontierTimeline {
    /// Build a timeline from entries already sorted by effective date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsortedTimeline`] if any entry is dated at or
    /// before its predecessor.
    pub fn new(entries: Vec<FrontierModelEntry>) -> Result<Self> {
        for (index, pair) in entries.windows(2).enumerate() {
            if pair[1].effective_date <= pair[0].effective_date {
                return Err(Error::UnsortedTimeline { index: index + 1 });
            }
        }
        Ok(Self { entries })
    }

    /// The frontier model as of `date`: the last entry whose effective
    /// date is at or before the query, or `None` when the query precedes
    /// the first entry.
    #[must_use]
    pub fn model_at(&self, date: NaiveDate) -> Option<&FrontierModelEntry> {
        let idx = self
            .entries
            .partition_point(|entry| entry.effective_date <= date);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }

    /// All entries in date order.
    #[must_use]
    pub fn entries(&self) -> &[FrontierModelEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
