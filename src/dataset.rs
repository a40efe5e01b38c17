//! Static dataset loading
//!
//! The input dataset is read-only configuration: per-metric arrays of
//! `{date, value}` samples plus the frontier model list, shipped as JSON
//! and loaded once at startup. This module deserializes that file into a
//! validated [`SeriesStore`] and [`FrontierTimeline`]; it is the only
//! place in the crate where an operation can fail.
//!
//! ## Format
//!
//! ```json
//! {
//!   "metrics": [
//!     {
//!       "id": "training_compute",
//!       "valueKind": "log10Flop",
//!       "points": [{ "date": "2020-01-01", "value": 23.0 }]
//!     }
//!   ],
//!   "frontierModels": [
//!     { "date": "2023-03-14", "model": "GPT-4", "org": "OpenAI", "computeLog10Flop": 25.3 }
//!   ]
//! }
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::frontier::{FrontierModelEntry, FrontierTimeline};
use crate::series::{MetricPoint, MetricSeries, SeriesStore, ValueKind};
use crate::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    metrics: Vec<RawMetric>,
    #[serde(default)]
    frontier_models: Vec<RawFrontierEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetric {
    id: String,
    value_kind: ValueKind,
    /// Overrides the kind's default when present.
    anchors_domain: Option<bool>,
    points: Vec<MetricPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrontierEntry {
    date: NaiveDate,
    model: String,
    org: String,
    compute_log10_flop: f64,
}

/// The fully loaded, validated static dataset.
#[derive(Debug)]
pub struct Dataset {
    store: SeriesStore,
    frontier: FrontierTimeline,
}

impl Dataset {
    /// Parse and validate a JSON dataset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] for malformed JSON and the relevant
    /// construction error for unsorted or empty series, unsorted frontier
    /// entries, or duplicate metric ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;

        let mut store = SeriesStore::new();
        for metric in raw.metrics {
            let mut series = MetricSeries::new(metric.id, metric.value_kind, metric.points)?;
            if let Some(anchors) = metric.anchors_domain {
                series = series.with_domain_anchor(anchors);
            }
            store.insert(series)?;
        }

        let frontier = FrontierTimeline::new(
            raw.frontier_models
                .into_iter()
                .map(|e| FrontierModelEntry::new(e.date, e.model, e.org, e.compute_log10_flop))
                .collect(),
        )?;

        debug!(
            series = store.series_count(),
            frontier_entries = frontier.len(),
            "dataset loaded"
        );
        Ok(Self { store, frontier })
    }

    /// The metric series store.
    #[must_use]
    pub const fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// The frontier model timeline.
    #[must_use]
    pub const fn frontier(&self) -> &FrontierTimeline {
        &self.frontier
    }
}
