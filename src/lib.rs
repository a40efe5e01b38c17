//! # capcurve: Time-Series Positioning for Capability Trend Charts
//!
//! capcurve is the numerical core behind a chart that overlays dated
//! claims on AI-capability progress curves. It turns a handful of
//! irregularly sampled metric points into:
//!
//! - a continuous value at an arbitrary date (clamped interpolation),
//! - a padded logarithmic or linear axis domain,
//! - deterministic visual jitter so nearby points never stack,
//! - smooth animated transitions of the visible date window,
//! - filtered axis ticks rendered in `10ⁿ` exponent notation.
//!
//! All data is static and memory-resident; everything runs on the single
//! rendering thread and every render-path call is cheap enough to make
//! once per frame.
//!
//! ## Example
//!
//! ```rust
//! use capcurve::dataset::Dataset;
//! use capcurve::scale::compute_domain;
//! use chrono::NaiveDate;
//!
//! let dataset = Dataset::from_json(r#"{
//!     "metrics": [{
//!         "id": "training_compute",
//!         "valueKind": "log10Flop",
//!         "points": [
//!             { "date": "2020-01-01", "value": 23.0 },
//!             { "date": "2023-03-01", "value": 25.3 }
//!         ]
//!     }]
//! }"#)?;
//!
//! let series = dataset.store().get("training_compute").unwrap();
//! let date = NaiveDate::from_ymd_opt(2021, 8, 1).unwrap();
//! let exponent = series.value_at(date);
//! assert!(exponent > 23.0 && exponent < 25.3);
//!
//! let domain = compute_domain(
//!     dataset.store(),
//!     &["training_compute"],
//!     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! );
//! assert!(domain[0] < 1e23 && domain[1] > 1e25);
//! # Ok::<(), capcurve::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod animator;
pub mod dataset;
pub mod error;
pub mod frontier;
pub mod jitter;
pub mod scale;
pub mod series;
pub mod ticks;

pub use error::{Error, Result};
