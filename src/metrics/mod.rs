//! Health Metrics
//!
//! Titled groups of percentage indicators, and the tolerant extractor that
//! builds them from free-form model output.
//!
//! ## Input convention
//!
//! ```text
//! ### Sleep
//! Quality: 70%
//! Duration: 60%
//! ```
//!
//! The convention is a hint, not a contract. See [`extract`] for how every
//! deviation from it is absorbed.

mod extractor;

pub use extractor::{
    extract, extract_with, ExtractorOptions, DEFAULT_INDICATOR_VALUE, SECTION_MARKER,
};

use serde::{Deserialize, Serialize};

/// Upper bound of the advisory percentage range.
pub const MAX_INDICATOR_VALUE: u8 = 100;

/// One labelled percentage inside a [`MetricGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    pub value: u8,
}

impl Indicator {
    pub fn new(label: impl Into<String>, value: u8) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A titled cluster of indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub title: String,
    pub indicators: Vec<Indicator>,
}

impl MetricGroup {
    /// Build a group from `(label, value)` pairs.
    pub fn new<L, I>(title: impl Into<String>, indicators: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, u8)>,
    {
        Self {
            title: title.into(),
            indicators: indicators
                .into_iter()
                .map(|(label, value)| Indicator::new(label, value))
                .collect(),
        }
    }

    /// A group is only emitted once it has a title and at least one indicator.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.indicators.is_empty()
    }
}
