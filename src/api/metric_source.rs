use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{MetricSpec, SeriesId};

/// Value of one metric at one tick, as reported by the fetch layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricSample {
    Value {
        /// Value as fetched.
        current: f64,
        /// Value after counter rate conversion (same as `current` otherwise).
        rate: f64,
    },
    /// The fetch failed; plotted as a gap.
    Error,
}

impl MetricSample {
    /// Sample of a non-counter metric.
    #[must_use]
    pub fn instant(value: f64) -> Self {
        Self::Value {
            current: value,
            rate: value,
        }
    }

    #[must_use]
    pub fn counter(current: f64, rate: f64) -> Self {
        Self::Value { current, rate }
    }

    /// The value to plot, or `None` for failed fetches.
    #[must_use]
    pub fn value(self, rate_convert: bool) -> Option<f64> {
        match self {
            Self::Value { rate, .. } if rate_convert => Some(rate),
            Self::Value { current, .. } => Some(current),
            Self::Error => None,
        }
    }
}

/// Synchronous, non-blocking access to pre-fetched metric values.
pub trait MetricSource {
    fn sample(&mut self, series: SeriesId, metric: &MetricSpec) -> MetricSample;
}

/// Adapts a closure into a [`MetricSource`].
pub fn source_from_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut(SeriesId, &MetricSpec) -> MetricSample,
{
    FnSource(f)
}

/// See [`source_from_fn`].
#[derive(Debug, Clone)]
pub struct FnSource<F>(F);

impl<F> MetricSource for FnSource<F>
where
    F: FnMut(SeriesId, &MetricSpec) -> MetricSample,
{
    fn sample(&mut self, series: SeriesId, metric: &MetricSpec) -> MetricSample {
        (self.0)(series, metric)
    }
}

/// Per-series values keyed by handle; series without an entry read as errors.
impl MetricSource for IndexMap<SeriesId, MetricSample> {
    fn sample(&mut self, series: SeriesId, _metric: &MetricSpec) -> MetricSample {
        self.get(&series).copied().unwrap_or(MetricSample::Error)
    }
}
