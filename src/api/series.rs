use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{AggregationLane, SeriesBuffer, Style, TimeScale, Unit};
use crate::render::Color;

/// Stable handle of a series within one chart.
///
/// Handles are never reused, so they stay valid regardless of how the
/// external metric registry orders its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub(crate) u64);

impl SeriesId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which metric (and instance) a series plots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricSpec {
    pub metric: String,
    #[serde(default)]
    pub instance: Option<String>,
    /// Host or archive the metric is fetched from.
    #[serde(default)]
    pub source: Option<String>,
}

impl MetricSpec {
    #[must_use]
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            instance: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// `metric[instance]`, or just `metric` without an instance.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.instance {
            Some(instance) => format!("{}[{instance}]", self.metric),
            None => self.metric.clone(),
        }
    }
}

/// How successive metric values relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Semantics {
    /// Monotonic cumulative counter; plotted as a rate when rate conversion is on.
    Counter,
    #[default]
    Instant,
    Discrete,
}

/// Continuous sampled values versus discrete event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueKind {
    #[default]
    Numeric,
    Event,
}

/// What the metric source reports about a metric before it is plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub spec: MetricSpec,
    pub units: Unit,
    #[serde(default)]
    pub semantics: Semantics,
    #[serde(default)]
    pub kind: ValueKind,
}

impl MetricDescriptor {
    #[must_use]
    pub fn new(spec: MetricSpec, units: Unit, semantics: Semantics) -> Self {
        Self {
            spec,
            units,
            semantics,
            kind: ValueKind::Numeric,
        }
    }

    #[must_use]
    pub fn event(spec: MetricSpec, units: Unit) -> Self {
        Self {
            spec,
            units,
            semantics: Semantics::Discrete,
            kind: ValueKind::Event,
        }
    }

    /// Units of the plotted value once rate conversion has been applied.
    #[must_use]
    pub fn plotted_units(&self, rate_convert: bool) -> Unit {
        if rate_convert && self.semantics == Semantics::Counter {
            self.units.rate_converted()
        } else {
            self.units
        }
    }

    /// Multiplier compensating for a native usec/msec time scale that rate
    /// conversion divided out (time counters plotted as time per time).
    #[must_use]
    pub fn compensation_scale(&self, plotted: &Unit, style: Style) -> f64 {
        if self.semantics != Semantics::Counter
            || plotted.dim_time != 0
            || style == Style::Utilisation
        {
            return 1.0;
        }
        match plotted.scale_time {
            TimeScale::Microsec => 0.000_001,
            TimeScale::Millisec => 0.001,
            _ => 1.0,
        }
    }
}

/// One plotted metric instance and its history.
#[derive(Debug, Clone)]
pub struct Series {
    pub(crate) id: SeriesId,
    pub(crate) descriptor: MetricDescriptor,
    pub(crate) units: Unit,
    pub(crate) legend: Option<String>,
    pub(crate) label: String,
    pub(crate) color: Color,
    pub(crate) scale: f64,
    pub(crate) hidden: bool,
    pub(crate) removed: bool,
    pub(crate) buffer: SeriesBuffer,
}

impl Series {
    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.descriptor.spec.display_name()
    }

    /// Units samples arrive in, before conversion to the chart unit.
    #[must_use]
    pub fn units(&self) -> Unit {
        self.units
    }

    /// Legend text given when the series was added, if any.
    #[must_use]
    pub fn legend(&self) -> Option<&str> {
        self.legend.as_deref()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    #[must_use]
    pub fn buffer(&self) -> &SeriesBuffer {
        &self.buffer
    }

    /// Instantaneous and discrete values hold until the next sample.
    #[must_use]
    pub fn is_stepped(&self) -> bool {
        matches!(
            self.descriptor.semantics,
            Semantics::Instant | Semantics::Discrete
        )
    }
}

impl AggregationLane for Series {
    fn buffer(&self) -> &SeriesBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut SeriesBuffer {
        &mut self.buffer
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Legend label for `name`: long names keep their tail behind `...`.
#[must_use]
pub fn legend_label(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len <= max_len {
        return name.to_owned();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = name.chars().skip(len - keep).collect();
    format!("...{tail}")
}
