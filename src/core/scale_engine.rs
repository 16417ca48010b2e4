use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Y-axis bounds and whether they follow the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisScale {
    pub auto: bool,
    pub min: f64,
    pub max: f64,
}

impl Default for YAxisScale {
    fn default() -> Self {
        Self {
            auto: true,
            min: 0.0,
            max: 1.0,
        }
    }
}

impl YAxisScale {
    pub const PERCENTAGE: Self = Self {
        auto: false,
        min: 0.0,
        max: 100.0,
    };

    pub const EVENT: Self = Self {
        auto: false,
        min: 0.0,
        max: 1.0,
    };
}

/// Value-axis engine, fixed once the first series decides the chart type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScaleEngine {
    /// Sampled values; auto-scaling and unit rescaling apply.
    Sampling(YAxisScale),
    /// Discrete events; always a fixed 0..1 axis.
    Tracing,
}

impl Default for ScaleEngine {
    fn default() -> Self {
        Self::Sampling(YAxisScale::default())
    }
}

impl ScaleEngine {
    #[must_use]
    pub fn scale(&self) -> YAxisScale {
        match self {
            Self::Sampling(scale) => *scale,
            Self::Tracing => YAxisScale::EVENT,
        }
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.scale().auto
    }

    /// Updates the sampling scale; the tracing axis cannot be changed.
    pub fn set_scale(&mut self, scale: YAxisScale) {
        if let Self::Sampling(current) = self {
            *current = scale;
        }
    }

    pub fn set_auto(&mut self, auto: bool) {
        if let Self::Sampling(current) = self {
            current.auto = auto;
        }
    }

    /// Axis bounds for the values currently on screen.
    ///
    /// In auto mode the range spans the finite values, always including zero;
    /// `None` when there is nothing finite to show. Fixed scales return their
    /// configured bounds.
    #[must_use]
    pub fn bounds(&self, values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
        let scale = self.scale();
        if !scale.auto {
            return Some((scale.min, scale.max));
        }
        let (min, max) = values
            .into_iter()
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .fold(None::<(OrderedFloat<f64>, OrderedFloat<f64>)>, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })?;
        Some((min.0.min(0.0), max.0))
    }
}
