use serde::{Deserialize, Serialize};

use crate::api::SeriesId;
use crate::core::{CurveStroke, Style};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Bottom axis range supplied by the host's time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisRange {
    pub leftmost: f64,
    pub rightmost: f64,
    pub delta: f64,
}

/// Everything the view needs to draw one series.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFrame {
    pub series: SeriesId,
    pub label: String,
    pub color: Color,
    pub stroke: CurveStroke,
    /// Cleared when the legend check-box hides the series.
    pub visible: bool,
    /// Stacking order; earlier series sit on top.
    pub z: i32,
    /// Display values, newest end first in live mode.
    pub values: Vec<f64>,
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub style: Style,
    pub title: Option<String>,
    pub y_axis_title: String,
    pub y_bounds: Option<(f64, f64)>,
    pub time_axis: Option<TimeAxisRange>,
    pub legend_visible: bool,
    pub antialiasing: bool,
    pub curves: Vec<CurveFrame>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(style: Style) -> Self {
        Self {
            style,
            title: None,
            y_axis_title: String::new(),
            y_bounds: None,
            time_axis: None,
            legend_visible: true,
            antialiasing: true,
            curves: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_curve(mut self, curve: CurveFrame) -> Self {
        self.curves.push(curve);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.style.is_renderable() {
            return Err(ChartError::InvalidStyleTransition {
                from: self.style,
                to: self.style,
            });
        }
        if let Some((min, max)) = self.y_bounds {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(ChartError::InvalidData(format!(
                    "y bounds must be finite and ordered, got {min}..{max}"
                )));
            }
        }
        for curve in &self.curves {
            curve.color.validate()?;
        }
        Ok(())
    }

    /// All display values drawn in this frame, in curve order.
    pub fn visible_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.curves
            .iter()
            .filter(|curve| curve.visible)
            .flat_map(|curve| curve.values.iter().copied())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
