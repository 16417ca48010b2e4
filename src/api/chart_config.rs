use serde::{Deserialize, Serialize};

use crate::core::{Style, YAxisScale};
use crate::error::{ChartError, ChartResult};
use crate::render::ColorScheme;

/// History lengths supplied by the host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryWindow {
    /// Samples retained per series (buffer capacity).
    pub sample: usize,
    /// Samples drawn per series; never more than `sample`.
    pub visible: usize,
}

impl HistoryWindow {
    #[must_use]
    pub fn new(sample: usize, visible: usize) -> Self {
        Self { sample, visible }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.visible > self.sample {
            return Err(ChartError::InvalidData(format!(
                "visible history ({}) must not exceed sample history ({})",
                self.visible, self.sample
            )));
        }
        Ok(self)
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            sample: 600,
            visible: 60,
        }
    }
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub history: HistoryWindow,
    #[serde(default)]
    pub style: Style,
    #[serde(default = "default_rate_convert")]
    pub rate_convert: bool,
    #[serde(default = "default_antialiasing")]
    pub antialiasing: bool,
    #[serde(default = "default_legend_visible")]
    pub legend_visible: bool,
    #[serde(default = "default_max_legend_length")]
    pub max_legend_length: usize,
    #[serde(default)]
    pub scheme: ColorScheme,
    #[serde(default)]
    pub y_scale: YAxisScale,
    #[serde(default)]
    pub title: Option<String>,
}

impl ChartConfig {
    /// Creates a minimal config; the style starts out unset.
    #[must_use]
    pub fn new(history: HistoryWindow) -> Self {
        Self {
            history,
            style: Style::None,
            rate_convert: default_rate_convert(),
            antialiasing: default_antialiasing(),
            legend_visible: default_legend_visible(),
            max_legend_length: default_max_legend_length(),
            scheme: ColorScheme::default(),
            y_scale: YAxisScale::default(),
            title: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_rate_convert(mut self, rate_convert: bool) -> Self {
        self.rate_convert = rate_convert;
        self
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_y_scale(mut self, y_scale: YAxisScale) -> Self {
        self.y_scale = y_scale;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_max_legend_length(mut self, max_legend_length: usize) -> Self {
        self.max_legend_length = max_legend_length;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.history.validate()?;
        if self.style == Style::Event {
            return Err(ChartError::InvalidStyleTransition {
                from: Style::None,
                to: Style::Event,
            });
        }
        validate_y_scale(self.y_scale)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_y_scale(scale: YAxisScale) -> ChartResult<()> {
    if scale.auto {
        return Ok(());
    }
    if !scale.min.is_finite() || !scale.max.is_finite() || scale.min >= scale.max {
        return Err(ChartError::InvalidData(
            "fixed y scale must be finite with min < max".to_owned(),
        ));
    }
    Ok(())
}

fn default_rate_convert() -> bool {
    true
}

fn default_antialiasing() -> bool {
    true
}

fn default_legend_visible() -> bool {
    true
}

fn default_max_legend_length() -> usize {
    20
}
