use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Style, YAxisScale};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, ColorScheme, Renderer};

use super::{Chart, ChartConfig, HistoryWindow, MetricDescriptor, MetricSpec};

pub const VIEW_DEFINITION_JSON_SCHEMA_V1: u32 = 1;

/// One plotted metric as saved in a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesView {
    pub metric: MetricSpec,
    #[serde(default)]
    pub legend: Option<String>,
    /// `#rrggbb`.
    pub color: String,
}

/// Serializable description of a chart from which it can be rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDefinition {
    #[serde(default)]
    pub title: Option<String>,
    pub style: Style,
    #[serde(default)]
    pub scheme: ColorScheme,
    pub rate_convert: bool,
    pub antialiasing: bool,
    pub legend_visible: bool,
    pub y_scale: YAxisScale,
    #[serde(default)]
    pub series: Vec<SeriesView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDefinitionJsonContractV1 {
    pub schema_version: u32,
    pub view: ViewDefinition,
}

impl ViewDefinition {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ViewDefinitionJsonContractV1 {
            schema_version: VIEW_DEFINITION_JSON_SCHEMA_V1,
            view: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize view contract v1: {e}"))
        })
    }

    /// Accepts both a bare view and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(view) = serde_json::from_str::<ViewDefinition>(input) {
            return Ok(view);
        }
        let payload: ViewDefinitionJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse view json payload: {e}"))
        })?;
        if payload.schema_version != VIEW_DEFINITION_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported view schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.view)
    }
}

impl<R: Renderer> Chart<R> {
    /// Describes the chart's current configuration and its attached series.
    /// Removed series are not part of the view.
    #[must_use]
    pub fn view_definition(&self) -> ViewDefinition {
        ViewDefinition {
            title: self.title.clone(),
            style: self.style,
            scheme: self.scheme.clone(),
            rate_convert: self.rate_convert,
            antialiasing: self.antialiasing,
            legend_visible: self.legend_visible,
            y_scale: self.scale_engine.scale(),
            series: self
                .series
                .values()
                .filter(|series| !series.removed)
                .map(|series| SeriesView {
                    metric: series.descriptor.spec.clone(),
                    legend: series.legend.clone(),
                    color: series.color.to_hex(),
                })
                .collect(),
        }
    }

    /// Builds a chart from a saved view; `resolve` looks up each metric's
    /// descriptor.
    pub fn from_view(
        renderer: R,
        history: HistoryWindow,
        view: &ViewDefinition,
        resolve: impl FnMut(&MetricSpec) -> ChartResult<MetricDescriptor>,
    ) -> ChartResult<Self> {
        let mut chart = Self::new(renderer, ChartConfig::new(history))?;
        chart.restore_view(view, resolve)?;
        Ok(chart)
    }

    /// Applies a saved view to a chart that has no series yet.
    pub fn restore_view(
        &mut self,
        view: &ViewDefinition,
        mut resolve: impl FnMut(&MetricSpec) -> ChartResult<MetricDescriptor>,
    ) -> ChartResult<()> {
        if !self.series.is_empty() {
            return Err(ChartError::InvalidData(
                "views can only be restored into an empty chart".to_owned(),
            ));
        }
        let colors = view
            .series
            .iter()
            .map(|series| Color::from_hex(&series.color))
            .collect::<ChartResult<Vec<_>>>()?;
        debug!(series = view.series.len(), style = ?view.style, "restore view");

        self.title = view.title.clone();
        self.rate_convert = view.rate_convert;
        self.antialiasing = view.antialiasing;
        self.legend_visible = view.legend_visible;
        self.set_scheme(view.scheme.clone())?;
        if view.style.is_sampled() {
            self.set_style(view.style)?;
        }

        for (entry, color) in view.series.iter().zip(colors) {
            let descriptor = resolve(&entry.metric)?;
            let id = self.add_series(descriptor, entry.legend.as_deref())?;
            self.series_mut(id)?.color = color;
        }

        if !self.is_event_chart() && self.style != Style::Utilisation {
            self.set_scale(view.y_scale)?;
        }
        self.replot()
    }
}
