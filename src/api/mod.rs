//! Chart controller: owns the series set and drives buffering, aggregation,
//! rescaling and redraws.

mod chart_config;
mod data_controller;
mod interaction_controller;
mod metric_source;
mod plugin_dispatch;
mod replot;
mod scale_controller;
mod series;
mod series_controller;
mod style_controller;
mod title;
mod view_definition;

use indexmap::IndexMap;

pub use chart_config::{ChartConfig, HistoryWindow};
pub use metric_source::{FnSource, MetricSample, MetricSource, source_from_fn};
pub use replot::UTILISATION_AXIS_TITLE;
pub use series::{
    MetricDescriptor, MetricSpec, Semantics, Series, SeriesId, ValueKind, legend_label,
};
pub use title::shorten_host;
pub use view_definition::{
    SeriesView, VIEW_DEFINITION_JSON_SCHEMA_V1, ViewDefinition, ViewDefinitionJsonContractV1,
};

use crate::core::{ScaleEngine, Style, Unit};
use crate::error::ChartResult;
use crate::extensions::ChartPlugin;
use crate::interaction::PickerState;
use crate::render::{ColorScheme, Renderer, TimeAxisRange};

/// One chart: a set of series sharing a unit, a style and a value axis.
pub struct Chart<R: Renderer> {
    renderer: R,
    history: HistoryWindow,
    series: IndexMap<SeriesId, Series>,
    next_series_id: u64,
    unit: Unit,
    style: Style,
    scale_engine: ScaleEngine,
    rate_convert: bool,
    antialiasing: bool,
    legend_visible: bool,
    max_legend_length: usize,
    scheme: ColorScheme,
    color_sequence: usize,
    title: Option<String>,
    time_axis: Option<TimeAxisRange>,
    y_bounds: Option<(f64, f64)>,
    picker: PickerState,
    plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> Chart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            history: config.history,
            series: IndexMap::new(),
            next_series_id: 0,
            unit: Unit::dimensionless(),
            style: config.style,
            scale_engine: ScaleEngine::Sampling(config.y_scale),
            rate_convert: config.rate_convert,
            antialiasing: config.antialiasing,
            legend_visible: config.legend_visible,
            max_legend_length: config.max_legend_length,
            scheme: config.scheme,
            color_sequence: 0,
            title: config.title,
            time_axis: None,
            y_bounds: None,
            picker: PickerState::default(),
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn history(&self) -> HistoryWindow {
        self.history
    }

    /// Unit shared by every series on this chart.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Whether the chart plots discrete events rather than sampled values.
    #[must_use]
    pub fn is_event_chart(&self) -> bool {
        matches!(self.scale_engine, ScaleEngine::Tracing)
    }

    #[must_use]
    pub fn rate_convert(&self) -> bool {
        self.rate_convert
    }

    #[must_use]
    pub fn antialiasing(&self) -> bool {
        self.antialiasing
    }

    #[must_use]
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Position of the next color in the scheme.
    #[must_use]
    pub fn color_sequence(&self) -> usize {
        self.color_sequence
    }

    /// Y-axis bounds of the last redraw.
    #[must_use]
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.y_bounds
    }

    #[must_use]
    pub fn time_axis(&self) -> Option<TimeAxisRange> {
        self.time_axis
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn lanes(&mut self) -> Vec<&mut Series> {
        self.series.values_mut().collect()
    }
}
