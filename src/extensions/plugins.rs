use serde::{Deserialize, Serialize};

use crate::api::SeriesId;
use crate::core::{PushDirection, Style, Unit};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub style: Style,
    pub unit: Unit,
    pub event_chart: bool,
    pub series_len: usize,
    pub active_series_len: usize,
    pub y_bounds: Option<(f64, f64)>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    /// Sent once to a plugin when it is registered.
    Attached,
    /// Sent once to a plugin as it is unregistered.
    Detached,
    SeriesAdded { series: SeriesId },
    SeriesRemoved { series: SeriesId },
    SeriesRevived { series: SeriesId },
    SeriesVisibilityChanged { series: SeriesId, hidden: bool },
    Ticked { direction: PushDirection },
    StyleChanged { from: Style, to: Style },
    Rescaled { from: Unit, to: Unit },
    HistoryResized { sample: usize, visible: usize },
    PointSelected { time: f64, value: f64 },
    PointerMoved { time: f64, value: f64 },
    Rendered { curves: usize },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read chart context without mutating core
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
