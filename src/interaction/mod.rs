//! Point-picker state and value readouts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Unit;

/// A position on the plot in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickedPoint {
    /// Seconds since the Unix epoch.
    pub time: f64,
    /// Value in chart units.
    pub value: f64,
}

/// Last pointer position and last explicit selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PickerState {
    hover: Option<PickedPoint>,
    selection: Option<PickedPoint>,
}

impl PickerState {
    #[must_use]
    pub fn hover(self) -> Option<PickedPoint> {
        self.hover
    }

    #[must_use]
    pub fn selection(self) -> Option<PickedPoint> {
        self.selection
    }

    pub fn on_pointer_move(&mut self, point: PickedPoint) {
        self.hover = Some(point);
    }

    pub fn on_select(&mut self, point: PickedPoint) {
        self.hover = Some(point);
        self.selection = Some(point);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover = None;
    }
}

/// `[value unit at time]` with two decimals and a millisecond UTC clock.
#[must_use]
pub fn format_readout(point: PickedPoint, unit: &Unit) -> String {
    format!(
        "[{:.2} {unit} at {}]",
        point.value,
        format_time(point.time)
    )
}

/// `HH:MM:SS.mmm` for a time in epoch seconds; `?` when out of range.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "?".to_owned();
    }
    let millis = (seconds * 1000.0).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis).map_or_else(
        || "?".to_owned(),
        |time| time.format("%H:%M:%S%.3f").to_string(),
    )
}
