use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::interaction::{PickedPoint, PickerState, format_readout};
use crate::render::Renderer;

use super::Chart;

impl<R: Renderer> Chart<R> {
    #[must_use]
    pub fn picker(&self) -> PickerState {
        self.picker
    }

    /// Records a click at (`time`, `value`) and returns the readout text.
    pub fn point_selected(&mut self, time: f64, value: f64) -> ChartResult<String> {
        let point = picked_point(time, value)?;
        self.picker.on_select(point);
        self.emit_plugin_event(PluginEvent::PointSelected { time, value });
        Ok(format_readout(point, &self.unit))
    }

    /// Records a drag/hover at (`time`, `value`) and returns the readout text.
    pub fn pointer_moved(&mut self, time: f64, value: f64) -> ChartResult<String> {
        let point = picked_point(time, value)?;
        self.picker.on_pointer_move(point);
        self.emit_plugin_event(PluginEvent::PointerMoved { time, value });
        Ok(format_readout(point, &self.unit))
    }

    pub fn pointer_left(&mut self) {
        self.picker.on_pointer_leave();
    }
}

fn picked_point(time: f64, value: f64) -> ChartResult<PickedPoint> {
    if !time.is_finite() || !value.is_finite() {
        return Err(ChartError::InvalidData(
            "picked point must be finite".to_owned(),
        ));
    }
    Ok(PickedPoint { time, value })
}
