use tracing::{debug, trace, warn};

use crate::core::{PushDirection, aggregate_newest, convert, rebuild};
use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::render::{Renderer, TimeAxisRange};

use super::{Chart, HistoryWindow, MetricSource};

impl<R: Renderer> Chart<R> {
    /// Pulls one sample per series from `source`, pushes it at the
    /// `direction` end, recomputes the newest display slot, then redraws and
    /// re-evaluates the display unit.
    ///
    /// Removed series keep receiving samples. Failed fetches are stored as
    /// gaps.
    pub fn tick(
        &mut self,
        source: &mut impl MetricSource,
        direction: PushDirection,
    ) -> ChartResult<()> {
        self.advance(source, direction)?;
        self.replot()?;
        self.redo_scale()?;
        Ok(())
    }

    /// Same as [`Chart::tick`] for a chart that is not on screen: buffers
    /// and display values advance but nothing is drawn or rescaled.
    pub fn tick_offscreen(
        &mut self,
        source: &mut impl MetricSource,
        direction: PushDirection,
    ) -> ChartResult<()> {
        self.advance(source, direction)
    }

    fn advance(
        &mut self,
        source: &mut impl MetricSource,
        direction: PushDirection,
    ) -> ChartResult<()> {
        if self.series.is_empty() {
            return Ok(());
        }
        let chart_unit = self.unit;
        let rate_convert = self.rate_convert;
        for series in self.series.values_mut() {
            let value = match source
                .sample(series.id, &series.descriptor.spec)
                .value(rate_convert)
            {
                Some(value) => convert(value, &series.units, &chart_unit)? * series.scale,
                None => {
                    trace!(series = %series.id, "fetch error, storing gap");
                    f64::NAN
                }
            };
            series.buffer.push(value, direction);
        }
        let style = self.style;
        aggregate_newest(style, &mut self.lanes(), direction);
        trace!(series = self.series.len(), ?direction, "tick");
        self.emit_plugin_event(PluginEvent::Ticked { direction });
        Ok(())
    }

    /// Overwrites slot `index` of every series with slot `old_index`, or
    /// with a gap where `old_index` was never populated.
    pub fn preserve_live_data(&mut self, index: usize, old_index: usize) {
        for series in self.series.values_mut() {
            series.buffer.substitute_at(index, old_index);
        }
    }

    /// Punches a gap into slot `index` of every series.
    pub fn punchout_live_data(&mut self, index: usize) {
        for series in self.series.values_mut() {
            series.buffer.clear_at(index);
        }
    }

    /// Changes the sample and visible history lengths, resizing every
    /// buffer and recomputing all display values.
    pub fn set_history_window(&mut self, window: HistoryWindow) -> ChartResult<()> {
        let window = window.validate()?;
        if window == self.history {
            return Ok(());
        }
        debug!(
            sample = window.sample,
            visible = window.visible,
            "resize history"
        );
        for series in self.series.values_mut() {
            series.buffer.resize(window.sample)?;
        }
        self.history = window;
        self.emit_plugin_event(PluginEvent::HistoryResized {
            sample: window.sample,
            visible: window.visible,
        });
        self.refresh()
    }

    /// Recomputes every display value from raw history and redraws.
    pub fn refresh(&mut self) -> ChartResult<()> {
        let style = self.style;
        if !style.is_renderable() {
            return Ok(());
        }
        rebuild(style, &mut self.lanes());
        self.replot()
    }

    /// Records the bottom axis range for the next redraw.
    pub fn update_time_axis(&mut self, leftmost: f64, rightmost: f64, delta: f64) {
        if !(leftmost.is_finite() && rightmost.is_finite() && delta.is_finite()) {
            warn!(leftmost, rightmost, delta, "ignoring non-finite time axis");
            return;
        }
        self.time_axis = Some(TimeAxisRange {
            leftmost,
            rightmost,
            delta,
        });
    }
}
