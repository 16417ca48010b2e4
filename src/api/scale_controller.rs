use tracing::debug;

use crate::core::{Style, YAxisScale, apply_rescale, plan_rescale};
use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::Chart;
use super::chart_config::validate_y_scale;

impl<R: Renderer> Chart<R> {
    /// Current value-axis scale. Event charts always report a fixed 0..1.
    #[must_use]
    pub fn scale(&self) -> YAxisScale {
        self.scale_engine.scale()
    }

    /// Whether the value axis follows the data (and units may rescale).
    #[must_use]
    pub fn auto_scale(&self) -> bool {
        self.scale_engine.is_auto()
    }

    /// Switches between auto-scaling and fixed bounds, then redraws and
    /// re-evaluates the display unit.
    pub fn set_scale(&mut self, scale: YAxisScale) -> ChartResult<()> {
        validate_y_scale(scale)?;
        debug!(auto = scale.auto, min = scale.min, max = scale.max, "set scale");
        self.scale_engine.set_scale(scale);
        self.replot()?;
        self.redo_scale()?;
        Ok(())
    }

    /// Steps the chart unit when the auto-scaled upper bound of the last
    /// redraw has left the readable range, converting all stored history.
    ///
    /// Returns `true` when a rescale happened.
    pub fn redo_scale(&mut self) -> ChartResult<bool> {
        if !self.scale_engine.is_auto() {
            return Ok(false);
        }
        let Some((_, upper)) = self.y_bounds else {
            return Ok(false);
        };
        let Some(plan) = plan_rescale(self.unit, upper) else {
            return Ok(false);
        };

        let convert_display = self.style != Style::Utilisation;
        apply_rescale(&mut self.lanes(), &plan, convert_display)?;
        self.unit = plan.to;
        debug!(
            upper,
            scaled = plan.scaled_bound,
            unit = %self.unit,
            "change units"
        );
        self.emit_plugin_event(PluginEvent::Rescaled {
            from: plan.from,
            to: plan.to,
        });
        self.replot()?;
        Ok(true)
    }
}
