use tracing::trace;

use crate::core::{CurveStroke, Style};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::render::{CurveFrame, RenderFrame, Renderer};

use super::Chart;

/// Z order of the first series; later series are drawn beneath it.
const FIRST_SERIES_Z: i32 = 998;

/// Axis label used for utilisation charts regardless of the metric unit.
pub const UTILISATION_AXIS_TITLE: &str = "% utilization";

impl<R: Renderer> Chart<R> {
    /// Value-axis label: the canonical unit string, or the percentage label
    /// for utilisation charts.
    #[must_use]
    pub fn y_axis_title(&self) -> String {
        if self.style == Style::Utilisation {
            UTILISATION_AXIS_TITLE.to_owned()
        } else {
            self.unit.to_string()
        }
    }

    /// Builds the frame for the current state without drawing it.
    ///
    /// Each attached series contributes its first `min(visible, count)`
    /// display values; removed series are skipped.
    pub fn render_frame(&self) -> ChartResult<RenderFrame> {
        let style = self.style;
        let invalid = || ChartError::InvalidStyleTransition {
            from: style,
            to: style,
        };
        if !style.is_renderable() {
            return Err(invalid());
        }

        let mut frame = RenderFrame::new(style);
        frame.title = self.title.clone();
        frame.y_axis_title = self.y_axis_title();
        frame.time_axis = self.time_axis;
        frame.legend_visible = self.legend_visible();
        frame.antialiasing = self.antialiasing;

        for (position, series) in self.series.values().enumerate() {
            if series.removed {
                continue;
            }
            let stroke =
                CurveStroke::for_style(style, series.is_stepped()).ok_or_else(invalid)?;
            frame = frame.with_curve(CurveFrame {
                series: series.id,
                label: series.label.clone(),
                color: series.color,
                stroke,
                visible: !series.hidden,
                z: FIRST_SERIES_Z - position as i32,
                values: series.buffer.display_prefix(self.history.visible),
            });
        }
        frame.y_bounds = self.scale_engine.bounds(frame.visible_values());
        Ok(frame)
    }

    /// Hands the current frame to the renderer. A chart without series has
    /// nothing to draw and returns immediately.
    pub fn replot(&mut self) -> ChartResult<()> {
        if self.series.is_empty() {
            return Ok(());
        }
        let frame = self.render_frame()?;
        self.y_bounds = frame.y_bounds;
        trace!(
            curves = frame.curves.len(),
            y_bounds = ?frame.y_bounds,
            "replot"
        );
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered {
            curves: frame.curves.len(),
        });
        Ok(())
    }
}
