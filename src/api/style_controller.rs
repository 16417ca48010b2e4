use tracing::debug;

use crate::core::{Style, YAxisScale, rebuild};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::render::{ColorScheme, Renderer};

use super::Chart;

impl<R: Renderer> Chart<R> {
    /// Switches the plot style and recomputes every display value.
    ///
    /// `None` can never be re-entered. `Event` belongs to event charts only
    /// and event charts accept nothing else.
    pub fn set_style(&mut self, style: Style) -> ChartResult<()> {
        let from = self.style;
        if style == from {
            return Ok(());
        }
        let allowed = if self.is_event_chart() {
            false
        } else {
            style.is_sampled()
        };
        if !allowed {
            return Err(ChartError::InvalidStyleTransition { from, to: style });
        }

        debug!(?from, to = ?style, "set style");
        if style == Style::Utilisation {
            self.scale_engine.set_scale(YAxisScale::PERCENTAGE);
        } else if from == Style::Utilisation {
            self.scale_engine.set_auto(true);
        }
        self.style = style;
        rebuild(style, &mut self.lanes());
        self.emit_plugin_event(PluginEvent::StyleChanged { from, to: style });
        self.replot()
    }

    /// Chooses between rate-converted and as-fetched counter values for
    /// subsequent ticks.
    pub fn set_rate_convert(&mut self, rate_convert: bool) -> ChartResult<()> {
        if self.rate_convert == rate_convert {
            return Ok(());
        }
        debug!(rate_convert, "set rate conversion");
        self.rate_convert = rate_convert;
        self.refresh()
    }

    /// Installs a new palette and restarts color assignment from its first
    /// entry. Existing series keep their colors.
    pub fn set_scheme(&mut self, scheme: ColorScheme) -> ChartResult<()> {
        self.set_scheme_with_sequence(scheme, 0)
    }

    pub fn set_scheme_with_sequence(
        &mut self,
        scheme: ColorScheme,
        sequence: usize,
    ) -> ChartResult<()> {
        for color in &scheme.colors {
            color.validate()?;
        }
        debug!(scheme = %scheme.name, sequence, "set color scheme");
        self.scheme = scheme;
        self.color_sequence = sequence;
        self.refresh()
    }

    pub fn set_antialiasing(&mut self, antialiasing: bool) -> ChartResult<()> {
        self.antialiasing = antialiasing;
        self.replot()
    }

    pub fn set_legend_visible(&mut self, visible: bool) -> ChartResult<()> {
        self.legend_visible = visible;
        self.replot()
    }

    /// A legend is only shown when enabled and there is something to list.
    #[must_use]
    pub fn legend_visible(&self) -> bool {
        self.legend_visible && !self.series.is_empty()
    }
}
