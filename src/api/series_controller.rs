use tracing::debug;

use crate::core::{ScaleEngine, SeriesBuffer, Style, YAxisScale, rebuild};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::render::{Color, Renderer};

use super::{Chart, MetricDescriptor, Series, SeriesId, ValueKind, legend_label};

impl<R: Renderer> Chart<R> {
    /// Adds a series plotting `descriptor`, returning its handle.
    ///
    /// The first series fixes the chart unit and whether the chart plots
    /// events. Later series must agree on both.
    pub fn add_series(
        &mut self,
        descriptor: MetricDescriptor,
        legend: Option<&str>,
    ) -> ChartResult<SeriesId> {
        let units = descriptor.plotted_units(self.rate_convert);
        let is_event = descriptor.kind == ValueKind::Event;
        let first = self.series.is_empty();
        debug!(
            metric = %descriptor.spec.display_name(),
            units = %units,
            first,
            "add series"
        );

        let style = if first {
            if is_event {
                Style::Event
            } else if self.style.is_sampled() {
                self.style
            } else {
                return Err(ChartError::InvalidStyleTransition {
                    from: self.style,
                    to: self.style,
                });
            }
        } else {
            if is_event != self.is_event_chart() {
                return Err(ChartError::IncompatibleType(format!(
                    "cannot plot {} metric `{}` on a chart of {} metrics",
                    if is_event { "an event" } else { "a sampled" },
                    descriptor.spec.display_name(),
                    if is_event { "sampled" } else { "event" },
                )));
            }
            if !units.same_dimension(&self.unit) {
                return Err(ChartError::IncompatibleUnits {
                    chart: self.unit,
                    metric: units,
                });
            }
            self.style
        };

        let buffer = SeriesBuffer::with_capacity(self.history.sample)?;

        if first {
            self.unit = units;
            self.style = style;
            if is_event {
                self.scale_engine = ScaleEngine::Tracing;
            } else if style == Style::Utilisation {
                self.scale_engine.set_scale(YAxisScale::PERCENTAGE);
            }
        }

        let id = SeriesId(self.next_series_id);
        self.next_series_id += 1;
        let name = descriptor.spec.display_name();
        let label = legend.map_or_else(
            || legend_label(&name, self.max_legend_length),
            str::to_owned,
        );
        let scale = descriptor.compensation_scale(&units, style);
        let color = self.scheme.next_color(&mut self.color_sequence);
        self.series.insert(
            id,
            Series {
                id,
                descriptor,
                units,
                legend: legend.map(str::to_owned),
                label,
                color,
                scale,
                hidden: false,
                removed: false,
                buffer,
            },
        );

        // Zero padding keeps stacks continuous across the new series.
        let max_count = self
            .series
            .values()
            .map(|series| series.buffer.count())
            .max()
            .unwrap_or(0);
        for series in self.series.values_mut() {
            series.buffer.pad_zeroes_to(max_count);
        }

        self.emit_plugin_event(PluginEvent::SeriesAdded { series: id });
        self.replot()?;
        Ok(id)
    }

    /// Detaches a series from the plot. Its buffers stay live and keep
    /// receiving samples so it can be revived without loss.
    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<()> {
        self.series_mut(id)?.removed = true;
        debug!(series = %id, "remove series");
        self.emit_plugin_event(PluginEvent::SeriesRemoved { series: id });
        self.replot()
    }

    /// Re-attaches a removed series; no-op when it is attached already.
    pub fn revive_series(&mut self, id: SeriesId) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        if !series.removed {
            return Ok(());
        }
        series.removed = false;
        debug!(series = %id, "revive series");
        self.emit_plugin_event(PluginEvent::SeriesRevived { series: id });
        self.replot()
    }

    /// Legend check-box toggle: hidden series drop out of stacked sums.
    pub fn set_series_hidden(&mut self, id: SeriesId, hidden: bool) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        if series.hidden == hidden {
            return Ok(());
        }
        series.hidden = hidden;
        let style = self.style;
        rebuild(style, &mut self.lanes());
        self.emit_plugin_event(PluginEvent::SeriesVisibilityChanged { series: id, hidden });
        self.replot()
    }

    pub fn set_series_color(&mut self, id: SeriesId, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.series_mut(id)?.color = color;
        self.replot()
    }

    pub fn set_series_label(&mut self, id: SeriesId, label: impl Into<String>) -> ChartResult<()> {
        self.series_mut(id)?.label = label.into();
        self.replot()
    }

    #[must_use]
    pub fn series(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(&id)
    }

    /// Series in insertion order, removed ones included.
    pub fn series_iter(&self) -> impl Iterator<Item = &Series> + '_ {
        self.series.values()
    }

    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.series.keys().copied().collect()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Whether `id` names a series that is currently plotted.
    #[must_use]
    pub fn is_active(&self, id: SeriesId) -> bool {
        self.series.get(&id).is_some_and(|series| !series.removed)
    }

    /// Color of `id`, white for unknown handles.
    #[must_use]
    pub fn color(&self, id: SeriesId) -> Color {
        self.series.get(&id).map_or(Color::WHITE, |series| series.color)
    }

    pub(super) fn series_mut(&mut self, id: SeriesId) -> ChartResult<&mut Series> {
        self.series
            .get_mut(&id)
            .ok_or(ChartError::UnknownSeries(id.get()))
    }
}
