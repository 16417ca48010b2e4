use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};
use crate::render::Renderer;

use super::Chart;

impl<R: Renderer> Chart<R> {
    /// Registers a plugin under its unique, non-empty id.
    ///
    /// The plugin is sent [`PluginEvent::Attached`] straight away so that it
    /// sees the series and unit of a chart that is already running.
    pub fn register_plugin(&mut self, mut plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(plugin_id) {
            return Err(ChartError::InvalidData(format!(
                "plugin `{plugin_id}` is already attached to this chart"
            )));
        }
        debug!(plugin = plugin_id, series = self.series.len(), "attach plugin");
        plugin.on_event(PluginEvent::Attached, self.plugin_context());
        self.plugins.push(plugin);
        Ok(())
    }

    /// Detaches the plugin registered as `plugin_id`, sending it
    /// [`PluginEvent::Detached`] first. Returns `false` for unknown ids.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let Some(position) = self.plugins.iter().position(|p| p.id() == plugin_id) else {
            return false;
        };
        let context = self.plugin_context();
        let mut plugin = self.plugins.remove(position);
        debug!(plugin = plugin_id, "detach plugin");
        plugin.on_event(PluginEvent::Detached, context);
        true
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            style: self.style,
            unit: self.unit,
            event_chart: self.is_event_chart(),
            series_len: self.series.len(),
            active_series_len: self.series.values().filter(|s| !s.removed).count(),
            y_bounds: self.y_bounds,
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
