//! Observer hooks for host applications.
//!
//! Keep extensions out of the buffering/aggregation core paths.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
