//! perfchart: headless chart engine for performance-metric time series.
//!
//! The crate keeps fixed-length rolling histories per plotted metric,
//! derives stacked/utilisation display values, and re-expresses all history
//! in friendlier units when magnitudes drift. Drawing is delegated to a
//! [`render::Renderer`] implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig};
pub use error::{ChartError, ChartResult};
