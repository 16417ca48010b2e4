use thiserror::Error;

use crate::core::{Style, Unit};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("incompatible units: chart uses `{chart}`, metric uses `{metric}`")]
    IncompatibleUnits { chart: Unit, metric: Unit },

    #[error("incompatible metric type: {0}")]
    IncompatibleType(String),

    #[error("out of memory: cannot hold {requested} samples")]
    OutOfMemory { requested: usize },

    #[error("invalid style transition: {from:?} -> {to:?}")]
    InvalidStyleTransition { from: Style, to: Style },

    #[error("unknown series: {0}")]
    UnknownSeries(u64),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
