pub mod aggregation;
pub mod rescale;
pub mod scale_engine;
pub mod series_buffer;
pub mod style;
pub mod units;

pub use aggregation::{AggregationLane, aggregate_newest, rebuild};
pub use rescale::{
    DOWNSCALE_THRESHOLD, RescalePlan, UPSCALE_THRESHOLD, apply_rescale, plan_rescale,
};
pub use scale_engine::{ScaleEngine, YAxisScale};
pub use series_buffer::{PushDirection, Sample, SeriesBuffer};
pub use style::{CurveOutline, CurveShape, CurveStroke, Style};
pub use units::{SpaceScale, TimeScale, Unit, convert};
