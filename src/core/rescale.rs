use tracing::debug;

use crate::core::aggregation::AggregationLane;
use crate::core::units::{Unit, convert};
use crate::error::ChartResult;

/// Upper axis bounds above this move the unit one rung up.
pub const UPSCALE_THRESHOLD: f64 = 1000.0;
/// Upper axis bounds below this (and above zero) move the unit down.
pub const DOWNSCALE_THRESHOLD: f64 = 0.1;

/// Outcome of a rescale decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescalePlan {
    pub from: Unit,
    pub to: Unit,
    /// The inspected upper bound expressed in `to`.
    pub scaled_bound: f64,
}

fn climb(
    unit: Unit,
    bound: f64,
    step: fn(Unit) -> Unit,
    keep_going: fn(f64) -> bool,
) -> Option<RescalePlan> {
    let mut current = unit;
    let mut scaled = bound;
    loop {
        let next = step(current);
        if next == current {
            break;
        }
        scaled = convert(scaled, &current, &next).ok()?;
        current = next;
        if !keep_going(scaled) {
            break;
        }
    }
    (current != unit).then_some(RescalePlan {
        from: unit,
        to: current,
        scaled_bound: scaled,
    })
}

/// Decides whether `upper_bound`, expressed in `unit`, calls for a new unit.
///
/// Steps as many rungs as needed to bring the bound back inside
/// `[0.1, 1000]`, stopping at the ladder ends. Only units whose space (or,
/// failing that, time) dimension is exactly 1 are ever rescaled. A bound of
/// zero or less never triggers a downscale.
#[must_use]
pub fn plan_rescale(unit: Unit, upper_bound: f64) -> Option<RescalePlan> {
    if !upper_bound.is_finite() {
        return None;
    }
    if upper_bound > UPSCALE_THRESHOLD {
        if let Some(plan) = climb(unit, upper_bound, Unit::step_up, |v| {
            v > UPSCALE_THRESHOLD
        }) {
            return Some(plan);
        }
    }
    if upper_bound > 0.0 && upper_bound < DOWNSCALE_THRESHOLD {
        return climb(unit, upper_bound, Unit::step_down, |v| {
            v < DOWNSCALE_THRESHOLD
        });
    }
    None
}

/// Converts every populated sample of every lane from `plan.from` to
/// `plan.to`. Display values are left alone when `convert_display` is false
/// (percentages are dimensionless).
pub fn apply_rescale<L: AggregationLane>(
    lanes: &mut [L],
    plan: &RescalePlan,
    convert_display: bool,
) -> ChartResult<()> {
    debug!(from = %plan.from, to = %plan.to, "rescale history");
    for lane in lanes.iter_mut() {
        for sample in lane.buffer_mut().populated_mut() {
            sample.raw = convert(sample.raw, &plan.from, &plan.to)?;
            if convert_display {
                sample.display = convert(sample.display, &plan.from, &plan.to)?;
            }
        }
    }
    Ok(())
}
