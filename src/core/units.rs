use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Rungs of the space scale ladder, each 1024 times the previous one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum SpaceScale {
    #[default]
    Byte,
    Kbyte,
    Mbyte,
    Gbyte,
    Tbyte,
    Pbyte,
    Ebyte,
}

impl SpaceScale {
    const LADDER: [Self; 7] = [
        Self::Byte,
        Self::Kbyte,
        Self::Mbyte,
        Self::Gbyte,
        Self::Tbyte,
        Self::Pbyte,
        Self::Ebyte,
    ];

    fn rung(self) -> usize {
        self as usize
    }

    /// Next larger rung, `None` at `Ebyte`.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        Self::LADDER.get(self.rung() + 1).copied()
    }

    /// Next smaller rung, `None` at `Byte`.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        self.rung().checked_sub(1).map(|rung| Self::LADDER[rung])
    }

    /// Size of one unit of this scale in bytes.
    #[must_use]
    pub fn bytes(self) -> f64 {
        1024_f64.powi(self.rung() as i32)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Kbyte => "Kbyte",
            Self::Mbyte => "Mbyte",
            Self::Gbyte => "Gbyte",
            Self::Tbyte => "Tbyte",
            Self::Pbyte => "Pbyte",
            Self::Ebyte => "Ebyte",
        }
    }
}

/// Rungs of the time scale ladder: x1000 up to seconds, x60 above.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum TimeScale {
    Nanosec,
    Microsec,
    Millisec,
    #[default]
    Sec,
    Min,
    Hour,
}

impl TimeScale {
    const LADDER: [Self; 6] = [
        Self::Nanosec,
        Self::Microsec,
        Self::Millisec,
        Self::Sec,
        Self::Min,
        Self::Hour,
    ];

    fn rung(self) -> usize {
        self as usize
    }

    /// Next larger rung, `None` at `Hour`.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        Self::LADDER.get(self.rung() + 1).copied()
    }

    /// Next smaller rung, `None` at `Nanosec`.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        self.rung().checked_sub(1).map(|rung| Self::LADDER[rung])
    }

    /// Length of one unit of this scale in seconds.
    #[must_use]
    pub fn seconds(self) -> f64 {
        match self {
            Self::Nanosec => 1e-9,
            Self::Microsec => 1e-6,
            Self::Millisec => 1e-3,
            Self::Sec => 1.0,
            Self::Min => 60.0,
            Self::Hour => 3600.0,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nanosec => "nanosec",
            Self::Microsec => "microsec",
            Self::Millisec => "millisec",
            Self::Sec => "sec",
            Self::Min => "min",
            Self::Hour => "hour",
        }
    }
}

/// Physical unit of a plotted quantity.
///
/// Dimensions are exponents (`byte / sec` is space 1, time -1). Two units are
/// convertible only when all three dimensions agree; scales may differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Unit {
    #[serde(default)]
    pub dim_space: i8,
    #[serde(default)]
    pub dim_time: i8,
    #[serde(default)]
    pub dim_count: i8,
    #[serde(default)]
    pub scale_space: SpaceScale,
    #[serde(default)]
    pub scale_time: TimeScale,
    /// Power of ten applied to the count dimension.
    #[serde(default)]
    pub scale_count: i8,
}

impl Unit {
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self {
            dim_space: 0,
            dim_time: 0,
            dim_count: 0,
            scale_space: SpaceScale::Byte,
            scale_time: TimeScale::Sec,
            scale_count: 0,
        }
    }

    #[must_use]
    pub const fn space(scale: SpaceScale) -> Self {
        let mut unit = Self::dimensionless();
        unit.dim_space = 1;
        unit.scale_space = scale;
        unit
    }

    #[must_use]
    pub const fn time(scale: TimeScale) -> Self {
        let mut unit = Self::dimensionless();
        unit.dim_time = 1;
        unit.scale_time = scale;
        unit
    }

    #[must_use]
    pub const fn count() -> Self {
        let mut unit = Self::dimensionless();
        unit.dim_count = 1;
        unit
    }

    /// Divides this unit by `scale` (e.g. `byte` -> `byte / sec`).
    #[must_use]
    pub const fn per(mut self, scale: TimeScale) -> Self {
        self.dim_time -= 1;
        self.scale_time = scale;
        self
    }

    #[must_use]
    pub const fn with_count_scale(mut self, scale_count: i8) -> Self {
        self.scale_count = scale_count;
        self
    }

    #[must_use]
    pub fn same_dimension(&self, other: &Self) -> bool {
        self.dim_space == other.dim_space
            && self.dim_time == other.dim_time
            && self.dim_count == other.dim_count
    }

    /// Multiplier taking a value in this unit to the base unit of each dimension.
    fn factor(&self) -> f64 {
        self.scale_space.bytes().powi(i32::from(self.dim_space))
            * self.scale_time.seconds().powi(i32::from(self.dim_time))
            * 10_f64.powi(i32::from(self.scale_count) * i32::from(self.dim_count))
    }

    /// Unit after rate-converting a counter with this unit.
    ///
    /// Time-less counters become per-second rates; time counters become
    /// dimensionless (time per time) and keep their native time scale so the
    /// series can compensate through its own scale multiplier.
    #[must_use]
    pub fn rate_converted(mut self) -> Self {
        match self.dim_time {
            0 => {
                self.dim_time = -1;
                self.scale_time = TimeScale::Sec;
            }
            1 => self.dim_time = 0,
            _ => {}
        }
        self
    }

    /// Moves one rung up the ladder of the single unit-power dimension.
    ///
    /// Space takes precedence over time. Returns `self` unchanged at the top
    /// of the ladder or when neither dimension is exactly 1.
    #[must_use]
    pub fn step_up(self) -> Self {
        self.step(SpaceScale::up, TimeScale::up)
    }

    /// Moves one rung down; mirror of [`Unit::step_up`].
    #[must_use]
    pub fn step_down(self) -> Self {
        self.step(SpaceScale::down, TimeScale::down)
    }

    fn step(
        mut self,
        space: fn(SpaceScale) -> Option<SpaceScale>,
        time: fn(TimeScale) -> Option<TimeScale>,
    ) -> Self {
        if self.dim_space == 1 {
            if let Some(next) = space(self.scale_space) {
                self.scale_space = next;
            }
        } else if self.dim_time == 1 {
            if let Some(next) = time(self.scale_time) {
                self.scale_time = next;
            }
        }
        self
    }
}

/// Converts `value` between two dimensionally identical units.
///
/// NaN is passed through untouched.
pub fn convert(value: f64, from: &Unit, to: &Unit) -> ChartResult<f64> {
    if !from.same_dimension(to) {
        return Err(ChartError::IncompatibleUnits {
            chart: *to,
            metric: *from,
        });
    }
    if value.is_nan() || from == to {
        return Ok(value);
    }
    Ok(value * (from.factor() / to.factor()))
}

fn push_term(terms: &mut Vec<String>, name: String, power: i8) {
    match power.unsigned_abs() {
        0 => {}
        1 => terms.push(name),
        n => terms.push(format!("{name}^{n}")),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();

        let count_name = if self.scale_count == 0 {
            "count".to_owned()
        } else {
            format!("count x 10^{}", self.scale_count)
        };
        for (name, power) in [
            (self.scale_space.name().to_owned(), self.dim_space),
            (self.scale_time.name().to_owned(), self.dim_time),
            (count_name, self.dim_count),
        ] {
            if power > 0 {
                push_term(&mut numerator, name, power);
            } else if power < 0 {
                push_term(&mut denominator, name, power);
            }
        }

        match (numerator.is_empty(), denominator.is_empty()) {
            (_, true) => write!(f, "{}", numerator.join(" ")),
            (true, false) => write!(f, "/ {}", denominator.join(" ")),
            (false, false) => write!(f, "{} / {}", numerator.join(" "), denominator.join(" ")),
        }
    }
}
