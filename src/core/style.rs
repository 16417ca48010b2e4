use serde::{Deserialize, Serialize};

/// Chart presentation style; selects the aggregation applied to raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Style {
    /// Initial state; not renderable.
    #[default]
    None,
    Bar,
    Area,
    Line,
    Stack,
    Utilisation,
    /// Discrete-event chart. Entered when the first series is event-typed and
    /// never left afterwards.
    Event,
}

impl Style {
    #[must_use]
    pub fn is_renderable(self) -> bool {
        !matches!(self, Self::None)
    }

    /// One of the five styles available to sampled-value charts.
    #[must_use]
    pub fn is_sampled(self) -> bool {
        matches!(
            self,
            Self::Bar | Self::Area | Self::Line | Self::Stack | Self::Utilisation
        )
    }
}

/// How the view layer connects consecutive display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveShape {
    Sticks,
    Lines,
    Steps,
}

/// Outline color rule for a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveOutline {
    SeriesColor,
    Black,
}

/// Pen/brush description the view layer applies to one curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveStroke {
    pub shape: CurveShape,
    pub filled: bool,
    pub outline: CurveOutline,
}

impl CurveStroke {
    /// Resolves the stroke for `style`; `stepped` is set for instantaneous and
    /// discrete metrics whose values hold until the next sample.
    ///
    /// Returns `None` for styles that have no sampled-curve stroke.
    #[must_use]
    pub fn for_style(style: Style, stepped: bool) -> Option<Self> {
        let lines_or_steps = if stepped {
            CurveShape::Steps
        } else {
            CurveShape::Lines
        };
        let stroke = match style {
            Style::Bar => Self {
                shape: CurveShape::Sticks,
                filled: true,
                outline: CurveOutline::SeriesColor,
            },
            Style::Area => Self {
                shape: lines_or_steps,
                filled: true,
                outline: CurveOutline::SeriesColor,
            },
            Style::Line => Self {
                shape: lines_or_steps,
                filled: false,
                outline: CurveOutline::SeriesColor,
            },
            Style::Stack | Style::Utilisation => Self {
                shape: CurveShape::Steps,
                filled: true,
                outline: CurveOutline::Black,
            },
            Style::Event => Self {
                shape: CurveShape::Sticks,
                filled: false,
                outline: CurveOutline::SeriesColor,
            },
            Style::None => return None,
        };
        Some(stroke)
    }
}
