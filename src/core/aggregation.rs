//! Derivation of display values from raw samples.
//!
//! Every style works column by column: for one history index the engine
//! gathers the raw value of each series (in insertion order), then writes
//! each series' display value for that index. NaN never takes part in
//! arithmetic; it is copied through as "no data".

use smallvec::SmallVec;

use crate::core::series_buffer::{PushDirection, SeriesBuffer};
use crate::core::style::Style;

/// A series as seen by the aggregation engine.
pub trait AggregationLane {
    fn buffer(&self) -> &SeriesBuffer;
    fn buffer_mut(&mut self) -> &mut SeriesBuffer;
    /// Hidden series keep their identity curve but are left out of stacks.
    fn is_hidden(&self) -> bool;
}

impl<T: AggregationLane + ?Sized> AggregationLane for &mut T {
    fn buffer(&self) -> &SeriesBuffer {
        (**self).buffer()
    }

    fn buffer_mut(&mut self) -> &mut SeriesBuffer {
        (**self).buffer_mut()
    }

    fn is_hidden(&self) -> bool {
        (**self).is_hidden()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    /// Nothing stored at this index for the series.
    Missing,
    /// Zero padding: counts towards sums, never displayed.
    Padding(f64),
    Value(f64),
}

impl Cell {
    fn read(buffer: &SeriesBuffer, index: Option<usize>) -> Self {
        match index {
            None => Self::Missing,
            Some(i) if i < buffer.count() => buffer.raw(i).map_or(Self::Missing, Self::Value),
            Some(i) => buffer
                .aggregation_input(i)
                .map_or(Self::Missing, Self::Padding),
        }
    }

    /// Contribution to a cross-series sum for a visible series.
    fn summand(self) -> Option<f64> {
        match self {
            Self::Missing => None,
            Self::Padding(value) | Self::Value(value) => (!value.is_nan()).then_some(value),
        }
    }
}

type Column = SmallVec<[(Option<usize>, Cell); 16]>;

fn read_column<L: AggregationLane>(
    lanes: &[L],
    index_of: impl Fn(&SeriesBuffer) -> Option<usize>,
) -> Column {
    lanes
        .iter()
        .map(|lane| {
            let index = index_of(lane.buffer());
            (index, Cell::read(lane.buffer(), index))
        })
        .collect()
}

fn write_display<L: AggregationLane>(lane: &mut L, index: Option<usize>, value: f64) {
    if let Some(i) = index {
        lane.buffer_mut().set_display(i, value);
    }
}

fn aggregate_column<L: AggregationLane>(
    style: Style,
    lanes: &mut [L],
    index_of: impl Fn(&SeriesBuffer) -> Option<usize>,
) {
    let column = read_column(lanes, index_of);
    match style {
        Style::Bar | Style::Area | Style::Line | Style::Event => {
            for (lane, (index, cell)) in lanes.iter_mut().zip(column) {
                if let Cell::Value(value) = cell {
                    write_display(lane, index, value);
                }
            }
        }
        Style::Stack => {
            let mut running = 0.0;
            for (lane, (index, cell)) in lanes.iter_mut().zip(column) {
                if lane.is_hidden() {
                    write_display(lane, index, f64::NAN);
                    continue;
                }
                match cell {
                    Cell::Value(value) if !value.is_nan() => {
                        running += value;
                        write_display(lane, index, running);
                    }
                    Cell::Padding(_) => {
                        running += cell.summand().unwrap_or(0.0);
                        write_display(lane, index, f64::NAN);
                    }
                    _ => write_display(lane, index, f64::NAN),
                }
            }
        }
        Style::Utilisation => {
            let sum: f64 = lanes
                .iter()
                .zip(&column)
                .filter(|(lane, _)| !lane.is_hidden())
                .filter_map(|(_, (_, cell))| cell.summand())
                .sum();
            let mut running = 0.0;
            for (lane, (index, cell)) in lanes.iter_mut().zip(column) {
                let share = match cell {
                    Cell::Value(value) if sum != 0.0 && !lane.is_hidden() && !value.is_nan() => {
                        100.0 * value / sum
                    }
                    _ => f64::NAN,
                };
                if share.is_nan() {
                    write_display(lane, index, f64::NAN);
                } else {
                    running += share;
                    write_display(lane, index, running);
                }
            }
        }
        Style::None => {}
    }
}

/// Recomputes every display value of every series for `style`.
///
/// Indices at or beyond a series' populated count produce no displayed
/// value for that series; its zero padding still feeds stacked sums.
pub fn rebuild<L: AggregationLane>(style: Style, lanes: &mut [L]) {
    let max_count = lanes
        .iter()
        .map(|lane| lane.buffer().count())
        .max()
        .unwrap_or(0);
    for index in 0..max_count {
        aggregate_column(style, lanes, |buffer| {
            (index < buffer.stored_len()).then_some(index)
        });
    }
}

/// Recomputes only the slot each series received on its latest push.
pub fn aggregate_newest<L: AggregationLane>(
    style: Style,
    lanes: &mut [L],
    direction: PushDirection,
) {
    aggregate_column(style, lanes, |buffer| buffer.newest_index(direction));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lane {
        buffer: SeriesBuffer,
        hidden: bool,
    }

    impl AggregationLane for Lane {
        fn buffer(&self) -> &SeriesBuffer {
            &self.buffer
        }

        fn buffer_mut(&mut self) -> &mut SeriesBuffer {
            &mut self.buffer
        }

        fn is_hidden(&self) -> bool {
            self.hidden
        }
    }

    fn lane(values: &[f64]) -> Lane {
        let mut buffer = SeriesBuffer::with_capacity(8).expect("buffer");
        for value in values {
            buffer.push(*value, PushDirection::Back);
        }
        Lane {
            buffer,
            hidden: false,
        }
    }

    #[test]
    fn stack_accumulates_in_insertion_order() {
        let mut lanes = vec![lane(&[1.0, 2.0]), lane(&[3.0, 4.0]), lane(&[5.0, 6.0])];
        rebuild(Style::Stack, &mut lanes);
        assert_eq!(lanes[0].buffer.display(1), Some(2.0));
        assert_eq!(lanes[1].buffer.display(1), Some(6.0));
        assert_eq!(lanes[2].buffer.display(1), Some(12.0));
    }

    #[test]
    fn utilisation_skips_nan_without_zeroing() {
        let mut lanes = vec![lane(&[1.0]), lane(&[f64::NAN]), lane(&[3.0])];
        rebuild(Style::Utilisation, &mut lanes);
        assert_eq!(lanes[0].buffer.display(0), Some(25.0));
        assert!(lanes[1].buffer.display(0).expect("slot").is_nan());
        assert_eq!(lanes[2].buffer.display(0), Some(100.0));
    }

    #[test]
    fn utilisation_zero_sum_is_no_data() {
        let mut lanes = vec![lane(&[0.0]), lane(&[0.0])];
        rebuild(Style::Utilisation, &mut lanes);
        assert!(lanes[0].buffer.display(0).expect("slot").is_nan());
        assert!(lanes[1].buffer.display(0).expect("slot").is_nan());
    }

    #[test]
    fn padding_is_never_displayed() {
        let mut lanes = vec![lane(&[1.0, 2.0, 3.0]), lane(&[10.0])];
        lanes[1].buffer.pad_zeroes_to(3);
        rebuild(Style::Stack, &mut lanes);
        assert_eq!(lanes[1].buffer.display(0), Some(11.0));
        assert_eq!(lanes[1].buffer.display(2), None);
        assert_eq!(lanes[0].buffer.display(2), Some(3.0));
    }
}
