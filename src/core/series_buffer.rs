use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One history slot: the sampled value and the value actually plotted.
///
/// NaN in either half means "no data" and must propagate through every
/// aggregation and unit conversion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub raw: f64,
    pub display: f64,
}

impl Sample {
    pub const EMPTY: Self = Self {
        raw: f64::NAN,
        display: f64::NAN,
    };

    #[must_use]
    pub const fn new(raw: f64) -> Self {
        Self { raw, display: raw }
    }
}

/// End of the buffer that receives the newest sample.
///
/// `Front` is live mode (newest at index 0). `Back` is used when stepping
/// an archive backwards, where the newest sample lands after the last
/// populated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PushDirection {
    #[default]
    Front,
    Back,
}

/// Fixed-capacity rolling history of one plotted series.
///
/// Slots `[0, count)` hold populated samples. Slots `[count, stored_len)`
/// are zero padding that only exists so stacked charts stay continuous
/// after a new series joins; padding is never rendered.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    slots: VecDeque<Sample>,
    capacity: usize,
    count: usize,
}

impl SeriesBuffer {
    pub fn with_capacity(capacity: usize) -> ChartResult<Self> {
        let mut slots = VecDeque::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| ChartError::OutOfMemory {
                requested: capacity,
            })?;
        Ok(Self {
            slots,
            capacity,
            count: 0,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of populated slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Populated slots plus trailing zero padding.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn sample(&self, index: usize) -> Option<Sample> {
        (index < self.count).then(|| self.slots[index])
    }

    #[must_use]
    pub fn raw(&self, index: usize) -> Option<f64> {
        self.sample(index).map(|sample| sample.raw)
    }

    #[must_use]
    pub fn display(&self, index: usize) -> Option<f64> {
        self.sample(index).map(|sample| sample.display)
    }

    /// Value fed into cross-series sums at `index`.
    ///
    /// Populated slots yield their raw value, padding yields its zero, and
    /// anything beyond the stored slots yields `None`.
    #[must_use]
    pub fn aggregation_input(&self, index: usize) -> Option<f64> {
        self.slots.get(index).map(|sample| sample.raw)
    }

    pub(crate) fn set_display(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.display = value;
        }
    }

    /// Index of the slot most recently written by a push in `direction`.
    #[must_use]
    pub fn newest_index(&self, direction: PushDirection) -> Option<usize> {
        match direction {
            PushDirection::Front => (self.count > 0).then_some(0),
            PushDirection::Back => self.count.checked_sub(1),
        }
    }

    /// Inserts `value` at the `direction` end, dropping the oldest sample at
    /// the opposite end once the buffer is full.
    pub fn push(&mut self, value: f64, direction: PushDirection) {
        if self.capacity == 0 {
            return;
        }
        let sample = Sample::new(value);
        match direction {
            PushDirection::Front => {
                self.slots.push_front(sample);
                self.slots.truncate(self.capacity);
                self.count = (self.count + 1).min(self.capacity);
            }
            PushDirection::Back => {
                self.absorb_padding();
                if self.count == self.capacity {
                    self.slots.pop_front();
                } else {
                    self.count += 1;
                }
                self.slots.push_back(sample);
            }
        }
    }

    /// Turns trailing zero padding into "no data" slots so a back push
    /// lands in the same column as series without padding.
    fn absorb_padding(&mut self) {
        for slot in self.slots.iter_mut().skip(self.count) {
            *slot = Sample::EMPTY;
        }
        self.count = self.slots.len();
    }

    /// Changes the capacity, truncating the far end when shrinking.
    pub fn resize(&mut self, capacity: usize) -> ChartResult<()> {
        if capacity > self.capacity {
            let additional = capacity - self.slots.len();
            self.slots
                .try_reserve_exact(additional)
                .map_err(|_| ChartError::OutOfMemory {
                    requested: capacity,
                })?;
        } else {
            self.slots.truncate(capacity);
            self.slots.shrink_to(capacity);
        }
        self.capacity = capacity;
        self.count = self.count.min(capacity);
        Ok(())
    }

    /// Copies slot `source` over slot `index`, or clears `index` when
    /// `source` was never populated. Unstored target slots are left alone.
    pub fn substitute_at(&mut self, index: usize, source: usize) {
        if index >= self.slots.len() {
            return;
        }
        self.slots[index] = self.sample(source).unwrap_or(Sample::EMPTY);
    }

    /// Punches a "no data" hole into slot `index`.
    pub fn clear_at(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Sample::EMPTY;
        }
    }

    /// Extends stored slots with zero raw values up to `len` (bounded by
    /// capacity) without touching `count`.
    pub fn pad_zeroes_to(&mut self, len: usize) {
        let target = len.min(self.capacity);
        while self.slots.len() < target {
            self.slots.push_back(Sample {
                raw: 0.0,
                display: f64::NAN,
            });
        }
        for slot in self.slots.iter_mut().skip(self.count) {
            slot.raw = 0.0;
        }
    }

    /// Display values of the first `len` populated slots.
    #[must_use]
    pub fn display_prefix(&self, len: usize) -> Vec<f64> {
        self.slots
            .iter()
            .take(len.min(self.count))
            .map(|sample| sample.display)
            .collect()
    }

    pub fn populated(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.slots.iter().take(self.count)
    }

    pub(crate) fn populated_mut(&mut self) -> impl Iterator<Item = &mut Sample> + '_ {
        let count = self.count;
        self.slots.iter_mut().take(count)
    }
}
