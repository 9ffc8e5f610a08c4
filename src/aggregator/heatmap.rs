//! Day-of-week × hour-of-day revenue matrix.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DAYS: usize = 7;
pub const HOURS: usize = 24;

/// Short day labels, Sunday first, in row order.
pub const DAY_LABELS: [&str; DAYS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Dense 7×24 revenue grid. Row 0 is Sunday, column `h` is hour `h`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heatmap {
    cells: [[Decimal; HOURS]; DAYS],
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            cells: [[Decimal::ZERO; HOURS]; DAYS],
        }
    }
}

impl Heatmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the cell for `day` (0 = Sunday) and `hour`.
    ///
    /// Out-of-range coordinates are ignored; the cell saturates rather than
    /// overflowing.
    pub fn add(&mut self, day: usize, hour: usize, amount: Decimal) {
        if let Some(cell) = self.cells.get_mut(day).and_then(|row| row.get_mut(hour)) {
            *cell = super::saturating_add(*cell, amount);
        }
    }

    pub fn get(&self, day: usize, hour: usize) -> Option<Decimal> {
        self.cells.get(day).and_then(|row| row.get(hour)).copied()
    }

    pub fn rows(&self) -> &[[Decimal; HOURS]; DAYS] {
        &self.cells
    }

    /// Largest cell value, `0` for an empty grid.
    pub fn max(&self) -> Decimal {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(Decimal::ZERO, Ord::max)
    }

    pub fn total(&self) -> Decimal {
        self.cells
            .iter()
            .flatten()
            .fold(Decimal::ZERO, |acc, v| super::saturating_add(acc, *v))
    }

    /// Cell value relative to the current maximum, in `0.0..=1.0`.
    ///
    /// The maximum is recomputed on every call; returns `0.0` when it is zero
    /// or the coordinates are out of range.
    pub fn intensity(&self, day: usize, hour: usize) -> f64 {
        let max = self.max();
        if max.is_zero() {
            return 0.0;
        }
        self.get(day, hour)
            .and_then(|v| (v / max).to_f64())
            .unwrap_or(0.0)
    }

    /// `(day, hour)` of the busiest cell; ties go to the earliest cell.
    pub fn peak(&self) -> Option<(usize, usize)> {
        let max = self.max();
        if max.is_zero() {
            return None;
        }
        self.cells.iter().enumerate().find_map(|(d, row)| {
            row.iter().position(|v| *v == max).map(|h| (d, h))
        })
    }
}
