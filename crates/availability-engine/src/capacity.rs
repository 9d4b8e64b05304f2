//! Per-day capacity ledger.

use serde::{Deserialize, Serialize};

use crate::classify::Deduction;
use crate::window::WorkWindow;

/// Running capacity for one civil date, in minutes.
///
/// `available_minutes` starts at `total_minutes` and only ever decreases,
/// stopping at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCapacity {
    pub total_minutes: f64,
    pub available_minutes: f64,
    pub fungible_minutes: i64,
    pub task_minutes: i64,
}

impl DailyCapacity {
    pub fn new(total_minutes: f64) -> Self {
        let total_minutes = total_minutes.max(0.0);
        Self {
            total_minutes,
            available_minutes: total_minutes,
            fungible_minutes: 0,
            task_minutes: 0,
        }
    }

    pub fn for_window(window: &WorkWindow) -> Self {
        Self::new(window.capacity_minutes())
    }

    /// Record a deduction against this day.
    pub fn apply(&mut self, deduction: Deduction) {
        match deduction {
            Deduction::None => return,
            Deduction::Fungible(minutes) => self.fungible_minutes += minutes.max(0),
            Deduction::Task(minutes) => self.task_minutes += minutes.max(0),
        }
        self.available_minutes =
            (self.available_minutes - deduction.minutes().max(0) as f64).max(0.0);
    }

    /// Capacity after fungible deductions only, floored at zero.
    pub fn after_fungible_minutes(&self) -> f64 {
        (self.total_minutes - self.fungible_minutes as f64).max(0.0)
    }
}
