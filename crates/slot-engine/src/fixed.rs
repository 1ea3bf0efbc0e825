//! Fixed-cadence slots: every start lands on the same grid regardless of
//! service length, so services of different lengths compete for the same
//! canonical start times (e.g. :00 and :30).

use chrono::{NaiveDate, NaiveTime};

use crate::block::Slot;
use crate::error::{Result, SlotError};
use crate::strategy::{step_through, SlotGenerationStrategy};

/// Default grid spacing in minutes.
pub const DEFAULT_CADENCE_MINUTES: i64 = 30;

/// Slots every `cadence_minutes` from the block start, independent of service length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIntervalSlotStrategy {
    cadence_minutes: i64,
}

impl FixedIntervalSlotStrategy {
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if `cadence_minutes <= 0`.
    pub fn new(cadence_minutes: i64) -> Result<Self> {
        if cadence_minutes <= 0 {
            return Err(SlotError::InvalidArgument(format!(
                "cadence must be positive, got {} minutes",
                cadence_minutes
            )));
        }
        Ok(Self { cadence_minutes })
    }

    pub fn cadence_minutes(&self) -> i64 {
        self.cadence_minutes
    }
}

impl Default for FixedIntervalSlotStrategy {
    fn default() -> Self {
        Self {
            cadence_minutes: DEFAULT_CADENCE_MINUTES,
        }
    }
}

impl SlotGenerationStrategy for FixedIntervalSlotStrategy {
    fn name(&self) -> &'static str {
        "fixed_interval"
    }

    fn generate_theoretical_slots(
        &self,
        date: NaiveDate,
        block_start: NaiveTime,
        block_end: NaiveTime,
        service_duration_minutes: i64,
    ) -> Vec<Slot> {
        step_through(
            self.name(),
            date,
            block_start,
            block_end,
            service_duration_minutes,
            self.cadence_minutes,
        )
    }
}
