//! Back-to-back slots with a cleanup buffer between consecutive services.
//!
//! Each start is `duration + buffer` after the previous one. Only the service
//! itself has to fit inside the block; the buffer trailing the last slot may
//! run past the block end. With a zero buffer this behaves exactly like
//! [`DynamicDurationSlotStrategy`](crate::dynamic::DynamicDurationSlotStrategy).

use chrono::{NaiveDate, NaiveTime};

use crate::block::Slot;
use crate::error::{Result, SlotError};
use crate::strategy::{step_through, SlotGenerationStrategy};

/// Slots spaced one service duration plus `buffer_minutes` apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferedSlotStrategy {
    buffer_minutes: i64,
}

impl BufferedSlotStrategy {
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if `buffer_minutes` is negative.
    pub fn new(buffer_minutes: i64) -> Result<Self> {
        if buffer_minutes < 0 {
            return Err(SlotError::InvalidArgument(format!(
                "buffer must not be negative, got {} minutes",
                buffer_minutes
            )));
        }
        Ok(Self { buffer_minutes })
    }

    pub fn buffer_minutes(&self) -> i64 {
        self.buffer_minutes
    }
}

impl SlotGenerationStrategy for BufferedSlotStrategy {
    fn name(&self) -> &'static str {
        "buffered"
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
            service_duration_minutes.saturating_add(self.buffer_minutes),
        )
    }
}
