//! Back-to-back slots spaced by the service's own duration, so slot
//! boundaries match the time actually occupied (a 45-minute service yields
//! 08:00, 08:45, 09:30, ...).

use chrono::{NaiveDate, NaiveTime};

use crate::block::Slot;
use crate::strategy::{step_through, SlotGenerationStrategy};

/// Slots spaced exactly one service duration apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicDurationSlotStrategy;

impl DynamicDurationSlotStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SlotGenerationStrategy for DynamicDurationSlotStrategy {
    fn name(&self) -> &'static str {
        "dynamic_duration"
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
            service_duration_minutes,
        )
    }
}
