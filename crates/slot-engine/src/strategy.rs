//! The slot generation contract and the stepping loop every strategy shares.
//!
//! A strategy turns one availability block plus a service duration into the
//! ordered list of slot starts a patient could book. Strategies differ only in
//! how far they step between candidate starts; the boundary check and the
//! degenerate-input handling live here so they cannot drift apart.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tracing::{debug, trace};

use crate::block::{AvailabilityBlock, ServiceDuration, Slot};

/// Produce theoretical slots for one availability block.
///
/// Implementations are stateless and may be shared across threads.
pub trait SlotGenerationStrategy: Send + Sync + fmt::Debug {
    /// Stable identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Generate candidate slot starts inside `[block_start, block_end)` on `date`.
    ///
    /// The result is strictly ascending and every slot `s` satisfies
    /// `s + service_duration_minutes <= block_end`. An empty vector means no
    /// slot fits; it is never an error. A non-positive duration yields an
    /// empty vector for every strategy.
    fn generate_theoretical_slots(
        &self,
        date: NaiveDate,
        block_start: NaiveTime,
        block_end: NaiveTime,
        service_duration_minutes: i64,
    ) -> Vec<Slot>;

    /// Convenience wrapper taking a block and a validated duration.
    fn generate_for_block(&self, block: &AvailabilityBlock, duration: ServiceDuration) -> Vec<Slot> {
        self.generate_theoretical_slots(block.date, block.start, block.end, duration.minutes())
    }
}

/// Whether a service of `duration_minutes` starting at `start` ends no later
/// than `block_end`.
///
/// Durations too large to represent never fit.
pub fn fits(start: NaiveDateTime, duration_minutes: i64, block_end: NaiveDateTime) -> bool {
    TimeDelta::try_minutes(duration_minutes)
        .and_then(|d| start.checked_add_signed(d))
        .is_some_and(|service_end| service_end <= block_end)
}

/// Walk the block from its start in `step_minutes` increments, emitting each
/// start the service fits behind, and stop at the first one it does not.
pub(crate) fn step_through(
    strategy: &'static str,
    date: NaiveDate,
    block_start: NaiveTime,
    block_end: NaiveTime,
    service_duration_minutes: i64,
    step_minutes: i64,
) -> Vec<Slot> {
    if service_duration_minutes <= 0 {
        debug!(
            strategy,
            duration_minutes = service_duration_minutes,
            "non-positive service duration, no slots generated"
        );
        return Vec::new();
    }

    let block = AvailabilityBlock::new(date, block_start, block_end);
    if block.is_empty() {
        debug!(strategy, %date, %block_start, %block_end, "empty availability window");
        return Vec::new();
    }

    if step_minutes <= 0 {
        debug!(strategy, step_minutes, "non-positive step, no slots generated");
        return Vec::new();
    }

    let start = block.start_datetime();
    let end = block.end_datetime();
    let mut slots = Vec::new();
    let mut current = start;
    while current < end {
        // The cadence is monotonic: once one start does not fit, no later one will.
        if !fits(current, service_duration_minutes, end) {
            break;
        }
        slots.push(current);
        // A step too large to represent lands past any block end.
        current = match TimeDelta::try_minutes(step_minutes)
            .and_then(|step| current.checked_add_signed(step))
        {
            Some(next) => next,
            None => break,
        };
    }

    trace!(
        strategy,
        %date,
        duration_minutes = service_duration_minutes,
        step_minutes,
        count = slots.len(),
        "generated slots"
    );
    slots
}
