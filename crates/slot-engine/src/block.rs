//! Input and output types: availability blocks, service durations, slots.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The start of a candidate appointment. Duration is implied by the service
/// that produced it.
pub type Slot = NaiveDateTime;

/// One contiguous interval during which a practitioner accepts bookings.
///
/// `start < end` is expected but not enforced; an inverted or empty block
/// simply yields no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityBlock {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityBlock {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, start, end }
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn end_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    /// True when the block cannot hold any slot (`start >= end`).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the block in whole minutes, 0 for empty or inverted blocks.
    pub fn length_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }
}

/// A validated, strictly positive service length in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ServiceDuration(i64);

impl ServiceDuration {
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if `minutes <= 0`.
    pub fn new(minutes: i64) -> Result<Self> {
        if minutes <= 0 {
            return Err(SlotError::InvalidArgument(format!(
                "service duration must be positive, got {} minutes",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ServiceDuration {
    type Error = SlotError;

    fn try_from(minutes: i64) -> Result<Self> {
        ServiceDuration::new(minutes)
    }
}

impl From<ServiceDuration> for i64 {
    fn from(d: ServiceDuration) -> Self {
        d.0
    }
}
