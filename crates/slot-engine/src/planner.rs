//! Day planning: availability source -> strategy -> booking filter.
//!
//! The engine does not know where availability comes from or which slots are
//! already taken. Both are collaborators supplied by the caller through
//! [`AvailabilitySource`] and [`BookingFilter`].

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::block::{AvailabilityBlock, ServiceDuration, Slot};
use crate::error::{Result, SlotError};
use crate::policy::StrategyResolver;

/// Supplies the raw availability blocks of a practitioner for one day.
pub trait AvailabilitySource {
    fn blocks_for(&self, practitioner_id: &str, date: NaiveDate) -> Result<Vec<AvailabilityBlock>>;
}

/// Removes slots that collide with confirmed appointments.
///
/// Implementations receive the ascending, de-duplicated candidate list and
/// must return a subsequence of it.
pub trait BookingFilter {
    fn retain_open(
        &self,
        practitioner_id: &str,
        slots: Vec<Slot>,
        duration: ServiceDuration,
    ) -> Vec<Slot>;
}

impl<F> BookingFilter for F
where
    F: Fn(&str, Vec<Slot>, ServiceDuration) -> Vec<Slot>,
{
    fn retain_open(
        &self,
        practitioner_id: &str,
        slots: Vec<Slot>,
        duration: ServiceDuration,
    ) -> Vec<Slot> {
        self(practitioner_id, slots, duration)
    }
}

/// A filter for a calendar with no bookings: every slot stays open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBookings;

impl BookingFilter for NoBookings {
    fn retain_open(&self, _: &str, slots: Vec<Slot>, _: ServiceDuration) -> Vec<Slot> {
        slots
    }
}

/// Availability held in memory, keyed by practitioner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailability {
    blocks: HashMap<String, Vec<AvailabilityBlock>>,
}

impl InMemoryAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, practitioner_id: &str, block: AvailabilityBlock) {
        self.blocks
            .entry(practitioner_id.to_string())
            .or_default()
            .push(block);
    }

    pub fn with_block(mut self, practitioner_id: &str, block: AvailabilityBlock) -> Self {
        self.insert(practitioner_id, block);
        self
    }
}

impl AvailabilitySource for InMemoryAvailability {
    /// Unknown practitioners are `ResourceNotFound`; a known practitioner
    /// with nothing on `date` yields no blocks.
    fn blocks_for(&self, practitioner_id: &str, date: NaiveDate) -> Result<Vec<AvailabilityBlock>> {
        let blocks = self.blocks.get(practitioner_id).ok_or_else(|| {
            SlotError::ResourceNotFound(format!("practitioner '{}'", practitioner_id))
        })?;
        Ok(blocks.iter().filter(|b| b.date == date).copied().collect())
    }
}

/// Combines the three collaborators into open slots for one practitioner-day.
#[derive(Debug, Clone)]
pub struct SlotPlanner<A, R, F> {
    source: A,
    resolver: R,
    filter: F,
}

impl<A, R, F> SlotPlanner<A, R, F>
where
    A: AvailabilitySource,
    R: StrategyResolver,
    F: BookingFilter,
{
    pub fn new(source: A, resolver: R, filter: F) -> Self {
        Self {
            source,
            resolver,
            filter,
        }
    }

    /// Open slot starts for `practitioner_id` on `date`, ascending and unique.
    ///
    /// The resolved strategy runs once per block; slots from overlapping
    /// blocks are merged before the booking filter sees them.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` for a non-positive duration, and
    /// whatever the availability source reports.
    pub fn plan(
        &self,
        practitioner_id: &str,
        date: NaiveDate,
        service_duration_minutes: i64,
    ) -> Result<Vec<Slot>> {
        let duration = ServiceDuration::new(service_duration_minutes)?;
        let blocks = self.source.blocks_for(practitioner_id, date)?;
        let strategy = self.resolver.resolve(practitioner_id);

        let mut slots: Vec<Slot> = blocks
            .iter()
            .flat_map(|block| strategy.generate_for_block(block, duration))
            .collect();
        slots.sort_unstable();
        slots.dedup();

        let candidates = slots.len();
        let open = self.filter.retain_open(practitioner_id, slots, duration);

        debug!(
            practitioner_id,
            %date,
            strategy = strategy.name(),
            blocks = blocks.len(),
            candidates,
            open = open.len(),
            "planned slots"
        );
        Ok(open)
    }
}
