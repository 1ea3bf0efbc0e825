//! # slot-engine
//!
//! Deterministic appointment slot generation for clinic scheduling.
//!
//! Converts a practitioner's availability block (a date plus a start and end
//! time) into the discrete slot starts a patient can book for a service of a
//! given length. Generation is pure and stateless; conflict checks against
//! existing bookings belong to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use slot_engine::{DynamicDurationSlotStrategy, SlotGenerationStrategy};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
//! let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
//!
//! let slots = DynamicDurationSlotStrategy::new().generate_theoretical_slots(date, start, end, 45);
//! let starts: Vec<String> = slots.iter().map(|s| s.format("%H:%M").to_string()).collect();
//! assert_eq!(starts, ["08:00", "08:45"]);
//! ```
//!
//! ## Modules
//!
//! - [`strategy`] — The `SlotGenerationStrategy` contract and shared boundary check
//! - [`fixed`] — Fixed-cadence slots (default every 30 minutes)
//! - [`dynamic`] — Back-to-back slots at the service duration
//! - [`buffered`] — Back-to-back slots with cleanup time in between
//! - [`policy`] — Strategy kinds and per-practitioner resolution
//! - [`planner`] — Availability source → strategy → booking filter pipeline
//! - [`config`] — JSON engine configuration
//! - [`block`] — Availability blocks, service durations, slots
//! - [`error`] — Error types and their status mapping

pub mod block;
pub mod buffered;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod fixed;
pub mod planner;
pub mod policy;
pub mod strategy;

pub use block::{AvailabilityBlock, ServiceDuration, Slot};
pub use buffered::BufferedSlotStrategy;
pub use config::EngineConfig;
pub use dynamic::DynamicDurationSlotStrategy;
pub use error::{ErrorBody, ErrorKind, SlotError};
pub use fixed::{FixedIntervalSlotStrategy, DEFAULT_CADENCE_MINUTES};
pub use planner::{AvailabilitySource, BookingFilter, InMemoryAvailability, NoBookings, SlotPlanner};
pub use policy::{PolicyTable, StrategyKind, StrategyResolver};
pub use strategy::{fits, SlotGenerationStrategy};
