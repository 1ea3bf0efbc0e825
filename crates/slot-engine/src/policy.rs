//! Strategy selection: which generator applies to which practitioner.
//!
//! The booking layer resolves exactly one strategy per practitioner and invokes
//! it once per availability block. [`PolicyTable`] is the configured resolver:
//! a global default plus per-practitioner overrides, with every strategy built
//! once and shared behind an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::buffered::BufferedSlotStrategy;
use crate::config::EngineConfig;
use crate::dynamic::DynamicDurationSlotStrategy;
use crate::error::{Result, SlotError};
use crate::fixed::FixedIntervalSlotStrategy;
use crate::strategy::SlotGenerationStrategy;

/// The available slot generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Starts on a fixed grid (see [`FixedIntervalSlotStrategy`]).
    #[default]
    FixedInterval,
    /// Starts back-to-back at the service duration.
    DynamicDuration,
    /// Starts back-to-back at the service duration plus a cleanup buffer.
    Buffered,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::FixedInterval,
        StrategyKind::DynamicDuration,
        StrategyKind::Buffered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::FixedInterval => "fixed_interval",
            StrategyKind::DynamicDuration => "dynamic_duration",
            StrategyKind::Buffered => "buffered",
        }
    }

    /// Construct the strategy this kind names.
    ///
    /// `cadence_minutes` only applies to `FixedInterval`, `buffer_minutes`
    /// only to `Buffered`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if the applicable parameter is out of range.
    pub fn build(
        self,
        cadence_minutes: i64,
        buffer_minutes: i64,
    ) -> Result<Arc<dyn SlotGenerationStrategy>> {
        let strategy: Arc<dyn SlotGenerationStrategy> = match self {
            StrategyKind::FixedInterval => Arc::new(FixedIntervalSlotStrategy::new(cadence_minutes)?),
            StrategyKind::DynamicDuration => Arc::new(DynamicDurationSlotStrategy::new()),
            StrategyKind::Buffered => Arc::new(BufferedSlotStrategy::new(buffer_minutes)?),
        };
        Ok(strategy)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                SlotError::InvalidArgument(format!(
                    "unknown strategy '{}', expected one of: fixed_interval, dynamic_duration, buffered",
                    s
                ))
            })
    }
}

/// Decides which strategy generates slots for a practitioner.
pub trait StrategyResolver {
    fn resolve(&self, practitioner_id: &str) -> Arc<dyn SlotGenerationStrategy>;
}

/// Global default strategy with per-practitioner overrides.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    default: Arc<dyn SlotGenerationStrategy>,
    overrides: HashMap<String, Arc<dyn SlotGenerationStrategy>>,
}

impl PolicyTable {
    pub fn new(default: Arc<dyn SlotGenerationStrategy>) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Build a table from configuration. The config is validated first.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if the config is invalid.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let build = |kind: StrategyKind| kind.build(config.cadence_minutes, config.buffer_minutes);

        let mut table = PolicyTable::new(build(config.strategy)?);
        for (practitioner_id, kind) in &config.overrides {
            table = table.with_override(practitioner_id, build(*kind)?);
        }
        Ok(table)
    }

    pub fn with_override(
        mut self,
        practitioner_id: &str,
        strategy: Arc<dyn SlotGenerationStrategy>,
    ) -> Self {
        self.overrides.insert(practitioner_id.to_string(), strategy);
        self
    }

    pub fn default_strategy(&self) -> &Arc<dyn SlotGenerationStrategy> {
        &self.default
    }
}

impl StrategyResolver for PolicyTable {
    fn resolve(&self, practitioner_id: &str) -> Arc<dyn SlotGenerationStrategy> {
        self.overrides
            .get(practitioner_id)
            .unwrap_or(&self.default)
            .clone()
    }
}
