//! Engine configuration, loaded from JSON.
//!
//! Every field has a default, so `{}` is a valid config selecting the
//! fixed-interval strategy on a 30-minute grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::fixed::DEFAULT_CADENCE_MINUTES;
use crate::policy::StrategyKind;

/// Strategy selection and parameters for a [`PolicyTable`](crate::policy::PolicyTable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Strategy used for practitioners without an override.
    pub strategy: StrategyKind,
    /// Grid spacing for the fixed-interval strategy.
    pub cadence_minutes: i64,
    /// Cleanup time between services for the buffered strategy.
    pub buffer_minutes: i64,
    /// Practitioner id -> strategy.
    pub overrides: BTreeMap<String, StrategyKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            cadence_minutes: DEFAULT_CADENCE_MINUTES,
            buffer_minutes: 0,
            overrides: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Returns `SlotError::ConfigParse` for malformed JSON or unknown fields,
    /// and `SlotError::InvalidArgument` for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `SlotError::InvalidArgument` if the cadence is not positive
    /// or the buffer is negative.
    pub fn validate(&self) -> Result<()> {
        if self.cadence_minutes <= 0 {
            return Err(SlotError::InvalidArgument(format!(
                "cadence_minutes must be positive, got {}",
                self.cadence_minutes
            )));
        }
        if self.buffer_minutes < 0 {
            return Err(SlotError::InvalidArgument(format!(
                "buffer_minutes must not be negative, got {}",
                self.buffer_minutes
            )));
        }
        Ok(())
    }
}
