//! Penalty weights of the cost formula.

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::provider::PenaltyProvider;

const fn default_wait() -> f64 {
    1.0
}

const fn default_capacity() -> f64 {
    1.0
}

const fn default_low_demand() -> f64 {
    0.5
}

const fn default_zero_demand() -> f64 {
    10.0
}

/// Four non-negative coefficients; the search always minimises.
///
/// Missing fields take their defaults: wait 1.0, capacity 1.0, low demand
/// 0.5 and zero demand 10.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Cost per minute the busiest stop waits.
    #[serde(rename = "precioMinuto", default = "default_wait")]
    pub wait_per_minute: f64,
    /// Cost per seat of capacity mismatch.
    #[serde(rename = "costoCapacidad", default = "default_capacity")]
    pub capacity_mismatch: f64,
    /// Numerator of the low-demand penalty.
    #[serde(rename = "costoPocosPasajeros", default = "default_low_demand")]
    pub low_demand: f64,
    /// Penalty when no demand is forecast.
    #[serde(rename = "costoVacio", default = "default_zero_demand")]
    pub zero_demand: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            wait_per_minute: default_wait(),
            capacity_mismatch: default_capacity(),
            low_demand: default_low_demand(),
            zero_demand: default_zero_demand(),
        }
    }
}

impl PenaltyWeights {
    /// Reject negative or non-finite weights.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPenalty`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("precioMinuto", self.wait_per_minute),
            ("costoCapacidad", self.capacity_mismatch),
            ("costoPocosPasajeros", self.low_demand),
            ("costoVacio", self.zero_demand),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPenalty { field, value });
            }
        }
        Ok(())
    }
}

impl PenaltyProvider for PenaltyWeights {
    fn wait_per_minute(&self) -> f64 {
        self.wait_per_minute
    }

    fn capacity_mismatch(&self) -> f64 {
        self.capacity_mismatch
    }

    fn low_demand(&self) -> f64 {
        self.low_demand
    }

    fn zero_demand(&self) -> f64 {
        self.zero_demand
    }
}
