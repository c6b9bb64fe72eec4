//! Engine configuration shared by the loader, the store and the gateway.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Allowed range for traffic multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficBounds {
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for TrafficBounds {
    fn default() -> Self {
        Self {
            min_multiplier: 0.1,
            max_multiplier: 5.0,
        }
    }
}

impl TrafficBounds {
    /// Checks that the bounds are positive, ordered and admit the neutral
    /// multiplier 1.0 that every road starts with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), Error> {
        let (min, max) = (self.min_multiplier, self.max_multiplier);
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "multiplier bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_multiplier must be positive, got {min}"
            )));
        }
        if min > max {
            return Err(Error::InvalidConfig(format!(
                "min_multiplier {min} exceeds max_multiplier {max}"
            )));
        }
        if !self.contains(1.0) {
            return Err(Error::InvalidConfig(format!(
                "multiplier bounds [{min}, {max}] must include 1.0"
            )));
        }
        Ok(())
    }

    pub fn contains(&self, multiplier: f64) -> bool {
        multiplier.is_finite()
            && multiplier >= self.min_multiplier
            && multiplier <= self.max_multiplier
    }

    pub(crate) fn check(&self, multiplier: f64) -> Result<(), Error> {
        if self.contains(multiplier) {
            Ok(())
        } else {
            Err(Error::MultiplierOutOfRange {
                value: multiplier,
                min: self.min_multiplier,
                max: self.max_multiplier,
            })
        }
    }
}

/// Location of the junction and road documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub junctions_path: PathBuf,
    pub roads_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            junctions_path: PathBuf::from("data/junctions.json"),
            roads_path: PathBuf::from("data/roads.json"),
        }
    }
}

/// Retention of the traffic update log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum entries kept per road
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}
