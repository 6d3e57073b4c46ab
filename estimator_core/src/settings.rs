//! # Estimator Settings
//!
//! Shop-wide defaults stored with each project: the ceiling price table and
//! the tile waste allowance. Settings are passed into evaluations explicitly;
//! nothing in the engine reads them from global state.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "ceilingPrices": { "mainT": 450, "crossT": 80, "panel": 380, "wallAngle": 190 },
//!   "defaultAllowancePct": 5.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::EstimatorResult;
use crate::estimations::ceiling::CeilingPrices;
use crate::estimations::tile::DEFAULT_ALLOWANCE_PCT;
use crate::validation::require_non_negative;

/// Project-level pricing and allowance defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatorSettings {
    /// Used by ceiling estimates that carry no prices of their own
    #[serde(default)]
    pub ceiling_prices: CeilingPrices,

    /// Allowance for tile estimates that set none of their own (%)
    #[serde(default = "default_allowance_pct")]
    pub default_allowance_pct: f64,
}

fn default_allowance_pct() -> f64 {
    DEFAULT_ALLOWANCE_PCT
}

impl EstimatorSettings {
    /// Validate prices and allowance.
    pub fn validate(&self) -> EstimatorResult<()> {
        self.ceiling_prices
            .validate()
            .map_err(|e| e.within("ceilingPrices"))?;
        require_non_negative("defaultAllowancePct", self.default_allowance_pct)?;
        Ok(())
    }
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            ceiling_prices: CeilingPrices::default(),
            default_allowance_pct: DEFAULT_ALLOWANCE_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EstimatorSettings::default();
        assert_eq!(settings.ceiling_prices.main_t, 450.0);
        assert_eq!(settings.default_allowance_pct, 5.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: EstimatorSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, EstimatorSettings::default());
    }

    #[test]
    fn test_validate_names_nested_field() {
        let mut settings = EstimatorSettings::default();
        settings.ceiling_prices.wall_angle = -10.0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("ceilingPrices.wallAngle"));
    }
}
