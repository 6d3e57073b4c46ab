//! # Material Estimations
//!
//! This module contains the estimation calculators. Each follows the pattern:
//!
//! - `*Input` - Request parameters (JSON-serializable)
//! - `*Result` / `*Estimate` - Quantities and costs (JSON-serializable)
//! - A pure function from input to `EstimatorResult<...>`
//!
//! ## Available Estimations
//!
//! - [`tile`] - Floor tile grid, cut tiles, waste and purchase quantity
//! - [`ceiling`] - False-ceiling T-bar grid with two-orientation costing

pub mod ceiling;
pub mod tile;

use serde::{Deserialize, Serialize};

use crate::errors::EstimatorResult;
use crate::settings::EstimatorSettings;

// Re-export commonly used types
pub use ceiling::{
    compute_ceiling_estimate, estimate_ceilings, CeilingBatchResult, CeilingCase, CeilingEstimateInput,
    CeilingEstimateResult, CeilingOrientationResult, CeilingPrices, Orientation,
};
pub use tile::{compute_tile_layout, estimate_tiles, TileEstimate, TileEstimateInput, TileLayoutResult, TileSpec};

/// Enum wrapper for all estimation types.
///
/// This allows storing tile and ceiling estimates in a single collection
/// while keeping clean, tagged serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimationItem {
    /// Multi-room floor tiling
    Tile(TileEstimateInput),
    /// Multi-room false ceiling
    Ceiling(CeilingEstimateInput),
}

impl EstimationItem {
    /// Get the user-provided label for this estimation
    pub fn label(&self) -> &str {
        match self {
            EstimationItem::Tile(t) => &t.label,
            EstimationItem::Ceiling(c) => &c.label,
        }
    }

    /// Get the estimation type as a string
    pub fn kind(&self) -> &'static str {
        match self {
            EstimationItem::Tile(_) => "Tile",
            EstimationItem::Ceiling(_) => "Ceiling",
        }
    }

    /// Run the estimation. Tile requests without an allowance use the
    /// default allowance from `settings`; ceiling requests without their
    /// own prices use its price table.
    pub fn evaluate(&self, settings: &EstimatorSettings) -> EstimatorResult<EstimationOutcome> {
        match self {
            EstimationItem::Tile(input) => {
                let input = input.with_default_allowance(settings.default_allowance_pct);
                estimate_tiles(&input).map(EstimationOutcome::Tile)
            }
            EstimationItem::Ceiling(input) => {
                let prices = input.prices_or(&settings.ceiling_prices);
                estimate_ceilings(&input.rooms, &prices).map(EstimationOutcome::Ceiling)
            }
        }
    }
}

/// Result of evaluating an [`EstimationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimationOutcome {
    Tile(TileEstimate),
    Ceiling(CeilingBatchResult),
}

impl EstimationOutcome {
    /// Total material cost of the estimate (Rs)
    pub fn total_cost(&self) -> f64 {
        match self {
            EstimationOutcome::Tile(t) => t.totals.total_cost,
            EstimationOutcome::Ceiling(c) => c.total_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::NamedRoom;

    #[test]
    fn test_item_tagging() {
        let item = EstimationItem::Ceiling(CeilingEstimateInput {
            label: "Office".to_string(),
            rooms: vec![NamedRoom::new("Cabin", 10.0, 10.0)],
            prices: None,
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Ceiling\""));
        assert!(!json.contains("prices"));

        let back: EstimationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.label(), "Office");
        assert_eq!(back.kind(), "Ceiling");
    }

    #[test]
    fn test_ceiling_item_uses_settings_prices() {
        let item = EstimationItem::Ceiling(CeilingEstimateInput {
            label: String::new(),
            rooms: vec![NamedRoom::new("", 10.0, 10.0)],
            prices: None,
        });
        let mut settings = EstimatorSettings::default();
        let standard = item.evaluate(&settings).unwrap();
        assert_eq!(standard.total_cost(), 13660.0);

        settings.ceiling_prices.panel = 0.0;
        let no_panels = item.evaluate(&settings).unwrap();
        assert_eq!(no_panels.total_cost(), 13660.0 - 25.0 * 380.0);
    }

    #[test]
    fn test_tile_item_evaluates() {
        let item = EstimationItem::Tile(TileEstimateInput {
            label: "Floor".to_string(),
            rooms: vec![NamedRoom::new("Lounge", 10.0, 10.0)],
            tile: TileSpec::new(2.0, 2.0, 5.0, 100.0),
        });
        match item.evaluate(&EstimatorSettings::default()).unwrap() {
            EstimationOutcome::Tile(estimate) => assert_eq!(estimate.totals.total_cost, 2700.0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_tile_item_uses_settings_allowance() {
        let mut input = TileEstimateInput {
            label: "Floor".to_string(),
            rooms: vec![NamedRoom::new("Lounge", 10.0, 10.0)],
            tile: TileSpec::new(2.0, 2.0, 0.0, 100.0),
        };
        input.tile.allowance_pct = None;
        let item = EstimationItem::Tile(input);

        let mut settings = EstimatorSettings::default();
        // ceil(100 * 1.05 / 4) = 27
        assert_eq!(item.evaluate(&settings).unwrap().total_cost(), 2700.0);

        settings.default_allowance_pct = 20.0;
        // ceil(100 * 1.20 / 4) = 30
        assert_eq!(item.evaluate(&settings).unwrap().total_cost(), 3000.0);

        if let EstimationItem::Tile(input) = &item {
            assert_eq!(input.tile.allowance_pct, None);
        }
    }
}
