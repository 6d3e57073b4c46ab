//! # Tile Estimation
//!
//! Lays a tile grid over a rectangular floor and reports how many tiles are
//! laid whole, how many must be cut, and how many to buy once the waste
//! allowance is added.
//!
//! ## Assumptions
//!
//! - The grid is anchored at one corner with no rotation, grout or offset
//!   pattern, so only the last row and column can hold cut tiles
//! - The purchase count (allowance included) drives cost, not the grid count
//! - Tile size, allowance and price are shared by every room in one estimate
//!
//! ## Example
//!
//! ```rust
//! use estimator_core::estimations::tile::{compute_tile_layout, TileSpec};
//! use estimator_core::room::RoomDimensions;
//!
//! let room = RoomDimensions::new(10.0, 10.0);
//! let tile = TileSpec::new(2.0, 2.0, 5.0, 100.0);
//!
//! let layout = compute_tile_layout(&room, &tile).unwrap();
//! assert_eq!(layout.purchase_tile_count, 27);
//! assert_eq!(layout.total_cost, 2700.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EstimatorError, EstimatorResult};
use crate::room::{NamedRoom, RoomDimensions};
use crate::validation::{count_product, require_non_negative, require_positive, whole_count};

/// Allowance applied when neither the request nor the project sets one (%)
pub const DEFAULT_ALLOWANCE_PCT: f64 = 5.0;

/// Tile size, waste allowance and unit price.
///
/// `allowancePct` may be left out, in which case the project's default
/// allowance applies (see [`TileEstimateInput::with_default_allowance`]).
///
/// ## JSON Example
///
/// ```json
/// { "tileLength": 2.0, "tileWidth": 2.0, "allowancePct": 5.0, "unitPrice": 100.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSpec {
    /// Tile length (ft), laid along the room length
    pub tile_length: f64,

    /// Tile width (ft), laid along the room width
    pub tile_width: f64,

    /// Extra material bought for breakage and cutting (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance_pct: Option<f64>,

    /// Price per tile (Rs)
    pub unit_price: f64,
}

impl TileSpec {
    pub fn new(tile_length: f64, tile_width: f64, allowance_pct: f64, unit_price: f64) -> Self {
        TileSpec {
            tile_length,
            tile_width,
            allowance_pct: Some(allowance_pct),
            unit_price,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> EstimatorResult<()> {
        require_positive("tileLength", self.tile_length)?;
        require_positive("tileWidth", self.tile_width)?;
        if let Some(allowance_pct) = self.allowance_pct {
            require_non_negative("allowancePct", allowance_pct)?;
        }
        require_positive("unitPrice", self.unit_price)?;
        Ok(())
    }

    /// Area of one tile (ft²)
    pub fn panel_area(&self) -> f64 {
        self.tile_length * self.tile_width
    }

    /// The allowance in effect, falling back to [`DEFAULT_ALLOWANCE_PCT`].
    pub fn effective_allowance_pct(&self) -> f64 {
        self.allowance_pct.unwrap_or(DEFAULT_ALLOWANCE_PCT)
    }
}

/// Grid, waste and purchase figures for a single room.
///
/// ## JSON Example
///
/// ```json
/// {
///   "columns": 3, "rows": 4,
///   "fullTileCount": 6, "cutTileCount": 6,
///   "coveredArea": 48.0, "roomArea": 35.0,
///   "cutWasteArea": 13.0, "cutWastePct": 27.08,
///   "coveragePct": 100.0, "panelArea": 4.0,
///   "purchaseTileCount": 9, "purchaseWasteArea": 1.0, "purchaseWastePct": 2.78,
///   "totalCost": 900.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayoutResult {
    /// Grid columns across the room width
    pub columns: u64,

    /// Grid rows along the room length
    pub rows: u64,

    /// Tiles laid whole
    pub full_tile_count: u64,

    /// Tiles that overflow a wall and must be cut
    pub cut_tile_count: u64,

    /// Area of all grid tiles (ft²)
    pub covered_area: f64,

    /// Floor area (ft²)
    pub room_area: f64,

    /// Grid area beyond the floor, lost to cutting (ft²)
    pub cut_waste_area: f64,

    /// `cut_waste_area` as a share of `covered_area` (%)
    pub cut_waste_pct: f64,

    /// Share of the floor the grid covers, capped at 100 (%)
    pub coverage_pct: f64,

    /// Area of one tile (ft²)
    pub panel_area: f64,

    /// Tiles to buy, allowance included
    pub purchase_tile_count: u64,

    /// Purchased area beyond the floor (ft²)
    pub purchase_waste_area: f64,

    /// `purchase_waste_area` as a share of the purchased area (%)
    pub purchase_waste_pct: f64,

    /// `purchase_tile_count * unit_price` (Rs)
    pub total_cost: f64,
}

impl TileLayoutResult {
    /// Number of grid cells (`columns * rows`)
    pub fn grid_tile_count(&self) -> u64 {
        self.full_tile_count + self.cut_tile_count
    }
}

/// Number of leading tiles along `span` that end on or before the far wall,
/// i.e. the largest `k <= count` with `k * tile <= span`.
fn whole_tiles_along(span: f64, tile: f64, count: u64) -> u64 {
    let mut whole = ((span / tile).floor() as u64).min(count);
    // The quotient can round either way; settle on the product test.
    if whole > 0 && whole as f64 * tile > span {
        whole -= 1;
    }
    if whole < count && (whole + 1) as f64 * tile <= span {
        whole += 1;
    }
    whole
}

fn waste_pct(waste_area: f64, covered_area: f64) -> f64 {
    if covered_area > 0.0 {
        waste_area / covered_area * 100.0
    } else {
        0.0
    }
}

/// Compute the tile grid and purchase figures for one room.
///
/// # Returns
///
/// * `Ok(TileLayoutResult)` - Layout and cost
/// * `Err(EstimatorError::InvalidInput)` - A dimension or price is zero,
///   negative or non-finite, the allowance is negative, or the room needs
///   more tiles than can be counted exactly
pub fn compute_tile_layout(room: &RoomDimensions, tile: &TileSpec) -> EstimatorResult<TileLayoutResult> {
    room.validate()?;
    tile.validate()?;

    let columns = whole_count("width", (room.width / tile.tile_width).ceil())?;
    let rows = whole_count("length", (room.length / tile.tile_length).ceil())?;
    let grid_tile_count = count_product("length", columns, rows)?;

    // A cell is cut when its column or its row overflows a wall, so whole
    // tiles are exactly the product of whole columns and whole rows.
    let whole_columns = whole_tiles_along(room.width, tile.tile_width, columns);
    let whole_rows = whole_tiles_along(room.length, tile.tile_length, rows);
    let full_tile_count = whole_columns * whole_rows;
    let cut_tile_count = grid_tile_count - full_tile_count;

    let panel_area = tile.panel_area();
    let room_area = room.area();
    let covered_area = grid_tile_count as f64 * panel_area;
    let cut_waste_area = (covered_area - room_area).max(0.0);
    let cut_waste_pct = waste_pct(cut_waste_area, covered_area);
    let coverage_pct = (covered_area / room_area * 100.0).min(100.0);

    let area_with_allowance = room_area * (1.0 + tile.effective_allowance_pct() / 100.0);
    let purchase_tile_count = whole_count("length", (area_with_allowance / panel_area).ceil())?;
    let purchase_covered_area = purchase_tile_count as f64 * panel_area;
    let purchase_waste_area = (purchase_covered_area - room_area).max(0.0);
    let purchase_waste_pct = waste_pct(purchase_waste_area, purchase_covered_area);

    let total_cost = purchase_tile_count as f64 * tile.unit_price;

    debug!(
        columns,
        rows,
        full_tile_count,
        cut_tile_count,
        purchase_tile_count,
        total_cost,
        "computed tile layout"
    );

    Ok(TileLayoutResult {
        columns,
        rows,
        full_tile_count,
        cut_tile_count,
        covered_area,
        room_area,
        cut_waste_area,
        cut_waste_pct,
        coverage_pct,
        panel_area,
        purchase_tile_count,
        purchase_waste_area,
        purchase_waste_pct,
        total_cost,
    })
}

/// A multi-room tile estimate request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Ground floor",
///   "rooms": [
///     { "name": "Kitchen", "length": 12.0, "width": 10.0 },
///     { "name": "Bath", "length": 7.0, "width": 5.0 }
///   ],
///   "tile": { "tileLength": 2.0, "tileWidth": 2.0, "allowancePct": 5.0, "unitPrice": 100.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileEstimateInput {
    /// User label for this estimate
    #[serde(default)]
    pub label: String,

    /// Rooms to tile
    pub rooms: Vec<NamedRoom>,

    /// Tile used in every room
    pub tile: TileSpec,
}

/// One room of a multi-room tile estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRoomResult {
    pub name: String,
    pub length: f64,
    pub width: f64,
    #[serde(flatten)]
    pub layout: TileLayoutResult,
}

impl TileEstimateInput {
    /// Fill in `default_pct` when the tile carries no allowance of its own.
    pub fn with_default_allowance(&self, default_pct: f64) -> TileEstimateInput {
        let mut input = self.clone();
        input.tile.allowance_pct.get_or_insert(default_pct);
        input
    }
}

/// Totals across all rooms of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileTotals {
    /// Sum of floor areas (ft²)
    pub total_area: f64,
    /// Sum of purchase tile counts
    pub total_tiles: u64,
    /// Sum of room costs (Rs)
    pub total_cost: f64,
}

/// Result of a multi-room tile estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileEstimate {
    pub rooms: Vec<TileRoomResult>,
    pub totals: TileTotals,
}

/// Estimate every room of a request with the shared `TileSpec`.
///
/// Fails as a whole if any room is invalid; the error field names the room
/// (e.g. `rooms[1].width`).
pub fn estimate_tiles(input: &TileEstimateInput) -> EstimatorResult<TileEstimate> {
    if input.rooms.is_empty() {
        return Err(EstimatorError::missing_field("rooms"));
    }
    input.tile.validate().map_err(|e| e.within("tile"))?;

    let rooms = input
        .rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            let layout = compute_tile_layout(&room.dimensions(), &input.tile)
                .map_err(|e| e.within(&format!("rooms[{}]", i)))?;
            Ok(TileRoomResult {
                name: room.display_name(i),
                length: room.length,
                width: room.width,
                layout,
            })
        })
        .collect::<EstimatorResult<Vec<_>>>()?;

    let totals = rooms.iter().fold(TileTotals::default(), |acc, room| TileTotals {
        total_area: acc.total_area + room.layout.room_area,
        total_tiles: acc.total_tiles + room.layout.purchase_tile_count,
        total_cost: acc.total_cost + room.layout.total_cost,
    });

    debug!(
        rooms = rooms.len(),
        total_tiles = totals.total_tiles,
        total_cost = totals.total_cost,
        "computed tile estimate"
    );

    Ok(TileEstimate { rooms, totals })
}
