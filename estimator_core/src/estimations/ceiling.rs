//! # False-Ceiling Grid Estimation
//!
//! Sizes a suspended 2 ft × 2 ft ceiling grid for a rectangular room. Two
//! layouts are costed, one with the Main T-bars running along the longer
//! side and one along the shorter side, and the cheaper one is recommended.
//!
//! ## Stock Sizes
//!
//! | Member | Stock length | Notes |
//! |--------|--------------|-------|
//! | Main T-bar | 12 ft | Joined end-to-end on longer runs |
//! | Cross T-bar | 2 ft | One per grid cell edge |
//! | Wall angle | 10 ft | Full room perimeter |
//! | Panel | 2 × 2 ft | 4 ft² each |
//!
//! ## Example
//!
//! ```rust
//! use estimator_core::estimations::ceiling::{compute_ceiling_estimate, CeilingPrices, Orientation};
//! use estimator_core::room::RoomDimensions;
//!
//! let room = RoomDimensions::new(20.0, 10.0);
//! let estimate = compute_ceiling_estimate(&room, &CeilingPrices::default()).unwrap();
//!
//! assert_eq!(estimate.recommended.orientation, Orientation::AlongLength);
//! assert_eq!(estimate.savings, 50.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EstimatorError, EstimatorResult};
use crate::room::{NamedRoom, RoomDimensions};
use crate::validation::{count_product, require_non_negative, whole_count};

/// Spacing between grid lines (ft)
pub const GRID_SPACING_FT: f64 = 2.0;

/// Main T-bar stock length (ft)
pub const MAIN_T_LENGTH_FT: f64 = 12.0;

/// Cross T-bar stock length (ft); equals the grid spacing
pub const CROSS_T_LENGTH_FT: f64 = 2.0;

/// Wall angle stock length (ft)
pub const WALL_ANGLE_LENGTH_FT: f64 = 10.0;

/// Area of one ceiling panel (ft²)
pub const PANEL_AREA_FT2: f64 = 4.0;

/// Keeps a grid line that would land exactly on the far wall out of the count
const EDGE_CLEARANCE_FT: f64 = 0.01;

// ============================================================================
// Prices
// ============================================================================

/// Unit prices for ceiling components (Rs per piece).
///
/// The `Default` is the standard shop price table. Short keys (`mt`, `ct`,
/// `wa`) are accepted as aliases when reading JSON.
///
/// ## JSON Example
///
/// ```json
/// { "mainT": 450, "crossT": 80, "panel": 380, "wallAngle": 190 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingPrices {
    /// Main T-bar, 12 ft
    #[serde(alias = "mt")]
    pub main_t: f64,

    /// Cross T-bar, 2 ft
    #[serde(alias = "ct")]
    pub cross_t: f64,

    /// 2 × 2 ft panel sheet
    pub panel: f64,

    /// Wall angle, 10 ft
    #[serde(alias = "wa")]
    pub wall_angle: f64,
}

impl CeilingPrices {
    /// Prices must be finite and not negative.
    pub fn validate(&self) -> EstimatorResult<()> {
        require_non_negative("mainT", self.main_t)?;
        require_non_negative("crossT", self.cross_t)?;
        require_non_negative("panel", self.panel)?;
        require_non_negative("wallAngle", self.wall_angle)?;
        Ok(())
    }
}

impl Default for CeilingPrices {
    fn default() -> Self {
        CeilingPrices {
            main_t: 450.0,
            cross_t: 80.0,
            panel: 380.0,
            wall_angle: 190.0,
        }
    }
}

// ============================================================================
// Case Classification
// ============================================================================

/// Descriptive room category. Informational only; it never changes the
/// quantities or costs.
///
/// Serializes as its label, e.g. `"Standard small grid"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CeilingCase {
    #[serde(rename = "Too small for grid")]
    TooSmall,
    #[serde(rename = "Very narrow room")]
    VeryNarrow,
    #[serde(rename = "Standard small grid")]
    StandardSmall,
    #[serde(rename = "Join MT (A > 12)")]
    JoinMainT,
    #[serde(rename = "Extra CT rows (B > 12)")]
    ExtraCrossRows,
    #[serde(rename = "Test both layouts")]
    TestBothLayouts,
    #[serde(rename = "Odd dimensions")]
    OddDimensions,
    #[serde(rename = "Join/reuse MTs")]
    JoinReuseMainT,
    #[serde(rename = "Decimal dimensions")]
    DecimalDimensions,
    #[serde(rename = "Decimal mix")]
    DecimalMix,
    #[serde(rename = "Corridor or toilet")]
    Corridor,
    #[serde(rename = "Default standard grid")]
    DefaultStandard,
}

impl CeilingCase {
    /// Display label (same text as the JSON form)
    pub fn label(&self) -> &'static str {
        match self {
            CeilingCase::TooSmall => "Too small for grid",
            CeilingCase::VeryNarrow => "Very narrow room",
            CeilingCase::StandardSmall => "Standard small grid",
            CeilingCase::JoinMainT => "Join MT (A > 12)",
            CeilingCase::ExtraCrossRows => "Extra CT rows (B > 12)",
            CeilingCase::TestBothLayouts => "Test both layouts",
            CeilingCase::OddDimensions => "Odd dimensions",
            CeilingCase::JoinReuseMainT => "Join/reuse MTs",
            CeilingCase::DecimalDimensions => "Decimal dimensions",
            CeilingCase::DecimalMix => "Decimal mix",
            CeilingCase::Corridor => "Corridor or toilet",
            CeilingCase::DefaultStandard => "Default standard grid",
        }
    }

    /// Short code used on printed estimates. The default grid shares `C3`
    /// with the standard small grid and there is no `C11`.
    pub fn code(&self) -> &'static str {
        match self {
            CeilingCase::TooSmall => "C1",
            CeilingCase::VeryNarrow => "C2",
            CeilingCase::StandardSmall => "C3",
            CeilingCase::JoinMainT => "C4",
            CeilingCase::ExtraCrossRows => "C5",
            CeilingCase::TestBothLayouts => "C6",
            CeilingCase::OddDimensions => "C7",
            CeilingCase::JoinReuseMainT => "C8",
            CeilingCase::DecimalDimensions => "C9",
            CeilingCase::DecimalMix => "C10",
            CeilingCase::Corridor => "C12",
            CeilingCase::DefaultStandard => "C3",
        }
    }
}

impl std::fmt::Display for CeilingCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.label())
    }
}

fn is_integer(x: f64) -> bool {
    x.fract() == 0.0
}

/// Classify a room from its longer side `a` and shorter side `b`.
///
/// The checks run in a fixed order and the first match wins. For finite
/// inputs the size checks always match first, so the later refinements
/// never fire; the order is kept as-is.
pub fn detect_case(a: f64, b: f64) -> CeilingCase {
    if a < 2.0 || b < 2.0 {
        CeilingCase::TooSmall
    } else if a <= 4.0 || b <= 4.0 {
        CeilingCase::VeryNarrow
    } else if a <= 12.0 && b <= 12.0 {
        CeilingCase::StandardSmall
    } else if a > 12.0 && b <= 12.0 {
        CeilingCase::JoinMainT
    } else if a <= 12.0 && b > 12.0 {
        CeilingCase::ExtraCrossRows
    } else if a > 12.0 && b > 12.0 {
        CeilingCase::TestBothLayouts
    } else if a % 2.0 != 0.0 || b % 2.0 != 0.0 {
        CeilingCase::OddDimensions
    } else if a % 12.0 != 0.0 || b % 12.0 != 0.0 {
        CeilingCase::JoinReuseMainT
    } else if !is_integer(a) || !is_integer(b) {
        CeilingCase::DecimalDimensions
    } else if !is_integer(a) && !is_integer(b) {
        CeilingCase::DecimalMix
    } else if a >= 3.0 * b || b >= 3.0 * a {
        CeilingCase::Corridor
    } else {
        CeilingCase::DefaultStandard
    }
}

// ============================================================================
// Orientation Costing
// ============================================================================

/// Direction the Main T-bars run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Main T-bars run along the longer side
    AlongLength,
    /// Main T-bars run along the shorter side
    AlongWidth,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::AlongLength => "Main T-bars along Length",
            Orientation::AlongWidth => "Main T-bars along Width",
        }
    }
}

/// Quantities and cost for one grid orientation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "orientation": "AlongLength",
///   "mainTCount": 8,
///   "crossTCount": 45,
///   "panelCount": 50,
///   "wallAngleCount": 6,
///   "cost": 27340.0,
///   "joinRequired": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingOrientationResult {
    pub orientation: Orientation,

    /// Main T-bar pieces (12 ft)
    pub main_t_count: u64,

    /// Cross T-bar pieces (2 ft)
    pub cross_t_count: u64,

    /// Ceiling panels (2 × 2 ft)
    pub panel_count: u64,

    /// Wall angle pieces (10 ft)
    pub wall_angle_count: u64,

    /// Total material cost (Rs)
    pub cost: f64,

    /// Main T runs are longer than one bar and need joints
    pub join_required: bool,
}

fn grid_lines_across(field: &str, span: f64) -> EstimatorResult<u64> {
    whole_count(field, ((span - EDGE_CLEARANCE_FT) / GRID_SPACING_FT).floor().max(0.0))
}

/// Quantities and cost for one orientation. Inputs are assumed validated.
///
/// Fails only when a count would exceed [`MAX_COUNT`](crate::validation::MAX_COUNT).
pub fn compute_orientation(
    room: &RoomDimensions,
    prices: &CeilingPrices,
    orientation: Orientation,
) -> EstimatorResult<CeilingOrientationResult> {
    let (a, b) = room.sides();
    let (main_side, cross_side) = match orientation {
        Orientation::AlongLength => (a, b),
        Orientation::AlongWidth => (b, a),
    };
    let field = if room.length >= room.width { "length" } else { "width" };

    let main_lines = grid_lines_across(field, cross_side)?;
    let main_per_line = whole_count(field, (main_side / MAIN_T_LENGTH_FT).ceil())?;
    let main_t_count = count_product(field, main_lines, main_per_line)?;

    // Cross bars bridge between and around the Main T rows
    let cross_lines = grid_lines_across(field, main_side)?;
    let cross_per_line = main_lines + 1;
    let cross_t_count = count_product(field, cross_lines, cross_per_line)?;

    let panel_count = whole_count(field, (room.area() / PANEL_AREA_FT2).ceil())?;
    let wall_angle_count = whole_count(field, (room.perimeter() / WALL_ANGLE_LENGTH_FT).ceil())?;

    let cost = main_t_count as f64 * prices.main_t
        + cross_t_count as f64 * prices.cross_t
        + panel_count as f64 * prices.panel
        + wall_angle_count as f64 * prices.wall_angle;

    Ok(CeilingOrientationResult {
        orientation,
        main_t_count,
        cross_t_count,
        panel_count,
        wall_angle_count,
        cost,
        join_required: main_side > MAIN_T_LENGTH_FT,
    })
}

// ============================================================================
// Single Room
// ============================================================================

/// Full ceiling estimate for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingEstimateResult {
    /// Room name, or the size label when the room is unnamed
    pub room_label: String,

    /// `"L ft × W ft"`
    pub room_size: String,

    pub case_detected: CeilingCase,

    /// Along-length option first, along-width second
    pub options: [CeilingOrientationResult; 2],

    /// The cheaper option (along-length on a tie)
    pub recommended: CeilingOrientationResult,

    /// Cost difference between the two options (Rs)
    pub savings: f64,

    /// Short remarks for the printed estimate
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CeilingEstimateResult {
    /// The option that was not recommended
    pub fn alternative(&self) -> &CeilingOrientationResult {
        if self.options[0].orientation == self.recommended.orientation {
            &self.options[1]
        } else {
            &self.options[0]
        }
    }
}

/// Compute both grid orientations for a room and recommend the cheaper one.
///
/// # Returns
///
/// * `Ok(CeilingEstimateResult)` - Both options and the recommendation
/// * `Err(EstimatorError::InvalidInput)` - A dimension is zero, negative or
///   non-finite, a price is negative or non-finite, or the room is too
///   large for its parts to be counted exactly
pub fn compute_ceiling_estimate(room: &RoomDimensions, prices: &CeilingPrices) -> EstimatorResult<CeilingEstimateResult> {
    room.validate()?;
    prices.validate()?;

    let (a, b) = room.sides();
    let case_detected = detect_case(a, b);

    let along_length = compute_orientation(room, prices, Orientation::AlongLength)?;
    let along_width = compute_orientation(room, prices, Orientation::AlongWidth)?;

    let recommended = if along_length.cost <= along_width.cost {
        along_length
    } else {
        along_width
    };
    let savings = (along_length.cost - along_width.cost).abs();

    debug!(
        length = room.length,
        width = room.width,
        case = case_detected.code(),
        recommended = recommended.orientation.label(),
        savings,
        "computed ceiling estimate"
    );

    Ok(CeilingEstimateResult {
        room_label: room.size_label(),
        room_size: room.size_label(),
        case_detected,
        options: [along_length, along_width],
        recommended,
        savings,
        notes: vec![format!(
            "Using {} saves Rs. {}.",
            recommended.orientation.label(),
            savings
        )],
    })
}

// ============================================================================
// Multiple Rooms
// ============================================================================

/// A multi-room ceiling estimate request.
///
/// When `prices` is omitted the caller supplies a price table, normally
/// the project's settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Office",
///   "rooms": [{ "name": "Cabin", "length": 10, "width": 10 }],
///   "prices": { "mainT": 450, "crossT": 80, "panel": 380, "wallAngle": 190 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingEstimateInput {
    /// User label for this estimate
    #[serde(default)]
    pub label: String,

    pub rooms: Vec<NamedRoom>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<CeilingPrices>,
}

impl CeilingEstimateInput {
    /// This request's own prices, or `fallback` when it has none.
    pub fn prices_or(&self, fallback: &CeilingPrices) -> CeilingPrices {
        self.prices.unwrap_or(*fallback)
    }
}

/// Result of a multi-room ceiling estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingBatchResult {
    pub results: Vec<CeilingEstimateResult>,

    /// Sum of the recommended option costs (Rs)
    pub total_cost: f64,

    /// Sum of per-room savings (Rs)
    pub total_savings: f64,
}

/// Estimate every room with one price table.
///
/// Fails as a whole if any room is invalid; the error field names the room
/// (e.g. `rooms[0].length`).
pub fn estimate_ceilings(rooms: &[NamedRoom], prices: &CeilingPrices) -> EstimatorResult<CeilingBatchResult> {
    if rooms.is_empty() {
        return Err(EstimatorError::missing_field("rooms"));
    }
    prices.validate().map_err(|e| e.within("prices"))?;

    let results = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            let mut result = compute_ceiling_estimate(&room.dimensions(), prices)
                .map_err(|e| e.within(&format!("rooms[{}]", i)))?;
            result.room_label = room.display_name(i);
            Ok(result)
        })
        .collect::<EstimatorResult<Vec<_>>>()?;

    let total_cost = results.iter().map(|r| r.recommended.cost).sum();
    let total_savings = results.iter().map(|r| r.savings).sum();

    Ok(CeilingBatchResult {
        results,
        total_cost,
        total_savings,
    })
}
