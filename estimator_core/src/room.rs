//! # Room Geometry
//!
//! Room footprints shared by the tile and ceiling calculators. All
//! dimensions are in feet.
//!
//! ## JSON Example
//!
//! ```json
//! { "name": "Kitchen", "length": 12.0, "width": 10.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::EstimatorResult;
use crate::validation::require_positive;

/// Rectangular room footprint in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    /// Room length (ft)
    pub length: f64,
    /// Room width (ft)
    pub width: f64,
}

impl RoomDimensions {
    pub fn new(length: f64, width: f64) -> Self {
        RoomDimensions { length, width }
    }

    /// Both sides must be finite and strictly positive.
    pub fn validate(&self) -> EstimatorResult<()> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        Ok(())
    }

    /// Floor area (ft²)
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Perimeter (ft)
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }

    /// The longer and shorter side, as `(A, B)` with `A >= B`.
    pub fn sides(&self) -> (f64, f64) {
        (self.length.max(self.width), self.length.min(self.width))
    }

    /// Human-readable size, e.g. `"12 ft × 10.5 ft"`.
    pub fn size_label(&self) -> String {
        format!("{} ft × {} ft", self.length, self.width)
    }
}

/// A room as entered in a multi-room estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRoom {
    /// Display name; may be blank, see [`NamedRoom::display_name`]
    #[serde(default)]
    pub name: String,
    pub length: f64,
    pub width: f64,
}

impl NamedRoom {
    pub fn new(name: impl Into<String>, length: f64, width: f64) -> Self {
        NamedRoom {
            name: name.into(),
            length,
            width,
        }
    }

    pub fn dimensions(&self) -> RoomDimensions {
        RoomDimensions::new(self.length, self.width)
    }

    /// Trimmed name, or `"Room N"` (1-based) when the name is blank.
    pub fn display_name(&self, index: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Room {}", index + 1)
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_are_ordered() {
        assert_eq!(RoomDimensions::new(10.0, 20.0).sides(), (20.0, 10.0));
        assert_eq!(RoomDimensions::new(20.0, 10.0).sides(), (20.0, 10.0));
    }

    #[test]
    fn test_area_and_perimeter() {
        let room = RoomDimensions::new(7.0, 5.0);
        assert_eq!(room.area(), 35.0);
        assert_eq!(room.perimeter(), 24.0);
    }

    #[test]
    fn test_size_label_drops_trailing_zero() {
        assert_eq!(RoomDimensions::new(10.0, 10.5).size_label(), "10 ft × 10.5 ft");
    }

    #[test]
    fn test_validate() {
        assert!(RoomDimensions::new(1.0, 1.0).validate().is_ok());
        assert!(RoomDimensions::new(0.0, 1.0).validate().is_err());
        assert!(RoomDimensions::new(1.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(NamedRoom::new("  Hall ", 1.0, 1.0).display_name(0), "Hall");
        assert_eq!(NamedRoom::new("   ", 1.0, 1.0).display_name(2), "Room 3");
    }

    #[test]
    fn test_named_room_name_is_optional_in_json() {
        let room: NamedRoom = serde_json::from_str(r#"{"length": 8, "width": 6}"#).unwrap();
        assert_eq!(room.name, "");
        assert_eq!(room.dimensions(), RoomDimensions::new(8.0, 6.0));
    }
}
