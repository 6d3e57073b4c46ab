//! # estimator_core - Material Estimation Engine
//!
//! `estimator_core` is the computational heart of the Material Estimator,
//! working out tile and false-ceiling quantities and costs for shop owners.
//! All inputs and outputs are JSON-serializable with camelCase field names,
//! so request handlers and report generators can pass them straight through.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit configuration**: Price tables are passed in, never global
//! - **Rich Errors**: Structured error types, not just strings
//! - **All-or-nothing**: Inputs are validated before anything is derived
//!
//! ## Quick Start
//!
//! ```rust
//! use estimator_core::estimations::{compute_ceiling_estimate, CeilingPrices};
//! use estimator_core::room::RoomDimensions;
//!
//! let room = RoomDimensions::new(20.0, 10.0);
//! let estimate = compute_ceiling_estimate(&room, &CeilingPrices::default()).unwrap();
//!
//! let json = serde_json::to_string_pretty(&estimate).unwrap();
//! assert!(json.contains("recommended"));
//! ```
//!
//! ## Modules
//!
//! - [`estimations`] - Tile and ceiling calculators
//! - [`room`] - Room footprints
//! - [`settings`] - Price table and allowance defaults
//! - [`project`] - Project container for saved estimates
//! - [`file_io`] - Atomic project saves, loads and request files
//! - [`validation`] - Numeric input guards
//! - [`errors`] - Structured error types

pub mod errors;
pub mod estimations;
pub mod file_io;
pub mod project;
pub mod room;
pub mod settings;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use errors::{EstimatorError, EstimatorResult};
pub use file_io::{load_json, load_project, save_project};
pub use project::{Project, ProjectMetadata};
pub use room::{NamedRoom, RoomDimensions};
pub use settings::EstimatorSettings;
