//! # Project Data Structures
//!
//! The `Project` struct is the root container for a shop's estimates.
//! Projects serialize to `.mep` (Material Estimator Project) files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, owner, project name, date, timestamps)
//! ├── settings: EstimatorSettings (price table, default allowance)
//! └── items: HashMap<Uuid, EstimationItem> (tile and ceiling estimates)
//! ```
//!
//! Only the estimate inputs are stored. Results are recomputed on demand,
//! which is cheap and always matches the current engine.
//!
//! ## Example
//!
//! ```rust
//! use estimator_core::project::Project;
//!
//! let project = Project::new("Ali Traders", "Villa 12");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Villa 12"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{EstimatorError, EstimatorResult};
use crate::estimations::{EstimationItem, EstimationOutcome};
use crate::settings::EstimatorSettings;

/// Current schema version for .mep files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, owner, name)
    pub meta: ProjectMetadata,

    /// Pricing defaults used when evaluating items
    #[serde(default)]
    pub settings: EstimatorSettings,

    /// All estimation items, keyed by UUID
    pub items: HashMap<Uuid, EstimationItem>,
}

impl Project {
    /// Create a new empty project dated today.
    ///
    /// # Example
    ///
    /// ```rust
    /// use estimator_core::project::Project;
    ///
    /// let project = Project::new("Ali Traders", "Villa 12");
    /// assert_eq!(project.meta.owner, "Ali Traders");
    /// assert_eq!(project.item_count(), 0);
    /// ```
    pub fn new(owner: impl Into<String>, project_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                owner: owner.into(),
                project_name: project_name.into(),
                date: now.date_naive(),
                created: now,
                modified: now,
            },
            settings: EstimatorSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add an estimation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use estimator_core::project::Project;
    /// use estimator_core::estimations::{EstimationItem, CeilingEstimateInput};
    /// use estimator_core::room::NamedRoom;
    ///
    /// let mut project = Project::new("Owner", "Office");
    /// let id = project.add_item(EstimationItem::Ceiling(CeilingEstimateInput {
    ///     label: "Cabins".to_string(),
    ///     rooms: vec![NamedRoom::new("Cabin 1", 10.0, 10.0)],
    ///     prices: None,
    /// }));
    /// assert!(project.items.contains_key(&id));
    /// ```
    pub fn add_item(&mut self, item: EstimationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an estimation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<EstimationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get an estimation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&EstimationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Evaluate one item with the project's settings.
    pub fn evaluate_item(&self, id: &Uuid) -> EstimatorResult<EstimationOutcome> {
        let item = self
            .get_item(id)
            .ok_or_else(|| EstimatorError::item_not_found(id.to_string()))?;
        item.evaluate(&self.settings)
    }

    /// Evaluate every item, ordered by label (then id, for stable output).
    ///
    /// Stops at the first item that fails; the error field is prefixed with
    /// the item label.
    pub fn evaluate_all(&self) -> EstimatorResult<Vec<(Uuid, EstimationOutcome)>> {
        let mut ids: Vec<&Uuid> = self.items.keys().collect();
        ids.sort_by(|a, b| self.items[*a].label().cmp(self.items[*b].label()).then(a.cmp(b)));

        let outcomes = ids
            .into_iter()
            .map(|id| {
                let item = &self.items[id];
                let outcome = item.evaluate(&self.settings).map_err(|e| e.within(item.label()))?;
                Ok((*id, outcome))
            })
            .collect::<EstimatorResult<Vec<_>>>()?;

        debug!(items = outcomes.len(), "evaluated project");
        Ok(outcomes)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Shop or person the estimate is prepared by
    pub owner: String,

    /// Customer-facing project name
    pub project_name: String,

    /// Estimate date shown on reports
    pub date: NaiveDate,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimations::{CeilingEstimateInput, TileEstimateInput, TileSpec};
    use crate::room::NamedRoom;

    fn ceiling_item(label: &str) -> EstimationItem {
        EstimationItem::Ceiling(CeilingEstimateInput {
            label: label.to_string(),
            rooms: vec![NamedRoom::new("Hall", 20.0, 10.0)],
            prices: None,
        })
    }

    fn tile_item(label: &str) -> EstimationItem {
        EstimationItem::Tile(TileEstimateInput {
            label: label.to_string(),
            rooms: vec![NamedRoom::new("Bath", 7.0, 5.0)],
            tile: TileSpec::new(2.0, 2.0, 0.0, 100.0),
        })
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("Ali Traders", "Villa 12");
        assert_eq!(project.meta.owner, "Ali Traders");
        assert_eq!(project.meta.project_name, "Villa 12");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings, EstimatorSettings::default());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Owner", "Office Fit-out");
        project.add_item(ceiling_item("Ceilings"));
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Office Fit-out"));
        assert!(json.contains("projectName"));
        assert!(json.contains("\"type\": \"Ceiling\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.project_name, "Office Fit-out");
        assert_eq!(roundtrip.item_count(), 1);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Owner", "Job");
        let id = project.add_item(tile_item("Floors"));
        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_evaluate_item() {
        let mut project = Project::new("Owner", "Job");
        let id = project.add_item(ceiling_item("Hall"));
        let outcome = project.evaluate_item(&id).unwrap();
        assert_eq!(outcome.total_cost(), 27340.0);

        let missing = project.evaluate_item(&Uuid::new_v4()).unwrap_err();
        assert_eq!(missing.error_code(), "ITEM_NOT_FOUND");
    }

    #[test]
    fn test_evaluate_all_sorted_by_label() {
        let mut project = Project::new("Owner", "Job");
        project.add_item(tile_item("B floors"));
        project.add_item(ceiling_item("A ceilings"));

        let outcomes = project.evaluate_all().unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].1, EstimationOutcome::Ceiling(_)));
        assert!(matches!(outcomes[1].1, EstimationOutcome::Tile(_)));
    }

    #[test]
    fn test_evaluate_all_reports_failing_item() {
        let mut project = Project::new("Owner", "Job");
        project.add_item(EstimationItem::Tile(TileEstimateInput {
            label: "Broken".to_string(),
            rooms: vec![NamedRoom::new("X", 0.0, 5.0)],
            tile: TileSpec::new(2.0, 2.0, 5.0, 10.0),
        }));
        let err = project.evaluate_all().unwrap_err();
        assert!(err.to_string().contains("Broken.rooms[0].length"));
    }
}
