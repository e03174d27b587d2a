//! Semester column model

use super::{ColumnId, PlacementId};
use serde::{Deserialize, Serialize};

/// A semester slot within a board holding an ordered list of placements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column id
    pub id: ColumnId,

    /// Display title (e.g., "Core - Semester 2")
    pub title: String,

    /// Semester number, starting at 1
    pub semester_number: u32,

    /// Placement ids in display order; never contains duplicates
    pub subject_ids: Vec<PlacementId>,

    /// Board type tag of the owning board (e.g., "core")
    pub curriculum_type_id: String,
}

impl Column {
    /// Create an empty column
    ///
    /// # Arguments
    /// * `id` - Column id
    /// * `title` - Display title
    /// * `semester_number` - Semester number (values below 1 are raised to 1)
    /// * `curriculum_type_id` - Board type tag
    #[must_use]
    pub fn new(id: ColumnId, title: String, semester_number: u32, curriculum_type_id: String) -> Self {
        Self {
            id,
            title,
            semester_number: semester_number.max(1),
            subject_ids: Vec::new(),
            curriculum_type_id,
        }
    }

    /// Insert a placement id at `index` (clamped to the list length)
    ///
    /// # Returns
    /// `false` if the id is already in the column
    pub fn insert_subject(&mut self, index: usize, placement_id: PlacementId) -> bool {
        if self.contains(&placement_id) {
            return false;
        }
        let index = index.min(self.subject_ids.len());
        self.subject_ids.insert(index, placement_id);
        true
    }

    /// Append a placement id
    ///
    /// # Returns
    /// `false` if the id is already in the column
    pub fn push_subject(&mut self, placement_id: PlacementId) -> bool {
        let end = self.subject_ids.len();
        self.insert_subject(end, placement_id)
    }

    /// Remove a placement id
    ///
    /// # Returns
    /// The index it was removed from, or `None` if absent
    pub fn remove_subject(&mut self, placement_id: &str) -> Option<usize> {
        let pos = self.subject_ids.iter().position(|id| id == placement_id)?;
        self.subject_ids.remove(pos);
        Some(pos)
    }

    /// Whether the column holds `placement_id`
    #[must_use]
    pub fn contains(&self, placement_id: &str) -> bool {
        self.subject_ids.iter().any(|id| id == placement_id)
    }

    /// Number of placements in the column
    #[must_use]
    pub const fn len(&self) -> usize {
        self.subject_ids.len()
    }

    /// Whether the column has no placements
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.subject_ids.is_empty()
    }
}
