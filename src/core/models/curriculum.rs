//! Curriculum draft: every board plus the global placement map

use super::{Board, BoardType, Column, Placement, PlacementId, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Descriptive header of a curriculum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumInfo {
    /// Curriculum id
    pub id: String,
    /// Curriculum name (e.g., "BS Computer Science 2026")
    pub name: String,
    /// Short code
    #[serde(default)]
    pub code: String,
    /// Owning faculty
    #[serde(default)]
    pub faculty_id: String,
    /// Credits required to graduate
    #[serde(default)]
    pub total_credits: f32,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl CurriculumInfo {
    /// Create a header with an id and a name
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Board and column holding a placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementLocation {
    /// Board id
    pub board_id: String,
    /// Column id
    pub column_id: String,
}

/// The full curriculum draft edited in one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    /// Header
    pub info: CurriculumInfo,

    /// Boards in creation order, at most one per type
    pub boards: Vec<Board>,

    /// Placement records by placement id
    pub placements: BTreeMap<PlacementId, Placement>,
}

impl Curriculum {
    /// Create an empty draft
    #[must_use]
    pub fn new(info: CurriculumInfo) -> Self {
        Self {
            info,
            boards: Vec::new(),
            placements: BTreeMap::new(),
        }
    }

    /// Get a board by id
    #[must_use]
    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// Get a mutable board by id
    pub fn board_mut(&mut self, board_id: &str) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == board_id)
    }

    /// Get the board for a type
    #[must_use]
    pub fn board_by_type(&self, board_type: BoardType) -> Option<&Board> {
        self.boards.iter().find(|b| b.board_type == board_type)
    }

    /// Find a column anywhere in the draft
    ///
    /// # Returns
    /// The owning board and the column
    #[must_use]
    pub fn find_column(&self, column_id: &str) -> Option<(&Board, &Column)> {
        self.boards
            .iter()
            .find_map(|b| b.column(column_id).map(|c| (b, c)))
    }

    /// Get a placement by id
    #[must_use]
    pub fn placement(&self, placement_id: &str) -> Option<&Placement> {
        self.placements.get(placement_id)
    }

    /// Locate the board and column holding `placement_id`
    #[must_use]
    pub fn locate(&self, placement_id: &str) -> Option<PlacementLocation> {
        self.boards.iter().find_map(|board| {
            board.column_of(placement_id).map(|column| PlacementLocation {
                board_id: board.id.clone(),
                column_id: column.id.clone(),
            })
        })
    }

    /// Placements whose catalog subject is `subject_id`
    pub fn placements_of_subject<'a>(
        &'a self,
        subject_id: &'a str,
    ) -> impl Iterator<Item = &'a Placement> + 'a {
        self.placements
            .values()
            .filter(move |p| p.subject_id == subject_id)
    }

    /// Whether any placement of `subject_id` exists
    #[must_use]
    pub fn contains_subject(&self, subject_id: &str) -> bool {
        self.placements_of_subject(subject_id).next().is_some()
    }

    /// Placements (other than `except`) that list `subject_id` as a prerequisite
    #[must_use]
    pub fn dependents_of(&self, subject_id: &str, except: &str) -> Vec<&Placement> {
        let mut dependents: Vec<&Placement> = self
            .placements
            .values()
            .filter(|p| p.id != except && p.references(subject_id))
            .collect();
        dependents.sort_by(|a, b| a.name.cmp(&b.name));
        dependents
    }

    /// Whether `from` reaches `target` by following prerequisite edges
    /// (subject -> its prerequisites) through the placements in this draft
    #[must_use]
    pub fn requires_transitively(&self, from: &str, target: &str) -> bool {
        let mut stack: Vec<SubjectId> = vec![from.to_string()];
        let mut seen: HashSet<SubjectId> = HashSet::new();
        while let Some(subject) = stack.pop() {
            if !seen.insert(subject.clone()) {
                continue;
            }
            for placement in self.placements_of_subject(&subject) {
                for prereq in &placement.prerequisite_subjects {
                    if prereq.id == target {
                        return true;
                    }
                    stack.push(prereq.id.clone());
                }
            }
        }
        false
    }

    /// Total number of placements
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Total credits of all placements
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.placements.values().map(|p| p.credits).sum()
    }

    /// Check board consistency and that every column entry is a unique placement record
    ///
    /// A placement id may appear once in one column only, and semester numbers
    /// start at 1.
    ///
    /// # Errors
    /// Returns every inconsistency found
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        let mut holders: HashMap<&str, &str> = HashMap::new();
        for board in &self.boards {
            if !board.is_consistent() {
                problems.push(format!(
                    "Board '{}': column order does not match its columns",
                    board.name
                ));
            }
            for column in board.columns() {
                if column.semester_number == 0 {
                    problems.push(format!(
                        "Column '{}': semester number must be at least 1",
                        column.title
                    ));
                }
                let mut in_column: HashSet<&str> = HashSet::new();
                for placement_id in &column.subject_ids {
                    if !in_column.insert(placement_id) {
                        problems.push(format!(
                            "Column '{}': placement '{placement_id}' listed more than once",
                            column.title
                        ));
                        continue;
                    }
                    if let Some(other) = holders.insert(placement_id, &column.title) {
                        problems.push(format!(
                            "Placement '{placement_id}' is held by both '{other}' and '{}'",
                            column.title
                        ));
                    }
                    if !self.placements.contains_key(placement_id) {
                        problems.push(format!(
                            "Column '{}': missing placement '{placement_id}'",
                            column.title
                        ));
                    }
                }
            }
        }
        for placement in self.placements.values() {
            if placement.references(&placement.subject_id) {
                problems.push(format!(
                    "Placement '{}' lists itself as a prerequisite",
                    placement.name
                ));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
