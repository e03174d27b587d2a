//! Board model: one per curriculum category

use super::{BoardId, Column, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Curriculum category a board holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    /// Core (major) subjects
    Core,
    /// Physical education
    Pe,
    /// Soft skills
    Skill,
    /// English language
    English,
    /// Philosophy and political theory
    Philosophy,
    /// Any other user-defined bucket
    Custom,
}

impl BoardType {
    /// All board types, in display order
    pub const ALL: [Self; 6] = [
        Self::Core,
        Self::Pe,
        Self::Skill,
        Self::English,
        Self::Philosophy,
        Self::Custom,
    ];

    /// Human-readable label used in board names and column titles
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Pe => "Physical Education",
            Self::Skill => "Skills",
            Self::English => "English",
            Self::Philosophy => "Philosophy",
            Self::Custom => "Custom",
        }
    }

    /// Short tag stored on columns (`curriculum_type_id`)
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Pe => "pe",
            Self::Skill => "skill",
            Self::English => "english",
            Self::Philosophy => "philosophy",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for BoardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" => Ok(Self::Core),
            "pe" | "physical-education" => Ok(Self::Pe),
            "skill" | "skills" => Ok(Self::Skill),
            "english" => Ok(Self::English),
            "philosophy" => Ok(Self::Philosophy),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown board type: {s}")),
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An ordered sequence of semester columns for one category
///
/// `column_order` and the keys of `semester_column` always hold the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Board id
    pub id: BoardId,

    /// Display name
    pub name: String,

    /// Category
    #[serde(rename = "type")]
    pub board_type: BoardType,

    /// Owning curriculum id
    pub curriculum_id: String,

    /// Column ids in display order
    pub column_order: Vec<ColumnId>,

    /// Columns by id
    pub semester_column: BTreeMap<ColumnId, Column>,
}

impl Board {
    /// Create an empty board named after its type
    #[must_use]
    pub fn new(id: BoardId, board_type: BoardType, curriculum_id: String) -> Self {
        Self {
            id,
            name: board_type.label().to_string(),
            board_type,
            curriculum_id,
            column_order: Vec::new(),
            semester_column: BTreeMap::new(),
        }
    }

    /// Title for a column of this board at `semester`
    #[must_use]
    pub fn column_title(&self, semester: u32) -> String {
        format!("{} - Semester {semester}", self.board_type.label())
    }

    /// Number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.semester_column.get(id))
    }

    /// Get a column by id
    #[must_use]
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.semester_column.get(column_id)
    }

    /// Get a mutable column by id
    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.semester_column.get_mut(column_id)
    }

    /// Append a column at the end of the order
    pub fn push_column(&mut self, column: Column) {
        self.column_order.push(column.id.clone());
        self.semester_column.insert(column.id.clone(), column);
    }

    /// Insert a column before the first column with a higher semester number
    ///
    /// # Returns
    /// The position the column was inserted at
    pub fn insert_column_sorted(&mut self, column: Column) -> usize {
        let position = self
            .column_order
            .iter()
            .position(|id| {
                self.semester_column
                    .get(id)
                    .is_some_and(|c| c.semester_number > column.semester_number)
            })
            .unwrap_or(self.column_order.len());
        self.column_order.insert(position, column.id.clone());
        self.semester_column.insert(column.id.clone(), column);
        position
    }

    /// Remove a column from both the order and the map
    pub fn remove_column(&mut self, column_id: &str) -> Option<Column> {
        let column = self.semester_column.remove(column_id)?;
        self.column_order.retain(|id| id != column_id);
        Some(column)
    }

    /// First column (in display order) for `semester`
    #[must_use]
    pub fn column_for_semester(&self, semester: u32) -> Option<&Column> {
        self.columns().find(|c| c.semester_number == semester)
    }

    /// Column with the greatest semester number strictly below `semester`
    #[must_use]
    pub fn closest_lower_column(&self, semester: u32) -> Option<&Column> {
        self.columns()
            .filter(|c| c.semester_number < semester)
            .max_by_key(|c| c.semester_number)
    }

    /// Column holding `placement_id`, if any
    #[must_use]
    pub fn column_of(&self, placement_id: &str) -> Option<&Column> {
        self.columns().find(|c| c.contains(placement_id))
    }

    /// Check that `column_order` and `semester_column` hold the same ids
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let ordered: HashSet<&ColumnId> = self.column_order.iter().collect();
        ordered.len() == self.column_order.len()
            && ordered.len() == self.semester_column.len()
            && self.semester_column.keys().all(|id| ordered.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(semesters: &[u32]) -> Board {
        let mut board = Board::new("b1".to_string(), BoardType::Core, "cur".to_string());
        for (i, semester) in semesters.iter().enumerate() {
            let title = board.column_title(*semester);
            board.push_column(Column::new(
                format!("c{i}"),
                title,
                *semester,
                "core".to_string(),
            ));
        }
        board
    }

    #[test]
    fn test_board_type_parse_and_display() {
        assert_eq!("PE".parse::<BoardType>(), Ok(BoardType::Pe));
        assert_eq!("skills".parse::<BoardType>(), Ok(BoardType::Skill));
        assert!("electives".parse::<BoardType>().is_err());
        assert_eq!(BoardType::Philosophy.to_string(), "philosophy");
    }

    #[test]
    fn test_board_type_serde_lowercase() {
        let json = serde_json::to_string(&BoardType::English).unwrap();
        assert_eq!(json, "\"english\"");
    }

    #[test]
    fn test_column_title() {
        let board = board_with(&[]);
        assert_eq!(board.column_title(2), "Core - Semester 2");
    }

    #[test]
    fn test_insert_column_sorted() {
        let mut board = board_with(&[1, 3]);
        let pos = board.insert_column_sorted(Column::new(
            "c-new".to_string(),
            "Core - Semester 2".to_string(),
            2,
            "core".to_string(),
        ));

        assert_eq!(pos, 1);
        assert_eq!(board.column_order, vec!["c0", "c-new", "c1"]);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_insert_column_sorted_appends_when_highest() {
        let mut board = board_with(&[1, 2]);
        let pos = board.insert_column_sorted(Column::new(
            "c-new".to_string(),
            "x".to_string(),
            5,
            "core".to_string(),
        ));
        assert_eq!(pos, 2);
    }

    #[test]
    fn test_remove_column_keeps_consistency() {
        let mut board = board_with(&[1, 2, 3]);
        assert!(board.remove_column("c1").is_some());
        assert!(board.remove_column("c1").is_none());
        assert_eq!(board.column_order, vec!["c0", "c2"]);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_inconsistent_board_detected() {
        let mut board = board_with(&[1]);
        board.column_order.push("ghost".to_string());
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_semester_lookups() {
        let board = board_with(&[1, 3, 4]);
        assert_eq!(board.column_for_semester(3).map(|c| c.id.as_str()), Some("c1"));
        assert!(board.column_for_semester(2).is_none());
        assert_eq!(
            board.closest_lower_column(3).map(|c| c.id.as_str()),
            Some("c0")
        );
        assert!(board.closest_lower_column(1).is_none());
    }
}
