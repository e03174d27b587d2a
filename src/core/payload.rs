//! JSON shapes exchanged with the persistence and import collaborators,
//! plus draft files used to carry a session across CLI invocations.

use crate::core::models::{Board, Curriculum, CurriculumInfo, Placement, PlacementId, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors reading or writing JSON payloads and draft files
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Filesystem failure
    #[error("failed to access {path}: {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Malformed JSON or unexpected shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How placements are emitted in a save payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubjectShape {
    /// Full placement records
    #[default]
    Rich,
    /// Storage shape with prerequisites reduced to catalog ids
    Simplified,
}

impl FromStr for SubjectShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rich" | "full" => Ok(Self::Rich),
            "simplified" | "simple" => Ok(Self::Simplified),
            _ => Err(format!("Unknown subject shape: {s}")),
        }
    }
}

impl fmt::Display for SubjectShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rich => write!(f, "rich"),
            Self::Simplified => write!(f, "simplified"),
        }
    }
}

/// A placement in the storage shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimplifiedSubject {
    /// Placement id
    pub id: PlacementId,
    /// Catalog subject id
    pub subject_id: SubjectId,
    /// Semester number
    pub semester: u32,
    /// Credits
    pub credits: f32,
    /// Whether the subject is mandatory
    pub is_required: bool,
    /// Prerequisite catalog ids
    pub prerequisite_subjects: Vec<SubjectId>,
}

impl From<&Placement> for SimplifiedSubject {
    fn from(placement: &Placement) -> Self {
        Self {
            id: placement.id.clone(),
            subject_id: placement.subject_id.clone(),
            semester: placement.semester_number,
            credits: placement.credits,
            is_required: placement.is_required,
            prerequisite_subjects: placement.prerequisite_ids(),
        }
    }
}

/// A placement as emitted in a save payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectPayload {
    /// Full record
    Rich(Placement),
    /// Storage shape
    Simplified(SimplifiedSubject),
}

/// Request body for saving a curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    /// Curriculum header
    pub curriculum_info: CurriculumInfo,
    /// Boards with their columns
    pub boards: Vec<Board>,
    /// Placements in board/column display order
    pub subjects: Vec<SubjectPayload>,
}

impl SavePayload {
    /// Build a payload from a draft
    ///
    /// Placements are listed board by board, column by column; placements held
    /// by no column follow, sorted by id.
    #[must_use]
    pub fn from_draft(draft: &Curriculum, shape: SubjectShape) -> Self {
        let mut ordered: Vec<&Placement> = Vec::with_capacity(draft.placement_count());
        let mut seen: HashSet<&str> = HashSet::new();
        for board in &draft.boards {
            for column in board.columns() {
                for placement_id in &column.subject_ids {
                    if let Some(placement) = draft.placement(placement_id) {
                        if seen.insert(placement.id.as_str()) {
                            ordered.push(placement);
                        }
                    }
                }
            }
        }
        let mut loose: Vec<&Placement> = draft
            .placements
            .values()
            .filter(|p| !seen.contains(p.id.as_str()))
            .collect();
        loose.sort_by(|a, b| a.id.cmp(&b.id));
        ordered.extend(loose);

        let subjects = ordered
            .into_iter()
            .map(|placement| match shape {
                SubjectShape::Rich => SubjectPayload::Rich(placement.clone()),
                SubjectShape::Simplified => {
                    SubjectPayload::Simplified(SimplifiedSubject::from(placement))
                }
            })
            .collect();

        Self {
            curriculum_info: draft.info.clone(),
            boards: draft.boards.clone(),
            subjects,
        }
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One rejected spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// Row number in the sheet
    pub row: usize,
    /// Reason
    pub message: String,
}

/// Counts reported by an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportData {
    /// Rows imported
    #[serde(default)]
    pub success_count: usize,
    /// Rows rejected
    #[serde(default)]
    pub error_count: usize,
    /// Per-row reasons
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}

/// Response of the spreadsheet import collaborator; summarized, never merged into the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Overall success flag
    pub success: bool,
    /// Server message
    #[serde(default)]
    pub message: String,
    /// Row counts, when present
    #[serde(default)]
    pub data: Option<ImportData>,
}

impl ImportResponse {
    /// Parse a response body
    ///
    /// # Errors
    /// Returns an error if the body is not a valid import response
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// User-facing summary of the import
    #[must_use]
    pub fn summary(&self) -> String {
        if !self.success {
            let reason = if self.message.is_empty() {
                "unknown error"
            } else {
                self.message.as_str()
            };
            return format!("✗ Import failed: {reason}");
        }
        let data = self.data.clone().unwrap_or_default();
        let mut out = format!("✓ Imported {} row(s)", data.success_count);
        if data.error_count > 0 {
            let _ = write!(out, ", {} row(s) rejected", data.error_count);
            for err in &data.errors {
                let _ = write!(out, "\n  row {}: {}", err.row, err.message);
            }
        }
        out
    }
}

/// Write a draft to `path` as JSON
///
/// # Errors
/// Returns an error if serialization or the write fails
pub fn save_draft<P: AsRef<Path>>(path: P, draft: &Curriculum) -> Result<(), PayloadError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(draft)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PayloadError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| PayloadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read a draft previously written by [`save_draft`]
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_draft<P: AsRef<Path>>(path: P) -> Result<Curriculum, PayloadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
