//! Error types for board editing

use thiserror::Error;

/// Broad class of an [`EditError`], used to pick how a failure is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before touching state
    Validation,
    /// The edit would break a prerequisite reference
    Conflict,
    /// An id that should exist does not
    NotFound,
}

/// Reason an editing operation was rejected. The draft is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A title was empty after trimming
    #[error("title must not be empty")]
    EmptyTitle,

    /// No catalog subjects were selected
    #[error("no subjects selected")]
    EmptySelection,

    /// A board for this category already exists
    #[error("a '{0}' board already exists")]
    BoardExists(String),

    /// Removing the subject would orphan prerequisite references
    #[error("'{subject}' is a prerequisite of: {}", dependents.join(", "))]
    PrerequisiteConflict {
        /// Name of the subject being removed
        subject: String,
        /// Names of the subjects depending on it
        dependents: Vec<String>,
    },

    /// Attaching the prerequisite would create a cycle
    #[error("'{prerequisite}' already requires '{subject}'")]
    PrerequisiteCycle {
        /// Subject receiving the prerequisite
        subject: String,
        /// Requested prerequisite that already depends on `subject`
        prerequisite: String,
    },

    /// Board id not found
    #[error("board not found: {0}")]
    BoardNotFound(String),

    /// Column id not found in the given board
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Placement id not found
    #[error("subject placement not found: {0}")]
    PlacementNotFound(String),

    /// Catalog subject id not found by search
    #[error("subject not found in catalog: {0}")]
    SubjectNotFound(String),
}

impl EditError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle | Self::EmptySelection | Self::BoardExists(_) => ErrorKind::Validation,
            Self::PrerequisiteConflict { .. } | Self::PrerequisiteCycle { .. } => {
                ErrorKind::Conflict
            }
            Self::BoardNotFound(_)
            | Self::ColumnNotFound(_)
            | Self::PlacementNotFound(_)
            | Self::SubjectNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Not-found errors are inconsistencies the session recovers from by doing nothing
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }
}
