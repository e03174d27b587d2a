//! Data models for the curriculum board editor

pub mod board;
pub mod column;
pub mod curriculum;
pub mod placement;

pub use board::{Board, BoardType};
pub use column::Column;
pub use curriculum::{Curriculum, CurriculumInfo, PlacementLocation};
pub use placement::{CatalogSubject, Placement, SubjectRef};

/// Board id
pub type BoardId = String;

/// Column (semester slot) id
pub type ColumnId = String;

/// Synthetic placement id
pub type PlacementId = String;

/// Catalog subject id
pub type SubjectId = String;
