//! Library for `NuBoard`, a curriculum board editor
//!
//! Semester boards per curriculum type, subject placements with drag-and-drop
//! reordering, and prerequisite attachment with automatic insertion into the
//! preceding semester.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::error::{EditError, ErrorKind};
pub use crate::core::get_version;
pub use crate::core::models::{
    Board, BoardType, CatalogSubject, Column, Curriculum, CurriculumInfo, Placement, SubjectRef,
};
pub use crate::core::options::{EditorConfig, TargetColumnPolicy};
pub use crate::core::store::CurriculumStore;
