//! Report generation for curriculum drafts
//!
//! Renders a draft as a Markdown document with one semester table per board and
//! a Mermaid diagram of the prerequisite edges.

pub mod formats;
pub mod visualization;

use crate::core::models::{Board, Curriculum};
use std::error::Error;
use std::path::Path;

pub use formats::{MarkdownReporter, ReportFormat};
pub use visualization::MermaidGenerator;

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// The draft being reported
    pub draft: &'a Curriculum,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(draft: &'a Curriculum) -> Self {
        Self { draft }
    }

    /// Curriculum name, or a placeholder when unnamed
    #[must_use]
    pub fn curriculum_name(&self) -> &str {
        if self.draft.info.name.is_empty() {
            "Untitled Curriculum"
        } else {
            &self.draft.info.name
        }
    }

    /// Boards in creation order
    #[must_use]
    pub fn boards(&self) -> &'a [Board] {
        &self.draft.boards
    }

    /// Total credits of all placements
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.draft.total_credits()
    }

    /// Credits of placements marked required
    #[must_use]
    pub fn required_credits(&self) -> f32 {
        self.draft
            .placements
            .values()
            .filter(|p| p.is_required)
            .map(|p| p.credits)
            .sum()
    }

    /// Credits held by one column
    #[must_use]
    pub fn column_credits(&self, subject_ids: &[String]) -> f32 {
        subject_ids
            .iter()
            .filter_map(|id| self.draft.placement(id))
            .map(|p| p.credits)
            .sum()
    }

    /// Number of placements
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.draft.placement_count()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
