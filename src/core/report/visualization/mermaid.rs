//! Mermaid diagram generator for curriculum boards
//!
//! Generates Mermaid flowchart syntax that can be embedded in Markdown files
//! and rendered by GitHub, GitLab, and other Markdown viewers.

use crate::core::models::{Curriculum, Placement};
use std::fmt::Write;

/// Generator for Mermaid diagram syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate a flowchart with one subgraph per semester column and an edge
    /// from every prerequisite placement to the placement requiring it
    #[must_use]
    pub fn generate_prerequisite_diagram(draft: &Curriculum) -> String {
        let mut output = String::from("```mermaid\nflowchart LR\n");

        for board in &draft.boards {
            for column in board.columns() {
                if column.is_empty() {
                    continue;
                }
                let subgraph_id = Self::sanitize_id(&column.id);
                let label = Self::escape_label(&format!("{}: {}", board.name, column.title));
                let _ = writeln!(output, "    subgraph {subgraph_id}[\"{label}\"]");
                for placement in column
                    .subject_ids
                    .iter()
                    .filter_map(|id| draft.placement(id))
                {
                    let _ = writeln!(
                        output,
                        "        {}[\"{}\"]",
                        Self::sanitize_id(&placement.id),
                        Self::get_node_label(placement)
                    );
                }
                output.push_str("    end\n\n");
            }
        }

        let mut edges: Vec<(String, String)> = Vec::new();
        for placement in draft.placements.values() {
            let to = Self::sanitize_id(&placement.id);
            for prereq in &placement.prerequisite_subjects {
                for source in draft.placements_of_subject(&prereq.id) {
                    edges.push((Self::sanitize_id(&source.id), to.clone()));
                }
            }
        }
        edges.sort();
        for (from, to) in edges {
            let _ = writeln!(output, "    {from} --> {to}");
        }

        output.push_str("```\n");
        output
    }

    /// Get a display label for a placement node
    fn get_node_label(placement: &Placement) -> String {
        let name: String = if placement.name.chars().count() > 20 {
            let short: String = placement.name.chars().take(17).collect();
            format!("{short}...")
        } else {
            placement.name.clone()
        };
        Self::escape_label(&format!("{}<br/>{name}", placement.subject_id))
    }

    /// Replace double quotes, which would end a quoted Mermaid label early
    fn escape_label(text: &str) -> String {
        text.replace('"', "#quot;")
    }

    /// Sanitize an id for use as a Mermaid node ID
    fn sanitize_id(key: &str) -> String {
        key.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}
