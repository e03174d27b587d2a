//! Markdown report generator
//!
//! Generates board reports in Markdown with an embedded Mermaid diagram. These
//! render well in GitHub, GitLab, and VS Code.

use crate::core::models::Board;
use crate::core::report::visualization::MermaidGenerator;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/board.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();
        let code = if ctx.draft.info.code.is_empty() {
            "-"
        } else {
            ctx.draft.info.code.as_str()
        };

        output = output.replace("{{curriculum_name}}", ctx.curriculum_name());
        output = output.replace("{{curriculum_code}}", code);
        output = output.replace("{{board_count}}", &ctx.boards().len().to_string());
        output = output.replace("{{subject_count}}", &ctx.subject_count().to_string());
        output = output.replace("{{total_credits}}", &format!("{:.1}", ctx.total_credits()));
        output = output.replace(
            "{{required_credits}}",
            &format!("{:.1}", ctx.required_credits()),
        );

        let boards: String = ctx
            .boards()
            .iter()
            .map(|board| Self::generate_board_table(ctx, board))
            .collect();
        output = output.replace("{{boards}}", &boards);

        let diagram = MermaidGenerator::generate_prerequisite_diagram(ctx.draft);
        output = output.replace("{{mermaid_diagram}}", &diagram);

        output
    }

    /// Generate one board's semester table
    fn generate_board_table(ctx: &ReportContext, board: &Board) -> String {
        let mut table = String::new();
        let _ = writeln!(table, "### {}\n", board.name);

        if board.column_count() == 0 {
            table.push_str("_No semesters yet._\n\n");
            return table;
        }

        table.push_str("| Semester | Subjects | Credits |\n");
        table.push_str("|---|---|---|\n");

        for column in board.columns() {
            let subjects: Vec<String> = column
                .subject_ids
                .iter()
                .filter_map(|id| ctx.draft.placement(id))
                .map(|p| {
                    if p.has_prerequisite {
                        let prereqs = p.prerequisite_ids().join(", ");
                        Self::escape_cell(&format!("{} - {} ↳ {prereqs}", p.subject_id, p.name))
                    } else {
                        Self::escape_cell(&format!("{} - {}", p.subject_id, p.name))
                    }
                })
                .collect();
            let subjects = if subjects.is_empty() {
                "-".to_string()
            } else {
                subjects.join("<br/>")
            };

            let _ = writeln!(
                table,
                "| {} | {subjects} | {:.1} |",
                Self::escape_cell(&column.title),
                ctx.column_credits(&column.subject_ids)
            );
        }
        table.push('\n');
        table
    }

    /// Escape pipes so cell text cannot split a table row
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
