//! Report command handler
//!
//! Renders a draft as a Markdown board report with a prerequisite diagram.

use super::draft::{open_store, resolve_draft_path};
use nu_board::config::Config;
use nu_board::core::report::{MarkdownReporter, ReportContext, ReportFormat, ReportGenerator};
use nu_board::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command
///
/// # Arguments
/// * `draft_arg` - Draft file or name
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown)
/// * `config` - Configuration containing the default reports directory
///
/// # Errors
/// Returns a user-facing message if the draft cannot be loaded or the report written
pub fn run(
    draft_arg: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))?;
    let path = resolve_draft_path(draft_arg, config);
    let store = open_store(&path, config)?;

    let output_path = output_file.map_or_else(
        || default_output_path(&path, &config.paths.reports_dir, format),
        Path::to_path_buf,
    );
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("✗ Failed to create {}: {e}", parent.display()))?;
    }

    let ctx = ReportContext::new(store.draft());
    let reporter = match format {
        ReportFormat::Markdown => MarkdownReporter::new(),
    };
    reporter.generate(&ctx, &output_path).map_err(|e| {
        error!("Report generation failed for {}: {e}", path.display());
        format!("✗ Failed to generate report: {e}")
    })?;

    info!("Report written: {}", output_path.display());
    println!("✓ Report generated: {}", output_path.display());
    Ok(())
}

/// `<reports_dir>/<draft stem>_board.<ext>`, or next to the draft when no reports dir is set
fn default_output_path(draft_path: &Path, reports_dir: &str, format: ReportFormat) -> PathBuf {
    let stem = draft_path
        .file_stem()
        .map_or_else(|| "curriculum".to_string(), |s| s.to_string_lossy().to_string());
    let file_name = format!("{stem}_board.{}", format.extension());
    if reports_dir.is_empty() {
        draft_path.with_file_name(file_name)
    } else {
        PathBuf::from(reports_dir).join(file_name)
    }
}
