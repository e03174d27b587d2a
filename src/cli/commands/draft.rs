//! Draft file handling shared by the editing commands, plus `new` and `show`
//!
//! A draft argument is either a path to a JSON draft file or a bare name, which
//! resolves to `<drafts_dir>/<name>.json`.

use nu_board::config::Config;
use nu_board::core::error::EditError;
use nu_board::core::models::{Curriculum, CurriculumInfo};
use nu_board::core::payload::{load_draft, save_draft};
use nu_board::core::selection::CatalogIndex;
use nu_board::core::store::CurriculumStore;
use nu_board::{error, info, warn};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Resolve a draft argument to a file path
#[must_use]
pub fn resolve_draft_path(arg: &Path, config: &Config) -> PathBuf {
    let is_bare_name = arg.components().count() == 1 && arg.extension().is_none();
    if is_bare_name && !config.paths.drafts_dir.is_empty() {
        PathBuf::from(&config.paths.drafts_dir).join(arg).with_extension("json")
    } else {
        arg.to_path_buf()
    }
}

/// Load a draft into a store configured from `config`
///
/// # Errors
/// Returns a user-facing message if the draft cannot be read or is inconsistent
pub fn open_store(path: &Path, config: &Config) -> Result<CurriculumStore, String> {
    let draft = load_draft(path).map_err(|e| {
        error!("Failed to load draft {}: {e}", path.display());
        format!("✗ Failed to load draft {}: {e}", path.display())
    })?;
    info!("Draft loaded: {}", path.display());
    if let Err(problems) = draft.validate() {
        for problem in &problems {
            warn!("{}: {problem}", path.display());
        }
        error!("Refusing to edit inconsistent draft {}", path.display());
        return Err(format!(
            "✗ Invalid draft {}: {}",
            path.display(),
            problems.join("; ")
        ));
    }
    Ok(CurriculumStore::open(draft, config.editor_config()))
}

/// Write a store's draft back to `path`
///
/// # Errors
/// Returns a user-facing message if the draft cannot be written
pub fn commit(path: &Path, draft: &Curriculum) -> Result<(), String> {
    save_draft(path, draft).map_err(|e| {
        error!("Failed to save draft {}: {e}", path.display());
        format!("✗ Failed to save draft {}: {e}", path.display())
    })
}

/// Render a rejected edit as a notice
#[must_use]
pub fn notice(err: &EditError) -> String {
    format!("✗ {err}")
}

/// Load the configured catalog
///
/// # Errors
/// Returns a user-facing message if no catalog is configured or it cannot be read
pub fn load_catalog(config: &Config) -> Result<CatalogIndex, String> {
    if config.paths.catalog_file.is_empty() {
        return Err(
            "✗ No catalog configured. Set one with `nuboard config set catalog_file <FILE>` or pass --catalog."
                .to_string(),
        );
    }
    let catalog = CatalogIndex::load(&config.paths.catalog_file).map_err(|e| {
        error!("Failed to load catalog {}: {e}", config.paths.catalog_file);
        format!("✗ Failed to load catalog {}: {e}", config.paths.catalog_file)
    })?;
    info!(
        "Catalog loaded: {} ({} subjects)",
        config.paths.catalog_file,
        catalog.len()
    );
    Ok(catalog)
}

/// Create a new, empty draft file
///
/// # Errors
/// Returns a user-facing message if the draft exists (without `force`) or cannot be written
pub fn run_new(
    draft_arg: &Path,
    name: &str,
    code: &str,
    id: Option<&str>,
    force: bool,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    if path.exists() && !force {
        return Err(format!(
            "✗ Draft already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    let default_id = path
        .file_stem()
        .map_or_else(|| "curriculum".to_string(), |s| s.to_string_lossy().to_string());
    let mut info = CurriculumInfo::new(id.unwrap_or(&default_id), name);
    info.code = code.to_string();

    let store = CurriculumStore::new(info, config.editor_config());
    commit(&path, store.draft())?;
    println!("✓ Created draft: {}", path.display());
    Ok(())
}

/// Print a draft's boards, columns and placements
///
/// # Errors
/// Returns a user-facing message if the draft cannot be read
pub fn run_show(draft_arg: &Path, config: &Config) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let store = open_store(&path, config)?;
    print!("{}", describe(store.draft()));
    Ok(())
}

/// Text listing of a draft
#[must_use]
pub fn describe(draft: &Curriculum) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== {} ({}) ===", draft.info.name, draft.info.id);
    let _ = writeln!(
        out,
        "{} board(s), {} subject(s), {:.1} credits",
        draft.boards.len(),
        draft.placement_count(),
        draft.total_credits()
    );

    for board in &draft.boards {
        let _ = writeln!(out, "\n[{}] {}", board.id, board.name);
        if board.column_count() == 0 {
            let _ = writeln!(out, "  (no semesters)");
        }
        for column in board.columns() {
            let _ = writeln!(out, "  [{}] {}", column.id, column.title);
            for placement in column
                .subject_ids
                .iter()
                .filter_map(|id| draft.placement(id))
            {
                let _ = write!(
                    out,
                    "    [{}] {} {} ({:.1} cr)",
                    placement.id, placement.subject_id, placement.name, placement.credits
                );
                if placement.has_prerequisite {
                    let _ = write!(out, " requires {}", placement.prerequisite_ids().join(", "));
                }
                out.push('\n');
            }
        }
    }
    out
}
