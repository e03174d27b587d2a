//! Editing command handlers: boards, semesters, columns, subjects and prerequisites
//!
//! Each handler loads the draft, applies one store operation and writes the draft
//! back only when the operation succeeds.

use super::draft::{commit, load_catalog, notice, open_store, resolve_draft_path};
use crate::args::{
    BoardSubcommand, ColumnSubcommand, PrereqSubcommand, SemesterSubcommand, SubjectSubcommand,
};
use nu_board::config::Config;
use nu_board::core::error::EditError;
use nu_board::core::reorder::{DragKind, DragLocation, DragOutcome, DragResult};
use nu_board::core::selection::{classify_candidates, CandidateStatus, SubjectSearch};
use nu_board::core::store::CurriculumStore;
use nu_board::{info, verbose};
use std::path::Path;

/// Handle `board` subcommands
///
/// # Errors
/// Returns a user-facing message when the draft cannot be loaded or the edit is rejected
pub fn run_board(draft_arg: &Path, subcommand: BoardSubcommand, config: &Config) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let mut store = open_store(&path, config)?;
    match subcommand {
        BoardSubcommand::Add { board_type } => {
            let id = store.add_board(board_type).map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("✓ Added board {id} ({})", board_type.label());
        }
    }
    Ok(())
}

/// Handle `semester` subcommands
///
/// # Errors
/// Returns a user-facing message when the draft cannot be loaded or the edit is rejected
pub fn run_semester(
    draft_arg: &Path,
    subcommand: SemesterSubcommand,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let mut store = open_store(&path, config)?;
    match subcommand {
        SemesterSubcommand::Add { board } => {
            let id = store.add_semester(&board).map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            let title = store
                .draft()
                .find_column(&id)
                .map(|(_, column)| column.title.clone())
                .unwrap_or_default();
            println!("✓ Added column {id} ({title})");
        }
    }
    Ok(())
}

/// Handle `column` subcommands
///
/// # Errors
/// Returns a user-facing message when the draft cannot be loaded or the edit is rejected
pub fn run_column(
    draft_arg: &Path,
    subcommand: ColumnSubcommand,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let mut store = open_store(&path, config)?;
    match subcommand {
        ColumnSubcommand::Remove { board, column } => {
            let discarded = store
                .remove_column(&board, &column)
                .map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!(
                "✓ Removed column {column} ({} placement(s) discarded)",
                discarded.len()
            );
            for placement in &discarded {
                verbose!("  - {} {}", placement.subject_id, placement.name);
            }
        }
        ColumnSubcommand::Rename {
            board,
            column,
            title,
        } => {
            store
                .rename_column(&board, &column, &title)
                .map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("✓ Renamed column {column} to '{}'", title.trim());
        }
        ColumnSubcommand::Move {
            board,
            column,
            index,
        } => {
            let drag = column_drag(&store, &board, &column, index).map_err(|e| notice(&e))?;
            let outcome = store.apply_drag(&drag).map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("{}", describe_outcome(&outcome));
        }
    }
    Ok(())
}

/// Handle `subject` subcommands
///
/// # Errors
/// Returns a user-facing message when the draft cannot be loaded or the edit is rejected
pub fn run_subject(
    draft_arg: &Path,
    subcommand: SubjectSubcommand,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let mut store = open_store(&path, config)?;
    match subcommand {
        SubjectSubcommand::Add {
            board,
            column,
            subjects,
        } => {
            let catalog = load_catalog(config)?;
            let selected = catalog.resolve(&subjects).map_err(|e| notice(&e))?;
            let ids = store
                .add_subject_placements(&board, &column, &selected)
                .map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("✓ Added {} subject(s) to column {column}", ids.len());
            for id in &ids {
                verbose!("  + {id}");
            }
        }
        SubjectSubcommand::Remove {
            board,
            column,
            placement,
        } => {
            let removed = store
                .remove_subject_placement(&board, &column, &placement)
                .map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("✓ Removed {} {}", removed.subject_id, removed.name);
        }
        SubjectSubcommand::Move {
            placement,
            to_column,
            index,
        } => {
            let drag = subject_drag(&store, &placement, &to_column, index).map_err(|e| notice(&e))?;
            let outcome = store.apply_drag(&drag).map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("{}", describe_outcome(&outcome));
        }
    }
    Ok(())
}

/// Handle `prereq` subcommands
///
/// # Errors
/// Returns a user-facing message when the draft cannot be loaded or the edit is rejected
pub fn run_prereq(
    draft_arg: &Path,
    subcommand: PrereqSubcommand,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let mut store = open_store(&path, config)?;
    match subcommand {
        PrereqSubcommand::Set {
            placement,
            subjects,
        } => {
            let catalog = load_catalog(config)?;
            let requested = catalog.resolve(&subjects).map_err(|e| notice(&e))?;
            for candidate in classify_candidates(store.draft(), &requested) {
                let status = match candidate.status {
                    CandidateStatus::AlreadyInCurriculum => "already in curriculum",
                    CandidateStatus::WillBeAutoAdded => "will be auto-added",
                };
                verbose!("  {} {} ({status})", candidate.subject.id, candidate.subject.name);
            }

            let outcome = store
                .attach_prerequisites(&placement, &requested)
                .map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;

            let names: Vec<&str> = outcome.prerequisites.iter().map(|p| p.id.as_str()).collect();
            println!("✓ {placement} now requires: {}", names.join(", "));
            if let Some(column) = &outcome.target_column {
                if !outcome.created.is_empty() {
                    let created = if outcome.column_created {
                        " (new column)"
                    } else {
                        ""
                    };
                    println!(
                        "✓ Auto-added {} prerequisite(s) to column {column}{created}",
                        outcome.created.len()
                    );
                }
            }
            if outcome.auto_insert_skipped {
                println!("✗ {placement} is not on any board; missing prerequisites were not placed");
            }
            info!("Prerequisites updated for {placement}");
        }
        PrereqSubcommand::Clear { placement } => {
            store
                .clear_prerequisites(&placement)
                .map_err(|e| notice(&e))?;
            commit(&path, store.draft())?;
            println!("✓ Cleared prerequisites of {placement}");
        }
    }
    Ok(())
}

/// Build the drag result for moving a column to `index` within its board
fn column_drag(
    store: &CurriculumStore,
    board_id: &str,
    column_id: &str,
    index: usize,
) -> Result<DragResult, EditError> {
    let board = store
        .draft()
        .board(board_id)
        .ok_or_else(|| EditError::BoardNotFound(board_id.to_string()))?;
    let from = board
        .column_order
        .iter()
        .position(|id| id == column_id)
        .ok_or_else(|| EditError::ColumnNotFound(column_id.to_string()))?;
    Ok(DragResult {
        source: DragLocation::new(board_id, from),
        destination: Some(DragLocation::new(board_id, index)),
        dragged_id: column_id.to_string(),
        kind: DragKind::Column,
    })
}

/// Build the drag result for moving a placement into `to_column`
///
/// Without an index the placement goes to the end of the destination column.
fn subject_drag(
    store: &CurriculumStore,
    placement_id: &str,
    to_column: &str,
    index: Option<usize>,
) -> Result<DragResult, EditError> {
    let draft = store.draft();
    let location = draft
        .locate(placement_id)
        .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;
    let (_, source_column) = draft
        .find_column(&location.column_id)
        .ok_or_else(|| EditError::ColumnNotFound(location.column_id.clone()))?;
    let from = source_column
        .subject_ids
        .iter()
        .position(|id| id == placement_id)
        .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;
    let (_, destination) = draft
        .find_column(to_column)
        .ok_or_else(|| EditError::ColumnNotFound(to_column.to_string()))?;

    Ok(DragResult {
        source: DragLocation::new(&location.column_id, from),
        destination: Some(DragLocation::new(
            to_column,
            index.unwrap_or(destination.len()),
        )),
        dragged_id: placement_id.to_string(),
        kind: DragKind::Subject,
    })
}

/// One-line notice for a drag outcome
#[must_use]
pub fn describe_outcome(outcome: &DragOutcome) -> String {
    match outcome {
        DragOutcome::Unchanged => "✓ Nothing to move".to_string(),
        DragOutcome::ColumnMoved { board_id, from, to } => {
            format!("✓ Moved column in {board_id} from position {from} to {to}")
        }
        DragOutcome::SubjectReordered {
            column_id,
            from,
            to,
        } => format!("✓ Reordered {column_id}: position {from} to {to}"),
        DragOutcome::SubjectMoved {
            from_column,
            to_column,
            index,
            semester_number,
        } => format!(
            "✓ Moved subject from {from_column} to {to_column} at position {index} (semester {semester_number})"
        ),
    }
}
