//! Prerequisite auto-insertion
//!
//! Attaching prerequisites to a placement guarantees every prerequisite is
//! placed somewhere in the curriculum. Missing ones are inserted one semester
//! before the placement, on the same board, creating a column if needed.

use crate::core::error::EditError;
use crate::core::ids::IdGenerator;
use crate::core::models::{
    Board, CatalogSubject, Column, ColumnId, Curriculum, Placement, PlacementId, SubjectRef,
};
use crate::core::options::{EditorConfig, TargetColumnPolicy};
use crate::{debug, warn};

/// What an attach changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachOutcome {
    /// The prerequisite list now stored on the placement
    pub prerequisites: Vec<SubjectRef>,
    /// Placements created for missing prerequisites
    pub created: Vec<PlacementId>,
    /// Column that received the created placements
    pub target_column: Option<ColumnId>,
    /// Whether `target_column` was created by this attach
    pub column_created: bool,
    /// Missing prerequisites were not inserted because the placement sits in no column
    pub auto_insert_skipped: bool,
}

/// Semester that receives auto-inserted prerequisites of a placement in `semester`
#[must_use]
pub const fn target_semester(semester: u32) -> u32 {
    if semester > 1 {
        semester - 1
    } else {
        1
    }
}

/// Overwrite the prerequisites of `placement_id` with `requested`, inserting the missing ones
///
/// # Errors
/// `PlacementNotFound` if the placement does not exist; `PrerequisiteCycle` if
/// `config.reject_cycles` is set and a requested subject already requires this one
pub fn attach(
    draft: &mut Curriculum,
    ids: &mut dyn IdGenerator,
    config: &EditorConfig,
    placement_id: &str,
    requested: &[CatalogSubject],
) -> Result<AttachOutcome, EditError> {
    let origin = draft
        .placement(placement_id)
        .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;
    let origin_subject = origin.subject_id.clone();
    let origin_name = origin.name.clone();
    let origin_semester = origin.semester_number;

    let mut wanted: Vec<&CatalogSubject> = Vec::with_capacity(requested.len());
    for subject in requested {
        if subject.id == origin_subject {
            debug!("'{origin_name}' cannot be its own prerequisite; dropped");
        } else if !wanted.iter().any(|w| w.id == subject.id) {
            wanted.push(subject);
        }
    }

    if config.reject_cycles {
        if let Some(cyclic) = wanted
            .iter()
            .find(|s| draft.requires_transitively(&s.id, &origin_subject))
        {
            return Err(EditError::PrerequisiteCycle {
                subject: origin_name,
                prerequisite: cyclic.name.clone(),
            });
        }
    }

    let missing: Vec<&CatalogSubject> = wanted
        .iter()
        .copied()
        .filter(|s| !draft.contains_subject(&s.id))
        .collect();

    let mut outcome = AttachOutcome {
        prerequisites: wanted.iter().map(|s| SubjectRef::from(*s)).collect(),
        ..AttachOutcome::default()
    };

    if !missing.is_empty() {
        if let Some(location) = draft.locate(placement_id) {
            let board = draft
                .board_mut(&location.board_id)
                .ok_or_else(|| EditError::BoardNotFound(location.board_id.clone()))?;
            let target = target_semester(origin_semester);
            let (column_id, column_created) =
                choose_target_column(board, target, config.target_policy, ids);
            let column = board
                .column_mut(&column_id)
                .ok_or_else(|| EditError::ColumnNotFound(column_id.clone()))?;

            let mut created = Vec::with_capacity(missing.len());
            for subject in &missing {
                let placement =
                    Placement::from_catalog(ids.placement_id(&subject.id), subject, column);
                column.push_subject(placement.id.clone());
                created.push(placement);
            }
            debug!(
                "auto-inserted {} prerequisite(s) of '{origin_name}' into '{}'",
                created.len(),
                column.title
            );

            outcome.created = created.iter().map(|p| p.id.clone()).collect();
            outcome.target_column = Some(column_id);
            outcome.column_created = column_created;
            draft
                .placements
                .extend(created.into_iter().map(|p| (p.id.clone(), p)));
        } else {
            warn!(
                "'{origin_name}' is not in any column; skipping auto-insert of {} prerequisite(s)",
                missing.len()
            );
            outcome.auto_insert_skipped = true;
        }
    }

    let origin = draft
        .placements
        .get_mut(placement_id)
        .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;
    origin.set_prerequisites(outcome.prerequisites.clone());

    Ok(outcome)
}

/// Pick (or create) the column for `target` semester
///
/// # Returns
/// The column id and whether it was created
fn choose_target_column(
    board: &mut Board,
    target: u32,
    policy: TargetColumnPolicy,
    ids: &mut dyn IdGenerator,
) -> (ColumnId, bool) {
    if let Some(column) = board.column_for_semester(target) {
        return (column.id.clone(), false);
    }
    let semester = match policy {
        TargetColumnPolicy::CreateTarget => target,
        TargetColumnPolicy::ClosestLower => {
            if let Some(column) = board.closest_lower_column(target) {
                return (column.id.clone(), false);
            }
            1
        }
    };
    let column = Column::new(
        ids.column_id(),
        board.column_title(semester),
        semester,
        board.board_type.tag().to_string(),
    );
    let id = column.id.clone();
    board.insert_column_sorted(column);
    (id, true)
}
