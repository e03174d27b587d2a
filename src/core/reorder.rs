//! Drag-and-drop reorder engine
//!
//! Converts a drag-end event into a new column or subject arrangement. Columns
//! move within their board's `column_order` (list id = board id); subjects move
//! within or between columns (list id = column id).

use crate::core::error::EditError;
use crate::core::models::{Column, Curriculum};
use serde::{Deserialize, Serialize};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    /// A semester column inside a board
    Column,
    /// A subject placement inside a column
    Subject,
}

/// A position in a droppable list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    /// Board id for column drags, column id for subject drags
    pub list_id: String,
    /// Index inside the list
    pub index: usize,
}

impl DragLocation {
    /// Create a location
    #[must_use]
    pub fn new(list_id: &str, index: usize) -> Self {
        Self {
            list_id: list_id.to_string(),
            index,
        }
    }
}

/// A completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    /// Where the item was picked up
    pub source: DragLocation,
    /// Where it was dropped; `None` when dropped outside any list
    pub destination: Option<DragLocation>,
    /// Column id or placement id being dragged
    pub dragged_id: String,
    /// Column or subject
    pub kind: DragKind,
}

/// What a drag changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped outside a list, back on its origin, or not movable there
    Unchanged,
    /// A column moved within its board
    ColumnMoved {
        /// Board id
        board_id: String,
        /// Old index
        from: usize,
        /// New index
        to: usize,
    },
    /// A placement moved within its column
    SubjectReordered {
        /// Column id
        column_id: String,
        /// Old index
        from: usize,
        /// New index
        to: usize,
    },
    /// A placement moved to another column and took its semester
    SubjectMoved {
        /// Source column id
        from_column: String,
        /// Destination column id
        to_column: String,
        /// Index in the destination column
        index: usize,
        /// Semester number now assigned to the placement
        semester_number: u32,
    },
}

/// Move the element at `from` to `to` (an array move, not a swap)
///
/// `to` is clamped to the list bounds, so an out-of-range destination appends.
///
/// # Returns
/// The index the element landed at, or `None` if `from` is out of range
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Option<usize> {
    if from >= items.len() {
        return None;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    Some(to)
}

/// Index of `id` in `list`, trusting `hint` when it already points at it
fn resolve_index(list: &[String], hint: usize, id: &str) -> Option<usize> {
    if list.get(hint).is_some_and(|item| item == id) {
        Some(hint)
    } else {
        list.iter().position(|item| item == id)
    }
}

fn find_column_mut<'a>(draft: &'a mut Curriculum, column_id: &str) -> Option<&'a mut Column> {
    draft
        .boards
        .iter_mut()
        .find_map(|board| board.column_mut(column_id))
}

/// Apply a drag result to the draft
///
/// # Errors
/// Not-found errors when a referenced board, column or placement is missing
pub fn apply_drag(draft: &mut Curriculum, drag: &DragResult) -> Result<DragOutcome, EditError> {
    let Some(destination) = drag.destination.as_ref() else {
        return Ok(DragOutcome::Unchanged);
    };
    if *destination == drag.source {
        return Ok(DragOutcome::Unchanged);
    }

    match drag.kind {
        DragKind::Column => move_column(draft, drag, destination),
        DragKind::Subject if destination.list_id == drag.source.list_id => {
            reorder_subject(draft, drag, destination)
        }
        DragKind::Subject => transfer_subject(draft, drag, destination),
    }
}

fn move_column(
    draft: &mut Curriculum,
    drag: &DragResult,
    destination: &DragLocation,
) -> Result<DragOutcome, EditError> {
    // columns never leave their board
    if destination.list_id != drag.source.list_id {
        return Ok(DragOutcome::Unchanged);
    }
    let board = draft
        .board_mut(&drag.source.list_id)
        .ok_or_else(|| EditError::BoardNotFound(drag.source.list_id.clone()))?;
    let from = resolve_index(&board.column_order, drag.source.index, &drag.dragged_id)
        .ok_or_else(|| EditError::ColumnNotFound(drag.dragged_id.clone()))?;
    let to = move_item(&mut board.column_order, from, destination.index)
        .ok_or_else(|| EditError::ColumnNotFound(drag.dragged_id.clone()))?;

    Ok(DragOutcome::ColumnMoved {
        board_id: board.id.clone(),
        from,
        to,
    })
}

fn reorder_subject(
    draft: &mut Curriculum,
    drag: &DragResult,
    destination: &DragLocation,
) -> Result<DragOutcome, EditError> {
    let column = find_column_mut(draft, &drag.source.list_id)
        .ok_or_else(|| EditError::ColumnNotFound(drag.source.list_id.clone()))?;
    let from = resolve_index(&column.subject_ids, drag.source.index, &drag.dragged_id)
        .ok_or_else(|| EditError::PlacementNotFound(drag.dragged_id.clone()))?;
    let to = move_item(&mut column.subject_ids, from, destination.index)
        .ok_or_else(|| EditError::PlacementNotFound(drag.dragged_id.clone()))?;

    Ok(DragOutcome::SubjectReordered {
        column_id: column.id.clone(),
        from,
        to,
    })
}

fn transfer_subject(
    draft: &mut Curriculum,
    drag: &DragResult,
    destination: &DragLocation,
) -> Result<DragOutcome, EditError> {
    if !draft.placements.contains_key(&drag.dragged_id) {
        return Err(EditError::PlacementNotFound(drag.dragged_id.clone()));
    }

    let target = draft
        .find_column(&destination.list_id)
        .map(|(_, column)| column.clone())
        .ok_or_else(|| EditError::ColumnNotFound(destination.list_id.clone()))?;
    if target.contains(&drag.dragged_id) {
        return Ok(DragOutcome::Unchanged);
    }

    let source = find_column_mut(draft, &drag.source.list_id)
        .ok_or_else(|| EditError::ColumnNotFound(drag.source.list_id.clone()))?;
    if source.remove_subject(&drag.dragged_id).is_none() {
        return Err(EditError::PlacementNotFound(drag.dragged_id.clone()));
    }

    let index = destination.index.min(target.len());
    if let Some(column) = find_column_mut(draft, &target.id) {
        column.insert_subject(index, drag.dragged_id.clone());
    }
    if let Some(placement) = draft.placements.get_mut(&drag.dragged_id) {
        placement.assign_to(&target);
    }

    Ok(DragOutcome::SubjectMoved {
        from_column: drag.source.list_id.clone(),
        to_column: target.id,
        index,
        semester_number: target.semester_number,
    })
}
