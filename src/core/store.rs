//! Curriculum store: the single owner of a draft and its state transitions
//!
//! Every operation runs against a working copy of the draft and is committed
//! only when it succeeds, so a rejected edit leaves the store unchanged.

use crate::core::error::EditError;
use crate::core::ids::{highest_sequential_token, IdGenerator, IdStrategy};
use crate::core::models::{
    Board, BoardId, BoardType, CatalogSubject, Column, ColumnId, Curriculum, CurriculumInfo,
    Placement, PlacementId,
};
use crate::core::options::EditorConfig;
use crate::core::prerequisites::{self, AttachOutcome};
use crate::core::reorder::{self, DragOutcome, DragResult};
use crate::{debug, warn};
use std::fmt;

/// Owns a curriculum draft for the duration of an editing session
pub struct CurriculumStore {
    draft: Curriculum,
    ids: Box<dyn IdGenerator>,
    config: EditorConfig,
}

impl fmt::Debug for CurriculumStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurriculumStore")
            .field("draft", &self.draft)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CurriculumStore {
    /// Start a new, empty draft
    #[must_use]
    pub fn new(info: CurriculumInfo, config: EditorConfig) -> Self {
        Self::open(Curriculum::new(info), config)
    }

    /// Reopen an existing draft, resuming sequential ids after the highest one in use
    #[must_use]
    pub fn open(draft: Curriculum, config: EditorConfig) -> Self {
        let resume_after = match config.id_strategy {
            IdStrategy::Sequential => highest_sequential_token(all_ids(&draft)),
            IdStrategy::Uuid => 0,
        };
        let ids = config.id_strategy.generator(resume_after);
        Self::with_generator(draft, ids, config)
    }

    /// Open a draft with an explicit id generator
    #[must_use]
    pub fn with_generator(
        draft: Curriculum,
        ids: Box<dyn IdGenerator>,
        config: EditorConfig,
    ) -> Self {
        Self { draft, ids, config }
    }

    /// Read-only view of the current draft
    #[must_use]
    pub const fn draft(&self) -> &Curriculum {
        &self.draft
    }

    /// Consume the store, returning the draft
    #[must_use]
    pub fn into_draft(self) -> Curriculum {
        self.draft
    }

    /// Active editing policies
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get a placement record by id
    #[must_use]
    pub fn placement(&self, placement_id: &str) -> Option<&Placement> {
        self.draft.placement(placement_id)
    }

    /// Run `apply` on a working copy and commit it on success
    fn transition<T, F>(&mut self, label: &str, apply: F) -> Result<T, EditError>
    where
        F: FnOnce(&mut Curriculum, &mut dyn IdGenerator, &EditorConfig) -> Result<T, EditError>,
    {
        let mut working = self.draft.clone();
        match apply(&mut working, self.ids.as_mut(), &self.config) {
            Ok(value) => {
                self.draft = working;
                debug!("{label}: committed");
                Ok(value)
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!("{label}: {err}; draft left unchanged");
                } else {
                    debug!("{label}: rejected: {err}");
                }
                Err(err)
            }
        }
    }

    /// Replace the curriculum header
    pub fn set_curriculum_info(&mut self, info: CurriculumInfo) {
        debug!("set_curriculum_info: '{}'", info.name);
        self.draft.info = info;
    }

    /// Add an empty board for `board_type`
    ///
    /// # Errors
    /// `BoardExists` if the draft already has a board of this type
    pub fn add_board(&mut self, board_type: BoardType) -> Result<BoardId, EditError> {
        self.transition("add_board", |draft, ids, _| {
            if draft.board_by_type(board_type).is_some() {
                return Err(EditError::BoardExists(board_type.to_string()));
            }
            let board = Board::new(ids.board_id(), board_type, draft.info.id.clone());
            let id = board.id.clone();
            draft.boards.push(board);
            Ok(id)
        })
    }

    /// Append a semester column numbered `column_count + 1`
    ///
    /// # Errors
    /// `BoardNotFound` if the board does not exist
    pub fn add_semester(&mut self, board_id: &str) -> Result<ColumnId, EditError> {
        self.transition("add_semester", |draft, ids, _| {
            let board = board_mut(draft, board_id)?;
            let semester = u32::try_from(board.column_count() + 1).unwrap_or(u32::MAX);
            let column = Column::new(
                ids.column_id(),
                board.column_title(semester),
                semester,
                board.board_type.tag().to_string(),
            );
            let id = column.id.clone();
            board.push_column(column);
            Ok(id)
        })
    }

    /// Delete a column and discard the placements inside it
    ///
    /// With `guard_column_removal` enabled the removal is refused when a
    /// placement inside is a prerequisite of a placement outside the column.
    ///
    /// # Returns
    /// The discarded placement records
    ///
    /// # Errors
    /// `BoardNotFound`/`ColumnNotFound`, or `PrerequisiteConflict` under the guard
    pub fn remove_column(
        &mut self,
        board_id: &str,
        column_id: &str,
    ) -> Result<Vec<Placement>, EditError> {
        self.transition("remove_column", |draft, _, config| {
            let column = board_mut(draft, board_id)?
                .remove_column(column_id)
                .ok_or_else(|| EditError::ColumnNotFound(column_id.to_string()))?;

            let discarded: Vec<Placement> = column
                .subject_ids
                .iter()
                .filter_map(|id| draft.placements.remove(id))
                .collect();

            if config.guard_column_removal {
                for placement in &discarded {
                    let dependents: Vec<String> = draft
                        .dependents_of(&placement.subject_id, &placement.id)
                        .into_iter()
                        .map(|p| p.name.clone())
                        .collect();
                    if !dependents.is_empty() {
                        return Err(EditError::PrerequisiteConflict {
                            subject: placement.name.clone(),
                            dependents,
                        });
                    }
                }
            }
            Ok(discarded)
        })
    }

    /// Remove a placement from its column and delete its record
    ///
    /// # Returns
    /// The removed placement
    ///
    /// # Errors
    /// `PrerequisiteConflict` naming the dependent subjects if another placement
    /// lists this placement's subject as a prerequisite; not-found errors otherwise
    pub fn remove_subject_placement(
        &mut self,
        board_id: &str,
        column_id: &str,
        placement_id: &str,
    ) -> Result<Placement, EditError> {
        self.transition("remove_subject_placement", |draft, _, _| {
            let (subject_id, name) = draft
                .placement(placement_id)
                .map(|p| (p.subject_id.clone(), p.name.clone()))
                .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;

            let dependents: Vec<String> = draft
                .dependents_of(&subject_id, placement_id)
                .into_iter()
                .map(|p| p.name.clone())
                .collect();
            if !dependents.is_empty() {
                return Err(EditError::PrerequisiteConflict {
                    subject: name,
                    dependents,
                });
            }

            column_mut(draft, board_id, column_id)?
                .remove_subject(placement_id)
                .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;

            draft
                .placements
                .remove(placement_id)
                .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))
        })
    }

    /// Place each catalog subject at the end of a column
    ///
    /// Every subject gets a fresh placement id, so adding the same subject twice
    /// yields two placements.
    ///
    /// # Returns
    /// The new placement ids, in input order
    ///
    /// # Errors
    /// `BoardNotFound`/`ColumnNotFound`
    pub fn add_subject_placements(
        &mut self,
        board_id: &str,
        column_id: &str,
        subjects: &[CatalogSubject],
    ) -> Result<Vec<PlacementId>, EditError> {
        self.transition("add_subject_placements", |draft, ids, _| {
            let column = column_mut(draft, board_id, column_id)?;
            let mut created = Vec::with_capacity(subjects.len());
            for subject in subjects {
                let placement = Placement::from_catalog(ids.placement_id(&subject.id), subject, column);
                column.push_subject(placement.id.clone());
                created.push(placement);
            }
            let new_ids: Vec<PlacementId> = created.iter().map(|p| p.id.clone()).collect();
            draft
                .placements
                .extend(created.into_iter().map(|p| (p.id.clone(), p)));
            Ok(new_ids)
        })
    }

    /// Rename a column; placements in it pick up the new semester label
    ///
    /// # Errors
    /// `EmptyTitle` if `title` is blank; not-found errors otherwise
    pub fn rename_column(
        &mut self,
        board_id: &str,
        column_id: &str,
        title: &str,
    ) -> Result<(), EditError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EditError::EmptyTitle);
        }
        self.transition("rename_column", |draft, _, _| {
            let column = column_mut(draft, board_id, column_id)?;
            column.title = title.to_string();
            let column = column.clone();
            for placement_id in &column.subject_ids {
                if let Some(placement) = draft.placements.get_mut(placement_id) {
                    placement.assign_to(&column);
                }
            }
            Ok(())
        })
    }

    /// Apply a drag-and-drop result
    ///
    /// # Errors
    /// Not-found errors when the drag references unknown lists or items
    pub fn apply_drag(&mut self, drag: &DragResult) -> Result<DragOutcome, EditError> {
        self.transition("apply_drag", |draft, _, _| reorder::apply_drag(draft, drag))
    }

    /// Set the prerequisites of a placement, auto-inserting missing ones
    ///
    /// # Errors
    /// `PlacementNotFound`, or `PrerequisiteCycle` when cycles are rejected
    pub fn attach_prerequisites(
        &mut self,
        placement_id: &str,
        requested: &[CatalogSubject],
    ) -> Result<AttachOutcome, EditError> {
        self.transition("attach_prerequisites", |draft, ids, config| {
            prerequisites::attach(draft, ids, config, placement_id, requested)
        })
    }

    /// Remove every prerequisite from a placement
    ///
    /// # Errors
    /// `PlacementNotFound`
    pub fn clear_prerequisites(&mut self, placement_id: &str) -> Result<(), EditError> {
        self.transition("clear_prerequisites", |draft, _, _| {
            let placement = draft
                .placements
                .get_mut(placement_id)
                .ok_or_else(|| EditError::PlacementNotFound(placement_id.to_string()))?;
            placement.set_prerequisites(Vec::new());
            Ok(())
        })
    }
}

fn board_mut<'a>(draft: &'a mut Curriculum, board_id: &str) -> Result<&'a mut Board, EditError> {
    draft
        .board_mut(board_id)
        .ok_or_else(|| EditError::BoardNotFound(board_id.to_string()))
}

fn column_mut<'a>(
    draft: &'a mut Curriculum,
    board_id: &str,
    column_id: &str,
) -> Result<&'a mut Column, EditError> {
    board_mut(draft, board_id)?
        .column_mut(column_id)
        .ok_or_else(|| EditError::ColumnNotFound(column_id.to_string()))
}

fn all_ids(draft: &Curriculum) -> impl Iterator<Item = &str> {
    let boards = draft.boards.iter().map(|board| board.id.as_str());
    let columns = draft
        .boards
        .iter()
        .flat_map(|board| board.column_order.iter().map(String::as_str));
    boards
        .chain(columns)
        .chain(draft.placements.keys().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;

    fn store() -> CurriculumStore {
        CurriculumStore::with_generator(
            Curriculum::new(CurriculumInfo::new("cur-1", "BS CS")),
            Box::new(SequentialIds::new()),
            EditorConfig::default(),
        )
    }

    fn subject(id: &str) -> CatalogSubject {
        CatalogSubject::new(id, &format!("Subject {id}"), 3.0)
    }

    #[test]
    fn test_add_board_once_per_type() {
        let mut store = store();
        let id = store.add_board(BoardType::Core).unwrap();
        assert_eq!(id, "board-1");
        assert_eq!(
            store.add_board(BoardType::Core),
            Err(EditError::BoardExists("core".to_string()))
        );
        assert!(store.add_board(BoardType::Pe).is_ok());
        assert_eq!(store.draft().boards.len(), 2);
    }

    #[test]
    fn test_add_semester_numbers_and_titles() {
        let mut store = store();
        let board = store.add_board(BoardType::English).unwrap();
        store.add_semester(&board).unwrap();
        let second = store.add_semester(&board).unwrap();

        let column = store.draft().board(&board).unwrap().column(&second).unwrap();
        assert_eq!(column.semester_number, 2);
        assert_eq!(column.title, "English - Semester 2");
        assert_eq!(column.curriculum_type_id, "english");
    }

    #[test]
    fn test_add_semester_unknown_board_is_noop() {
        let mut store = store();
        let before = store.draft().clone();
        assert_eq!(
            store.add_semester("missing"),
            Err(EditError::BoardNotFound("missing".to_string()))
        );
        assert_eq!(store.draft(), &before);
    }

    #[test]
    fn test_add_subject_placements_counts() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let column = store.add_semester(&board).unwrap();

        let ids = store
            .add_subject_placements(&board, &column, &[subject("A"), subject("B"), subject("A")])
            .unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(store.draft().placement_count(), 3);
        let col = store.draft().board(&board).unwrap().column(&column).unwrap();
        assert_eq!(col.subject_ids, ids);
        assert!(ids.iter().all(|id| store.placement(id).unwrap().semester_number == 1));
    }

    #[test]
    fn test_remove_placement_blocked_by_dependent() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let column = store.add_semester(&board).unwrap();
        let ids = store
            .add_subject_placements(&board, &column, &[subject("A"), subject("B")])
            .unwrap();
        store.attach_prerequisites(&ids[1], &[subject("A")]).unwrap();
        let before = store.draft().clone();

        let err = store
            .remove_subject_placement(&board, &column, &ids[0])
            .unwrap_err();

        assert_eq!(
            err,
            EditError::PrerequisiteConflict {
                subject: "Subject A".to_string(),
                dependents: vec!["Subject B".to_string()],
            }
        );
        assert_eq!(store.draft(), &before);
    }

    #[test]
    fn test_remove_placement() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let column = store.add_semester(&board).unwrap();
        let ids = store
            .add_subject_placements(&board, &column, &[subject("A")])
            .unwrap();

        let removed = store
            .remove_subject_placement(&board, &column, &ids[0])
            .unwrap();
        assert_eq!(removed.subject_id, "A");
        assert_eq!(store.draft().placement_count(), 0);
        assert!(store.draft().board(&board).unwrap().column(&column).unwrap().is_empty());
    }

    #[test]
    fn test_remove_placement_wrong_column() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let first = store.add_semester(&board).unwrap();
        let second = store.add_semester(&board).unwrap();
        let ids = store
            .add_subject_placements(&board, &first, &[subject("A")])
            .unwrap();

        assert!(matches!(
            store.remove_subject_placement(&board, &second, &ids[0]),
            Err(EditError::PlacementNotFound(_))
        ));
        assert_eq!(store.draft().placement_count(), 1);
    }

    #[test]
    fn test_remove_column_discards_placements() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let column = store.add_semester(&board).unwrap();
        store
            .add_subject_placements(&board, &column, &[subject("A"), subject("B")])
            .unwrap();

        let discarded = store.remove_column(&board, &column).unwrap();
        assert_eq!(discarded.len(), 2);
        assert_eq!(store.draft().placement_count(), 0);
        assert!(store.draft().board(&board).unwrap().is_consistent());
        assert_eq!(store.draft().board(&board).unwrap().column_count(), 0);
    }

    #[test]
    fn test_remove_column_guarded() {
        let mut store = CurriculumStore::with_generator(
            Curriculum::new(CurriculumInfo::new("cur-1", "BS CS")),
            Box::new(SequentialIds::new()),
            EditorConfig {
                guard_column_removal: true,
                ..EditorConfig::default()
            },
        );
        let board = store.add_board(BoardType::Core).unwrap();
        let first = store.add_semester(&board).unwrap();
        let second = store.add_semester(&board).unwrap();
        store
            .add_subject_placements(&board, &first, &[subject("A")])
            .unwrap();
        let later = store
            .add_subject_placements(&board, &second, &[subject("B")])
            .unwrap();
        store.attach_prerequisites(&later[0], &[subject("A")]).unwrap();

        assert!(matches!(
            store.remove_column(&board, &first),
            Err(EditError::PrerequisiteConflict { .. })
        ));
        assert_eq!(store.draft().board(&board).unwrap().column_count(), 2);

        // dependents inside the removed column do not block it
        assert!(store.remove_column(&board, &second).is_ok());
    }

    #[test]
    fn test_rename_column() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let column = store.add_semester(&board).unwrap();
        let ids = store
            .add_subject_placements(&board, &column, &[subject("A")])
            .unwrap();

        assert_eq!(
            store.rename_column(&board, &column, "   "),
            Err(EditError::EmptyTitle)
        );
        store.rename_column(&board, &column, "  Fall Year 1 ").unwrap();

        let col = store.draft().board(&board).unwrap().column(&column).unwrap();
        assert_eq!(col.title, "Fall Year 1");
        assert_eq!(store.placement(&ids[0]).unwrap().semester_label, "Fall Year 1");
    }

    #[test]
    fn test_clear_prerequisites() {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let column = store.add_semester(&board).unwrap();
        let ids = store
            .add_subject_placements(&board, &column, &[subject("A"), subject("B")])
            .unwrap();
        store.attach_prerequisites(&ids[1], &[subject("A")]).unwrap();

        store.clear_prerequisites(&ids[1]).unwrap();
        let placement = store.placement(&ids[1]).unwrap();
        assert!(placement.prerequisite_subjects.is_empty());
        assert!(!placement.has_prerequisite);
        assert!(store.remove_subject_placement(&board, &column, &ids[0]).is_ok());
    }

    #[test]
    fn test_open_resumes_sequential_ids() {
        let mut draft = Curriculum::new(CurriculumInfo::new("cur-1", "BS CS"));
        draft
            .boards
            .push(Board::new("board-9".to_string(), BoardType::Core, "cur-1".to_string()));
        let config = EditorConfig {
            id_strategy: IdStrategy::Sequential,
            ..EditorConfig::default()
        };
        let mut store = CurriculumStore::open(draft, config);
        assert_eq!(store.add_semester("board-9").unwrap(), "column-10");
    }

    #[test]
    fn test_set_curriculum_info() {
        let mut store = store();
        let mut info = CurriculumInfo::new("cur-1", "BS Data Science");
        info.total_credits = 120.0;
        store.set_curriculum_info(info.clone());
        assert_eq!(store.draft().info, info);
    }
}
