//! Integration tests for board editing through the public store API

use nu_board::core::ids::SequentialIds;
use nu_board::core::options::{EditorConfig, TargetColumnPolicy};
use nu_board::core::reorder::{DragKind, DragLocation, DragOutcome, DragResult};
use nu_board::{
    BoardType, CatalogSubject, Curriculum, CurriculumInfo, CurriculumStore, EditError, ErrorKind,
};
use std::collections::HashSet;

fn store_with(config: EditorConfig) -> CurriculumStore {
    CurriculumStore::with_generator(
        Curriculum::new(CurriculumInfo::new("bscs", "BS Computer Science")),
        Box::new(SequentialIds::new()),
        config,
    )
}

fn store() -> CurriculumStore {
    store_with(EditorConfig::default())
}

fn subject(id: &str, credits: f32) -> CatalogSubject {
    CatalogSubject::new(id, &format!("Subject {id}"), credits)
}

fn column_ids(store: &CurriculumStore, board: &str) -> Vec<String> {
    store.draft().board(board).unwrap().column_order.clone()
}

fn subjects_in(store: &CurriculumStore, column: &str) -> Vec<String> {
    let (_, column) = store.draft().find_column(column).unwrap();
    column.subject_ids.clone()
}

fn column_drag(board: &str, column: &str, from: usize, to: usize) -> DragResult {
    DragResult {
        source: DragLocation::new(board, from),
        destination: Some(DragLocation::new(board, to)),
        dragged_id: column.to_string(),
        kind: DragKind::Column,
    }
}

#[test]
fn column_move_and_back_restores_order() {
    let mut store = store();
    let board = store.add_board(BoardType::Core).unwrap();
    for _ in 0..5 {
        store.add_semester(&board).unwrap();
    }
    let original = column_ids(&store, &board);

    for (i, j) in [(0, 4), (3, 1), (2, 2), (4, 0)] {
        let moved = original[i].clone();
        store.apply_drag(&column_drag(&board, &moved, i, j)).unwrap();
        store.apply_drag(&column_drag(&board, &moved, j, i)).unwrap();
        assert_eq!(column_ids(&store, &board), original, "i={i} j={j}");
    }
}

#[test]
fn removing_referenced_prerequisite_conflicts_and_leaves_store_unchanged() {
    let mut store = store();
    let board = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&board).unwrap();
    let s2 = store.add_semester(&board).unwrap();
    let calc = store
        .add_subject_placements(&board, &s1, &[subject("MATH156", 4.0)])
        .unwrap();
    let ds = store
        .add_subject_placements(&board, &s2, &[subject("CS165", 4.0), subject("CS220", 4.0)])
        .unwrap();
    store
        .attach_prerequisites(&ds[0], &[subject("MATH156", 4.0)])
        .unwrap();
    store
        .attach_prerequisites(&ds[1], &[subject("MATH156", 4.0)])
        .unwrap();
    let before = store.draft().clone();

    let err = store
        .remove_subject_placement(&board, &s1, &calc[0])
        .unwrap_err();

    match &err {
        EditError::PrerequisiteConflict { subject, dependents } => {
            assert_eq!(subject, "Subject MATH156");
            assert_eq!(dependents, &vec!["Subject CS165".to_string(), "Subject CS220".to_string()]);
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(store.draft(), &before);
}

#[test]
fn adding_n_subjects_grows_column_and_map_by_n() {
    let mut store = store();
    let board = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&board).unwrap();
    store
        .add_subject_placements(&board, &s1, &[subject("X", 1.0)])
        .unwrap();

    let before_column = subjects_in(&store, &s1).len();
    let before_map = store.draft().placement_count();

    let batch = [subject("A", 3.0), subject("B", 3.0), subject("A", 3.0), subject("C", 2.0)];
    let ids = store.add_subject_placements(&board, &s1, &batch).unwrap();

    assert_eq!(subjects_in(&store, &s1).len(), before_column + batch.len());
    assert_eq!(store.draft().placement_count(), before_map + batch.len());
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), batch.len());
    assert!(!ids.iter().any(|id| store.draft().placement(id).is_none()));
}

#[test]
fn one_missing_prerequisite_creates_one_placement_in_previous_semester() {
    for (origin_semester, expected) in [(1, 1), (2, 1), (4, 3)] {
        let mut store = store();
        let board = store.add_board(BoardType::Core).unwrap();
        let mut columns = Vec::new();
        for _ in 0..origin_semester {
            columns.push(store.add_semester(&board).unwrap());
        }
        let origin_column = columns.last().unwrap().clone();
        store
            .add_subject_placements(&board, &columns[0], &[subject("PRESENT", 3.0)])
            .unwrap();
        let origin = store
            .add_subject_placements(&board, &origin_column, &[subject("ORIGIN", 3.0)])
            .unwrap()
            .remove(0);
        let before = store.draft().placement_count();

        let outcome = store
            .attach_prerequisites(&origin, &[subject("PRESENT", 3.0), subject("MISSING", 3.0)])
            .unwrap();

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(store.draft().placement_count(), before + 1);
        let created = store.placement(&outcome.created[0]).unwrap();
        assert_eq!(created.subject_id, "MISSING");
        assert_eq!(created.semester_number, expected);
        let (_, column) = store
            .draft()
            .find_column(outcome.target_column.as_ref().unwrap())
            .unwrap();
        assert_eq!(column.semester_number, expected);
        assert!(column.contains(&outcome.created[0]));
    }
}

#[test]
fn all_present_prerequisites_only_touch_origin() {
    let mut store = store();
    let board = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&board).unwrap();
    let s3 = {
        store.add_semester(&board).unwrap();
        store.add_semester(&board).unwrap()
    };
    store
        .add_subject_placements(&board, &s1, &[subject("A", 3.0), subject("B", 3.0)])
        .unwrap();
    let origin = store
        .add_subject_placements(&board, &s3, &[subject("C", 3.0)])
        .unwrap()
        .remove(0);
    let before = store.draft().clone();

    let outcome = store
        .attach_prerequisites(&origin, &[subject("A", 3.0), subject("B", 3.0)])
        .unwrap();

    assert!(outcome.created.is_empty());
    assert!(!outcome.column_created);
    let after = store.draft();
    assert_eq!(after.boards, before.boards);
    assert_eq!(after.placement_count(), before.placement_count());
    for (id, placement) in &after.placements {
        if id == &origin {
            assert!(placement.has_prerequisite);
            assert_eq!(placement.prerequisite_ids(), vec!["A", "B"]);
        } else {
            assert_eq!(Some(placement), before.placement(id));
        }
    }
}

#[test]
fn scenario_missing_prerequisite_lands_in_empty_first_semester() {
    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&core).unwrap();
    let s2 = store.add_semester(&core).unwrap();
    let a = store
        .add_subject_placements(&core, &s2, &[subject("A", 3.0)])
        .unwrap()
        .remove(0);
    assert_eq!(store.placement(&a).unwrap().semester_number, 2);

    let outcome = store.attach_prerequisites(&a, &[subject("B", 3.0)]).unwrap();

    assert_eq!(outcome.target_column.as_deref(), Some(s1.as_str()));
    assert!(!outcome.column_created);
    let s1_subjects = subjects_in(&store, &s1);
    assert_eq!(s1_subjects.len(), 1);
    let b = store.placement(&s1_subjects[0]).unwrap();
    assert_eq!(b.subject_id, "B");
    assert_eq!(b.semester_number, 1);
    assert_eq!(store.placement(&a).unwrap().prerequisite_ids(), vec!["B"]);
}

#[test]
fn scenario_drag_into_empty_column_updates_semester() {
    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&core).unwrap();
    let s2 = store.add_semester(&core).unwrap();
    let p = store
        .add_subject_placements(&core, &s1, &[subject("P", 3.0)])
        .unwrap()
        .remove(0);

    let outcome = store
        .apply_drag(&DragResult {
            source: DragLocation::new(&s1, 0),
            destination: Some(DragLocation::new(&s2, 0)),
            dragged_id: p.clone(),
            kind: DragKind::Subject,
        })
        .unwrap();

    assert_eq!(
        outcome,
        DragOutcome::SubjectMoved {
            from_column: s1.clone(),
            to_column: s2.clone(),
            index: 0,
            semester_number: 2,
        }
    );
    assert!(subjects_in(&store, &s1).is_empty());
    assert_eq!(subjects_in(&store, &s2), vec![p.clone()]);
    assert_eq!(store.placement(&p).unwrap().semester_number, 2);
}

#[test]
fn drop_outside_any_list_is_a_no_op() {
    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&core).unwrap();
    let p = store
        .add_subject_placements(&core, &s1, &[subject("P", 3.0)])
        .unwrap()
        .remove(0);
    let before = store.draft().clone();

    let outcome = store
        .apply_drag(&DragResult {
            source: DragLocation::new(&s1, 0),
            destination: None,
            dragged_id: p,
            kind: DragKind::Subject,
        })
        .unwrap();

    assert_eq!(outcome, DragOutcome::Unchanged);
    assert_eq!(store.draft(), &before);
}

#[test]
fn closest_lower_policy_reuses_lower_column() {
    let mut store = store_with(EditorConfig {
        target_policy: TargetColumnPolicy::ClosestLower,
        ..EditorConfig::default()
    });
    let core = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&core).unwrap();
    let s2 = store.add_semester(&core).unwrap();
    let s3 = store.add_semester(&core).unwrap();
    // Drop the semester-2 column so the target (2) has no column
    store.remove_column(&core, &s2).unwrap();
    let origin = store
        .add_subject_placements(&core, &s3, &[subject("C", 3.0)])
        .unwrap()
        .remove(0);

    let outcome = store
        .attach_prerequisites(&origin, &[subject("B", 3.0)])
        .unwrap();

    assert_eq!(outcome.target_column.as_deref(), Some(s1.as_str()));
    assert!(!outcome.column_created);
    assert_eq!(column_ids(&store, &core).len(), 2);
}

#[test]
fn create_target_policy_inserts_column_in_semester_order() {
    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&core).unwrap();
    let s2 = store.add_semester(&core).unwrap();
    let s3 = store.add_semester(&core).unwrap();
    store.remove_column(&core, &s2).unwrap();
    let origin = store
        .add_subject_placements(&core, &s3, &[subject("C", 3.0)])
        .unwrap()
        .remove(0);

    let outcome = store
        .attach_prerequisites(&origin, &[subject("B", 3.0)])
        .unwrap();

    assert!(outcome.column_created);
    let created = outcome.target_column.unwrap();
    assert_eq!(column_ids(&store, &core), vec![s1, created.clone(), s3]);
    let (_, column) = store.draft().find_column(&created).unwrap();
    assert_eq!(column.semester_number, 2);
    assert_eq!(column.title, "Core - Semester 2");
}

#[test]
fn cycles_are_rejected_by_default_and_allowed_when_disabled() {
    for reject_cycles in [true, false] {
        let mut store = store_with(EditorConfig {
            reject_cycles,
            ..EditorConfig::default()
        });
        let core = store.add_board(BoardType::Core).unwrap();
        let s1 = store.add_semester(&core).unwrap();
        let s2 = store.add_semester(&core).unwrap();
        let a = store
            .add_subject_placements(&core, &s1, &[subject("A", 3.0)])
            .unwrap()
            .remove(0);
        let b = store
            .add_subject_placements(&core, &s2, &[subject("B", 3.0)])
            .unwrap()
            .remove(0);
        store.attach_prerequisites(&b, &[subject("A", 3.0)]).unwrap();

        let result = store.attach_prerequisites(&a, &[subject("B", 3.0)]);
        if reject_cycles {
            assert!(matches!(result, Err(EditError::PrerequisiteCycle { .. })));
            assert!(!store.placement(&a).unwrap().has_prerequisite);
        } else {
            assert!(result.is_ok());
            assert_eq!(store.placement(&a).unwrap().prerequisite_ids(), vec!["B"]);
        }
    }
}

#[test]
fn column_removal_guard_is_opt_in() {
    for guard_column_removal in [false, true] {
        let mut store = store_with(EditorConfig {
            guard_column_removal,
            ..EditorConfig::default()
        });
        let core = store.add_board(BoardType::Core).unwrap();
        let s1 = store.add_semester(&core).unwrap();
        let s2 = store.add_semester(&core).unwrap();
        let b = store
            .add_subject_placements(&core, &s2, &[subject("B", 3.0)])
            .unwrap()
            .remove(0);
        store.attach_prerequisites(&b, &[subject("A", 3.0)]).unwrap();

        let result = store.remove_column(&core, &s1);
        if guard_column_removal {
            assert!(matches!(result, Err(EditError::PrerequisiteConflict { .. })));
            assert_eq!(column_ids(&store, &core).len(), 2);
        } else {
            assert_eq!(result.unwrap().len(), 1);
            assert_eq!(column_ids(&store, &core), vec![s2.clone()]);
            // The dependent keeps its now-orphaned prerequisite reference
            assert!(store.placement(&b).unwrap().has_prerequisite);
        }
    }
}

#[test]
fn duplicate_board_type_and_unknown_ids_are_rejected() {
    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    store.add_board(BoardType::Pe).unwrap();
    let before = store.draft().clone();

    assert_eq!(
        store.add_board(BoardType::Core),
        Err(EditError::BoardExists("core".to_string()))
    );
    assert_eq!(
        store.add_semester("board-404"),
        Err(EditError::BoardNotFound("board-404".to_string()))
    );
    assert_eq!(
        store.rename_column(&core, "column-404", "Fall"),
        Err(EditError::ColumnNotFound("column-404".to_string()))
    );
    assert_eq!(store.rename_column(&core, "column-404", "   "), Err(EditError::EmptyTitle));
    assert!(store.attach_prerequisites("nope", &[subject("A", 1.0)]).unwrap_err().is_recoverable());
    assert_eq!(store.draft(), &before);
}

#[test]
fn rename_column_relabels_its_placements() {
    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    let s1 = store.add_semester(&core).unwrap();
    let p = store
        .add_subject_placements(&core, &s1, &[subject("A", 3.0)])
        .unwrap()
        .remove(0);

    store.rename_column(&core, &s1, "  Fall Year 1 ").unwrap();

    let (_, column) = store.draft().find_column(&s1).unwrap();
    assert_eq!(column.title, "Fall Year 1");
    assert_eq!(store.placement(&p).unwrap().semester_label, "Fall Year 1");
}

#[test]
fn placed_subjects_span_every_board() {
    use nu_board::core::selection::{classify_candidates, placed_subject_ids, CandidateStatus};

    let mut store = store();
    let core = store.add_board(BoardType::Core).unwrap();
    let pe = store.add_board(BoardType::Pe).unwrap();
    let c1 = store.add_semester(&core).unwrap();
    let p1 = store.add_semester(&pe).unwrap();
    store
        .add_subject_placements(&core, &c1, &[subject("CS101", 3.0)])
        .unwrap();
    store
        .add_subject_placements(&pe, &p1, &[subject("PE101", 1.0)])
        .unwrap();

    let placed = placed_subject_ids(store.draft());
    assert!(placed.contains("CS101") && placed.contains("PE101"));

    let candidates = classify_candidates(store.draft(), &[subject("PE101", 1.0), subject("EN101", 3.0)]);
    assert_eq!(candidates[0].status, CandidateStatus::AlreadyInCurriculum);
    assert_eq!(candidates[1].status, CandidateStatus::WillBeAutoAdded);
}
