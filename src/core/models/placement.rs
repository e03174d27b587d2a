//! Catalog subjects and their placements inside a curriculum

use super::{Column, PlacementId, SubjectId};
use serde::{Deserialize, Serialize};

/// A canonical course record as returned by subject search.
///
/// The editor never mutates catalog subjects; placements copy what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSubject {
    /// Catalog subject id (e.g., "CS220")
    pub id: SubjectId,

    /// Display name
    pub name: String,

    /// Credit hours (can be fractional)
    pub credits: f32,

    /// Owning faculty/department
    #[serde(default)]
    pub faculty_id: String,

    /// Free-form catalog description
    #[serde(default)]
    pub description: String,
}

impl CatalogSubject {
    /// Create a catalog subject with no faculty or description
    #[must_use]
    pub fn new(id: &str, name: &str, credits: f32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            credits,
            faculty_id: String::new(),
            description: String::new(),
        }
    }
}

/// Reference to a catalog subject used in prerequisite lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRef {
    /// Catalog subject id
    pub id: SubjectId,
    /// Display name
    pub name: String,
    /// Credit hours
    pub credits: f32,
}

impl From<&CatalogSubject> for SubjectRef {
    fn from(subject: &CatalogSubject) -> Self {
        Self {
            id: subject.id.clone(),
            name: subject.name.clone(),
            credits: subject.credits,
        }
    }
}

/// One instance of a catalog subject scheduled into a column.
///
/// The placement id is distinct from `subject_id`: the same catalog subject may
/// in principle be placed more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Synthetic placement id
    pub id: PlacementId,

    /// Underlying catalog subject id
    pub subject_id: SubjectId,

    /// Display name copied from the catalog
    pub name: String,

    /// Credit hours copied from the catalog
    pub credits: f32,

    /// Semester number of the column holding this placement
    pub semester_number: u32,

    /// Semester label (the holding column's title)
    pub semester_label: String,

    /// Whether the subject is mandatory in this curriculum
    pub is_required: bool,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Subjects that must be taken before this one
    #[serde(default)]
    pub prerequisite_subjects: Vec<SubjectRef>,

    /// Cached `!prerequisite_subjects.is_empty()`
    #[serde(default)]
    pub has_prerequisite: bool,
}

impl Placement {
    /// Build a placement for `subject` seeded with the semester of `column`
    #[must_use]
    pub fn from_catalog(id: PlacementId, subject: &CatalogSubject, column: &Column) -> Self {
        Self {
            id,
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            credits: subject.credits,
            semester_number: column.semester_number,
            semester_label: column.title.clone(),
            is_required: true,
            description: subject.description.clone(),
            notes: String::new(),
            prerequisite_subjects: Vec::new(),
            has_prerequisite: false,
        }
    }

    /// Replace the prerequisite list, dropping any reference to this placement's own subject
    /// and duplicate references.
    ///
    /// # Returns
    /// `true` if a self-reference had to be dropped
    pub fn set_prerequisites(&mut self, prerequisites: Vec<SubjectRef>) -> bool {
        let before = prerequisites.len();
        let mut kept: Vec<SubjectRef> = Vec::with_capacity(before);
        let mut dropped_self = false;
        for prereq in prerequisites {
            if prereq.id == self.subject_id {
                dropped_self = true;
            } else if !kept.iter().any(|k| k.id == prereq.id) {
                kept.push(prereq);
            }
        }
        self.has_prerequisite = !kept.is_empty();
        self.prerequisite_subjects = kept;
        dropped_self
    }

    /// Move the placement into `column`'s semester
    pub fn assign_to(&mut self, column: &Column) {
        self.semester_number = column.semester_number;
        self.semester_label.clone_from(&column.title);
    }

    /// Whether this placement lists `subject_id` as a prerequisite
    #[must_use]
    pub fn references(&self, subject_id: &str) -> bool {
        self.prerequisite_subjects.iter().any(|p| p.id == subject_id)
    }

    /// Catalog ids of the prerequisites, in order
    #[must_use]
    pub fn prerequisite_ids(&self) -> Vec<SubjectId> {
        self.prerequisite_subjects
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(semester: u32) -> Column {
        Column::new(
            "col-1".to_string(),
            format!("Core - Semester {semester}"),
            semester,
            "core".to_string(),
        )
    }

    #[test]
    fn test_from_catalog_seeds_semester() {
        let subject = CatalogSubject::new("CS220", "Discrete Structures", 4.0);
        let placement = Placement::from_catalog("p-1".to_string(), &subject, &column(3));

        assert_eq!(placement.subject_id, "CS220");
        assert_eq!(placement.semester_number, 3);
        assert_eq!(placement.semester_label, "Core - Semester 3");
        assert!(!placement.has_prerequisite);
        assert!((placement.credits - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_set_prerequisites_drops_self_reference() {
        let subject = CatalogSubject::new("CS220", "Discrete Structures", 4.0);
        let mut placement = Placement::from_catalog("p-1".to_string(), &subject, &column(2));

        let dropped = placement.set_prerequisites(vec![
            SubjectRef::from(&subject),
            SubjectRef::from(&CatalogSubject::new("MATH156", "Calculus", 4.0)),
            SubjectRef::from(&CatalogSubject::new("MATH156", "Calculus", 4.0)),
        ]);

        assert!(dropped);
        assert_eq!(placement.prerequisite_ids(), vec!["MATH156".to_string()]);
        assert!(placement.has_prerequisite);
        assert!(placement.references("MATH156"));
        assert!(!placement.references("CS220"));
    }

    #[test]
    fn test_clearing_prerequisites_resets_flag() {
        let subject = CatalogSubject::new("CS220", "Discrete Structures", 4.0);
        let mut placement = Placement::from_catalog("p-1".to_string(), &subject, &column(2));
        placement.set_prerequisites(vec![SubjectRef::from(&CatalogSubject::new(
            "CS165", "Data Structures", 4.0,
        ))]);

        assert!(!placement.set_prerequisites(Vec::new()));
        assert!(!placement.has_prerequisite);
    }

    #[test]
    fn test_catalog_subject_json_shape() {
        let json = r#"{"id":"PE101","name":"Swimming","credits":1.0,"facultyId":"PE"}"#;
        let subject: CatalogSubject = serde_json::from_str(json).unwrap();
        assert_eq!(subject.faculty_id, "PE");
        assert!(subject.description.is_empty());
    }
}
