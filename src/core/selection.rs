//! Global selection: which catalog subjects are already placed, and search over the catalog
//!
//! Everything here is a read-only projection of the draft, recomputed per call.

use crate::core::error::EditError;
use crate::core::models::{CatalogSubject, Curriculum, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Catalog ids placed anywhere in the draft, across all boards and columns
#[must_use]
pub fn placed_subject_ids(draft: &Curriculum) -> HashSet<SubjectId> {
    draft
        .boards
        .iter()
        .flat_map(|board| board.columns())
        .flat_map(|column| column.subject_ids.iter())
        .filter_map(|placement_id| draft.placement(placement_id))
        .map(|placement| placement.subject_id.clone())
        .collect()
}

/// Drop search results that are already placed
#[must_use]
pub fn exclude_placed(results: Vec<CatalogSubject>, draft: &Curriculum) -> Vec<CatalogSubject> {
    let placed = placed_subject_ids(draft);
    results
        .into_iter()
        .filter(|subject| !placed.contains(&subject.id))
        .collect()
}

/// How a prerequisite candidate relates to the current draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateStatus {
    /// Already placed somewhere in the curriculum
    AlreadyInCurriculum,
    /// Not placed; attaching it will auto-insert a placement
    WillBeAutoAdded,
}

/// A prerequisite candidate labelled for the picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// The catalog subject
    pub subject: CatalogSubject,
    /// Whether it is already placed
    pub status: CandidateStatus,
}

/// Label each candidate as already placed or to be auto-added
#[must_use]
pub fn classify_candidates(draft: &Curriculum, candidates: &[CatalogSubject]) -> Vec<Candidate> {
    let placed = placed_subject_ids(draft);
    candidates
        .iter()
        .map(|subject| Candidate {
            subject: subject.clone(),
            status: if placed.contains(&subject.id) {
                CandidateStatus::AlreadyInCurriculum
            } else {
                CandidateStatus::WillBeAutoAdded
            },
        })
        .collect()
}

/// Request sent to the subject search collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSearchRequest {
    /// Free-text query matched against id and name
    pub query: String,
    /// Restrict to a department/faculty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Restrict to a subject type (board type tag); catalogs without types ignore it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
    /// Catalog ids to leave out of the results
    #[serde(default)]
    pub exclude_ids: Vec<SubjectId>,
}

/// Build a search request that excludes every subject already placed in `draft`
#[must_use]
pub fn search_request(query: &str, draft: &Curriculum) -> SubjectSearchRequest {
    let mut exclude_ids: Vec<SubjectId> = placed_subject_ids(draft).into_iter().collect();
    exclude_ids.sort();
    SubjectSearchRequest {
        query: query.trim().to_string(),
        exclude_ids,
        ..SubjectSearchRequest::default()
    }
}

/// The subject search collaborator
pub trait SubjectSearch {
    /// Ordered catalog subjects matching `request`
    fn search(&self, request: &SubjectSearchRequest) -> Vec<CatalogSubject>;

    /// Look up subjects by exact id, preserving the order of `ids`
    ///
    /// # Errors
    /// `EmptySelection` if `ids` is empty
    fn resolve(&self, ids: &[String]) -> Result<Vec<CatalogSubject>, EditError>;
}

/// In-memory catalog, loaded from a JSON array of catalog subjects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    subjects: Vec<CatalogSubject>,
}

impl CatalogIndex {
    /// Wrap a list of subjects
    #[must_use]
    pub const fn new(subjects: Vec<CatalogSubject>) -> Self {
        Self { subjects }
    }

    /// Parse a JSON array of catalog subjects
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the catalog subject shape
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a catalog file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Number of subjects in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl SubjectSearch for CatalogIndex {
    fn search(&self, request: &SubjectSearchRequest) -> Vec<CatalogSubject> {
        let query = request.query.to_lowercase();
        self.subjects
            .iter()
            .filter(|s| !request.exclude_ids.contains(&s.id))
            .filter(|s| {
                request
                    .department_id
                    .as_ref()
                    .map_or(true, |dept| &s.faculty_id == dept)
            })
            .filter(|s| {
                query.is_empty()
                    || s.id.to_lowercase().contains(&query)
                    || s.name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    fn resolve(&self, ids: &[String]) -> Result<Vec<CatalogSubject>, EditError> {
        if ids.is_empty() {
            return Err(EditError::EmptySelection);
        }
        ids.iter()
            .map(|id| {
                self.subjects
                    .iter()
                    .find(|s| s.id.eq_ignore_ascii_case(id))
                    .cloned()
                    .ok_or_else(|| EditError::SubjectNotFound(id.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Board, BoardType, Column, CurriculumInfo, Placement};

    fn catalog() -> CatalogIndex {
        let mut pe = CatalogSubject::new("PE101", "Swimming", 1.0);
        pe.faculty_id = "PE".to_string();
        CatalogIndex::new(vec![
            CatalogSubject::new("CS164", "Intro to Programming", 4.0),
            CatalogSubject::new("CS165", "Data Structures", 4.0),
            CatalogSubject::new("MATH156", "Calculus for CS", 4.0),
            pe,
        ])
    }

    fn draft_with(subjects: &[&str]) -> Curriculum {
        let mut draft = Curriculum::new(CurriculumInfo::new("cur", "Test"));
        let mut board = Board::new("b".to_string(), BoardType::Core, "cur".to_string());
        let mut column = Column::new("s1".to_string(), board.column_title(1), 1, "core".to_string());
        for id in subjects {
            let placement = Placement::from_catalog(
                format!("p-{id}"),
                &CatalogSubject::new(id, id, 3.0),
                &column,
            );
            column.push_subject(placement.id.clone());
            draft.placements.insert(placement.id.clone(), placement);
        }
        board.push_column(column);
        draft.boards.push(board);
        draft
    }

    #[test]
    fn test_placed_subject_ids() {
        let draft = draft_with(&["CS164", "MATH156"]);
        let placed = placed_subject_ids(&draft);
        assert_eq!(placed.len(), 2);
        assert!(placed.contains("CS164"));
    }

    #[test]
    fn test_search_request_excludes_placed() {
        let draft = draft_with(&["MATH156", "CS164"]);
        let request = search_request("  cs ", &draft);
        assert_eq!(request.query, "cs");
        assert_eq!(request.exclude_ids, vec!["CS164", "MATH156"]);

        let results = catalog().search(&request);
        let ids: Vec<&str> = results.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["CS165"]);
    }

    #[test]
    fn test_search_by_department() {
        let request = SubjectSearchRequest {
            department_id: Some("PE".to_string()),
            ..SubjectSearchRequest::default()
        };
        let results = catalog().search(&request);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "PE101");
    }

    #[test]
    fn test_exclude_placed() {
        let draft = draft_with(&["CS165"]);
        let all = catalog().search(&SubjectSearchRequest::default());
        let remaining = exclude_placed(all, &draft);
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|s| s.id != "CS165"));
    }

    #[test]
    fn test_classify_candidates() {
        let draft = draft_with(&["CS164"]);
        let candidates = catalog().resolve(&["CS164".to_string(), "MATH156".to_string()]).unwrap();
        let labelled = classify_candidates(&draft, &candidates);
        assert_eq!(labelled[0].status, CandidateStatus::AlreadyInCurriculum);
        assert_eq!(labelled[1].status, CandidateStatus::WillBeAutoAdded);
    }

    #[test]
    fn test_resolve_errors() {
        assert_eq!(catalog().resolve(&[]), Err(EditError::EmptySelection));
        assert_eq!(
            catalog().resolve(&["CS999".to_string()]),
            Err(EditError::SubjectNotFound("CS999".to_string()))
        );
        let found = catalog().resolve(&["pe101".to_string()]).unwrap();
        assert_eq!(found[0].name, "Swimming");
    }

    #[test]
    fn test_catalog_from_json() {
        let index = CatalogIndex::from_json(
            r#"[{"id":"CS1","name":"Intro","credits":3},{"id":"CS2","name":"Next","credits":3}]"#,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }
}
