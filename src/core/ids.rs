//! Id generation for boards, columns and placements
//!
//! The store never invents ids itself; it asks the injected [`IdGenerator`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Source of unique ids for new draft entities
pub trait IdGenerator {
    /// Produce a token unique for the lifetime of the generator
    fn next_token(&mut self) -> String;

    /// Id for a new board
    fn board_id(&mut self) -> String {
        format!("board-{}", self.next_token())
    }

    /// Id for a new column
    fn column_id(&mut self) -> String {
        format!("column-{}", self.next_token())
    }

    /// Id for a new placement of catalog subject `subject_id`
    fn placement_id(&mut self, subject_id: &str) -> String {
        format!("{subject_id}-{}", self.next_token())
    }
}

/// Monotonic counter ids; deterministic across runs
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting at 1
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Resume after `last` (used when reopening a saved draft)
    #[must_use]
    pub const fn starting_after(last: u64) -> Self {
        Self { next: last }
    }
}

impl IdGenerator for SequentialIds {
    fn next_token(&mut self) -> String {
        self.next += 1;
        self.next.to_string()
    }
}

/// Random v4 UUID ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_token(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Which generator a session uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// [`UuidIds`]
    #[default]
    Uuid,
    /// [`SequentialIds`]
    Sequential,
}

impl IdStrategy {
    /// Build a boxed generator for this strategy
    ///
    /// # Arguments
    /// * `resume_after` - Counter value to resume from (ignored for UUIDs)
    #[must_use]
    pub fn generator(self, resume_after: u64) -> Box<dyn IdGenerator> {
        match self {
            Self::Uuid => Box::new(UuidIds),
            Self::Sequential => Box::new(SequentialIds::starting_after(resume_after)),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "sequential" | "counter" => Ok(Self::Sequential),
            _ => Err(format!("Unknown id strategy: {s}")),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid => write!(f, "uuid"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

/// Highest numeric suffix (`...-<n>`) among `ids`, or 0
///
/// Lets a [`SequentialIds`] resume without colliding with ids already in a draft.
pub fn highest_sequential_token<'a>(ids: impl IntoIterator<Item = &'a str>) -> u64 {
    ids.into_iter()
        .filter_map(|id| id.rsplit_once('-'))
        .filter_map(|(_, suffix)| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}
