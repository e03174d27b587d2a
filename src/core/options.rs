//! Editing policies consumed by the store

use crate::core::ids::IdStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where auto-inserted prerequisites go when no column exists for the target semester
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetColumnPolicy {
    /// Create a column for the target semester
    #[default]
    CreateTarget,
    /// Use the closest column below the target semester, else create semester 1
    ClosestLower,
}

impl FromStr for TargetColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create-target" | "create_target" => Ok(Self::CreateTarget),
            "closest-lower" | "closest_lower" => Ok(Self::ClosestLower),
            _ => Err(format!("Unknown target policy: {s}")),
        }
    }
}

impl fmt::Display for TargetColumnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTarget => write!(f, "create-target"),
            Self::ClosestLower => write!(f, "closest-lower"),
        }
    }
}

/// Behavior switches for a [`CurriculumStore`](crate::core::store::CurriculumStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Fallback when no column matches the prerequisite target semester
    pub target_policy: TargetColumnPolicy,
    /// Reject prerequisites that would form a cycle
    pub reject_cycles: bool,
    /// Refuse to remove a column whose placements are prerequisites elsewhere
    pub guard_column_removal: bool,
    /// Id generator for new entities
    pub id_strategy: IdStrategy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            target_policy: TargetColumnPolicy::CreateTarget,
            reject_cycles: true,
            guard_column_removal: false,
            id_strategy: IdStrategy::Uuid,
        }
    }
}
