//! Relationship — the payload carried by every edge.

use serde::{Deserialize, Serialize};
use super::{InterestId, InterestSet};

/// Edge payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shared")]
pub enum Relationship {
    /// No interest annotation.
    Simple,
    /// Annotated with the interests both endpoints hold. Never empty.
    Indirect(InterestSet),
}

/// Payload discriminant, for callers that only need to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    Simple,
    Indirect,
}

impl Relationship {
    pub fn kind(&self) -> RelationshipKind {
        match self {
            Relationship::Simple => RelationshipKind::Simple,
            Relationship::Indirect(_) => RelationshipKind::Indirect,
        }
    }

    /// Shared interests; empty for `Simple`.
    pub fn shared_interests(&self) -> impl Iterator<Item = InterestId> + '_ {
        let shared = match self {
            Relationship::Simple => None,
            Relationship::Indirect(set) => Some(set),
        };
        shared.into_iter().flatten().copied()
    }

    pub fn shares(&self, interest: InterestId) -> bool {
        match self {
            Relationship::Simple => false,
            Relationship::Indirect(set) => set.contains(&interest),
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relationship::Simple => write!(f, "simple"),
            Relationship::Indirect(set) => write!(f, "indirect({} shared)", set.len()),
        }
    }
}
