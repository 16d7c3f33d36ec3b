//! Interests — tags held by sets of users.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use super::UserId;

/// Opaque interest identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterestId(pub u32);

impl std::fmt::Display for InterestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of interest ids. Ordered so that payloads compare and
/// serialize deterministically.
pub type InterestSet = BTreeSet<InterestId>;

/// An interest and the users that hold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: InterestId,
    pub name: String,
    pub members: BTreeSet<UserId>,
}

impl Interest {
    pub fn new(id: InterestId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: BTreeSet::new(),
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn is_held_by(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }
}
