//! User — the entity held by every vertex.

use serde::{Deserialize, Serialize};
use super::Keyed;

/// Opaque user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle tag of a user inside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Explicitly requested.
    Added,
    /// Pulled in only as a neighbour of someone else's expansion.
    Included,
}

/// A user of the social network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub tag: Tag,
    /// The added user whose expansion pulled this one in, if any.
    pub included_by: Option<UserId>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag: Tag::Added,
            included_by: None,
        }
    }

    /// Mark as included by `by`.
    pub fn included(mut self, by: UserId) -> Self {
        self.tag = Tag::Included;
        self.included_by = Some(by);
        self
    }

    /// `Included → Added`. Returns `false` when the user was already added.
    pub fn promote(&mut self) -> bool {
        match self.tag {
            Tag::Included => {
                self.tag = Tag::Added;
                true
            }
            Tag::Added => false,
        }
    }

    pub fn is_added(&self) -> bool {
        self.tag == Tag::Added
    }
}

impl Keyed for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_is_one_way() {
        let mut user = User::new(UserId(4), "Dora").included(UserId(1));
        assert!(!user.is_added());

        assert!(user.promote());
        assert!(user.is_added());
        assert!(!user.promote());
        assert_eq!(user.included_by, Some(UserId(1)));
    }
}
