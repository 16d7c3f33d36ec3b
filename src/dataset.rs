//! Dataset — the already-parsed records the builders read from.
//!
//! Three mappings: `user → name`, `user → declared relations` and
//! `interest → (name, members)`. File formats are somebody else's problem;
//! a dataset is assembled in memory or deserialized from JSON.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Interest, InterestId, InterestSet, User, UserId};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    users: BTreeMap<UserId, String>,
    relations: BTreeMap<UserId, BTreeSet<UserId>>,
    interests: BTreeMap<InterestId, Interest>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `Error::Dataset` when an interest is filed under a key
    /// other than its own id.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        if let Some((key, interest)) = dataset.interests.iter().find(|(key, i)| **key != i.id) {
            return Err(Error::Dataset(format!(
                "interest filed under {key} carries id {}",
                interest.id
            )));
        }
        Ok(dataset)
    }

    pub fn with_user(mut self, id: UserId, name: impl Into<String>) -> Self {
        self.users.insert(id, name.into());
        self
    }

    /// Declare `from → to`.
    pub fn with_relation(mut self, from: UserId, to: UserId) -> Self {
        self.relations.entry(from).or_default().insert(to);
        self
    }

    pub fn with_interest(mut self, interest: Interest) -> Self {
        self.interests.insert(interest.id, interest);
        self
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn name(&self, id: UserId) -> Option<&str> {
        self.users.get(&id).map(String::as_str)
    }

    /// A fresh `Added` user for `id`, if known.
    pub fn user(&self, id: UserId) -> Option<User> {
        self.name(id).map(|name| User::new(id, name))
    }

    /// All user ids in ascending order.
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    /// Every user as a fresh `Added` element, ascending by id.
    pub fn users(&self) -> impl Iterator<Item = User> + '_ {
        self.users.iter().map(|(&id, name)| User::new(id, name.as_str()))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // ========================================================================
    // Declared relations
    // ========================================================================

    /// Users `id` declares a relation to.
    pub fn related(&self, id: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.relations.get(&id).into_iter().flatten().copied()
    }

    pub fn is_declared(&self, from: UserId, to: UserId) -> bool {
        self.relations.get(&from).is_some_and(|set| set.contains(&to))
    }

    /// Every declared `(from, to)` pair.
    pub fn relation_pairs(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.relations
            .iter()
            .flat_map(|(&from, targets)| targets.iter().map(move |&to| (from, to)))
    }

    // ========================================================================
    // Interests
    // ========================================================================

    pub fn interest(&self, id: InterestId) -> Option<&Interest> {
        self.interests.get(&id)
    }

    pub fn interests_of(&self, user: UserId) -> impl Iterator<Item = &Interest> + '_ {
        self.interests.values().filter(move |i| i.is_held_by(user))
    }

    /// Interests held by both `a` and `b`.
    pub fn shared_interests(&self, a: UserId, b: UserId) -> InterestSet {
        self.interests
            .values()
            .filter(|i| i.is_held_by(a) && i.is_held_by(b))
            .map(|i| i.id)
            .collect()
    }
}
