//! # Social Graph Model
//!
//! Plain data that crosses every boundary: dataset ↔ builders ↔ graph ↔
//! statistics ↔ export.
//!
//! Design rule: no graph storage, no handles, no I/O here.

pub mod user;
pub mod interest;
pub mod relationship;

pub use user::{User, UserId, Tag};
pub use interest::{Interest, InterestId, InterestSet};
pub use relationship::{Relationship, RelationshipKind};

use std::fmt::Debug;
use std::hash::Hash;

/// An element with a stable identity. A graph never holds two vertices
/// whose elements share a key.
pub trait Keyed {
    type Key: Clone + Eq + Hash + Debug;

    fn key(&self) -> Self::Key;
}
