//! # Graph Builders
//!
//! Two strategies populate a `Digraph<User, Relationship>` from a `Dataset`:
//!
//! | Strategy | Module | Description |
//! |----------|--------|-------------|
//! | Total | `total` | every user as `Added`, every declared relation as an edge |
//! | Iterative | `iterative` | one hop at a time from a seed user |
//!
//! Both route every candidate edge through `classify::Candidate`, so the
//! admission and classification rules live in exactly one place.

pub mod total;
pub mod iterative;

use tracing::trace;

use crate::classify::Candidate;
use crate::dataset::Dataset;
use crate::events::{EventSink, NetworkEvent, NoopSink};
use crate::graph::{Digraph, EdgeRef, VertexRef};
use crate::model::{Relationship, User, UserId};
use crate::{Result, SocialGraph};

pub use iterative::Expansion;

/// Builder bound to one dataset and one event sink.
pub struct Builder<'a> {
    dataset: &'a Dataset,
    sink: &'a dyn EventSink,
    record_interests: bool,
}

impl<'a> Builder<'a> {
    pub fn new(dataset: &'a Dataset, sink: &'a dyn EventSink) -> Self {
        Self { dataset, sink, record_interests: true }
    }

    /// Emit `InterestRecorded` for every interest of a newly inserted user.
    pub fn record_interests(mut self, on: bool) -> Self {
        self.record_interests = on;
        self
    }

    fn note_interests(&self, user: UserId) {
        if !self.record_interests {
            return;
        }
        for interest in self.dataset.interests_of(user) {
            self.sink.record(NetworkEvent::InterestRecorded { user, interest: interest.id });
        }
    }

    /// Insert or update `from → to` if the pair is admitted in this mode.
    fn link<G>(
        &self,
        graph: &mut G,
        (from_ref, from): (VertexRef, UserId),
        (to_ref, to): (VertexRef, UserId),
        expand_indirect: bool,
    ) -> Result<Option<EdgeRef>>
    where
        G: Digraph<User, Relationship>,
    {
        let candidate = Candidate::resolve(self.dataset, from, to);
        let Some(relationship) = candidate.relationship(expand_indirect) else {
            return Ok(None);
        };

        let shared = candidate.shared.len();
        let edge = graph.insert_edge(from_ref, to_ref, relationship)?;
        trace!(%from, %to, shared, expand_indirect, "linked");

        self.sink.record(if candidate.declared {
            NetworkEvent::DirectRelationship { from, to, shared }
        } else {
            NetworkEvent::IndirectRelationship { from, to, shared }
        });
        Ok(Some(edge))
    }

    /// Link `seed` to every other vertex currently in the graph.
    /// Returns the number of edges inserted or updated.
    fn link_from_seed<G>(&self, graph: &mut G, seed_ref: VertexRef, expand_indirect: bool) -> Result<usize>
    where
        G: Digraph<User, Relationship>,
    {
        let seed = graph.element(seed_ref)?.id;

        // Snapshot the vertex set before inserting edges
        let mut others = Vec::new();
        for v in graph.vertices() {
            if v != seed_ref {
                others.push((v, graph.element(v)?.id));
            }
        }
        others.sort_by_key(|&(_, id)| id);

        let mut linked = 0;
        for other in others {
            if self.link(graph, (seed_ref, seed), other, expand_indirect)?.is_some() {
                linked += 1;
            }
        }
        Ok(linked)
    }
}

// ============================================================================
// Convenience entry points
// ============================================================================

/// Build a fresh graph holding every user and declared relation.
pub fn build_total(dataset: &Dataset, sink: &dyn EventSink) -> Result<SocialGraph> {
    let mut graph = SocialGraph::with_capacity(dataset.user_count(), dataset.relation_pairs().count());
    Builder::new(dataset, sink).load_total(&mut graph)?;
    Ok(graph)
}

/// Grow `graph` one hop from `seed`. Events are discarded.
pub fn expand_from<G>(graph: &mut G, dataset: &Dataset, seed: UserId) -> Result<Expansion>
where
    G: Digraph<User, Relationship>,
{
    Builder::new(dataset, &NoopSink).expand_from(graph, seed)
}

/// Annotate interest-based edges from `seed`. Events are discarded.
pub fn add_indirect_relationships<G>(graph: &mut G, dataset: &Dataset, seed: UserId) -> Result<usize>
where
    G: Digraph<User, Relationship>,
{
    Builder::new(dataset, &NoopSink).add_indirect_relationships(graph, seed)
}
