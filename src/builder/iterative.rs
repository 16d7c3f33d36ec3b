//! Iterative strategy: grow the graph one hop at a time.
//!
//! Membership has two phases. A user explicitly expanded is `Added`; a user
//! that only entered as a neighbour of someone else's expansion is
//! `Included`, until it is expanded itself and promoted.

use tracing::{debug, warn};

use crate::graph::{Digraph, VertexRef};
use crate::model::{Relationship, Tag, User, UserId};
use crate::events::NetworkEvent;
use crate::{Error, Result};
use super::Builder;

/// What one `expand_from` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub seed: VertexRef,
    /// The seed was `Included` and got promoted; nothing else happened.
    pub promoted: bool,
    /// Users inserted as `Included`, ascending.
    pub included: Vec<UserId>,
    /// Edges from the seed inserted or updated.
    pub linked: usize,
}

impl Builder<'_> {
    /// Expand the graph one hop from `seed`.
    ///
    /// 1. Insert the seed as `Added`, or promote it if it is `Included` and stop.
    /// 2. Insert each declared relation of the seed not yet present as `Included`.
    /// 3. Link `seed → other` for every other vertex, non-expansion mode.
    pub fn expand_from<G>(&self, graph: &mut G, seed: UserId) -> Result<Expansion>
    where
        G: Digraph<User, Relationship>,
    {
        let user = self.dataset.user(seed).ok_or(Error::UnknownUser(seed))?;

        let seed_ref = match graph.find_vertex(&seed) {
            Some(v) => {
                let current = graph.element(v)?;
                if current.tag == Tag::Included {
                    let mut promoted = current.clone();
                    promoted.promote();
                    graph.replace_vertex_element(v, promoted)?;
                    self.sink.record(NetworkEvent::UserPromoted { user: seed });
                    debug!(%seed, "promoted included user");
                    return Ok(Expansion { seed: v, promoted: true, included: Vec::new(), linked: 0 });
                }
                v
            }
            None => {
                let v = graph.insert_vertex(user)?;
                self.note_interests(seed);
                v
            }
        };

        let mut included = Vec::new();
        for related in self.dataset.related(seed) {
            if graph.find_vertex(&related).is_some() {
                continue;
            }
            let Some(neighbour) = self.dataset.user(related) else {
                warn!(%seed, %related, "declared relation names an unknown user, skipping");
                continue;
            };
            graph.insert_vertex(neighbour.included(seed))?;
            self.sink.record(NetworkEvent::UserIncluded { by: seed, user: related });
            self.note_interests(related);
            included.push(related);
        }

        let linked = self.link_from_seed(graph, seed_ref, false)?;
        debug!(%seed, included = included.len(), linked, "expanded");

        Ok(Expansion { seed: seed_ref, promoted: false, included, linked })
    }

    /// Link `seed` to every other vertex in indirect-expansion mode: undeclared
    /// pairs sharing interests get an `Indirect` edge. No vertices are added.
    ///
    /// Fails with `InvalidVertex` when the seed is not in the graph.
    pub fn add_indirect_relationships<G>(&self, graph: &mut G, seed: UserId) -> Result<usize>
    where
        G: Digraph<User, Relationship>,
    {
        let seed_ref = graph
            .find_vertex(&seed)
            .ok_or_else(|| Error::InvalidVertex(format!("user {seed} is not in the graph")))?;

        let linked = self.link_from_seed(graph, seed_ref, true)?;
        debug!(%seed, linked, "indirect relationships added");
        Ok(linked)
    }
}
