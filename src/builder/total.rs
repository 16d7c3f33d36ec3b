//! Total strategy: materialize the whole dataset in one pass.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::graph::Digraph;
use crate::model::{Relationship, User};
use crate::{Error, Result};
use super::Builder;

impl Builder<'_> {
    /// Insert every user (tagged `Added`) and every declared relation.
    ///
    /// Meant for an empty graph. If any dataset user is already present the
    /// call fails with `DuplicateVertex` before touching the graph.
    pub fn load_total<G>(&self, graph: &mut G) -> Result<()>
    where
        G: Digraph<User, Relationship>,
    {
        if let Some(clash) = self.dataset.user_ids().find(|id| graph.find_vertex(id).is_some()) {
            return Err(Error::DuplicateVertex(format!("user {clash} is already in the graph")));
        }

        let mut refs = HashMap::with_capacity(self.dataset.user_count());
        for user in self.dataset.users() {
            let id = user.id;
            refs.insert(id, graph.insert_vertex(user)?);
        }

        let mut edges = 0;
        for (from, to) in self.dataset.relation_pairs() {
            let (Some(&from_ref), Some(&to_ref)) = (refs.get(&from), refs.get(&to)) else {
                warn!(%from, %to, "declared relation names an unknown user, skipping");
                continue;
            };
            if self.link(graph, (from_ref, from), (to_ref, to), false)?.is_some() {
                edges += 1;
            }
        }

        info!(vertices = refs.len(), edges, "total build complete");
        Ok(())
    }
}
