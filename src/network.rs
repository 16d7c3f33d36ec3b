//! `SocialNetwork` — the entry point tying a dataset, its graph, an event
//! sink and an undo history together.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::builder::{Builder, Expansion};
use crate::config::NetworkConfig;
use crate::dataset::Dataset;
use crate::events::{EventSink, NoopSink};
use crate::graph::Digraph;
use crate::model::{User, UserId};
use crate::snapshot::{self, History};
use crate::stats::{self, Summary};
use crate::{Error, Result, SocialGraph};

/// One coarse lock around the whole network. Every mutation takes the
/// write side; queries may share the read side.
pub type SharedNetwork = Arc<RwLock<SocialNetwork>>;

/// A shortest route between two users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub cost: usize,
    /// Users from origin to target inclusive.
    pub users: Vec<User>,
}

impl Route {
    pub fn ids(&self) -> Vec<UserId> {
        self.users.iter().map(|u| u.id).collect()
    }
}

pub struct SocialNetwork {
    dataset: Dataset,
    graph: SocialGraph,
    sink: Box<dyn EventSink>,
    history: History,
    config: NetworkConfig,
}

impl SocialNetwork {
    pub fn new(dataset: Dataset) -> Self {
        let config = NetworkConfig::default();
        Self {
            dataset,
            graph: SocialGraph::new(),
            sink: Box::new(NoopSink),
            history: History::new(config.history_depth),
            config,
        }
    }

    pub fn with_config(dataset: Dataset, config: NetworkConfig) -> Result<Self> {
        config.validate()?;
        let mut network = Self::new(dataset);
        network.history = History::new(config.history_depth);
        network.config = config;
        Ok(network)
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn into_shared(self) -> SharedNetwork {
        Arc::new(RwLock::new(self))
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Load every user and declared relation. The graph must not already
    /// hold any dataset user.
    pub fn build_total(&mut self) -> Result<()> {
        Builder::new(&self.dataset, self.sink.as_ref())
            .record_interests(self.config.record_interests)
            .load_total(&mut self.graph)
    }

    /// Grow the graph one hop from `seed`.
    pub fn expand_from(&mut self, seed: UserId) -> Result<Expansion> {
        Builder::new(&self.dataset, self.sink.as_ref())
            .record_interests(self.config.record_interests)
            .expand_from(&mut self.graph, seed)
    }

    /// Add interest-based edges from `seed` to undeclared users.
    pub fn add_indirect_relationships(&mut self, seed: UserId) -> Result<usize> {
        Builder::new(&self.dataset, self.sink.as_ref())
            .record_interests(self.config.record_interests)
            .add_indirect_relationships(&mut self.graph, seed)
    }

    /// Drop every vertex and edge. History is kept.
    pub fn clear(&mut self) {
        self.graph = SocialGraph::new();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Shortest route following relationship direction.
    ///
    /// `NoPathExists` is returned as an error value when `to` cannot be
    /// reached; both users must be in the graph.
    pub fn shortest_path(&self, from: UserId, to: UserId) -> Result<Route> {
        let origin = self.vertex_of(from)?;
        let target = self.vertex_of(to)?;

        let path = self.graph.shortest_path(origin, target)?;
        let users = path
            .vertices
            .iter()
            .map(|&v| self.graph.element(v).cloned())
            .collect::<Result<Vec<_>>>()?;

        debug!(%from, %to, cost = path.cost, "route found");
        Ok(Route { cost: path.cost, users })
    }

    /// Dataset users that have no vertex yet, ascending by id.
    pub fn users_not_inserted(&self) -> Vec<User> {
        self.dataset
            .user_ids()
            .filter(|id| !self.graph.contains(id))
            .filter_map(|id| self.dataset.user(id))
            .collect()
    }

    pub fn summary(&self) -> Result<Summary> {
        stats::summary(&self.graph)
    }

    fn vertex_of(&self, id: UserId) -> Result<crate::graph::VertexRef> {
        self.graph
            .find_vertex(&id)
            .ok_or_else(|| Error::InvalidVertex(format!("user {id} is not in the graph")))
    }

    // ========================================================================
    // Snapshots & undo
    // ========================================================================

    pub fn snapshot(&self) -> Result<Vec<u8>> {
        snapshot::snapshot(&self.graph)
    }

    /// Replace the current graph with a restored image.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        self.graph = snapshot::restore(bytes)?;
        Ok(())
    }

    /// Push the current graph onto the undo history.
    pub fn checkpoint(&mut self) -> Result<()> {
        self.history.checkpoint(&self.graph)
    }

    /// Roll back to the last checkpoint. Returns `false` if there was none.
    pub fn undo(&mut self) -> Result<bool> {
        match self.history.undo()? {
            Some(graph) => {
                info!(vertices = graph.vertex_count(), edges = graph.edge_count(), "undo");
                self.graph = graph;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl std::fmt::Debug for SocialNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialNetwork")
            .field("users", &self.dataset.user_count())
            .field("vertices", &self.graph.vertex_count())
            .field("edges", &self.graph.edge_count())
            .field("checkpoints", &self.history.len())
            .finish()
    }
}
