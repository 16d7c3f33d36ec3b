//! Path — the result of a shortest-path query, and the solver producing it.
//!
//! The search runs in two phases:
//!
//! 1. breadth-first walk over outbound edges collects the reachable set;
//! 2. Dijkstra relaxation with unit weights runs over that set only.
//!
//! Parent pointers are walked back from the target. A target outside the
//! reachable set has no parent chain and yields `Error::NoPathExists`.

use std::collections::{HashMap, HashSet, VecDeque};

use smallvec::SmallVec;
use tracing::trace;

use crate::model::Keyed;
use crate::{Error, Result};
use super::{Digraph, VertexRef};

/// Shortest path between two vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Number of edges traversed. Every edge costs 1.
    pub cost: usize,
    /// Vertices from origin to target inclusive. Always `cost + 1` long.
    pub vertices: SmallVec<[VertexRef; 8]>,
}

impl Path {
    pub fn single(v: VertexRef) -> Self {
        let mut vertices = SmallVec::new();
        vertices.push(v);
        Self { cost: 0, vertices }
    }

    /// Edges traversed. A single-vertex path has zero hops.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<VertexRef> {
        self.vertices.first().copied()
    }

    pub fn end(&self) -> Option<VertexRef> {
        self.vertices.last().copied()
    }
}

/// Vertices reachable from `origin` via outbound edges, in BFS order.
/// `origin` is always first.
pub fn reachable<G, V, E>(graph: &G, origin: VertexRef) -> Result<Vec<VertexRef>>
where
    G: Digraph<V, E>,
    V: Keyed,
{
    graph.element(origin)?;

    let mut order = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(origin);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for edge in graph.outbound_edges(current)? {
            let (_, next) = graph.endpoints(edge)?;
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(order)
}

/// Unit-weight shortest path from `origin` to `target` over outbound edges.
pub fn shortest_path<G, V, E>(graph: &G, origin: VertexRef, target: VertexRef) -> Result<Path>
where
    G: Digraph<V, E>,
    V: Keyed,
{
    graph.element(target)?;
    let bounded = reachable(graph, origin)?;

    let mut distances: HashMap<VertexRef, usize> =
        bounded.iter().map(|&v| (v, usize::MAX)).collect();
    let mut parents: HashMap<VertexRef, VertexRef> = HashMap::new();
    distances.insert(origin, 0);

    // Kept in BFS order: ties go to the first vertex encountered.
    let mut unvisited = bounded;
    while !unvisited.is_empty() {
        let mut best = 0;
        for (i, v) in unvisited.iter().enumerate() {
            if distances[v] < distances[&unvisited[best]] {
                best = i;
            }
        }
        let current = unvisited.remove(best);
        let base = distances[&current];
        if base == usize::MAX {
            break;
        }

        for edge in graph.outbound_edges(current)? {
            let (_, next) = graph.endpoints(edge)?;
            if !unvisited.contains(&next) {
                continue;
            }
            let candidate = base + 1;
            if candidate < distances[&next] {
                distances.insert(next, candidate);
                parents.insert(next, current);
            }
        }
    }

    if target == origin {
        return Ok(Path::single(origin));
    }

    let cost = match distances.get(&target) {
        Some(&d) if d != usize::MAX => d,
        _ => return Err(Error::NoPathExists { from: origin.to_string(), to: target.to_string() }),
    };

    let mut vertices: SmallVec<[VertexRef; 8]> = SmallVec::with_capacity(cost + 1);
    let mut current = target;
    vertices.push(current);
    while current != origin {
        current = *parents.get(&current).ok_or_else(|| Error::NoPathExists {
            from: origin.to_string(),
            to: target.to_string(),
        })?;
        vertices.push(current);
    }
    vertices.reverse();

    trace!(%origin, %target, cost, "shortest path resolved");
    Ok(Path { cost, vertices })
}
