//! In-memory directed graph.
//!
//! This is the reference implementation of `Digraph`.
//!
//! ## Layout
//!
//! - Vertices live in a slot map; an identity index maps each element's key
//!   to its slot, so two vertices never share an identity.
//! - Edges live in their own slot map (`source`, `target`, `payload`).
//! - Every vertex owns a local edge table holding every edge that touches it,
//!   keyed by `(direction, opposite vertex)`. An ordered pair is therefore
//!   joined by at most one edge, and `a → b` never shadows `c → d`.
//!
//! Direction queries scan the local table and filter, so they cost
//! `O(degree)` of the queried vertex.

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::model::Keyed;
use crate::{Error, Result};
use super::{Digraph, Direction, EdgeRef, GraphId, VertexRef};

// ============================================================================
// DirectGraph
// ============================================================================

/// Directed graph with identity-keyed vertices.
#[derive(Debug)]
pub struct DirectGraph<V: Keyed, E> {
    id: GraphId,
    vertices: HashMap<u64, VertexEntry<V>>,
    /// element key → vertex slot
    index: HashMap<V::Key, u64>,
    edges: HashMap<u64, EdgeEntry<E>>,
    next_vertex: u64,
    next_edge: u64,
}

#[derive(Debug)]
struct VertexEntry<V> {
    element: V,
    /// (side of this vertex, opposite vertex slot) → edge slot
    edges: HashMap<(Direction, u64), u64>,
}

#[derive(Debug)]
struct EdgeEntry<E> {
    source: u64,
    target: u64,
    payload: E,
}

impl<V: Keyed, E> DirectGraph<V, E> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            id: GraphId::next(),
            vertices: HashMap::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
            edges: HashMap::with_capacity(edge_count),
            next_vertex: 1,
            next_edge: 1,
        }
    }

    /// The instance identity embedded in every handle this graph mints.
    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, key: &V::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate `(handle, element)` pairs. No ordering is implied.
    pub fn iter_vertices(&self) -> impl Iterator<Item = (VertexRef, &V)> + '_ {
        self.vertices
            .iter()
            .map(|(&slot, entry)| (VertexRef::new(self.id, slot), &entry.element))
    }

    /// Iterate `(handle, source, target, payload)`. No ordering is implied.
    pub fn iter_edges(&self) -> impl Iterator<Item = (EdgeRef, VertexRef, VertexRef, &E)> + '_ {
        self.edges.iter().map(|(&slot, edge)| {
            (
                EdgeRef::new(self.id, slot),
                VertexRef::new(self.id, edge.source),
                VertexRef::new(self.id, edge.target),
                &edge.payload,
            )
        })
    }

    // ========================================================================
    // Handle validation
    // ========================================================================

    fn vertex_slot(&self, v: VertexRef) -> Result<u64> {
        if v.graph() != self.id {
            return Err(Error::InvalidVertex(format!("{v} belongs to another graph")));
        }
        if !self.vertices.contains_key(&v.slot) {
            return Err(Error::InvalidVertex(format!("{v} does not exist")));
        }
        Ok(v.slot)
    }

    fn edge_slot(&self, e: EdgeRef) -> Result<u64> {
        if e.graph() != self.id {
            return Err(Error::InvalidEdge(format!("{e} belongs to another graph")));
        }
        if !self.edges.contains_key(&e.slot) {
            return Err(Error::InvalidEdge(format!("{e} does not exist")));
        }
        Ok(e.slot)
    }

    fn entry(&self, v: VertexRef) -> Result<&VertexEntry<V>> {
        let slot = self.vertex_slot(v)?;
        self.vertices
            .get(&slot)
            .ok_or_else(|| Error::InvalidVertex(format!("{v} does not exist")))
    }

    fn entry_mut(&mut self, slot: u64) -> Result<&mut VertexEntry<V>> {
        self.vertices
            .get_mut(&slot)
            .ok_or_else(|| Error::InvalidVertex(format!("v{slot}@g{} does not exist", self.id.0)))
    }

    fn edges_on(&self, v: VertexRef, side: Direction) -> Result<Vec<EdgeRef>> {
        let entry = self.entry(v)?;
        Ok(entry
            .edges
            .iter()
            .filter(|((dir, _), _)| *dir == side)
            .map(|(_, &slot)| EdgeRef::new(self.id, slot))
            .collect())
    }

    /// Unlink an edge from both endpoint tables and drop it.
    fn detach_edge(&mut self, slot: u64) -> Option<EdgeEntry<E>> {
        let edge = self.edges.remove(&slot)?;
        if let Some(source) = self.vertices.get_mut(&edge.source) {
            if source.edges.get(&(Direction::Outgoing, edge.target)) == Some(&slot) {
                source.edges.remove(&(Direction::Outgoing, edge.target));
            }
        }
        if let Some(target) = self.vertices.get_mut(&edge.target) {
            if target.edges.get(&(Direction::Incoming, edge.source)) == Some(&slot) {
                target.edges.remove(&(Direction::Incoming, edge.source));
            }
        }
        Some(edge)
    }
}

impl<V: Keyed, E> Default for DirectGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Digraph impl
// ============================================================================

impl<V: Keyed, E> Digraph<V, E> for DirectGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn vertices(&self) -> Vec<VertexRef> {
        self.vertices.keys().map(|&slot| VertexRef::new(self.id, slot)).collect()
    }

    fn edges(&self) -> Vec<EdgeRef> {
        self.edges.keys().map(|&slot| EdgeRef::new(self.id, slot)).collect()
    }

    fn find_vertex(&self, key: &V::Key) -> Option<VertexRef> {
        self.index.get(key).map(|&slot| VertexRef::new(self.id, slot))
    }

    fn element(&self, v: VertexRef) -> Result<&V> {
        Ok(&self.entry(v)?.element)
    }

    fn payload(&self, e: EdgeRef) -> Result<&E> {
        let slot = self.edge_slot(e)?;
        self.edges
            .get(&slot)
            .map(|edge| &edge.payload)
            .ok_or_else(|| Error::InvalidEdge(format!("{e} does not exist")))
    }

    fn endpoints(&self, e: EdgeRef) -> Result<(VertexRef, VertexRef)> {
        let slot = self.edge_slot(e)?;
        self.edges
            .get(&slot)
            .map(|edge| (VertexRef::new(self.id, edge.source), VertexRef::new(self.id, edge.target)))
            .ok_or_else(|| Error::InvalidEdge(format!("{e} does not exist")))
    }

    fn outbound_edges(&self, v: VertexRef) -> Result<Vec<EdgeRef>> {
        self.edges_on(v, Direction::Outgoing)
    }

    fn incident_edges(&self, v: VertexRef) -> Result<Vec<EdgeRef>> {
        self.edges_on(v, Direction::Incoming)
    }

    fn are_adjacent(&self, a: VertexRef, b: VertexRef) -> Result<bool> {
        let entry = self.entry(a)?;
        let b_slot = self.vertex_slot(b)?;
        Ok(entry.edges.contains_key(&(Direction::Outgoing, b_slot))
            || entry.edges.contains_key(&(Direction::Incoming, b_slot)))
    }

    fn insert_vertex(&mut self, element: V) -> Result<VertexRef> {
        let key = element.key();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateVertex(format!("{key:?}")));
        }

        let slot = self.next_vertex;
        self.next_vertex += 1;
        self.index.insert(key, slot);
        self.vertices.insert(slot, VertexEntry { element, edges: HashMap::new() });

        Ok(VertexRef::new(self.id, slot))
    }

    fn insert_edge(&mut self, source: VertexRef, target: VertexRef, payload: E) -> Result<EdgeRef> {
        let s = self.vertex_slot(source)?;
        let t = self.vertex_slot(target)?;

        let existing = self.entry_mut(s)?.edges.get(&(Direction::Outgoing, t)).copied();
        if let Some(slot) = existing {
            if let Some(edge) = self.edges.get_mut(&slot) {
                trace!(edge = slot, "updating payload of existing edge");
                edge.payload = payload;
                return Ok(EdgeRef::new(self.id, slot));
            }
        }

        let slot = self.next_edge;
        self.next_edge += 1;
        self.edges.insert(slot, EdgeEntry { source: s, target: t, payload });

        // Update the local tables of both endpoints
        self.entry_mut(s)?.edges.insert((Direction::Outgoing, t), slot);
        self.entry_mut(t)?.edges.insert((Direction::Incoming, s), slot);

        Ok(EdgeRef::new(self.id, slot))
    }

    fn remove_vertex(&mut self, v: VertexRef) -> Result<V> {
        let slot = self.vertex_slot(v)?;

        // Snapshot the touching edges before mutating any table
        let mut touching: Vec<u64> = self.entry_mut(slot)?.edges.values().copied().collect();
        touching.sort_unstable();
        touching.dedup();

        for edge in &touching {
            self.detach_edge(*edge);
        }

        let entry = self
            .vertices
            .remove(&slot)
            .ok_or_else(|| Error::InvalidVertex(format!("{v} does not exist")))?;
        self.index.remove(&entry.element.key());

        debug!(vertex = %v, edges_removed = touching.len(), "removed vertex");
        Ok(entry.element)
    }

    fn remove_edge(&mut self, e: EdgeRef) -> Result<E> {
        let slot = self.edge_slot(e)?;
        self.detach_edge(slot)
            .map(|edge| edge.payload)
            .ok_or_else(|| Error::InvalidEdge(format!("{e} does not exist")))
    }

    fn replace_vertex_element(&mut self, v: VertexRef, element: V) -> Result<V> {
        let slot = self.vertex_slot(v)?;
        let new_key = element.key();
        let old_key = self.entry_mut(slot)?.element.key();

        if new_key != old_key {
            if self.index.contains_key(&new_key) {
                return Err(Error::DuplicateVertex(format!("{new_key:?}")));
            }
            self.index.remove(&old_key);
            self.index.insert(new_key, slot);
        }

        Ok(std::mem::replace(&mut self.entry_mut(slot)?.element, element))
    }

    fn replace_edge_payload(&mut self, e: EdgeRef, payload: E) -> Result<E> {
        let slot = self.edge_slot(e)?;
        let edge = self
            .edges
            .get_mut(&slot)
            .ok_or_else(|| Error::InvalidEdge(format!("{e} does not exist")))?;
        Ok(std::mem::replace(&mut edge.payload, payload))
    }
}

// ============================================================================
// Tests
// ============================================================================
