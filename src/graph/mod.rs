//! # Graph Core
//!
//! `Digraph` is THE contract between the builders/statistics and graph
//! storage. Every operation the social network needs from a directed graph
//! is defined here.
//!
//! ## Implementations
//!
//! | Graph | Module | Description |
//! |-------|--------|-------------|
//! | `DirectGraph` | `direct` | Hash-indexed vertices, per-vertex edge tables |
//!
//! ## Handles
//!
//! Vertices and edges are addressed by `VertexRef` / `EdgeRef`. A handle is
//! invalid when it belongs to another graph instance or when the element it
//! named has been removed; every operation taking one fails with
//! `Error::InvalidVertex` / `Error::InvalidEdge` in that case.

pub mod handle;
pub mod direct;
pub mod path;

use crate::model::Keyed;
use crate::Result;

pub use handle::{Direction, EdgeRef, GraphId, VertexRef};
pub use direct::DirectGraph;
pub use path::Path;

// ============================================================================
// Digraph Trait
// ============================================================================

/// Directed graph over keyed vertex elements `V` with edge payloads `E`.
///
/// Not designed for interleaved access: callers that share a graph across
/// threads guard the whole value with one lock.
pub trait Digraph<V: Keyed, E> {
    // ========================================================================
    // Introspection
    // ========================================================================

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Every live vertex. No ordering is implied.
    fn vertices(&self) -> Vec<VertexRef>;

    /// Every live edge. No ordering is implied.
    fn edges(&self) -> Vec<EdgeRef>;

    /// Look up the vertex holding the element with the given identity.
    fn find_vertex(&self, key: &V::Key) -> Option<VertexRef>;

    fn element(&self, v: VertexRef) -> Result<&V>;

    fn payload(&self, e: EdgeRef) -> Result<&E>;

    /// `(source, target)` of an edge.
    fn endpoints(&self, e: EdgeRef) -> Result<(VertexRef, VertexRef)>;

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Edges leaving `v`.
    fn outbound_edges(&self, v: VertexRef) -> Result<Vec<EdgeRef>>;

    /// Edges arriving at `v`.
    fn incident_edges(&self, v: VertexRef) -> Result<Vec<EdgeRef>>;

    /// True if an edge joins `a` and `b` in either direction.
    fn are_adjacent(&self, a: VertexRef, b: VertexRef) -> Result<bool>;

    /// The endpoint of `e` that is not `v`. For a self-loop this is `v`.
    ///
    /// Default: derived from `endpoints`.
    fn opposite(&self, v: VertexRef, e: EdgeRef) -> Result<VertexRef> {
        self.element(v)?;
        let (source, target) = self.endpoints(e)?;
        if v == source {
            Ok(target)
        } else if v == target {
            Ok(source)
        } else {
            Err(crate::Error::InvalidVertex(format!("{v} is not an endpoint of {e}")))
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Fails with `DuplicateVertex` if an element with the same identity exists.
    fn insert_vertex(&mut self, element: V) -> Result<VertexRef>;

    /// Insert `source → target`. If that ordered pair is already joined,
    /// the existing edge takes the new payload and its handle is returned.
    fn insert_edge(&mut self, source: VertexRef, target: VertexRef, payload: E) -> Result<EdgeRef>;

    /// Remove `v` and every edge touching it, returning its element.
    fn remove_vertex(&mut self, v: VertexRef) -> Result<V>;

    fn remove_edge(&mut self, e: EdgeRef) -> Result<E>;

    /// Swap the element held by `v`, re-keying the identity index.
    /// Returns the previous element.
    fn replace_vertex_element(&mut self, v: VertexRef, element: V) -> Result<V>;

    /// Swap the payload held by `e`. Returns the previous payload.
    fn replace_edge_payload(&mut self, e: EdgeRef, payload: E) -> Result<E>;

    // ========================================================================
    // Queries
    // ========================================================================

    /// Unit-weight shortest path following outbound edges only.
    ///
    /// Fails with `NoPathExists` when `target` is unreachable from `origin`.
    fn shortest_path(&self, origin: VertexRef, target: VertexRef) -> Result<Path>
    where
        Self: Sized,
    {
        path::shortest_path::<Self, V, E>(self, origin, target)
    }

    /// Outbound edge count of `v`.
    fn out_degree(&self, v: VertexRef) -> Result<usize> {
        Ok(self.outbound_edges(v)?.len())
    }
}
