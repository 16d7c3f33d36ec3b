//! # social-graph — Directed Social Relationship Graph
//!
//! Builds a directed graph over users whose edges are classified by declared
//! relationships and shared interests, and answers shortest-path and
//! statistics queries over it.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Digraph` is the contract between builders/statistics and storage
//! 2. **Clean DTOs**: `User`, `Interest`, `Relationship` cross all boundaries
//! 3. **Classification is a pure function**: `classify()` owns no state
//! 4. **Explicit sinks**: activity events go to an `EventSink` passed in, never a global
//!
//! ## Quick Start
//!
//! ```rust
//! use social_graph::{Dataset, Interest, InterestId, SocialNetwork, UserId};
//!
//! # fn example() -> social_graph::Result<()> {
//! let dataset = Dataset::new()
//!     .with_user(UserId(1), "Ana")
//!     .with_user(UserId(2), "Rui")
//!     .with_user(UserId(3), "Eva")
//!     .with_relation(UserId(1), UserId(2))
//!     .with_relation(UserId(2), UserId(3))
//!     .with_interest(Interest::new(InterestId(1), "chess").with_members([UserId(1), UserId(2)]));
//!
//! let mut network = SocialNetwork::new(dataset);
//! network.build_total()?;
//!
//! let route = network.shortest_path(UserId(1), UserId(3))?;
//! assert_eq!(route.cost, 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Construction Strategies
//!
//! | Strategy | Entry point | Description |
//! |----------|-------------|-------------|
//! | Total | `builder::build_total` | Every user, every declared relation, one pass |
//! | Iterative | `builder::expand_from` | Grow one hop at a time from a seed user |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod classify;
pub mod dataset;
pub mod builder;
pub mod events;
pub mod stats;
pub mod snapshot;
pub mod network;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    User, UserId, Tag,
    Interest, InterestId, InterestSet,
    Relationship, RelationshipKind, Keyed,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{Digraph, DirectGraph, VertexRef, EdgeRef, Path};

// ============================================================================
// Re-exports: Network
// ============================================================================

pub use classify::{classify, admits};
pub use dataset::Dataset;
pub use events::{EventSink, NetworkEvent, NoopSink, MemorySink, TracingSink};
pub use network::{SocialNetwork, SharedNetwork, Route};
pub use snapshot::{snapshot, restore, History};
pub use config::NetworkConfig;

/// The graph type every builder produces.
pub type SocialGraph = DirectGraph<User, Relationship>;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid vertex: {0}")]
    InvalidVertex(String),

    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    #[error("Duplicate vertex: {0}")]
    DuplicateVertex(String),

    #[error("No path exists from {from} to {to}")]
    NoPathExists { from: String, to: String },

    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid dataset: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// `NoPathExists` is an expected outcome on a disconnected graph, not a
    /// contract violation.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Error::NoPathExists { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
