//! Friendgraph
//!
//! Unweighted graph analytics over a static, in-memory graph:
//!
//! - Single-source BFS distances, with an optional per-frontier observer
//! - Connected components, labeled deterministically from the lowest node id
//! - Mutual-friend overlap between all node pairs, with recommendations
//! - Per-node triangle counts and the global clustering coefficient
//!
//! Graphs live in a [`GraphStore`]. Every algorithm borrows the store
//! immutably, so one store can be shared by concurrent readers.
//!
//! ## Example Usage
//!
//! ```rust
//! use friendgraph::graph::{GraphKind, GraphStore, NodeId};
//! use friendgraph::algo;
//!
//! let store = GraphStore::from_edges(GraphKind::Undirected, [(1, 2), (2, 3), (4, 5)]).unwrap();
//!
//! let distances = algo::shortest_path_distances(&store, NodeId::new(1)).unwrap();
//! assert_eq!(distances.distance(3), Some(2));
//! assert_eq!(distances.distance(4), None);
//!
//! let components = algo::connected_components(&store).unwrap();
//! assert_eq!(components.component_count(), 2);
//! ```

pub mod algo;
pub mod config;
pub mod graph;

pub use algo::TracingObserver;
pub use config::{AnalysisConfig, ConfigError};
pub use friendgraph_algorithms::{AlgoError, AlgoResult};
pub use graph::{GraphError, GraphKind, GraphStore, NodeId};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
