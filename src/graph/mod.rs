//! Graph data model
//!
//! - Directed or undirected graphs over `u64` node identifiers
//! - Edges form a set: no parallel edges, no self-loops
//! - Optional unique display names per node
//! - Edge list reader for loading graphs from text

pub mod edge_list;
pub mod store;
pub mod types;

// Re-export main types
pub use edge_list::{parse_edge_list, read_edge_list, EdgeListError, EdgeListResult};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{GraphKind, NodeId};
