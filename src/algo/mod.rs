//! Graph algorithms module
//!
//! Algorithms are implemented in `friendgraph-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! `GraphStore` into a `GraphView` and validates inputs before any work.

pub mod observer;

use crate::graph::{GraphStore, NodeId};
use friendgraph_algorithms as algorithms;
use friendgraph_algorithms::{AlgoError, AlgoResult, FrontierObserver, GraphView};
use std::collections::HashMap;

pub use observer::TracingObserver;

// Re-export algorithm types
pub use friendgraph_algorithms::{
    Clustering, ComponentAssignment, DistanceLabeling, FrontierSnapshot, OverlapMatrix,
    OverlapStorage, PathResult, Recommendation, TriangleCounts,
};

/// Build a GraphView from the store for algorithm execution.
///
/// Dense indices follow the store's node insertion order.
pub fn build_view(store: &GraphStore) -> GraphView {
    let index_to_node: Vec<u64> = store.nodes().iter().map(NodeId::as_u64).collect();
    let node_to_index: HashMap<u64, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); index_to_node.len()];
    for &(source, target) in store.edges() {
        // Edges only reference stored nodes
        if let (Some(&u), Some(&v)) = (
            node_to_index.get(&source.as_u64()),
            node_to_index.get(&target.as_u64()),
        ) {
            outgoing[u].push(v);
        }
    }

    GraphView::from_adjacency_list(store.kind(), index_to_node, outgoing)
}

fn require_undirected(store: &GraphStore, operation: &'static str) -> AlgoResult<()> {
    if store.is_directed() {
        Err(AlgoError::InvalidGraphKind { operation })
    } else {
        Ok(())
    }
}

fn require_node(store: &GraphStore, node: NodeId) -> AlgoResult<()> {
    if store.contains_node(node) {
        Ok(())
    } else {
        Err(AlgoError::UnknownNode(node.as_u64()))
    }
}

/// Hop distances from `source` to every node
pub fn shortest_path_distances(store: &GraphStore, source: NodeId) -> AlgoResult<DistanceLabeling> {
    require_node(store, source)?;
    algorithms::bfs_distances(&build_view(store), source.as_u64())
}

/// Hop distances, reporting each frontier to `observer`
pub fn shortest_path_distances_observed<O>(
    store: &GraphStore,
    source: NodeId,
    observer: &mut O,
) -> AlgoResult<DistanceLabeling>
where
    O: FrontierObserver + ?Sized,
{
    require_node(store, source)?;
    algorithms::bfs_distances_observed(&build_view(store), source.as_u64(), observer)
}

/// One shortest path from `source` to `target`; `Ok(None)` when unreachable
pub fn shortest_path(
    store: &GraphStore,
    source: NodeId,
    target: NodeId,
) -> AlgoResult<Option<PathResult>> {
    require_node(store, source)?;
    require_node(store, target)?;
    algorithms::bfs(&build_view(store), source.as_u64(), target.as_u64())
}

/// Connected components, numbered from the lowest node identifier
pub fn connected_components(store: &GraphStore) -> AlgoResult<ComponentAssignment> {
    require_undirected(store, "connected_components")?;
    algorithms::connected_components(&build_view(store))
}

/// Components ignoring edge direction; accepts directed graphs
pub fn weakly_connected_components(store: &GraphStore) -> ComponentAssignment {
    algorithms::weakly_connected_components(&build_view(store))
}

/// Shared-neighbor counts for every node pair
pub fn mutual_friends(store: &GraphStore, storage: OverlapStorage) -> AlgoResult<OverlapMatrix> {
    require_undirected(store, "mutual_friends")?;
    algorithms::mutual_friends(&build_view(store), storage)
}

/// Nodes sharing the most neighbors with `node`
pub fn recommend(matrix: &OverlapMatrix, node: NodeId) -> AlgoResult<Recommendation> {
    algorithms::recommend(matrix, node.as_u64())
}

/// Per-node triangle counts and the global clustering coefficient
pub fn triangle_counts(store: &GraphStore) -> AlgoResult<TriangleCounts> {
    require_undirected(store, "triangle_counts")?;
    algorithms::triangle_counts(&build_view(store))
}
