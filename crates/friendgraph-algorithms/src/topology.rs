//! Graph topology analysis algorithms
//!
//! Per-node triangle counts and the global clustering coefficient.

use super::common::{GraphView, NodeId};
use super::error::AlgoResult;
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Ratio of closed triples to connected triples across the graph
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Clustering {
    Defined(f64),
    /// No node has degree >= 2
    Undefined,
}

impl Clustering {
    pub fn value(&self) -> Option<f64> {
        match self {
            Clustering::Defined(c) => Some(*c),
            Clustering::Undefined => None,
        }
    }
}

/// Result of per-node triangle counting
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TriangleCounts {
    /// NodeId -> triangles the node belongs to
    pub per_node: HashMap<NodeId, usize>,
    /// NodeId -> degree, kept for local coefficients
    pub degrees: HashMap<NodeId, usize>,
    pub clustering: Clustering,
}

impl TriangleCounts {
    pub fn count(&self, node: NodeId) -> Option<usize> {
        self.per_node.get(&node).copied()
    }

    /// Distinct triangles in the graph; each one is incident to three nodes
    pub fn total(&self) -> usize {
        self.per_node.values().sum::<usize>() / 3
    }

    /// `2 * t(v) / (d(v) * (d(v) - 1))`; `None` for unknown nodes or degree < 2
    pub fn local_clustering(&self, node: NodeId) -> Option<f64> {
        let triangles = self.count(node)? as f64;
        let degree = *self.degrees.get(&node)?;
        if degree < 2 {
            return None;
        }
        let degree = degree as f64;
        Some(2.0 * triangles / (degree * (degree - 1.0)))
    }
}

/// Triangle counts for every node of an undirected graph.
///
/// For node `v`, ordered neighbor pairs `(i, j)` with `i != j` that are
/// themselves connected each close a triangle; every triangle is seen twice.
pub fn triangle_counts(view: &GraphView) -> AlgoResult<TriangleCounts> {
    view.require_undirected("triangle_counts")?;

    let mut per_node = HashMap::with_capacity(view.node_count);
    let mut degrees = HashMap::with_capacity(view.node_count);
    let mut closed: usize = 0;
    let mut possible: usize = 0;

    for v in 0..view.node_count {
        let friends = view.neighbors(v);
        let mut ordered_pairs = 0;
        for &i in friends {
            for &j in friends {
                if i != j && view.are_connected(i, j) {
                    ordered_pairs += 1;
                }
            }
        }
        let triangles = ordered_pairs / 2;
        let degree = friends.len();

        closed += triangles;
        possible += degree * degree.saturating_sub(1) / 2;
        per_node.insert(view.index_to_node[v], triangles);
        degrees.insert(view.index_to_node[v], degree);
    }

    let clustering = if possible == 0 {
        Clustering::Undefined
    } else {
        Clustering::Defined(closed as f64 / possible as f64)
    };

    debug!(nodes = view.node_count, closed, possible, "triangles counted");
    Ok(TriangleCounts {
        per_node,
        degrees,
        clustering,
    })
}

/// Triangle Counting
///
/// Returns total number of triangles in the graph, each counted once.
/// Edge direction is ignored.
pub fn count_triangles(view: &GraphView) -> usize {
    let mut triangle_count = 0;

    // For each edge (u, v), find common neighbors w. Only u < v < w is counted.
    for u in 0..view.node_count {
        let u_neighbors = undirected_neighbors(view, u);

        for &v in u_neighbors.iter().filter(|&&v| v > u) {
            let v_neighbors = undirected_neighbors(view, v);

            for &w in v_neighbors.iter().filter(|&&w| w > v) {
                if u_neighbors.binary_search(&w).is_ok() {
                    triangle_count += 1;
                }
            }
        }
    }

    triangle_count
}

fn undirected_neighbors(view: &GraphView, idx: usize) -> Vec<usize> {
    let mut neighbors: Vec<usize> = view
        .successors(idx)
        .iter()
        .chain(view.predecessors(idx))
        .copied()
        .collect();
    neighbors.sort_unstable();
    neighbors.dedup();
    neighbors
}
