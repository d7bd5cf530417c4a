//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use super::error::{AlgoError, AlgoResult};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Whether edges are symmetric or point one way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GraphKind {
    Directed,
    Undirected,
}

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// For undirected graphs every edge is stored in both directions, so `successors`
/// and `predecessors` return the same slice contents.
/// Neighbor slices are sorted and free of duplicates.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Directed or undirected
    pub kind: GraphKind,
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Neighbors used by traversal: out-neighbors for directed graphs,
    /// all adjacent nodes for undirected ones
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        self.successors(idx)
    }

    /// Number of traversal neighbors
    pub fn degree(&self, idx: usize) -> usize {
        self.out_degree(idx)
    }

    /// Adjacency test on dense indices (binary search over the sorted row)
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.successors(a).binary_search(&b).is_ok()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Node identifiers in dense index order
    pub fn nodes(&self) -> &[NodeId] {
        &self.index_to_node
    }

    /// Total number of edges (undirected edges counted once)
    pub fn edge_count(&self) -> usize {
        match self.kind {
            GraphKind::Directed => self.out_targets.len(),
            GraphKind::Undirected => self.out_targets.len() / 2,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Resolve a NodeId to its dense index
    pub fn index_of(&self, node: NodeId) -> AlgoResult<usize> {
        self.node_to_index
            .get(&node)
            .copied()
            .ok_or(AlgoError::UnknownNode(node))
    }

    /// Fail fast when an undirected-only algorithm is handed a directed graph
    pub fn require_undirected(&self, operation: &'static str) -> AlgoResult<()> {
        if self.is_directed() {
            Err(AlgoError::InvalidGraphKind { operation })
        } else {
            Ok(())
        }
    }

    /// Dense indices ordered by ascending NodeId
    pub fn indices_by_node_id(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.node_count).collect();
        order.sort_unstable_by_key(|&idx| self.index_to_node[idx]);
        order
    }

    /// Build a view from explicit node and edge lists.
    ///
    /// Every edge endpoint must appear in `nodes`. Repeated nodes and edges are
    /// collapsed; self-loops are rejected.
    pub fn from_edges(
        kind: GraphKind,
        nodes: &[NodeId],
        edges: &[(NodeId, NodeId)],
    ) -> AlgoResult<Self> {
        let mut index_to_node = Vec::with_capacity(nodes.len());
        let mut node_to_index = HashMap::with_capacity(nodes.len());
        for &node in nodes {
            node_to_index.entry(node).or_insert_with(|| {
                index_to_node.push(node);
                index_to_node.len() - 1
            });
        }

        let mut outgoing = vec![Vec::new(); index_to_node.len()];
        for &(a, b) in edges {
            if a == b {
                return Err(AlgoError::SelfLoop(a));
            }
            let a_idx = *node_to_index.get(&a).ok_or(AlgoError::UnknownNode(a))?;
            let b_idx = *node_to_index.get(&b).ok_or(AlgoError::UnknownNode(b))?;
            outgoing[a_idx].push(b_idx);
        }

        Ok(Self::from_adjacency_list(kind, index_to_node, outgoing))
    }

    /// Helper to create GraphView from adjacency lists indexed by dense index.
    ///
    /// Undirected inputs are symmetrized, so each edge may be listed from either end.
    pub fn from_adjacency_list(
        kind: GraphKind,
        index_to_node: Vec<NodeId>,
        mut outgoing: Vec<Vec<usize>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        if kind == GraphKind::Undirected {
            let forward: Vec<(usize, usize)> = outgoing
                .iter()
                .enumerate()
                .flat_map(|(u, targets)| targets.iter().map(move |&v| (u, v)))
                .collect();
            for (u, v) in forward {
                outgoing[v].push(u);
            }
        }

        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for row in outgoing.iter_mut() {
            row.sort_unstable();
            row.dedup();
        }
        for (u, targets) in outgoing.iter().enumerate() {
            for &v in targets {
                incoming[v].push(u);
            }
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        // Sources were pushed in ascending u order, so rows are already sorted
        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            kind,
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }
}
