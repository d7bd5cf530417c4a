//! Community detection algorithms
//!
//! Connected components by repeated BFS, plus a union-find variant that
//! ignores edge direction. Both number components densely from 1, in the
//! order of their lowest node identifier.

use super::common::{GraphView, NodeId};
use super::error::AlgoResult;
use super::pathfinding::{expand_frontiers, SilentObserver};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Partition of every node into labeled components
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComponentAssignment {
    /// Map of Component ID -> sorted list of NodeIds
    pub components: BTreeMap<usize, Vec<NodeId>>,
    /// Map of NodeId -> Component ID
    pub node_component: HashMap<NodeId, usize>,
}

impl ComponentAssignment {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component_of(&self, node: NodeId) -> Option<usize> {
        self.node_component.get(&node).copied()
    }

    pub fn members(&self, label: usize) -> Option<&[NodeId]> {
        self.components.get(&label).map(Vec::as_slice)
    }

    pub fn same_component(&self, a: NodeId, b: NodeId) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Partition as sorted member lists, independent of label numbering
    pub fn partition(&self) -> Vec<Vec<NodeId>> {
        let mut groups: Vec<Vec<NodeId>> = self.components.values().cloned().collect();
        groups.sort();
        groups
    }

    fn from_dense_labels(view: &GraphView, labels: &[usize]) -> Self {
        let mut components: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        let mut node_component = HashMap::with_capacity(view.node_count);

        for (idx, &label) in labels.iter().enumerate() {
            let node_id = view.index_to_node[idx];
            components.entry(label).or_default().push(node_id);
            node_component.insert(node_id, label);
        }
        for members in components.values_mut() {
            members.sort_unstable();
        }

        ComponentAssignment {
            components,
            node_component,
        }
    }
}

/// Connected components of an undirected graph.
///
/// Sources are taken in ascending NodeId order among unassigned nodes, so the
/// component holding the smallest identifier is always labeled 1.
pub fn connected_components(view: &GraphView) -> AlgoResult<ComponentAssignment> {
    view.require_undirected("connected_components")?;

    const UNASSIGNED: usize = 0;
    let mut labels = vec![UNASSIGNED; view.node_count];
    let mut next_label = 1;

    for source_idx in view.indices_by_node_id() {
        if labels[source_idx] != UNASSIGNED {
            continue;
        }
        let traversal = expand_frontiers(view, source_idx, &mut SilentObserver);
        for (idx, distance) in traversal.labels.iter().enumerate() {
            if distance.is_some() {
                labels[idx] = next_label;
            }
        }
        next_label += 1;
    }

    debug!(
        nodes = view.node_count,
        components = next_label - 1,
        "connected components labeled"
    );
    Ok(ComponentAssignment::from_dense_labels(view, &labels))
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut curr = i;
        while self.parent[curr] != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            curr = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction, so it also accepts directed graphs.
pub fn weakly_connected_components(view: &GraphView) -> ComponentAssignment {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    // Iterate all edges and Union connected nodes
    for u_idx in 0..n {
        for &v_idx in view.successors(u_idx) {
            uf.union(u_idx, v_idx);
        }
    }

    // Number roots in order of their lowest member
    let mut root_label: HashMap<usize, usize> = HashMap::new();
    let mut labels = vec![0; n];
    for idx in view.indices_by_node_id() {
        let root = uf.find(idx);
        let next = root_label.len() + 1;
        labels[idx] = *root_label.entry(root).or_insert(next);
    }

    debug!(
        nodes = n,
        components = root_label.len(),
        "weakly connected components labeled"
    );
    ComponentAssignment::from_dense_labels(view, &labels)
}
