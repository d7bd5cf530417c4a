//! In-memory graph storage implementation
//!
//! The store is the only mutable piece of the system. Algorithms borrow it
//! immutably and work on a projection built by `crate::algo::build_view`.

use super::types::{GraphKind, NodeId};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Invalid edge: self-loop on {0}")]
    SelfLoop(NodeId),

    #[error("Name '{0}' is already taken by another node")]
    DuplicateName(String),

    #[error("No free node identifier left")]
    NoFreeId,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - adjacency: NodeId -> neighbor set (out-neighbors when directed)
/// - edges: every edge once, in insertion order
/// - names / name_index: optional display names, unique per graph
#[derive(Debug, Clone)]
pub struct GraphStore {
    kind: GraphKind,
    adjacency: IndexMap<NodeId, IndexSet<NodeId>>,
    edges: Vec<(NodeId, NodeId)>,
    names: HashMap<NodeId, String>,
    name_index: HashMap<String, NodeId>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new(kind: GraphKind) -> Self {
        GraphStore {
            kind,
            adjacency: IndexMap::new(),
            edges: Vec::new(),
            names: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// Build a store from an edge list, creating endpoints on first sight
    pub fn from_edges<I>(kind: GraphKind, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut store = Self::new(kind);
        for (a, b) in edges {
            let (a, b) = (NodeId::new(a), NodeId::new(b));
            store.ensure_node(a);
            store.ensure_node(b);
            store.add_edge(a, b)?;
        }
        Ok(store)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Add a node with an explicit identifier
    pub fn add_node(&mut self, id: NodeId) -> GraphResult<()> {
        if self.adjacency.contains_key(&id) {
            return Err(GraphError::NodeAlreadyExists(id));
        }
        self.adjacency.insert(id, IndexSet::new());
        Ok(())
    }

    /// Add a node unless it already exists
    pub fn ensure_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Node carrying `name`, created with the next free identifier if missing
    pub fn add_named_node(&mut self, name: &str) -> GraphResult<NodeId> {
        if let Some(&id) = self.name_index.get(name) {
            return Ok(id);
        }
        let id = self.next_free_id().ok_or(GraphError::NoFreeId)?;
        self.add_node(id)?;
        self.names.insert(id, name.to_string());
        self.name_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Attach a display name to an existing node
    pub fn set_name(&mut self, id: NodeId, name: &str) -> GraphResult<()> {
        if !self.adjacency.contains_key(&id) {
            return Err(GraphError::NodeNotFound(id));
        }
        match self.name_index.get(name) {
            Some(&owner) if owner == id => return Ok(()),
            Some(_) => return Err(GraphError::DuplicateName(name.to_string())),
            None => {}
        }
        if let Some(old) = self.names.insert(id, name.to_string()) {
            self.name_index.remove(&old);
        }
        self.name_index.insert(name.to_string(), id);
        Ok(())
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Add an edge between existing nodes.
    ///
    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<bool> {
        if !self.adjacency.contains_key(&source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.adjacency.contains_key(&target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }

        let inserted = self
            .adjacency
            .get_mut(&source)
            .map(|neighbors| neighbors.insert(target))
            .unwrap_or(false);
        if !inserted {
            return Ok(false);
        }
        if self.kind == GraphKind::Undirected {
            if let Some(neighbors) = self.adjacency.get_mut(&target) {
                neighbors.insert(source);
            }
        }
        self.edges.push((source, target));
        Ok(true)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbors in insertion order (out-neighbors for directed graphs)
    pub fn neighbors(&self, id: NodeId) -> GraphResult<Vec<NodeId>> {
        self.adjacency
            .get(&id)
            .map(|neighbors| neighbors.iter().copied().collect())
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub fn degree(&self, id: NodeId) -> GraphResult<usize> {
        self.adjacency
            .get(&id)
            .map(IndexSet::len)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// `true` when `b` is a neighbor of `a`; unknown nodes are never connected
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .map(|neighbors| neighbors.contains(&b))
            .unwrap_or(false)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node identifiers in insertion order
    pub fn nodes(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    /// Every edge once, in insertion order
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Name when present, numeric identifier otherwise
    pub fn display_name(&self, id: NodeId) -> String {
        self.name_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.as_u64().to_string())
    }

    /// One past the largest identifier, or the smallest unused one once the
    /// top of the range is taken
    fn next_free_id(&self) -> Option<NodeId> {
        let next = match self.adjacency.keys().map(NodeId::as_u64).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        if let Some(id) = next.map(NodeId::new) {
            return Some(id);
        }
        // At most node_count ids are taken, so the scan stops within node_count + 1 steps
        (0..=u64::MAX)
            .map(NodeId::new)
            .find(|id| !self.adjacency.contains_key(id))
    }
}
