//! Error types for graph algorithms

use super::common::NodeId;
use thiserror::Error;

/// Errors raised before an algorithm starts doing any work
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgoError {
    /// Referenced node is not part of the graph
    #[error("Node {0} not found in graph")]
    UnknownNode(NodeId),

    /// An undirected-only algorithm was given a directed graph
    #[error("{operation} requires an undirected graph")]
    InvalidGraphKind { operation: &'static str },

    /// Edge from a node to itself
    #[error("Self-loop on node {0} is not supported")]
    SelfLoop(NodeId),
}

pub type AlgoResult<T> = Result<T, AlgoError>;
