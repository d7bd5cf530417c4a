//! Mutual-friend overlap between every pair of nodes
//!
//! For each node, every ordered pair of its neighbors gains one shared
//! neighbor. Work is O(sum of degree^2) and the dense matrix is O(n^2) memory;
//! `OverlapStorage::Sparse` keeps only non-zero pairs for larger graphs.

use super::common::{GraphView, NodeId};
use super::error::{AlgoError, AlgoResult};
use ndarray::Array2;
use rustc_hash::FxHashMap;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backing store for overlap counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverlapStorage {
    /// n x n array
    #[default]
    Dense,
    /// Map of index pairs with a non-zero count
    Sparse,
}

#[derive(Debug, Clone)]
enum OverlapCells {
    Dense(Array2<u32>),
    Sparse(FxHashMap<(usize, usize), u32>),
}

/// Symmetric matrix of shared-neighbor counts.
///
/// The diagonal holds no value: a node is not its own mutual friend.
#[derive(Debug, Clone)]
pub struct OverlapMatrix {
    index_to_node: Vec<NodeId>,
    node_to_index: HashMap<NodeId, usize>,
    cells: OverlapCells,
}

impl OverlapMatrix {
    pub fn storage(&self) -> OverlapStorage {
        match self.cells {
            OverlapCells::Dense(_) => OverlapStorage::Dense,
            OverlapCells::Sparse(_) => OverlapStorage::Sparse,
        }
    }

    pub fn node_count(&self) -> usize {
        self.index_to_node.len()
    }

    /// Row and column labels, in dense index order
    pub fn nodes(&self) -> &[NodeId] {
        &self.index_to_node
    }

    fn index_of(&self, node: NodeId) -> AlgoResult<usize> {
        self.node_to_index
            .get(&node)
            .copied()
            .ok_or(AlgoError::UnknownNode(node))
    }

    fn cell(&self, i: usize, j: usize) -> Option<u32> {
        if i == j {
            return None;
        }
        Some(match &self.cells {
            OverlapCells::Dense(matrix) => matrix[[i, j]],
            OverlapCells::Sparse(map) => map.get(&(i, j)).copied().unwrap_or(0),
        })
    }

    /// Number of neighbors shared by `a` and `b`; `None` when `a == b`
    pub fn overlap(&self, a: NodeId, b: NodeId) -> AlgoResult<Option<u32>> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Ok(self.cell(i, j))
    }

    /// Off-diagonal entries of `node`'s row, in dense index order
    pub fn row(&self, node: NodeId) -> AlgoResult<Vec<(NodeId, u32)>> {
        let i = self.index_of(node)?;
        Ok((0..self.node_count())
            .filter_map(|j| self.cell(i, j).map(|count| (self.index_to_node[j], count)))
            .collect())
    }
}

/// Count mutual friends for every pair of nodes in an undirected graph
pub fn mutual_friends(view: &GraphView, storage: OverlapStorage) -> AlgoResult<OverlapMatrix> {
    view.require_undirected("mutual_friends")?;

    let n = view.node_count;
    let mut cells = match storage {
        OverlapStorage::Dense => OverlapCells::Dense(Array2::zeros((n, n))),
        OverlapStorage::Sparse => OverlapCells::Sparse(FxHashMap::default()),
    };

    for v in 0..n {
        let friends = view.neighbors(v);
        for &i in friends {
            for &j in friends {
                if i == j {
                    continue;
                }
                match &mut cells {
                    OverlapCells::Dense(matrix) => matrix[[i, j]] += 1,
                    OverlapCells::Sparse(map) => *map.entry((i, j)).or_insert(0) += 1,
                }
            }
        }
    }

    debug!(nodes = n, ?storage, "mutual friend matrix built");
    Ok(OverlapMatrix {
        index_to_node: view.index_to_node.clone(),
        node_to_index: view.node_to_index.clone(),
        cells,
    })
}

/// Outcome of a recommendation query
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Recommendation {
    /// Every node tied for the highest overlap, ascending
    Nodes { overlap: u32, nodes: BTreeSet<NodeId> },
    /// The row has no positive overlap
    NoRecommendation,
}

/// Nodes sharing the most neighbors with `node`
pub fn recommend(matrix: &OverlapMatrix, node: NodeId) -> AlgoResult<Recommendation> {
    let row = matrix.row(node)?;
    let best = row.iter().map(|&(_, count)| count).max().unwrap_or(0);
    if best == 0 {
        return Ok(Recommendation::NoRecommendation);
    }

    let nodes = row
        .into_iter()
        .filter(|&(_, count)| count == best)
        .map(|(candidate, _)| candidate)
        .collect();
    Ok(Recommendation::Nodes {
        overlap: best,
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_graphs::{directed, undirected};

    fn friendship_graph() -> GraphView {
        undirected(
            9,
            &[(1, 2), (1, 3), (1, 4), (2, 5), (3, 5), (4, 5), (5, 6), (5, 7), (7, 8), (7, 9)],
        )
    }

    #[test]
    fn test_mutual_friend_counts() {
        let matrix = mutual_friends(&friendship_graph(), OverlapStorage::Dense).unwrap();

        assert_eq!(matrix.overlap(1, 5).unwrap(), Some(3));
        assert_eq!(matrix.overlap(2, 3).unwrap(), Some(2));
        assert_eq!(matrix.overlap(6, 7).unwrap(), Some(1));
        assert_eq!(matrix.overlap(1, 6).unwrap(), Some(0));
        assert_eq!(matrix.overlap(4, 4).unwrap(), None);
    }

    #[test]
    fn test_recommend() {
        let matrix = mutual_friends(&friendship_graph(), OverlapStorage::Dense).unwrap();
        let expected = Recommendation::Nodes {
            overlap: 3,
            nodes: BTreeSet::from([5]),
        };
        assert_eq!(recommend(&matrix, 1).unwrap(), expected);
    }

    #[test]
    fn test_recommend_returns_all_ties() {
        let matrix = mutual_friends(&friendship_graph(), OverlapStorage::Dense).unwrap();
        // 8 and 9 share 7; 5 shares 7 with both
        let expected = Recommendation::Nodes {
            overlap: 1,
            nodes: BTreeSet::from([5, 9]),
        };
        assert_eq!(recommend(&matrix, 8).unwrap(), expected);
    }

    #[test]
    fn test_no_recommendation() {
        let view = undirected(3, &[(1, 2)]);
        let matrix = mutual_friends(&view, OverlapStorage::Dense).unwrap();

        assert_eq!(recommend(&matrix, 1).unwrap(), Recommendation::NoRecommendation);
        assert_eq!(recommend(&matrix, 3).unwrap(), Recommendation::NoRecommendation);
    }

    #[test]
    fn test_single_node_has_no_recommendation() {
        let matrix = mutual_friends(&undirected(1, &[]), OverlapStorage::Dense).unwrap();
        assert!(matrix.row(1).unwrap().is_empty());
        assert_eq!(recommend(&matrix, 1).unwrap(), Recommendation::NoRecommendation);
    }

    #[test]
    fn test_unknown_node() {
        let matrix = mutual_friends(&friendship_graph(), OverlapStorage::Dense).unwrap();
        assert_eq!(recommend(&matrix, 99), Err(AlgoError::UnknownNode(99)));
        assert_eq!(matrix.overlap(1, 99), Err(AlgoError::UnknownNode(99)));
    }

    #[test]
    fn test_sparse_matches_dense() {
        let view = friendship_graph();
        let dense = mutual_friends(&view, OverlapStorage::Dense).unwrap();
        let sparse = mutual_friends(&view, OverlapStorage::Sparse).unwrap();
        assert_eq!(sparse.storage(), OverlapStorage::Sparse);

        for &node in view.nodes() {
            assert_eq!(dense.row(node).unwrap(), sparse.row(node).unwrap());
        }
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let view = friendship_graph();
        let matrix = mutual_friends(&view, OverlapStorage::Sparse).unwrap();
        for &a in view.nodes() {
            for &b in view.nodes() {
                assert_eq!(matrix.overlap(a, b).unwrap(), matrix.overlap(b, a).unwrap());
            }
        }
    }

    #[test]
    fn test_rejects_directed() {
        let err = mutual_friends(&directed(2, &[(1, 2)]), OverlapStorage::Dense).unwrap_err();
        assert_eq!(
            err,
            AlgoError::InvalidGraphKind {
                operation: "mutual_friends"
            }
        );
    }
}
