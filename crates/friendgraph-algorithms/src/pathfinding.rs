//! Pathfinding algorithms
//!
//! Level-synchronous BFS: every round expands the whole current frontier and
//! labels each newly discovered node with `round + 1`. Both single-source
//! distances and component labeling run on this engine.

use super::common::{GraphView, NodeId};
use super::error::AlgoResult;
use std::collections::HashMap;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Read-only picture of a traversal taken right after a frontier is built.
///
/// Round 0 holds just the source; the last snapshot of every run has an
/// empty frontier.
pub struct FrontierSnapshot<'a> {
    view: &'a GraphView,
    round: usize,
    labels: &'a [Option<usize>],
    frontier: &'a [usize],
}

impl<'a> FrontierSnapshot<'a> {
    /// Distance shared by every node in the frontier
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn frontier(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frontier.iter().map(|&idx| self.view.index_to_node[idx])
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_final(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Label assigned so far; `None` for unknown or not yet reached nodes
    pub fn distance(&self, node: NodeId) -> Option<usize> {
        let idx = *self.view.node_to_index.get(&node)?;
        self.labels[idx]
    }

    /// All `(node, distance)` pairs labeled so far, in dense index order
    pub fn labeled(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(idx, label)| label.map(|d| (self.view.index_to_node[idx], d)))
    }

    pub fn labeled_count(&self) -> usize {
        self.labels.iter().filter(|label| label.is_some()).count()
    }
}

/// Receives one snapshot per frontier. Observers only see immutable state and
/// cannot influence the traversal.
pub trait FrontierObserver {
    fn on_frontier(&mut self, snapshot: &FrontierSnapshot<'_>);
}

/// Observer that ignores every snapshot
pub struct SilentObserver;

impl FrontierObserver for SilentObserver {
    fn on_frontier(&mut self, _snapshot: &FrontierSnapshot<'_>) {}
}

/// Working state of one traversal, indexed by dense node index
pub(crate) struct Traversal {
    pub labels: Vec<Option<usize>>,
    pub parents: Vec<Option<usize>>,
    pub eccentricity: usize,
}

/// Frontier expansion from `source_idx` until no new node is discovered.
///
/// A node reachable from several frontier members is labeled by the first one
/// seen; all members share a distance, so the label is the same either way.
pub(crate) fn expand_frontiers<O>(view: &GraphView, source_idx: usize, observer: &mut O) -> Traversal
where
    O: FrontierObserver + ?Sized,
{
    let mut labels = vec![None; view.node_count];
    let mut parents = vec![None; view.node_count];
    labels[source_idx] = Some(0);

    let mut frontier = vec![source_idx];
    let mut round = 0;
    observer.on_frontier(&FrontierSnapshot {
        view,
        round,
        labels: &labels,
        frontier: &frontier,
    });

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &u in &frontier {
            for &v in view.neighbors(u) {
                if labels[v].is_none() {
                    labels[v] = Some(round + 1);
                    parents[v] = Some(u);
                    next.push(v);
                }
            }
        }
        round += 1;
        trace!(round, discovered = next.len(), "frontier expanded");

        frontier = next;
        observer.on_frontier(&FrontierSnapshot {
            view,
            round,
            labels: &labels,
            frontier: &frontier,
        });
    }

    Traversal {
        labels,
        parents,
        // The last round always produces the empty frontier
        eccentricity: round - 1,
    }
}

/// Distances from one source to every node of the graph
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DistanceLabeling {
    pub source: NodeId,
    /// NodeId -> hop count, `None` when the node is unreachable
    pub distances: HashMap<NodeId, Option<usize>>,
    /// Largest finite distance
    pub eccentricity: usize,
}

impl DistanceLabeling {
    pub fn distance(&self, node: NodeId) -> Option<usize> {
        self.distances.get(&node).copied().flatten()
    }

    pub fn is_reached(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }

    pub fn reached_count(&self) -> usize {
        self.distances.values().filter(|d| d.is_some()).count()
    }

    /// Unreachable nodes, ascending
    pub fn unreached(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .distances
            .iter()
            .filter(|(_, d)| d.is_none())
            .map(|(&node, _)| node)
            .collect();
        nodes.sort_unstable();
        nodes
    }

    /// Reached nodes grouped by distance; `layers()[d]` holds the nodes at distance `d`, ascending
    pub fn layers(&self) -> Vec<Vec<NodeId>> {
        let mut layers = vec![Vec::new(); self.eccentricity + 1];
        for (&node, distance) in &self.distances {
            if let Some(d) = distance {
                layers[*d].push(node);
            }
        }
        for layer in layers.iter_mut() {
            layer.sort_unstable();
        }
        layers
    }
}

/// Single-source shortest path distances (unweighted)
pub fn bfs_distances(view: &GraphView, source: NodeId) -> AlgoResult<DistanceLabeling> {
    bfs_distances_observed(view, source, &mut SilentObserver)
}

/// Single-source distances, reporting every frontier to `observer`
pub fn bfs_distances_observed<O>(
    view: &GraphView,
    source: NodeId,
    observer: &mut O,
) -> AlgoResult<DistanceLabeling>
where
    O: FrontierObserver + ?Sized,
{
    let source_idx = view.index_of(source)?;
    let traversal = expand_frontiers(view, source_idx, observer);

    let distances: HashMap<NodeId, Option<usize>> = traversal
        .labels
        .iter()
        .enumerate()
        .map(|(idx, &label)| (view.index_to_node[idx], label))
        .collect();

    debug!(
        source,
        nodes = view.node_count,
        eccentricity = traversal.eccentricity,
        "bfs distances computed"
    );

    Ok(DistanceLabeling {
        source,
        distances,
        eccentricity: traversal.eccentricity,
    })
}

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub hops: usize,
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Unknown endpoints are an error; `Ok(None)` means the target is unreachable.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> AlgoResult<Option<PathResult>> {
    let source_idx = view.index_of(source)?;
    let target_idx = view.index_of(target)?;

    let traversal = expand_frontiers(view, source_idx, &mut SilentObserver);
    let Some(hops) = traversal.labels[target_idx] else {
        return Ok(None);
    };

    // Reconstruct path
    let mut path = Vec::with_capacity(hops + 1);
    let mut curr = Some(target_idx);
    while let Some(idx) = curr {
        path.push(view.index_to_node[idx]);
        curr = traversal.parents[idx];
    }
    path.reverse();

    Ok(Some(PathResult {
        source,
        target,
        path,
        hops,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_graphs::{directed, undirected};
    use crate::error::AlgoError;

    fn component_graph() -> GraphView {
        undirected(
            11,
            &[(1, 2), (1, 3), (2, 3), (3, 4), (4, 5), (4, 6), (7, 8), (7, 9), (8, 9), (10, 11)],
        )
    }

    #[derive(Default)]
    struct Recorder {
        rounds: Vec<(usize, Vec<NodeId>, usize)>,
    }

    impl FrontierObserver for Recorder {
        fn on_frontier(&mut self, snapshot: &FrontierSnapshot<'_>) {
            let mut frontier: Vec<NodeId> = snapshot.frontier().collect();
            frontier.sort_unstable();
            for node in &frontier {
                assert_eq!(snapshot.distance(*node), Some(snapshot.round()));
            }
            self.rounds
                .push((snapshot.round(), frontier, snapshot.labeled_count()));
        }
    }

    #[test]
    fn test_bfs_distances() {
        let view = component_graph();
        let result = bfs_distances(&view, 1).unwrap();

        assert_eq!(result.distance(1), Some(0));
        assert_eq!(result.distance(2), Some(1));
        assert_eq!(result.distance(3), Some(1));
        assert_eq!(result.distance(4), Some(2));
        assert_eq!(result.distance(5), Some(3));
        assert_eq!(result.distance(6), Some(3));
        assert_eq!(result.eccentricity, 3);
        assert_eq!(result.unreached(), vec![7, 8, 9, 10, 11]);
        assert_eq!(result.layers(), vec![vec![1], vec![2, 3], vec![4], vec![5, 6]]);
    }

    #[test]
    fn test_bfs_unknown_source() {
        let view = component_graph();
        assert_eq!(bfs_distances(&view, 42), Err(AlgoError::UnknownNode(42)));
    }

    #[test]
    fn test_isolated_source() {
        let view = undirected(3, &[(2, 3)]);
        let result = bfs_distances(&view, 1).unwrap();

        assert_eq!(result.reached_count(), 1);
        assert_eq!(result.eccentricity, 0);
        assert_eq!(result.unreached(), vec![2, 3]);
    }

    #[test]
    fn test_directed_follows_out_edges() {
        // 1->2->3, 4->1
        let view = directed(4, &[(1, 2), (2, 3), (4, 1)]);
        let result = bfs_distances(&view, 1).unwrap();

        assert_eq!(result.distance(3), Some(2));
        assert_eq!(result.distance(4), None);
    }

    #[test]
    fn test_observer_sees_every_frontier() {
        let view = component_graph();
        let mut recorder = Recorder::default();
        let observed = bfs_distances_observed(&view, 1, &mut recorder).unwrap();

        assert_eq!(
            recorder.rounds,
            vec![
                (0, vec![1], 1),
                (1, vec![2, 3], 3),
                (2, vec![4], 4),
                (3, vec![5, 6], 6),
                (4, vec![], 6),
            ]
        );
        assert_eq!(observed, bfs_distances(&view, 1).unwrap());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let view = component_graph();
        let first = bfs_distances(&view, 4).unwrap();
        let second = bfs_distances(&view, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bfs() {
        // 1->2->3
        let view = directed(3, &[(1, 2), (2, 3)]);

        let result = bfs(&view, 1, 3).unwrap().unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.hops, 2);

        assert_eq!(bfs(&view, 3, 1), Ok(None));
        assert_eq!(bfs(&view, 1, 99), Err(AlgoError::UnknownNode(99)));
        assert_eq!(bfs(&view, 99, 1), Err(AlgoError::UnknownNode(99)));
    }

    #[test]
    fn test_bfs_to_self() {
        let view = undirected(2, &[(1, 2)]);
        let result = bfs(&view, 2, 2).unwrap().unwrap();
        assert_eq!(result.path, vec![2]);
        assert_eq!(result.hops, 0);
    }
}
