//! Frontier observers for progress logging

use friendgraph_algorithms::{FrontierObserver, FrontierSnapshot, NodeId};
use tracing::debug;

/// Logs every BFS frontier at debug level
#[derive(Debug, Default)]
pub struct TracingObserver {
    rounds: usize,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots received so far
    pub fn rounds_observed(&self) -> usize {
        self.rounds
    }
}

impl FrontierObserver for TracingObserver {
    fn on_frontier(&mut self, snapshot: &FrontierSnapshot<'_>) {
        self.rounds += 1;
        let mut frontier: Vec<NodeId> = snapshot.frontier().collect();
        frontier.sort_unstable();
        debug!(
            round = snapshot.round(),
            labeled = snapshot.labeled_count(),
            frontier = ?frontier,
            "bfs frontier"
        );
    }
}
