pub mod common;
pub mod error;
pub mod pathfinding;
pub mod community;
pub mod overlap;
pub mod topology;

pub use common::{GraphKind, GraphView, NodeId};
pub use error::{AlgoError, AlgoResult};
pub use pathfinding::{
    bfs, bfs_distances, bfs_distances_observed, DistanceLabeling, FrontierObserver,
    FrontierSnapshot, PathResult, SilentObserver,
};
pub use community::{connected_components, weakly_connected_components, ComponentAssignment};
pub use overlap::{mutual_friends, recommend, OverlapMatrix, OverlapStorage, Recommendation};
pub use topology::{count_triangles, triangle_counts, Clustering, TriangleCounts};
