use friendgraph_algorithms::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// Random undirected graph with shuffled, non-contiguous node ids
fn random_graph(rng: &mut StdRng, n: u64, p: f64) -> (Vec<NodeId>, Vec<(NodeId, NodeId)>) {
    let mut nodes: Vec<NodeId> = (0..n).map(|i| i * 7 + 3).collect();
    nodes.shuffle(rng);

    let mut edges = Vec::new();
    for a in 0..nodes.len() {
        for b in (a + 1)..nodes.len() {
            if rng.gen_bool(p) {
                edges.push((nodes[a], nodes[b]));
            }
        }
    }
    (nodes, edges)
}

fn neighbor_sets(edges: &[(NodeId, NodeId)]) -> HashMap<NodeId, HashSet<NodeId>> {
    let mut sets: HashMap<NodeId, HashSet<NodeId>> = HashMap::new();
    for &(a, b) in edges {
        sets.entry(a).or_default().insert(b);
        sets.entry(b).or_default().insert(a);
    }
    sets
}

#[test]
fn test_bfs_layers_are_consistent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let (nodes, edges) = random_graph(&mut rng, 30, 0.08);
        let view = GraphView::from_edges(GraphKind::Undirected, &nodes, &edges).unwrap();
        let source = nodes[0];
        let labeling = bfs_distances(&view, source).unwrap();

        assert_eq!(labeling.distance(source), Some(0));
        for &(a, b) in &edges {
            match (labeling.distance(a), labeling.distance(b)) {
                (Some(x), Some(y)) => assert!(x.abs_diff(y) <= 1, "edge {}-{} spans {} and {}", a, b, x, y),
                (None, None) => {}
                _ => panic!("edge {}-{} crosses the reached boundary", a, b),
            }
        }

        let adjacency = neighbor_sets(&edges);
        for &node in &nodes {
            if let Some(d) = labeling.distance(node) {
                if d > 0 {
                    let has_parent = adjacency[&node]
                        .iter()
                        .any(|n| labeling.distance(*n) == Some(d - 1));
                    assert!(has_parent, "node {} at distance {} has no parent", node, d);
                }
            }
        }
        assert!(labeling.layers().iter().all(|layer| !layer.is_empty()));
    }
}

#[test]
fn test_partition_invariant_under_relabeling() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let (nodes, edges) = random_graph(&mut rng, 25, 0.06);
        let view = GraphView::from_edges(GraphKind::Undirected, &nodes, &edges).unwrap();
        let original = connected_components(&view).unwrap();

        let mut shuffled = nodes.clone();
        shuffled.shuffle(&mut rng);
        let relabel: HashMap<NodeId, NodeId> =
            nodes.iter().copied().zip(shuffled.iter().copied()).collect();
        let restore: HashMap<NodeId, NodeId> =
            relabel.iter().map(|(&from, &to)| (to, from)).collect();

        let relabeled_edges: Vec<(NodeId, NodeId)> =
            edges.iter().map(|(a, b)| (relabel[a], relabel[b])).collect();
        let relabeled_view =
            GraphView::from_edges(GraphKind::Undirected, &shuffled, &relabeled_edges).unwrap();
        let relabeled = connected_components(&relabeled_view).unwrap();

        let mut restored: Vec<Vec<NodeId>> = relabeled
            .partition()
            .into_iter()
            .map(|group| {
                let mut group: Vec<NodeId> = group.iter().map(|n| restore[n]).collect();
                group.sort_unstable();
                group
            })
            .collect();
        restored.sort();

        assert_eq!(restored, original.partition());
    }
}

#[test]
fn test_bfs_components_agree_with_union_find() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..20 {
        let (nodes, edges) = random_graph(&mut rng, 40, 0.04);
        let view = GraphView::from_edges(GraphKind::Undirected, &nodes, &edges).unwrap();

        let by_bfs = connected_components(&view).unwrap();
        assert_eq!(by_bfs, weakly_connected_components(&view));

        let labels: HashSet<usize> = by_bfs.node_component.values().copied().collect();
        assert_eq!(labels, (1..=by_bfs.component_count()).collect::<HashSet<usize>>());
    }
}

#[test]
fn test_overlap_matches_neighbor_intersection() {
    let mut rng = StdRng::seed_from_u64(31);
    for storage in [OverlapStorage::Dense, OverlapStorage::Sparse] {
        let (nodes, edges) = random_graph(&mut rng, 20, 0.2);
        let view = GraphView::from_edges(GraphKind::Undirected, &nodes, &edges).unwrap();
        let matrix = mutual_friends(&view, storage).unwrap();
        let adjacency = neighbor_sets(&edges);
        let empty = HashSet::new();

        for &a in &nodes {
            for &b in &nodes {
                let cell = matrix.overlap(a, b).unwrap();
                assert_eq!(cell, matrix.overlap(b, a).unwrap());
                if a == b {
                    assert_eq!(cell, None);
                    continue;
                }
                let shared = adjacency
                    .get(&a)
                    .unwrap_or(&empty)
                    .intersection(adjacency.get(&b).unwrap_or(&empty))
                    .count();
                assert_eq!(cell, Some(shared as u32));
            }
        }
    }
}

#[test]
fn test_triangle_totals_agree() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..10 {
        let (nodes, edges) = random_graph(&mut rng, 25, 0.25);
        let view = GraphView::from_edges(GraphKind::Undirected, &nodes, &edges).unwrap();
        let counts = triangle_counts(&view).unwrap();

        let incident: usize = counts.per_node.values().sum();
        assert_eq!(incident % 3, 0);
        assert_eq!(counts.total(), count_triangles(&view));
        if let Clustering::Defined(c) = counts.clustering {
            assert!((0.0..=1.0).contains(&c));
        }
    }
}
