//! Plain-text edge list reader
//!
//! One edge per line, endpoints separated by whitespace or `,`. Two numeric
//! ids may also be joined by `-` (`1-2`); a dashed token with any non-numeric
//! side stays a single name, so `mary-jane` is one node.
//! A line with a single token declares an isolated node; `#` starts a
//! comment. Numeric tokens are node identifiers, anything else is a node
//! name that gets a fresh identifier.

use super::store::{GraphError, GraphStore};
use super::types::{GraphKind, NodeId};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum EdgeListError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Line {line}: {source}")]
    Graph { line: usize, source: GraphError },
}

pub type EdgeListResult<T> = Result<T, EdgeListError>;

/// Parse an edge list into a new store
pub fn parse_edge_list(kind: GraphKind, text: &str) -> EdgeListResult<GraphStore> {
    let mut store = GraphStore::new(kind);

    for (offset, raw) in text.lines().enumerate() {
        let line = offset + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut tokens: Vec<&str> = content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect();
        if let [token] = tokens[..] {
            if let Some((source, target)) = split_numeric_pair(token) {
                tokens = vec![source, target];
            }
        }

        match tokens.as_slice() {
            [node] => {
                resolve(&mut store, node, line)?;
            }
            [source, target] => {
                let source = resolve(&mut store, source, line)?;
                let target = resolve(&mut store, target, line)?;
                store
                    .add_edge(source, target)
                    .map_err(|source| EdgeListError::Graph { line, source })?;
            }
            _ => {
                return Err(EdgeListError::Malformed {
                    line,
                    reason: format!("expected one or two node tokens, found {}", tokens.len()),
                })
            }
        }
    }

    debug!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        "edge list parsed"
    );
    Ok(store)
}

/// Read and parse an edge list file
pub fn read_edge_list(kind: GraphKind, path: impl AsRef<Path>) -> EdgeListResult<GraphStore> {
    let text = std::fs::read_to_string(path)?;
    parse_edge_list(kind, &text)
}

/// `"1-2"` -> `("1", "2")`; `None` unless both sides are numeric ids
fn split_numeric_pair(token: &str) -> Option<(&str, &str)> {
    let (source, target) = token.split_once('-')?;
    let numeric = |side: &str| side.parse::<u64>().is_ok();
    (numeric(source) && numeric(target)).then_some((source, target))
}

fn resolve(store: &mut GraphStore, token: &str, line: usize) -> EdgeListResult<NodeId> {
    match token.parse::<u64>() {
        Ok(raw) => {
            let id = NodeId::new(raw);
            // A numeric token must not land on an id handed out to a name
            if store.name_of(id).is_some() {
                return Err(EdgeListError::Malformed {
                    line,
                    reason: format!("node {} is already used by '{}'", raw, store.display_name(id)),
                });
            }
            store.ensure_node(id);
            Ok(id)
        }
        Err(_) => store
            .add_named_node(token)
            .map_err(|source| EdgeListError::Graph { line, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_edges() {
        let text = "# friendships\n1 2\n1-3\n2,3\n\n4\n";
        let store = parse_edge_list(GraphKind::Undirected, text).unwrap();

        assert_eq!(store.node_count(), 4);
        assert_eq!(store.edge_count(), 3);
        assert!(store.are_connected(NodeId::new(3), NodeId::new(2)));
        assert_eq!(store.degree(NodeId::new(4)).unwrap(), 0);
    }

    #[test]
    fn test_parse_named_edges() {
        let text = "alice bob   # met at work\nbob carol\n";
        let store = parse_edge_list(GraphKind::Undirected, text).unwrap();

        let alice = store.node_by_name("alice").unwrap();
        let bob = store.node_by_name("bob").unwrap();
        let carol = store.node_by_name("carol").unwrap();
        assert_eq!(alice, NodeId::new(1));
        assert!(store.are_connected(alice, bob));
        assert!(store.are_connected(carol, bob));
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_edge_list(GraphKind::Undirected, "1 2\n1 2 3\n").unwrap_err();
        match err {
            EdgeListError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_self_loop_reports_line() {
        let err = parse_edge_list(GraphKind::Undirected, "1 2\n\n3 3\n").unwrap_err();
        match err {
            EdgeListError::Graph { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source, GraphError::SelfLoop(NodeId::new(3)));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_numeric_token_colliding_with_name() {
        // "alice" takes id 1, then "1" would alias her
        let err = parse_edge_list(GraphKind::Undirected, "alice bob\n1 5\n").unwrap_err();
        assert!(matches!(err, EdgeListError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_named_node_after_max_id() {
        let text = "18446744073709551615\nalice\n";
        let store = parse_edge_list(GraphKind::Undirected, text).unwrap();

        let alice = store.node_by_name("alice").unwrap();
        assert_eq!(alice, NodeId::new(0));
        assert_eq!(store.node_count(), 2);
        assert!(store.contains_node(NodeId::new(u64::MAX)));
    }

    #[test]
    fn test_named_node_does_not_replace_existing_node() {
        let text = "0 5\n18446744073709551615\nalice\n";
        let store = parse_edge_list(GraphKind::Undirected, text).unwrap();

        assert_eq!(store.node_by_name("alice"), Some(NodeId::new(1)));
        assert!(store.are_connected(NodeId::new(0), NodeId::new(5)));
        assert_eq!(store.neighbors(NodeId::new(0)).unwrap(), vec![NodeId::new(5)]);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.node_count(), 4);
    }

    #[test]
    fn test_dashed_name_is_one_node() {
        let text = "mary-jane\nmary-jane bob\n";
        let store = parse_edge_list(GraphKind::Undirected, text).unwrap();

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        let mary_jane = store.node_by_name("mary-jane").unwrap();
        assert!(store.are_connected(mary_jane, store.node_by_name("bob").unwrap()));
        assert_eq!(store.node_by_name("mary"), None);
    }

    #[test]
    fn test_dash_between_id_and_name_is_a_name() {
        let store = parse_edge_list(GraphKind::Undirected, "1-3\n7-up\n").unwrap();

        assert!(store.are_connected(NodeId::new(1), NodeId::new(3)));
        assert!(store.node_by_name("7-up").is_some());
        assert_eq!(store.edge_count(), 1);
    }
}
