//! Friendgraph CLI: run graph analytics over an edge list
//!
//! Reads an edge list from a file or stdin and prints results as a table or JSON.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use friendgraph::algo::{self, Clustering, OverlapStorage, Recommendation, TracingObserver};
use friendgraph::graph::{parse_edge_list, read_edge_list, GraphKind, GraphStore, NodeId};
use friendgraph::AnalysisConfig;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "friendgraph", version, about = "Friendgraph graph analytics CLI")]
struct Cli {
    /// Edge list file, "-" reads stdin
    #[arg(long, short, default_value = "-", global = true, env = "FRIENDGRAPH_INPUT")]
    input: String,

    /// Treat edges as directed
    #[arg(long, global = true)]
    directed: bool,

    /// YAML configuration file
    #[arg(long, global = true, env = "FRIENDGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log level, overrides the configuration file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log every BFS frontier
    #[arg(long, global = true)]
    trace_frontiers: bool,

    /// Keep mutual-friend counts in a sparse map
    #[arg(long, global = true)]
    sparse: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Hop distances from a source node
    Distances {
        /// Source node id or name
        #[arg(long)]
        source: String,
    },
    /// Shortest path between two nodes
    Path {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
    },
    /// Connected components
    Components {
        /// Ignore edge direction (works on directed graphs)
        #[arg(long)]
        weak: bool,
    },
    /// Mutual friend counts, or recommendations for one node
    Mutual {
        /// Node id or name to recommend for
        #[arg(long)]
        node: Option<String>,
    },
    /// Triangle counts and clustering coefficient
    Triangles,
}

/// Tabular result shared by both output formats
#[derive(Debug)]
struct Report {
    columns: Vec<&'static str>,
    rows: Vec<Vec<Value>>,
    summary: Vec<(&'static str, Value)>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    init_tracing(&config.log_level)?;
    let report = execute(&cli, &config)?;
    render(&report, &cli.format)
}

/// Configuration file values with command-line flags applied on top
fn resolve_config(cli: &Cli) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if cli.trace_frontiers {
        config.trace_frontiers = true;
    }
    if cli.sparse {
        config.overlap_storage = OverlapStorage::Sparse;
    }
    Ok(config)
}

fn execute(cli: &Cli, config: &AnalysisConfig) -> anyhow::Result<Report> {
    let kind = if cli.directed {
        GraphKind::Directed
    } else {
        GraphKind::Undirected
    };
    let store = load_graph(&cli.input, kind)?;
    info!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        "graph loaded"
    );

    match &cli.command {
        Commands::Distances { source } => run_distances(&store, config, source),
        Commands::Path { source, target } => run_path(&store, source, target),
        Commands::Components { weak } => run_components(&store, *weak),
        Commands::Mutual { node } => run_mutual(&store, config, node.as_deref()),
        Commands::Triangles => run_triangles(&store),
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let level: tracing::Level = level
        .parse()
        .map_err(|_| anyhow!("invalid log level '{}'", level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_graph(input: &str, kind: GraphKind) -> anyhow::Result<GraphStore> {
    if input == "-" {
        let text = std::io::read_to_string(std::io::stdin()).context("reading stdin")?;
        Ok(parse_edge_list(kind, &text)?)
    } else {
        read_edge_list(kind, input).with_context(|| format!("reading {}", input))
    }
}

/// Numeric tokens are ids, anything else is looked up by name
fn resolve_node(store: &GraphStore, token: &str) -> anyhow::Result<NodeId> {
    let id = match token.parse::<u64>() {
        Ok(raw) => NodeId::new(raw),
        Err(_) => store
            .node_by_name(token)
            .ok_or_else(|| anyhow!("no node named '{}'", token))?,
    };
    Ok(id)
}

fn node_value(store: &GraphStore, id: u64) -> Value {
    Value::String(store.display_name(NodeId::new(id)))
}

fn run_distances(
    store: &GraphStore,
    config: &AnalysisConfig,
    source: &str,
) -> anyhow::Result<Report> {
    let source = resolve_node(store, source)?;
    let labeling = if config.trace_frontiers {
        algo::shortest_path_distances_observed(store, source, &mut TracingObserver::new())?
    } else {
        algo::shortest_path_distances(store, source)?
    };

    let rows = store
        .nodes()
        .into_iter()
        .map(|node| {
            let distance = labeling
                .distance(node.as_u64())
                .map(|d| json!(d))
                .unwrap_or(Value::Null);
            vec![node_value(store, node.as_u64()), distance]
        })
        .collect();

    Ok(Report {
        columns: vec!["node", "distance"],
        rows,
        summary: vec![
            ("reached", json!(labeling.reached_count())),
            ("eccentricity", json!(labeling.eccentricity)),
        ],
    })
}

fn run_path(store: &GraphStore, source: &str, target: &str) -> anyhow::Result<Report> {
    let source = resolve_node(store, source)?;
    let target = resolve_node(store, target)?;
    let result = algo::shortest_path(store, source, target)?.ok_or_else(|| {
        anyhow!(
            "no path from {} to {}",
            store.display_name(source),
            store.display_name(target)
        )
    })?;

    let rows = result
        .path
        .iter()
        .enumerate()
        .map(|(step, &node)| vec![json!(step), node_value(store, node)])
        .collect();

    Ok(Report {
        columns: vec!["step", "node"],
        rows,
        summary: vec![("hops", json!(result.hops))],
    })
}

fn run_components(store: &GraphStore, weak: bool) -> anyhow::Result<Report> {
    let assignment = if weak {
        algo::weakly_connected_components(store)
    } else {
        algo::connected_components(store)?
    };

    let rows = assignment
        .components
        .iter()
        .map(|(label, members)| {
            let names: Vec<Value> = members.iter().map(|&m| node_value(store, m)).collect();
            vec![json!(label), json!(members.len()), Value::Array(names)]
        })
        .collect();

    Ok(Report {
        columns: vec!["component", "size", "members"],
        rows,
        summary: vec![("components", json!(assignment.component_count()))],
    })
}

fn run_mutual(
    store: &GraphStore,
    config: &AnalysisConfig,
    node: Option<&str>,
) -> anyhow::Result<Report> {
    let matrix = algo::mutual_friends(store, config.overlap_storage)?;

    let Some(token) = node else {
        // Every unordered pair with at least one mutual friend
        let mut rows = Vec::new();
        let nodes = matrix.nodes();
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if let Some(count) = matrix.overlap(a, b)?.filter(|&c| c > 0) {
                    rows.push(vec![node_value(store, a), node_value(store, b), json!(count)]);
                }
            }
        }
        return Ok(Report {
            columns: vec!["node", "other", "mutual"],
            summary: vec![("pairs", json!(rows.len()))],
            rows,
        });
    };

    let node = resolve_node(store, token)?;
    let rows = match algo::recommend(&matrix, node)? {
        Recommendation::Nodes { overlap, nodes } => nodes
            .into_iter()
            .map(|candidate| vec![node_value(store, candidate), json!(overlap)])
            .collect(),
        Recommendation::NoRecommendation => Vec::new(),
    };
    let summary = if rows.is_empty() {
        vec![("recommendation", json!("none"))]
    } else {
        vec![("recommendations", json!(rows.len()))]
    };

    Ok(Report {
        columns: vec!["recommended", "mutual"],
        rows,
        summary,
    })
}

fn run_triangles(store: &GraphStore) -> anyhow::Result<Report> {
    let counts = algo::triangle_counts(store)?;

    let rows = store
        .nodes()
        .into_iter()
        .map(|node| {
            let id = node.as_u64();
            let local = counts
                .local_clustering(id)
                .map(|c| json!(c))
                .unwrap_or(Value::Null);
            vec![node_value(store, id), json!(counts.count(id).unwrap_or(0)), local]
        })
        .collect();

    let clustering = match counts.clustering {
        Clustering::Defined(c) => json!(c),
        Clustering::Undefined => json!("undefined"),
    };

    Ok(Report {
        columns: vec!["node", "triangles", "local_clustering"],
        rows,
        summary: vec![("triangles", json!(counts.total())), ("clustering", clustering)],
    })
}

fn render(report: &Report, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = report
                .rows
                .iter()
                .map(|row| {
                    let object = report
                        .columns
                        .iter()
                        .zip(row)
                        .map(|(column, value)| (column.to_string(), value.clone()))
                        .collect();
                    Value::Object(object)
                })
                .collect();
            let summary: serde_json::Map<String, Value> = report
                .summary
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect();
            let output = json!({ "rows": rows, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            if report.rows.is_empty() {
                println!("(no results)");
            } else {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(&report.columns);
                for row in &report.rows {
                    let cells: Vec<String> = row.iter().map(format_table_value).collect();
                    table.add_row(cells);
                }
                println!("{}", table);
            }
            for (key, value) in &report.summary {
                println!("{}: {}", key, format_table_value(value));
            }
        }
    }

    Ok(())
}

fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_table_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}
