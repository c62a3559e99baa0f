//! depgraph CLI - analyze and generate task dependency graphs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use depgraph_rust::config::{AnalysisConfig, EdgeMergePolicy};
use depgraph_rust::generator::{generate_suite, GraphGenerator};
use depgraph_rust::io::{self, GraphDocument, IoError};
use depgraph_rust::pipeline::{analyze, AnalysisError};
use depgraph_rust::{log_details, log_stages};

/// Strongly connected components, condensation and critical paths for task graphs.
#[derive(Parser)]
#[command(name = "depgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis on a JSON graph file
    Analyze {
        /// Graph file
        file: PathBuf,

        /// Source task (overrides the file's "source" field)
        #[arg(short, long)]
        source: Option<usize>,

        /// How parallel edges between components are merged (first, min, max, sum)
        #[arg(short, long, default_value_t = EdgeMergePolicy::First)]
        edge_merge: EdgeMergePolicy,
    },

    /// Write the standard benchmark suite as JSON files
    Generate {
        /// Output directory (created if missing)
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Write a single random graph
    GenerateOne {
        /// Number of nodes
        #[arg(long)]
        nodes: usize,

        /// Target number of edges
        #[arg(long)]
        edges: usize,

        /// Use the dense generator
        #[arg(long)]
        dense: bool,

        /// Produce an acyclic graph
        #[arg(long, conflicts_with = "dense")]
        acyclic: bool,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn run_analyze(
    file: &Path,
    source: Option<usize>,
    edge_merge: EdgeMergePolicy,
    verbosity: u8,
) -> Result<(), AnalysisError> {
    let (graph, doc) = io::load_graph(file)?;
    log_stages!(verbosity, "Loaded {}", file.display());

    let config = AnalysisConfig {
        source: source.unwrap_or(doc.source),
        edge_merge: edge_merge.to_string(),
        verbosity,
    };
    let report = analyze(&graph, &config)?;
    print!("{}", report);
    Ok(())
}

fn run_generate(out_dir: &Path, seed: u64, verbosity: u8) -> Result<(), IoError> {
    std::fs::create_dir_all(out_dir).map_err(|source| IoError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    for (name, graph) in generate_suite(seed) {
        let path = out_dir.join(format!("{}.json", name));
        io::save_graph(&path, &GraphDocument::from(&graph))?;
        log_stages!(
            verbosity,
            "{}: {} nodes, {} edges -> {}",
            name,
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = cli.verbose;

    let result = match cli.command {
        Commands::Analyze {
            file,
            source,
            edge_merge,
        } => run_analyze(&file, source, edge_merge, verbosity),
        Commands::Generate { out_dir, seed } => {
            run_generate(&out_dir, seed, verbosity).map_err(AnalysisError::from)
        }
        Commands::GenerateOne {
            nodes,
            edges,
            dense,
            acyclic,
            seed,
            out,
        } => {
            let mut generator = GraphGenerator::new(seed);
            let graph = if acyclic {
                generator.generate_dag(nodes, edges)
            } else if dense {
                generator.generate_dense(nodes, edges, true)
            } else {
                generator.generate_sparse(nodes, edges, true)
            };
            log_details!(verbosity, "Generated {:?}", graph);
            io::save_graph(&out, &GraphDocument::from(&graph)).map_err(AnalysisError::from)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use depgraph_rust::graph::{Edge, Graph};

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["depgraph", "analyze", "tasks.json"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Analyze {
                file,
                source,
                edge_merge,
            } => {
                assert_eq!(file, PathBuf::from("tasks.json"));
                assert_eq!(source, None);
                assert_eq!(edge_merge, EdgeMergePolicy::First);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_parse_analyze_edge_merge_and_verbosity() {
        let cli = Cli::try_parse_from([
            "depgraph",
            "analyze",
            "tasks.json",
            "--edge-merge",
            "max",
            "--source",
            "3",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze {
                source, edge_merge, ..
            } => {
                assert_eq!(source, Some(3));
                assert_eq!(edge_merge, EdgeMergePolicy::Max);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_edge_merge() {
        let result =
            Cli::try_parse_from(["depgraph", "analyze", "tasks.json", "--edge-merge", "avg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_dense_conflicts_with_acyclic() {
        let result = Cli::try_parse_from([
            "depgraph",
            "generate-one",
            "--nodes",
            "10",
            "--edges",
            "20",
            "--dense",
            "--acyclic",
            "--out",
            "g.json",
        ]);
        let err = result.err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_parse_generate_one() {
        let cli = Cli::try_parse_from([
            "depgraph",
            "generate-one",
            "--nodes",
            "10",
            "--edges",
            "20",
            "--acyclic",
            "--seed",
            "7",
            "-o",
            "g.json",
        ])
        .unwrap();
        match cli.command {
            Commands::GenerateOne {
                nodes,
                edges,
                dense,
                acyclic,
                seed,
                out,
            } => {
                assert_eq!((nodes, edges, seed), (10, 20, 7));
                assert!(!dense);
                assert!(acyclic);
                assert_eq!(out, PathBuf::from("g.json"));
            }
            _ => panic!("Expected GenerateOne command"),
        }
    }

    // ========== Command Tests ==========

    #[test]
    fn test_generate_writes_suite() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("suite");
        run_generate(&out_dir, 42, 0).unwrap();

        for name in ["small1", "medium2", "large3"] {
            let (graph, _) = io::load_graph(out_dir.join(format!("{}.json", name))).unwrap();
            assert!(graph.node_count() > 0);
        }
    }

    #[test]
    fn test_analyze_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let graph = Graph::new(3, vec![Edge::new(0, 1, 2), Edge::new(1, 2, 3)]).unwrap();
        io::save_graph(&path, &GraphDocument::from(&graph)).unwrap();

        assert!(run_analyze(&path, None, EdgeMergePolicy::Sum, 0).is_ok());
        assert!(matches!(
            run_analyze(&path, Some(9), EdgeMergePolicy::First, 0),
            Err(AnalysisError::SourceOutOfRange { node: 9, n: 3 })
        ));
        assert!(matches!(
            run_analyze(&dir.path().join("missing.json"), None, EdgeMergePolicy::First, 0),
            Err(AnalysisError::Io(IoError::Read { .. }))
        ));
    }
}
