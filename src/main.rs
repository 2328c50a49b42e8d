//! CLI interface for the vector store

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use vdb::vector::parse_components;
use vdb::{DistanceMetric, VectorStore};

#[derive(Parser)]
#[command(name = "vdb")]
#[command(about = "An in-memory vector store with a binary file format", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by VDB_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty store file
    Create {
        /// Store file to write
        path: PathBuf,
        /// Vector dimension
        #[arg(long)]
        dims: usize,
        /// Distance metric: cosine, euclidean or dot-product
        #[arg(long, default_value = "cosine")]
        metric: DistanceMetric,
    },
    /// Insert a vector
    Insert {
        /// Store file
        path: PathBuf,
        /// Vector data as comma-separated values (e.g., "1.0,2.0,3.0")
        #[arg(short, long)]
        vector: String,
        /// Optional vector ID
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove the vector at an index
    Remove {
        /// Store file
        path: PathBuf,
        /// Index to remove; later vectors shift down
        index: usize,
    },
    /// Print the vector at an index
    Get {
        /// Store file
        path: PathBuf,
        index: usize,
    },
    /// Search for similar vectors
    Search {
        /// Store file
        path: PathBuf,
        /// Query vector as comma-separated values (e.g., "1.0,2.0,3.0")
        query: String,
        /// Number of results to return
        #[arg(short, long, default_value = "5")]
        k: usize,
    },
    /// Show dimensions, metric and vector count
    Info {
        /// Store file
        path: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a three-vector store, search it, save it and load it back
    Demo {
        /// Where to save the demo store
        #[arg(long, default_value = "test.vdb")]
        out: PathBuf,
    },
}

fn open(path: &Path) -> Result<VectorStore> {
    VectorStore::load(path).with_context(|| format!("failed to load store {}", path.display()))
}

fn persist(store: &VectorStore, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("failed to save store {}", path.display()))
}

fn format_id(id: Option<&str>) -> &str {
    id.unwrap_or("NULL")
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Create { path, dims, metric } => {
            let store = VectorStore::create(dims, metric)?;
            persist(&store, &path)?;
            println!("Created {} ({} dimensions, {})", path.display(), dims, metric);
        }
        Commands::Insert { path, vector, id } => {
            let store = open(&path)?;
            let data = parse_components(&vector)?;
            store.add(&data, id.as_deref(), None)?;
            persist(&store, &path)?;
            println!("Inserted vector at index {}", store.count() - 1);
        }
        Commands::Remove { path, index } => {
            let store = open(&path)?;
            store.remove(index)?;
            persist(&store, &path)?;
            println!("Removed vector at index {}", index);
        }
        Commands::Get { path, index } => {
            let store = open(&path)?;
            let entry = store.get(index)?;
            let values: Vec<String> = entry.data.iter().map(|x| x.to_string()).collect();
            println!("{}. id={} [{}]", index, format_id(entry.id()), values.join(", "));
        }
        Commands::Search { path, query, k } => {
            let store = open(&path)?;
            let q = parse_components(&query)?;

            match store.search(&q, k)? {
                None => println!("No results found (store is empty or k is 0)"),
                Some(results) => {
                    println!("Top {} results:", results.len());
                    for (i, result) in results.iter().enumerate() {
                        println!(
                            "{}. {} (index: {}, distance: {:.4})",
                            i + 1,
                            format_id(result.id.as_deref()),
                            result.index,
                            result.distance
                        );
                    }
                }
            }
        }
        Commands::Info { path, json } => {
            let store = open(&path)?;
            if json {
                let summary = serde_json::json!({
                    "dimensions": store.dimensions(),
                    "metric": store.metric(),
                    "count": store.count(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("dimensions: {}", store.dimensions());
                println!("metric:     {}", store.metric());
                println!("count:      {}", store.count());
            }
        }
        Commands::Demo { out } => run_demo(&out)?,
    }
    Ok(())
}

fn run_demo(out: &Path) -> Result<()> {
    const DIMS: usize = 128;

    let store = VectorStore::create(DIMS, DistanceMetric::Cosine)?;
    let ramp = |offset: f32| -> Vec<f32> {
        (0..DIMS).map(|i| (i as f32 + offset) / DIMS as f32).collect()
    };

    store.add(&ramp(0.0), Some("vec1"), None)?;
    store.add(&ramp(10.0), Some("vec2"), None)?;
    store.add(&ramp(50.0), Some("vec3"), None)?;
    println!("database contains {} vectors", store.count());

    if let Some(results) = store.search(&ramp(5.0), 2)? {
        println!("top {} results:", results.len());
        for (i, result) in results.iter().enumerate() {
            println!(
                "  {}. id={}, distance={:.4}",
                i + 1,
                format_id(result.id.as_deref()),
                result.distance
            );
        }
    }

    persist(&store, out)?;
    store.destroy();

    let loaded = open(out)?;
    println!("loaded database with {} vectors", loaded.count());
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("VDB_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("vdb=debug")
        } else {
            EnvFilter::new("vdb=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), "starting vdb");
    run(cli.command)
}
