use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use lsifgen::config::{load_config, EmitConfig};
use lsifgen::dialect::Dialect;
use lsifgen::errors::Result;
use lsifgen::indexer::Indexer;

/// Converts flat symbol dumps into LSIF code-intelligence graphs.
#[derive(Parser)]
#[command(name = "lsifgen", about = "Converts symbol dumps into LSIF graphs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a symbol/references dump
    Symbols(ConvertArgs),
    /// Convert a span-table dump
    Spans(ConvertArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Input file or glob pattern
    input: String,

    /// Project root used for document URIs (default: current directory)
    #[arg(short, long)]
    root: Option<String>,

    /// Output file
    #[arg(short, long, default_value = "dump.lsif")]
    out: PathBuf,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Embed base64 file contents in document vertices
    #[arg(long)]
    embed_contents: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (dialect, args) = match cli.command {
        Commands::Symbols(args) => (Dialect::Symbols, args),
        Commands::Spans(args) => (Dialect::Spans, args),
    };

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EmitConfig::default(),
    };
    if let Some(root) = args.root {
        config.project_root = root;
    }
    if config.project_root.is_empty() {
        config.project_root = resolve_path(None).to_string_lossy().to_string();
    }
    if args.embed_contents {
        config.embed_contents = true;
    }

    let indexer = Indexer::new(dialect, config);
    let summary = indexer.run(&args.input, &args.out).await?;
    println!(
        "Converted {} files: {} facts, {} documents, {} ranges, {} elements in {}ms",
        summary.file_count,
        summary.fact_count,
        summary.document_count,
        summary.range_count,
        summary.element_count,
        summary.duration_ms
    );
    Ok(())
}

/// Resolves an optional path argument to an absolute `PathBuf`.
///
/// Defaults to the current working directory if no path is provided.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn init_tracing(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
