use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use semdex_embedder::{Embedder, FastembedLoader, StubLoader};
use semdex_pipeline::{BatchReport, DocumentPipeline, PipelineConfig};
use semdex_vector_store::{HttpVectorDatabase, MemoryVectorDatabase, VectorDatabase};
use std::path::PathBuf;
use std::sync::Arc;

/// Output width of the stub embedder, matching the default real model
const STUB_DIMENSION: usize = 384;

#[derive(Parser)]
#[command(name = "semdex")]
#[command(about = "Semantic document indexing and search", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Vector database endpoint (use "memory:" for an in-process store)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Collection name override
    #[arg(long, global = true)]
    collection: Option<String>,

    /// Use the deterministic stub embedder instead of a real model
    #[arg(long, global = true)]
    stub_embedder: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents into the collection
    Ingest(IngestArgs),

    /// Search the collection for a query
    Search(SearchArgs),
}

#[derive(Args)]
struct IngestArgs {
    /// Files to ingest
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Maximum number of results (defaults to the configured top_k)
    #[arg(long, short = 'n')]
    top_k: Option<usize>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Search(args) => args.json,
        Commands::Ingest(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(&cli)?;
    let pipeline = build_pipeline(&cli, &config)?;

    match cli.command {
        Commands::Ingest(args) => run_ingest(args, &pipeline).await?,
        Commands::Search(args) => run_search(args, &pipeline).await?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(collection) = &cli.collection {
        config.collection_name = collection.clone();
    }
    config.validate()?;
    Ok(config)
}

fn build_pipeline(cli: &Cli, config: &PipelineConfig) -> Result<DocumentPipeline> {
    let db: Arc<dyn VectorDatabase> = if config.endpoint == "memory:" {
        log::debug!("Using in-process memory vector database");
        Arc::new(MemoryVectorDatabase::new())
    } else {
        Arc::new(HttpVectorDatabase::with_timeout(
            config.endpoint.clone(),
            config.request_timeout(),
        )?)
    };

    let embedder = if cli.stub_embedder {
        log::debug!("Using deterministic stub embedder");
        Embedder::new(Arc::new(StubLoader::new(STUB_DIMENSION)))
    } else {
        Embedder::new(Arc::new(FastembedLoader::new()))
    };

    Ok(DocumentPipeline::new(config, db, embedder)?)
}

/// Ingest files one at a time, keeping going after individual failures
async fn run_ingest(args: IngestArgs, pipeline: &DocumentPipeline) -> Result<()> {
    pipeline
        .initialize()
        .await
        .context("Failed to initialize the vector store")?;

    let mut batch = BatchReport::new();
    for path in &args.paths {
        match pipeline.ingest(path).await {
            Ok(report) => {
                log::info!(
                    "{}: {} chunks in {} ms",
                    report.source_path,
                    report.chunks,
                    report.time_ms
                );
                batch.add_report(&report);
            }
            Err(err) => {
                log::warn!("Skipping {}: {}", path.display(), err);
                batch.add_error(format!("{}: {}", path.display(), err));
            }
        }
    }

    println!(
        "Ingested {} of {} files ({} chunks, {} characters) in {} ms",
        batch.files,
        args.paths.len(),
        batch.chunks,
        batch.characters,
        batch.time_ms
    );
    for error in &batch.errors {
        eprintln!("Failed: {error}");
    }
    if batch.files == 0 && !batch.errors.is_empty() {
        anyhow::bail!("No documents were ingested");
    }
    Ok(())
}

/// Search the collection and print ranked matches
async fn run_search(args: SearchArgs, pipeline: &DocumentPipeline) -> Result<()> {
    pipeline
        .initialize()
        .await
        .context("Failed to initialize the vector store")?;

    let results = match args.top_k {
        Some(top_k) => pipeline.search(&args.query, top_k).await?,
        None => pipeline.search_default(&args.query).await?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results");
        return Ok(());
    }
    for (i, (id, document, distance)) in results.iter().enumerate() {
        println!("{}. {} (distance: {:.3})", i + 1, id, distance);
        println!("   {}", snippet(document, 120));
        println!();
    }
    Ok(())
}

/// First `max_chars` characters of `text`, with whitespace flattened
fn snippet(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let cut: String = flattened.chars().take(max_chars).collect();
    format!("{cut}...")
}
