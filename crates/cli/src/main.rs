use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;
use summarizeit_indexer::{
    FilterMode, FilterPolicy, Indexer, IndexerOptions, MatchTarget, StubSummarizer,
    DEFAULT_ALLOWLIST_FILE_NAME, DEFAULT_IGNORE_FILE_NAME,
};

#[derive(Parser)]
#[command(name = "summarizeit")]
#[command(about = "Incrementally index a directory tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Root directory to index (defaults to the current directory)
    root: Option<PathBuf>,

    /// Backing store file (defaults to summarizeit.json in the root)
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Filter polarity: allow = filename allowlist, deny = full-path excludes
    #[arg(long, value_enum, default_value_t = FilterArg::Allow)]
    filter: FilterArg,

    /// Pattern file (defaults to .summarizeitallowedlist or .ignoreindexing
    /// in the root, depending on --filter)
    #[arg(long)]
    patterns_file: Option<PathBuf>,

    /// Remove store entries whose files no longer exist on disk
    #[arg(long)]
    prune_deleted: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Allow,
    Deny,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("resolve current directory")?,
    };

    let (mode, target, default_file) = match cli.filter {
        FilterArg::Allow => (
            FilterMode::Allow,
            MatchTarget::FileName,
            DEFAULT_ALLOWLIST_FILE_NAME,
        ),
        FilterArg::Deny => (
            FilterMode::Deny,
            MatchTarget::FullPath,
            DEFAULT_IGNORE_FILE_NAME,
        ),
    };
    let patterns_file = cli
        .patterns_file
        .unwrap_or_else(|| root.join(default_file));
    let filter = FilterPolicy::from_file(&patterns_file, mode, target)
        .await
        .context("load filter patterns")?;

    let options = IndexerOptions {
        store_path: cli.store_path,
        filter: Some(filter),
        prune_deleted: cli.prune_deleted,
    };
    let indexer = Indexer::with_options(&root, options)
        .await
        .context("initialize indexer")?;
    let store_path = indexer.store_path().to_path_buf();

    let stats = indexer.run(&StubSummarizer).await?;

    println!(
        "{} indexed, {} unchanged, {} pruned, {} errors in {} ms",
        stats.files_indexed,
        stats.files_unchanged,
        stats.entries_pruned,
        stats.errors.len(),
        stats.time_ms
    );
    println!("Store updated and saved to {}", store_path.display());
    Ok(())
}
