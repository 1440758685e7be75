use anyhow::{Context as AnyhowContext, Result};
use appdex_indexer::{IndexStore, ScanConfig};
use appdex_protocol::{Intent, IntentAction};
use appdex_resolver::{open, resolve, Outcome};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use crate::launch::ProcessLauncher;

mod launch;
mod repl;

#[derive(Parser)]
#[command(name = "appdex")]
#[command(about = "Resolve free-text application names to launchable targets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Scan configuration file (TOML); per-OS defaults when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Index cache file location
    #[arg(long, global = true)]
    cache: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the application index with a full filesystem scan
    Index,

    /// Show ranked candidates for a query without launching anything
    Resolve(ResolveArgs),

    /// Resolve a query and launch the best candidate (bounded retry)
    Open(OpenArgs),

    /// Execute one intent-parser record (JSON on the command line)
    Intent(IntentArgs),

    /// Interactive loop; `refresh` rebuilds the index, `exit` quits
    Repl,
}

#[derive(Args)]
struct ResolveArgs {
    /// Free-text application name
    #[arg(required = true)]
    query: Vec<String>,

    /// Emit candidates as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct OpenArgs {
    /// Free-text application name
    #[arg(required = true)]
    query: Vec<String>,
}

#[derive(Args)]
struct IntentArgs {
    /// Raw intent JSON (code fences tolerated)
    payload: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = load_config(cli.config.clone())?;
    let cache_path = cli.cache.clone().unwrap_or_else(default_cache_path);
    log::debug!("index cache at {}", cache_path.display());
    let store = IndexStore::new(config, cache_path);

    match cli.command {
        Commands::Index => run_index(&store),
        Commands::Resolve(args) => run_resolve(&store, &args.query.join(" "), args.json),
        Commands::Open(args) => run_open(&store, &args.query.join(" ")),
        Commands::Intent(args) => run_intent(&store, &args.payload),
        Commands::Repl => repl::run(&store),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<ScanConfig> {
    match path {
        Some(path) => ScanConfig::from_toml_file(&path)
            .with_context(|| format!("reading scan config {}", path.display())),
        None => Ok(ScanConfig::default()),
    }
}

fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("appdex"))
        .unwrap_or_else(|| PathBuf::from(".appdex"))
        .join("app_index.json")
}

fn run_index(store: &IndexStore) -> Result<()> {
    let started = Instant::now();
    let index = store.rebuild().context("rebuilding application index")?;
    println!(
        "indexed {} apps in {:.1}s ({})",
        index.len(),
        started.elapsed().as_secs_f32(),
        store.cache_path().display()
    );
    Ok(())
}

fn run_resolve(store: &IndexStore, query: &str, json: bool) -> Result<()> {
    let index = store.load().context("loading application index")?;
    let candidates = resolve(query, &index, store.config());

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("no match for {query:?} (try `appdex index` to refresh)");
        return Ok(());
    }
    for candidate in &candidates {
        println!(
            "{:>5}  {}  {}",
            candidate.total_score, candidate.key, candidate.target
        );
    }
    Ok(())
}

fn run_open(store: &IndexStore, query: &str) -> Result<()> {
    let index = store.load().context("loading application index")?;
    match open(query, &index, store.config(), &ProcessLauncher) {
        Outcome::Launched { key, target } => {
            println!("launched {key} ({target})");
            Ok(())
        }
        Outcome::NotFound => {
            println!("no match for {query:?} (try `appdex index` to refresh)");
            Ok(())
        }
        Outcome::LaunchFailed { attempts } => {
            println!("all {attempts} candidates failed to launch");
            Ok(())
        }
    }
}

fn run_intent(store: &IndexStore, payload: &str) -> Result<()> {
    let intent = Intent::from_raw(payload).context("parsing intent record")?;
    match intent.action {
        IntentAction::OpenApp => {
            let Some(app) = intent.app.as_deref().filter(|app| !app.trim().is_empty()) else {
                println!("open_app intent carried no application name");
                return Ok(());
            };
            run_open(store, app)
        }
        other => {
            println!("action {other:?} is handled by another component, not the resolver");
            Ok(())
        }
    }
}
