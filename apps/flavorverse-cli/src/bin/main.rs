use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flavorverse_core::config::{Config, EngineSettings};
use flavorverse_core::content::JsonContentProvider;
use flavorverse_core::preferences::JsonFilePreferenceStore;
use flavorverse_core::traits::ContentProvider;
use flavorverse_core::types::{Bounds, ContentKind, FilterUpdate, DEFAULT_PRICE_RANGE};
use flavorverse_search::suggest::WRAPPER_SUGGESTIONS;
use flavorverse_search::{best_match, build_index, SearchEngine, SearchOptions, SearchResponse};

#[derive(Parser)]
#[command(name = "flavorverse", about = "Search cigars, manufacturers and pairing lessons", version)]
struct Cli {
    /// Directory holding the content feeds (overrides `search.content_dir`)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// JSON file for persisted filter preferences (overrides `search.preferences_path`)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the feeds and print how many entries of each kind get indexed
    Index,

    /// Run one query
    Search {
        query: String,

        /// Keep at most this many results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Wrapper filter, repeatable; loose names like "conn" are resolved
        #[arg(long)]
        wrapper: Vec<String>,

        #[arg(long)]
        strength: Vec<String>,

        #[arg(long)]
        flavor: Vec<String>,

        #[arg(long)]
        origin: Vec<String>,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,

        /// Print search statistics afterwards
        #[arg(long)]
        stats: bool,
    },
}

struct SearchArgs {
    wrapper: Vec<String>,
    strength: Vec<String>,
    flavor: Vec<String>,
    origin: Vec<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn resolve_wrappers(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| match best_match(&value, &WRAPPER_SUGGESTIONS) {
            Some(known) => known.to_string(),
            None => {
                warn!(wrapper = %value, "unknown wrapper, filtering on it verbatim");
                value
            }
        })
        .collect()
}

fn filter_updates(args: SearchArgs) -> Vec<FilterUpdate> {
    let mut updates = Vec::new();
    if !args.wrapper.is_empty() {
        updates.push(FilterUpdate::WrapperTypes(resolve_wrappers(args.wrapper)));
    }
    if !args.strength.is_empty() {
        updates.push(FilterUpdate::StrengthLevels(args.strength));
    }
    if !args.flavor.is_empty() {
        updates.push(FilterUpdate::FlavorTags(args.flavor));
    }
    if !args.origin.is_empty() {
        updates.push(FilterUpdate::Origin(args.origin));
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        updates.push(FilterUpdate::PriceRange(Bounds::new(
            args.min_price.unwrap_or(DEFAULT_PRICE_RANGE.min),
            args.max_price.unwrap_or(DEFAULT_PRICE_RANGE.max),
        )));
    }
    updates
}

fn print_response(query: &str, response: &SearchResponse) {
    println!("🔍 {} results for \"{}\" ({:.2} ms)", response.total, query, response.execution_time);
    for (i, result) in response.results.iter().enumerate() {
        let label = result.entry.item.label().unwrap_or("(untitled)");
        println!("  {}. [{}] {}  relevance={:.2}", i + 1, result.entry.kind, label, result.relevance);
    }
    if !response.suggestions.is_empty() {
        let texts: Vec<&str> = response.suggestions.iter().map(|s| s.text.as_str()).collect();
        println!("💡 Try: {}", texts.join(", "));
    }
}

fn build_engine(settings: EngineSettings, cli: &Cli) -> anyhow::Result<(SearchEngine, JsonContentProvider)> {
    let base = std::env::current_dir()?;
    let content_dir = cli.content_dir.clone().unwrap_or_else(|| settings.content_dir_in(&base));
    let provider = JsonContentProvider::new(content_dir).with_timeout(settings.load_timeout());
    let prefs_path = cli.prefs.clone().or_else(|| settings.preferences_path_in(&base));

    let mut engine = SearchEngine::new(settings);
    if let Some(path) = prefs_path {
        info!(path = %path.display(), "using preference file");
        engine = engine.with_preferences(Arc::new(JsonFilePreferenceStore::open(path)?));
    }
    Ok((engine, provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.engine_settings()?;
    let (mut engine, provider) = build_engine(settings, &cli)?;

    match cli.command {
        Commands::Index => {
            let sources = provider.load().await?;
            let index = build_index(&sources);
            println!("📚 {} entries from {}", index.len(), provider.content_dir().display());
            for kind in ContentKind::ALL {
                println!("  {}: {}", kind, index.count_of(kind));
            }
        }
        Commands::Search { query, limit, wrapper, strength, flavor, origin, min_price, max_price, json, stats } => {
            engine.initialize(&provider).await?;
            for update in filter_updates(SearchArgs { wrapper, strength, flavor, origin, min_price, max_price }) {
                engine.apply_filter(update)?;
            }

            let options = SearchOptions { limit };
            let response = engine.search(&query, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&query, &response);
            }

            if stats {
                println!("{}", serde_json::to_string_pretty(&engine.get_search_stats())?);
            }
        }
    }
    Ok(())
}
