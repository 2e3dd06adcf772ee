use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sortwise_core::{Catalog, CatalogSources, ScoredResult, SearchOptions};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sortwise")]
#[command(about = "Find the right bin for an item, typos welcome", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Items table (CSV with name, aliases, notes, bin columns)
    #[arg(long, default_value = "./data/wastes.csv")]
    data: String,
    /// Bin configuration (JSON)
    #[arg(long, default_value = "./data/bins.config.json")]
    bins: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank items against a query
    Search {
        #[command(flatten)]
        sources: SourceArgs,
        /// Drop low-scoring matches
        #[arg(long, default_value_t = false)]
        confident: bool,
        /// Print results as JSON lines
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Query words
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Print index statistics
    Stats {
        #[command(flatten)]
        sources: SourceArgs,
        /// Number of most frequent terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

#[derive(Serialize)]
struct Hit<'a> {
    id: &'a str,
    name: &'a str,
    bin: Option<&'a str>,
    score: f32,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { sources, confident, json, query } => {
            let catalog = load(&sources)?;
            let query = query.join(" ");
            let results = catalog.index.search(&query, SearchOptions { only_confident: confident });
            tracing::info!(query = %query, confident, hits = results.len(), "search complete");
            if json {
                print_json(&results)
            } else {
                print_results(&results);
                Ok(())
            }
        }
        Commands::Stats { sources, top } => {
            let catalog = load(&sources)?;
            tracing::debug!(top, "printing index statistics");
            print_stats(&catalog, top);
            Ok(())
        }
    }
}

fn load(sources: &SourceArgs) -> Result<Catalog> {
    Catalog::load(&CatalogSources::new(&sources.data, &sources.bins))
}

fn print_results(results: &[ScoredResult<'_>]) {
    if results.is_empty() {
        println!("No results. Try another word or a synonym.");
        return;
    }
    for r in results {
        let item = &r.document.item;
        let bin = r.document.bin.as_ref().map(|b| b.label.as_str()).unwrap_or("unconfigured bin");
        println!("{:>5.2}  {}  [{}]", r.score, item.name, bin);
        let aliases = item.alias_list();
        if !aliases.is_empty() {
            println!("       aliases: {}", aliases.join(", "));
        }
    }
}

fn print_json(results: &[ScoredResult<'_>]) -> Result<()> {
    for r in results {
        let hit = Hit {
            id: &r.document.item.id,
            name: &r.document.item.name,
            bin: r.document.bin.as_ref().map(|b| b.id.as_str()),
            score: r.score,
        };
        println!("{}", serde_json::to_string(&hit)?);
    }
    Ok(())
}

fn print_stats(catalog: &Catalog, top: usize) {
    let index = &catalog.index;
    println!("documents:    {}", index.len());
    println!("vocabulary:   {}", index.vocabulary_len());
    println!("bins:         {}", catalog.bins.len());
    let unconfigured: Vec<&str> = catalog.unconfigured().map(|i| i.name.as_str()).collect();
    println!("unconfigured: {}", unconfigured.len());
    for name in unconfigured {
        println!("  - {name}");
    }
    println!("most common terms:");
    for (term, df) in index.most_common_terms(top) {
        println!("  {term:<16} df={df} idf={:.3}", index.idf(term).unwrap_or_default());
    }
}
