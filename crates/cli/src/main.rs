use anyhow::{Context, Result, anyhow};
use catalog::{
    CatalogIndex, GlobalStats, HistoryEntry, MediaId, TagId, WatchStatus, load_history,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::{PipelineConfig, RecommendFilters, RecommendationItem, Recommender};
use rand::Rng;
use relations::RelationIndex;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// AniRecs - Anime Recommendation Engine
#[derive(Parser)]
#[command(name = "ani-recs")]
#[command(about = "Anime recommendation engine over a catalog snapshot", long_about = None)]
struct Cli {
    /// Path to the catalog snapshot JSON file
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recommendations for a user history
    Recommend {
        /// Path to the user history JSON file
        #[arg(long)]
        history: PathBuf,

        /// Cap per format partition of the result
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Show matched genres and tags for each recommendation
        #[arg(long)]
        explain: bool,

        /// Earliest start year to keep
        #[arg(long)]
        min_year: Option<u16>,

        /// Latest start year to keep
        #[arg(long)]
        max_year: Option<u16>,

        /// Genre that must be present (repeatable, all must match)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Genre that rejects an item (repeatable)
        #[arg(long = "exclude-genre")]
        exclude_genres: Vec<String>,

        /// Keep items that have not started releasing yet
        #[arg(long)]
        include_unreleased: bool,
    },

    /// Show the story chain and related items for a catalog id
    Chain {
        /// Catalog id to resolve
        #[arg(long)]
        id: MediaId,
    },

    /// Show catalog-wide genre and tag statistics
    Stats,

    /// Search for items by title
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Benchmark recommendation latency with synthetic histories
    Bench {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Rated items per synthetic history
        #[arg(long, default_value = "20")]
        history_len: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog snapshot from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Arc::new(
        CatalogIndex::load_from_file(&cli.catalog).context("Failed to load catalog snapshot")?,
    );
    println!(
        "{} Loaded {} items in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            history,
            limit,
            explain,
            min_year,
            max_year,
            genres,
            exclude_genres,
            include_unreleased,
        } => {
            let filters = RecommendFilters {
                min_year,
                max_year,
                include_genres: genres,
                exclude_genres,
                include_unreleased,
                ..Default::default()
            };
            handle_recommend(catalog, &history, limit, explain, filters)?
        }
        Commands::Chain { id } => handle_chain(catalog, id)?,
        Commands::Stats => handle_stats(&catalog),
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::Bench {
            requests,
            history_len,
        } => handle_bench(catalog, requests, history_len)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: Arc<CatalogIndex>,
    history_path: &PathBuf,
    limit: usize,
    explain: bool,
    filters: RecommendFilters,
) -> Result<()> {
    let history = load_history(history_path).context("Failed to load user history")?;
    println!("Loaded {} history entries", history.len());

    let recommender = Recommender::new(catalog).with_pipeline_config(PipelineConfig {
        per_format_cap: limit,
        ..Default::default()
    });
    recommender.validate()?;

    let page = recommender.recommend(&history, &filters)?;

    print_partition("TV & Series", &page.tv, explain);
    print_partition("Movies", &page.movies, explain);
    println!("\n{} recommendations total", page.total);
    Ok(())
}

/// Handle the 'chain' command
fn handle_chain(catalog: Arc<CatalogIndex>, id: MediaId) -> Result<()> {
    let item = catalog
        .get(id)
        .ok_or_else(|| anyhow!("Item {} not found in catalog", id))?;

    let known: HashSet<MediaId> = catalog.sorted_ids().into_iter().collect();
    let index = RelationIndex::new(catalog.relations(), &known);
    let chains = index.chain_map();
    let chain = chains
        .get(&id)
        .ok_or_else(|| anyhow!("Item {} has no chain entry", id))?;

    println!("{}", format!("Story chain for '{}':", item.title).bold().blue());
    for (position, &member) in chain.iter().enumerate() {
        let title = catalog
            .get(member)
            .map(|m| m.title.as_str())
            .unwrap_or("<unknown>");
        let marker = if member == id { "●".green() } else { "○".normal() };
        println!("  {} {}. {} ({})", marker, position + 1, title, member);
    }

    let groups = index.related_for_chain(chain);
    for group in groups {
        if group.related.is_empty() {
            continue;
        }
        let anchor_title = catalog
            .get(group.anchor)
            .map(|m| m.title.as_str())
            .unwrap_or("<unknown>");
        println!("  Related to {}:", anchor_title.bold());
        for (related_id, relation) in group.related {
            let title = catalog
                .get(related_id)
                .map(|m| m.title.as_str())
                .unwrap_or("<unknown>");
            println!("    - {} ({:?})", title, relation);
        }
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(catalog: &CatalogIndex) {
    let stats = GlobalStats::from_catalog(catalog);
    println!(
        "{}",
        format!("Catalog statistics ({} items):", stats.total_items)
            .bold()
            .blue()
    );

    let mut genres: Vec<(&String, &u32)> = stats.genre_count.iter().collect();
    genres.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    println!("Top genres:");
    for (genre, count) in genres.iter().take(10) {
        println!("  {} {} ({} items)", "•".green(), genre, count);
    }

    // Tag names live on the items, so collect them once for display
    let mut tag_names: HashMap<TagId, &str> = HashMap::new();
    for item in catalog.items() {
        for tag in &item.tags {
            tag_names.entry(tag.id).or_insert(tag.name.as_str());
        }
    }
    let mut tags: Vec<(&TagId, &u32)> = stats.tag_count.iter().collect();
    tags.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    println!("Top tags:");
    for (tag_id, count) in tags.iter().take(10) {
        let name = tag_names.get(tag_id).copied().unwrap_or("<unknown>");
        println!("  {} {} ({} items)", "•".cyan(), name, count);
    }
}

/// Handle the 'search' command
fn handle_search(catalog: &CatalogIndex, title: &str) {
    let title_lower = title.to_lowercase();
    let mut matches: Vec<(&catalog::CatalogItem, u8)> = Vec::new();

    for item in catalog.items() {
        let item_title_lower = item.title.to_lowercase();
        if item_title_lower == title_lower {
            matches.push((item, 0)); // Exact match
        } else if item_title_lower.contains(&title_lower) {
            matches.push((item, 1)); // Substring match
        }
    }

    // Sort by relevance (exact match first), then by average score
    matches.sort_by(|a, b| {
        a.1.cmp(&b.1).then_with(|| {
            let score_a = a.0.average_score.unwrap_or(0);
            let score_b = b.0.average_score.unwrap_or(0);
            score_b.cmp(&score_a).then_with(|| a.0.id.cmp(&b.0.id))
        })
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for (item, _) in matches.iter().take(20) {
        let genres = item.genres.join(", ");
        println!(
            "{}: {} [{}] avg {}",
            item.id,
            item.title,
            genres,
            item.average_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "?".to_string())
        );
    }
}

/// Handle the 'bench' command
fn handle_bench(catalog: Arc<CatalogIndex>, requests: usize, history_len: usize) -> Result<()> {
    let recommender = Recommender::new(catalog.clone());
    recommender.validate()?;

    let ids = catalog.sorted_ids();
    if ids.is_empty() {
        return Err(anyhow!("Catalog is empty, nothing to benchmark"));
    }

    let mut rng = rand::rng();
    let filters = RecommendFilters::default();
    let mut timings = Vec::with_capacity(requests);

    for _ in 0..requests {
        // Synthetic history: random rated completions
        let history: Vec<HistoryEntry> = (0..history_len)
            .map(|_| HistoryEntry {
                media_id: ids[rng.random_range(0..ids.len())],
                status: WatchStatus::Completed,
                score: Some(rng.random_range(0..=10)),
            })
            .collect();

        let start = Instant::now();
        recommender.recommend(&history, &filters)?;
        timings.push(start.elapsed());
    }

    let total_time: std::time::Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print one result partition
fn print_partition(label: &str, items: &[RecommendationItem], explain: bool) {
    println!("\n{}", format!("{}:", label).bold().blue());
    if items.is_empty() {
        println!("  (none)");
        return;
    }
    for (rank, item) in items.iter().enumerate() {
        println!(
            "{}. {} ({}) - Score: {:.3}",
            (rank + 1).to_string().green(),
            item.title,
            item.start_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "????".to_string()),
            item.score
        );
        if explain {
            println!(
                "   Matched genres: {} | Matched tags: {}",
                item.matched_genres.join(", "),
                item.matched_tags.join(", ")
            );
        }
    }
}
