//! mojimatch catalog search
//!
//! Ranks the records of a JSON title catalog against a query written in
//! any mix of romaji, kana, kanji and Latin text.
//!
//! ## Usage
//!
//! ```bash
//! mojimatch-search --catalog musics.json senbonzakura
//! mojimatch-search --catalog musics.json --json --limit 3 しゃけ
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `MOJIMATCH_LIMIT`: Maximum results per page (default: 10)
//! - `MOJIMATCH_MIN_SCORE`: Minimum match score 0.0-1.0 (default: 0.0)
//! - `MOJIMATCH_PARALLEL_THRESHOLD`: Catalog size from which scoring runs in parallel (default: 256)
//! - `RUST_LOG`: Logging filter (overrides `--log-level`)

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use mojimatch_search::{load_catalog, logging, render_hit, CatalogEngine, EngineConfig, Markers};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mojimatch-search")]
#[command(about = "Fuzzy title search across romaji, kana and kanji")]
#[command(version)]
struct Args {
    /// JSON catalog to search
    #[arg(short, long)]
    catalog: PathBuf,

    /// Maximum results to print
    #[arg(short, long)]
    limit: Option<usize>,

    /// Results to skip before printing
    #[arg(long)]
    offset: Option<usize>,

    /// Drop results scoring below this (0.0-1.0)
    #[arg(long)]
    min_score: Option<f64>,

    /// Print hits as JSON
    #[arg(long)]
    json: bool,

    /// Mark highlights with brackets instead of terminal colors
    #[arg(long)]
    plain: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Search query
    #[arg(required = true)]
    query: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_with_filter(&args.log_level);

    let mut config = EngineConfig::from_env()?;
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    if let Some(offset) = args.offset {
        config.offset = offset;
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    config.validate()?;

    let engine = CatalogEngine::with_config(config);
    let entries = load_catalog(&args.catalog)?;
    let (count, build_ms, hash) = engine.rebuild_catalog(entries);
    info!(
        catalog = %args.catalog.display(),
        entries = count,
        build_ms = build_ms,
        hash = %hash,
        "catalog loaded"
    );

    let query = args.query.join(" ");
    let (hits, search_us) = engine.search(&query, None, None);
    info!(hits = hits.len(), search_us = search_us, "search complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    let markers = if args.plain || !std::io::stdout().is_terminal() {
        Markers::PLAIN
    } else {
        Markers::ANSI
    };
    for hit in &hits {
        println!("{}", render_hit(hit, markers));
    }
    Ok(())
}
