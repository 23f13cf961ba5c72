mod config;
mod errors;
mod layout;
mod models;
mod monsters;
mod pipeline;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RunMode};
use crate::layout::ContentBuilder;
use crate::monsters::{ImageIndex, LookupTables, MonsterLoader};
use crate::pipeline::filter::load_name_list;
use crate::pipeline::{build_deck, read_cards, repaginate, write_deck, Deck, RecordFilter};

fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cardgen v{}", env!("CARGO_PKG_VERSION"));

    let deck = match &config.mode {
        RunMode::Build { monsters_path } => build_from_bestiary(&config, monsters_path)?,
        RunMode::Repaginate { cards_path } => {
            info!(path = %cards_path.display(), "Reloading cards");
            repaginate(read_cards(cards_path)?)?
        }
    };

    write_deck(&deck, &config.output_dir)?;

    for bucket in &deck.summary.buckets {
        info!(
            class = %bucket.class,
            grid = bucket.class.grid(),
            cards = bucket.real,
            padded = bucket.padded,
            sheets = bucket.sheets,
            "Bucket"
        );
    }
    info!(
        sheets = deck.summary.total_sheets,
        pages = deck.summary.total_pages,
        "Done. Load the output files into the card renderer and print double-sided"
    );

    Ok(())
}

fn build_from_bestiary(config: &Config, monsters_path: &std::path::Path) -> Result<Deck> {
    let tables = match &config.lookup_tables_path {
        Some(path) => LookupTables::from_file(path)?,
        None => LookupTables::default(),
    };

    let images = match &config.images_dir {
        Some(dir) => ImageIndex::from_dir(dir, &config.image_root_url)?,
        None => ImageIndex::empty(),
    };

    let loader = MonsterLoader::new(tables, images);
    let records = loader.load_file(monsters_path)?;
    let builder = ContentBuilder::new(loader.tables().labels.clone());

    let mut filter = RecordFilter::default().challenge_range(config.min_cr, config.max_cr);
    if let Some(source) = &config.source_filter {
        filter = filter.source(source.as_str());
    }
    if let Some(path) = &config.name_list_path {
        filter = filter.names(load_name_list(path)?);
    }

    Ok(build_deck(&records, &builder, |r| filter.accepts(r))?)
}
