//! Deck files: the flat JSON card lists handed to the card renderer.
//!
//! One file holds every accepted card; one file per size class holds that
//! class's padded list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{Card, SizeClass};
use crate::pipeline::Deck;

pub const FULL_FILE_NAME: &str = "output_full.json";

pub fn class_file_name(class: SizeClass) -> String {
    format!("output_{}.json", class.grid())
}

/// Writes the four deck files into `dir`, creating it if needed. Returns the written paths.
pub fn write_deck(deck: &Deck, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;

    let mut written = Vec::with_capacity(1 + SizeClass::ALL.len());
    written.push(write_cards(&deck.cards.all, &dir.join(FULL_FILE_NAME))?);
    for class in SizeClass::ALL {
        written.push(write_cards(
            deck.cards.bucket(class),
            &dir.join(class_file_name(class)),
        )?);
    }

    info!(dir = %dir.display(), files = written.len(), "Cards saved");
    Ok(written)
}

fn write_cards(cards: &[Card], path: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string(cards).context("Failed to serialize cards")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path.to_path_buf())
}

/// Reads a card file written by `write_deck` (or edited by hand).
pub fn read_cards(path: &Path) -> Result<Vec<Card>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cards from '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid card file '{}'", path.display()))
}
