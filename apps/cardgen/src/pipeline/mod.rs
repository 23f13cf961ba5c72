// Deck pipeline.
// Implements: filter → content blocks → height estimate → size class → sheet padding.
// Loading records and writing files are separate steps driven from `main`.

pub mod filter;
pub mod output;

use tracing::{debug, info};

use crate::errors::DeckError;
use crate::layout::{
    classify_estimate, estimate, paginate, CardCollection, ContentBuilder, PaginationSummary,
};
use crate::models::{Card, SizeClass, SourceRecord};

pub use filter::RecordFilter;
pub use output::{read_cards, write_deck};

/// A finished deck: the card lists plus sheet accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub cards: CardCollection,
    pub summary: PaginationSummary,
}

/// Builds a paginated deck from every record the predicate accepts.
///
/// Records are processed in input order; that order is kept in every output list.
pub fn build_deck<F>(
    records: &[SourceRecord],
    builder: &ContentBuilder,
    accept: F,
) -> Result<Deck, DeckError>
where
    F: Fn(&SourceRecord) -> bool,
{
    let cards: Vec<Card> = records
        .iter()
        .filter(|&r| accept(r))
        .map(|r| {
            let mut card = builder.build_card(r);
            classify_card(&mut card);
            card
        })
        .collect();

    info!(
        accepted = cards.len(),
        rejected = records.len() - cards.len(),
        "Cards built"
    );

    let (cards, summary) = paginate(cards)?;
    Ok(Deck { cards, summary })
}

/// Re-estimates and re-classifies existing cards, dropping old padding, and
/// paginates them again. Used for card files edited after generation.
pub fn repaginate(cards: Vec<Card>) -> Result<Deck, DeckError> {
    let cards: Vec<Card> = cards
        .into_iter()
        .filter(|c| !c.is_blank())
        .map(|mut card| {
            classify_card(&mut card);
            card
        })
        .collect();

    info!(cards = cards.len(), "Cards reclassified");

    let (cards, summary) = paginate(cards)?;
    Ok(Deck { cards, summary })
}

/// Estimates the card's height, stores its size class and returns it.
pub fn classify_card(card: &mut Card) -> SizeClass {
    let heights = estimate(card.contents());
    let class = classify_estimate(&heights);
    debug!(
        title = card.title().unwrap_or_default(),
        compact = heights.compact,
        spacious = heights.spacious,
        class = %class,
        "Card classified"
    );
    card.size = Some(class);
    class
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
