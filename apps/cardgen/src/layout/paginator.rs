//! Paginator: groups classified cards by size and keeps every sheet full.
//!
//! Each size bucket is padded with blank placeholder cards until its length is
//! a multiple of the class's slots per sheet. Real cards are never removed or
//! reordered; padding is only appended.
//!
//! Sheets are printed duplex, so the reported page count is twice the sheet count.

use tracing::info;

use crate::errors::DeckError;
use crate::models::{Card, SizeClass};

const FACES_PER_SHEET: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// All accepted cards plus one padded list per size class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardCollection {
    /// Every accepted card in input order, classified but never padded.
    pub all: Vec<Card>,
    pub small: Vec<Card>,
    pub medium: Vec<Card>,
    pub large: Vec<Card>,
}

impl CardCollection {
    pub fn bucket(&self, class: SizeClass) -> &[Card] {
        match class {
            SizeClass::Small => &self.small,
            SizeClass::Medium => &self.medium,
            SizeClass::Large => &self.large,
        }
    }

    fn bucket_mut(&mut self, class: SizeClass) -> &mut Vec<Card> {
        match class {
            SizeClass::Small => &mut self.small,
            SizeClass::Medium => &mut self.medium,
            SizeClass::Large => &mut self.large,
        }
    }

    /// Number of non-placeholder cards in a bucket.
    pub fn real_count(&self, class: SizeClass) -> usize {
        self.bucket(class).iter().filter(|c| !c.is_blank()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    pub class: SizeClass,
    pub real: usize,
    pub padded: usize,
    pub sheets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSummary {
    pub buckets: Vec<BucketSummary>,
    pub total_sheets: usize,
    /// Printable faces, two per sheet.
    pub total_pages: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Number of placeholders needed to bring `count` up to a full sheet.
pub fn padding_needed(count: usize, slots_per_sheet: usize) -> usize {
    (slots_per_sheet - count % slots_per_sheet) % slots_per_sheet
}

/// Partitions classified cards into size buckets (stable) and pads each bucket.
///
/// Every card must already carry a size class; an unclassified card means the
/// classifier was skipped and is reported as `DeckError::Unclassified`.
pub fn paginate(cards: Vec<Card>) -> Result<(CardCollection, PaginationSummary), DeckError> {
    let mut collection = CardCollection::default();

    for card in &cards {
        let class = card.size.ok_or_else(|| DeckError::Unclassified {
            title: card.title().unwrap_or_default().to_string(),
        })?;
        collection.bucket_mut(class).push(card.clone());
    }
    collection.all = cards;

    info!(
        small = collection.small.len(),
        medium = collection.medium.len(),
        large = collection.large.len(),
        "Cards split by size"
    );

    let mut buckets = Vec::with_capacity(SizeClass::ALL.len());
    for class in SizeClass::ALL {
        let bucket = collection.bucket_mut(class);
        let pad = padding_needed(bucket.len(), class.slots_per_sheet());
        bucket.extend((0..pad).map(|_| blank_of(class)));
        let padded = bucket.len();
        buckets.push(BucketSummary {
            class,
            real: collection.real_count(class),
            padded,
            sheets: padded / class.slots_per_sheet(),
        });
    }

    let total_sheets = buckets.iter().map(|b| b.sheets).sum();
    let summary = PaginationSummary {
        buckets,
        total_sheets,
        total_pages: FACES_PER_SHEET * total_sheets,
    };

    info!(
        small = collection.small.len(),
        medium = collection.medium.len(),
        large = collection.large.len(),
        total_pages = summary.total_pages,
        "Filled sheets with blank cards"
    );

    Ok((collection, summary))
}

fn blank_of(class: SizeClass) -> Card {
    let mut card = Card::blank();
    card.size = Some(class);
    card
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
