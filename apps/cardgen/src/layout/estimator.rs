//! Height estimation: approximates how tall a card's contents render.
//!
//! Two heights are tracked in parallel: `spacious` for the roomy one-per-half-sheet
//! layout and `compact` for the dense four-per-sheet layout. Text is not wrapped;
//! each block contributes `ceil(chars / chars_per_line)` lines, where the
//! line widths were tuned against real rendered output.
//!
//! Lengths are measured on the block's content line with all tags stripped,
//! so the kind tag and separators count toward the width like they did when
//! the constants were calibrated.

use crate::layout::markup::strip_tags;
use crate::models::ContentBlock;

/// Header and footer chrome, present on every card.
const BASE_HEIGHT: f64 = 5.0;
/// Shrink factor for blocks printed in the small font.
const COMPACT_FACTOR: f64 = 0.85;

/// Subtitles longer than this cannot fit on a small card.
const SUBTITLE_MAX_COMPACT_CHARS: usize = 49;
/// Added to the compact height of an over-long subtitle. Large enough that the
/// card can never classify as small.
const SUBTITLE_COMPACT_PENALTY: f64 = 1000.0;

const TEXT_CHARS_SPACIOUS: f64 = 132.0;
const TEXT_CHARS_COMPACT: f64 = 60.0;
const DESCRIPTION_CHARS_SPACIOUS: f64 = 136.0;
const DESCRIPTION_CHARS_COMPACT: f64 = 63.0;

/// Estimated card height in layout units, truncated to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightEstimate {
    pub spacious: u32,
    pub compact: u32,
}

/// Estimates both heights for a block sequence.
pub fn estimate(blocks: &[ContentBlock]) -> HeightEstimate {
    let mut spacious = BASE_HEIGHT;
    let mut compact = BASE_HEIGHT;

    for block in blocks {
        let (s, c) = block_contribution(block);
        spacious += s;
        compact += c;
    }

    // Truncate once at the end, never per block.
    HeightEstimate {
        spacious: spacious as u32,
        compact: compact as u32,
    }
}

/// Returns `(spacious, compact)` units added by one block.
fn block_contribution(block: &ContentBlock) -> (f64, f64) {
    let factor = if block.is_compact() { COMPACT_FACTOR } else { 1.0 };
    let chars = measured_len(block);
    let lines = |chars_per_line: f64| factor * (chars as f64 / chars_per_line).ceil();

    match block {
        ContentBlock::Subtitle { .. } => {
            let penalty = if chars > SUBTITLE_MAX_COMPACT_CHARS {
                SUBTITLE_COMPACT_PENALTY
            } else {
                0.0
            };
            (1.5, 1.5 + penalty)
        }
        ContentBlock::Rule => (1.0, 1.0),
        ContentBlock::Stats(_) => (2.5, 2.5),
        ContentBlock::Section { .. } => (1.5, 1.5),
        ContentBlock::Property { .. } | ContentBlock::Text { .. } => {
            (lines(TEXT_CHARS_SPACIOUS), lines(TEXT_CHARS_COMPACT))
        }
        ContentBlock::Description { .. } => (
            lines(DESCRIPTION_CHARS_SPACIOUS),
            lines(DESCRIPTION_CHARS_COMPACT),
        ),
    }
}

/// Character count of the block's content line with markup removed.
fn measured_len(block: &ContentBlock) -> usize {
    strip_tags(&block.to_line()).chars().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
