//! Size classification: picks the smallest card footprint the content fits.
//!
//! The densest layout is tried first against its own (compact) estimate; if it
//! does not fit, the next size up is tried against the spacious estimate.
//! Anything left over gets a full sheet.

use crate::layout::estimator::HeightEstimate;
use crate::models::SizeClass;

/// Maximum compact height that still fits a quarter-sheet card.
pub const SMALL_MAX_COMPACT_HEIGHT: u32 = 43;
/// Maximum spacious height that still fits a half-sheet card.
pub const MEDIUM_MAX_SPACIOUS_HEIGHT: u32 = 42;

pub fn classify(compact_height: u32, spacious_height: u32) -> SizeClass {
    if compact_height <= SMALL_MAX_COMPACT_HEIGHT {
        SizeClass::Small
    } else if spacious_height <= MEDIUM_MAX_SPACIOUS_HEIGHT {
        SizeClass::Medium
    } else {
        SizeClass::Large
    }
}

pub fn classify_estimate(estimate: &HeightEstimate) -> SizeClass {
    classify(estimate.compact, estimate.spacious)
}
