pub mod card;
pub mod record;

pub use card::{Card, CardFace, ContentBlock, SizeClass};
pub use record::{AbilityScores, SourceRecord, Trait};
