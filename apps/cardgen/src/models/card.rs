//! Card model and the content-line wire format consumed by the card renderer.
//!
//! A card's body is an ordered list of typed `ContentBlock`s. On disk every
//! block becomes one delimited line, `"<kind> | <field> | <field> ..."`, which
//! is what the external HTML card generator reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DeckError;
use crate::models::record::AbilityScores;

pub const DEFAULT_ICON: &str = "imp-laugh";
pub const DEFAULT_COLOR: &str = "FireBrick";

const FIELD_SEPARATOR: &str = " | ";

// ────────────────────────────────────────────────────────────────────────────
// Content blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Free text line. `compact` renders it in the small font.
    Text { body: String, compact: bool },
    /// Horizontal divider.
    Rule,
    Stats(AbilityScores),
    Property { label: String, body: String },
    Description { label: String, body: String },
    Section { header: String },
    Subtitle { body: String },
}

impl ContentBlock {
    pub fn text(body: impl Into<String>) -> Self {
        ContentBlock::Text {
            body: body.into(),
            compact: false,
        }
    }

    pub fn compact_text(body: impl Into<String>) -> Self {
        ContentBlock::Text {
            body: body.into(),
            compact: true,
        }
    }

    pub fn property(label: impl Into<String>, body: impl Into<String>) -> Self {
        ContentBlock::Property {
            label: label.into(),
            body: body.into(),
        }
    }

    pub fn description(label: impl Into<String>, body: impl Into<String>) -> Self {
        ContentBlock::Description {
            label: label.into(),
            body: body.into(),
        }
    }

    pub fn section(header: impl Into<String>) -> Self {
        ContentBlock::Section {
            header: header.into(),
        }
    }

    /// Lowercase tag written as the first field of the content line.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Rule => "rule",
            // rpg-cards templates render this element only under "dndstats".
            ContentBlock::Stats(_) => "stats",
            ContentBlock::Property { .. } => "property",
            ContentBlock::Description { .. } => "description",
            ContentBlock::Section { .. } => "section",
            ContentBlock::Subtitle { .. } => "subtitle",
        }
    }

    /// True when the block is rendered in the small font.
    pub fn is_compact(&self) -> bool {
        matches!(self, ContentBlock::Text { compact: true, .. })
    }

    /// Renders the block as a single content line.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            ContentBlock::Text {
                body,
                compact: true,
            } => write!(f, "{kind} | <small>{body}</small>"),
            ContentBlock::Text {
                body,
                compact: false,
            } => write!(f, "{kind} | {body}"),
            ContentBlock::Rule => write!(f, "{kind}"),
            ContentBlock::Stats(scores) => {
                write!(f, "{kind}")?;
                for value in scores.as_array() {
                    write!(f, " | {value}")?;
                }
                Ok(())
            }
            ContentBlock::Property { label, body } => write!(f, "{kind} | {label} | {body}"),
            ContentBlock::Description { label, body } => {
                write!(f, "{kind} | <em>{label}</em> | {body}")
            }
            ContentBlock::Section { header } => write!(f, "{kind} | {header}"),
            ContentBlock::Subtitle { body } => write!(f, "{kind} | {body}"),
        }
    }
}

impl FromStr for ContentBlock {
    type Err = DeckError;

    /// Parses one content line. An unrecognised kind tag is fatal.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = match line.split_once(FIELD_SEPARATOR) {
            Some((kind, rest)) => (kind.trim(), Some(rest)),
            None => (line.trim(), None),
        };

        let invalid = |reason: &str| DeckError::InvalidBlock {
            kind: kind.to_string(),
            reason: reason.to_string(),
        };

        match kind {
            "rule" => Ok(ContentBlock::Rule),
            // Compactness lives in the body markup, so a plain body that is itself
            // wrapped in <small>...</small> reads back as compact text.
            "text" => {
                let body = rest.ok_or_else(|| invalid("missing body"))?;
                match body
                    .strip_prefix("<small>")
                    .and_then(|b| b.strip_suffix("</small>"))
                {
                    Some(inner) => Ok(ContentBlock::compact_text(inner)),
                    None => Ok(ContentBlock::text(body)),
                }
            }
            // "dndstats" is the tag the card renderer's own templates use.
            "stats" | "dndstats" => {
                let rest = rest.ok_or_else(|| invalid("missing scores"))?;
                let values: Vec<i32> = rest
                    .split(FIELD_SEPARATOR)
                    .map(|v| v.trim().parse::<i32>())
                    .collect::<Result<_, _>>()
                    .map_err(|e| invalid(&format!("non-numeric score: {e}")))?;
                let scores: [i32; 6] = values
                    .try_into()
                    .map_err(|v: Vec<i32>| invalid(&format!("expected 6 scores, got {}", v.len())))?;
                Ok(ContentBlock::Stats(AbilityScores::from_array(scores)))
            }
            "property" => {
                let (label, body) = rest
                    .and_then(|r| r.split_once(FIELD_SEPARATOR))
                    .ok_or_else(|| invalid("expected label and body"))?;
                Ok(ContentBlock::property(label, body))
            }
            "description" => {
                let (label, body) = rest
                    .and_then(|r| r.split_once(FIELD_SEPARATOR))
                    .ok_or_else(|| invalid("expected label and body"))?;
                let label = label
                    .strip_prefix("<em>")
                    .and_then(|l| l.strip_suffix("</em>"))
                    .unwrap_or(label);
                Ok(ContentBlock::description(label, body))
            }
            "section" => Ok(ContentBlock::section(
                rest.ok_or_else(|| invalid("missing header"))?,
            )),
            "subtitle" => Ok(ContentBlock::Subtitle {
                body: rest.ok_or_else(|| invalid("missing body"))?.to_string(),
            }),
            other => Err(DeckError::UnknownBlockKind(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Size classes
// ────────────────────────────────────────────────────────────────────────────

/// Card footprint on a printed sheet. Ordered by footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    /// Four cards per sheet (2x2 grid).
    Small,
    /// Two cards per sheet (2x1).
    Medium,
    /// One card per sheet.
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub fn slots_per_sheet(self) -> usize {
        match self {
            SizeClass::Small => 4,
            SizeClass::Medium => 2,
            SizeClass::Large => 1,
        }
    }

    /// Grid name used in the output file name, e.g. `output_2x2.json`.
    pub fn grid(self) -> &'static str {
        match self {
            SizeClass::Small => "2x2",
            SizeClass::Medium => "2x1",
            SizeClass::Large => "1x1",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeClass::Small => write!(f, "small"),
            SizeClass::Medium => write!(f, "medium"),
            SizeClass::Large => write!(f, "large"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cards
// ────────────────────────────────────────────────────────────────────────────

/// The printable side of a card built from a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFace {
    pub title: String,
    pub icon: String,
    pub background_image: Option<String>,
    pub contents: Vec<ContentBlock>,
}

/// A deck card. `face == None` marks a blank placeholder used to fill a sheet.
///
/// `size` is written once by classification; padding placeholders take the
/// class of the bucket they fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CardJson", into = "CardJson")]
pub struct Card {
    pub face: Option<CardFace>,
    pub color: String,
    pub size: Option<SizeClass>,
}

impl Card {
    pub fn new(face: CardFace) -> Self {
        Card {
            face: Some(face),
            color: DEFAULT_COLOR.to_string(),
            size: None,
        }
    }

    pub fn blank() -> Self {
        Card {
            face: None,
            color: DEFAULT_COLOR.to_string(),
            size: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.face.is_none()
    }

    pub fn title(&self) -> Option<&str> {
        self.face.as_ref().map(|f| f.title.as_str())
    }

    pub fn contents(&self) -> &[ContentBlock] {
        self.face
            .as_ref()
            .map(|f| f.contents.as_slice())
            .unwrap_or_default()
    }
}

/// Flat JSON shape of a card as the renderer expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default)]
    contents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_image: Option<String>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl From<Card> for CardJson {
    fn from(card: Card) -> Self {
        match card.face {
            Some(face) => CardJson {
                title: Some(face.title),
                icon: Some(face.icon),
                color: card.color,
                contents: face.contents.iter().map(ContentBlock::to_line).collect(),
                background_image: face.background_image,
            },
            None => CardJson {
                title: None,
                icon: None,
                color: card.color,
                contents: Vec::new(),
                background_image: None,
            },
        }
    }
}

impl TryFrom<CardJson> for Card {
    type Error = DeckError;

    fn try_from(json: CardJson) -> Result<Self, Self::Error> {
        if json.title.is_none() && json.contents.is_empty() {
            return Ok(Card {
                face: None,
                color: json.color,
                size: None,
            });
        }

        let contents = json
            .contents
            .iter()
            .map(|line| line.parse::<ContentBlock>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Card {
            face: Some(CardFace {
                title: json.title.unwrap_or_default(),
                icon: json.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
                background_image: json.background_image,
                contents,
            }),
            color: json.color,
            size: None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
