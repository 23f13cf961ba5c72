//! Regex helpers for the inline HTML the card renderer understands.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any opening or closing tag.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]*>").expect("valid tag regex"));

/// Opening or closing `<a ...>` hyperlink tag.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?a(\s[^>]*)?>").expect("valid link regex"));

/// Removes every tag, keeping inner text. Used before measuring text length.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Removes hyperlink tags only, keeping the link text and other formatting.
pub fn strip_links(text: &str) -> String {
    LINK_RE.replace_all(text, "").into_owned()
}
