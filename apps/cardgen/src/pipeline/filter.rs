//! Record filter: decides which creatures make it into the deck.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::SourceRecord;

pub const DEFAULT_MIN_CHALLENGE: f64 = 0.0;
pub const DEFAULT_MAX_CHALLENGE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    /// Inclusive challenge rating bounds.
    pub min_challenge: f64,
    pub max_challenge: f64,
    /// Exact (translated) source book name.
    pub source: Option<String>,
    /// Lowercased allow-list; matched against the full and the English name.
    names: Option<HashSet<String>>,
}

impl Default for RecordFilter {
    fn default() -> Self {
        RecordFilter {
            min_challenge: DEFAULT_MIN_CHALLENGE,
            max_challenge: DEFAULT_MAX_CHALLENGE,
            source: None,
            names: None,
        }
    }
}

impl RecordFilter {
    pub fn challenge_range(mut self, min: f64, max: f64) -> Self {
        self.min_challenge = min;
        self.max_challenge = max;
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names = Some(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .collect(),
        );
        self
    }

    pub fn accepts(&self, record: &SourceRecord) -> bool {
        if record.challenge_value < self.min_challenge
            || record.challenge_value > self.max_challenge
        {
            return false;
        }

        if let Some(source) = &self.source {
            if &record.source != source {
                return false;
            }
        }

        match &self.names {
            None => true,
            Some(names) => {
                names.contains(&record.name.to_lowercase())
                    || record
                        .en_name
                        .as_ref()
                        .is_some_and(|en| names.contains(&en.to_lowercase()))
            }
        }
    }
}

/// Parses a newline-separated name list. Blank lines and `#` comments are skipped.
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_name_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read name list '{}'", path.display()))?;
    Ok(parse_name_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::content::tests::make_record;

    fn record_with_challenge(value: f64) -> SourceRecord {
        let mut record = make_record();
        record.challenge_value = value;
        record
    }

    #[test]
    fn test_default_accepts_full_range() {
        let filter = RecordFilter::default();
        assert!(filter.accepts(&record_with_challenge(0.0)));
        assert!(filter.accepts(&record_with_challenge(30.0)));
    }

    #[test]
    fn test_challenge_bounds_inclusive() {
        let filter = RecordFilter::default().challenge_range(0.25, 2.0);
        assert!(filter.accepts(&record_with_challenge(0.25)));
        assert!(filter.accepts(&record_with_challenge(2.0)));
        assert!(!filter.accepts(&record_with_challenge(0.125)));
        assert!(!filter.accepts(&record_with_challenge(3.0)));
    }

    #[test]
    fn test_source_tag() {
        let record = make_record();
        assert!(RecordFilter::default()
            .source("Monsters Manual + DMG")
            .accepts(&record));
        assert!(!RecordFilter::default()
            .source("Volo's Guide to Monsters")
            .accepts(&record));
    }

    #[test]
    fn test_name_list_matches_either_name() {
        let record = make_record();
        assert!(RecordFilter::default().names(["goblin"]).accepts(&record));
        assert!(RecordFilter::default()
            .names(["  гоблин (goblin) "])
            .accepts(&record));
        assert!(!RecordFilter::default().names(["Orc"]).accepts(&record));
        assert!(!RecordFilter::default()
            .names(Vec::<String>::new())
            .accepts(&record));
    }

    #[test]
    fn test_parse_name_list_skips_comments() {
        let names = parse_name_list("# starter set\nGoblin\n\n  Wolf  \n#Ogre\n");
        assert_eq!(names, vec!["Goblin", "Wolf"]);
    }
}
