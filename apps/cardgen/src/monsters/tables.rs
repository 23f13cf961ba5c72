//! Lookup tables used to translate raw monster fields.
//!
//! The tables are plain data handed to the loader at construction. The built-in
//! set covers the Russian bestiary export; a JSON file with the same shape can
//! replace it (`LOOKUP_TABLES_PATH`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::DeckError;
use crate::layout::CardLabels;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupTables {
    /// Size code ("M") → printed size name.
    pub sizes: BTreeMap<String, String>,
    /// Source book code ("MM") → printed source name.
    pub sources: BTreeMap<String, String>,
    /// Challenge rating ("1/4") → experience text.
    pub experience: BTreeMap<String, String>,
    /// Challenge rating ("1/4") → numeric value used for sorting and filtering.
    pub challenge_values: BTreeMap<String, f64>,
    /// Biome code ("FOREST") → printed biome name.
    pub biomes: BTreeMap<String, String>,
    pub labels: CardLabels,
}

impl LookupTables {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lookup tables from '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid lookup tables in '{}'", path.display()))
    }

    pub fn size(&self, code: &str) -> Result<&str, DeckError> {
        lookup("size", &self.sizes, code).map(String::as_str)
    }

    pub fn source(&self, code: &str) -> Result<&str, DeckError> {
        lookup("source", &self.sources, code).map(String::as_str)
    }

    pub fn experience(&self, challenge: &str) -> Result<&str, DeckError> {
        lookup("experience", &self.experience, challenge).map(String::as_str)
    }

    pub fn challenge_value(&self, challenge: &str) -> Result<f64, DeckError> {
        lookup("challenge", &self.challenge_values, challenge).copied()
    }

    pub fn biome(&self, code: &str) -> Result<&str, DeckError> {
        lookup("biome", &self.biomes, code).map(String::as_str)
    }
}

fn lookup<'a, V>(
    table: &'static str,
    map: &'a BTreeMap<String, V>,
    key: &str,
) -> Result<&'a V, DeckError> {
    map.get(key).ok_or_else(|| DeckError::UnknownLookup {
        table,
        key: key.to_string(),
    })
}

const EXPERIENCE: &[(&str, &str, f64)] = &[
    ("0", "0 - 10", 0.0),
    ("1/8", "25", 0.125),
    ("1/4", "50", 0.25),
    ("1/2", "100", 0.5),
    ("1", "200", 1.0),
    ("2", "450", 2.0),
    ("3", "700", 3.0),
    ("4", "1100", 4.0),
    ("5", "1800", 5.0),
    ("6", "2300", 6.0),
    ("7", "2900", 7.0),
    ("8", "3900", 8.0),
    ("9", "5000", 9.0),
    ("10", "5900", 10.0),
    ("11", "7200", 11.0),
    ("12", "8400", 12.0),
    ("13", "10000", 13.0),
    ("14", "11500", 14.0),
    ("15", "13000", 15.0),
    ("16", "15000", 16.0),
    ("17", "18000", 17.0),
    ("18", "20000", 18.0),
    ("19", "22000", 19.0),
    ("20", "25000", 20.0),
    ("21", "33000", 21.0),
    ("22", "41000", 22.0),
    ("23", "50000", 23.0),
    ("24", "62000", 24.0),
    ("25", "75000", 25.0),
    ("26", "90000", 26.0),
    ("27", "105000", 27.0),
    ("28", "120000", 28.0),
    ("29", "135000", 29.0),
    ("30", "155000", 30.0),
];

const SIZES: &[(&str, &str)] = &[
    ("T", "Крошечный"),
    ("S", "Маленький"),
    ("M", "Средний"),
    ("L", "Большой"),
    ("H", "Огромный"),
    ("G", "Колоссальный"),
];

const SOURCES: &[(&str, &str)] = &[
    ("MM", "Monsters Manual + DMG"),
    ("VGtM", "Volo's Guide to Monsters"),
    ("XGTE", "Xanathar's Guide to Everything"),
    ("MToF", "Mordenkainen's Tome of Foes"),
];

const BIOMES: &[(&str, &str)] = &[
    ("ARCTIC", "Заполярье"),
    ("COASTAL", "Побережье"),
    ("DESERT", "Пустыня"),
    ("FOREST", "Лес"),
    ("GRASSLAND", "Равнина"),
    ("HILL", "Холмы"),
    ("MOUNTAIN", "Горы"),
    ("SWAMP", "Болота"),
    ("URBAN", "Город"),
    ("ASTRAL", "Астрал"),
    ("DUNDERDARK", "Подземье"),
    ("UNDERDARK", "Подземье"),
];

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for LookupTables {
    fn default() -> Self {
        LookupTables {
            sizes: to_map(SIZES),
            sources: to_map(SOURCES),
            experience: EXPERIENCE
                .iter()
                .map(|(cr, xp, _)| (cr.to_string(), xp.to_string()))
                .collect(),
            challenge_values: EXPERIENCE
                .iter()
                .map(|(cr, _, value)| (cr.to_string(), *value))
                .collect(),
            biomes: to_map(BIOMES),
            labels: CardLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_tables_cover_all_challenge_ratings() {
        let tables = LookupTables::default();
        assert_eq!(tables.experience.len(), 34);
        assert_eq!(tables.experience("1/4").unwrap(), "50");
        assert_eq!(tables.challenge_value("1/8").unwrap(), 0.125);
        assert_eq!(tables.challenge_value("30").unwrap(), 30.0);
    }

    #[test]
    fn test_missing_key_reports_table() {
        let tables = LookupTables::default();
        let err = tables.size("Z").unwrap_err();
        assert!(matches!(err, DeckError::UnknownLookup { table: "size", ref key } if key == "Z"));
    }

    #[test]
    fn test_partial_override_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sizes": {{"M": "Medium"}}, "labels": {{"traits": "Traits"}}}}"#
        )
        .unwrap();

        let tables = LookupTables::from_file(file.path()).unwrap();
        assert_eq!(tables.size("M").unwrap(), "Medium");
        assert!(tables.size("L").is_err());
        assert_eq!(tables.labels.traits, "Traits");
        assert_eq!(tables.labels.actions, "Действия");
        assert_eq!(tables.experience("2").unwrap(), "450");
    }

    #[test]
    fn test_invalid_override_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(LookupTables::from_file(file.path()).is_err());
    }
}
