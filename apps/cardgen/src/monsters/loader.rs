//! Monster loader: reads the bestiary JSON export and produces `SourceRecord`s.
//!
//! Raw fields are translated through the injected `LookupTables`, trait groups
//! and trait texts are normalized to flat strings, and each record gets its
//! background image from the `ImageIndex`. Output is sorted by challenge rating.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::info;

use crate::errors::DeckError;
use crate::models::{AbilityScores, SourceRecord, Trait};
use crate::monsters::images::ImageIndex;
use crate::monsters::tables::LookupTables;

// ────────────────────────────────────────────────────────────────────────────
// Raw input shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RawMonster {
    pub name: String,
    pub size: String,
    #[serde(rename = "type", default)]
    pub creature_type: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub alignment: String,
    #[serde(deserialize_with = "de_text")]
    pub ac: String,
    #[serde(deserialize_with = "de_text")]
    pub hp: String,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub save: Option<String>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub senses: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub biom: Option<String>,
    #[serde(deserialize_with = "de_score")]
    pub str: i32,
    #[serde(deserialize_with = "de_score")]
    pub dex: i32,
    #[serde(deserialize_with = "de_score")]
    pub con: i32,
    #[serde(deserialize_with = "de_score")]
    pub int: i32,
    #[serde(deserialize_with = "de_score")]
    pub wis: i32,
    #[serde(deserialize_with = "de_score")]
    pub cha: i32,
    #[serde(deserialize_with = "de_text")]
    pub cr: String,
    #[serde(rename = "trait", default)]
    pub traits: Value,
    #[serde(rename = "action", default)]
    pub actions: Value,
    #[serde(rename = "reaction", default)]
    pub reactions: Value,
}

#[derive(Debug, Deserialize)]
struct RawTrait {
    name: String,
    #[serde(default)]
    text: Value,
}

/// Accepts a string or any scalar, rendered as text.
fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| serde::de::Error::custom("expected a string or number"))
}

/// Accepts an integer or a numeric string.
fn de_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("ability score out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid ability score '{s}': {e}"))),
        other => Err(serde::de::Error::custom(format!(
            "invalid ability score: {other}"
        ))),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Flattens a trait's text: a single value as-is, a list of values joined by spaces.
pub fn normalize_trait_text(name: &str, text: &Value) -> Result<String, DeckError> {
    let malformed = || DeckError::MalformedTrait {
        name: name.to_string(),
    };
    match text {
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| scalar_text(item).ok_or_else(malformed))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(" "))
        }
        other => scalar_text(other).ok_or_else(malformed),
    }
}

/// Reads a trait group that may be absent, a single object, or a list of objects.
pub fn read_trait_group(group: &str, value: &Value) -> Result<Vec<Trait>, DeckError> {
    let malformed = || DeckError::MalformedTraitGroup {
        group: group.to_string(),
    };
    let raw_items: Vec<&Value> = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => return Err(malformed()),
    };

    raw_items
        .into_iter()
        .map(|item| {
            let raw: RawTrait = serde_json::from_value(item.clone()).map_err(|_| malformed())?;
            let text = normalize_trait_text(&raw.name, &raw.text)?;
            Ok(Trait {
                name: raw.name,
                text,
            })
        })
        .collect()
}

/// Square brackets become parentheses so names match the illustration index.
pub fn fix_name(name: &str) -> String {
    name.replace('[', "(").replace(']', ")")
}

/// English name inside the trailing parentheses, e.g. "Гоблин (Goblin)" → "Goblin".
pub fn english_name(name: &str) -> Option<String> {
    let open = name.rfind('(')?;
    let close = open + name[open..].find(')')?;
    let inner = name[open + 1..close].trim();
    (!inner.is_empty()).then(|| inner.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Loader
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MonsterLoader {
    tables: LookupTables,
    images: ImageIndex,
}

impl MonsterLoader {
    pub fn new(tables: LookupTables, images: ImageIndex) -> Self {
        MonsterLoader { tables, images }
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn load_file(&self, path: &Path) -> Result<Vec<SourceRecord>> {
        info!(path = %path.display(), "Loading monsters");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read monsters from '{}'", path.display()))?;
        self.load_str(&text)
    }

    pub fn load_str(&self, json: &str) -> Result<Vec<SourceRecord>> {
        let raw: Vec<RawMonster> =
            serde_json::from_str(json).context("Monster file is not a valid monster list")?;
        info!(count = raw.len(), "Monsters parsed, processing");

        let mut records = raw
            .into_iter()
            .map(|monster| {
                let name = monster.name.clone();
                self.process(monster)
                    .with_context(|| format!("Failed to process monster '{name}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        // Stable: equal ratings keep file order.
        records.sort_by(|a, b| a.challenge_value.total_cmp(&b.challenge_value));

        info!(count = records.len(), "Monsters processed");
        Ok(records)
    }

    pub fn process(&self, raw: RawMonster) -> Result<SourceRecord, DeckError> {
        let tables = &self.tables;
        let name = fix_name(&raw.name);
        let en_name = english_name(&name);

        let source = match raw.source.as_deref() {
            Some(code) => tables.source(code)?.to_string(),
            None => String::new(),
        };

        let biomes = raw
            .biom
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(|b| tables.biome(b).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        let image = self.images.resolve(&name, en_name.as_deref());

        Ok(SourceRecord {
            size: tables.size(&raw.size)?.to_string(),
            creature_type: raw.creature_type,
            alignment: raw.alignment,
            armor_class: raw.ac,
            hit_points: raw.hp,
            speed: raw.speed,
            abilities: AbilityScores {
                str: raw.str,
                dex: raw.dex,
                con: raw.con,
                int: raw.int,
                wis: raw.wis,
                cha: raw.cha,
            },
            saving_throws: raw.save,
            skills: raw.skill,
            senses: raw.senses,
            languages: raw.languages,
            experience: tables.experience(&raw.cr)?.to_string(),
            challenge_value: tables.challenge_value(&raw.cr)?,
            challenge: raw.cr,
            source,
            biomes,
            image,
            traits: read_trait_group("trait", &raw.traits)?,
            actions: read_trait_group("action", &raw.actions)?,
            reactions: read_trait_group("reaction", &raw.reactions)?,
            name,
            en_name,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_raw_json(name: &str, cr: &str) -> Value {
        json!({
            "name": name,
            "size": "M",
            "type": "зверь",
            "source": "MM",
            "alignment": "без мировоззрения",
            "ac": "12",
            "hp": "11 (2d8 + 2)",
            "speed": "40 фт.",
            "str": 15, "dex": "12", "con": 13, "int": 2, "wis": 12, "cha": 6,
            "senses": "пассивная Внимательность 11",
            "biom": "FOREST, GRASSLAND",
            "cr": cr,
            "trait": { "name": "Острый нюх", "text": "Преимущество на проверки." },
            "action": [
                { "name": "Укус", "text": ["Рукопашная атака:", "+4 к попаданию."] }
            ]
        })
    }

    fn loader() -> MonsterLoader {
        MonsterLoader::new(
            LookupTables::default(),
            ImageIndex::from_file_names(["Wolf.jpg"], "https://cdn.example"),
        )
    }

    // ── normalization ───────────────────────────────────────────────────────

    #[test]
    fn test_trait_text_list_joined_with_space() {
        let text = normalize_trait_text("x", &json!(["a", "b", 3])).unwrap();
        assert_eq!(text, "a b 3");
    }

    #[test]
    fn test_trait_text_scalar_kept() {
        assert_eq!(normalize_trait_text("x", &json!("one")).unwrap(), "one");
        assert_eq!(normalize_trait_text("x", &json!(null)).unwrap(), "");
    }

    #[test]
    fn test_trait_text_object_is_malformed() {
        let err = normalize_trait_text("Укус", &json!({"a": 1})).unwrap_err();
        assert!(matches!(err, DeckError::MalformedTrait { name } if name == "Укус"));
        assert!(normalize_trait_text("x", &json!([["nested"]])).is_err());
    }

    #[test]
    fn test_trait_group_shapes() {
        assert!(read_trait_group("trait", &Value::Null).unwrap().is_empty());
        assert_eq!(
            read_trait_group("trait", &json!({"name": "A", "text": "t"}))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            read_trait_group("trait", &json!([{"name": "A"}, {"name": "B", "text": "t"}]))
                .unwrap()
                .len(),
            2
        );
        assert!(matches!(
            read_trait_group("action", &json!("oops")),
            Err(DeckError::MalformedTraitGroup { .. })
        ));
    }

    #[test]
    fn test_names() {
        assert_eq!(fix_name("Волк [Wolf]"), "Волк (Wolf)");
        assert_eq!(english_name("Волк (Wolf)"), Some("Wolf".to_string()));
        assert_eq!(english_name("Волк"), None);
        assert_eq!(english_name("Волк ()"), None);
    }

    // ── processing ──────────────────────────────────────────────────────────

    #[test]
    fn test_process_translates_and_normalizes() {
        let raw: RawMonster = serde_json::from_value(make_raw_json("Волк [Wolf]", "1/4")).unwrap();
        let record = loader().process(raw).unwrap();

        assert_eq!(record.name, "Волк (Wolf)");
        assert_eq!(record.en_name.as_deref(), Some("Wolf"));
        assert_eq!(record.size, "Средний");
        assert_eq!(record.source, "Monsters Manual + DMG");
        assert_eq!(record.biomes, vec!["Лес", "Равнина"]);
        assert_eq!(record.experience, "50");
        assert_eq!(record.challenge_value, 0.25);
        assert_eq!(record.abilities.dex, 12);
        assert_eq!(record.image.as_deref(), Some("https://cdn.example/Wolf.jpg"));
        assert_eq!(record.traits.len(), 1);
        assert_eq!(record.actions[0].text, "Рукопашная атака: +4 к попаданию.");
        assert!(record.reactions.is_empty());
        assert!(record.languages.is_none());
    }

    #[test]
    fn test_process_unknown_size_fails() {
        let mut json = make_raw_json("X", "1");
        json["size"] = json!("Q");
        let raw: RawMonster = serde_json::from_value(json).unwrap();
        let err = loader().process(raw).unwrap_err();
        assert!(matches!(err, DeckError::UnknownLookup { table: "size", .. }));
    }

    #[test]
    fn test_load_str_sorts_by_challenge() {
        let list = json!([
            make_raw_json("Огр (Ogre)", "2"),
            make_raw_json("Крыса (Rat)", "0"),
            make_raw_json("Волк (Wolf)", "1/4"),
        ]);
        let records = loader().load_str(&list.to_string()).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.en_name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["Rat", "Wolf", "Ogre"]);
    }

    #[test]
    fn test_load_str_malformed_trait_aborts() {
        let mut bad = make_raw_json("Гнолл (Gnoll)", "1/2");
        bad["action"] = json!([{ "name": "Копьё", "text": { "nested": true } }]);
        let err = loader()
            .load_str(&json!([bad]).to_string())
            .unwrap_err();
        assert!(format!("{err:#}").contains("Gnoll"));
        assert!(matches!(
            err.downcast_ref::<DeckError>(),
            Some(DeckError::MalformedTrait { .. })
        ));
    }

    #[test]
    fn test_load_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monsters.json");
        std::fs::write(&path, json!([make_raw_json("Волк (Wolf)", "1/4")]).to_string()).unwrap();
        let records = loader().load_file(&path).unwrap();
        assert_eq!(records.len(), 1);
    }
}
