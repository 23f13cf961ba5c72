use serde::{Deserialize, Serialize};

/// The six ability scores, in the order the stat block prints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub fn as_array(&self) -> [i32; 6] {
        [self.str, self.dex, self.con, self.int, self.wis, self.cha]
    }

    pub fn from_array(values: [i32; 6]) -> Self {
        let [str, dex, con, int, wis, cha] = values;
        AbilityScores {
            str,
            dex,
            con,
            int,
            wis,
            cha,
        }
    }
}

/// A named trait, action or reaction. `text` is already flattened to one string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub text: String,
}

/// One creature, fully translated and enriched by the loader. Read-only from here on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub name: String,
    /// English name taken from the bracketed suffix of `name`, when present.
    pub en_name: Option<String>,
    pub size: String,
    pub creature_type: String,
    pub alignment: String,
    pub armor_class: String,
    pub hit_points: String,
    pub speed: String,
    pub abilities: AbilityScores,
    pub saving_throws: Option<String>,
    pub skills: Option<String>,
    pub senses: Option<String>,
    pub languages: Option<String>,
    /// Challenge rating as printed, e.g. "1/4".
    pub challenge: String,
    pub challenge_value: f64,
    pub experience: String,
    pub source: String,
    pub biomes: Vec<String>,
    pub image: Option<String>,
    pub traits: Vec<Trait>,
    pub actions: Vec<Trait>,
    pub reactions: Vec<Trait>,
}
