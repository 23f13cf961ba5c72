//! Content builder: lays a creature record out as an ordered list of blocks.
//!
//! The emission order mirrors a printed stat block:
//! size/type line, rule, AC/HP/speed line, rule, ability scores, rule,
//! optional properties, challenge, then one section per non-empty trait group.

use serde::{Deserialize, Serialize};

use crate::layout::markup::strip_links;
use crate::models::{Card, CardFace, ContentBlock, SourceRecord, Trait};
use crate::models::card::DEFAULT_ICON;

/// Localized labels printed on the card. Defaults match the Russian data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardLabels {
    pub speed: String,
    pub saving_throws: String,
    pub skills: String,
    pub senses: String,
    pub languages: String,
    pub challenge: String,
    pub traits: String,
    pub actions: String,
    pub reactions: String,
}

impl Default for CardLabels {
    fn default() -> Self {
        CardLabels {
            speed: "Скорость".to_string(),
            saving_throws: "Спасбросок".to_string(),
            skills: "Способности".to_string(),
            senses: "Чувства".to_string(),
            languages: "Языки".to_string(),
            challenge: "Сложность".to_string(),
            traits: "Особенности".to_string(),
            actions: "Действия".to_string(),
            reactions: "Реакции".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentBuilder {
    labels: CardLabels,
}

impl ContentBuilder {
    pub fn new(labels: CardLabels) -> Self {
        ContentBuilder { labels }
    }

    /// Builds the block sequence for one record. Pure; the same record always
    /// yields the same blocks.
    pub fn build(&self, record: &SourceRecord) -> Vec<ContentBlock> {
        let labels = &self.labels;
        let mut blocks = Vec::with_capacity(16);

        blocks.push(ContentBlock::compact_text(format!(
            "{}, {}, {}",
            record.size, record.creature_type, record.alignment
        )));
        blocks.push(ContentBlock::Rule);

        blocks.push(ContentBlock::text(format!(
            "<b>AC:</b> {}, <b>HP:</b> {}, <b>{}:</b> {}",
            record.armor_class, record.hit_points, labels.speed, record.speed
        )));
        blocks.push(ContentBlock::Rule);

        blocks.push(ContentBlock::Stats(record.abilities));
        blocks.push(ContentBlock::Rule);

        let optional = [
            (&labels.saving_throws, &record.saving_throws),
            (&labels.skills, &record.skills),
            (&labels.senses, &record.senses),
            (&labels.languages, &record.languages),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                blocks.push(ContentBlock::property(label.as_str(), value.as_str()));
            }
        }

        blocks.push(ContentBlock::property(
            labels.challenge.as_str(),
            format!(
                r#"{} <em><span style="color: gray">({} XP)</span></em>"#,
                record.challenge, record.experience
            ),
        ));

        push_trait_group(&mut blocks, &labels.traits, &record.traits);
        push_trait_group(&mut blocks, &labels.actions, &record.actions);
        push_trait_group(&mut blocks, &labels.reactions, &record.reactions);

        blocks
    }

    /// Builds an unclassified card for the record.
    pub fn build_card(&self, record: &SourceRecord) -> Card {
        Card::new(CardFace {
            title: record.name.clone(),
            icon: DEFAULT_ICON.to_string(),
            background_image: record.image.clone(),
            contents: self.build(record),
        })
    }
}

fn push_trait_group(blocks: &mut Vec<ContentBlock>, header: &str, group: &[Trait]) {
    if group.is_empty() {
        return;
    }
    blocks.push(ContentBlock::section(header));
    for t in group {
        blocks.push(ContentBlock::description(t.name.as_str(), strip_links(&t.text)));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::AbilityScores;

    pub(crate) fn make_record() -> SourceRecord {
        SourceRecord {
            name: "Гоблин (Goblin)".to_string(),
            en_name: Some("Goblin".to_string()),
            size: "Маленький".to_string(),
            creature_type: "гуманоид (гоблиноид)".to_string(),
            alignment: "нейтрально-злой".to_string(),
            armor_class: "15 (кожаный доспех, щит)".to_string(),
            hit_points: "7 (2d6)".to_string(),
            speed: "30 фт.".to_string(),
            abilities: AbilityScores::from_array([8, 14, 10, 10, 8, 8]),
            saving_throws: None,
            skills: Some("Скрытность +6".to_string()),
            senses: Some("тёмное зрение 60 фт., пассивная Внимательность 9".to_string()),
            languages: None,
            challenge: "1/4".to_string(),
            challenge_value: 0.25,
            experience: "50".to_string(),
            source: "Monsters Manual + DMG".to_string(),
            biomes: vec![],
            image: Some("https://img/Goblin.jpg".to_string()),
            traits: vec![],
            actions: vec![],
            reactions: vec![],
        }
    }

    fn make_trait(name: &str, text: &str) -> Trait {
        Trait {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    fn builder() -> ContentBuilder {
        ContentBuilder::default()
    }

    #[test]
    fn test_fixed_prefix_order() {
        let blocks = builder().build(&make_record());
        assert!(blocks[0].is_compact());
        assert_eq!(
            blocks[0],
            ContentBlock::compact_text("Маленький, гуманоид (гоблиноид), нейтрально-злой")
        );
        assert_eq!(blocks[1], ContentBlock::Rule);
        assert!(matches!(blocks[2], ContentBlock::Text { compact: false, .. }));
        assert_eq!(blocks[3], ContentBlock::Rule);
        assert_eq!(
            blocks[4],
            ContentBlock::Stats(AbilityScores::from_array([8, 14, 10, 10, 8, 8]))
        );
        assert_eq!(blocks[5], ContentBlock::Rule);
    }

    #[test]
    fn test_only_present_properties_emitted_in_order() {
        let blocks = builder().build(&make_record());
        let labels: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Property { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Способности", "Чувства", "Сложность"]);
    }

    #[test]
    fn test_minimal_record_has_seven_blocks() {
        let mut record = make_record();
        record.skills = None;
        record.senses = None;
        let blocks = builder().build(&record);
        assert_eq!(blocks.len(), 7);
        assert_eq!(
            blocks[6],
            ContentBlock::property(
                "Сложность",
                r#"1/4 <em><span style="color: gray">(50 XP)</span></em>"#
            )
        );
    }

    #[test]
    fn test_each_trait_group_adds_section_plus_entries() {
        let base = builder().build(&make_record()).len();

        let mut record = make_record();
        record.traits = vec![make_trait("Проворный побег", "Отход или Засада бонусным действием.")];
        record.actions = vec![
            make_trait("Скимитар", "Рукопашная атака оружием."),
            make_trait("Короткий лук", "Дальнобойная атака оружием."),
        ];
        let blocks = builder().build(&record);
        assert_eq!(blocks.len(), base + (1 + 1) + (1 + 2));

        let tail: Vec<&ContentBlock> = blocks[base..].iter().collect();
        assert_eq!(*tail[0], ContentBlock::section("Особенности"));
        assert_eq!(*tail[2], ContentBlock::section("Действия"));
        assert_eq!(
            *tail[4],
            ContentBlock::description("Короткий лук", "Дальнобойная атака оружием.")
        );
    }

    #[test]
    fn test_empty_groups_emit_no_section() {
        let mut record = make_record();
        record.reactions = vec![make_trait("Парирование", "+2 к КД.")];
        let blocks = builder().build(&record);
        let sections: Vec<&ContentBlock> = blocks
            .iter()
            .filter(|b| matches!(b, ContentBlock::Section { .. }))
            .collect();
        assert_eq!(sections, vec![&ContentBlock::section("Реакции")]);
    }

    #[test]
    fn test_trait_links_are_stripped() {
        let mut record = make_record();
        record.actions = vec![make_trait(
            "Колдовство",
            r#"Накладывает <a href="/spells/sleep">усыпление</a>."#,
        )];
        let blocks = builder().build(&record);
        assert_eq!(
            blocks.last().unwrap(),
            &ContentBlock::description("Колдовство", "Накладывает усыпление.")
        );
    }

    #[test]
    fn test_build_card_copies_title_and_image() {
        let card = builder().build_card(&make_record());
        let face = card.face.as_ref().unwrap();
        assert_eq!(face.title, "Гоблин (Goblin)");
        assert_eq!(face.icon, "imp-laugh");
        assert_eq!(face.background_image.as_deref(), Some("https://img/Goblin.jpg"));
        assert!(card.size.is_none());
    }
}
