//! Permissive decoding of the update records returned by the stats API.
//!
//! The shape of the records changes from release to release, so every field
//! is optional, known fields have several aliases, values of unexpected types
//! are treated as absent and unknown fields are ignored. Decoding never fails.

use crate::prelude::*;
use patch_fmt::{
    ChangeDirection, HeroChange, ItemChange, PatchNote, TalentChange, TalentTier, UpgradeChange,
    UpgradeKind,
};
use serde_json::{Map, Value};

const TITLE: &[&str] = &["title", "name", "header"];
const BODY: &[&str] = &["bodyText", "body", "text", "description"];
const ITEMS: &[&str] = &["items", "itemChanges"];
const HEROES: &[&str] = &["heroes", "heroChanges"];
const HERO_NAME: &[&str] = &["heroName", "displayName", "name", "hero"];
const UPGRADES: &[&str] = &["upgrades", "upgradeChanges"];
const TALENTS: &[&str] = &["talents", "talentChanges"];
const ITEM_NAME: &[&str] = &["itemName", "name", "item"];
const SKILL_NAME: &[&str] = &["skillName", "skill", "ability", "name"];
const KIND: &[&str] = &["kind", "type"];
const TIER: &[&str] = &["tier", "rarity"];
const DIRECTION: &[&str] = &["changeDirection", "direction"];
const LINES: &[&str] = &["bodyLines", "lines", "changes", "body"];
const SLUG: &[&str] = &["url", "slug"];

/// Path segment of the update page on the site
pub(crate) fn slug(raw: &Value) -> Option<&str> {
    Record::new(raw)?.str(SLUG)
}

pub(crate) fn decode(raw: &Value) -> PatchNote {
    let Some(record) = Record::new(raw) else {
        return PatchNote::default();
    };

    PatchNote {
        title: record.str(TITLE).unwrap_or_default().to_owned(),
        body_text: record.str(BODY).map(ToOwned::to_owned),
        items: record.records(ITEMS).filter_map(decode_item).collect(),
        heroes: record.records(HEROES).filter_map(decode_hero).collect(),
    }
}

/// Records with neither a name nor any lines carry no information
fn decode_item(record: Record<'_>) -> Option<ItemChange> {
    let name = record.str(ITEM_NAME).unwrap_or_default().to_owned();
    let (direction, body_lines) = record.lines();

    if name.is_empty() && body_lines.is_empty() {
        return None;
    }

    Some(ItemChange {
        name,
        direction,
        body_lines,
    })
}

fn decode_hero(record: Record<'_>) -> Option<HeroChange> {
    let hero = HeroChange {
        display_name: record.str(HERO_NAME).unwrap_or_default().to_owned(),
        upgrades: record.records(UPGRADES).filter_map(decode_upgrade).collect(),
        talents: record.records(TALENTS).filter_map(decode_talent).collect(),
    };

    if hero.display_name.is_empty() && hero.upgrades.is_empty() && hero.talents.is_empty() {
        return None;
    }

    Some(hero)
}

fn decode_upgrade(record: Record<'_>) -> Option<UpgradeChange> {
    let (direction, body_lines) = record.lines();
    if body_lines.is_empty() {
        return None;
    }

    let kind = record.str(KIND).and_then(parse_upgrade_kind).unwrap_or_else(|| {
        debug!(kind = ?record.str(KIND), "Unknown upgrade kind, assuming innate");
        UpgradeKind::Innate
    });

    Some(UpgradeChange {
        kind,
        direction,
        body_lines,
    })
}

fn decode_talent(record: Record<'_>) -> Option<TalentChange> {
    let skill_name = record.str(SKILL_NAME).unwrap_or_default().to_owned();
    let (direction, body_lines) = record.lines();

    if skill_name.is_empty() && body_lines.is_empty() {
        return None;
    }

    Some(TalentChange {
        skill_name,
        tier: record.str(TIER).map(parse_talent_tier).unwrap_or_default(),
        direction,
        body_lines,
    })
}

#[derive(Clone, Copy)]
struct Record<'a>(&'a Map<String, Value>);

impl<'a> Record<'a> {
    fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self)
    }

    fn get(self, aliases: &[&str]) -> Option<&'a Value> {
        aliases.iter().find_map(|alias| self.0.get(*alias))
    }

    /// The first alias that holds a non-blank string wins
    fn str(self, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias)?.as_str())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    fn records(self, aliases: &[&str]) -> impl Iterator<Item = Record<'a>> {
        self.get(aliases)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Record::new)
    }

    /// Body lines of the record with the markers stripped, and the direction
    /// of the change. The direction declared by the record wins over the
    /// one of the first line marker.
    fn lines(self) -> (ChangeDirection, Vec<String>) {
        let raw_lines: Vec<&str> = match self.get(LINES) {
            Some(Value::String(text)) => text.lines().collect(),
            Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
            _ => vec![],
        };

        let mut marked_direction = None;

        let lines = raw_lines
            .into_iter()
            .filter_map(|line| {
                let (direction, line) = strip_marker(line.trim());
                if marked_direction.is_none() {
                    marked_direction = direction;
                }
                Some(line.to_owned()).filter(|line| !line.is_empty())
            })
            .collect();

        let direction = self
            .str(DIRECTION)
            .and_then(parse_direction)
            .or(marked_direction)
            .unwrap_or_default();

        (direction, lines)
    }
}

/// Leading `+`, `-` or `~` token of the line
fn strip_marker(line: &str) -> (Option<ChangeDirection>, &str) {
    let direction = match line.chars().next() {
        Some('+') => ChangeDirection::Increase,
        Some('-') => ChangeDirection::Decrease,
        Some('~') => ChangeDirection::Neutral,
        _ => return (None, line),
    };

    let rest = &line[1..];

    // Negative numbers such as `-15%` are not markers
    if !rest.starts_with(char::is_whitespace) {
        return (None, line);
    }

    (Some(direction), rest.trim_start())
}

fn parse_direction(direction: &str) -> Option<ChangeDirection> {
    let direction = match direction.to_lowercase().as_str() {
        "increase" | "increased" | "buff" | "up" | "+" => ChangeDirection::Increase,
        "decrease" | "decreased" | "nerf" | "down" | "-" => ChangeDirection::Decrease,
        "neutral" | "change" | "changed" | "rework" | "~" => ChangeDirection::Neutral,
        _ => return None,
    };
    Some(direction)
}

fn parse_upgrade_kind(kind: &str) -> Option<UpgradeKind> {
    let kind = match kind.to_lowercase().as_str() {
        "scepter" | "aghanim" | "aghanim scepter" | "aghanims scepter" | "аганим" => {
            UpgradeKind::Scepter
        }
        "shard" | "aghanim shard" | "aghanims shard" | "шард" => UpgradeKind::Shard,
        "innate" | "врождённая" | "врожденная" => UpgradeKind::Innate,
        "item" | "предмет" => UpgradeKind::Item,
        _ => return None,
    };
    Some(kind)
}

fn parse_talent_tier(tier: &str) -> TalentTier {
    let normalized: String = tier
        .chars()
        .filter(|char| char.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.as_str() {
        "legendary" | "orange" | "легендарный" => TalentTier::Legendary,
        "epic" | "purple" | "эпический" => TalentTier::Epic,
        "rare" | "blue" | "редкий" => TalentTier::Rare,
        "abilitylevel" | "level" | "уровень" => TalentTier::AbilityLevel,
        _ => TalentTier::Unspecified,
    }
}
