use crate::model::{ChangeDirection, TalentTier, UpgradeKind};
use lazy_regex::{regex, Lazy, Regex};

/// Language of the chat the message is formatted for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Prefix of the header for a hero section, e.g. "Changes for Axe"
    pub fn hero_header(self) -> &'static str {
        match self {
            Self::Ru => "Изменения для",
            Self::En => "Changes for",
        }
    }

    pub fn upgrade_kind(self, kind: UpgradeKind) -> &'static str {
        match (self, kind) {
            (Self::Ru, UpgradeKind::Scepter) => "Аганим",
            (Self::Ru, UpgradeKind::Shard) => "Шард",
            (Self::Ru, UpgradeKind::Innate) => "Врождённая способность",
            (Self::Ru, UpgradeKind::Item) => "Предмет",
            (Self::En, UpgradeKind::Scepter) => "Aghanim Scepter",
            (Self::En, UpgradeKind::Shard) => "Aghanim Shard",
            (Self::En, UpgradeKind::Innate) => "Innate",
            (Self::En, UpgradeKind::Item) => "Item",
        }
    }

    /// `None` for [`TalentTier::Unspecified`]
    pub fn talent_tier(self, tier: TalentTier) -> Option<&'static str> {
        let label = match (self, tier) {
            (_, TalentTier::Unspecified) => return None,
            (Self::Ru, TalentTier::Legendary) => "Легендарный",
            (Self::Ru, TalentTier::Epic) => "Эпический",
            (Self::Ru, TalentTier::Rare) => "Редкий",
            (Self::Ru, TalentTier::AbilityLevel) => "Уровень способности",
            (Self::En, TalentTier::Legendary) => "Legendary",
            (Self::En, TalentTier::Epic) => "Epic",
            (Self::En, TalentTier::Rare) => "Rare",
            (Self::En, TalentTier::AbilityLevel) => "Ability level",
        };
        Some(label)
    }

    /// Patterns of the words that describe the direction of a change
    pub(crate) fn change_verbs(self) -> [(&'static Lazy<Regex>, ChangeDirection); 3] {
        match self {
            Self::Ru => [
                (regex!(r"(?i)\bувеличен[аоы]?\b"), ChangeDirection::Increase),
                (regex!(r"(?i)\bуменьшен[аоы]?\b|\bбольше\s+не\b"), ChangeDirection::Decrease),
                (regex!(r"(?i)\bизмен[её]н[аоы]?\b"), ChangeDirection::Neutral),
            ],
            Self::En => [
                (regex!(r"(?i)\bincreased\b"), ChangeDirection::Increase),
                (regex!(r"(?i)\bdecreased\b|\bno\s+longer\b"), ChangeDirection::Decrease),
                (regex!(r"(?i)\bchanged\b"), ChangeDirection::Neutral),
            ],
        }
    }
}
