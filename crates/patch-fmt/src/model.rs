//! Normalized patch note model. Upstream payloads are decoded into these
//! types before they reach the formatter, so every field here is already
//! present (possibly empty).

/// One update (patch) release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchNote {
    pub title: String,
    pub body_text: Option<String>,
    pub items: Vec<ItemChange>,
    pub heroes: Vec<HeroChange>,
}

impl PatchNote {
    /// There is nothing to report except for the title
    pub fn is_empty(&self) -> bool {
        let no_body = self
            .body_text
            .as_deref()
            .map_or(true, |body| body.trim().is_empty());

        no_body && self.items.is_empty() && self.heroes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroChange {
    pub display_name: String,
    pub upgrades: Vec<UpgradeChange>,
    pub talents: Vec<TalentChange>,
}

/// Scepter, shard or innate adjustment of a hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeChange {
    pub kind: UpgradeKind,
    pub direction: ChangeDirection,
    pub body_lines: Vec<String>,
}

/// Item adjustment. The kind of this change is always [`UpgradeKind::Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChange {
    pub name: String,
    pub direction: ChangeDirection,
    pub body_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalentChange {
    /// May match a known ability in the keyword table
    pub skill_name: String,
    pub tier: TalentTier,
    pub direction: ChangeDirection,
    pub body_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum UpgradeKind {
    Scepter,
    Shard,
    Innate,
    Item,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ChangeDirection {
    Increase,
    Decrease,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum TalentTier {
    Legendary,
    Epic,
    Rare,
    AbilityLevel,
    #[default]
    Unspecified,
}

impl UpgradeKind {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Scepter => "🔱",
            Self::Shard => "💎",
            Self::Innate => "🧬",
            Self::Item => "🎒",
        }
    }
}

impl ChangeDirection {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Increase => "🔼",
            Self::Decrease => "🔽",
            Self::Neutral => "🔄",
        }
    }
}

impl TalentTier {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Legendary => "🟧",
            Self::Epic => "🟪",
            Self::Rare => "🟦",
            Self::AbilityLevel => "🔢",
            Self::Unspecified => "▫️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_empty() {
        let note = PatchNote {
            title: "7.36".to_owned(),
            body_text: Some(" \n ".to_owned()),
            ..Default::default()
        };
        assert!(note.is_empty());

        let note = PatchNote {
            body_text: Some("text".to_owned()),
            ..note
        };
        assert!(!note.is_empty());
    }
}
