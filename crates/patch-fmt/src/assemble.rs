use crate::escape::{bold, escape, italic};
use crate::keywords::GENERIC_SKILL_GLYPH;
use crate::model::*;
use crate::Formatter;

impl Formatter<'_> {
    /// Builds the MarkdownV2 message body for the patch note.
    ///
    /// Sections follow the input order: the title, the body text, the items
    /// and then the heroes. If there is nothing but the title, then only the
    /// bold title is returned. Use [`PatchNote::is_empty`] to detect that.
    pub fn assemble(&self, note: &PatchNote) -> String {
        let mut sections = vec![bold(&note.title)];

        let body = note.body_text.as_deref().map(str::trim);
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            sections.push(escape(&self.decorate(body)));
        }

        sections.extend(note.items.iter().map(|item| self.item_section(item)));
        sections.extend(note.heroes.iter().map(|hero| self.hero_section(hero)));

        sections.join("\n\n")
    }

    /// Item lines aren't indented, each of them starts with the direction glyph
    fn item_section(&self, item: &ItemChange) -> String {
        let lines = item
            .body_lines
            .iter()
            .map(|line| change_line(item.direction, &escape(line)));

        std::iter::once(bold(&item.name)).chain(lines).collect::<Vec<_>>().join("\n")
    }

    fn hero_section(&self, hero: &HeroChange) -> String {
        let header = bold(&format!("{} {}", self.locale.hero_header(), hero.display_name));

        let upgrades = hero.upgrades.iter().map(|upgrade| {
            let label = format!("{} {}", upgrade.kind.glyph(), bold(self.locale.upgrade_kind(upgrade.kind)));
            self.sub_section(label, upgrade.direction, &upgrade.body_lines)
        });

        let talents = hero.talents.iter().map(|talent| {
            let skill_glyph = self
                .keywords
                .skill_glyph(&talent.skill_name)
                .unwrap_or(GENERIC_SKILL_GLYPH);

            let mut label = format!("{} {skill_glyph} {}", talent.tier.glyph(), bold(&talent.skill_name));

            if let Some(tier) = self.locale.talent_tier(talent.tier) {
                label.push(' ');
                label.push_str(&italic(tier));
            }

            self.sub_section(label, talent.direction, &talent.body_lines)
        });

        std::iter::once(header)
            .chain(upgrades)
            .chain(talents)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn sub_section(&self, label: String, direction: ChangeDirection, lines: &[String]) -> String {
        let lines = lines
            .iter()
            .map(|line| change_line(direction, &escape(&self.decorate(line))));

        std::iter::once(label).chain(lines).collect::<Vec<_>>().join("\n")
    }
}

fn change_line(direction: ChangeDirection, escaped: &str) -> String {
    format!("{} {escaped}", direction.glyph())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeywordTable, Locale};
    use expect_test::expect;

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|&line| line.to_owned()).collect()
    }

    #[test]
    fn title_only() {
        let formatter = Formatter::new(KeywordTable::builtin(), Locale::Ru);

        for body_text in [None, Some(""), Some("  \n")] {
            let note = PatchNote {
                title: "Update 7.36".to_owned(),
                body_text: body_text.map(ToOwned::to_owned),
                ..Default::default()
            };
            assert_eq!(formatter.assemble(&note), r"*Update 7\.36*");
        }
    }

    #[test]
    fn item_change() {
        let formatter = Formatter::new(KeywordTable::builtin(), Locale::En);

        let note = PatchNote {
            title: "Update 7.36".to_owned(),
            items: vec![ItemChange {
                name: "Blink Dagger".to_owned(),
                direction: ChangeDirection::Decrease,
                body_lines: lines(&["Cooldown increased from 12 to 15"]),
            }],
            ..Default::default()
        };

        let actual = formatter.assemble(&note);

        assert!(actual.contains("*Blink Dagger*\n🔽 Cooldown increased from 12 to 15"));

        expect![[r#"
            *Update 7\.36*

            *Blink Dagger*
            🔽 Cooldown increased from 12 to 15"#]]
        .assert_eq(&actual);
    }

    #[test]
    fn full_note() {
        let table = KeywordTable::new([("mana break", "🌀"), ("cooldown", "⏳")]);
        let formatter = Formatter::new(&table, Locale::En);

        let note = PatchNote {
            title: "Update 1.5 (beta)".to_owned(),
            body_text: Some("Aghanim Shard changed for everyone!".to_owned()),
            items: vec![ItemChange {
                name: "Heart of Tarrasque".to_owned(),
                direction: ChangeDirection::Increase,
                body_lines: lines(&["+5 strength", "Regen 1.5%"]),
            }],
            heroes: vec![HeroChange {
                display_name: "Anti-Mage".to_owned(),
                upgrades: vec![UpgradeChange {
                    kind: UpgradeKind::Scepter,
                    direction: ChangeDirection::Neutral,
                    body_lines: lines(&["Blink cooldown is now 3s."]),
                }],
                talents: vec![
                    TalentChange {
                        skill_name: "Mana Break".to_owned(),
                        tier: TalentTier::Legendary,
                        direction: ChangeDirection::Increase,
                        body_lines: lines(&["Burn increased to 50"]),
                    },
                    TalentChange {
                        skill_name: "Persectur".to_owned(),
                        tier: TalentTier::Unspecified,
                        direction: ChangeDirection::Decrease,
                        body_lines: lines(&["Slow no longer stacks"]),
                    },
                ],
            }],
        };

        expect![[r#"
            *Update 1\.5 \(beta\)*

            💎 Aghanim Shard 🔄 changed for everyone\!

            *Heart of Tarrasque*
            🔼 \+5 strength
            🔼 Regen 1\.5%

            *Changes for Anti\-Mage*

            🔱 *Aghanim Scepter*
            🔄 Blink ⏳ cooldown is now 3s\.

            🟧 🌀 *Mana Break* _Legendary_
            🔼 Burn 🔼 increased to 50

            ▫️ ✨ *Persectur*
            🔽 Slow 🔽 no longer stacks"#]]
        .assert_eq(&formatter.assemble(&note));
    }

    #[test]
    fn russian_labels() {
        let formatter = Formatter::new(KeywordTable::builtin(), Locale::Ru);

        let note = PatchNote {
            title: "Обновление".to_owned(),
            heroes: vec![HeroChange {
                display_name: "Pudge".to_owned(),
                upgrades: vec![UpgradeChange {
                    kind: UpgradeKind::Innate,
                    direction: ChangeDirection::Increase,
                    body_lines: vec![],
                }],
                talents: vec![TalentChange {
                    skill_name: "Rot".to_owned(),
                    tier: TalentTier::Epic,
                    direction: ChangeDirection::Neutral,
                    body_lines: lines(&["Радиус изменён"]),
                }],
            }],
            ..Default::default()
        };

        expect![[r#"
            *Обновление*

            *Изменения для Pudge*

            🧬 *Врождённая способность*

            🟪 🤢 *Rot* _Эпический_
            🔄 ⭕ Радиус 🔄 изменён"#]]
        .assert_eq(&formatter.assemble(&note));
    }
}
