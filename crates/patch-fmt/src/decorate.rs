use crate::keywords::{Keyword, PRIORITY_PHRASES};
use crate::Formatter;
use std::ops::Range;

impl Formatter<'_> {
    /// Inserts emoji glyphs before the keywords found in the text and before
    /// the words that describe the direction of a change.
    ///
    /// Each keyword decorates only its first occurrence, that doesn't overlap
    /// with an occurrence of a longer keyword. The Aghanim Scepter/Shard
    /// phrases always take precedence over the keywords from the table.
    pub fn decorate(&self, text: &str) -> String {
        let keywords = PRIORITY_PHRASES.iter().chain(self.keywords.entries());
        let text = insert_keyword_glyphs(text, keywords);
        self.insert_change_verb_glyphs(text)
    }

    fn insert_change_verb_glyphs(&self, text: String) -> String {
        self.locale
            .change_verbs()
            .into_iter()
            .fold(text, |text, (pattern, direction)| {
                let glyph = direction.glyph();
                pattern
                    .replace_all(&text, |caps: &regex::Captures<'_>| {
                        format!("{glyph} {}", &caps[0])
                    })
                    .into_owned()
            })
    }
}

fn insert_keyword_glyphs<'k>(text: &str, keywords: impl Iterator<Item = &'k Keyword>) -> String {
    let mut claimed: Vec<Range<usize>> = vec![];
    let mut insertions: Vec<(usize, &str)> = vec![];

    for keyword in keywords {
        let occurrence = keyword
            .pattern
            .find_iter(text)
            .map(|found| found.range())
            .find(|range| !claimed.iter().any(|other| overlaps(range, other)));

        if let Some(range) = occurrence {
            insertions.push((range.start, keyword.glyph.as_str()));
            claimed.push(range);
        }
    }

    if insertions.is_empty() {
        return text.to_owned();
    }

    insertions.sort_by_key(|&(offset, _)| offset);

    let extra: usize = insertions.iter().map(|(_, glyph)| glyph.len() + 1).sum();
    let mut decorated = String::with_capacity(text.len() + extra);
    let mut copied = 0;

    for (offset, glyph) in insertions {
        decorated.push_str(&text[copied..offset]);
        decorated.push_str(glyph);
        decorated.push(' ');
        copied = offset;
    }

    decorated.push_str(&text[copied..]);
    decorated
}

fn overlaps(lhs: &Range<usize>, rhs: &Range<usize>) -> bool {
    lhs.start < rhs.end && rhs.start < lhs.end
}

#[cfg(test)]
mod tests {
    use crate::{Formatter, KeywordTable, Locale};
    use expect_test::{expect, Expect};

    #[track_caller]
    fn assert_decorate(keywords: &[(&str, &str)], locale: Locale, text: &str, expected: Expect) {
        let table = KeywordTable::new(keywords.iter().copied());
        let formatter = Formatter::new(&table, locale);
        expected.assert_eq(&formatter.decorate(text));
    }

    #[test]
    fn keyword_case_is_preserved() {
        use assert_decorate as test;

        test(
            &[("blink", "⚡")],
            Locale::En,
            "Antimage Blink deals damage",
            expect!["Antimage ⚡ Blink deals damage"],
        );
        test(
            &[("blink", "⚡")],
            Locale::En,
            "blink, BLINK and Blinking",
            expect!["⚡ blink, BLINK and Blinking"],
        );
    }

    #[test]
    fn no_matches() {
        use assert_decorate as test;

        test(&[("blink", "⚡")], Locale::En, "", expect![""]);
        test(
            &[("blink", "⚡")],
            Locale::En,
            "Nothing to see here",
            expect!["Nothing to see here"],
        );
    }

    #[test]
    fn longest_keyword_wins() {
        use assert_decorate as test;

        test(
            &[("damage", "💥"), ("magic damage", "🔮")],
            Locale::En,
            "Deals magic damage, then physical damage",
            expect!["Deals 🔮 magic damage, then physical 💥 damage"],
        );
        test(
            &[("damage", "💥"), ("magic damage", "🔮")],
            Locale::En,
            "Deals magic  damage",
            expect!["Deals 🔮 magic  damage"],
        );
    }

    #[test]
    fn aghanim_phrases_take_precedence() {
        use assert_decorate as test;

        test(
            &[("scepter", "❌"), ("aghanim", "❌"), ("shard", "❌")],
            Locale::En,
            "Aghanim Scepter upgrade. Aghanim's shard now stuns",
            expect!["🔱 Aghanim Scepter upgrade. 💎 Aghanim's shard now stuns"],
        );
        test(
            &[("scepter", "🪄")],
            Locale::En,
            "Aghanim Scepter replaces the old scepter",
            expect!["🔱 Aghanim Scepter replaces the old 🪄 scepter"],
        );
    }

    #[test]
    fn change_verbs() {
        use assert_decorate as test;

        test(
            &[("cooldown", "⏳")],
            Locale::En,
            "Cooldown increased, damage decreased, no longer stuns, radius changed",
            expect![
                "⏳ Cooldown 🔼 increased, damage 🔽 decreased, 🔽 no longer stuns, radius 🔄 changed"
            ],
        );
        test(
            &[("урон", "💥")],
            Locale::Ru,
            "Урон увеличен, радиус уменьшен. Больше не оглушает. Изменена механика. Изменения героев",
            expect![
                "💥 Урон 🔼 увеличен, радиус 🔽 уменьшен. 🔽 Больше не оглушает. 🔄 Изменена механика. Изменения героев"
            ],
        );
        // Verbs of the other locale are left untouched
        test(&[], Locale::Ru, "Cooldown increased", expect!["Cooldown increased"]);
    }

    #[test]
    fn builtin_table() {
        let formatter = Formatter::new(crate::KeywordTable::builtin(), Locale::Ru);
        expect!["🔥 Laguna Blade теперь наносит 🔮 магический урон"]
            .assert_eq(&formatter.decorate("Laguna Blade теперь наносит магический урон"));
    }
}
