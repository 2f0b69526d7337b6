use itertools::Itertools;
use lazy_regex::Lazy;
use regex::{Regex, RegexBuilder};

/// Emoji used for a talent when its skill name doesn't match any keyword
pub const GENERIC_SKILL_GLYPH: &str = "✨";

/// Phrases that are always decorated with their own glyphs before the
/// generic keywords are considered.
pub(crate) static PRIORITY_PHRASES: Lazy<[Keyword; 2]> = Lazy::new(|| {
    [
        Keyword::with_pattern("aghanim scepter", "🔱", r"(?i)\baghanim(?:'s)?\s+scepter\b"),
        Keyword::with_pattern("aghanim shard", "💎", r"(?i)\baghanim(?:'s)?\s+shard\b"),
    ]
});

static BUILTIN: Lazy<KeywordTable> = Lazy::new(|| KeywordTable::new(BUILTIN_KEYWORDS.iter().copied()));

const BUILTIN_KEYWORDS: &[(&str, &str)] = &[
    // Upgrade kinds
    ("scepter", "🔱"),
    ("аганим", "🔱"),
    ("shard", "💎"),
    ("шард", "💎"),
    ("innate", "🧬"),
    ("врождённая способность", "🧬"),
    ("врожденная способность", "🧬"),
    // Talent tiers
    ("legendary", "🟧"),
    ("легендарный", "🟧"),
    ("легендарный талант", "🟧"),
    ("epic", "🟪"),
    ("эпический", "🟪"),
    ("эпический талант", "🟪"),
    ("rare", "🟦"),
    ("редкий", "🟦"),
    ("редкий талант", "🟦"),
    // Stats
    ("cooldown", "⏳"),
    ("перезарядка", "⏳"),
    ("mana cost", "💧"),
    ("затраты маны", "💧"),
    ("damage", "💥"),
    ("урон", "💥"),
    ("magic damage", "🔮"),
    ("магический урон", "🔮"),
    ("physical damage", "🗡️"),
    ("физический урон", "🗡️"),
    ("pure damage", "⚪"),
    ("чистый урон", "⚪"),
    ("armor", "🛡️"),
    ("броня", "🛡️"),
    ("health", "❤️"),
    ("здоровье", "❤️"),
    ("attack speed", "⚔️"),
    ("скорость атаки", "⚔️"),
    ("movement speed", "👟"),
    ("скорость передвижения", "👟"),
    ("stun", "💫"),
    ("оглушение", "💫"),
    ("duration", "⏱️"),
    ("длительность", "⏱️"),
    ("radius", "⭕"),
    ("радиус", "⭕"),
    ("strength", "💪"),
    ("сила", "💪"),
    ("agility", "🏹"),
    ("ловкость", "🏹"),
    ("intelligence", "🧠"),
    ("интеллект", "🧠"),
    // Abilities
    ("blink", "⚡"),
    ("mana break", "🌀"),
    ("mana void", "🕳️"),
    ("counterspell", "🪞"),
    ("berserker's call", "📣"),
    ("culling blade", "🪓"),
    ("black hole", "🌌"),
    ("chronosphere", "⏳"),
    ("ravage", "🐙"),
    ("echo slam", "🌋"),
    ("fissure", "🪨"),
    ("freezing field", "❄️"),
    ("crystal nova", "❄️"),
    ("laguna blade", "🔥"),
    ("dragon slave", "🔥"),
    ("shadowraze", "👻"),
    ("requiem of souls", "💀"),
    ("moon glaives", "🌙"),
    ("starstorm", "🌠"),
    ("omnislash", "🗡️"),
    ("blade fury", "🌪️"),
    ("hookshot", "🪝"),
    ("meat hook", "🪝"),
    ("rot", "🤢"),
    ("reincarnation", "♻️"),
    ("arcane orb", "🔵"),
    ("sanity's eclipse", "🌑"),
    ("chain frost", "🧊"),
    ("finger of death", "☝️"),
    ("multicast", "🎲"),
];

/// Immutable mapping of lowercase keywords and phrases to display emoji.
///
/// Entries are stored longest-keyword-first, so that lookup and decoration
/// prefer the longest of overlapping keywords.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<Keyword>,
}

#[derive(Debug, Clone)]
pub(crate) struct Keyword {
    pub(crate) keyword: String,
    pub(crate) glyph: String,
    pub(crate) pattern: Regex,
}

impl Keyword {
    fn new(keyword: &str, glyph: &str) -> Self {
        let keyword = keyword.trim().to_lowercase();

        // Multi-word phrases match with any whitespace between the words
        let phrase = keyword.split_whitespace().map(regex::escape).join(r"\s+");

        let pattern = RegexBuilder::new(&format!(r"\b{phrase}\b"))
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|err| panic!("BUG: invalid keyword pattern for {keyword:?}: {err}"));

        Self {
            keyword,
            glyph: glyph.to_owned(),
            pattern,
        }
    }

    fn with_pattern(keyword: &str, glyph: &str, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|err| panic!("BUG: invalid keyword pattern for {keyword:?}: {err}"));

        Self {
            keyword: keyword.to_owned(),
            glyph: glyph.to_owned(),
            pattern,
        }
    }
}

impl KeywordTable {
    /// Creates a table from `(keyword, glyph)` pairs. Keywords are lowercased.
    /// If the same keyword appears several times, the first entry wins.
    pub fn new<K, G>(entries: impl IntoIterator<Item = (K, G)>) -> Self
    where
        K: AsRef<str>,
        G: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter(|(keyword, _)| !keyword.as_ref().trim().is_empty())
            .map(|(keyword, glyph)| Keyword::new(keyword.as_ref(), glyph.as_ref()))
            .unique_by(|entry| entry.keyword.clone())
            .sorted_by(|lhs, rhs| {
                let len = |entry: &Keyword| entry.keyword.chars().count();
                len(rhs).cmp(&len(lhs))
            })
            .collect();

        Self { entries }
    }

    /// The table shipped with the bot. It is initialized on the first access.
    pub fn builtin() -> &'static KeywordTable {
        &BUILTIN
    }

    /// Exact case-insensitive lookup of the keyword
    pub fn get(&self, keyword: &str) -> Option<&str> {
        let keyword = keyword.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.keyword == keyword)
            .map(|entry| entry.glyph.as_str())
    }

    /// Glyph for the skill name. Tries the exact match first, and then the
    /// longest keyword that occurs in the name as a whole word.
    pub fn skill_glyph(&self, skill_name: &str) -> Option<&str> {
        self.get(skill_name).or_else(|| {
            self.entries
                .iter()
                .find(|entry| entry.pattern.is_match(skill_name))
                .map(|entry| entry.glyph.as_str())
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Keyword] {
        &self.entries
    }
}
