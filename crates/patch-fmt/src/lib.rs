//! Formatting of dota1x6 patch notes into Telegram MarkdownV2 messages.
//!
//! The formatter is pure. It never fails and never does any I/O, so it can
//! be shared between any number of concurrent handlers.

mod assemble;
mod chunk;
mod decorate;
mod escape;
mod keywords;
mod locale;
mod model;

pub use chunk::*;
pub use escape::{escape, ESCAPED_CHARS};
pub use keywords::{KeywordTable, GENERIC_SKILL_GLYPH};
pub use locale::Locale;
pub use model::*;

/// Decorates and assembles patch notes using the given keyword table
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'t> {
    keywords: &'t KeywordTable,
    locale: Locale,
}

impl<'t> Formatter<'t> {
    pub fn new(keywords: &'t KeywordTable, locale: Locale) -> Self {
        Self { keywords, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Default for Formatter<'static> {
    fn default() -> Self {
        Self::new(KeywordTable::builtin(), Locale::default())
    }
}
