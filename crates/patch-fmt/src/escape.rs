/// Characters that must be preceded with a backslash in Telegram MarkdownV2
pub const ESCAPED_CHARS: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes the text to be displayed "as is" in a MarkdownV2 message.
///
/// This is not idempotent. Escape the text exactly once, after all of the
/// content was assembled and decorated.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);

    for char in text.chars() {
        if ESCAPED_CHARS.contains(&char) {
            escaped.push('\\');
        }
        escaped.push(char);
    }

    escaped
}

/// Wraps the escaped text into bold markers
pub(crate) fn bold(text: &str) -> String {
    format!("*{}*", escape(text))
}

pub(crate) fn italic(text: &str) -> String {
    format!("_{}_", escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn plain_text_is_unchanged() {
        for text in ["", "Blink Dagger", "Изменения героев 🔥", "50% at level 10"] {
            assert_eq!(escape(text), text);
        }
    }

    #[test]
    fn every_special_char_is_escaped() {
        let text: String = ESCAPED_CHARS.iter().collect();
        let escaped = escape(&text);

        let mut chars = escaped.chars();
        for special in ESCAPED_CHARS {
            assert_eq!(chars.next(), Some('\\'));
            assert_eq!(chars.next(), Some(special));
        }
        assert_eq!(chars.next(), None);
    }

    #[test]
    fn smoke() {
        expect![[r#"Update 7\.36 \(hotfix\) \- cooldown 12 \-\> 15\!"#]]
            .assert_eq(&escape("Update 7.36 (hotfix) - cooldown 12 -> 15!"));

        // Not idempotent
        expect![[r#"a\\.b"#]].assert_eq(&escape(&escape("a.b")));
    }
}
