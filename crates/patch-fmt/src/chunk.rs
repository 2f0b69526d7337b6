use std::str::Split;

/// Maximum length of a Telegram text message
pub const TG_MESSAGE_MAX_LEN: usize = 4096;

/// What to do with the text that doesn't fit into a single message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Split the text into several messages along the line boundaries
    Split,

    /// Cut the text and append the given suffix to it. The suffix
    /// is inserted verbatim, so it must already be escaped.
    ///
    /// The cut happens after the last line that fits. A single line that
    /// doesn't fit is cut mid-line, but never right after an escaping backslash.
    Truncate { suffix: String },
}

/// Splits the text into chunks along line boundaries. Consecutive lines are
/// accumulated into a chunk while the chunk stays shorter than `max_len` chars.
///
/// Lines are never split. A single line longer than `max_len` is returned
/// as its own chunk. Joining the chunks with `\n` gives back the original text.
pub fn chunk(text: &str, max_len: usize) -> Chunks<'_> {
    Chunks {
        lines: (!text.is_empty()).then(|| text.split('\n')),
        pending: None,
        max_len,
    }
}

/// Applies the overflow policy to the text
pub fn fit(text: &str, max_len: usize, policy: &OverflowPolicy) -> Vec<String> {
    match policy {
        OverflowPolicy::Split => chunk(text, max_len).collect(),
        OverflowPolicy::Truncate { suffix } => vec![truncate(text, max_len, suffix)],
    }
}

fn truncate(text: &str, max_len: usize, suffix: &str) -> String {
    if text.chars().count() <= max_len {
        return text.to_owned();
    }

    let kept = max_len.saturating_sub(suffix.chars().count());
    let end = text.char_indices().nth(kept).map_or(text.len(), |(i, _)| i);
    let mut prefix = &text[..end];

    // Whole lines only, so that the markup spans of the kept lines stay balanced
    if let Some(newline) = prefix.rfind('\n') {
        prefix = &prefix[..=newline];
    }

    // The escaping backslash must stay with the char it escapes
    let backslashes = prefix.len() - prefix.trim_end_matches('\\').len();
    if backslashes % 2 == 1 {
        prefix = &prefix[..prefix.len() - 1];
    }

    format!("{prefix}{suffix}")
}

/// Iterator returned from [`chunk`]. Clone it to restart the iteration
/// from the same position.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    lines: Option<Split<'a, char>>,
    pending: Option<&'a str>,
    max_len: usize,
}

impl Iterator for Chunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let lines = self.lines.as_mut()?;

        let mut chunk = match self.pending.take().or_else(|| lines.next()) {
            Some(line) => line.to_owned(),
            None => return None,
        };
        let mut chunk_len = chunk.chars().count();

        for line in lines.by_ref() {
            let line_len = line.chars().count();

            if chunk_len + line_len + 1 >= self.max_len {
                self.pending = Some(line);
                break;
            }

            chunk.push('\n');
            chunk.push_str(line);
            chunk_len += line_len + 1;
        }

        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    #[track_caller]
    fn assert_chunks(text: &str, max_len: usize, expected: Expect) {
        let chunks: Vec<_> = chunk(text, max_len).collect();
        assert_eq!(chunks.join("\n"), text, "chunks must reconstruct the input");
        expected.assert_debug_eq(&chunks);
    }

    #[test]
    fn five_lines_of_twenty() {
        let line = "a".repeat(20);
        let text = vec![line.as_str(); 5].join("\n");

        let chunks: Vec<_> = chunk(&text, 50).collect();

        assert!(chunks.len() >= 2);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 50));
        assert_eq!(chunks.join("\n"), text);
        assert_eq!(chunks.iter().map(|chunk| chunk.lines().count()).collect::<Vec<_>>(), [2, 2, 1]);
    }

    #[test]
    fn smoke() {
        use assert_chunks as test;

        test("", 10, expect![[r#"
            []
        "#]]);
        test("short", 10, expect![[r#"
            [
                "short",
            ]
        "#]]);
        test("aaa\nbbb\nccc", 7, expect![[r#"
            [
                "aaa",
                "bbb",
                "ccc",
            ]
        "#]]);
        test("aaa\nbbb\nccc", 8, expect![[r#"
            [
                "aaa\nbbb",
                "ccc",
            ]
        "#]]);
    }

    #[test]
    fn oversized_line_is_kept_whole() {
        use assert_chunks as test;

        test("ab\nabcdefghijkl\ncd", 5, expect![[r#"
            [
                "ab",
                "abcdefghijkl",
                "cd",
            ]
        "#]]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        use assert_chunks as test;

        test("abc\n\n\nabc\n", 4, expect![[r#"
            [
                "abc",
                "\n",
                "abc",
                "",
            ]
        "#]]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let text = "привет\nмир";
        let chunks: Vec<_> = chunk(text, 11).collect();
        assert_eq!(chunks, [text]);
    }

    #[test]
    fn restartable() {
        let chunks = chunk("a\nb\nc", 2);
        let mut iter = chunks.clone();
        assert_eq!(iter.next().as_deref(), Some("a"));

        let rest = iter.clone();
        assert_eq!(iter.collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(rest.collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(chunks.count(), 3);
    }

    #[test]
    fn truncation() {
        let policy = OverflowPolicy::Truncate {
            suffix: "…".to_owned(),
        };

        assert_eq!(fit("short", 10, &policy), ["short"]);
        assert_eq!(fit("0123456789abc", 10, &policy), ["012345678…"]);
        assert_eq!(fit("a\nb", 10, &OverflowPolicy::Split), ["a\nb"]);
    }

    #[test]
    fn truncation_keeps_escapes_whole() {
        let policy = OverflowPolicy::Truncate {
            suffix: "…".to_owned(),
        };

        let text = crate::escape("ab.cd.ef.gh");
        assert_eq!(text, "ab\\.cd\\.ef\\.gh");
        assert_eq!(fit(&text, 4, &policy), ["ab…"]);
        assert_eq!(fit(&text, 5, &policy), ["ab\\.…"]);

        // Escaped backslash pairs aren't dangling
        assert_eq!(fit("a\\\\bcdef", 4, &policy), ["a\\\\…"]);
    }

    #[test]
    fn truncation_prefers_line_boundaries() {
        let policy = OverflowPolicy::Truncate {
            suffix: "_\\(cut\\)_".to_owned(),
        };

        let text = "*Title*\n\nfirst line\n*bold span that doesn't fit*";
        let truncated = fit(text, 30, &policy);

        expect![[r#"
            [
                "*Title*\n\nfirst line\n_\\(cut\\)_",
            ]
        "#]]
        .assert_debug_eq(&truncated);
        assert!(truncated[0].chars().count() <= 30);
    }
}
