//! Rust analyzer is very slow on processing requester extension here, so extracted
//! it to a separate module to limit the scope of analysis.

use async_trait::async_trait;
use easy_ext::ext;
use patch_fmt::OverflowPolicy;
use teloxide::requests::Requester;
use teloxide::types::Message;

/// Already escaped MarkdownV2
const TRUNCATED_SUFFIX: &str = r"_\(текст обрезан\)_";

/// There is [`RequesterExt`] in [`teloxide::prelude`]. We name this symbol
/// different to avoid collisions.
#[ext(UtilRequesterExt)]
#[async_trait]
pub(crate) impl<T> T
where
    T: Requester + Sync,
{
    /// Send a message to the chat, but split it into multiple ones along the
    /// line boundaries if it's too long. The text must already be escaped.
    async fn reply_chunked(&self, msg: &Message, text: &str) -> Result<(), T::Err> {
        self.reply_fitted(msg, text, &OverflowPolicy::Split).await
    }

    async fn reply_fitted(
        &self,
        msg: &Message,
        text: &str,
        policy: &OverflowPolicy,
    ) -> Result<(), T::Err> {
        for chunk in message_chunks(text, policy) {
            self.send_message(msg.chat.id, chunk).await?;
        }
        Ok(())
    }

    async fn reply_help_md_escaped<Cmd: teloxide::utils::command::BotCommands>(
        &self,
        msg: &Message,
    ) -> Result<(), T::Err> {
        let help = teloxide::utils::markdown::escape(&Cmd::descriptions().to_string());
        self.reply_chunked(msg, &help).await
    }
}

/// Splitting never breaks a line, so a single line that is still too long
/// for Telegram is truncated instead of being rejected by it.
fn message_chunks(text: &str, policy: &OverflowPolicy) -> Vec<String> {
    let truncate = OverflowPolicy::Truncate {
        suffix: format!("\n{TRUNCATED_SUFFIX}"),
    };

    patch_fmt::fit(text, patch_fmt::TG_MESSAGE_MAX_LEN, policy)
        .into_iter()
        .flat_map(|chunk| {
            if chunk.chars().count() <= patch_fmt::TG_MESSAGE_MAX_LEN {
                return vec![chunk];
            }
            patch_fmt::fit(&chunk, patch_fmt::TG_MESSAGE_MAX_LEN, &truncate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patch_fmt::TG_MESSAGE_MAX_LEN;

    #[test]
    fn oversized_line_is_truncated() {
        let line = patch_fmt::escape(&"a.".repeat(2100));
        assert_eq!(line.chars().count(), 6300);

        let text = format!("*Title*\n\n{line}\nAfter");
        let chunks = message_chunks(&text, &OverflowPolicy::Split);

        let lens: Vec<_> = chunks.iter().map(|chunk| chunk.chars().count()).collect();
        assert!(lens.iter().all(|&len| len <= TG_MESSAGE_MAX_LEN), "{lens:?}");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "*Title*\n");
        assert!(chunks[1].starts_with("a\\.a\\."));
        assert!(chunks[1].ends_with(&format!("\n{TRUNCATED_SUFFIX}")));
        assert!(!chunks[1].ends_with(&format!("\\\n{TRUNCATED_SUFFIX}")));
        assert_eq!(chunks[2], "After");
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(
            message_chunks("*Title*\n\nBody", &OverflowPolicy::Split),
            ["*Title*\n\nBody"]
        );
    }
}
