//! Reply keyboard of the bot and plain text messages that aren't commands

use crate::prelude::*;
use crate::tg::{self, stats, updates};
use crate::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup};
use teloxide::utils::markdown;

pub(crate) const STATS_BUTTON: &str = "Проверить статистику";
pub(crate) const UPDATES_BUTTON: &str = "Обновления";

pub(crate) fn keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([[
        KeyboardButton::new(STATS_BUTTON),
        KeyboardButton::new(UPDATES_BUTTON),
    ]])
    .resize_keyboard()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuAction {
    CheckStats,
    Updates,
    PlayerId(String),
    Unknown,
}

impl MenuAction {
    pub(crate) fn filter(msg: Message) -> Option<Self> {
        Self::parse(msg.text()?, msg.chat.is_private())
    }

    /// Only the buttons are recognized outside of private chats, because
    /// the bot must not react to every message in a group
    fn parse(text: &str, is_private: bool) -> Option<Self> {
        let text = text.trim();

        // Commands are handled by dedicated branches. Unrecognized ones
        // including the owner commands sent by regular users are ignored
        if text.starts_with('/') {
            return None;
        }

        let action = match text {
            STATS_BUTTON => Self::CheckStats,
            UPDATES_BUTTON => Self::Updates,
            _ if !is_private => return None,
            _ if text.is_ascii_number() => Self::PlayerId(text.to_owned()),
            _ => Self::Unknown,
        };

        Some(action)
    }
}

#[async_trait]
impl tg::cmd::Command for MenuAction {
    async fn handle(self, ctx: &tg::Ctx, msg: &Message) -> Result {
        match self {
            Self::CheckStats => stats::prompt_player_id(ctx, msg).await?,
            Self::Updates => updates::send_latest(ctx, msg).await?,
            Self::PlayerId(player_id) => stats::send_player_stats(ctx, msg, &player_id).await?,
            Self::Unknown => {
                let text = "Неизвестная команда. Пожалуйста, используйте кнопки.";
                ctx.bot
                    .send_message(msg.chat.id, markdown::escape(text))
                    .reply_markup(keyboard())
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_private() {
        let parse = |text| MenuAction::parse(text, true);

        assert_eq!(parse("Обновления"), Some(MenuAction::Updates));
        assert_eq!(parse(" Проверить статистику "), Some(MenuAction::CheckStats));
        assert_eq!(
            parse("741409144"),
            Some(MenuAction::PlayerId("741409144".to_owned()))
        );
        assert_eq!(parse("hello"), Some(MenuAction::Unknown));
        assert_eq!(parse("-12"), Some(MenuAction::Unknown));
        assert_eq!(parse("/getlog"), None);
        assert_eq!(parse("/unknown_command"), None);
    }

    #[test]
    fn parse_group() {
        let parse = |text| MenuAction::parse(text, false);

        assert_eq!(parse("Обновления"), Some(MenuAction::Updates));
        assert_eq!(parse("741409144"), None);
        assert_eq!(parse("hello"), None);
    }
}
