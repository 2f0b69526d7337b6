use crate::prelude::*;
use crate::{err, tg, Result};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};
use teloxide::utils::markdown;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StatsCommandError {
    #[error("Пожалуйста, введите только числовой Dota ID.")]
    InvalidPlayerId { input: String },
}

pub(crate) async fn prompt_player_id(ctx: &tg::Ctx, msg: &Message) -> Result {
    ctx.bot
        .send_message(msg.chat.id, markdown::escape("Введите числовой Dota ID:"))
        .await?;
    Ok(())
}

#[instrument(skip(ctx, msg))]
pub(crate) async fn send_player_stats(ctx: &tg::Ctx, msg: &Message, player_id: &str) -> Result {
    let player_id = player_id.trim();

    if !player_id.is_ascii_number() {
        return Err(err!(StatsCommandError::InvalidPlayerId { input: player_id }));
    }

    let stats = match ctx.dota.player_stats(player_id).await {
        Ok(Some(stats)) => stats,
        Ok(None) => {
            ctx.bot
                .send_message(msg.chat.id, markdown::escape("Игрок с таким ID не найден."))
                .await?;
            return Ok(());
        }
        Err(err) => {
            warn!(err = tracing_err(&err), "Couldn't fetch player stats");

            let text = if tg::is_http_status_error(&err) {
                "Не удалось получить данные. Возможно, сервис недоступен."
            } else {
                "Произошла ошибка при получении данных."
            };

            ctx.bot
                .send_message(msg.chat.id, tg::failure_text(text, &err))
                .await?;
            return Ok(());
        }
    };

    ctx.bot
        .reply_chunked(msg, &markdown::escape(&stats.display(player_id)))
        .await?;

    let history = InlineKeyboardButton::web_app(
        "Подробная история игр",
        WebAppInfo {
            url: ctx.dota.player_url(player_id),
        },
    );

    ctx.bot
        .send_message(msg.chat.id, markdown::escape("Смотреть всю историю матчей:"))
        .reply_markup(InlineKeyboardMarkup::new([[history]]))
        .await?;

    Ok(())
}
