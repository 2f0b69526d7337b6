use crate::prelude::*;
use crate::tg::{self, menu, stats, updates};
use crate::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use teloxide::utils::markdown;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub(crate) enum Cmd {
    #[command(description = "показать главное меню")]
    Start,

    #[command(description = "показать эту справку")]
    Help,

    #[command(description = "последнее обновление dota1x6")]
    Updates,

    #[command(description = "статистика игрока по числовому Dota ID")]
    Stats(String),

    #[command(description = "отменить текущее действие")]
    Cancel,
}

#[async_trait]
impl tg::cmd::Command for Cmd {
    async fn handle(self, ctx: &tg::Ctx, msg: &Message) -> Result {
        match self {
            Cmd::Start => {
                ctx.bot
                    .send_message(msg.chat.id, markdown::escape("Привет! Выберите действие:"))
                    .reply_markup(menu::keyboard())
                    .await?;
            }
            Cmd::Help => {
                ctx.bot.reply_help_md_escaped::<Cmd>(msg).await?;
            }
            Cmd::Updates => {
                updates::send_latest(ctx, msg).await?;
            }
            Cmd::Stats(player_id) if player_id.trim().is_empty() => {
                stats::prompt_player_id(ctx, msg).await?;
            }
            Cmd::Stats(player_id) => {
                stats::send_player_stats(ctx, msg, &player_id).await?;
            }
            Cmd::Cancel => {
                ctx.bot
                    .send_message(msg.chat.id, markdown::escape("Действие отменено."))
                    .await?;
            }
        }
        Ok(())
    }
}
