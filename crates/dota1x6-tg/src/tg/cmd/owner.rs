use crate::prelude::*;
use crate::{interaction_log, tg, Result};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::utils::command::BotCommands;
use teloxide::utils::markdown;

const PREVIEW_MAX_LINES: usize = 50;
const PREVIEW_MAX_CHARS: usize = 4000;

/// These commands aren't advertised via `set_my_commands`
#[derive(BotCommands, Clone, Debug)]
#[command(
    rename_rule = "lowercase",
    description = "Команды владельца бота:"
)]
pub(crate) enum Cmd {
    #[command(description = "показать эту справку")]
    OwnerHelp,

    #[command(description = "прислать файл с логом сообщений пользователей")]
    GetLog,

    #[command(description = "показать последние строки лога сообщений пользователей")]
    PreviewLog,
}

pub(crate) fn filter(ctx: Arc<tg::Ctx>, msg: Message) -> bool {
    let is_owner = msg.from.as_ref().is_some_and(|user| user.id == ctx.cfg.owner);

    if !is_owner {
        info!(
            sender = msg.from.as_ref().map(|user| user.debug_id()).as_deref(),
            "Non-owner user tried to access owner command"
        );
    }

    is_owner
}

#[async_trait]
impl tg::cmd::Command for Cmd {
    async fn handle(self, ctx: &tg::Ctx, msg: &Message) -> Result {
        match self {
            Cmd::OwnerHelp => {
                ctx.bot.reply_help_md_escaped::<Cmd>(msg).await?;
            }
            Cmd::GetLog => {
                if ctx.interaction_log.size().await? == 0 {
                    ctx.bot
                        .send_message(msg.chat.id, markdown::escape("Файл логов пуст."))
                        .await?;
                    return Ok(());
                }

                let path = ctx.interaction_log.path();

                let file_name = path
                    .file_name()
                    .fatal_ctx(|| format!("Interaction log path has no file name: {path:?}"))?
                    .to_string_lossy()
                    .into_owned();

                let document = InputFile::file(path).file_name(file_name);

                ctx.bot.send_document(msg.chat.id, document).await?;
            }
            Cmd::PreviewLog => {
                let lines = match ctx.interaction_log.tail(PREVIEW_MAX_LINES).await {
                    Ok(lines) => lines,
                    Err(err) => {
                        warn!(err = tracing_err(&err), "Couldn't read the interaction log");
                        let text = tg::failure_text("Не удалось прочитать лог.", &err);
                        ctx.bot.send_message(msg.chat.id, text).await?;
                        return Ok(());
                    }
                };

                let preview = interaction_log::preview(&lines, PREVIEW_MAX_CHARS);

                let text = format!(
                    "{}\n\n{}",
                    markdown::escape(&format!("Последние {PREVIEW_MAX_LINES} строк лога:")),
                    markdown::code_block(&preview),
                );

                ctx.bot.send_message(msg.chat.id, text).await?;
            }
        }
        Ok(())
    }
}
