//! Telegram commands root module

mod cmd;
mod config;
mod menu;
mod stats;
mod updates;

use crate::interaction_log::InteractionLog;
use crate::prelude::*;
use crate::{dota, http, Error, ErrorKind, Result};
use dptree::di::DependencyMap;
use patch_fmt::{Formatter, KeywordTable};
use std::sync::Arc;
use teloxide::adaptors::{CacheMe, DefaultParseMode, Throttle, Trace};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use teloxide::utils::markdown;

pub(crate) use config::*;
pub(crate) use stats::StatsCommandError;

pub(crate) type Bot = Trace<CacheMe<DefaultParseMode<Throttle<teloxide::Bot>>>>;

/// Text of the reply when a command fails unexpectedly
const GENERIC_FAILURE: &str = "Произошла ошибка при получении данных. Попробуйте позже.";

pub(crate) struct Ctx {
    bot: Bot,
    cfg: Arc<Config>,
    dota: dota::Client,
    interaction_log: InteractionLog,
    formatter: Formatter<'static>,
}

pub(crate) struct RunBotOptions {
    pub(crate) tg_cfg: Config,
    pub(crate) dota_cfg: dota::Config,
    pub(crate) interaction_log: InteractionLog,
}

pub(crate) async fn run_bot(opts: RunBotOptions) -> Result {
    let mut di = DependencyMap::new();

    let http = http::create_client();

    let bot: Bot = teloxide::Bot::new(opts.tg_cfg.token.clone())
        .throttle(Default::default())
        .parse_mode(ParseMode::MarkdownV2)
        .cache_me()
        .trace(teloxide::adaptors::trace::Settings::all());

    let formatter = Formatter::new(KeywordTable::builtin(), opts.dota_cfg.locale);

    di.insert(Arc::new(Ctx {
        bot: bot.clone(),
        cfg: Arc::new(opts.tg_cfg),
        dota: dota::Client::new(opts.dota_cfg, http),
        interaction_log: opts.interaction_log,
        formatter,
    }));

    info!("Starting bot...");

    bot.set_my_commands(cmd::regular::Cmd::bot_commands())
        .await?;

    let handler = dptree::entry()
        .inspect(|update: Update| {
            trace!(target: "tg_update", "{update:#?}");
        })
        .branch(
            Update::filter_message()
                .filter_command::<cmd::regular::Cmd>()
                .endpoint(cmd::handle::<cmd::regular::Cmd>()),
        )
        .branch(
            Update::filter_message()
                .filter_command::<cmd::owner::Cmd>()
                .chain(dptree::filter(cmd::owner::filter))
                .endpoint(cmd::handle::<cmd::owner::Cmd>()),
        )
        .branch(
            Update::filter_message()
                .chain(dptree::filter_map(menu::MenuAction::filter))
                .endpoint(cmd::handle::<menu::MenuAction>()),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(di)
        // We don't handle all possible messages that users send,
        // so to suppress the warning that we don't do this we have
        // a noop default handler here
        .default_handler(|_| std::future::ready(()))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");

    Ok(())
}

/// Escaped failure text for the user with the error id to look up the logs
pub(crate) fn failure_text(text: &str, err: &Error) -> String {
    format!(
        "{}\n\n{} {}",
        markdown::escape(text),
        markdown::escape("ID ошибки:"),
        markdown::code_inline(err.id()),
    )
}

/// The upstream server responded, but with an error status code
pub(crate) fn is_http_status_error(err: &Error) -> bool {
    match err.kind() {
        ErrorKind::HttpClient { source } => source.status().is_some(),
        _ => false,
    }
}
