mod config;
mod dota;
mod error;
mod http;
mod interaction_log;
mod observability;
mod tg;

pub mod util;

pub use crate::error::*;
pub use config::*;
pub use observability::*;

#[allow(unused_imports)]
mod prelude {
    pub(crate) use crate::error::prelude::*;
    pub(crate) use crate::http::prelude::*;
    pub(crate) use crate::observability::logging::prelude::*;
    pub(crate) use crate::util::prelude::*;
}

/// Run the telegram bot processing loop
pub async fn run(config: Config) -> Result<()> {
    let interaction_log = interaction_log::InteractionLog::open(config.interaction_log).await?;

    let opts = tg::RunBotOptions {
        tg_cfg: config.tg,
        dota_cfg: config.dota,
        interaction_log,
    };

    tg::run_bot(opts).await
}
