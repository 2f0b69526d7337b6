use serde::Deserialize;
use teloxide::types::UserId;

#[derive(Deserialize, Clone)]
pub(crate) struct Config {
    pub(crate) token: String,

    /// ID of the user, who owns the bot, and thus can read the interaction log
    pub(crate) owner: UserId,
}
