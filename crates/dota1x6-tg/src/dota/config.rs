use patch_fmt::Locale;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use std::time::Duration;
use url::Url;

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub(crate) struct Config {
    #[serde(default = "default_site_url")]
    pub(crate) site_url: Url,

    #[serde(default = "default_stats_api_url")]
    pub(crate) stats_api_url: Url,

    #[serde(default = "default_request_timeout_secs")]
    pub(crate) request_timeout_secs: u64,

    /// Max number of images from the update page sent to the chat
    #[serde(default = "default_max_images")]
    pub(crate) max_images: usize,

    /// Language of the labels in formatted patch notes
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub(crate) locale: Locale,
}

impl Config {
    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_site_url() -> Url {
    parse_const_url("https://dota1x6.com")
}

fn default_stats_api_url() -> Url {
    parse_const_url("https://stats.dota1x6.com/api/v2/")
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_images() -> usize {
    10
}

fn parse_const_url(url: &str) -> Url {
    url.parse()
        .unwrap_or_else(|err| panic!("BUG: invalid default URL {url:?}: {err}"))
}
