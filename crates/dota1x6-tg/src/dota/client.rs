use super::{Config, PlayerStats, UpdatePage};
use crate::prelude::*;
use crate::{http, Result};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Update record as returned by the stats API. Decode it with [`super::patch::decode`].
pub(crate) type RawUpdate = Value;

/// Envelope of every stats API response
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Value,
}

pub(crate) struct Client {
    http: http::Client,
    cfg: Config,
}

impl Client {
    pub(crate) fn new(cfg: Config, http: http::Client) -> Self {
        Self { http, cfg }
    }

    pub(crate) fn cfg(&self) -> &Config {
        &self.cfg
    }

    pub(crate) fn update_url(&self, slug: &str) -> Url {
        self.cfg.site_url.with_segments(["updates", slug])
    }

    pub(crate) fn player_url(&self, player_id: &str) -> Url {
        self.cfg.site_url.with_segments(["players", player_id])
    }

    /// Raw record of the most recent update. Its shape isn't stable between
    /// the releases of the site, so it's returned as is.
    #[instrument(skip(self))]
    pub(crate) async fn latest_update(&self) -> Result<Option<RawUpdate>> {
        let url = self.cfg.stats_api_url.with_segments(["updates", ""]);

        let response: ApiResponse = self
            .http
            .get(url)
            .query(&[("page", 1), ("count", 20)])
            .timeout(self.cfg.request_timeout())
            .read_json()
            .await?;

        let Value::Array(updates) = response.data else {
            warn!(data = %response.data, "The API returned no list of updates");
            return Ok(None);
        };

        let latest = updates.into_iter().next();

        if latest.is_none() {
            warn!("The API returned an empty list of updates");
        }

        Ok(latest)
    }

    #[instrument(skip(self))]
    pub(crate) async fn update_page(&self, slug: &str) -> Result<UpdatePage> {
        let url = self.update_url(slug);

        let html = self
            .http
            .get(url.clone())
            .timeout(self.cfg.request_timeout())
            .read_text()
            .await?;

        Ok(UpdatePage::parse(url, &html)?)
    }

    /// Returns `None` if there is no player with the given ID
    #[instrument(skip(self))]
    pub(crate) async fn player_stats(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        let url = self.cfg.stats_api_url.with_segments(["players", ""]);

        let response: ApiResponse = self
            .http
            .get(url)
            .query(&[("playerId", player_id)])
            .timeout(self.cfg.request_timeout())
            .read_json()
            .await?;

        Ok(PlayerStats::from_data(response.data))
    }

    pub(crate) async fn download(&self, url: Url) -> Result<Bytes> {
        self.http
            .get(url)
            .timeout(self.cfg.request_timeout())
            .read_bytes()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dota::patch;

    fn client() -> Client {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        Client::new(cfg, http::create_client())
    }

    #[test]
    fn site_urls() {
        let client = client();
        assert_eq!(
            client.update_url("patch-1-5").as_str(),
            "https://dota1x6.com/updates/patch-1-5"
        );
        assert_eq!(
            client.player_url("741409144").as_str(),
            "https://dota1x6.com/players/741409144"
        );
    }

    #[test_log::test(tokio::test)]
    #[ignore]
    async fn manual_sandbox() {
        let client = client();

        let raw = client.latest_update().await.unwrap().unwrap();
        eprintln!("{raw:#}");
        eprintln!("{:#?}", patch::decode(&raw));

        if let Some(slug) = patch::slug(&raw) {
            eprintln!("{:#?}", client.update_page(slug).await.unwrap());
        }

        eprintln!("{:#?}", client.player_stats("741409144").await.unwrap());
    }
}
