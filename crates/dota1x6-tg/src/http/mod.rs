mod basic_ext;
mod json_ext;

use crate::prelude::*;
use async_trait::async_trait;
use reqwest_middleware::RequestBuilder;

pub(crate) mod prelude {
    pub(crate) use super::basic_ext::RequestBuilderBasicExt;
    pub(crate) use super::json_ext::RequestBuilderJsonExt;
}

pub(crate) type Client = reqwest_middleware::ClientWithMiddleware;

/// Requests are never retried. A failed request is reported to the user
/// right away.
pub(crate) fn create_client() -> Client {
    reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
        .with(ObservingMiddleware)
        .with_init(|request_builder: RequestBuilder| {
            request_builder.header(
                "User-Agent",
                concat!(
                    "Dota1x6TelegramBot/",
                    env!("CARGO_PKG_VERSION"),
                    " (Telegram bot for dota1x6.com)",
                ),
            )
        })
        .build()
}

struct ObservingMiddleware;

#[async_trait]
impl reqwest_middleware::Middleware for ObservingMiddleware {
    async fn handle(
        &self,
        request: reqwest::Request,
        extensions: &mut http::Extensions,
        next: reqwest_middleware::Next<'_>,
    ) -> reqwest_middleware::Result<reqwest::Response> {
        let span = info_span!(
            "request",
            version = ?request.version(),
            method = %request.method(),
            url = %request.url(),
        );

        async {
            let (result, duration) = next.run(request, extensions).with_duration().await;

            let duration = tracing_duration(duration);

            let response = match &result {
                Ok(response) => response,
                Err(err) => {
                    error!(duration, err = tracing_err(err), "Network request failed");
                    return result;
                }
            };

            let status = response.status();

            let Err(err) = response.error_for_status_ref() else {
                info!(duration, %status, "Network request succeeded");
                return result;
            };

            warn!(
                err = tracing_err(&err),
                duration,
                %status,
                "Network request failed (error status)"
            );

            result
        }
        .instrument(span)
        .await
    }
}

/// Errors at the layer of the HTTP API
#[derive(Debug, thiserror::Error)]
pub(crate) enum HttpClientError {
    #[error("HTTP request failed")]
    Request { source: reqwest_middleware::Error },

    #[error("Failed to read HTTP response")]
    ReadPayload { source: reqwest::Error },

    #[error("HTTP request has failed (HTTP status code: {status}):\n{body}")]
    BadResponseStatusCode {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Received an unexpected response JSON object")]
    UnexpectedResponseJsonShape { source: serde_json::Error },
}

impl HttpClientError {
    pub(crate) fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::BadResponseStatusCode { status, .. } => Some(*status),
            Self::Request { .. }
            | Self::ReadPayload { .. }
            | Self::UnexpectedResponseJsonShape { .. } => None,
        }
    }
}
