use crate::prelude::*;
use itertools::Itertools;
use lazy_regex::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const UNTITLED: &str = "Без названия";

static TITLE: Lazy<Selector> = Lazy::new(|| selector("h1.updates-title"));
static CONTENT: Lazy<Selector> = Lazy::new(|| selector("div.updates-content"));
static IMAGE: Lazy<Selector> = Lazy::new(|| selector("img"));

#[derive(Debug, thiserror::Error)]
pub(crate) enum ScrapeError {
    #[error("The update page at {url} has no content block, the site layout may have changed")]
    MissingContent { url: Url },
}

/// Human-readable contents of the update page on the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UpdatePage {
    pub(crate) url: Url,
    pub(crate) title: String,

    /// Text nodes of the content block, one per line
    pub(crate) text: String,

    /// Absolute URLs of the images in the content block in document order
    pub(crate) images: Vec<Url>,
}

impl UpdatePage {
    pub(crate) fn parse(url: Url, html: &str) -> Result<Self, ScrapeError> {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE)
            .next()
            .map(|title| collect_text(title, " "))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNTITLED.to_owned());

        let Some(content) = document.select(&CONTENT).next() else {
            return Err(ScrapeError::MissingContent { url });
        };

        let text = collect_text(content, "\n");

        let images = content
            .select(&IMAGE)
            .filter_map(|img| img.value().attr("src"))
            .filter(|src| !src.trim().is_empty())
            .filter_map(|src| {
                let resolved = url.resolve(src.trim());
                if resolved.is_none() {
                    debug!(src, "Skipping an image with an invalid URL");
                }
                resolved
            })
            .collect();

        Ok(Self {
            url,
            title,
            text,
            images,
        })
    }
}

/// Trimmed non-empty text nodes of the element joined with the separator
fn collect_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .join(separator)
}

fn selector(selector: &str) -> Selector {
    Selector::parse(selector)
        .unwrap_or_else(|err| panic!("BUG: invalid CSS selector {selector:?}: {err}"))
}
