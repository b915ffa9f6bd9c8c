//! URL fetching and HTML main-content extraction.
//!
//! One bounded fetch, no retries: a failed or slow upstream surfaces as a
//! single [`Error::Fetch`] to the caller. Extraction takes the page title
//! and the first paragraphs of body text, falling back to the meta
//! description and finally the title itself, matching how article pages
//! degrade in practice.

use std::time::Duration;

use reqwest::{Client, Url};
use scraper::{Html, Selector};
use tracing::debug;

use truthguard_core::{Error, Result};

/// User agent presented to fetched sites.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; TruthGuard/1.0)";

/// Cap on `<p>` elements harvested from a page.
const MAX_PARAGRAPHS: usize = 15;

/// Title and textual content extracted from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub text: String,
}

/// Bounded HTTP fetcher for URL submissions.
#[derive(Clone)]
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch a page and extract its title and main text.
    ///
    /// Fails with [`Error::Fetch`] when the URL is unreachable, the
    /// response is not a success status, or the content type is not HTML.
    pub async fn fetch_page(&self, url: &Url) -> Result<ExtractedPage> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.is_empty() && !is_html(&content_type) {
            return Err(Error::Fetch(format!(
                "content-type not HTML: {content_type}"
            )));
        }

        let html = response.text().await?;
        let page = extract_content(&html);

        debug!(
            subsystem = "analysis",
            component = "fetcher",
            op = "fetch_page",
            url = %url,
            text_len = page.text.chars().count(),
            "Page fetched and extracted"
        );
        Ok(page)
    }
}

fn is_html(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.starts_with("text/html") || ct.starts_with("application/xhtml")
}

/// Extract title and main text from an HTML document.
///
/// Preference order for the text: first [`MAX_PARAGRAPHS`] `<p>` elements,
/// then the meta description (or `og:description`), then the title.
pub fn extract_content(html: &str) -> ExtractedPage {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").unwrap();
    let title = doc
        .select(&title_sel)
        .next()
        .map(|n| n.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty());

    let p_sel = Selector::parse("p").unwrap();
    let paragraphs: Vec<String> = doc
        .select(&p_sel)
        .take(MAX_PARAGRAPHS)
        .map(|p| {
            p.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty())
        .collect();

    let mut text = paragraphs.join(" ");

    if text.is_empty() {
        let meta_sel =
            Selector::parse("meta[name=description], meta[property=\"og:description\"]").unwrap();
        text = doc
            .select(&meta_sel)
            .find_map(|m| m.value().attr("content"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
    }

    if text.is_empty() {
        text = title.clone().unwrap_or_default();
    }

    ExtractedPage { title, text }
}
