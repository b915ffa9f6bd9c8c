//! Content normalizer: raw input to canonical text payload.
//!
//! Validation happens here, before anything downstream runs: empty input
//! and malformed URLs are rejected, and a failed page fetch aborts the
//! request. Nothing is ever persisted for input that does not make it
//! through this stage.

use reqwest::Url;
use tracing::debug;

use truthguard_core::{
    collapse_whitespace, truncate_at_boundary, Error, InputKind, NormalizedContent, Result,
    MAX_ANALYZABLE_CHARS,
};

use crate::extract::PageFetcher;

/// Normalizes text and URL submissions into [`NormalizedContent`].
#[derive(Clone)]
pub struct ContentNormalizer {
    fetcher: PageFetcher,
}

impl ContentNormalizer {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Produce the canonical text payload for a submission.
    ///
    /// Fails with [`Error::InvalidInput`] for empty/whitespace-only input
    /// or a malformed URL, and with [`Error::Fetch`] when a URL fetch
    /// fails or yields no textual content.
    pub async fn normalize(&self, kind: InputKind, raw: &str) -> Result<NormalizedContent> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("no input provided".to_string()));
        }

        match kind {
            InputKind::Text => {
                let text = canonicalize(trimmed);
                debug!(
                    subsystem = "analysis",
                    component = "normalizer",
                    op = "normalize",
                    text_len = text.chars().count(),
                    "Text input normalized"
                );
                Ok(NormalizedContent {
                    text,
                    kind: InputKind::Text,
                    source_url: None,
                    title: None,
                })
            }
            InputKind::Url => {
                let url = parse_http_url(trimmed)?;
                let page = self.fetcher.fetch_page(&url).await?;
                let text = canonicalize(&page.text);
                if text.is_empty() {
                    return Err(Error::Fetch(format!("no textual content at {url}")));
                }
                debug!(
                    subsystem = "analysis",
                    component = "normalizer",
                    op = "normalize",
                    url = %url,
                    text_len = text.chars().count(),
                    "URL input normalized"
                );
                Ok(NormalizedContent {
                    text,
                    kind: InputKind::Url,
                    source_url: Some(url.to_string()),
                    title: page.title,
                })
            }
        }
    }
}

/// Whitespace collapse + deterministic boundary truncation.
fn canonicalize(text: &str) -> String {
    truncate_at_boundary(&collapse_whitespace(text), MAX_ANALYZABLE_CHARS)
}

/// Parse an http(s) URL, rejecting other schemes as invalid input.
fn parse_http_url(raw: &str) -> Result<Url> {
    let url =
        Url::parse(raw).map_err(|e| Error::InvalidInput(format!("malformed URL: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidInput(format!(
            "unsupported URL scheme: {}",
            url.scheme()
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn normalizer() -> ContentNormalizer {
        ContentNormalizer::new(PageFetcher::new(Duration::from_secs(2)).unwrap())
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        for raw in ["", "   ", "\n\t "] {
            let err = normalizer()
                .normalize(InputKind::Text, raw)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "raw: {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_text_input_collapsed_and_capped() {
        let raw = format!("  leading \n {} trailing  ", "word ".repeat(4_000));
        let content = normalizer()
            .normalize(InputKind::Text, &raw)
            .await
            .unwrap();
        assert!(content.text.starts_with("leading word"));
        assert!(content.text.chars().count() <= MAX_ANALYZABLE_CHARS);
        assert!(!content.text.contains('\n'));
        assert_eq!(content.kind, InputKind::Text);
        assert!(content.source_url.is_none());
    }

    #[tokio::test]
    async fn test_malformed_url_rejected() {
        let err = normalizer()
            .normalize(InputKind::Url, "not a url")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_non_http_scheme_rejected() {
        let err = normalizer()
            .normalize(InputKind::Url, "ftp://example.com/file")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unreachable_url_is_fetch_error() {
        // reserved TLD, guaranteed unresolvable
        let err = normalizer()
            .normalize(InputKind::Url, "https://unreachable.invalid")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn test_url_input_carries_title_and_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/story"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(
                    "<html><head><title>Headline</title></head><body><p>Article   body\ntext.</p></body></html>",
                    "text/html",
                ),
            )
            .mount(&server)
            .await;

        let content = normalizer()
            .normalize(InputKind::Url, &format!("{}/story", server.uri()))
            .await
            .unwrap();
        assert_eq!(content.kind, InputKind::Url);
        assert_eq!(content.text, "Article body text.");
        assert_eq!(content.title.as_deref(), Some("Headline"));
        assert_eq!(content.search_query(), "Headline");
        assert!(content.source_url.unwrap().ends_with("/story"));
    }
}
