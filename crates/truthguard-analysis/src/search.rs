//! Search corroboration backends.
//!
//! [`SerpApiSearch`] queries the SerpApi JSON endpoint; [`GoogleScrapeSearch`]
//! scrapes a results page directly as a fallback when no API key is
//! configured or the API call fails. [`WebSearch`] stacks the two.
//!
//! Results come back in provider rank order; no dedup or reranking is done
//! here. Backend failures are reported as errors; the request pipeline is
//! responsible for degrading them to an empty list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, warn};

use truthguard_core::{Error, Result, SearchResult, SourceSearch};

/// Default number of corroborating sources requested.
pub const DEFAULT_RESULT_LIMIT: usize = 6;

const SERPAPI_BASE_URL: &str = "https://serpapi.com";
const SCRAPE_USER_AGENT: &str = "Mozilla/5.0";

// ---------------------------------------------------------------------------
// SerpApi backend
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiOrganicResult>,
}

#[derive(Debug, Deserialize)]
struct SerpApiOrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// SerpApi Google-search client.
#[derive(Clone)]
pub struct SerpApiSearch {
    http: Client,
    base_url: String,
    api_key: String,
    limit: usize,
}

impl SerpApiSearch {
    pub fn new(api_key: String, timeout: Duration, limit: usize) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: SERPAPI_BASE_URL.to_string(),
            api_key,
            limit,
        })
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SourceSearch for SerpApiSearch {
    async fn find_sources(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response = self
            .http
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("q", query),
                ("api_key", &self.api_key),
                ("num", &self.limit.to_string()),
                ("engine", "google"),
            ])
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Search(format!("SerpApi HTTP {}", status.as_u16())));
        }

        let body: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        let results: Vec<SearchResult> = body
            .organic_results
            .into_iter()
            .take(self.limit)
            .filter_map(|r| {
                let url = r.link?;
                Some(SearchResult {
                    title: r.title.unwrap_or_else(|| url.clone()),
                    url,
                    snippet: r.snippet.unwrap_or_default(),
                })
            })
            .collect();

        debug!(
            subsystem = "search",
            component = "serpapi",
            op = "find_sources",
            result_count = results.len(),
            "SerpApi search completed"
        );
        Ok(results)
    }
}

// ---------------------------------------------------------------------------
// Scrape fallback
// ---------------------------------------------------------------------------

const SCRAPE_BASE_URL: &str = "https://www.google.com";

/// Google results-page scraper, used when SerpApi is unavailable.
#[derive(Clone)]
pub struct GoogleScrapeSearch {
    http: Client,
    base_url: String,
    limit: usize,
}

impl GoogleScrapeSearch {
    pub fn new(timeout: Duration, limit: usize) -> Result<Self> {
        let http = Client::builder()
            .user_agent(SCRAPE_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: SCRAPE_BASE_URL.to_string(),
            limit,
        })
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SourceSearch for GoogleScrapeSearch {
    async fn find_sources(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/search?q={}&num={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        // Rate-limit and captcha interstitials come back as non-2xx; a
        // silent empty parse would hide them from the pipeline's warn path.
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Search(format!(
                "scrape search HTTP {}",
                status.as_u16()
            )));
        }
        let html = response
            .text()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        let results = parse_result_page(&html, self.limit);
        debug!(
            subsystem = "search",
            component = "scrape",
            op = "find_sources",
            result_count = results.len(),
            "Scrape search completed"
        );
        Ok(results)
    }
}

/// Parse organic results out of a Google results page.
///
/// Selector sets mirror the markup variants Google serves; missing pieces
/// degrade per-result (title falls back to the link) rather than dropping
/// the whole page.
pub fn parse_result_page(html: &str, limit: usize) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);

    let container_sels = ["div.tF2Cxc", "div.g", "div.yuRUbf"];
    let title_sel = Selector::parse("h3").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let snippet_sel = Selector::parse("div.VwiC3b, div.IsZvec").unwrap();

    for sel_str in container_sels {
        let container_sel = Selector::parse(sel_str).unwrap();
        let mut results = Vec::new();
        for container in doc.select(&container_sel).take(limit) {
            let title = container
                .select(&title_sel)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_string());
            let url = container
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);
            let snippet = container
                .select(&snippet_sel)
                .next()
                .map(|s| {
                    s.text()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();

            if let Some(url) = url {
                results.push(SearchResult {
                    title: title.filter(|t| !t.is_empty()).unwrap_or_else(|| url.clone()),
                    url,
                    snippet,
                });
            }
        }
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Stacked provider
// ---------------------------------------------------------------------------

/// SerpApi-first search with scrape fallback.
#[derive(Clone)]
pub struct WebSearch {
    serpapi: Option<SerpApiSearch>,
    scrape: GoogleScrapeSearch,
}

impl WebSearch {
    pub fn new(serpapi: Option<SerpApiSearch>, scrape: GoogleScrapeSearch) -> Self {
        Self { serpapi, scrape }
    }

    /// Build from the environment: `SERPAPI_KEY` enables the API backend,
    /// otherwise only the scrape fallback is available.
    pub fn from_env(timeout: Duration, limit: usize) -> Result<Self> {
        let serpapi = match std::env::var("SERPAPI_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(SerpApiSearch::new(key, timeout, limit)?),
            _ => None,
        };
        Ok(Self::new(serpapi, GoogleScrapeSearch::new(timeout, limit)?))
    }
}

#[async_trait]
impl SourceSearch for WebSearch {
    async fn find_sources(&self, query: &str) -> Result<Vec<SearchResult>> {
        if let Some(serpapi) = &self.serpapi {
            match serpapi.find_sources(query).await {
                Ok(results) if !results.is_empty() => return Ok(results),
                Ok(_) => {
                    debug!(
                        subsystem = "search",
                        component = "serpapi",
                        "SerpApi returned no results, trying scrape fallback"
                    );
                }
                Err(e) => {
                    warn!(
                        subsystem = "search",
                        component = "serpapi",
                        error = %e,
                        "SerpApi failed, trying scrape fallback"
                    );
                }
            }
        }
        self.scrape.find_sources(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_serpapi_parses_organic_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", "water is wet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organic_results": [
                    {"title": "Water facts", "link": "https://example.com/water", "snippet": "It is wet."},
                    {"link": "https://example.com/untitled"},
                    {"title": "No link, dropped"}
                ]
            })))
            .mount(&server)
            .await;

        let search = SerpApiSearch::new("test-key".into(), Duration::from_secs(2), 6)
            .unwrap()
            .with_base_url(server.uri());
        let results = search.find_sources("water is wet").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Water facts");
        assert_eq!(results[0].url, "https://example.com/water");
        assert_eq!(results[0].snippet, "It is wet.");
        // missing title falls back to the link
        assert_eq!(results[1].title, "https://example.com/untitled");
    }

    #[tokio::test]
    async fn test_serpapi_http_error_is_search_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let search = SerpApiSearch::new("test-key".into(), Duration::from_secs(2), 6)
            .unwrap()
            .with_base_url(server.uri());
        let err = search.find_sources("anything").await.unwrap_err();
        assert!(matches!(err, Error::Search(_)));
    }

    #[test]
    fn test_parse_result_page() {
        let html = r#"
            <html><body>
              <div class="tF2Cxc">
                <a href="https://example.com/one"><h3>First result</h3></a>
                <div class="VwiC3b">First snippet</div>
              </div>
              <div class="tF2Cxc">
                <a href="https://example.com/two"><h3>Second result</h3></a>
              </div>
            </body></html>
        "#;
        let results = parse_result_page(html, 6);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "First result");
        assert_eq!(results[0].url, "https://example.com/one");
        assert_eq!(results[0].snippet, "First snippet");
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn test_parse_result_page_empty_markup() {
        assert!(parse_result_page("<html><body></body></html>", 6).is_empty());
    }

    #[test]
    fn test_parse_result_page_respects_limit() {
        let item = r#"<div class="g"><a href="https://example.com/x"><h3>T</h3></a></div>"#;
        let html = format!("<html><body>{}</body></html>", item.repeat(10));
        assert_eq!(parse_result_page(&html, 3).len(), 3);
    }

    const RESULT_PAGE: &str = r#"
        <html><body>
          <div class="tF2Cxc">
            <a href="https://example.com/scraped"><h3>Scraped result</h3></a>
            <div class="VwiC3b">From the results page</div>
          </div>
        </body></html>
    "#;

    fn scrape_backend(server: &MockServer) -> GoogleScrapeSearch {
        GoogleScrapeSearch::new(Duration::from_secs(2), 6)
            .unwrap()
            .with_base_url(server.uri())
    }

    fn serpapi_backend(server: &MockServer) -> SerpApiSearch {
        SerpApiSearch::new("test-key".into(), Duration::from_secs(2), 6)
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_scrape_search_hits_results_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "water is wet"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
            .mount(&server)
            .await;

        let results = scrape_backend(&server)
            .find_sources("water is wet")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Scraped result");
        assert_eq!(results[0].url, "https://example.com/scraped");
    }

    #[tokio::test]
    async fn test_scrape_search_non_success_status_is_search_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(429).set_body_string("captcha interstitial"))
            .mount(&server)
            .await;

        let err = scrape_backend(&server)
            .find_sources("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Search(_)));
    }

    #[tokio::test]
    async fn test_web_search_prefers_serpapi_results() {
        let serpapi_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organic_results": [
                    {"title": "API result", "link": "https://example.com/api", "snippet": "s"}
                ]
            })))
            .mount(&serpapi_server)
            .await;
        let scrape_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
            .expect(0)
            .mount(&scrape_server)
            .await;

        let search = WebSearch::new(
            Some(serpapi_backend(&serpapi_server)),
            scrape_backend(&scrape_server),
        );
        let results = search.find_sources("anything").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "API result");
    }

    #[tokio::test]
    async fn test_web_search_falls_back_when_serpapi_fails() {
        let serpapi_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&serpapi_server)
            .await;
        let scrape_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
            .mount(&scrape_server)
            .await;

        let search = WebSearch::new(
            Some(serpapi_backend(&serpapi_server)),
            scrape_backend(&scrape_server),
        );
        let results = search.find_sources("anything").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Scraped result");
    }

    #[tokio::test]
    async fn test_web_search_falls_back_when_serpapi_is_empty() {
        let serpapi_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"organic_results": []})),
            )
            .mount(&serpapi_server)
            .await;
        let scrape_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
            .mount(&scrape_server)
            .await;

        let search = WebSearch::new(
            Some(serpapi_backend(&serpapi_server)),
            scrape_backend(&scrape_server),
        );
        let results = search.find_sources("anything").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Scraped result");
    }

    #[tokio::test]
    async fn test_web_search_without_serpapi_goes_straight_to_scrape() {
        let scrape_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
            .mount(&scrape_server)
            .await;

        let search = WebSearch::new(None, scrape_backend(&scrape_server));
        let results = search.find_sources("anything").await.unwrap();
        assert_eq!(results[0].title, "Scraped result");
    }
}
