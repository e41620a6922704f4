// src/fetch/http.rs
// =============================================================================
// The real Fetcher: downloads a results page with reqwest and extracts the
// related searches from it.
//
// Flow for one query path:
// 1. Join the query path onto the base URL ("/search?q=cats" ->
//    "https://twitter.com/search?q=cats")
// 2. GET the page (one client is reused for every request)
// 3. Treat any non-2xx status as a failure
// 4. Parse the body with extract_related_searches
//
// There are no retries. A failed query is reported by the crawl engine once
// the crawl is over.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{extract_related_searches, Fetcher, RelatedSearches};
use crate::config::CrawlConfig;
use crate::error::FetchError;

/// Fetches related searches over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Creates a fetcher using the base URL, timeout and user agent from `config`.
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let base_url = Url::parse(&config.base_url)?;

        Ok(Self { client, base_url })
    }

    /// The absolute URL a query path is fetched from.
    pub fn url_for(&self, query: &str) -> Result<Url, FetchError> {
        Ok(self.base_url.join(query)?)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn related_searches(&self, query: &str) -> Result<RelatedSearches, FetchError> {
        let url = self.url_for(query)?;
        debug!(%url, "fetching related searches");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        extract_related_searches(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const RELATED_PAGE: &str = r#"<html><body>
        <ul class="AdaptiveRelatedSearches-items">
            <li><a class="js-nav" href="/search?q=kittens&src=typd"><strong>kittens</strong></a></li>
            <li><a class="js-nav" href="/search?q=felines&src=typd">felines</a></li>
        </ul>
    </body></html>"#;

    // Serves one canned HTTP response on a local port and returns its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read until the end of the request headers
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn fetcher(base_url: &str) -> HttpFetcher {
        let config = CrawlConfig {
            base_url: base_url.to_string(),
            ..CrawlConfig::default()
        };
        HttpFetcher::new(&config).unwrap()
    }

    #[test]
    fn test_url_for_search_query() {
        let url = fetcher("https://twitter.com").url_for("/search?q=cats").unwrap();
        assert_eq!(url.as_str(), "https://twitter.com/search?q=cats");
    }

    #[test]
    fn test_url_for_hashtag() {
        let url = fetcher("https://example.com/").url_for("/hashtag/rust").unwrap();
        assert_eq!(url.as_str(), "https://example.com/hashtag/rust");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = CrawlConfig {
            base_url: "not a url".to_string(),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            HttpFetcher::new(&config),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_related_searches_from_page() {
        let base_url = serve_once("200 OK", RELATED_PAGE).await;

        let related = fetcher(&base_url)
            .related_searches("/search?q=cats")
            .await
            .unwrap();

        assert_eq!(related.names, vec!["kittens", "felines"]);
        assert_eq!(related.queries, vec!["/search?q=kittens", "/search?q=felines"]);
    }

    #[tokio::test]
    async fn test_server_error_is_a_failure() {
        // The body is a valid page, the status alone must make it fail
        let base_url = serve_once("500 Internal Server Error", RELATED_PAGE).await;

        let result = fetcher(&base_url).related_searches("/search?q=cats").await;

        assert!(matches!(result, Err(FetchError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn test_page_without_related_searches_is_a_failure() {
        let base_url = serve_once("200 OK", "<html><body><p>nothing</p></body></html>").await;

        let result = fetcher(&base_url).related_searches("/search?q=cats").await;

        assert!(matches!(result, Err(FetchError::MissingRelatedSearches)));
    }
}
