//! Direct retrieval tests against a local mock HTTP server

use async_trait::async_trait;
use mailsift::config::{HttpConfig, DEFAULT_USER_AGENT};
use mailsift::error::FetchError;
use mailsift::{FetchPolicy, HttpFetcher, Outcome, PageSource, Scraper, ScraperConfig};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html><head>
<script type="application/ld+json">{"email":"schema@example.com"}</script>
</head><body><footer>Reach us: hello@example.com</footer></body></html>"#;

fn fetcher(timeout_ms: u64) -> HttpFetcher {
    HttpFetcher::new(&HttpConfig {
        timeout_ms,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let html = fetcher(10_000)
        .fetch(&format!("{}/contact", server.uri()))
        .await
        .unwrap();
    assert_eq!(html, PAGE);
}

#[tokio::test]
async fn test_sends_browser_like_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let html = fetcher(10_000).fetch(&server.uri()).await.unwrap();
    assert_eq!(html, "ok");
}

#[tokio::test]
async fn test_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let url = format!("{}/blocked", server.uri());
    let err = fetcher(10_000).fetch(&url).await.unwrap_err();
    match err {
        FetchError::HttpStatus { url: ref got, status } => {
            assert_eq!(status, 403);
            assert_eq!(got, &url);
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = fetcher(200).fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { timeout_ms: 200, .. }));
}

/// Renderer stand-in that must not be reached
struct UnreachableRenderer;

#[async_trait]
impl PageSource for UnreachableRenderer {
    fn name(&self) -> &str {
        "browser"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Err(FetchError::Render {
            url: url.to_string(),
            message: "renderer should not run".to_string(),
        })
    }
}

#[tokio::test]
async fn test_scraper_over_http_ignores_script_emails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let scraper = Scraper::builder()
        .config(ScraperConfig::default())
        .render_source(UnreachableRenderer)
        .build()
        .unwrap();

    let result = scraper.scrape_one(&server.uri()).await;
    assert_eq!(result.url, server.uri());
    assert_eq!(
        result.outcome,
        Outcome::Found(vec!["hello@example.com".to_string()])
    );
}

#[tokio::test]
async fn test_scraper_http_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let scraper = Scraper::builder()
        .policy(FetchPolicy::DirectThenRender)
        .render_source(UnreachableRenderer)
        .build()
        .unwrap();

    let result = scraper.scrape_one(&server.uri()).await;
    let text = result.outcome.to_string();
    assert!(text.contains("renderer should not run"));
    assert!(text.contains("returned HTTP 500"));
}
