//! End-to-end research pipeline tests.
//!
//! The first group runs the production pipeline against a local mock
//! server standing in for the search API, the result pages and the
//! summarisation API. The second group wires in-process stubs through the
//! same `Researcher` to pin down the empty-value degradation rules.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use sift::config::SummaryConfig;
use sift::research::Stage;
use sift::summarizer::{API_KEY_HEADER, build_instruction};
use sift::{LiveResearcher, ResearchConfig, ResearchError, Researcher, Summarizer};
use sift_search::{PageFetcher, SearchError, SearchProvider, SearchResult};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/v7.0/search";
const SUMMARY_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";

fn live_config(server: &MockServer) -> ResearchConfig {
    let mut config = ResearchConfig::with_keys("bing-test-key", "gemini-test-key");
    config.search = config
        .search
        .clone()
        .with_endpoint(format!("{}{SEARCH_PATH}", server.uri()));
    config.summary = SummaryConfig {
        base_url: format!("{}/v1beta", server.uri()),
        ..SummaryConfig::default()
    };
    config
}

async fn mount_search(server: &MockServer, pages: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("Ocp-Apim-Subscription-Key", "bing-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webPages": {"value": pages}
        })))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, route: &str, html: &str, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn live_pipeline_sends_ordered_corpus_to_summarizer() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_search(
        &server,
        json!([
            {"url": format!("{base}/one"), "name": "One"},
            {"url": format!("{base}/two"), "name": "Two"},
            {"url": format!("{base}/gone"), "name": "Gone"}
        ]),
    )
    .await;
    mount_page(
        &server,
        "/one",
        "<html><body><nav>Home</nav><p>Revenue rose 12% to $4.2B.</p></body></html>",
        200,
    )
    .await;
    mount_page(
        &server,
        "/two",
        "<html><body><header>Brand</header><p>Margins hit 31%.</p><footer>(c)</footer></body></html>",
        0,
    )
    .await;
    // `/gone` is not mounted: the mock server answers 404.

    let expected_corpus = "Revenue rose 12% to $4.2B. Margins hit 31%.";
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .and(header(API_KEY_HEADER, "gemini-test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": build_instruction(expected_corpus, 300)}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "- Revenue: +12% ($4.2B)\n- Margin: 31%"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let researcher = LiveResearcher::from_config(&live_config(&server)).expect("researcher");
    let report = researcher.run("quarterly results").await;

    assert_eq!(report.summary, "- Revenue: +12% ($4.2B)\n- Margin: 31%");
    assert_eq!(report.result_count, 3);
    assert_eq!(report.page_count, 2);
    assert_eq!(report.corpus_bytes, expected_corpus.len());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].stage, Stage::Fetch);
    assert!(report.failures[0].reason.contains("404"));
}

#[tokio::test]
async fn live_pipeline_with_search_outage_summarises_empty_corpus() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "No content was provided."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let researcher = LiveResearcher::from_config(&live_config(&server)).expect("researcher");
    let report = researcher.run("anything").await;

    assert_eq!(report.summary, "No content was provided.");
    assert_eq!(report.result_count, 0);
    assert!(report.failed_at(Stage::Search));
}

#[tokio::test]
async fn live_pipeline_with_summary_outage_returns_empty() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_search(&server, json!([{"url": format!("{base}/p"), "name": "P"}])).await;
    mount_page(&server, "/p", "<p>content</p>", 0).await;
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let researcher = LiveResearcher::from_config(&live_config(&server)).expect("researcher");
    assert_eq!(researcher.research("anything").await, "");
}

// ── Stubbed stages ──────────────────────────────────────────────────────

struct StubSearch(Vec<SearchResult>);

impl SearchProvider for StubSearch {
    async fn try_search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

struct StubPages(Vec<(&'static str, &'static str)>);

impl PageFetcher for StubPages {
    async fn try_fetch(&self, url: &str) -> Result<String, SearchError> {
        let html = self
            .0
            .iter()
            .find(|(u, _)| *u == url)
            .map(|(_, html)| *html)
            .ok_or_else(|| SearchError::Status(404))?;
        Ok(sift_search::content::extract(html))
    }
}

#[derive(Default, Clone)]
struct EchoSummarizer {
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn try_summarize(&self, corpus: &str) -> Result<String, ResearchError> {
        self.calls
            .lock()
            .map_err(|_| ResearchError::Config("poisoned".into()))?
            .push(corpus.to_owned());
        Ok(corpus.to_owned())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

#[tokio::test]
async fn hello_world_scenario() {
    let researcher = Researcher::new(
        StubSearch(vec![SearchResult::new("http://a", "A")]),
        StubPages(vec![("http://a", "<html><body>Hello World</body></html>")]),
        EchoSummarizer::default(),
        10,
    );
    assert_eq!(researcher.research("test").await, "Hello World");
}

#[tokio::test]
async fn empty_search_scenario_invokes_summarizer_with_empty_string() {
    let summarizer = EchoSummarizer::default();
    let calls = Arc::clone(&summarizer.calls);
    let researcher = Researcher::new(StubSearch(vec![]), StubPages(vec![]), summarizer, 10);

    let report = researcher.run("test").await;
    assert_eq!(report.summary, "");
    assert_eq!(report.result_count, 0);
    assert!(report.failures.is_empty());
    assert_eq!(calls.lock().expect("lock").as_slice(), [String::new()]);
}
