//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_cartographer::config::{Config, RetryConfig};
use site_cartographer::crawler::{crawl, Coordinator, Fetcher};
use site_cartographer::output::{build_renderers, render_all};
use site_cartographer::{CartographerError, CrawlState};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry() -> RetryConfig {
    RetryConfig {
        initial_interval_ms: 10,
        multiplier: 2.0,
        max_interval_ms: 40,
        max_elapsed_ms: 200,
    }
}

/// Creates a test configuration crawling `seed` with `crawlers` fetch slots
fn create_test_config(seed: &str, crawlers: usize) -> Config {
    let mut config = Config::default();
    config.crawler.seed_url = seed.to_string();
    config.crawler.max_concurrent_fetches = crawlers;
    config.retry = fast_retry();
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

fn css(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/css")
}

/// Mounts a small site with cycles, fragments, an external link, a failing
/// page and assets that must never be fetched.
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head>
                <link rel="stylesheet" href="/site.css">
                <script src="/app.js"></script>
            </head><body>
                <a href="/a">A</a>
                <a href="/b#section">B</a>
                <a href="http://other.invalid/elsewhere">Elsewhere</a>
                <img src="/logo.png">
            </body></html>"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(
            r##"<a href="/">Home</a> <a href="b">B</a> <a href="#top">Top</a> <a href="/a#again">A</a>"##,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(r#"<a href="/a">A</a> <a href="/missing">Missing</a>"#))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1..)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site.css"))
        .respond_with(css(
            r#"@import "/extra.css"; body { background: url(/bg.png) }"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/extra.css"))
        .respond_with(css("h1 { color: red }"))
        .expect(1)
        .mount(server)
        .await;

    for asset in ["/app.js", "/logo.png", "/bg.png"] {
        Mock::given(method("GET"))
            .and(path(asset))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }
}

fn site_url(server: &MockServer, path: &str) -> Url {
    Url::parse(&server.uri()).unwrap().join(path).unwrap()
}

fn keys(crawled: &CrawlState) -> BTreeSet<String> {
    crawled.urls().map(|url| url.path().to_string()).collect()
}

fn expected_keys() -> BTreeSet<String> {
    ["/", "/a", "/b", "/missing", "/site.css", "/extra.css"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(&format!("{}/", server.uri()), 5);
    let crawled = crawl(&config).await.expect("Crawl failed");

    assert_eq!(keys(&crawled), expected_keys());

    let root = crawled.get(&site_url(&server, "/")).expect("root missing");
    let links: BTreeSet<Url> = ["/a", "/b"].iter().map(|p| site_url(&server, p)).collect();
    assert_eq!(root.links, links);
    let assets: BTreeSet<Url> = ["/site.css", "/app.js", "/logo.png"]
        .iter()
        .map(|p| site_url(&server, p))
        .collect();
    assert_eq!(root.assets, assets);

    let stylesheet = crawled.get(&site_url(&server, "/site.css")).unwrap();
    assert!(stylesheet.links.is_empty());
    assert!(stylesheet.assets.contains(&site_url(&server, "/extra.css")));
    assert!(stylesheet.assets.contains(&site_url(&server, "/bg.png")));

    // Wiremock verifies the .expect() counts when the server drops.
}

#[tokio::test]
async fn test_failed_page_stays_as_placeholder() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(&format!("{}/", server.uri()), 3);
    let crawled = crawl(&config).await.unwrap();

    let missing = crawled.get(&site_url(&server, "/missing")).unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_single_crawler_maps_same_site() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(&format!("{}/", server.uri()), 1);
    let crawled = crawl(&config).await.unwrap();

    assert_eq!(keys(&crawled), expected_keys());
}

#[tokio::test]
async fn test_failing_seed_terminates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let seed = site_url(&server, "/");
    let fetcher = Fetcher::new(&Config::default().http, fast_retry()).unwrap();
    let crawled = Coordinator::with_fetcher(&seed, 4, fetcher)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(crawled.len(), 1);
    assert!(crawled.get(&seed).unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_terminates() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = create_test_config(&format!("http://127.0.0.1:{}/", port), 2);
    let crawled = crawl(&config).await.unwrap();

    assert_eq!(crawled.len(), 1);
}

#[tokio::test]
async fn test_not_found_page_is_still_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/gone">Gone</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"<a href="/help">Help</a>"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/help"))
        .respond_with(html("<p>help</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/", server.uri()), 2);
    let crawled = crawl(&config).await.unwrap();

    let gone = crawled.get(&site_url(&server, "/gone")).unwrap();
    assert!(gone.links.contains(&site_url(&server, "/help")));
    assert_eq!(crawled.len(), 3);
}

#[tokio::test]
async fn test_crawl_then_render_sitemaps() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&format!("{}/", server.uri()), 4);
    config.output.directory = dir.path().to_string_lossy().into_owned();
    config.output.dot_command = "definitely-not-a-graphviz-binary".to_string();

    let crawled = crawl(&config).await.unwrap();
    let written = render_all(&build_renderers(&config.output), &crawled);

    // text + dot; no PDF without Graphviz
    assert_eq!(written.len(), 2);

    let text_path = written
        .iter()
        .find(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .unwrap();
    let text = std::fs::read_to_string(text_path).unwrap();
    assert!(text.starts_with(&format!("{}/\n\tLinks:\n", server.uri())));
    assert!(text.contains(&format!("\t\t{}/extra.css\n", server.uri())));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_always_terminates_on_multi_thread_runtime() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/a">A</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html("<p>leaf</p>"))
        .mount(&server)
        .await;

    for round in 0..100 {
        let crawlers = if round % 2 == 0 { 1 } else { 4 };
        let config = create_test_config(&format!("{}/", server.uri()), crawlers);

        let crawled = tokio::time::timeout(Duration::from_secs(10), crawl(&config))
            .await
            .unwrap_or_else(|_| panic!("crawl {} did not terminate", round))
            .unwrap();

        assert_eq!(crawled.len(), 2, "crawl {}", round);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_fetches_stay_within_ceiling() {
    const PAGES: usize = 8;
    const CRAWLERS: usize = 2;
    const DELAY: Duration = Duration::from_millis(300);

    let server = MockServer::start().await;
    let links: String = (0..PAGES)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&links))
        .expect(1)
        .mount(&server)
        .await;
    for i in 0..PAGES {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html("<p>slow</p>").set_delay(DELAY))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = create_test_config(&format!("{}/", server.uri()), CRAWLERS);
    let started = Instant::now();
    let crawled = crawl(&config).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(crawled.len(), PAGES + 1);
    // With at most CRAWLERS slow fetches at a time they need PAGES / CRAWLERS rounds.
    let minimum = DELAY * (PAGES / CRAWLERS) as u32;
    assert!(
        elapsed >= minimum,
        "finished in {:?}, faster than {:?} allows with {} slots",
        elapsed,
        minimum,
        CRAWLERS
    );
}

#[tokio::test]
async fn test_zero_concurrency_is_rejected() {
    let config = create_test_config("http://127.0.0.1:9/", 0);

    let result = tokio::time::timeout(Duration::from_secs(5), crawl(&config))
        .await
        .expect("crawl with no slots must fail fast");

    assert!(matches!(result, Err(CartographerError::Config(_))));
}
