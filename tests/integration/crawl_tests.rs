//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sitewalk::config::{Config, InvalidLinkPolicy};
use sitewalk::crawler::Crawler;
use sitewalk::output::{ChannelSink, PageRecord};
use sitewalk::{crawl, Scraper, UrlError, WalkError};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page at `route` that must be fetched exactly `times` times
async fn mount_page(server: &MockServer, route: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn links_page(title: &str, hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, anchors
    )
}

fn crawler(config: Config) -> Crawler<Vec<PageRecord>> {
    Crawler::new(config, Vec::new()).expect("Failed to create crawler")
}

fn delivered_urls(crawler: &Crawler<Vec<PageRecord>>) -> Vec<String> {
    crawler.sink().iter().map(|page| page.url.clone()).collect()
}

#[tokio::test]
async fn test_single_fetch_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &links_page("Home", &["/a", "/b", "https://other.com/c"]),
        1,
    )
    .await;
    mount_page(&server, "/a", &links_page("A", &[]), 0).await;
    mount_page(&server, "/b", &links_page("B", &[]), 0).await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 1));
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.pages_delivered, 1);
    assert_eq!(delivered_urls(&crawler), vec![format!("{}/", base)]);

    // Only same-origin links were discovered, and none of them was visited
    let frontier: Vec<&str> = crawler.state().frontier.iter().collect();
    assert_eq!(
        frontier,
        vec![format!("{}/a", base).as_str(), format!("{}/b", base).as_str()]
    );
    assert!(!crawler.was_indexed(&format!("{}/a", base)));
    assert!(!crawler.state().frontier.contains("https://other.com/c"));
}

#[tokio::test]
async fn test_depth_first_over_live_frontier() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &links_page("Home", &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", &links_page("A", &["/c"]), 1).await;
    mount_page(&server, "/b", &links_page("B", &["/a"]), 1).await;
    mount_page(&server, "/c", &links_page("C", &[]), 1).await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 10));
    let stats = crawler.begin().await.unwrap();

    // After /a is indexed the walk restarts over [/a, /b, /c], reaching /b before /c
    assert_eq!(
        delivered_urls(&crawler),
        vec![
            format!("{}/", base),
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base),
        ]
    );
    assert_eq!(stats.fetches, 4);
    assert_eq!(stats.frontier_size, 3);
    assert_eq!(stats.visited_size, 4);
}

#[tokio::test]
async fn test_fetch_budget_never_exceeded() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A cycle of pages that all link to each other
    let routes = ["/", "/p1", "/p2", "/p3", "/p4", "/p5"];
    let all_links = links_page("Cycle", &routes);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(all_links))
        .expect(3)
        .mount(&server)
        .await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 3));
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetches, 3);
    assert_eq!(stats.pages_delivered, 3);
    assert_eq!(crawler.sink().len(), 3);
    assert!(crawler.state().frontier.len() > 3);
}

#[tokio::test]
async fn test_canonical_marks_both_urls_visited() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/page1",
        r#"<html><head><link rel="canonical" href="/p2"></head>
           <body><a href="/p2">same page</a><a href="/p3">next</a></body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/p2", &links_page("P2", &[]), 0).await;
    mount_page(&server, "/p3", &links_page("P3", &[]), 1).await;

    let mut crawler = crawler(Config::new(format!("{}/page1", base), 5));
    crawler.begin().await.unwrap();

    assert!(crawler.was_indexed(&format!("{}/page1", base)));
    assert!(crawler.was_indexed(&format!("{}/p2", base)));
    assert!(crawler.was_indexed(&format!("{}/p3", base)));
    assert_eq!(crawler.fetch_count(), 2);
}

#[tokio::test]
async fn test_query_strings_collapse_when_ignored() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &links_page("Home", &["/list?page=1", "/list?page=2"]),
        1,
    )
    .await;

    let config = Config::new(format!("{}/", base), 1).with_ignore_query_params(true);
    let mut crawler = crawler(config);
    crawler.begin().await.unwrap();

    let frontier: Vec<&str> = crawler.state().frontier.iter().collect();
    assert_eq!(frontier, vec![format!("{}/list", base).as_str()]);
}

#[tokio::test]
async fn test_query_strings_kept_by_default() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &links_page("Home", &["/list?page=1", "/list?page=2"]),
        1,
    )
    .await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 1));
    crawler.begin().await.unwrap();

    assert_eq!(crawler.state().frontier.len(), 2);
    assert!(crawler
        .state()
        .frontier
        .contains(&format!("{}/list?page=2", base)));
}

#[tokio::test]
async fn test_empty_response_stops_branch() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &links_page("Home", &["/broken"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 5));
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetches, 2);
    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.pages_delivered, 1);
    assert_eq!(stats.visited_size, 1);
    assert!(!crawler.was_indexed(&format!("{}/broken", base)));
}

#[tokio::test]
async fn test_failed_url_is_attempted_again_from_later_walk() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &links_page("Home", &["/broken", "/ok"]), 1).await;
    mount_page(&server, "/ok", &links_page("OK", &[]), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 10));
    let stats = crawler.begin().await.unwrap();

    // "/", "/broken", "/ok", then "/broken" again from the walk started by "/ok"
    assert_eq!(stats.fetches, 4);
    assert_eq!(stats.fetch_failures, 2);
}

#[tokio::test]
async fn test_connection_failure_contained() {
    let server = MockServer::start().await;
    let base = server.uri();
    drop(server);

    let mut crawler = crawler(Config::new(format!("{}/", base), 3));
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.fetch_failures, 1);
    assert!(crawler.sink().is_empty());
}

#[tokio::test]
async fn test_latin1_page_delivered_and_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    b"<html><head><title>Caf\xE9</title></head><body><a href=\"/a\">a</a></body></html>"
                        .to_vec(),
                )
                .insert_header("content-type", "text/html; charset=iso-8859-1"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/a", &links_page("A", &[]), 1).await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 5));
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetches, 2);
    assert_eq!(stats.pages_delivered, 2);
    assert_eq!(Scraper::new(&crawler.sink()[0].document).text("title"), "Caf\u{e9}");
    assert!(crawler.was_indexed(&format!("{}/a", base)));
}

#[tokio::test]
async fn test_invalid_utf8_body_still_delivered() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x3c, 0xff, 0xfe, 0x3e]))
        .expect(1)
        .mount(&server)
        .await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 3));
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetch_failures, 0);
    assert_eq!(stats.pages_delivered, 1);
    assert!(crawler.was_indexed(&format!("{}/", base)));
}

#[tokio::test]
async fn test_invalid_link_aborts_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &links_page("Home", &["http://exa mple.com/", "/a"]),
        1,
    )
    .await;
    mount_page(&server, "/a", &links_page("A", &[]), 0).await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 5));
    let result = crawler.begin().await;

    assert!(matches!(
        result,
        Err(WalkError::Url(UrlError::InvalidLink { .. }))
    ));
    // The page was still delivered before its links were examined
    assert_eq!(crawler.sink().len(), 1);
}

#[tokio::test]
async fn test_invalid_link_skipped_when_configured() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &links_page("Home", &["http://exa mple.com/", "/a"]),
        1,
    )
    .await;
    mount_page(&server, "/a", &links_page("A", &[]), 1).await;

    let config =
        Config::new(format!("{}/", base), 5).with_invalid_link_policy(InvalidLinkPolicy::Skip);
    let mut crawler = crawler(config);
    let stats = crawler.begin().await.unwrap();

    assert_eq!(stats.fetches, 2);
}

#[tokio::test]
async fn test_absolute_same_origin_links_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    let absolute = format!("{}/abs", base);
    mount_page(&server, "/", &links_page("Home", &[absolute.as_str()]), 1).await;
    mount_page(&server, "/abs", &links_page("Abs", &[]), 1).await;

    let mut crawler = crawler(Config::new(format!("{}/", base), 5));
    crawler.begin().await.unwrap();

    assert!(crawler.was_indexed(&absolute));
}

#[tokio::test]
async fn test_request_delay_applied() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &links_page("Home", &["/a"]), 1).await;
    mount_page(&server, "/a", &links_page("A", &[]), 1).await;

    let config = Config::new(format!("{}/", base), 5).with_request_delay(50);
    let mut crawler = crawler(config);

    let started = Instant::now();
    crawler.begin().await.unwrap();

    assert_eq!(crawler.fetch_count(), 2);
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_independent_crawls_do_not_share_state() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &links_page("Home", &[]), 2).await;

    let mut first = crawler(Config::new(format!("{}/", base), 5));
    let mut second = crawler(Config::new(format!("{}/", base), 5));
    first.begin().await.unwrap();
    second.begin().await.unwrap();

    assert_eq!(first.fetch_count(), 1);
    assert_eq!(second.fetch_count(), 1);
}

#[tokio::test]
async fn test_crawl_with_channel_sink() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &links_page("Home", &["/a"]), 1).await;
    mount_page(&server, "/a", &links_page("Page A", &[]), 1).await;

    let (sink, mut rx) = ChannelSink::new();
    let crawl_task = crawl(Config::new(format!("{}/", base), 5), sink);
    let collect_task = async {
        let mut titles = Vec::new();
        while let Some(page) = rx.recv().await {
            titles.push(Scraper::new(&page.document).text("title"));
        }
        titles
    };

    let (result, titles) = tokio::join!(crawl_task, collect_task);

    assert_eq!(result.unwrap().pages_delivered, 2);
    assert_eq!(titles, vec!["Home".to_string(), "Page A".to_string()]);
}

#[tokio::test]
async fn test_crawl_rejects_invalid_config() {
    let result = crawl(Config::new("ftp://example.com/", 5), Vec::<PageRecord>::new()).await;
    assert!(matches!(result, Err(WalkError::Config(_))));
}
