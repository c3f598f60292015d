use hn_sweep::config::Config;
use hn_sweep::crawler::{sweep, PageIndex};
use hn_sweep::SweepError;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a listing page with `count` stories titled `p{page}-{i}`
fn listing_html(page: u32, count: usize) -> String {
    let mut rows = String::new();
    for i in 0..count {
        rows.push_str(&format!(
            r#"<tr class="athing" id="{page}{i}"><td class="title"><span class="titleline"><a href="/item?id={page}{i}">p{page}-{i}</a></span></td></tr>
<tr><td class="subtext"><span class="score">{i} points</span> by <a class="hnuser" href="user?id=u{i}">u{i}</a> | <a href="item?id={page}{i}">{i}&nbsp;comments</a></td></tr>
"#
        ));
    }
    format!("<html><body><table>{}</table></body></html>", rows)
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, pages: u32, workers: u32) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.user_agent = "TestSweeper/1.0".to_string();
    config.scrape.pages = pages;
    config.scrape.workers = workers;
    config.scrape.timeout_secs = 5;
    config.scrape.politeness_delay_ms = 10; // Very short for testing
    config
}

/// Mounts a response for one listing page
async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    if page == 1 {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    } else {
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("p", page.to_string()))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }
}

async fn mount_listing(server: &MockServer, page: u32, count: usize) {
    mount_page(
        server,
        page,
        ResponseTemplate::new(200).set_body_string(listing_html(page, count)),
    )
    .await;
}

fn sorted_titles(outcome: &hn_sweep::AggregateOutcome) -> Vec<String> {
    let mut titles: Vec<String> = outcome.stories.iter().map(|s| s.title.clone()).collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn test_three_pages_two_workers_all_succeed() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 5).await;
    mount_listing(&server, 2, 0).await;
    mount_listing(&server, 3, 7).await;

    let config = create_test_config(&server.uri(), 3, 2);
    let outcome = sweep(&config, CancellationToken::new())
        .await
        .expect("Sweep failed");

    assert_eq!(outcome.stories.len(), 12);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.pages_succeeded, 3);
    assert!(!outcome.interrupted);
}

#[tokio::test]
async fn test_one_page_fails_with_503() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 4).await;
    mount_page(&server, 2, ResponseTemplate::new(503)).await;

    let config = create_test_config(&server.uri(), 2, 1);
    let outcome = sweep(&config, CancellationToken::new())
        .await
        .expect("Sweep failed");

    assert_eq!(outcome.stories.len(), 4);
    let error = outcome.error.as_ref().expect("Expected aggregate error");
    assert!(matches!(error, SweepError::Aggregate { failures: 1 }));
    assert!(error.to_string().contains("1 error(s)"));
    assert_eq!(outcome.failed_pages, vec![PageIndex::new(2).unwrap()]);
}

#[tokio::test]
async fn test_every_page_dispatched_exactly_once() {
    let server = MockServer::start().await;
    for page in 1..=7 {
        mount_listing(&server, page, 2).await;
    }

    let config = create_test_config(&server.uri(), 7, 3);
    let outcome = sweep(&config, CancellationToken::new())
        .await
        .expect("Sweep failed");

    // Each mock expects exactly one request; wiremock verifies on drop
    assert_eq!(outcome.pages_collected(), 7);
    assert_eq!(outcome.stories.len(), 14);
}

#[tokio::test]
async fn test_failures_keep_only_successful_stories() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 3).await;
    mount_page(&server, 2, ResponseTemplate::new(500)).await;
    mount_listing(&server, 3, 2).await;
    mount_page(&server, 4, ResponseTemplate::new(404)).await;
    mount_listing(&server, 5, 1).await;

    let config = create_test_config(&server.uri(), 5, 3);
    let outcome = sweep(&config, CancellationToken::new())
        .await
        .expect("Sweep failed");

    assert_eq!(outcome.failures(), 2);
    assert!(outcome
        .error
        .as_ref()
        .unwrap()
        .to_string()
        .contains("2 error(s)"));

    let mut failed: Vec<u32> = outcome.failed_pages.iter().map(|p| p.get()).collect();
    failed.sort();
    assert_eq!(failed, vec![2, 4]);

    assert_eq!(
        sorted_titles(&outcome),
        vec!["p1-0", "p1-1", "p1-2", "p3-0", "p3-1", "p5-0"]
    );
}

#[tokio::test]
async fn test_stories_are_fully_extracted() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 3).await;

    let config = create_test_config(&server.uri(), 1, 1);
    let outcome = sweep(&config, CancellationToken::new())
        .await
        .expect("Sweep failed");

    let story = outcome
        .stories
        .iter()
        .find(|s| s.title == "p1-2")
        .expect("story p1-2 missing");
    assert_eq!(story.id, "12");
    assert_eq!(story.url, format!("{}/item?id=12", server.uri()));
    assert_eq!(story.points, 2);
    assert_eq!(story.author, "u2");
    assert_eq!(story.comments, 2);
}

#[tokio::test]
async fn test_cancellation_stops_pool_promptly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(1, 1))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let config = create_test_config(&server.uri(), 6, 2);
    let started = Instant::now();
    let outcome = tokio::time::timeout(Duration::from_secs(5), sweep(&config, cancel))
        .await
        .expect("Pool did not terminate after cancellation")
        .expect("Sweep failed");

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(outcome.interrupted);
    // Only the two in-flight pages had started; both were abandoned
    assert!(outcome.pages_collected() <= 2);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_cancelled_before_start_fetches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(1, 1)))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let config = create_test_config(&server.uri(), 4, 2);
    let outcome = sweep(&config, cancel).await.expect("Sweep failed");

    assert_eq!(outcome.pages_collected(), 0);
    assert!(outcome.stories.is_empty());
    assert!(outcome.interrupted);
}

#[tokio::test]
async fn test_request_timeout_counts_as_failure() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 2).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200)
            .set_body_string(listing_html(2, 2))
            .set_delay(Duration::from_secs(4)),
    )
    .await;

    let mut config = create_test_config(&server.uri(), 2, 2);
    config.scrape.timeout_secs = 1;
    let outcome = sweep(&config, CancellationToken::new())
        .await
        .expect("Sweep failed");

    assert_eq!(outcome.stories.len(), 2);
    assert_eq!(outcome.failures(), 1);
    assert!(!outcome.interrupted);
}

#[tokio::test]
async fn test_invalid_config_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 11, 2);
    let result = sweep(&config, CancellationToken::new()).await;
    assert!(matches!(result, Err(SweepError::Config(_))));

    let config = create_test_config(&server.uri(), 2, 0);
    let result = sweep(&config, CancellationToken::new()).await;
    assert!(matches!(result, Err(SweepError::Config(_))));
}
