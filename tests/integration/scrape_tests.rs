use crate::common::{html, read_csv, results_page, test_config, Listing};
use listing_harvester::crawler::{run_scrape, HttpFetcher, Paginator, TokioSleeper};
use listing_harvester::output::{CsvSink, StopReason};
use listing_harvester::{FetchError, ScrapeError};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADER: [&str; 9] = [
    "Title", "Price", "Address", "Area", "Layout", "Age", "Station", "Walk Time", "URL",
];

/// Mounts `page=n` mocks first so they take precedence over the bare search path
async fn mount_page(server: &MockServer, page: Option<u32>, response: ResponseTemplate) {
    let mock = Mock::given(method("GET")).and(path("/search"));
    let mock = match page {
        Some(n) => mock.and(query_param("page", n.to_string())),
        None => mock,
    };

    mock.respond_with(response).mount(server).await;
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("Request recording disabled")
        .len()
}

#[tokio::test]
async fn test_two_pages_end_to_end() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(
        &server,
        Some(2),
        html(results_page(
            &[Listing::new("ルミエール西新宿", "12.3万円", "/chintai/jnc_000003/")],
            false,
        )),
    )
    .await;
    mount_page(
        &server,
        None,
        html(results_page(
            &[
                Listing::new("  パークハイツ  ", " 9.8万円 ", "/chintai/jnc_000001/"),
                Listing::new("メゾン都庁前", "10.5万円", " /chintai/jnc_000002/ "),
            ],
            true,
        )),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.records_written, 3);
    assert_eq!(summary.stop_reason, StopReason::NoNextPage { page: 2 });
    assert_eq!(request_count(&server).await, 2);

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, HEADER);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 9));

    let first = &rows[0];
    assert_eq!(first[0], "パークハイツ");
    assert_eq!(first[1], "9.8万円");
    assert_eq!(first[2], "東京都新宿区西新宿");
    assert_eq!(first[3], "1LDK");
    assert_eq!(first[4], "1LDK");
    assert_eq!(first[5], "都営大江戸線/都庁前駅 歩4分");
    assert_eq!(first[6], first[5]);
    assert_eq!(first[7], first[5]);
    assert_eq!(first[8], format!("{}/chintai/jnc_000001/", server.uri()));

    assert_eq!(rows[1][8], format!("{}/chintai/jnc_000002/", server.uri()));
    assert_eq!(rows[2][0], "ルミエール西新宿");
}

#[tokio::test]
async fn test_server_error_on_first_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(&server, None, ResponseTemplate::new(500)).await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let err = run_scrape(&config).await.unwrap_err();

    match err {
        ScrapeError::Fetch { page, source } => {
            assert_eq!(page, 1);
            assert_eq!(source.status(), Some(500));
        }
        other => panic!("Expected fetch error, got {other:?}"),
    }

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, HEADER);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_failure_mid_run_keeps_earlier_rows() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(&server, Some(2), ResponseTemplate::new(502)).await;
    mount_page(
        &server,
        None,
        html(results_page(
            &[
                Listing::new("A", "1万円", "/a/"),
                Listing::new("B", "2万円", "/b/"),
            ],
            true,
        )),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let paginator = Paginator::new(
        &config,
        HttpFetcher::from_config(&config.crawler).unwrap(),
        TokioSleeper,
    )
    .unwrap()
    .with_page_delay(Duration::from_millis(10));

    let mut sink = CsvSink::create(&csv_path).unwrap();
    let result = paginator.run(&mut sink).await;
    drop(sink);

    assert!(matches!(result, Err(ScrapeError::Fetch { page: 2, .. })));

    let (_, rows) = read_csv(&csv_path);
    let titles: Vec<_> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}

#[tokio::test]
async fn test_empty_page_stops_pagination() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    // Stale pagination UI on the empty page must not keep the run going
    mount_page(&server, Some(3), html(results_page(&[], true))).await;
    mount_page(
        &server,
        Some(2),
        html(results_page(&[Listing::new("B", "2万円", "/b/")], true)),
    )
    .await;
    mount_page(
        &server,
        None,
        html(results_page(&[Listing::new("A", "1万円", "/a/")], true)),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let paginator = Paginator::new(
        &config,
        HttpFetcher::from_config(&config.crawler).unwrap(),
        TokioSleeper,
    )
    .unwrap()
    .with_page_delay(Duration::from_millis(10));

    let mut sink = CsvSink::create(&csv_path).unwrap();
    let summary = paginator.run(&mut sink).await.unwrap();
    drop(sink);

    assert_eq!(summary.stop_reason, StopReason::EmptyPage { page: 3 });
    assert_eq!(summary.records_written, 2);
    assert_eq!(request_count(&server).await, 3);

    let (_, rows) = read_csv(&csv_path);
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_missing_link_degrades_to_base_url() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(
        &server,
        None,
        html(results_page(
            &[Listing {
                title: "No link",
                price: "",
                href: None,
            }],
            false,
        )),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    run_scrape(&config).await.unwrap();

    let (_, rows) = read_csv(&csv_path);
    assert_eq!(rows[0][0], "No link");
    assert_eq!(rows[0][1], "");
    assert_eq!(rows[0][8], server.uri());
}

#[tokio::test]
async fn test_plain_text_content_type_is_still_scraped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(
        &server,
        None,
        ResponseTemplate::new(200).set_body_raw(
            results_page(&[Listing::new("Plain", "7万円", "/chintai/jnc_9/")], false),
            "text/plain; charset=utf-8",
        ),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let summary = run_scrape(&config).await.unwrap();

    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.stop_reason, StopReason::NoNextPage { page: 1 });

    let (_, rows) = read_csv(&csv_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Plain");
}

#[tokio::test]
async fn test_non_markup_body_ends_run_cleanly() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(
        &server,
        None,
        ResponseTemplate::new(200).set_body_raw(r#"{"items":[]}"#, "application/json"),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let summary = run_scrape(&config).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::EmptyPage { page: 1 });
    assert_eq!(summary.records_written, 0);
}

#[tokio::test]
async fn test_invalid_utf8_body_is_parse_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    mount_page(
        &server,
        None,
        ResponseTemplate::new(200)
            .set_body_raw(vec![0x3c, 0x70, 0x3e, 0xff, 0xfe, 0xc3], "text/html"),
    )
    .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let err = run_scrape(&config).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Parse { page: 1, .. }));

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, HEADER);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    // Nothing listens on the discard port
    let config = test_config("http://127.0.0.1:9", csv_path.to_str().unwrap());
    let err = run_scrape(&config).await.unwrap_err();

    match err {
        ScrapeError::Fetch { page, source } => {
            assert_eq!(page, 1);
            assert!(matches!(source, FetchError::Transport { .. }));
            assert_eq!(source.status(), None);
        }
        other => panic!("expected a fetch error, got {:?}", other),
    }

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, HEADER);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("properties.csv");

    // Requests without the configured agent fall through to a 404
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("user-agent", "TestHarvester/1.0"))
        .respond_with(html(results_page(&[], false)))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), csv_path.to_str().unwrap());
    let summary = run_scrape(&config).await.expect("User agent was not sent");

    assert_eq!(summary.stop_reason, StopReason::EmptyPage { page: 1 });
}
