//! Request pacing, measured on tokio's paused clock

use listing_harvester::config::{Config, CrawlerConfig, FieldSelectors, OutputConfig, SiteConfig};
use listing_harvester::crawler::{PageFetcher, Paginator, TokioSleeper};
use listing_harvester::output::MemorySink;
use listing_harvester::FetchError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

const SEARCH: &str = "https://example.com/search?q=1";

/// Serves `pages` listing pages, each with a next link except the last
struct TimedFetcher {
    pages: usize,
    fetched_at: Arc<Mutex<Vec<Instant>>>,
}

impl PageFetcher for TimedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let page = {
            let mut times = self.fetched_at.lock().unwrap();
            times.push(Instant::now());
            times.len()
        };
        assert!(page == 1 || url.ends_with(&format!("page={}", page)));

        let next = if page < self.pages {
            r##"<div class="pagination-parts"><a href="#">次へ</a></div>"##
        } else {
            ""
        };
        Ok(format!(
            r#"<html><body><div class="cassetteitem"><div class="cassetteitem_content-title">p{}</div></div>{}</body></html>"#,
            page, next
        ))
    }
}

fn config(page_delay_ms: u64) -> Config {
    Config {
        site: SiteConfig {
            base_url: "https://example.com".to_string(),
            search_url: SEARCH.to_string(),
        },
        crawler: CrawlerConfig {
            page_delay_ms,
            ..CrawlerConfig::default()
        },
        output: OutputConfig::default(),
        selectors: FieldSelectors::default(),
    }
}

async fn fetch_times(pages: usize, page_delay_ms: u64) -> Vec<Instant> {
    let fetched_at = Arc::new(Mutex::new(Vec::new()));
    let fetcher = TimedFetcher {
        pages,
        fetched_at: fetched_at.clone(),
    };

    let paginator = Paginator::new(&config(page_delay_ms), fetcher, TokioSleeper).unwrap();
    let mut sink = MemorySink::new();
    let summary = paginator.run(&mut sink).await.unwrap();
    assert_eq!(summary.pages_fetched as usize, pages);
    assert_eq!(sink.records.len(), pages);

    let times = fetched_at.lock().unwrap().clone();
    times
}

#[tokio::test(start_paused = true)]
async fn test_default_delay_is_at_least_one_second() {
    let times = fetch_times(4, CrawlerConfig::default().page_delay_ms).await;

    assert_eq!(times.len(), 4);
    for pair in times.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= Duration::from_secs(1));
    }
}

#[tokio::test(start_paused = true)]
async fn test_gaps_follow_configured_delay() {
    let times = fetch_times(3, 1500).await;

    for pair in times.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(1500));
    }
}

#[tokio::test(start_paused = true)]
async fn test_single_page_run_does_not_wait() {
    let start = Instant::now();
    let times = fetch_times(1, 1000).await;

    assert_eq!(times.len(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}
