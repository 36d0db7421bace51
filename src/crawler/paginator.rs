//! Pagination controller - the main fetch loop
//!
//! This module walks the search result pages one at a time:
//! - Building the request URL for each page
//! - Fetching and parsing the page
//! - Writing every listing to the sink
//! - Deciding whether another page exists, and pacing requests between pages

use crate::config::Config;
use crate::crawler::extractor::{parse_document, ListingExtractor};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::throttle::{Sleeper, TokioSleeper};
use crate::output::{CsvSink, RecordSink, RunSummary, StopReason};
use crate::state::{PageState, Phase};
use crate::url::page_url;
use crate::{ConfigError, FetchError, ScrapeError};
use std::path::Path;
use std::time::Duration;

/// What a single fetched page contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    /// No listing containers; nothing was written
    Empty,

    /// Listings were written
    Written { records: usize, has_next: bool },
}

/// Drives the fetch/extract/decide loop for one run
pub struct Paginator<F, S> {
    fetcher: F,
    sleeper: S,
    extractor: ListingExtractor,
    base_url: String,
    search_url: String,
    page_param: String,
    page_delay: Duration,
}

impl<F: PageFetcher, S: Sleeper> Paginator<F, S> {
    /// Creates a paginator from a resolved configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration; site URLs are captured here and never re-resolved
    /// * `fetcher` - How pages are requested
    /// * `sleeper` - How the inter-page pause is taken
    ///
    /// # Returns
    ///
    /// * `Ok(Paginator)` - Ready to run
    /// * `Err(ScrapeError::Config)` - A selector failed to compile
    pub fn new(config: &Config, fetcher: F, sleeper: S) -> Result<Self, ScrapeError> {
        let extractor = ListingExtractor::new(&config.selectors)?;

        Ok(Self {
            fetcher,
            sleeper,
            extractor,
            base_url: config.site.base_url.clone(),
            search_url: config.site.search_url.clone(),
            page_param: config.crawler.page_param.clone(),
            page_delay: Duration::from_millis(config.crawler.page_delay_ms),
        })
    }

    /// Overrides the pause between page fetches
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// Runs the loop until a stop condition is reached
    ///
    /// The loop stops when a page has no listing containers, or when a page with
    /// listings has no next-page control. Either signal alone is enough.
    ///
    /// Any fetch or parse failure ends the run with an error. Rows written for
    /// earlier pages have already been flushed to the sink.
    pub async fn run<K: RecordSink>(&self, sink: &mut K) -> Result<RunSummary, ScrapeError> {
        let mut state = PageState::new(self.url_for(1));
        let mut pages_fetched = 0;

        tracing::info!("Starting run at {}", self.search_url);

        loop {
            tracing::debug!("Fetching page {}: {}", state.page, state.url);

            let body = self
                .fetcher
                .fetch(&state.url)
                .await
                .map_err(|e| classify_fetch_error(state.page, e))?;
            pages_fetched += 1;

            let stop_reason = match self.process_page(&body, &mut state, sink)? {
                PageOutcome::Empty => {
                    tracing::info!("Page {} has no listings, stopping", state.page);
                    Some(StopReason::EmptyPage { page: state.page })
                }
                PageOutcome::Written { records, has_next } => {
                    tracing::info!(
                        "Page {}: {} listings written ({} total)",
                        state.page,
                        records,
                        sink.records_written()
                    );

                    if has_next {
                        None
                    } else {
                        tracing::info!("Page {} has no next-page link, stopping", state.page);
                        Some(StopReason::NoNextPage { page: state.page })
                    }
                }
            };

            if let Some(stop_reason) = stop_reason {
                if !state.phase().is_terminal() {
                    state.transition(Phase::Done)?;
                }
                tracing::debug!("Pagination done on page {}", stop_reason.page());

                return Ok(RunSummary {
                    pages_fetched,
                    records_written: sink.records_written(),
                    stop_reason,
                });
            }

            let next_url = self.url_for(state.page + 1);
            state.advance(next_url)?;

            tracing::trace!("Waiting {:?} before page {}", self.page_delay, state.page);
            self.sleeper.sleep(self.page_delay).await;
        }
    }

    /// Parses one page, writes its records and reads the next-page signal
    ///
    /// The parsed document lives only inside this call.
    fn process_page<K: RecordSink>(
        &self,
        body: &str,
        state: &mut PageState,
        sink: &mut K,
    ) -> Result<PageOutcome, ScrapeError> {
        let document = parse_document(body);

        if self.extractor.count_listings(&document) == 0 {
            state.transition(Phase::Done)?;
            return Ok(PageOutcome::Empty);
        }

        state.transition(Phase::Extracting)?;
        let records = self.extractor.extract(&document, &self.base_url);
        for record in &records {
            sink.write_record(record)?;
        }
        sink.flush()?;

        state.transition(Phase::Deciding)?;
        state.has_next = self.extractor.has_next_page(&document);

        Ok(PageOutcome::Written {
            records: records.len(),
            has_next: state.has_next,
        })
    }

    fn url_for(&self, page: u32) -> String {
        page_url(&self.search_url, page, &self.page_param)
    }
}

/// Attaches the page number; an undecodable body is reported as a parse failure
fn classify_fetch_error(page: u32, error: FetchError) -> ScrapeError {
    match error {
        FetchError::Undecodable { url, message } => ScrapeError::Parse { page, url, message },
        source => ScrapeError::Fetch { page, source },
    }
}

/// Runs a complete scrape with the HTTP fetcher and a CSV file sink
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client
/// 2. Open the output file and write the header
/// 3. Walk the result pages, writing rows as it goes
/// 4. Return the run summary
///
/// The output file is closed on every exit path; on failure it keeps the
/// header and all rows from pages completed before the error.
///
/// # Example
///
/// ```no_run
/// use listing_harvester::config::{load_config, EnvSource};
/// use listing_harvester::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(None, &EnvSource::new())?;
/// let summary = run_scrape(&config).await?;
/// println!("{} listings", summary.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config) -> Result<RunSummary, ScrapeError> {
    let fetcher = HttpFetcher::from_config(&config.crawler).map_err(|e| {
        ConfigError::Validation(format!("Failed to build HTTP client: {}", e))
    })?;
    let paginator = Paginator::new(config, fetcher, TokioSleeper)?;

    let mut sink = CsvSink::create(Path::new(&config.output.csv_path))?;
    let summary = paginator.run(&mut sink).await?;
    sink.flush()?;

    tracing::info!(
        "Run finished: {} pages, {} listings ({})",
        summary.pages_fetched,
        summary.records_written,
        summary.stop_reason
    );

    Ok(summary)
}
