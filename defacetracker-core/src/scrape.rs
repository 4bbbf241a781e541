use crate::error::{Result, TrackerError};
use crate::target::{Target, page_url};
use defacetracker_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use defacetracker_scanner::{DefacementRecord, PageFetcher, Pagination};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://zone-xsec.com";
pub const MAX_PAGES: u8 = 5;

/// Options for configuring a scrape run
pub struct ScrapeOptions {
    pub target: Target,
    /// Page cap, 1..=MAX_PAGES
    pub pages: u8,
    pub origin: Url,
    pub timeout_secs: u64,
}

impl ScrapeOptions {
    pub fn new(target: Target, pages: u8) -> Result<Self> {
        let origin = Url::parse(DEFAULT_ORIGIN)
            .map_err(|e| TrackerError::InvalidOrigin(format!("{}: {}", DEFAULT_ORIGIN, e)))?;

        Ok(Self {
            target,
            pages,
            origin,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Callback for reporting scrape progress
pub type ScrapeProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Why the page loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Reached the configured page cap
    PageCap,
    /// Reached the last page advertised by the pagination control
    LastPage,
    /// The pagination control carried no page numbers
    UnnumberedPagination,
}

#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub records: Vec<DefacementRecord>,
    pub pages_scraped: u8,
    pub skipped_rows: usize,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
}

/// Decide whether the loop stops after scraping `page`.
///
/// A page with no pagination control at all does not end the run; only the
/// page cap bounds it.
pub fn next_step(page: u8, page_cap: u8, pagination: Pagination) -> Option<StopReason> {
    match pagination {
        Pagination::Unnumbered => Some(StopReason::UnnumberedPagination),
        Pagination::LastPage(last) if u32::from(page) >= last => Some(StopReason::LastPage),
        _ if page >= page_cap => Some(StopReason::PageCap),
        _ => None,
    }
}

/// Scrape up to `options.pages` listing pages in order and collect every
/// record. Any fetch or parse failure aborts the run.
pub async fn execute_scrape(
    options: ScrapeOptions,
    progress_callback: Option<ScrapeProgressCallback>,
) -> Result<ScrapeSummary> {
    let ScrapeOptions {
        target,
        pages,
        origin,
        timeout_secs,
    } = options;

    if pages == 0 || pages > MAX_PAGES {
        return Err(TrackerError::InvalidPageCount {
            count: pages,
            max: MAX_PAGES,
        });
    }

    let start = Instant::now();
    let fetcher = PageFetcher::with_timeout(origin.clone(), timeout_secs)?;
    let base_url = target.base_url(&origin);
    info!("Scraping {} from {}", target.describe(), base_url);

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    let mut page = 1;

    let stop_reason = loop {
        let url = page_url(&base_url, page);
        if let Some(ref callback) = progress_callback {
            callback(format!("Scraping page {}/{}: {}", page, pages, url));
        }

        let parsed = fetcher.fetch_page(&url).await?;
        records.extend(parsed.records);
        skipped_rows += parsed.skipped_rows;

        if parsed.pagination == Pagination::Missing {
            debug!("No pagination control on page {}", page);
        }

        if let Some(reason) = next_step(page, pages, parsed.pagination) {
            match reason {
                StopReason::LastPage => info!("Reached the last available page."),
                StopReason::UnnumberedPagination => {
                    info!("Pagination has no page numbers, assuming last page.")
                }
                StopReason::PageCap => info!("Reached the page limit of {}.", pages),
            }
            break reason;
        }
        page += 1;
    };

    Ok(ScrapeSummary {
        records,
        pages_scraped: page,
        skipped_rows,
        stop_reason,
        elapsed: start.elapsed(),
    })
}

/// Short plain-text summary of a finished run
pub fn generate_scrape_report(summary: &ScrapeSummary) -> String {
    let mut report = String::new();
    report.push_str(&format!("  Pages scraped:   {}\n", summary.pages_scraped));
    report.push_str(&format!("  Entries scraped: {}\n", summary.records.len()));
    if summary.skipped_rows > 0 {
        report.push_str(&format!("  Rows skipped:    {}\n", summary.skipped_rows));
    }
    report.push_str(&format!(
        "  Running time:    {:.2} seconds\n",
        summary.elapsed.as_secs_f64()
    ));
    report
}
