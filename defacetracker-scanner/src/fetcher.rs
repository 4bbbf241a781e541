use crate::error::{Result, ScanError};
use crate::extract::{ParsedPage, parse_page};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Browser identities rotated across requests.
pub const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.96 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1",
];

pub fn random_user_agent() -> &'static str {
    USER_AGENTS[fastrand::usize(..USER_AGENTS.len())]
}

/// Fetches listing pages one at a time. No retries.
pub struct PageFetcher {
    client: Client,
    origin: Url,
}

impl PageFetcher {
    pub fn new(origin: Url) -> Result<Self> {
        Self::with_timeout(origin, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(origin: Url, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, origin })
    }

    /// GET `url` and return the body. Any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        let user_agent = random_user_agent();
        debug!("Selected User-Agent: {}", user_agent);
        info!("Sending GET request to {}", url);

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!(
            "Fetched {} ({} bytes in {:?})",
            url,
            body.len(),
            start.elapsed()
        );
        Ok(body)
    }

    /// Fetch a listing page and parse its mirror table and pagination.
    pub async fn fetch_page(&self, url: &str) -> Result<ParsedPage> {
        let body = self.fetch(url).await?;
        let page = parse_page(&body, url, &self.origin)?;
        info!("Total entries scraped from table: {}", page.records.len());
        Ok(page)
    }
}
