use std::time::Duration;

use crate::IngestError;

/// Placeholder replaced by the year in a page URL template.
pub const YEAR_PLACEHOLDER: &str = "xxxx";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Substitute `year` into `template`.
pub fn page_url(template: &str, year: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// HTTP client for year pages.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new() -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("laurels/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET `url` and return the body as text.
    pub async fn fetch(&self, url: &str) -> Result<String, IngestError> {
        let resp = self.client.get(url).timeout(self.timeout).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(IngestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
