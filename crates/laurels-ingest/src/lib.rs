use std::path::PathBuf;

use thiserror::Error;

pub mod cache;
pub mod fetch;
pub mod html;

pub use cache::PageCache;
pub use fetch::{PageFetcher, page_url};
pub use html::extract_citations;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("invalid page cache {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("page for {year} is not cached and fetching is disabled")]
    MissingPage { year: i32 },
}

/// Return the page for `year`, fetching and caching it on a cache miss.
///
/// With `offline` set a miss is an error instead of a fetch. The cache is
/// only updated in memory; call [`PageCache::save`] to persist it.
pub async fn load_year_page(
    cache: &mut PageCache,
    fetcher: &PageFetcher,
    url_template: &str,
    year: i32,
    offline: bool,
) -> Result<String, IngestError> {
    if let Some(page) = cache.get(year) {
        tracing::debug!(year, "page cache hit");
        return Ok(page.to_string());
    }
    if offline {
        return Err(IngestError::MissingPage { year });
    }

    let url = page_url(url_template, year);
    tracing::info!(year, url = %url, "fetching page");
    let page = fetcher.fetch(&url).await?;
    cache.insert(year, page.clone());
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cached_page_needs_no_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PageCache::open(dir.path().join("c.json")).unwrap();
        cache.insert(2010, "<html>2010</html>".to_string());
        let fetcher = PageFetcher::new().unwrap();

        let page = load_year_page(&mut cache, &fetcher, "http://invalid.test/xxxx", 2010, true)
            .await
            .unwrap();
        assert_eq!(page, "<html>2010</html>");
    }

    #[tokio::test]
    async fn offline_miss_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PageCache::open(dir.path().join("c.json")).unwrap();
        let fetcher = PageFetcher::new().unwrap();

        let err = load_year_page(&mut cache, &fetcher, "http://invalid.test/xxxx", 2011, true)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::MissingPage { year: 2011 }));
        assert!(cache.is_empty());
    }
}
