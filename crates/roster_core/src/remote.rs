//! Read-only remote user listing.

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use shared::protocol::UsersPage;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Most pages `fetch_all_pages` will request, whether or not the source
/// reports `total_pages`.
pub const MAX_LISTING_PAGES: u32 = 1_000;

#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("remote base url '{url}' is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to reach user listing: {0}")]
    Transport(String),
    #[error("user listing responded with HTTP {0}")]
    Status(u16),
    #[error("failed to decode user listing: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteFetchError {
    fn from(value: reqwest::Error) -> Self {
        if let Some(status) = value.status() {
            Self::Status(status.as_u16())
        } else if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

#[async_trait]
pub trait RemoteUserSource: Send + Sync {
    async fn fetch(&self, page: u32, per_page: u32) -> Result<UsersPage, RemoteFetchError>;
}

/// Listing served as `GET {base}/api/users?page=&per_page=`.
pub struct HttpUserSource {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpUserSource {
    pub fn new(base_url: &str) -> Result<Self, RemoteFetchError> {
        let invalid = |reason: String| RemoteFetchError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https".to_string()));
        }
        let endpoint = base
            .join("/api/users")
            .map_err(|err| invalid(err.to_string()))?;

        Ok(Self {
            http: Client::new(),
            endpoint,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteUserSource for HttpUserSource {
    async fn fetch(&self, page: u32, per_page: u32) -> Result<UsersPage, RemoteFetchError> {
        let mut request = self
            .http
            .get(self.endpoint.clone())
            .query(&[("page", page), ("per_page", per_page)]);
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let res = request.send().await?.error_for_status()?;
        let page: UsersPage = res.json().await?;
        debug!(page = page.page, users = page.data.len(), "fetched user listing page");
        Ok(page)
    }
}

/// Fetches every page of the listing and concatenates them in page order.
/// The returned page carries the combined data and the reported totals.
pub async fn fetch_all_pages(
    source: &dyn RemoteUserSource,
    per_page: u32,
) -> Result<UsersPage, RemoteFetchError> {
    let mut combined = source.fetch(1, per_page).await?;

    if combined.total_pages > 1 {
        if combined.total_pages > MAX_LISTING_PAGES {
            warn!(
                reported = combined.total_pages,
                limit = MAX_LISTING_PAGES,
                "user listing reports too many pages; truncating"
            );
            combined.total_pages = MAX_LISTING_PAGES;
        }
        let rest = try_join_all((2..=combined.total_pages).map(|page| source.fetch(page, per_page)))
            .await?;
        for page in rest {
            combined.data.extend(page.data);
        }
    } else if combined.total_pages == 0 && !combined.data.is_empty() {
        let mut fetched = 1;
        while fetched < MAX_LISTING_PAGES {
            let next = source.fetch(fetched + 1, per_page).await?;
            if next.data.is_empty() {
                break;
            }
            combined.data.extend(next.data);
            fetched += 1;
        }
        combined.total_pages = fetched;
    }

    combined.page = 1;
    Ok(combined)
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
