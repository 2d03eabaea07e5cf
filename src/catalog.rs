use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::{error::AppError, models::MenuItem};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to menu service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("menu service responded with {0}")]
    Status(reqwest::StatusCode),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::UpstreamUnavailable(err.to_string())
    }
}

/// Read access to the menu owned by the catalog service.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the full menu as it is right now.
    async fn fetch_all(&self) -> Result<Vec<MenuItem>, CatalogError>;
}

/// Catalog client talking to the menu service over HTTP.
///
/// One `GET {base}/api/menu` per call, bounded by the configured timeout.
/// There is no retry and no caching.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    menu_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let menu_url = format!("{}/api/menu", base_url.trim_end_matches('/'));
        Ok(Self { client, menu_url })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    #[tracing::instrument(skip(self), fields(url = %self.menu_url))]
    async fn fetch_all(&self) -> Result<Vec<MenuItem>, CatalogError> {
        let response = self.client.get(&self.menu_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let items = response.json::<Vec<MenuItem>>().await?;
        tracing::debug!(count = items.len(), "fetched menu");
        Ok(items)
    }
}
