//! Catalog sources
//!
//! Catalogs come from one of two places on the mod database: a structured
//! JSON endpoint ([`api`]) and the mod's public release page ([`page`]).
//! Both normalize into the catalog record model. [`HttpCatalogSource`]
//! implements both behind the [`CatalogSource`] seam so the orchestrator
//! can be tested without a server.

pub mod api;
pub mod page;

#[cfg(test)]
use mockall::automock;

use thiserror::Error;

use crate::catalog::{ModCatalog, RangeRelease, TagRelease};

/// Default base URL of the mod database.
pub const DEFAULT_BASE_URL: &str = "https://mods.vintagestory.at";

#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure. Never recovered from; ends the run.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The structured endpoint answered with a non-success status.
    #[error("mod api statuscode {0}")]
    Status(String),

    /// A response arrived but could not be interpreted.
    #[error("invalid response: {0}")]
    Invalid(String),
}

/// Where mod catalogs come from.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch a mod's catalog from the structured API.
    ///
    /// # Returns
    /// * `Ok(ModCatalog)` - releases in publication order, tag-list shape
    /// * `Err(SourceError)` - `Status`/`Invalid` mean the endpoint has
    ///   nothing usable and the caller should fall back to the release page
    async fn api_catalog(&self, mod_id: &str) -> Result<ModCatalog<TagRelease>, SourceError>;

    /// Fetch a mod's catalog by scraping its release page.
    async fn page_catalog(&self, mod_id: &str) -> Result<ModCatalog<RangeRelease>, SourceError>;
}

/// HTTP implementation over the mod database.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    /// Creates a source with a custom base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("modfetch")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for HttpCatalogSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn api_catalog(&self, mod_id: &str) -> Result<ModCatalog<TagRelease>, SourceError> {
        self.fetch_api_catalog(mod_id).await
    }

    async fn page_catalog(&self, mod_id: &str) -> Result<ModCatalog<RangeRelease>, SourceError> {
        self.fetch_page_catalog(mod_id).await
    }
}
