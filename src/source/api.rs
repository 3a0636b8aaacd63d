//! Structured mod database endpoint
//!
//! `GET <base>/api/mod/<modid>` returns release metadata as JSON. The
//! envelope carries its own `statuscode` field separate from the HTTP
//! status; anything but "200" means the catalog is unavailable here and
//! the caller falls back to the release page. Unknown fields are ignored,
//! so both the original and the extended release record shapes (the latter
//! adds `releaseid`/`fileid`) decode.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::{ModCatalog, TagRelease};
use crate::source::{HttpCatalogSource, SourceError};

/// Envelope returned by the mod endpoint.
#[derive(Debug, Deserialize)]
struct ApiModResponse {
    statuscode: String,
    #[serde(rename = "mod")]
    mod_entry: Option<ApiModEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiModEntry {
    name: String,
    modid: u64,
    releases: Vec<ApiRelease>,
}

#[derive(Debug, Deserialize)]
struct ApiRelease {
    mainfile: String,
    filename: String,
    tags: Vec<String>,
}

impl HttpCatalogSource {
    pub(super) async fn fetch_api_catalog(
        &self,
        mod_id: &str,
    ) -> Result<ModCatalog<TagRelease>, SourceError> {
        let url = format!("{}/api/mod/{}", self.base_url, mod_id);
        debug!("fetching release info from {url}");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("mod api returned status {status}: {url}");
            return Err(SourceError::Status(status.as_str().to_string()));
        }

        let envelope: ApiModResponse = response.json().await.map_err(|e| {
            warn!("failed to decode mod api response: {e}");
            SourceError::Invalid(e.to_string())
        })?;

        if envelope.statuscode != "200" {
            return Err(SourceError::Status(envelope.statuscode));
        }

        let entry = envelope
            .mod_entry
            .ok_or_else(|| SourceError::Invalid("statuscode 200 without a mod object".to_string()))?;

        Ok(ModCatalog {
            name: entry.name,
            mod_id: entry.modid.to_string(),
            releases: entry
                .releases
                .into_iter()
                .map(|release| TagRelease {
                    filename: release.filename,
                    url: release.mainfile,
                    tags: release.tags,
                })
                .collect(),
        })
    }
}
