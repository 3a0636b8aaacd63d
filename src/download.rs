//! File downloads
//!
//! Resolved releases are fetched with their path, query, and fragment
//! percent-re-encoded (catalog filenames routinely contain spaces); the
//! scheme and host pass through untouched. Bodies are streamed to disk
//! chunk-wise rather than buffered whole.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use futures::StreamExt;
use reqwest::Url;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::catalog::ResolvedFile;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches a resolved release to a local file.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FileDownloader: Send + Sync {
    /// Download `file` into `dest_dir`, named by its catalog filename.
    async fn download(&self, file: &ResolvedFile, dest_dir: &Path) -> Result<(), DownloadError>;
}

/// HTTP downloader streaming response bodies to disk.
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("modfetch")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FileDownloader for HttpDownloader {
    async fn download(&self, file: &ResolvedFile, dest_dir: &Path) -> Result<(), DownloadError> {
        let url = encode_download_url(&file.url)?;
        info!("downloading {} from {url}", file.filename);

        let response = self.client.get(url).send().await?.error_for_status()?;

        let dest = dest_dir.join(&file.filename);
        let mut out = File::create(&dest).await?;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            out.write_all(&chunk?).await?;
        }
        out.flush().await?;

        Ok(())
    }
}

/// Re-encode a catalog download URL.
///
/// Characters the path, query, or fragment cannot carry raw get
/// percent-encoded; already-encoded sequences are preserved; scheme and
/// host are left as they are.
fn encode_download_url(raw: &str) -> Result<Url, DownloadError> {
    Url::parse(raw).map_err(|e| DownloadError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
