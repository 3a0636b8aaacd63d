//! Run orchestration
//!
//! Two strictly sequential passes: resolve every configured mod, then
//! download everything that resolved. Outcomes accumulate in an explicit
//! list in config order and are returned to the caller; nothing is shared
//! or mutated across mods.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::ResolvedFile;
use crate::download::{DownloadError, FileDownloader};
use crate::resolve::{ExemptionList, resolve_ranged, resolve_tagged};
use crate::source::{CatalogSource, SourceError};
use crate::version::VersionError;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of resolving one configured mod.
///
/// `resolved` being `None` is the reportable "no compatible release" case,
/// not a failure of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModOutcome {
    pub mod_id: String,
    pub resolved: Option<ResolvedFile>,
}

/// Identifiers that only exist on the human-readable pages.
fn page_only(mod_id: &str) -> bool {
    mod_id.contains("show")
}

/// Sequential resolve-then-download driver over a catalog source and a
/// downloader.
pub struct Updater<S, D> {
    source: S,
    downloader: D,
    exemptions: ExemptionList,
}

impl<S: CatalogSource, D: FileDownloader> Updater<S, D> {
    pub fn new(source: S, downloader: D, exemptions: ExemptionList) -> Self {
        Self {
            source,
            downloader,
            exemptions,
        }
    }

    /// Resolve every mod in order. One outcome per input identifier.
    pub async fn resolve_all(
        &self,
        version: &str,
        mods: &[String],
    ) -> Result<Vec<ModOutcome>, UpdateError> {
        let mut outcomes = Vec::with_capacity(mods.len());
        for mod_id in mods {
            info!("resolving mod {mod_id}");
            let resolved = self.resolve_mod(version, mod_id).await?;
            match &resolved {
                Some(file) => info!("{mod_id}: picked {}", file.filename),
                None => warn!("{mod_id}: no release compatible with {version}"),
            }
            outcomes.push(ModOutcome {
                mod_id: mod_id.clone(),
                resolved,
            });
        }
        Ok(outcomes)
    }

    /// Resolve one mod, falling back from the structured source to the
    /// release page when the former has nothing usable. Transport-level
    /// failures are not a fallback trigger; they end the run.
    async fn resolve_mod(
        &self,
        version: &str,
        mod_id: &str,
    ) -> Result<Option<ResolvedFile>, UpdateError> {
        if page_only(mod_id) {
            let catalog = self.source.page_catalog(mod_id).await?;
            return Ok(resolve_ranged(version, &catalog)?.map(ResolvedFile::from));
        }

        match self.source.api_catalog(mod_id).await {
            Ok(catalog) => {
                if let Some(release) = resolve_tagged(version, &catalog, &self.exemptions)? {
                    return Ok(Some(ResolvedFile::from(release)));
                }
                debug!("{mod_id}: structured catalog has no compatible release, trying release page");
            }
            Err(err @ SourceError::Network(_)) => return Err(err.into()),
            Err(err) => {
                info!("{mod_id}: structured source unavailable ({err}), trying release page");
            }
        }

        let catalog = self.source.page_catalog(mod_id).await?;
        Ok(resolve_ranged(version, &catalog)?.map(ResolvedFile::from))
    }

    /// Download every resolved release into `folder`, creating it if
    /// absent. Runs strictly after resolution; a failed download ends the
    /// run.
    pub async fn download_all(
        &self,
        outcomes: &[ModOutcome],
        folder: &Path,
    ) -> Result<(), UpdateError> {
        tokio::fs::create_dir_all(folder).await?;

        for outcome in outcomes {
            let Some(file) = &outcome.resolved else {
                continue;
            };
            self.downloader.download(file, folder).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::catalog::{ModCatalog, RangeRelease, TagRelease};
    use crate::download::MockFileDownloader;
    use crate::source::MockCatalogSource;

    fn tag_catalog(name: &str, tags: &[&str]) -> ModCatalog<TagRelease> {
        ModCatalog {
            name: name.to_string(),
            mod_id: "2222".to_string(),
            releases: vec![TagRelease {
                filename: "api_release.zip".to_string(),
                url: "https://mods.example.test/files/api_release.zip".to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            }],
        }
    }

    fn range_catalog(low: &str) -> ModCatalog<RangeRelease> {
        ModCatalog {
            name: "Example Mod".to_string(),
            mod_id: "2222".to_string(),
            releases: vec![RangeRelease {
                filename: "page_release.zip".to_string(),
                url: "https://mods.example.test/download/page_release.zip".to_string(),
                low: low.to_string(),
                high: None,
            }],
        }
    }

    #[tokio::test]
    async fn show_identifiers_never_touch_the_structured_source() {
        let mut source = MockCatalogSource::new();
        source.expect_api_catalog().never();
        source
            .expect_page_catalog()
            .withf(|id| id == "show456")
            .times(1)
            .returning(|_| Ok(range_catalog("1.19.0")));

        let updater = Updater::new(source, MockFileDownloader::new(), ExemptionList::default());
        let outcomes = updater
            .resolve_all("1.19.8", &["show456".to_string()])
            .await
            .unwrap();

        assert_eq!(
            outcomes[0].resolved.as_ref().map(|f| f.filename.as_str()),
            Some("page_release.zip")
        );
    }

    #[tokio::test]
    async fn structured_source_is_preferred_when_it_has_a_match() {
        let mut source = MockCatalogSource::new();
        source
            .expect_api_catalog()
            .withf(|id| id == "2222")
            .times(1)
            .returning(|_| Ok(tag_catalog("Example Mod", &["1.19.8"])));
        source.expect_page_catalog().never();

        let updater = Updater::new(source, MockFileDownloader::new(), ExemptionList::default());
        let outcomes = updater
            .resolve_all("1.19.8", &["2222".to_string()])
            .await
            .unwrap();

        assert_eq!(
            outcomes[0].resolved.as_ref().map(|f| f.filename.as_str()),
            Some("api_release.zip")
        );
    }

    #[tokio::test]
    async fn empty_structured_resolution_falls_back_to_the_release_page() {
        let mut source = MockCatalogSource::new();
        source
            .expect_api_catalog()
            .times(1)
            .returning(|_| Ok(tag_catalog("Example Mod", &["1.12.0"])));
        source
            .expect_page_catalog()
            .times(1)
            .returning(|_| Ok(range_catalog("1.19.0")));

        let updater = Updater::new(source, MockFileDownloader::new(), ExemptionList::default());
        let outcomes = updater
            .resolve_all("1.19.8", &["2222".to_string()])
            .await
            .unwrap();

        assert_eq!(
            outcomes[0].resolved.as_ref().map(|f| f.filename.as_str()),
            Some("page_release.zip")
        );
    }

    #[tokio::test]
    async fn unavailable_structured_source_falls_back_to_the_release_page() {
        let mut source = MockCatalogSource::new();
        source
            .expect_api_catalog()
            .times(1)
            .returning(|_| Err(SourceError::Status("404".to_string())));
        source
            .expect_page_catalog()
            .times(1)
            .returning(|_| Ok(range_catalog("1.19.0")));

        let updater = Updater::new(source, MockFileDownloader::new(), ExemptionList::default());
        let outcomes = updater
            .resolve_all("1.19.8", &["2222".to_string()])
            .await
            .unwrap();

        assert!(outcomes[0].resolved.is_some());
    }

    #[tokio::test]
    async fn mods_failing_both_sources_resolve_to_none_and_the_run_continues() {
        let mut source = MockCatalogSource::new();
        source
            .expect_api_catalog()
            .times(2)
            .returning(|_| Ok(tag_catalog("Example Mod", &["1.12.0"])));
        source
            .expect_page_catalog()
            .times(2)
            .returning(|_| Ok(range_catalog("1.12.0")));

        let updater = Updater::new(source, MockFileDownloader::new(), ExemptionList::default());
        let outcomes = updater
            .resolve_all("1.19.8", &["2222".to_string(), "3333".to_string()])
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].mod_id, "2222");
        assert_eq!(outcomes[1].mod_id, "3333");
        assert!(outcomes.iter().all(|o| o.resolved.is_none()));
    }

    #[tokio::test]
    async fn exemptions_reach_the_tagged_resolver() {
        let mut source = MockCatalogSource::new();
        source
            .expect_api_catalog()
            .times(1)
            .returning(|_| Ok(tag_catalog("Known Cross-Version Mod", &["1.12.0"])));
        source.expect_page_catalog().never();

        let updater = Updater::new(
            source,
            MockFileDownloader::new(),
            ExemptionList::new(["Known Cross-Version Mod"]),
        );
        let outcomes = updater
            .resolve_all("1.19.8", &["2222".to_string()])
            .await
            .unwrap();

        assert!(outcomes[0].resolved.is_some());
    }

    #[tokio::test]
    async fn download_all_fetches_only_resolved_outcomes() {
        let outcomes = vec![
            ModOutcome {
                mod_id: "2222".to_string(),
                resolved: Some(ResolvedFile {
                    filename: "api_release.zip".to_string(),
                    url: "https://mods.example.test/files/api_release.zip".to_string(),
                }),
            },
            ModOutcome {
                mod_id: "3333".to_string(),
                resolved: None,
            },
        ];

        let mut downloader = MockFileDownloader::new();
        downloader
            .expect_download()
            .withf(|file, _| file.filename == "api_release.zip")
            .times(1)
            .returning(|_, _| Ok(()));

        let dir = tempfile::TempDir::new().unwrap();
        let folder: PathBuf = dir.path().join("mods");
        let updater = Updater::new(MockCatalogSource::new(), downloader, ExemptionList::default());

        updater.download_all(&outcomes, &folder).await.unwrap();

        assert!(folder.is_dir()); // created if absent
    }
}
