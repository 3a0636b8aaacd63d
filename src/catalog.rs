//! Catalog record model
//!
//! Two release shapes exist, one per metadata source: the structured API
//! tags each release with an explicit list of compatible game versions,
//! while the release page declares a low/high compatibility range. A
//! catalog is homogeneous in one shape and keeps the source's publication
//! order (typically newest-first), which the resolvers rely on.

/// A release advertising explicit compatible-version tags.
///
/// The last tag is the canonical reference version for numeric comparison;
/// the full list is used for exact-membership matching. The tag list is
/// expected to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRelease {
    pub filename: String,
    pub url: String,
    pub tags: Vec<String>,
}

/// A release advertising a low/high compatible-version range.
///
/// `high` is absent for single-point releases. An inverted range is not
/// rejected at construction; it simply never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRelease {
    pub filename: String,
    pub url: String,
    pub low: String,
    pub high: Option<String>,
}

/// Known releases for one mod, from one source, in publication order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModCatalog<R> {
    /// Display name of the mod as the source presents it.
    pub name: String,
    pub mod_id: String,
    pub releases: Vec<R>,
}

/// The shape-independent unit handed to the download pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub filename: String,
    pub url: String,
}

impl From<&TagRelease> for ResolvedFile {
    fn from(release: &TagRelease) -> Self {
        Self {
            filename: release.filename.clone(),
            url: release.url.clone(),
        }
    }
}

impl From<&RangeRelease> for ResolvedFile {
    fn from(release: &RangeRelease) -> Self {
        Self {
            filename: release.filename.clone(),
            url: release.url.clone(),
        }
    }
}
