//! Resolver for tag-list catalogs (the structured API shape)

use tracing::debug;

use crate::catalog::{ModCatalog, TagRelease};
use crate::resolve::{ExemptionList, patch_compatible};
use crate::version::{GameVersion, VersionError, is_pre_or_candidate};

/// Select the first release compatible with `requested`.
///
/// Releases are scanned in the catalog's publication order. Each release's
/// reference version is the LAST tag in its list; a release whose reference
/// is a pre-release or candidate build is skipped outright, even when the
/// requested string appears elsewhere in its tags. The requested string
/// appearing literally anywhere in the tag list accepts a release without
/// any numeric comparison; otherwise the reference tag is parsed and the
/// release is accepted when it pins an equal or older patch of the same
/// `major.minor` line. When the whole scan comes up empty, catalogs whose
/// display name is in `exemptions` fall back to their first release.
///
/// A reference tag that passes the pre-release check but fails to parse is
/// a fatal [`VersionError`], as is a malformed `requested` string.
pub fn resolve_tagged<'a>(
    requested: &str,
    catalog: &'a ModCatalog<TagRelease>,
    exemptions: &ExemptionList,
) -> Result<Option<&'a TagRelease>, VersionError> {
    let requested_version = GameVersion::parse(requested)?;

    for release in &catalog.releases {
        let Some(reference) = release.tags.last() else {
            debug!("{}: no version tags, skipping", release.filename);
            continue;
        };

        if is_pre_or_candidate(reference) {
            debug!(
                "{}: reference tag {reference} is a pre-release or candidate, skipping",
                release.filename
            );
            continue;
        }

        if release.tags.iter().any(|tag| tag == requested) {
            debug!("{}: exact tag match for {requested}", release.filename);
            return Ok(Some(release));
        }

        if patch_compatible(requested_version, GameVersion::parse(reference)?) {
            debug!(
                "{}: {requested} is patch-compatible with reference tag {reference}",
                release.filename
            );
            return Ok(Some(release));
        }

        debug!("{}: not compatible with {requested}", release.filename);
    }

    if exemptions.contains(&catalog.name) {
        debug!(
            "{}: exempt from version matching, using first release",
            catalog.name
        );
        return Ok(catalog.releases.first());
    }

    Ok(None)
}
