//! Resolver for low/high range catalogs (the release-page shape)

use tracing::debug;

use crate::catalog::{ModCatalog, RangeRelease};
use crate::resolve::patch_compatible;
use crate::version::{GameVersion, VersionError, is_pre_or_candidate};

/// Select the first release whose declared range covers `requested`.
///
/// Releases are scanned in the catalog's publication order. A release whose
/// low bound, or high bound when present, names a pre-release or candidate
/// build is skipped. Without a high bound the release is a single-point
/// declaration: it matches its own `major.minor` line at or past the pinned
/// patch. With a high bound, major and minor must each sit inside the
/// declared interval componentwise and the patch must be at or above the
/// low bound's; the patch UPPER bound is not part of the containment check,
/// so any patch at or above the low bound matches once major and minor are
/// in range. An inverted range never matches anything.
///
/// Malformed bounds on a non-skipped release are a fatal [`VersionError`],
/// as is a malformed `requested` string.
pub fn resolve_ranged<'a>(
    requested: &str,
    catalog: &'a ModCatalog<RangeRelease>,
) -> Result<Option<&'a RangeRelease>, VersionError> {
    let requested_version = GameVersion::parse(requested)?;

    for release in &catalog.releases {
        if is_pre_or_candidate(&release.low)
            || release.high.as_deref().is_some_and(is_pre_or_candidate)
        {
            debug!(
                "{}: bound names a pre-release or candidate, skipping",
                release.filename
            );
            continue;
        }

        let low = GameVersion::parse(&release.low)?;

        let compatible = match release.high.as_deref() {
            None => patch_compatible(requested_version, low),
            Some(high_raw) => {
                let high = GameVersion::parse(high_raw)?;
                low.major <= requested_version.major
                    && requested_version.major <= high.major
                    && low.minor <= requested_version.minor
                    && requested_version.minor <= high.minor
                    && requested_version.patch >= low.patch
            }
        };

        if compatible {
            debug!("{}: range covers {requested}", release.filename);
            return Ok(Some(release));
        }

        debug!("{}: range does not cover {requested}", release.filename);
    }

    Ok(None)
}
