//! Release compatibility resolution
//!
//! Two resolvers, one per catalog shape: [`resolve_tagged`] for catalogs
//! declaring explicit per-release version tag lists (the structured API)
//! and [`resolve_ranged`] for catalogs declaring a low/high compatibility
//! range (the release page). Both scan in the catalog's publication order
//! and return the FIRST acceptable release, not the best among all matches;
//! "nothing acceptable" is a normal outcome, not an error. Releases bound
//! to pre-release or candidate versions are skipped with a logged continue.

mod ranged;
mod tagged;

pub use ranged::resolve_ranged;
pub use tagged::resolve_tagged;

use crate::version::GameVersion;

/// Mods resolved without version checks.
///
/// Some mods work across game versions even though their catalogs never tag
/// the requested one. A catalog whose display name is in this set falls
/// back to its first listed release when the normal scan finds nothing.
/// The set is injected from configuration; the embedded default is empty.
#[derive(Debug, Clone, Default)]
pub struct ExemptionList(Vec<String>);

impl ExemptionList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

/// Same release line, at or past the pinned patch.
///
/// A release pinned to `1.19.2` still serves a `1.19.5` request; requests
/// from another `major.minor` line never match.
pub(crate) fn patch_compatible(requested: GameVersion, pinned: GameVersion) -> bool {
    requested.major == pinned.major
        && requested.minor == pinned.minor
        && requested.patch >= pinned.patch
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn version(s: &str) -> GameVersion {
        GameVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("1.19.2", "1.19.2", true)]
    #[case("1.19.5", "1.19.2", true)]
    #[case("1.19.1", "1.19.2", false)]
    #[case("1.18.9", "1.19.2", false)]
    #[case("1.20.0", "1.19.2", false)]
    #[case("2.19.2", "1.19.2", false)]
    fn patch_compatible_pins_the_release_line(
        #[case] requested: &str,
        #[case] pinned: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(patch_compatible(version(requested), version(pinned)), expected);
    }

    #[test]
    fn exemption_list_matches_display_names_exactly() {
        let exemptions = ExemptionList::new(["Carry On"]);

        assert!(exemptions.contains("Carry On"));
        assert!(!exemptions.contains("carry on"));
        assert!(!exemptions.contains("Carry"));
    }

    #[test]
    fn default_exemption_list_is_empty() {
        assert!(!ExemptionList::default().contains("Carry On"));
    }
}
