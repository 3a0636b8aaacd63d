//! Release-page scraping
//!
//! When the structured endpoint has nothing usable, the mod's public page
//! still lists every release in a file table. `GET <base>/<modid>#tab-files`
//! and pull the rows out: each `<tr>` carrying a `data-assetid` attribute is
//! one release, its `.tag` cell holds the compatibility declaration
//! ("1.19.0" or "1.19.0 - 1.20.0"), and the `a.mod-dl` anchor carries the
//! filename and the relative download link, joined onto the base URL. Rows
//! without a download anchor are skipped.

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::catalog::{ModCatalog, RangeRelease};
use crate::source::{HttpCatalogSource, SourceError};

impl HttpCatalogSource {
    pub(super) async fn fetch_page_catalog(
        &self,
        mod_id: &str,
    ) -> Result<ModCatalog<RangeRelease>, SourceError> {
        let url = format!("{}/{}#tab-files", self.base_url, mod_id);
        debug!("checking for releases at {url}");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("release page returned status {status}: {url}");
            return Err(SourceError::Invalid(format!("release page status {status}")));
        }

        let body = response.text().await?;
        parse_release_page(&body, mod_id, &self.base_url)
    }
}

/// Extract a mod's catalog from its release-page markup.
///
/// The display name is the second `<span>` of the first `<h2>`.
fn parse_release_page(
    html: &str,
    mod_id: &str,
    base_url: &str,
) -> Result<ModCatalog<RangeRelease>, SourceError> {
    let heading = Selector::parse("h2").expect("valid selector");
    let span = Selector::parse("span").expect("valid selector");
    let release_row =
        Selector::parse("table.stdtable.release-table.gv tr[data-assetid]").expect("valid selector");
    let tag_cell = Selector::parse(".tag").expect("valid selector");
    let download_anchor = Selector::parse("a.mod-dl").expect("valid selector");

    let document = Html::parse_document(html);

    let name = document
        .select(&heading)
        .next()
        .and_then(|h2| h2.select(&span).nth(1))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| SourceError::Invalid("release page has no mod name heading".to_string()))?;

    let mut releases = Vec::new();
    for row in document.select(&release_row) {
        let Some(anchor) = row.select(&download_anchor).next() else {
            // No download anchor means nothing to fetch from this row.
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(tags) = row.select(&tag_cell).next() else {
            continue;
        };

        let compatible_versions = tags.text().collect::<String>().trim().to_string();
        let filename = anchor.text().collect::<String>().trim().to_string();
        debug!("{filename}: compatible with {compatible_versions}");

        let (low, high) = match compatible_versions.split_once(" - ") {
            Some((low, high)) => (low.to_string(), Some(high.to_string())),
            None => (compatible_versions, None),
        };

        releases.push(RangeRelease {
            filename,
            url: format!("{base_url}{href}"),
            low,
            high,
        });
    }

    Ok(ModCatalog {
        name,
        mod_id: mod_id.to_string(),
        releases,
    })
}
