//! Relative link verification against the filesystem.

use crate::errors::AuditResult;
use crate::markup::selector;
use crate::utils::normalize_path;
use scraper::{Html, Selector};
use std::path::Path;

/// Href prefixes that are never resolved on disk.
const SKIPPED_PREFIXES: &[&str] = &["http", "#", "mailto:", "tel:"];

pub struct LinkChecker {
    anchors: Selector,
}

impl LinkChecker {
    pub fn new() -> AuditResult<Self> {
        Ok(Self {
            anchors: selector("a[href]")?,
        })
    }

    /// Whether an href is left to the browser rather than checked on disk.
    pub fn is_external(href: &str) -> bool {
        SKIPPED_PREFIXES.iter().any(|prefix| href.starts_with(prefix))
    }

    /// Hrefs in `document` whose target, resolved against the directory of
    /// `html_path`, does not exist. Order follows the document.
    pub fn broken_links(&self, document: &Html, html_path: &Path) -> Vec<String> {
        let base = html_path.parent().unwrap_or_else(|| Path::new(""));

        document
            .select(&self.anchors)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::trim)
            .filter(|href| !Self::is_external(href))
            .filter(|href| {
                let target = normalize_path(&base.join(href));
                let missing = !target.exists();
                if missing {
                    log::debug!("Broken link in {:?}: {} -> {:?}", html_path, href, target);
                }
                missing
            })
            .map(str::to_string)
            .collect()
    }
}
