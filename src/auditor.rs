//! Project audit.
//!
//! Runs the file scanner over a project root and feeds every HTML file
//! through markup analysis, link checking and the credential heuristic,
//! and every JS file through the storage key scanner. Files are handled
//! one at a time in sorted order; the first read error ends the run.

use crate::credentials::CredentialHeuristic;
use crate::errors::AuditResult;
use crate::links::LinkChecker;
use crate::markup::MarkupAnalyzer;
use crate::models::{AuditReport, FileFinding, Summary};
use crate::scanner::FileScanner;
use crate::storage::StorageKeyScanner;
use crate::ui::PassProgress;
use crate::utils::read_lossy;
use std::path::Path;

pub struct ProjectAuditor {
    scanner: FileScanner,
    markup: MarkupAnalyzer,
    links: LinkChecker,
    credentials: CredentialHeuristic,
    storage: StorageKeyScanner,
    quiet: bool,
}

impl ProjectAuditor {
    pub fn new() -> AuditResult<Self> {
        Ok(Self {
            scanner: FileScanner::new(),
            markup: MarkupAnalyzer::new()?,
            links: LinkChecker::new()?,
            credentials: CredentialHeuristic::new(),
            storage: StorageKeyScanner::new()?,
            quiet: true,
        })
    }

    /// Show a progress bar while auditing unless `quiet`.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn audit(&self, root: &Path) -> AuditResult<AuditReport> {
        log::info!("Starting audit of: {:?}", root);

        let html_files = self.scanner.collect(root, "html")?;
        let js_files = self.scanner.collect(root, "js")?;
        let css_files = self.scanner.collect(root, "css")?;

        log::info!(
            "Discovered {} HTML, {} JS, {} CSS files",
            html_files.len(),
            js_files.len(),
            css_files.len()
        );

        let mut report = AuditReport {
            summary: Summary {
                html_count: html_files.len(),
                js_count: js_files.len(),
                css_count: css_files.len(),
            },
            ..Default::default()
        };

        let progress = PassProgress::new(
            "AUDIT",
            (html_files.len() + js_files.len()) as u64,
            self.quiet,
        )?;

        for path in &html_files {
            progress.file_started(path);
            let finding = self.audit_html(path)?;
            report.files.insert(path.display().to_string(), finding);
            progress.file_completed();
        }

        for path in &js_files {
            progress.file_started(path);
            let text = read_lossy(path)?;
            let keys = self.storage.scan(&text);
            log::debug!("{:?}: {} localStorage keys", path, keys.len());
            report.local_storage_keys.insert(path.display().to_string(), keys);
            progress.file_completed();
        }

        progress.finish();
        log::info!(
            "Audit complete: {} files with broken links, {} credential flags",
            report.files_with_broken_links(),
            report.credential_flags()
        );
        Ok(report)
    }

    /// Analyse one HTML file.
    pub fn audit_html(&self, path: &Path) -> AuditResult<FileFinding> {
        let text = read_lossy(path)?;
        let document = MarkupAnalyzer::parse(&text);
        let analysis = self.markup.analyze(&document);

        for handler in &analysis.inline_handlers {
            log::debug!(
                "{:?}: inline handler <{} {}=\"{}\">",
                path,
                handler.tag,
                handler.attr,
                handler.value
            );
        }

        let matched = self.credentials.matches(&text);
        if !matched.is_empty() {
            log::warn!("{:?}: hardcoded credentials found: {:?}", path, matched);
        }

        Ok(FileFinding {
            inline_scripts_count: analysis.inline_scripts.len(),
            external_scripts: analysis.external_scripts,
            inline_styles_count: analysis.inline_styles.len(),
            inline_handlers_count: analysis.inline_handlers.len(),
            broken_links: self.links.broken_links(&document, path),
            admin_hardcoded: !matched.is_empty(),
        })
    }
}
