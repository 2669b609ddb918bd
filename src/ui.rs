use crate::errors::{AuditError, AuditResult};
use crate::models::{AuditReport, RefactorReport};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Per-file progress over one pass.
pub struct PassProgress {
    bar: ProgressBar,
}

impl PassProgress {
    pub fn new(label: &str, total_files: u64, quiet: bool) -> AuditResult<Self> {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total_files)
        };

        let bar_style = ProgressStyle::with_template(
            "{prefix} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
        )
        .map_err(|e| AuditError::Template(e.to_string()))?
        .progress_chars("█▉▊▋▌▍▎▏  ");

        bar.set_style(bar_style);
        bar.set_prefix(style(label.to_string()).green().bold().to_string());
        Ok(Self { bar })
    }

    pub fn file_started(&self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.bar.set_message(name);
    }

    pub fn file_completed(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

pub fn print_audit_summary(report: &AuditReport, out_dir: &Path) {
    let broken = report.files_with_broken_links();
    let flagged = report.credential_flags();

    println!("    {} {}", style("▶").green(), style("Audit completed").bold());
    println!(
        "    {} HTML: {}  JS: {}  CSS: {}",
        style("├─").dim(),
        style(report.summary.html_count).bold(),
        style(report.summary.js_count).bold(),
        style(report.summary.css_count).bold()
    );
    let broken_styled = if broken > 0 { style(broken).red() } else { style(broken).green() };
    println!("    {} Files with broken links: {}", style("├─").dim(), broken_styled);
    let flagged_styled = if flagged > 0 { style(flagged).red() } else { style(flagged).green() };
    println!("    {} Hardcoded credential flags: {}", style("├─").dim(), flagged_styled);
    println!("    {} Reports: {}", style("└─").dim(), out_dir.display());
}

pub fn print_refactor_summary(report: &RefactorReport) {
    println!("    {} {}", style("▶").green(), style("Refactor completed").bold());
    println!("    {} Files rewritten: {}", style("├─").dim(), style(report.edits.len()).bold());
    println!("    {} Scripts extracted: {}", style("├─").dim(), style(report.total_extracted()).bold());
    println!("    {} Includes inserted: {}", style("├─").dim(), style(report.total_inserted()).bold());
    println!("    {} Shared script: {}", style("├─").dim(), report.pages_js);
    println!("    {} Shared styles: {}", style("├─").dim(), report.styles_file);
    println!("    {} Header template: {}", style("└─").dim(), report.header_template);
}
