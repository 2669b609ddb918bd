use crate::errors::{AuditError, AuditResult};
use crate::models::{AuditReport, RefactorReport};
use crate::utils::{ensure_dir, write_file};
use std::path::{Path, PathBuf};

pub const AUDIT_JSON: &str = "audit_report.json";
pub const AUDIT_SUMMARY: &str = "audit_summary.txt";
pub const REFACTOR_JSON: &str = "refactor_report.json";

/// Paths of the files written for one audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditArtifacts {
    pub json: PathBuf,
    pub summary: PathBuf,
}

pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write `audit_report.json` and `audit_summary.txt`.
    ///
    /// Both writes are attempted even if the first fails; the first error
    /// is returned.
    pub fn write_audit(&self, report: &AuditReport) -> AuditResult<AuditArtifacts> {
        ensure_dir(&self.out_dir)?;

        let json_path = self.out_dir.join(AUDIT_JSON);
        let summary_path = self.out_dir.join(AUDIT_SUMMARY);

        let json_result = serde_json::to_string_pretty(report)
            .map_err(AuditError::from)
            .and_then(|json| write_file(&json_path, &json));
        if let Err(e) = &json_result {
            log::error!("Failed to write {:?}: {}", json_path, e);
        }

        let summary_result = write_file(&summary_path, &Self::render_summary(report));
        if let Err(e) = &summary_result {
            log::error!("Failed to write {:?}: {}", summary_path, e);
        }

        json_result?;
        summary_result?;

        log::info!("Wrote audit to {:?}", self.out_dir);
        Ok(AuditArtifacts {
            json: json_path,
            summary: summary_path,
        })
    }

    pub fn write_refactor(&self, report: &RefactorReport) -> AuditResult<PathBuf> {
        let path = self.out_dir.join(REFACTOR_JSON);
        write_file(&path, &serde_json::to_string_pretty(report)?)?;
        log::info!("Refactor report written to {:?}", path);
        Ok(path)
    }

    pub fn render_summary(report: &AuditReport) -> String {
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::render_summary_at(report, &generated)
    }

    /// Plain-text rendering of `report` stamped with `generated`.
    pub fn render_summary_at(report: &AuditReport, generated: &str) -> String {
        let mut lines = vec![
            "SMART LIBRARY AUDIT REPORT".to_string(),
            format!("Generated: {}", generated),
            "SUMMARY:".to_string(),
            format!("  HTML files scanned: {}", report.summary.html_count),
            format!("  JS files scanned: {}", report.summary.js_count),
            format!("  CSS files scanned: {}", report.summary.css_count),
            String::new(),
        ];

        for (file, info) in &report.files {
            lines.push(format!("FILE: {}", file));
            lines.push(format!("  Inline <script> blocks: {}", info.inline_scripts_count));
            lines.push(format!("  Inline <style> blocks: {}", info.inline_styles_count));
            lines.push(format!("  Inline event handlers: {}", info.inline_handlers_count));
            if !info.external_scripts.is_empty() {
                lines.push(format!("  External scripts: {}", info.external_scripts.join(", ")));
            }
            if !info.broken_links.is_empty() {
                lines.push(format!("  Broken links: {:?}", info.broken_links));
            }
            if info.admin_hardcoded {
                lines.push("  WARNING: admin credentials appear hardcoded in this file".to_string());
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileFinding, RefactorEdit, Summary};
    use std::fs;
    use tempfile::TempDir;

    fn sample_report() -> AuditReport {
        let mut report = AuditReport {
            summary: Summary { html_count: 2, js_count: 1, css_count: 0 },
            ..Default::default()
        };
        report.files.insert(
            "site/index.html".into(),
            FileFinding {
                inline_scripts_count: 1,
                external_scripts: vec!["/js/app.js".into()],
                broken_links: vec!["missing.html".into()],
                admin_hardcoded: true,
                ..Default::default()
            },
        );
        report.files.insert("site/about.html".into(), FileFinding::default());
        report
    }

    #[test]
    fn test_summary_text() {
        let text = ReportWriter::render_summary_at(&sample_report(), "2024-01-01 00:00:00");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "SMART LIBRARY AUDIT REPORT");
        assert_eq!(lines[1], "Generated: 2024-01-01 00:00:00");
        assert!(text.contains("  HTML files scanned: 2"));
        assert!(text.contains("FILE: site/index.html\n  Inline <script> blocks: 1"));
        assert!(text.contains("  External scripts: /js/app.js"));
        assert!(text.contains(r#"  Broken links: ["missing.html"]"#));
        assert_eq!(text.matches("WARNING: admin credentials").count(), 1);
        // files are listed in path order
        assert!(text.find("site/about.html").unwrap() < text.find("site/index.html").unwrap());
    }

    #[test]
    fn test_write_audit_creates_out_dir() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = TempDir::new()?;
        let writer = ReportWriter::new(dir.path().join("reports"));
        let artifacts = writer.write_audit(&sample_report())?;

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&artifacts.json)?)?;
        assert_eq!(json["summary"]["html_count"], 2);
        assert_eq!(json["files"]["site/index.html"]["broken_links"][0], "missing.html");
        assert!(fs::read_to_string(&artifacts.summary)?.starts_with("SMART LIBRARY AUDIT REPORT"));
        Ok(())
    }

    #[test]
    fn test_unwritable_out_dir_is_fatal() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = TempDir::new()?;
        let blocker = dir.path().join("reports");
        fs::write(&blocker, "not a directory")?;
        assert!(ReportWriter::new(&blocker).write_audit(&sample_report()).is_err());
        Ok(())
    }

    #[test]
    fn test_summary_written_when_json_write_fails() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join(AUDIT_JSON))?;

        let result = ReportWriter::new(dir.path()).write_audit(&sample_report());

        assert!(result.is_err());
        let summary = fs::read_to_string(dir.path().join(AUDIT_SUMMARY))?;
        assert!(summary.starts_with("SMART LIBRARY AUDIT REPORT"));
        Ok(())
    }

    #[test]
    fn test_write_refactor() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = TempDir::new()?;
        let report = RefactorReport {
            edits: vec![RefactorEdit {
                file: "site/index.html".into(),
                extracted_scripts: 1,
                inserted_includes: vec!["/js/app.js".into(), "/js/auth.js".into()],
            }],
            pages_js: "site/js/pages.js".into(),
            styles_file: "site/css/inline_styles.css".into(),
            header_template: "site/templates/header.html".into(),
        };
        let path = ReportWriter::new(dir.path()).write_refactor(&report)?;
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        assert_eq!(json["edits"][0]["inserted_includes"][1], "/js/auth.js");
        assert_eq!(json["header_template"], "site/templates/header.html");
        Ok(())
    }
}
