use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditReport {
    /// Findings per HTML file, keyed by the file's path.
    pub files: BTreeMap<String, FileFinding>,
    pub summary: Summary,
    /// Literal storage keys per JS file.
    #[serde(rename = "localStorage_keys")]
    pub local_storage_keys: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub html_count: usize,
    pub js_count: usize,
    pub css_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileFinding {
    pub inline_scripts_count: usize,
    pub external_scripts: Vec<String>,
    pub inline_styles_count: usize,
    pub inline_handlers_count: usize,
    pub broken_links: Vec<String>,
    pub admin_hardcoded: bool,
}

/// An `on*` attribute found on an element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InlineHandler {
    pub tag: String,
    pub attr: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefactorEdit {
    pub file: String,
    pub extracted_scripts: usize,
    pub inserted_includes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefactorReport {
    pub edits: Vec<RefactorEdit>,
    pub pages_js: String,
    pub styles_file: String,
    pub header_template: String,
}

impl AuditReport {
    /// Files with at least one broken relative link.
    pub fn files_with_broken_links(&self) -> usize {
        self.files.values().filter(|f| !f.broken_links.is_empty()).count()
    }

    pub fn credential_flags(&self) -> usize {
        self.files.values().filter(|f| f.admin_hardcoded).count()
    }
}

impl RefactorReport {
    pub fn total_extracted(&self) -> usize {
        self.edits.iter().map(|e| e.extracted_scripts).sum()
    }

    pub fn total_inserted(&self) -> usize {
        self.edits.iter().map(|e| e.inserted_includes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_report_wire_names() {
        let mut report = AuditReport::default();
        report.files.insert("site/index.html".into(), FileFinding::default());
        report
            .local_storage_keys
            .insert("site/app.js".into(), BTreeSet::from(["token".to_string()]));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("localStorage_keys").is_some());
        assert_eq!(json["summary"]["html_count"], 0);
        assert_eq!(json["files"]["site/index.html"]["admin_hardcoded"], false);
        assert_eq!(json["localStorage_keys"]["site/app.js"][0], "token");
    }

    #[test]
    fn test_report_tallies() {
        let mut report = AuditReport::default();
        report.files.insert(
            "a.html".into(),
            FileFinding {
                broken_links: vec!["missing.html".into()],
                admin_hardcoded: true,
                ..Default::default()
            },
        );
        report.files.insert("b.html".into(), FileFinding::default());
        assert_eq!(report.files_with_broken_links(), 1);
        assert_eq!(report.credential_flags(), 1);
    }
}
