//! First-pass safe refactor of a project's HTML pages.
//!
//! Every page is rewritten in place: inline `<script>`/`<style>` blocks are
//! moved into `js/pages.js` and `css/inline_styles.css`, a header
//! placeholder comment is put at the top of `<body>`, and the standard
//! `app.js`/`auth.js` includes are appended when missing. The original is
//! copied to `<file>.bak` first; an existing backup is never replaced.
//!
//! The rewrite is not transactional. If a run dies half way, pages already
//! processed keep their new content and their `.bak`.

use crate::errors::AuditResult;
use crate::markup::{script_src, selector};
use crate::models::{RefactorEdit, RefactorReport};
use crate::scanner::FileScanner;
use crate::ui::PassProgress;
use crate::utils::{append_file, display_relative, ensure_dir, read_lossy, safe_backup, write_file};
use scraper::node::{Comment, Element};
use scraper::{Html, Node, Selector};
use std::path::{Path, PathBuf};

/// Placeholder the UI script replaces with the shared header.
pub const HEADER_MARKER: &str = "<!-- HEADER_INJECTED_BY_UI_JS -->";
const HEADER_MARKER_TEXT: &str = " HEADER_INJECTED_BY_UI_JS ";

/// Includes every page must carry: (src to insert, substring that counts as present).
pub const STANDARD_INCLUDES: &[(&str, &str)] = &[
    ("/js/app.js", "js/app.js"),
    ("/js/auth.js", "js/auth.js"),
];

const HEADER_TEMPLATE: &str = r#"<!-- Reusable header (cursor-inserted) -->
<header class='card header'>
  <div><a href='/index.html' style='text-decoration:none;color:inherit'><h2>Smart Library</h2></a><div class='meta'>Static demo</div></div>
  <nav class='nav'>
    <a class='btn' href='/index.html'>Home</a>
    <a class='btn' href='/books.html'>Books</a>
    <a class='btn' href='/about.html'>About</a>
    <a class='btn' href='/login.html'>Login</a>
  </nav>
</header>
"#;

/// Result of rewriting one document in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRewrite {
    /// Serialized document after the rewrite.
    pub html: String,
    /// Trimmed, non-empty bodies of the removed inline scripts.
    pub scripts: Vec<String>,
    /// Trimmed, non-empty bodies of the removed style blocks.
    pub styles: Vec<String>,
    pub inserted_includes: Vec<String>,
    pub marker_inserted: bool,
}

pub struct SafeRefactorer {
    root: PathBuf,
    scanner: FileScanner,
    scripts: Selector,
    styles: Selector,
    body: Selector,
    quiet: bool,
}

impl SafeRefactorer {
    pub fn new(root: impl Into<PathBuf>) -> AuditResult<Self> {
        Ok(Self {
            root: root.into(),
            scanner: FileScanner::new(),
            scripts: selector("script")?,
            styles: selector("style")?,
            body: selector("body")?,
            quiet: true,
        })
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn pages_js_path(&self) -> PathBuf {
        self.root.join("js").join("pages.js")
    }

    pub fn styles_path(&self) -> PathBuf {
        self.root.join("css").join("inline_styles.css")
    }

    pub fn header_template_path(&self) -> PathBuf {
        self.root.join("templates").join("header.html")
    }

    /// Rewrite every HTML page under the root and flush the shared files.
    pub fn run(&self) -> AuditResult<RefactorReport> {
        log::info!("Starting safe refactor of: {:?}", self.root);

        let pages_js = self.pages_js_path();
        let styles_file = self.styles_path();
        let header_template = self.header_template_path();

        let html_files = self.scanner.collect(&self.root, "html")?;

        for shared in [&pages_js, &styles_file] {
            if let Some(parent) = shared.parent() {
                ensure_dir(parent)?;
            }
        }

        let progress = PassProgress::new("REFACTOR", html_files.len() as u64, self.quiet)?;

        let mut script_chunks = Vec::new();
        let mut style_chunks = Vec::new();
        let mut edits = Vec::with_capacity(html_files.len());

        for path in &html_files {
            progress.file_started(path);

            let text = read_lossy(path)?;
            let rewrite = self.rewrite(&text);
            let label = display_relative(path, &self.root);

            script_chunks.extend(
                rewrite
                    .scripts
                    .iter()
                    .map(|code| format!("// From {}\n{}\n\n", label, code)),
            );
            style_chunks.extend(
                rewrite
                    .styles
                    .iter()
                    .map(|code| format!("/* From {} */\n{}\n\n", label, code)),
            );

            let (bak, created) = safe_backup(path)?;
            if created {
                log::debug!("Backed up {:?} to {:?}", path, bak);
            }
            write_file(path, &rewrite.html)?;

            log::debug!(
                "{}: extracted {} scripts, {} styles, inserted {:?}",
                label,
                rewrite.scripts.len(),
                rewrite.styles.len(),
                rewrite.inserted_includes
            );

            edits.push(RefactorEdit {
                file: path.display().to_string(),
                extracted_scripts: rewrite.scripts.len(),
                inserted_includes: rewrite.inserted_includes,
            });
            progress.file_completed();
        }
        progress.finish();

        if !script_chunks.is_empty() {
            append_file(&pages_js, &script_chunks.join("\n"))?;
            log::info!("Appended {} script blocks to {:?}", script_chunks.len(), pages_js);
        }
        if !style_chunks.is_empty() {
            append_file(&styles_file, &style_chunks.join("\n"))?;
            log::info!("Appended {} style blocks to {:?}", style_chunks.len(), styles_file);
        }

        self.ensure_header_template(&header_template)?;

        Ok(RefactorReport {
            edits,
            pages_js: pages_js.display().to_string(),
            styles_file: styles_file.display().to_string(),
            header_template: header_template.display().to_string(),
        })
    }

    fn ensure_header_template(&self, path: &Path) -> AuditResult<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        if path.exists() {
            log::debug!("Header template already present: {:?}", path);
            return Ok(());
        }
        write_file(path, HEADER_TEMPLATE)?;
        log::info!("Created header template: {:?}", path);
        Ok(())
    }

    /// Rewrite a single document without touching the filesystem.
    pub fn rewrite(&self, html_text: &str) -> DocumentRewrite {
        let mut document = Html::parse_document(html_text);
        let mut scripts = Vec::new();
        let mut styles = Vec::new();
        let mut removed = Vec::new();

        for script in document.select(&self.scripts) {
            if script_src(&script).is_some() {
                continue;
            }
            let code: String = script.text().collect();
            let code = code.trim();
            if !code.is_empty() {
                scripts.push(code.to_string());
            }
            removed.push(script.id());
        }

        for style in document.select(&self.styles) {
            let css: String = style.text().collect();
            let css = css.trim();
            if !css.is_empty() {
                styles.push(css.to_string());
            }
            removed.push(style.id());
        }

        for id in removed {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        let body_id = document.select(&self.body).next().map(|body| body.id());

        let mut marker_inserted = false;
        if let Some(body_id) = body_id {
            if !html_text.contains(HEADER_MARKER) {
                if let Some(mut body) = document.tree.get_mut(body_id) {
                    body.prepend(Node::Comment(Comment {
                        comment: HEADER_MARKER_TEXT.into(),
                    }));
                    marker_inserted = true;
                }
            }
        }

        let present: Vec<String> = document
            .root_element()
            .select(&self.scripts)
            .filter_map(|script| script_src(&script).map(str::to_string))
            .collect();

        let mut inserted_includes = Vec::new();
        match body_id {
            Some(body_id) => {
                for (src, needle) in STANDARD_INCLUDES {
                    if present.iter().any(|existing| existing.contains(needle)) {
                        continue;
                    }
                    let Some(element) = self.script_element(src) else {
                        log::warn!("Could not build <script src=\"{}\">", src);
                        continue;
                    };
                    if let Some(mut body) = document.tree.get_mut(body_id) {
                        body.append(Node::Element(element));
                        inserted_includes.push(src.to_string());
                    }
                }
            }
            None => log::debug!("Document has no <body>; skipping marker and includes"),
        }

        DocumentRewrite {
            html: document.html(),
            scripts,
            styles,
            inserted_includes,
            marker_inserted,
        }
    }

    /// A detached `<script src=...>` element ready to be grafted into a page.
    fn script_element(&self, src: &str) -> Option<Element> {
        let fragment = Html::parse_fragment(&format!(r#"<script src="{}"></script>"#, src));
        let mut scripts = fragment.select(&self.scripts);
        scripts.next().map(|script| script.value().clone())
    }
}
