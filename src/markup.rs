//! Inline code detection for a single HTML document.
//!
//! Parsing goes through html5ever (via `scraper`), which recovers from
//! malformed markup the same way browsers do, so analysis never fails on
//! broken input.

use crate::errors::{AuditError, AuditResult};
use crate::models::InlineHandler;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const HANDLER_PATTERN: &str = r"(?i)^on\w+";

/// Parse a CSS selector, mapping failures into [`AuditError::Selector`].
pub(crate) fn selector(css: &str) -> AuditResult<Selector> {
    Selector::parse(css).map_err(|e| AuditError::selector(css, format!("{:?}", e)))
}

/// `src` value of a script element. Any `src` attribute, even an empty
/// one, makes the script external.
pub(crate) fn script_src<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element.value().attr("src")
}

/// Inline and external code found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupAnalysis {
    /// Bodies of `<script>` elements without `src`, in document order.
    pub inline_scripts: Vec<String>,
    /// `src` values of external scripts, in document order.
    pub external_scripts: Vec<String>,
    pub inline_styles: Vec<String>,
    pub inline_handlers: Vec<InlineHandler>,
}

pub struct MarkupAnalyzer {
    scripts: Selector,
    styles: Selector,
    elements: Selector,
    handler_attr: Regex,
}

impl MarkupAnalyzer {
    pub fn new() -> AuditResult<Self> {
        Ok(Self {
            scripts: selector("script")?,
            styles: selector("style")?,
            elements: selector("*")?,
            handler_attr: Regex::new(HANDLER_PATTERN)
                .map_err(|e| AuditError::regex(e, HANDLER_PATTERN))?,
        })
    }

    pub fn parse(html_text: &str) -> Html {
        Html::parse_document(html_text)
    }

    pub fn analyze_str(&self, html_text: &str) -> MarkupAnalysis {
        self.analyze(&Self::parse(html_text))
    }

    pub fn analyze(&self, document: &Html) -> MarkupAnalysis {
        let mut analysis = MarkupAnalysis::default();

        for script in document.select(&self.scripts) {
            if let Some(src) = script_src(&script) {
                analysis.external_scripts.push(src.to_string());
                continue;
            }
            let code: String = script.text().collect();
            if !code.trim().is_empty() {
                analysis.inline_scripts.push(code);
            }
        }

        analysis.inline_styles = document
            .select(&self.styles)
            .map(|style| style.text().collect::<String>())
            .filter(|css| !css.trim().is_empty())
            .collect();

        for element in document.select(&self.elements) {
            let tag = element.value().name();
            for (attr, value) in element.value().attrs() {
                if self.handler_attr.is_match(attr) {
                    analysis.inline_handlers.push(InlineHandler {
                        tag: tag.to_string(),
                        attr: attr.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> MarkupAnalyzer {
        MarkupAnalyzer::new().unwrap()
    }

    #[test]
    fn test_inline_and_external_scripts() {
        let html = r#"<html><head>
            <script src="/js/app.js"></script>
            <script>console.log("a");</script>
            <script>   </script>
            <script src="">var b = 1;</script>
        </head><body></body></html>"#;
        let analysis = analyzer().analyze_str(html);
        assert_eq!(analysis.external_scripts, vec!["/js/app.js", ""]);
        assert_eq!(analysis.inline_scripts, vec![r#"console.log("a");"#]);
    }

    #[test]
    fn test_inline_styles_skip_blank() {
        let html = "<style>body { color: red; }</style><style>\n\n</style><p>x</p>";
        let analysis = analyzer().analyze_str(html);
        assert_eq!(analysis.inline_styles, vec!["body { color: red; }"]);
    }

    #[test]
    fn test_inline_handlers() {
        let html = r#"<body onload="init()"><button ONCLICK="go()">Go</button><a href="x" one="1">x</a><div data-on="no"></div></body>"#;
        let analysis = analyzer().analyze_str(html);
        let handlers: Vec<(&str, &str, &str)> = analysis
            .inline_handlers
            .iter()
            .map(|h| (h.tag.as_str(), h.attr.as_str(), h.value.as_str()))
            .collect();
        assert_eq!(
            handlers,
            vec![("body", "onload", "init()"), ("button", "onclick", "go()"), ("a", "one", "1")]
        );
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let html = "<div><p>unclosed <script>alert(1)</script><span onclick='x()'";
        let analysis = analyzer().analyze_str(html);
        assert_eq!(analysis.inline_scripts, vec!["alert(1)"]);
    }

    #[test]
    fn test_empty_document() {
        let analysis = analyzer().analyze_str("");
        assert_eq!(analysis, MarkupAnalysis::default());
    }
}
