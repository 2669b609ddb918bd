//! localStorage key extraction from JavaScript source.
//!
//! Only string-literal keys are seen; keys built from variables or
//! concatenation pass through undetected.

use crate::errors::{AuditError, AuditResult};
use regex::Regex;
use std::collections::BTreeSet;

const GET_ITEM_PATTERN: &str = r#"localStorage\.getItem\(\s*['"]([^'"]+)['"]\s*\)"#;
const SET_ITEM_PATTERN: &str = r#"localStorage\.setItem\(\s*['"]([^'"]+)['"]\s*,"#;

pub struct StorageKeyScanner {
    patterns: Vec<Regex>,
}

impl StorageKeyScanner {
    pub fn new() -> AuditResult<Self> {
        let patterns = [GET_ITEM_PATTERN, SET_ITEM_PATTERN]
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AuditError::regex(e, *p)))
            .collect::<AuditResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Distinct literal keys passed to `getItem`/`setItem`.
    pub fn scan(&self, js_text: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .flat_map(|re| re.captures_iter(js_text))
            .filter_map(|caps| caps.get(1))
            .map(|key| key.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(js: &str) -> Vec<String> {
        StorageKeyScanner::new().unwrap().scan(js).into_iter().collect()
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let js = r#"localStorage.setItem('token', x); localStorage.getItem("token")"#;
        assert_eq!(scan(js), vec!["token"]);
    }

    #[test]
    fn test_both_quote_styles_and_whitespace() {
        let js = r#"
            const user = JSON.parse(localStorage.getItem( 'currentUser' ));
            localStorage.setItem("books" , JSON.stringify(books));
            localStorage.setItem(  'transactions',[]);
        "#;
        assert_eq!(scan(js), vec!["books", "currentUser", "transactions"]);
    }

    #[test]
    fn test_non_literal_keys_are_ignored() {
        let js = r#"
            localStorage.getItem(KEY);
            localStorage.setItem(prefix + "x", 1);
            localStorage.getItem(`tpl`);
            sessionStorage.getItem("session");
        "#;
        assert!(scan(js).is_empty());
    }

    #[test]
    fn test_get_item_requires_closing_paren() {
        assert!(scan(r#"localStorage.getItem("a", fallback)"#).is_empty());
        assert_eq!(scan(r#"localStorage.setItem("a")"#), Vec::<String>::new());
    }
}
