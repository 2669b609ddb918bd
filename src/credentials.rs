//! Hardcoded credential heuristic.
//!
//! A literal substring match against credentials known to ship in the
//! Smart Library pages. Structural detection is out of scope; misses are
//! expected.

/// Plaintext credentials known to be embedded in page scripts.
const KNOWN_CREDENTIALS: &[&str] = &["admin@1234", "admin' , 'admin@1234"];

pub struct CredentialHeuristic {
    needles: Vec<&'static str>,
}

impl CredentialHeuristic {
    pub fn new() -> Self {
        Self {
            needles: KNOWN_CREDENTIALS.to_vec(),
        }
    }

    /// Known credentials that appear verbatim in `text`.
    pub fn matches(&self, text: &str) -> Vec<&'static str> {
        self.needles
            .iter()
            .copied()
            .filter(|needle| text.contains(needle))
            .collect()
    }

    pub fn is_flagged(&self, text: &str) -> bool {
        self.needles.iter().any(|needle| text.contains(needle))
    }
}

impl Default for CredentialHeuristic {
    fn default() -> Self {
        Self::new()
    }
}
