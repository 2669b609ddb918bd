//! Smart Library audit
//!
//! Static analysis and first-pass refactoring for directory trees of
//! HTML, CSS and JavaScript files: inline code, inline event handlers,
//! broken relative links, hardcoded credentials and localStorage keys.

pub mod auditor;
pub mod cli;
pub mod credentials;
pub mod errors;
pub mod links;
pub mod markup;
pub mod models;
pub mod refactor;
pub mod reporter;
pub mod scanner;
pub mod storage;
pub mod ui;
pub mod utils;

pub use auditor::ProjectAuditor;
pub use errors::{AuditError, AuditResult};
pub use refactor::SafeRefactorer;
pub use reporter::ReportWriter;
