use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "smartlib-audit",
    about = "Audit a static HTML/CSS/JS project and optionally run a first-pass safe refactor",
    version
)]
pub struct Args {
    /// Run the audit only on this project directory
    #[arg(long, value_name = "DIR", conflicts_with = "refactor")]
    pub audit: Option<PathBuf>,

    /// Run the audit, then the safe refactor, on this project directory
    #[arg(long, value_name = "DIR")]
    pub refactor: Option<PathBuf>,

    /// Output directory for generated reports
    #[arg(short, long, value_name = "DIR", default_value = "smartlib_audit_out")]
    pub out: PathBuf,

    /// Enable verbose logging of all operations
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide progress bars and only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Audit(PathBuf),
    Refactor(PathBuf),
}

impl Args {
    /// Resolve the selected mode, `None` when neither `--audit` nor `--refactor` was given.
    pub fn mode(&self) -> Option<Mode> {
        if let Some(root) = &self.audit {
            Some(Mode::Audit(root.clone()))
        } else {
            self.refactor.as_ref().map(|root| Mode::Refactor(root.clone()))
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Audit(root) => write!(f, "audit of {}", root.display()),
            Mode::Refactor(root) => write!(f, "refactor of {}", root.display()),
        }
    }
}
