//! The diagnostics channel.
//!
//! Validation failures and internal errors are reported here instead of
//! being propagated to the host. Every report is also mirrored as a
//! `tracing` event so log output and diagnostics never disagree.

use std::fmt;

use colored::Colorize;
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::{error, info, warn};

use crate::errors::ValidationError;

/// How serious a diagnostic is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// A (severity, declaration, message) triple.
///
/// ## Examples
///
/// ```
/// use rxgen_gen::diagnostics::{Diagnostic, Severity};
///
/// let diagnostic = Diagnostic::warning(Some("com.example.Param"), "alias reused");
/// assert_eq!(diagnostic.severity, Severity::Warning);
/// assert_eq!(diagnostic.to_string(), "warning: com.example.Param: alias reused");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Qualified name of the offending declaration, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        declaration: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            declaration: declaration.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn error(declaration: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, declaration, message)
    }

    pub fn warning(declaration: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, declaration, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, None, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&ValidationError> for Diagnostic {
    fn from(err: &ValidationError) -> Self {
        Self::error(Some(&err.declaration), err.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.declaration {
            Some(declaration) => write!(f, "{}: {}: {}", self.severity, declaration, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Receives diagnostics from the generator.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Emits the matching `tracing` event for a diagnostic.
pub(crate) fn trace_diagnostic(diagnostic: &Diagnostic) {
    let declaration = diagnostic.declaration.as_deref().unwrap_or("-");
    match diagnostic.severity {
        Severity::Error => error!(declaration, "{}", diagnostic.message),
        Severity::Warning => warn!(declaration, "{}", diagnostic.message),
        Severity::Note => info!(declaration, "{}", diagnostic.message),
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        trace_diagnostic(&diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

/// Prints diagnostics to stderr, colored or as JSON lines.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    json: bool,
    errors: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink printing one JSON object per diagnostic.
    pub fn json() -> Self {
        Self {
            json: true,
            errors: 0,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        trace_diagnostic(&diagnostic);
        if diagnostic.is_error() {
            self.errors += 1;
        }

        if self.json {
            match serde_json::to_string(&diagnostic) {
                Ok(line) => eprintln!("{line}"),
                Err(_) => eprintln!("{diagnostic}"),
            }
            return;
        }

        let label = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".cyan().bold(),
        };
        match &diagnostic.declaration {
            Some(declaration) => {
                eprintln!("{label}: {} {}", declaration.bold(), diagnostic.message)
            }
            None => eprintln!("{label}: {}", diagnostic.message),
        }
    }
}
