//! Diagnostic values and their rendering.

use std::fmt;
use std::path::Path;

use chpp_ir::SourceLoc;

/// Which part of the pipeline produced the diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagKind {
    Lexical,
    Syntax,
    Semantic,
    CodeGen,
    Io,
    Internal,
}

impl fmt::Display for DiagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagKind::Lexical => "Lexical",
            DiagKind::Syntax => "Syntax",
            DiagKind::Semantic => "Semantic",
            DiagKind::CodeGen => "CodeGen",
            DiagKind::Io => "IO",
            DiagKind::Internal => "Internal",
        };
        f.write_str(name)
    }
}

/// Severity level. Ordering matters: `Fatal` terminates the process.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        };
        f.write_str(name)
    }
}

/// A single located report with an optional remediation suggestion.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported, not silently dropped"]
pub struct Diagnostic {
    pub kind: DiagKind,
    pub severity: Severity,
    /// Source file the diagnostic points into (may be empty for
    /// file-independent reports such as CLI problems).
    pub file: String,
    pub loc: SourceLoc,
    pub message: String,
    pub suggestion: Option<String>,
    /// The reporting call site (`file!()`, `line!()`); debug builds only.
    pub origin: Option<(&'static str, u32)>,
}

impl Diagnostic {
    fn new(kind: DiagKind, severity: Severity) -> Self {
        Diagnostic {
            kind,
            severity,
            file: String::new(),
            loc: SourceLoc::START,
            message: String::new(),
            suggestion: None,
            origin: None,
        }
    }

    /// Create a warning.
    pub fn warning(kind: DiagKind) -> Self {
        Self::new(kind, Severity::Warning)
    }

    /// Create an error.
    pub fn error(kind: DiagKind) -> Self {
        Self::new(kind, Severity::Error)
    }

    /// Create a fatal error. Reporting one terminates the process.
    pub fn fatal(kind: DiagKind) -> Self {
        Self::new(kind, Severity::Fatal)
    }

    /// Set the source file and location.
    pub fn at(mut self, file: impl Into<String>, loc: SourceLoc) -> Self {
        self.file = file.into();
        self.loc = loc;
        self
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a remediation suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Stamp the reporter's call site. Prefer the [`report!`] macro.
    ///
    /// [`report!`]: crate::report
    pub fn reported_from(mut self, file: &'static str, line: u32) -> Self {
        self.origin = Some((file, line));
        self
    }

    /// True for `Error` and `Fatal`.
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Render a diagnostic to its user-visible form.
///
/// Shape: `<Severity> [<Kind>] in <basename>:<line>:<column>: <message>`,
/// a `suggestion:` line when present, and — in debug builds — the
/// reporter's `file:line`.
pub fn render(diag: &Diagnostic, colored: bool) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let severity_color = match diag.severity {
        Severity::Warning => colors::WARNING,
        Severity::Error | Severity::Fatal => colors::ERROR,
    };
    if colored {
        let _ = write!(out, "{severity_color}{}{}", diag.severity, colors::RESET);
        let _ = write!(out, " {}[{}]{}", colors::BOLD, diag.kind, colors::RESET);
    } else {
        let _ = write!(out, "{} [{}]", diag.severity, diag.kind);
    }
    if !diag.file.is_empty() {
        let basename = Path::new(&diag.file)
            .file_name()
            .map_or_else(|| diag.file.clone(), |n| n.to_string_lossy().into_owned());
        let _ = write!(out, " in {basename}:{}", diag.loc);
    }
    let _ = write!(out, ": {}", diag.message);
    if let Some(suggestion) = &diag.suggestion {
        let _ = write!(out, "\n  suggestion: {suggestion}");
    }
    if cfg!(debug_assertions) {
        if let Some((file, line)) = diag.origin {
            let _ = write!(out, "\n  reported at {file}:{line}");
        }
    }
    out
}
