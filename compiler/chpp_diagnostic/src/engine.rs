//! The diagnostic engine.
//!
//! A handle threaded through the pipeline (the front-end is
//! single-threaded, so a `&mut` chain suffices — no process-wide
//! singleton). Reports print immediately; entries are retained up to
//! [`MAX_RETAINED`] for the verbose summary, with per-severity tallies
//! counting every report so exit codes stay truthful past the cap.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{render, DiagKind, Diagnostic, Severity};

/// Number of diagnostics retained for summary replay. Further reports
/// are tallied and printed but not retained; one notice marks the cap.
pub const MAX_RETAINED: usize = 500;

/// Collects, prints, and tallies diagnostics.
pub struct DiagnosticEngine {
    entries: Vec<Diagnostic>,
    /// Tallies indexed by severity; count every report, retained or not.
    tallies: [usize; 3],
    overflow_noticed: bool,
    colored: bool,
    log: Option<File>,
    log_path: Option<PathBuf>,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEngine {
    /// Create an engine with no log file. Color is decided by the
    /// standard environment heuristic (`NO_COLOR`, `TERM`).
    pub fn new() -> Self {
        DiagnosticEngine {
            entries: Vec::new(),
            tallies: [0; 3],
            overflow_noticed: false,
            colored: detect_colors(),
            log: None,
            log_path: None,
        }
    }

    /// Create an engine, optionally opening a timestamped log file.
    ///
    /// A failed open is a warning, never fatal: the engine reports it and
    /// continues without a log.
    pub fn init(create_log_file: bool) -> Self {
        let mut engine = Self::new();
        if create_log_file {
            engine.open_log();
        }
        engine
    }

    /// Force color on or off (the driver's `Auto`/`Always`/`Never` hook).
    pub fn set_colored(&mut self, colored: bool) {
        self.colored = colored;
    }

    fn open_log(&mut self) {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = PathBuf::from(format!("chpp-errors-{stamp}.log"));
        match File::create(&path) {
            Ok(file) => {
                self.log = Some(file);
                self.log_path = Some(path);
            }
            Err(err) => {
                self.report(
                    Diagnostic::warning(DiagKind::Io)
                        .with_message(format!("cannot create log file {}: {err}", path.display())),
                );
            }
        }
    }

    /// Path of the open log file, if any.
    pub fn log_path(&self) -> Option<&std::path::Path> {
        self.log_path.as_deref()
    }

    /// Record a diagnostic and print it to stderr (and the log file).
    ///
    /// `Fatal` severity flushes, cleans up, and terminates the process
    /// with exit code 1.
    pub fn report(&mut self, diag: Diagnostic) {
        self.tallies[severity_slot(diag.severity)] += 1;
        self.print(&diag);

        if diag.severity == Severity::Fatal {
            self.cleanup();
            std::process::exit(1);
        }

        if self.entries.len() < MAX_RETAINED {
            self.entries.push(diag);
        } else if !self.overflow_noticed {
            self.overflow_noticed = true;
            eprintln!("note: more than {MAX_RETAINED} diagnostics; further entries are not retained");
        }
    }

    fn print(&mut self, diag: &Diagnostic) {
        eprintln!("{}", render(diag, self.colored));
        if let Some(log) = &mut self.log {
            // The log gets the plain rendering. A failed write is
            // reported once to stderr without recursing into report().
            if let Err(err) = writeln!(log, "{}", render(diag, false)) {
                eprintln!("Warning [IO]: cannot write log file: {err}");
                self.log = None;
            }
        }
    }

    /// Number of reports of the given severity, or all reports.
    pub fn count(&self, severity: Option<Severity>) -> usize {
        match severity {
            Some(severity) => self.tallies[severity_slot(severity)],
            None => self.tallies.iter().sum(),
        }
    }

    /// Number of `Error` and `Fatal` reports.
    pub fn error_count(&self) -> usize {
        self.count(Some(Severity::Error)) + self.count(Some(Severity::Fatal))
    }

    /// Number of `Warning` reports.
    pub fn warning_count(&self) -> usize {
        self.count(Some(Severity::Warning))
    }

    /// True if any `Error` or `Fatal` was reported.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// The driver's exit code: 0 on success, 1 on any error.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_errors())
    }

    /// Retained entries, in report order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Print severity tallies; with `verbose`, replay retained entries.
    pub fn print_summary(&self, verbose: bool) {
        let errors = self.error_count();
        let warnings = self.warning_count();
        if errors == 0 && warnings == 0 {
            return;
        }
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(format!("{errors} error{}", plural_s(errors)));
        }
        if warnings > 0 {
            parts.push(format!("{warnings} warning{}", plural_s(warnings)));
        }
        eprintln!("compilation finished with {}", parts.join(", "));
        if verbose {
            for diag in &self.entries {
                eprintln!("{}", render(diag, self.colored));
            }
        }
    }

    /// Flush and close the log file. Idempotent; also runs on drop.
    pub fn cleanup(&mut self) {
        if let Some(mut log) = self.log.take() {
            let _ = log.flush();
        }
    }
}

impl Drop for DiagnosticEngine {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn severity_slot(severity: Severity) -> usize {
    match severity {
        Severity::Warning => 0,
        Severity::Error => 1,
        Severity::Fatal => 2,
    }
}

/// Returns "s" for plural counts, "" for singular.
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color heuristic on the standard ANSI environment indicators:
/// disabled when `NO_COLOR` is set, when `TERM` is unset, or when
/// `TERM=dumb`.
fn detect_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chpp_ir::SourceLoc;
    use pretty_assertions::assert_eq;

    fn lexical_error(message: &str) -> Diagnostic {
        Diagnostic::error(DiagKind::Lexical)
            .at("тест.ћпп", SourceLoc::new(1, 1))
            .with_message(message)
    }

    #[test]
    fn counts_by_severity() {
        let mut engine = DiagnosticEngine::new();
        engine.report(lexical_error("a"));
        engine.report(lexical_error("b"));
        engine.report(Diagnostic::warning(DiagKind::Lexical).with_message("w"));

        assert_eq!(engine.count(Some(Severity::Error)), 2);
        assert_eq!(engine.count(Some(Severity::Warning)), 1);
        assert_eq!(engine.count(Some(Severity::Fatal)), 0);
        assert_eq!(engine.count(None), 3);
        assert_eq!(engine.error_count(), 2);
        assert_eq!(engine.warning_count(), 1);
    }

    #[test]
    fn exit_code_tracks_errors() {
        let mut engine = DiagnosticEngine::new();
        assert_eq!(engine.exit_code(), 0);
        engine.report(Diagnostic::warning(DiagKind::Syntax).with_message("w"));
        assert_eq!(engine.exit_code(), 0);
        engine.report(lexical_error("e"));
        assert_eq!(engine.exit_code(), 1);
        assert!(engine.has_errors());
    }

    #[test]
    fn retention_caps_but_tallies_keep_counting() {
        let mut engine = DiagnosticEngine::new();
        for i in 0..(MAX_RETAINED + 20) {
            engine.report(lexical_error(&format!("error {i}")));
        }
        assert_eq!(engine.entries().len(), MAX_RETAINED);
        assert_eq!(engine.count(Some(Severity::Error)), MAX_RETAINED + 20);
    }

    #[test]
    fn entries_preserve_report_order() {
        let mut engine = DiagnosticEngine::new();
        engine.report(lexical_error("first"));
        engine.report(lexical_error("second"));
        let messages: Vec<_> = engine.entries().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut engine = DiagnosticEngine::new();
        engine.cleanup();
        engine.cleanup();
    }

    #[test]
    fn report_macro_stamps_origin() {
        let mut engine = DiagnosticEngine::new();
        crate::report!(engine, lexical_error("stamped"));
        let entry = &engine.entries()[0];
        let Some((file, line)) = entry.origin else {
            panic!("origin should be stamped");
        };
        assert!(file.ends_with("engine.rs"));
        assert!(line > 0);
    }
}
