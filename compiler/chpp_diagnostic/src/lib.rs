//! Diagnostic collection and reporting for the Чпп compiler.
//!
//! Every pipeline stage reports typed, located, severity-graded messages
//! through a [`DiagnosticEngine`] handle threaded down the call chain.
//! Reports print immediately to stderr (and to an optional log file);
//! the engine retains entries for the end-of-run summary and decides the
//! driver's exit code.
//!
//! Severity semantics:
//!
//! - **Warning** — recorded, printed, compilation continues unchanged.
//! - **Error** — recorded, printed, compilation continues so further
//!   errors can surface; the driver exits non-zero at the end.
//! - **Fatal** — printed, the engine cleans up, the process exits.

mod diagnostic;
mod engine;

pub use diagnostic::{render, DiagKind, Diagnostic, Severity};
pub use engine::{DiagnosticEngine, MAX_RETAINED};

/// Report a diagnostic, stamping the reporter's `file!()`/`line!()`.
///
/// The stamp is shown only in debug builds, to point a compiler developer
/// at the code that produced the message.
#[macro_export]
macro_rules! report {
    ($engine:expr, $diag:expr) => {
        $engine.report($diag.reported_from(file!(), line!()))
    };
}
