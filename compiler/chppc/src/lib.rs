//! The Чпп compiler driver.
//!
//! Wires the front-end pipeline together: CLI options, diagnostics
//! engine, target selection, source loading, lexing, and parsing. The
//! downstream stages (semantic analysis, IR, code generation) are
//! stubs that receive the defined hand-off — the parsed [`Program`],
//! the accumulated diagnostics, and the [`TargetInfo`] — and will grow
//! behind the same seams.
//!
//! [`Program`]: chpp_ir::Program
//! [`TargetInfo`]: chpp_target::TargetInfo

pub mod cli;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `--verbose` turns on debug-level spans for the compiler crates;
/// otherwise `RUST_LOG` controls filtering as usual.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
