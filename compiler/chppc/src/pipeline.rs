//! The compilation pipeline.
//!
//! One translation unit runs strictly sequentially: load → lex → parse,
//! then the downstream hand-off. Semantic analysis, IR, and code
//! generation are stubs behind [`Handoff`]; the driver reports honestly
//! when an option asks for a stage that does not exist yet.

use std::fs;
use std::fmt::Write as _;

use chpp_diagnostic::{report, DiagKind, Diagnostic, DiagnosticEngine};
use chpp_ir::{pretty, Program, Token, TokenKind};
use chpp_lexer::{Lexer, SourceBuffer};
use chpp_parse::Parser;
use chpp_target::{Arch, TargetInfo};
use tracing::debug;

use crate::cli::{Options, Stage};

/// The front-end's product, handed to the downstream stages.
#[derive(Debug)]
pub struct Handoff {
    pub program: Program,
    pub target: TargetInfo,
}

/// Run the driver for one translation unit. Returns the process exit
/// code: 0 on success, 1 on any error.
pub fn run(options: &Options) -> i32 {
    let mut diags = DiagnosticEngine::init(options.error_log);

    check_extension(options, &mut diags);
    let target = resolve_target(options, &mut diags);

    let filename = options.input.to_string_lossy().into_owned();
    let bytes = match fs::read(&options.input) {
        Ok(bytes) => bytes,
        Err(err) => {
            report!(
                diags,
                Diagnostic::error(DiagKind::Io)
                    .with_message(format!("cannot read `{filename}`: {err}"))
            );
            diags.print_summary(options.verbose);
            return diags.exit_code();
        }
    };
    let buf = SourceBuffer::new(bytes, filename);

    if options.stop_after == Some(Stage::Lexing) {
        print!("{}", dump_tokens(buf, target, &mut diags));
        diags.print_summary(options.verbose);
        return diags.exit_code();
    }

    let lexer = Lexer::new(buf, target);
    let program = Parser::new(lexer, &mut diags).parse_program();
    debug!(decls = program.decls.len(), "parse finished");

    if options.stop_after == Some(Stage::Parsing) {
        print!("{}", pretty::dump(&program));
        diags.print_summary(options.verbose);
        return diags.exit_code();
    }

    let handoff = analyze(program, target, &mut diags);

    if options.stop_after.is_none() && (options.assembly_only || options.output.is_some()) {
        report!(
            diags,
            Diagnostic::warning(DiagKind::CodeGen).with_message(
                "code generation is not implemented; stopping after the front-end"
            )
        );
    }
    let _ = handoff;

    diags.print_summary(options.verbose);
    diags.exit_code()
}

/// Advisory check on the source extension. `.ћпп` is expected; anything
/// else warns and continues.
fn check_extension(options: &Options, diags: &mut DiagnosticEngine) {
    let expected = options
        .input
        .extension()
        .is_some_and(|ext| ext.to_string_lossy() == "ћпп");
    if !expected {
        report!(
            diags,
            Diagnostic::warning(DiagKind::Io)
                .with_message(format!(
                    "`{}` does not use the `.ћпп` extension",
                    options.input.display()
                ))
                .with_suggestion("Чпп sources conventionally end in `.ћпп`")
        );
    }
}

/// Select the target: explicit `--target=` wins, otherwise the host.
/// An unrecognized host falls back to x86-64 defaults with a warning.
fn resolve_target(options: &Options, diags: &mut DiagnosticEngine) -> TargetInfo {
    let target = match options.target {
        Some(arch) => TargetInfo::for_arch(arch),
        None => TargetInfo::host(),
    };
    if target.arch == Arch::Unknown {
        report!(
            diags,
            Diagnostic::warning(DiagKind::Internal)
                .with_message("unrecognized host architecture; assuming x86-64 defaults")
        );
    }
    debug!(arch = %target.arch, word_size = target.word_size, "target selected");
    target
}

/// Semantic analysis stub: receives the hand-off unchanged.
///
/// The real stage will fill `type_info` slots and build the symbol
/// table; the seam and ownership are already final — the analyzer
/// borrows the diagnostics engine and owns the tree it annotates.
fn analyze(program: Program, target: TargetInfo, _diags: &mut DiagnosticEngine) -> Handoff {
    Handoff { program, target }
}

/// Render the token stream for `--stop-after-lexing`.
fn dump_tokens(buf: SourceBuffer, target: TargetInfo, diags: &mut DiagnosticEngine) -> String {
    let mut lexer = Lexer::new(buf, target);
    let mut out = String::new();
    loop {
        let token = lexer.next_token(diags);
        render_token(&mut out, &token);
        if token.kind == TokenKind::Eof {
            break;
        }
    }
    out
}

fn render_token(out: &mut String, token: &Token) {
    let _ = write!(out, "{}:{}\t{}", token.loc.line, token.loc.column, token.kind);
    match &token.value {
        chpp_ir::TokenValue::None => {}
        chpp_ir::TokenValue::Int(value) => {
            let _ = write!(out, "\t{value}");
        }
        chpp_ir::TokenValue::Char(c) => {
            let _ = write!(out, "\t{c:?}");
        }
        chpp_ir::TokenValue::Text(text) => {
            let _ = write!(out, "\t{text:?}");
        }
    }
    out.push('\n');
}
