//! Command-line options.
//!
//! Hand-rolled over `std::env::args` — the surface is small and fixed.

use std::path::PathBuf;

use chpp_target::Arch;

/// Where to stop the pipeline early.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Stage {
    Lexing,
    Parsing,
    Semantic,
    Ir,
}

/// Parsed driver options.
#[derive(Clone, Debug)]
pub struct Options {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// `-S`: stop at assembly, do not assemble or link.
    pub assembly_only: bool,
    /// `--target=`; `None` selects the host.
    pub target: Option<Arch>,
    /// `-O0`..`-O3`.
    pub opt_level: u8,
    pub verbose: bool,
    /// `--generate-error-log`: open a timestamped diagnostics log.
    pub error_log: bool,
    pub stop_after: Option<Stage>,
}

/// Result of argument parsing.
#[derive(Clone, Debug)]
pub enum CliOutcome {
    Run(Options),
    Help,
}

/// Usage text for `-h`/`--help` and bad invocations.
pub const USAGE: &str = "\
Usage: chpp <input.ћпп> [options]

Options:
  -o <file>                write output to <file>
  -S                       emit assembly only
  --target=<x86|x86-64>    select the target architecture
  -O0 .. -O3               optimization level (recorded; no optimizer yet)
  --verbose                verbose diagnostics and tracing
  --generate-error-log     also write diagnostics to a timestamped log file
  --stop-after-lexing      dump the token stream and stop
  --stop-after-parsing     dump the AST and stop
  --stop-after-semantic    stop after semantic analysis
  --stop-after-ir          stop after IR generation
  -h, --help               show this help
";

/// Parse the argument list (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliOutcome, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut assembly_only = false;
    let mut target: Option<Arch> = None;
    let mut opt_level = 0u8;
    let mut verbose = false;
    let mut error_log = false;
    let mut stop_after: Option<Stage> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliOutcome::Help),
            "-o" => match iter.next() {
                Some(path) => output = Some(PathBuf::from(path)),
                None => return Err("option `-o` requires a file argument".to_string()),
            },
            "-S" => assembly_only = true,
            "--verbose" => verbose = true,
            "--generate-error-log" => error_log = true,
            "--stop-after-lexing" => stop_after = Some(Stage::Lexing),
            "--stop-after-parsing" => stop_after = Some(Stage::Parsing),
            "--stop-after-semantic" => stop_after = Some(Stage::Semantic),
            "--stop-after-ir" => stop_after = Some(Stage::Ir),
            "-O0" => opt_level = 0,
            "-O1" => opt_level = 1,
            "-O2" => opt_level = 2,
            "-O3" => opt_level = 3,
            other => {
                if let Some(name) = other.strip_prefix("--target=") {
                    target = Some(
                        Arch::parse(name)
                            .ok_or_else(|| format!("unknown target `{name}` (expected x86 or x86-64)"))?,
                    );
                } else if other.starts_with('-') {
                    return Err(format!("unknown option `{other}`"));
                } else if input.is_none() {
                    input = Some(PathBuf::from(other));
                } else {
                    return Err(format!("unexpected extra input `{other}`"));
                }
            }
        }
    }

    let Some(input) = input else {
        return Err("no input file given".to_string());
    };
    Ok(CliOutcome::Run(Options {
        input,
        output,
        assembly_only,
        target,
        opt_level,
        verbose,
        error_log,
        stop_after,
    }))
}
