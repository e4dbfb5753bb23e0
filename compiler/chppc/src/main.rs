//! `chpp` — the Чпп compiler CLI.

use chppc::cli::{self, CliOutcome};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::parse_args(&args) {
        Ok(CliOutcome::Help) => print!("{}", cli::USAGE),
        Ok(CliOutcome::Run(options)) => {
            chppc::init_tracing(options.verbose);
            std::process::exit(chppc::pipeline::run(&options));
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            eprint!("{}", cli::USAGE);
            std::process::exit(1);
        }
    }
}
