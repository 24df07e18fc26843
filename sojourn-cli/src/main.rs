//! Entry point for the `sojourn` command-line interface.
#![forbid(unsafe_code)]

use sojourn_cli::CliError;

fn main() {
    match sojourn_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("sojourn: {err}");
            std::process::exit(1);
        }
    }
}
