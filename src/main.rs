//! Pokedex server entry point
//!
//! Parses CLI arguments, runs the command and reports failures on stderr
//! with a non-zero exit status.

use pokedex::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
