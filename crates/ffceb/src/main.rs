//! ffceb - Backup exceptions to deleting Firefox cookies on close
//!
//! Firefox can automatically delete cookies when you close the browser.
//! This tool backs up the exceptions to that rule.

use clap::Parser;
use ffceb_core::logging;

mod commands;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
