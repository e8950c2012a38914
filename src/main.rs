use std::process::ExitCode;

use clap::Parser;
use quickreply::cli::{Cli, run};
use quickreply::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.default_log_directive());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
