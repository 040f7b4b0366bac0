use std::process::ExitCode;

use ledger_core::cli::{run_cli, SCRIPT_ENV};
use ledger_core::{init, utils::build_info};

fn usage() -> String {
    format!(
        "usage: ledger_core_cli [--version | --help]\n\
         Starts the interactive ledger shell. Set {SCRIPT_ENV}=1 to read commands from stdin."
    )
}

fn main() -> ExitCode {
    match std::env::args().nth(1).as_deref() {
        None => {}
        Some("-V" | "--version") => {
            println!("{}", build_info::current().summary());
            return ExitCode::SUCCESS;
        }
        Some("-h" | "--help") => {
            println!("{}", usage());
            return ExitCode::SUCCESS;
        }
        Some(other) => {
            eprintln!("unexpected argument `{other}`\n{}", usage());
            return ExitCode::from(2);
        }
    }

    init();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
