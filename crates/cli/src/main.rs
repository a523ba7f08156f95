use std::process::ExitCode;

use clap::Parser;
use log::debug;
use menucon_cli::cli_args::Args;
use menucon_cli::shell::Shell;
use menucon_core::error::Result;

fn execute() -> Result<()> {
    let args = Args::parse();
    debug!("{args:?}");

    let shell = Shell::from_args(&args)?;
    shell.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
