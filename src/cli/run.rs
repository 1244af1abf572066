use std::process::ExitCode;

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{init::init, suppress::suppress},
    exit_status::ExitStatus,
};

/// Dispatch a parsed command line. `serve` is handled by `main` before this.
pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = match args.command {
        Some(Command::Suppress(cmd)) => suppress(cmd, verbose)?,
        Some(Command::Init) => init()?,
        Some(Command::Serve) => bail!("Serve command should be handled before run_cli()"),
        None => bail!("No command provided. Use --help to see available commands."),
    };
    Ok(status.into())
}
