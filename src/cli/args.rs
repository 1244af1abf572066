//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `suppress`: Insert eslint-disable comments for every reported error
//! - `init`: Initialize hushlint configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Suppress(cmd)) => cmd.args.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

#[derive(Debug, Parser)]
pub struct SuppressArgs {
    /// Files or directories to process (default: current directory)
    pub paths: Vec<String>,

    /// Actually write the comments (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Explanation appended to new directives (overrides config file)
    #[arg(long)]
    pub message: Option<String>,

    /// Only suppress these rules, comma separated (overrides config file)
    #[arg(long)]
    pub rules: Option<String>,

    /// Use eslint-disable-line comments after the offending code
    #[arg(long)]
    pub inline: bool,

    /// ESLint config file to lint with (overrides config file)
    #[arg(long)]
    pub base_config: Option<String>,

    /// Read diagnostics from a saved `eslint --format json` report instead of running ESLint
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SuppressCommand {
    #[command(flatten)]
    pub args: SuppressArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insert eslint-disable comments so that existing lint errors stop failing the build
    Suppress(SuppressCommand),
    /// Initialize a new .hushlintrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
