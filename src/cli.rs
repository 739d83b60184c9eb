// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `sitebake`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitebake",
    version,
    about = "Compile, bundle and serve front-end assets with live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Sitebake.toml` in the current working directory. A missing
    /// file is not an error; the built-in defaults are used instead.
    #[arg(long, value_name = "PATH", default_value = "Sitebake.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEBAKE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved path registry and profile, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One entry point per pipeline operation. No subcommand means `dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run all five transform tasks concurrently, once.
    Build,
    /// Build, then serve the output directory and rebuild on file changes.
    Dev,
    /// Clean, then run all tasks sequentially in optimization mode.
    Release,
    /// Delete the output directory.
    Clean,
    /// Run the style task once.
    Style,
    /// Run the script task once.
    Script,
    /// Run the template task once.
    Template,
    /// Run the font task once.
    Font,
    /// Run the assets task once.
    Assets,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
