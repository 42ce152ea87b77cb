use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "zeroframe",
    about = "Dispatch ZeroFrame commands against a scripted host",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a command without waiting for its result.
    Send {
        /// Command name, e.g. `wrapperNotification`.
        command: String,
        /// Parameters as a JSON object.
        #[arg(long)]
        params: Option<String>,
    },
    /// Send a command and print its result.
    Call {
        command: String,
        /// Parameters as a JSON object.
        #[arg(long)]
        params: Option<String>,
    },
    /// Check that the host answers `pong`.
    Ping,
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a starter config file if one does not exist.
    Init,
}
