//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Child restraint design reference service.
#[derive(Debug, Parser)]
#[command(name = "seatwise", version, about)]
pub struct Cli {
    /// Path to the config file.
    #[arg(short, long, global = true, env = "SEATWISE_CONFIG")]
    pub config: Option<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve {
        /// Override the bind host.
        #[arg(long)]
        host: Option<String>,
        /// Override the bind port.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Inspect or create the config file.
    Config {
        /// Config action.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print table-based design advice without starting the server.
    Advise {
        /// Standard, e.g. R129, FMVSS213 or R44.
        #[arg(long)]
        standard: String,
        /// Height or weight range, e.g. 95-100cm or 9-18kg.
        #[arg(long)]
        range: String,
    },
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the resolved config file path.
    Path,
    /// Print the effective configuration with secrets masked.
    Show,
    /// Print one value by dotted key, e.g. `llm.model`.
    Get {
        /// Dotted key.
        key: String,
    },
    /// Write a default config file.
    Init {
        /// Where to write it; defaults to the standard location.
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables.
    Export,
}
