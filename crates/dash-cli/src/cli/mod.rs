use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gamedash` binary.
#[derive(Debug, Parser)]
#[command(
    name = "gamedash",
    version,
    about = "Korean game publishers: quarterly results, margins and productivity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Companies to include, comma separated (defaults to config)
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub companies: Option<Vec<String>>,

    /// Quarters to include, comma separated, e.g. 2Q25,3Q25 (defaults to all)
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub periods: Option<Vec<String>>,

    /// Extra config file layered over the user and project config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset TOML to load instead of the builtin data
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            companies: self.companies.clone(),
            periods: self.periods.clone(),
            config: self.config.clone(),
            data: self.data.clone(),
        }
    }
}
