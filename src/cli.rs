use clap::{Parser, Subcommand};

use crate::chart::ChartArgs;
use crate::scan::{ScanArgs, WatchArgs};

#[derive(Debug, Parser)]
#[command(author, version, about = "Crypto intraday volatility scanner")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or_default()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a snapshot and print the top movers table
    Scan(ScanArgs),
    /// Re-render on an interval, refetching only when the snapshot expires
    Watch(WatchArgs),
    /// Render the top movers as a volatility bar chart
    Chart(ChartArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Scan(ScanArgs::default())
    }
}
