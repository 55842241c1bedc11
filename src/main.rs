use anyhow::Result;
use clap::Parser;
use crypto_scanner::chart;
use crypto_scanner::cli::{self, Cli};
use crypto_scanner::scan;

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command() {
        cli::Command::Scan(args) => scan::run(args).await,
        cli::Command::Watch(args) => scan::watch(args).await,
        cli::Command::Chart(args) => chart::run(args).await,
    }
}
