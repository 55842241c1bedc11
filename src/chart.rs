//! Bar-chart rendering of ranked results.

use anyhow::Result;
use clap::Args;
use textplots::{Chart, Plot, Shape};

use crate::cache::{SnapshotCache, SystemClock};
use crate::coingecko::CoinGeckoClient;
use crate::scan::ScanArgs;
use crate::table::{format_signed_pct, format_volatility, NO_MATCH_MESSAGE};
use crate::model::DerivedAssetRecord;
use crate::{filter, rank};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Chart width in characters
    #[arg(long, default_value_t = 120)]
    pub width: u32,

    /// Chart height in characters
    #[arg(long, default_value_t = 30)]
    pub height: u32,
}

pub async fn run(args: ChartArgs) -> Result<()> {
    let mut cache = SnapshotCache::new(CoinGeckoClient::new()?, SystemClock);
    if args.scan.refresh {
        cache.invalidate();
    }

    let snapshot = cache.get().await?;
    let ranked = rank::rank(filter::apply(snapshot, &args.scan.criteria()), args.scan.top);
    render(&ranked, args.width, args.height);
    Ok(())
}

/// Bars indexed by rank, tallest first; the legend below maps ranks back to
/// assets and colours each by the direction of its 24h move.
pub fn render(records: &[DerivedAssetRecord], width: u32, height: u32) {
    if records.is_empty() {
        println!("{NO_MATCH_MESSAGE}");
        return;
    }

    let bars: Vec<(f32, f32)> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            (
                idx as f32 + 1.0,
                record.volatility_pct.unwrap_or(0.0) as f32,
            )
        })
        .collect();

    println!("Volatility by rank (24h range as % of price)");
    Chart::new(width.max(40), height.max(10), 0.0, records.len() as f32 + 1.0)
        .lineplot(&Shape::Bars(&bars))
        .display();

    for (idx, record) in records.iter().enumerate() {
        let colour = change_colour(record.price_change_pct_24h);
        println!(
            "{:>3}. {colour}{:<10}{RESET} {:>8} volatility  {:>8} 24h",
            idx + 1,
            record.symbol.to_uppercase(),
            format_volatility(record.volatility_pct),
            format_signed_pct(record.price_change_pct_24h),
        );
    }
    println!();
}

/// Diverging scale on the 24h change: green for gains, red for losses, yellow
/// near flat, dim when the provider did not report a change.
fn change_colour(change: Option<f64>) -> &'static str {
    match change {
        Some(pct) if pct >= 1.0 => GREEN,
        Some(pct) if pct <= -1.0 => RED,
        Some(_) => YELLOW,
        None => DIM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_scale_diverges_on_change_direction() {
        assert_eq!(change_colour(Some(4.2)), GREEN);
        assert_eq!(change_colour(Some(-4.2)), RED);
        assert_eq!(change_colour(Some(0.3)), YELLOW);
        assert_eq!(change_colour(None), DIM);
    }
}
