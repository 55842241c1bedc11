//! Tabular rendering of ranked results.
//!
//! Formatting is kept out of the data model: each column has one formatting
//! helper (currency with grouping, signed percentage, volume with an `M`
//! suffix) and the renderer assembles them into aligned rows.

use crate::model::DerivedAssetRecord;

pub const NO_MATCH_MESSAGE: &str =
    "No assets match the current filters; try lowering the thresholds.";

const NAME_WIDTH: usize = 22;

pub fn format_price(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Signed percentage with two decimals; an absent value renders as a dash
/// rather than a fake zero.
pub fn format_signed_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:+.2}%"),
        None => "-".to_string(),
    }
}

pub fn format_volume(volume_millions: f64) -> String {
    format!("{volume_millions:.2}M")
}

pub fn format_volatility(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:.2}%"),
        None => "-".to_string(),
    }
}

pub fn render(records: &[DerivedAssetRecord]) -> String {
    if records.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} | {:<NAME_WIDTH$} | {:>14} | {:>9} | {:>9} | {:>12} | {:>10}\n",
        "SYMBOL", "NAME", "PRICE", "1H", "24H", "VOLUME", "VOLATILITY"
    ));

    for record in records {
        out.push_str(&format!(
            "{:<8} | {:<NAME_WIDTH$} | {:>14} | {:>9} | {:>9} | {:>12} | {:>10}\n",
            record.symbol.to_uppercase(),
            clip(&record.name, NAME_WIDTH),
            format_price(record.current_price),
            format_signed_pct(record.price_change_pct_1h),
            format_signed_pct(record.price_change_pct_24h),
            format_volume(record.volume_millions),
            format_volatility(record.volatility_pct),
        ));
    }

    out
}

fn group_thousands(integral: u64) -> String {
    let digits = integral.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn clip(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testkit::{sample_record, sample_snapshot};

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_price(50_000.0), "$50,000.00");
        assert_eq!(format_price(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_price(0.4567), "$0.46");
    }

    #[test]
    fn percentage_formatting_keeps_the_sign() {
        assert_eq!(format_signed_pct(Some(4.2)), "+4.20%");
        assert_eq!(format_signed_pct(Some(-7.125)), "-7.12%");
        assert_eq!(format_signed_pct(None), "-");
    }

    #[test]
    fn volume_carries_the_millions_suffix() {
        assert_eq!(format_volume(2_500.0), "2500.00M");
    }

    #[test]
    fn empty_result_renders_the_no_match_message() {
        assert_eq!(render(&[]), NO_MATCH_MESSAGE);
    }

    #[test]
    fn table_contains_one_row_per_record_plus_header() {
        let snapshot = sample_snapshot(vec![
            sample_record("btc", 50_000.0, 49_000.0, 51_000.0, 2.5e9, Some(4.2)),
            sample_record("eth", 3_000.0, 2_800.0, 3_100.0, 1.2e9, Some(-2.1)),
        ]);

        let rendered = render(&snapshot.records);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("BTC"));
        assert!(lines[1].contains("$50,000.00"));
        assert!(lines[1].contains("+4.20%"));
        assert!(lines[1].contains("2500.00M"));
        assert!(lines[1].contains("4.00%"));
        assert!(lines[2].contains("-2.10%"));
    }
}
