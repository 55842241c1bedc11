//! Orders filtered records by volatility and keeps the top of the list.

use std::cmp::Ordering;

use crate::model::DerivedAssetRecord;

/// Stable sort by volatility descending, truncated to `top_n`. Records with an
/// undefined volatility sort last; ties keep snapshot order, which is the
/// provider's volume-descending rank and therefore a meaningful tiebreak.
pub fn rank(mut records: Vec<DerivedAssetRecord>, top_n: usize) -> Vec<DerivedAssetRecord> {
    records.sort_by(|a, b| compare_volatility(a.volatility_pct, b.volatility_pct));
    records.truncate(top_n);
    records
}

fn compare_volatility(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testkit::sample_record;
    use crate::metrics::derive_records;

    fn derived(
        rows: Vec<crate::model::RawAssetRecord>,
    ) -> Vec<DerivedAssetRecord> {
        crate::logging::set_silent(true);
        derive_records(rows)
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let records = derived(
            (0..15)
                .map(|i| {
                    let price = 100.0;
                    let spread = i as f64; // volatility_pct == i
                    sample_record(
                        &format!("a{i:02}"),
                        price,
                        price - spread / 2.0,
                        price + spread / 2.0,
                        1e9,
                        Some(5.0),
                    )
                })
                .collect(),
        );

        let ranked = rank(records, 10);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].symbol, "a14");
        let volatilities: Vec<f64> = ranked
            .iter()
            .map(|r| r.volatility_pct.expect("defined volatility"))
            .collect();
        for pair in volatilities.windows(2) {
            assert!(pair[0] >= pair[1], "ranking must be descending");
        }
    }

    #[test]
    fn short_input_is_returned_whole() {
        let records = derived(vec![
            sample_record("one", 10.0, 9.0, 11.0, 1e8, Some(2.0)),
            sample_record("two", 10.0, 8.0, 12.0, 1e8, Some(2.0)),
        ]);

        let ranked = rank(records, 10);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].symbol, "two");
    }

    #[test]
    fn ties_keep_snapshot_order() {
        // Identical bounds so the computed volatilities are bit-equal.
        let records = derived(vec![
            sample_record("first", 100.0, 95.0, 105.0, 3e9, Some(1.0)),
            sample_record("second", 100.0, 95.0, 105.0, 2e9, Some(1.0)),
            sample_record("third", 100.0, 95.0, 105.0, 1e9, Some(1.0)),
        ]);

        // Ties keep snapshot order, the provider's volume-descending rank.
        let ranked = rank(records, 10);
        let symbols: Vec<&str> = ranked.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["first", "second", "third"]);
    }

    #[test]
    fn undefined_volatility_sorts_last() {
        let records = derived(vec![
            sample_record("zerop", 0.0, 9.0, 11.0, 1e9, Some(3.0)),
            sample_record("small", 10.0, 9.99, 10.01, 1e9, Some(3.0)),
        ]);

        let ranked = rank(records, 10);

        assert_eq!(ranked[0].symbol, "small");
        assert_eq!(ranked[1].volatility_pct, None);
    }

    #[test]
    fn ranking_is_idempotent() {
        let records = derived(vec![
            sample_record("aaa", 10.0, 9.0, 11.0, 1e9, Some(4.0)),
            sample_record("bbb", 10.0, 8.0, 12.0, 1e9, Some(4.0)),
            sample_record("ccc", 10.0, 9.5, 10.5, 1e9, Some(4.0)),
        ]);

        let once = rank(records.clone(), 10);
        let twice = rank(rank(records, 10), 10);
        assert_eq!(once, twice);
    }
}
