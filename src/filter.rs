//! Conjunctive threshold filter over a derived snapshot.

use crate::model::{DerivedAssetRecord, FilterCriteria, Snapshot};

/// All three predicates must hold, each as a strict inequality. A record with
/// an absent 24h change or an undefined volatility fails the corresponding
/// predicate outright; unknown is never treated as zero.
pub fn passes(record: &DerivedAssetRecord, criteria: &FilterCriteria) -> bool {
    let volume_ok = record.volume_millions > criteria.min_volume_millions;
    let change_ok = record
        .price_change_pct_24h
        .is_some_and(|change| change.abs() > criteria.min_abs_change_pct_24h);
    let volatility_ok = record
        .volatility_pct
        .is_some_and(|volatility| volatility > criteria.min_volatility_pct);

    volume_ok && change_ok && volatility_ok
}

/// The matching subsequence, in snapshot order. Empty output is an ordinary
/// outcome; callers render it as an explicit no-matches state.
pub fn apply(snapshot: &Snapshot, criteria: &FilterCriteria) -> Vec<DerivedAssetRecord> {
    snapshot
        .records
        .iter()
        .filter(|record| passes(record, criteria))
        .cloned()
        .collect()
}
