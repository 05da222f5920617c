//! Client-side monthly summary.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::model::{CategorySummary, SummaryEntry};

/// Folds raw entries into per-category totals.
///
/// Entries outside the requested year/month are skipped; an entry with no
/// period never matches a requested filter. Categories keep the order in which
/// they first appear, and the first name seen for an id wins.
pub fn aggregate(entries: &[SummaryEntry], year: Option<i32>, month: Option<u32>) -> Vec<CategorySummary> {
    let mut out: Vec<CategorySummary> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for entry in entries.iter().filter(|e| in_period(e, year, month)) {
        let amount = coerce_amount(&entry.amount);
        match index.get(&entry.category_id) {
            Some(&i) => {
                let row = &mut out[i];
                row.total_amount = row.total_amount.saturating_add(amount);
            }
            None => {
                index.insert(entry.category_id, out.len());
                out.push(CategorySummary {
                    category_id: entry.category_id,
                    category_name: entry.category_name.clone(),
                    total_amount: amount,
                });
            }
        }
    }
    out
}

pub fn in_period(entry: &SummaryEntry, year: Option<i32>, month: Option<u32>) -> bool {
    if year.is_some_and(|y| entry.year != Some(y)) {
        return false;
    }
    if month.is_some_and(|m| entry.month != Some(m)) {
        return false;
    }
    true
}

/// Reads an amount the way the summary counts it: numbers as-is, numeric
/// strings parsed, everything else zero.
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Grand total of a summary. Saturates at `Decimal::MAX` instead of overflowing.
pub fn grand_total(rows: &[CategorySummary]) -> Decimal {
    rows.iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.total_amount))
}

/// Share of `part` in `total` as a percentage rounded to one decimal;
/// `None` when the total is zero or the ratio is not representable.
pub fn share_percent(part: Decimal, total: Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return None;
    }
    let share = part
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .or_else(|| {
            part.checked_div(total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })?;
    Some(share.round_dp(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn entry(cat: i64, amount: Value, year: i32, month: u32) -> SummaryEntry {
        SummaryEntry {
            category_id: cat,
            category_name: format!("cat-{cat}"),
            year: Some(year),
            month: Some(month),
            amount,
        }
    }

    #[test]
    fn filters_by_requested_period() {
        let entries = vec![entry(1, json!(10), 2024, 1), entry(1, json!(5), 2024, 2)];
        let out = aggregate(&entries, Some(2024), Some(1));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category_id, 1);
        assert_eq!(out[0].total_amount, Decimal::from(10));
    }

    #[test]
    fn no_filter_keeps_everything() {
        let entries = vec![entry(1, json!(10), 2024, 1), entry(1, json!(5), 2023, 2)];
        let out = aggregate(&entries, None, None);
        assert_eq!(out[0].total_amount, Decimal::from(15));
    }

    #[test]
    fn entries_without_period_never_match_a_filter() {
        let mut undated = entry(2, json!(7), 2024, 1);
        undated.year = None;
        undated.month = None;
        assert!(aggregate(&[undated.clone()], Some(2024), None).is_empty());
        assert_eq!(aggregate(&[undated], None, None).len(), 1);
    }

    #[test]
    fn keeps_first_appearance_order_and_first_name() {
        let mut renamed = entry(3, json!(1), 2024, 1);
        renamed.category_name = "later name".into();
        let entries = vec![
            entry(3, json!(1), 2024, 1),
            entry(1, json!(100), 2024, 1),
            renamed,
            entry(2, json!(50), 2024, 1),
        ];
        let out = aggregate(&entries, None, None);
        let ids: Vec<i64> = out.iter().map(|r| r.category_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(out[0].category_name, "cat-3");
        assert_eq!(out[0].total_amount, Decimal::from(2));
    }

    #[test]
    fn non_numeric_amounts_count_as_zero() {
        let entries = vec![
            entry(1, json!("12.50"), 2024, 1),
            entry(1, json!("abc"), 2024, 1),
            entry(1, Value::Null, 2024, 1),
            entry(1, json!(true), 2024, 1),
            entry(1, json!({ "v": 3 }), 2024, 1),
            entry(1, json!(" 0.5 "), 2024, 1),
        ];
        let out = aggregate(&entries, None, None);
        assert_eq!(out[0].total_amount, Decimal::from_str("13").unwrap());
    }

    #[test]
    fn float_amounts_are_read_exactly() {
        assert_eq!(coerce_amount(&json!(0.1)), Decimal::from_str("0.1").unwrap());
        assert_eq!(coerce_amount(&json!(1e3)), Decimal::from(1000));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate(&[], Some(2024), Some(1)).is_empty());
        assert!(aggregate(&[], None, None).is_empty());
    }

    #[test]
    fn share_of_zero_total_is_none() {
        assert_eq!(share_percent(Decimal::ONE, Decimal::ZERO), None);
        assert_eq!(
            share_percent(Decimal::ONE, Decimal::from(3)),
            Some(Decimal::from_str("33.3").unwrap())
        );
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let max = json!(Decimal::MAX.to_string());
        let out = aggregate(&[entry(1, max.clone(), 2024, 1), entry(1, max, 2024, 1)], None, None);
        assert_eq!(out[0].total_amount, Decimal::MAX);

        let rows = vec![out[0].clone(), out[0].clone()];
        assert_eq!(grand_total(&rows), Decimal::MAX);
    }

    #[test]
    fn share_of_a_huge_part_is_computed() {
        let share = share_percent(Decimal::MAX / Decimal::TEN, Decimal::MAX);
        assert_eq!(share, Some(Decimal::TEN));
        assert_eq!(share_percent(Decimal::MAX, Decimal::MAX), Some(Decimal::ONE_HUNDRED));
    }

    fn arb_entry() -> impl Strategy<Value = SummaryEntry> {
        (0i64..6, 0i64..100_000, 2022i32..2026, 1u32..13).prop_map(|(cat, cents, year, month)| SummaryEntry {
            category_id: cat,
            category_name: format!("cat-{cat}"),
            year: Some(year),
            month: Some(month),
            amount: json!(format!("{}.{:02}", cents / 100, cents % 100)),
        })
    }

    proptest! {
        /// Output totals add up to the filtered input.
        #[test]
        fn totals_are_conserved(
            entries in prop::collection::vec(arb_entry(), 0..40),
            year in prop::option::of(2022i32..2026),
            month in prop::option::of(1u32..13),
        ) {
            let out = aggregate(&entries, year, month);
            let expected: Decimal = entries
                .iter()
                .filter(|e| in_period(e, year, month))
                .map(|e| coerce_amount(&e.amount))
                .sum();
            prop_assert_eq!(grand_total(&out), expected);
        }

        /// Every category id shows up at most once.
        #[test]
        fn categories_are_unique(entries in prop::collection::vec(arb_entry(), 0..40)) {
            let out = aggregate(&entries, None, None);
            let mut ids: Vec<i64> = out.iter().map(|r| r.category_id).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }

        /// Same input, same output.
        #[test]
        fn aggregation_is_deterministic(entries in prop::collection::vec(arb_entry(), 0..40)) {
            prop_assert_eq!(aggregate(&entries, None, None), aggregate(&entries, None, None));
        }
    }
}
