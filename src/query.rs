//! Derived stock metrics and the "what runs out first" ordering.

use crate::error::SupplyError;
use crate::inventory::{InventoryTable, StockRecord};
use std::cmp::Ordering;

/// Metrics computed from a [`StockRecord`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedMetric {
    /// `ceil(quantity / daily_usage)`.
    pub remaining_days: u64,
    /// `daily_usage * remaining_days - quantity`.
    pub deficit: u64,
}

impl DerivedMetric {
    pub fn of(record: &StockRecord) -> Self {
        let quantity = record.quantity();
        let usage = record.daily_usage();
        Self {
            remaining_days: quantity.div_ceil(usage),
            // Same value as usage * remaining_days - quantity, without the overflow.
            deficit: (usage - quantity % usage) % usage,
        }
    }
}

/// One row of the sorted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedItem<'a> {
    pub name: &'a str,
    pub record: &'a StockRecord,
    pub metric: DerivedMetric,
}

/// An item that is short, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall<'a> {
    pub name: &'a str,
    pub amount: u64,
}

fn depletion_order(left: &RankedItem<'_>, right: &RankedItem<'_>) -> Ordering {
    left.metric
        .remaining_days
        .cmp(&right.metric.remaining_days)
        .then_with(|| right.metric.deficit.cmp(&left.metric.deficit))
        .then_with(|| left.name.cmp(right.name))
}

/// All items ordered by soonest depletion.
///
/// Ascending remaining days, then descending deficit, then ascending name.
/// Recomputed on every call.
pub fn sorted_view(table: &InventoryTable) -> Vec<RankedItem<'_>> {
    let mut view: Vec<RankedItem<'_>> = table
        .iter()
        .map(|(name, record)| RankedItem {
            name,
            record,
            metric: DerivedMetric::of(record),
        })
        .collect();
    view.sort_by(depletion_order);
    view
}

/// Items whose stock does not cover today's usage.
pub fn needed_now(table: &InventoryTable) -> Vec<Shortfall<'_>> {
    table
        .iter()
        .filter(|(_, record)| record.quantity() < record.daily_usage())
        .map(|(name, record)| Shortfall {
            name,
            amount: record.daily_usage() - record.quantity(),
        })
        .collect()
}

/// Items whose stock does not cover `days` days of usage.
pub fn needed_in_days(
    table: &InventoryTable,
    days: u64,
) -> Result<Vec<Shortfall<'_>>, SupplyError> {
    let mut shortfalls = Vec::new();
    for (name, record) in table.iter() {
        let needed = record.daily_usage().checked_mul(days).ok_or_else(|| {
            SupplyError::BadArgument(format!("{days} days of {name} is too large to compute"))
        })?;
        if record.quantity() < needed {
            shortfalls.push(Shortfall {
                name,
                amount: needed - record.quantity(),
            });
        }
    }
    Ok(shortfalls)
}

pub fn first_to_run_out(table: &InventoryTable) -> Option<RankedItem<'_>> {
    sorted_view(table).into_iter().next()
}

/// The first `count` items of [`sorted_view`], or all of them if there are fewer.
pub fn first_n_to_run_out(table: &InventoryTable, count: usize) -> Vec<RankedItem<'_>> {
    let mut view = sorted_view(table);
    view.truncate(count);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: &[(&str, u64, u64)]) -> InventoryTable {
        let mut table = InventoryTable::new();
        for (name, quantity, usage) in rows {
            table.insert(*name, StockRecord::new(*quantity, *usage).unwrap());
        }
        table
    }

    fn names<'a>(view: &[RankedItem<'a>]) -> Vec<&'a str> {
        view.iter().map(|item| item.name).collect()
    }

    #[test]
    fn test_metrics() {
        let metric = |q, u| DerivedMetric::of(&StockRecord::new(q, u).unwrap());
        assert_eq!(metric(10, 5), DerivedMetric { remaining_days: 2, deficit: 0 });
        assert_eq!(metric(3, 2), DerivedMetric { remaining_days: 2, deficit: 1 });
        assert_eq!(metric(4, 3), DerivedMetric { remaining_days: 2, deficit: 2 });
        assert_eq!(metric(0, 7), DerivedMetric { remaining_days: 0, deficit: 0 });
        assert_eq!(
            metric(u64::MAX, 2),
            DerivedMetric { remaining_days: u64::MAX / 2 + 1, deficit: 1 }
        );
    }

    #[test]
    fn test_sorted_by_remaining_days() {
        let t = table(&[("A", 10, 5), ("B", 1, 1)]);
        assert_eq!(names(&sorted_view(&t)), vec!["B", "A"]);
    }

    #[test]
    fn test_larger_deficit_first_on_equal_days() {
        let t = table(&[("A", 3, 2), ("B", 4, 3)]);
        assert_eq!(names(&sorted_view(&t)), vec!["B", "A"]);
    }

    #[test]
    fn test_name_breaks_remaining_ties_case_sensitively() {
        let t = table(&[("b", 2, 1), ("B", 2, 1), ("a", 2, 1)]);
        assert_eq!(names(&sorted_view(&t)), vec!["B", "a", "b"]);
    }

    #[test]
    fn test_needed_now() {
        let short = table(&[("A", 2, 5)]);
        assert_eq!(needed_now(&short), vec![Shortfall { name: "A", amount: 3 }]);

        let covered = table(&[("A", 5, 5)]);
        assert!(needed_now(&covered).is_empty());
    }

    #[test]
    fn test_needed_in_days() {
        let t = table(&[("A", 10, 5), ("B", 12, 3), ("C", 1, 1)]);
        assert_eq!(
            needed_in_days(&t, 3).unwrap(),
            vec![
                Shortfall { name: "A", amount: 5 },
                Shortfall { name: "C", amount: 2 },
            ]
        );
        assert!(needed_in_days(&t, 0).unwrap().is_empty());
    }

    #[test]
    fn test_needed_in_days_overflow_is_error() {
        let t = table(&[("A", 1, 2)]);
        assert!(matches!(
            needed_in_days(&t, u64::MAX),
            Err(SupplyError::BadArgument(_))
        ));
    }

    #[test]
    fn test_first_to_run_out() {
        let t = table(&[("A", 10, 5), ("B", 1, 1)]);
        assert_eq!(first_to_run_out(&t).map(|item| item.name), Some("B"));
        assert_eq!(first_to_run_out(&InventoryTable::new()), None);
    }

    #[test]
    fn test_first_n_larger_than_table_returns_all() {
        let t = table(&[("A", 10, 5), ("B", 1, 1), ("C", 9, 1)]);
        assert_eq!(names(&first_n_to_run_out(&t, 10)), vec!["B", "A", "C"]);
        assert_eq!(names(&first_n_to_run_out(&t, 2)), vec!["B", "A"]);
        assert!(first_n_to_run_out(&t, 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_sorted_view_is_idempotent_and_ordered(
            rows in proptest::collection::vec(("[A-Za-z]{1,4}", 0u64..100, 1u64..20), 0..12),
        ) {
            let mut t = InventoryTable::new();
            for (name, quantity, usage) in &rows {
                t.insert(name.clone(), StockRecord::new(*quantity, *usage).unwrap());
            }

            let first = sorted_view(&t);
            let second = sorted_view(&t);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), t.len());

            for pair in first.windows(2) {
                prop_assert_ne!(depletion_order(&pair[0], &pair[1]), Ordering::Greater);
            }
            for item in &first {
                let usage = item.record.daily_usage();
                let quantity = item.record.quantity();
                prop_assert_eq!(item.metric.deficit, usage * item.metric.remaining_days - quantity);
            }
        }
    }
}
