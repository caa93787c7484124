//! Display-order sorting and filtering over parsed records.

use crate::models::{DisplayOrder, SharePrice};
use std::cmp::Ordering;

/// The "top N" cut applied to the price-ranked modes.
pub const TOP_N: usize = 5;

fn by_price(a: &SharePrice, b: &SharePrice) -> Ordering {
    a.unit_price.partial_cmp(&b.unit_price).unwrap_or(Ordering::Equal)
}

/// Sort (and for the price modes, truncate) records per the requested order.
///
/// `None` runs two stable passes on purpose: unitID ascending first, then a
/// full re-sort by date descending. Date dominates the final order; the
/// unitID pass survives only as the tie-break among equal dates. Callers
/// relying on the output order rely on exactly this composition.
pub fn apply_display_order(mut records: Vec<SharePrice>, order: DisplayOrder) -> Vec<SharePrice> {
    match order {
        DisplayOrder::LeastExpensive => {
            records.sort_by(by_price);
            records.truncate(TOP_N);
        }
        DisplayOrder::MostExpensive => {
            records.sort_by(|a, b| by_price(b, a));
            records.truncate(TOP_N);
        }
        DisplayOrder::None => {
            records.sort_by(|a, b| a.unit_id.cmp(&b.unit_id));
            records.sort_by(|a, b| b.date.cmp(&a.date));
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(unit: &str, day: u32, price: f64) -> SharePrice {
        SharePrice {
            unit_id: unit.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            unit_price: price,
        }
    }

    fn sample() -> Vec<SharePrice> {
        vec![
            rec("B", 3, 7.0),
            rec("A", 1, 10.0),
            rec("C", 2, 1.0),
            rec("A", 3, 4.0),
            rec("B", 1, 2.0),
            rec("C", 4, 9.0),
            rec("A", 2, 6.0),
        ]
    }

    #[test]
    fn test_none_sorts_date_descending() {
        let out = apply_display_order(sample(), DisplayOrder::None);
        assert_eq!(out.len(), 7);
        let dates: Vec<u32> = out.iter().map(|r| r.date.format("%d").to_string().parse().unwrap()).collect();
        assert_eq!(dates, vec![4, 3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_none_breaks_date_ties_by_unit_ascending() {
        let out = apply_display_order(sample(), DisplayOrder::None);
        // day 3 appears for A and B; day 2 for A and C; day 1 for A and B
        assert_eq!((out[1].unit_id.as_str(), out[2].unit_id.as_str()), ("A", "B"));
        assert_eq!((out[3].unit_id.as_str(), out[4].unit_id.as_str()), ("A", "C"));
        assert_eq!((out[5].unit_id.as_str(), out[6].unit_id.as_str()), ("A", "B"));
    }

    #[test]
    fn test_least_expensive_top_five_ascending() {
        let out = apply_display_order(sample(), DisplayOrder::LeastExpensive);
        let prices: Vec<f64> = out.iter().map(|r| r.unit_price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 4.0, 6.0, 7.0]);
    }

    #[test]
    fn test_most_expensive_top_five_descending() {
        let out = apply_display_order(sample(), DisplayOrder::MostExpensive);
        let prices: Vec<f64> = out.iter().map(|r| r.unit_price).collect();
        assert_eq!(prices, vec![10.0, 9.0, 7.0, 6.0, 4.0]);
    }

    #[test]
    fn test_fewer_than_five_rows_returned_whole() {
        let small = vec![rec("A", 1, 3.0), rec("B", 2, 1.0)];
        let out = apply_display_order(small, DisplayOrder::LeastExpensive);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].unit_price, 1.0);
    }
}
