/// Merges raw per-row orders by trimmed nickname.
use std::collections::HashMap;

use pintuan_core::model::Order;

use crate::error::ParseError;

/// Folds raw orders into one order per distinct trimmed nickname.
///
/// Output preserves first-seen nickname order; it is never re-sorted. The
/// first row for a nickname becomes the accumulator (with the trimmed
/// nickname). Every later row for the same nickname adds its total, then
/// merges item by item against the accumulator's positions: quantities add
/// up and subtotals are recomputed from the accumulated quantity, while the
/// unit price stays as first seen. An incoming row with fewer items than the
/// accumulator leaves the missing positions untouched; extra trailing items
/// are ignored.
///
/// Rows whose nickname trims to empty are dropped.
///
/// # Errors
///
/// Returns [`ParseError::ProductMismatch`] when an incoming item's product
/// name differs from the accumulator's at the same position.
pub fn aggregate_orders(orders: Vec<Order>) -> Result<Vec<Order>, ParseError> {
    let mut merged: Vec<Order> = Vec::new();
    let mut index_by_nickname: HashMap<String, usize> = HashMap::new();

    for order in orders {
        let nickname = order.nickname.trim().to_owned();
        if nickname.is_empty() {
            continue;
        }

        match index_by_nickname.get(&nickname) {
            None => {
                index_by_nickname.insert(nickname.clone(), merged.len());
                merged.push(Order { nickname, ..order });
            }
            Some(&slot) => {
                let existing = &mut merged[slot];
                existing.total_amount += order.total_amount;
                for (i, item) in existing.items.iter_mut().enumerate() {
                    let Some(incoming) = order.items.get(i) else {
                        continue;
                    };
                    if incoming.product_name != item.product_name {
                        return Err(ParseError::ProductMismatch { nickname });
                    }
                    item.quantity += incoming.quantity;
                    item.subtotal = item.quantity as f64 * item.unit_price;
                }
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use pintuan_core::model::OrderItem;

    use super::*;

    fn item(name: &str, price: f64, quantity: i64) -> OrderItem {
        OrderItem {
            product_name: name.to_owned(),
            unit_price: price,
            quantity,
            subtotal: quantity as f64 * price,
        }
    }

    fn order(nickname: &str, total: f64, items: Vec<OrderItem>) -> Order {
        Order {
            nickname: nickname.to_owned(),
            total_amount: total,
            items,
        }
    }

    #[test]
    fn distinct_nicknames_pass_through_in_order() {
        let raw = vec![
            order("bob", 2.5, vec![item("A", 5.0, 1)]),
            order("alice", 5.0, vec![item("A", 5.0, 1)]),
        ];
        let merged = aggregate_orders(raw).expect("no duplicates");
        let names: Vec<&str> = merged.iter().map(|o| o.nickname.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
    }

    #[test]
    fn duplicate_rows_merge_quantities_totals_and_subtotals() {
        let raw = vec![
            order("alice", 5.0, vec![item("A", 5.0, 1), item("B", 2.5, 0)]),
            order("alice", 7.5, vec![item("A", 5.0, 0), item("B", 2.5, 3)]),
        ];
        let merged = aggregate_orders(raw).expect("same nickname");

        assert_eq!(merged.len(), 1);
        let alice = &merged[0];
        assert_eq!(alice.total_amount, 12.5);
        assert_eq!(alice.items[0].quantity, 1);
        assert_eq!(alice.items[0].subtotal, 5.0);
        assert_eq!(alice.items[1].quantity, 3);
        assert_eq!(alice.items[1].subtotal, 7.5);
    }

    #[test]
    fn subtotals_are_recomputed_not_summed() {
        // Incoming subtotals are ignored; only quantities accumulate.
        let mut second = order("alice", 0.0, vec![item("A", 5.0, 2)]);
        second.items[0].subtotal = 999.0;
        let raw = vec![order("alice", 5.0, vec![item("A", 5.0, 1)]), second];

        let merged = aggregate_orders(raw).expect("merge");
        assert_eq!(merged[0].items[0].quantity, 3);
        assert_eq!(merged[0].items[0].subtotal, 15.0);
    }

    #[test]
    fn nicknames_merge_after_trimming() {
        let raw = vec![
            order(" alice ", 5.0, vec![item("A", 5.0, 1)]),
            order("alice", 5.0, vec![item("A", 5.0, 1)]),
        ];
        let merged = aggregate_orders(raw).expect("trimmed merge");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].nickname, "alice");
        assert_eq!(merged[0].total_amount, 10.0);
        assert_eq!(merged[0].items[0].quantity, 2);
    }

    #[test]
    fn whitespace_nicknames_are_dropped() {
        let raw = vec![
            order("  ", 5.0, vec![item("A", 5.0, 1)]),
            order("alice", 5.0, vec![item("A", 5.0, 1)]),
        ];
        let merged = aggregate_orders(raw).expect("blank nickname dropped");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].nickname, "alice");
    }

    #[test]
    fn conflicting_product_positions_fail() {
        let raw = vec![
            order("alice", 1.0, vec![item("A", 1.0, 1)]),
            order("alice", 1.0, vec![item("B", 1.0, 1)]),
        ];
        let err = aggregate_orders(raw).expect_err("misaligned products");
        assert_eq!(
            err,
            ParseError::ProductMismatch {
                nickname: "alice".to_owned()
            }
        );
    }

    #[test]
    fn shorter_incoming_rows_leave_missing_positions_untouched() {
        let raw = vec![
            order("alice", 7.5, vec![item("A", 5.0, 1), item("B", 2.5, 1)]),
            order("alice", 5.0, vec![item("A", 5.0, 1)]),
        ];
        let merged = aggregate_orders(raw).expect("shorter incoming row");
        assert_eq!(merged[0].total_amount, 12.5);
        assert_eq!(merged[0].items[0].quantity, 2);
        assert_eq!(merged[0].items[1].quantity, 1);
        assert_eq!(merged[0].items[1].subtotal, 2.5);
    }

    #[test]
    fn longer_incoming_rows_ignore_extra_items() {
        let raw = vec![
            order("alice", 5.0, vec![item("A", 5.0, 1)]),
            order("alice", 7.5, vec![item("A", 5.0, 1), item("B", 2.5, 1)]),
        ];
        let merged = aggregate_orders(raw).expect("longer incoming row");
        assert_eq!(merged[0].items.len(), 1);
        assert_eq!(merged[0].items[0].quantity, 2);
        assert_eq!(merged[0].total_amount, 12.5);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let merged = aggregate_orders(Vec::new()).expect("empty input");
        assert!(merged.is_empty());
    }
}
