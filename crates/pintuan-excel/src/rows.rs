/// Converts data rows into raw per-member orders.
use pintuan_core::model::{Order, OrderItem};

use crate::cell::Cell;
use crate::error::ParseError;
use crate::layout::{Layout, NICKNAME_COLUMN};

/// Parses every row from `layout.data_start` to the end of the grid.
///
/// Per row: the nickname comes from the second column as text; each product
/// column yields a quantity (integer coercion, booleans as 1/0, blanks as 0)
/// and a derived subtotal; the order total comes from the first column when
/// numeric, otherwise it is the sum of the subtotals.
///
/// A row with no nickname is skipped when it carries no meaningful data
/// (zero total, all quantities and subtotals zero). Rows past a row's
/// physical width read as empty cells.
///
/// # Errors
///
/// - [`ParseError::MissingNickname`] for a nameless row with meaningful
///   data, naming the 1-based row
/// - [`ParseError::InvalidQuantity`] for a finite non-integer quantity,
///   naming the 1-based row and the value
/// - [`ParseError::NoOrders`] when no row produces an order
pub fn parse_rows(grid: &[Vec<Cell>], layout: &Layout) -> Result<Vec<Order>, ParseError> {
    let mut orders = Vec::new();

    for (index, row) in grid.iter().enumerate().skip(layout.data_start) {
        let nickname = cell_at(row, NICKNAME_COLUMN).to_text();

        let mut items = Vec::with_capacity(layout.columns.len());
        for column in &layout.columns {
            let quantity = cell_to_quantity(cell_at(row, column.column_index), index)?;
            items.push(OrderItem {
                product_name: column.name.clone(),
                unit_price: column.unit_price,
                quantity,
                subtotal: quantity as f64 * column.unit_price,
            });
        }

        let computed_total: f64 = items.iter().map(|item| item.subtotal).sum();
        let total_amount = cell_at(row, 0).as_number().unwrap_or(computed_total);

        let meaningful = total_amount != 0.0
            || items
                .iter()
                .any(|item| item.quantity != 0 || item.subtotal != 0.0);

        if nickname.is_empty() {
            if meaningful {
                return Err(ParseError::MissingNickname { row: index + 1 });
            }
            continue;
        }

        orders.push(Order {
            nickname,
            total_amount,
            items,
        });
    }

    if orders.is_empty() {
        return Err(ParseError::NoOrders);
    }
    Ok(orders)
}

fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&Cell::Empty)
}

/// Integer coercion for quantity cells.
///
/// Booleans count as 1/0. Cells with no numeric value count as 0. A finite
/// non-integer is a hard error rather than a silent truncation.
fn cell_to_quantity(cell: &Cell, row_index: usize) -> Result<i64, ParseError> {
    if let Cell::Bool(flag) = cell {
        return Ok(i64::from(*flag));
    }
    let Some(value) = cell.as_number() else {
        return Ok(0);
    };
    if value.fract() != 0.0 {
        return Err(ParseError::InvalidQuantity {
            row: row_index + 1,
            value,
        });
    }
    Ok(value as i64)
}
