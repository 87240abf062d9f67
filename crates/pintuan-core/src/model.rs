/// Core data model for a parsed group-buy order import.
///
/// This module defines the value types produced by the workbook parser and
/// consumed by validation and persistence: [`ProductType`], [`OrderItem`],
/// [`Order`], and [`ImportData`].
///
/// All types serialize with camelCase field names, matching the JSON shape
/// the surrounding application exchanges (`periodName`, `productTypes`,
/// `totalAmount`, ...).
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductType
// ---------------------------------------------------------------------------

/// A product offered in a purchasing period.
///
/// Extracted from one column of the summary sheet: the column's header in the
/// `种类` row supplies the name, the same column in the `单价` row supplies
/// the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    /// Product name, trimmed and non-empty.
    pub name: String,

    /// Unit price for one item of this product. Always finite.
    pub unit_price: f64,
}

// ---------------------------------------------------------------------------
// OrderItem
// ---------------------------------------------------------------------------

/// One member's quantity of one product.
///
/// `subtotal` is always derived as `quantity × unit_price`; it is never read
/// from the sheet, so a stale per-cell subtotal in the source cannot leak
/// through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Name of the ordered product. Aligns positionally with
    /// [`ImportData::product_types`].
    pub product_name: String,

    /// Unit price copied from the product column.
    pub unit_price: f64,

    /// Ordered quantity. Negative values represent returns; non-integer
    /// quantities are rejected during parsing.
    pub quantity: i64,

    /// `quantity × unit_price`.
    pub subtotal: f64,
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// A member's order for the period.
///
/// The same type serves raw per-row orders (one per data row, before
/// aggregation) and merged orders (one per distinct trimmed nickname). In
/// both forms `items` holds exactly one entry per product column, in column
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Member nickname, trimmed.
    pub nickname: String,

    /// Order total. Taken from the sheet's total column when that cell is
    /// numeric, otherwise the sum of the item subtotals.
    pub total_amount: f64,

    /// Per-product line items, aligned with the period's product types.
    pub items: Vec<OrderItem>,
}

// ---------------------------------------------------------------------------
// ImportData
// ---------------------------------------------------------------------------

/// The complete result of parsing one order summary sheet.
///
/// Immutable once produced. This is the sole artifact handed to validation
/// and to the persistence boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportData {
    /// Purchasing period name, extracted from the sheet title.
    pub period_name: String,

    /// Products on offer, in sheet column order.
    pub product_types: Vec<ProductType>,

    /// Aggregated member orders, in first-seen nickname order.
    pub orders: Vec<Order>,
}
