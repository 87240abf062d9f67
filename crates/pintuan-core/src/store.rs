/// Persistence boundary for validated import data.
///
/// The application persists an import as four relational tables: periods,
/// product types, member orders, and order items. This module captures that
/// contract as the [`ImportStore`] trait, orchestrates one full import via
/// [`import_into`], and ships [`MemoryStore`] as the reference
/// implementation used by tests and dry runs.
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ImportData;
use crate::validation::{ValidationError, validate_import};

// ---------------------------------------------------------------------------
// ImportStore
// ---------------------------------------------------------------------------

/// Storage operations required to persist one import.
///
/// Every operation is an upsert keyed by a natural key; re-running an import
/// against the same store must converge instead of duplicating rows.
/// Implementations backed by a real database are expected to run all writes
/// of one import inside a single transaction; [`import_into`] performs no
/// rollback of its own.
pub trait ImportStore {
    /// Failure type for store operations.
    type Error: std::error::Error;

    /// Upserts a purchasing period keyed by `name` and returns its id.
    ///
    /// An existing period is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    fn upsert_period(&mut self, name: &str) -> Result<i64, Self::Error>;

    /// Upserts a product type keyed by `(period_id, name)` and returns its id.
    ///
    /// An existing row has its unit price replaced.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    fn upsert_product_type(
        &mut self,
        period_id: i64,
        name: &str,
        unit_price: f64,
    ) -> Result<i64, Self::Error>;

    /// Upserts a member order keyed by `(period_id, nickname)` and returns
    /// its id.
    ///
    /// An existing row has its total amount replaced.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    fn upsert_order(
        &mut self,
        period_id: i64,
        nickname: &str,
        total_amount: f64,
    ) -> Result<i64, Self::Error>;

    /// Upserts an order item keyed by `(order_id, product_type_id)`.
    ///
    /// An existing row has its quantity and subtotal replaced.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    fn upsert_order_item(
        &mut self,
        order_id: i64,
        product_type_id: i64,
        quantity: i64,
        subtotal: f64,
    ) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// PersistError
// ---------------------------------------------------------------------------

/// Errors produced while persisting an import through an [`ImportStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum PersistError<E> {
    /// The data failed [`validate_import`]; nothing was written.
    Validation(ValidationError),
    /// An order item referenced a product name absent from the period's
    /// product types.
    UnknownProduct {
        /// The unmatched product name, trimmed.
        product: String,
    },
    /// The underlying store rejected a write.
    Store(E),
}

impl<E: fmt::Display> fmt::Display for PersistError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnknownProduct { product } => {
                write!(f, "unknown product type: {product:?}")
            }
            Self::Store(err) => write!(f, "store operation failed: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for PersistError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UnknownProduct { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

// ---------------------------------------------------------------------------
// ImportSummary / import_into
// ---------------------------------------------------------------------------

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Id of the upserted period.
    pub period_id: i64,
    /// Period name, trimmed.
    pub period_name: String,
    /// Number of member orders written.
    pub total_orders: usize,
    /// Sum of all order totals.
    pub total_amount: f64,
}

/// Persists one parsed import through `store`.
///
/// Validates the data first, then upserts the period, its product types
/// (building a name-to-id map), each order, and each order's items. Strings
/// are trimmed before they reach the store, so lookups and natural keys are
/// whitespace-insensitive.
///
/// # Errors
///
/// - [`PersistError::Validation`] if the data violates the import contract;
///   the store is not touched.
/// - [`PersistError::UnknownProduct`] if an item names a product missing
///   from `product_types`. Parser output cannot trigger this; hand-built
///   data can.
/// - [`PersistError::Store`] if any store operation fails. Writes already
///   issued are not rolled back here; transactional stores handle that
///   themselves.
pub fn import_into<S: ImportStore>(
    store: &mut S,
    data: &ImportData,
) -> Result<ImportSummary, PersistError<S::Error>> {
    validate_import(data).map_err(PersistError::Validation)?;

    let period_name = data.period_name.trim();
    let period_id = store.upsert_period(period_name).map_err(PersistError::Store)?;

    let mut product_ids: HashMap<String, i64> = HashMap::new();
    for product in &data.product_types {
        let name = product.name.trim();
        let id = store
            .upsert_product_type(period_id, name, product.unit_price)
            .map_err(PersistError::Store)?;
        product_ids.insert(name.to_owned(), id);
    }

    let mut total_amount = 0.0;
    for order in &data.orders {
        let order_id = store
            .upsert_order(period_id, order.nickname.trim(), order.total_amount)
            .map_err(PersistError::Store)?;
        total_amount += order.total_amount;

        for item in &order.items {
            let product_name = item.product_name.trim();
            let product_type_id =
                *product_ids
                    .get(product_name)
                    .ok_or_else(|| PersistError::UnknownProduct {
                        product: product_name.to_owned(),
                    })?;
            store
                .upsert_order_item(order_id, product_type_id, item.quantity, item.subtotal)
                .map_err(PersistError::Store)?;
        }
    }

    Ok(ImportSummary {
        period_id,
        period_name: period_name.to_owned(),
        total_orders: data.orders.len(),
        total_amount,
    })
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A stored purchasing period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRow {
    /// Surrogate id.
    pub id: i64,
    /// Period name (natural key).
    pub name: String,
}

/// A stored product type.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTypeRow {
    /// Surrogate id.
    pub id: i64,
    /// Owning period.
    pub period_id: i64,
    /// Product name (natural key within the period).
    pub name: String,
    /// Current unit price.
    pub unit_price: f64,
}

/// A stored member order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    /// Surrogate id.
    pub id: i64,
    /// Owning period.
    pub period_id: i64,
    /// Member nickname (natural key within the period).
    pub nickname: String,
    /// Current order total.
    pub total_amount: f64,
}

/// A stored order item, keyed by `(order_id, product_type_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRow {
    /// Owning order.
    pub order_id: i64,
    /// Ordered product.
    pub product_type_id: i64,
    /// Current quantity.
    pub quantity: i64,
    /// Current subtotal.
    pub subtotal: f64,
}

/// In-memory [`ImportStore`] with the same natural-key upsert semantics a
/// relational backend provides.
///
/// Ids are sequential and shared across tables, starting at 1. Since the
/// whole store lives in one address space, every import is trivially atomic
/// and `Error` is [`Infallible`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    periods: Vec<PeriodRow>,
    product_types: Vec<ProductTypeRow>,
    orders: Vec<OrderRow>,
    order_items: Vec<OrderItemRow>,
    next_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored periods, in insertion order.
    pub fn periods(&self) -> &[PeriodRow] {
        &self.periods
    }

    /// All stored product types, in insertion order.
    pub fn product_types(&self) -> &[ProductTypeRow] {
        &self.product_types
    }

    /// All stored orders, in insertion order.
    pub fn orders(&self) -> &[OrderRow] {
        &self.orders
    }

    /// All stored order items, in insertion order.
    pub fn order_items(&self) -> &[OrderItemRow] {
        &self.order_items
    }

    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ImportStore for MemoryStore {
    type Error = Infallible;

    fn upsert_period(&mut self, name: &str) -> Result<i64, Self::Error> {
        if let Some(row) = self.periods.iter().find(|p| p.name == name) {
            return Ok(row.id);
        }
        let id = self.alloc_id();
        self.periods.push(PeriodRow {
            id,
            name: name.to_owned(),
        });
        Ok(id)
    }

    fn upsert_product_type(
        &mut self,
        period_id: i64,
        name: &str,
        unit_price: f64,
    ) -> Result<i64, Self::Error> {
        if let Some(row) = self
            .product_types
            .iter_mut()
            .find(|p| p.period_id == period_id && p.name == name)
        {
            row.unit_price = unit_price;
            return Ok(row.id);
        }
        let id = self.alloc_id();
        self.product_types.push(ProductTypeRow {
            id,
            period_id,
            name: name.to_owned(),
            unit_price,
        });
        Ok(id)
    }

    fn upsert_order(
        &mut self,
        period_id: i64,
        nickname: &str,
        total_amount: f64,
    ) -> Result<i64, Self::Error> {
        if let Some(row) = self
            .orders
            .iter_mut()
            .find(|o| o.period_id == period_id && o.nickname == nickname)
        {
            row.total_amount = total_amount;
            return Ok(row.id);
        }
        let id = self.alloc_id();
        self.orders.push(OrderRow {
            id,
            period_id,
            nickname: nickname.to_owned(),
            total_amount,
        });
        Ok(id)
    }

    fn upsert_order_item(
        &mut self,
        order_id: i64,
        product_type_id: i64,
        quantity: i64,
        subtotal: f64,
    ) -> Result<(), Self::Error> {
        if let Some(row) = self
            .order_items
            .iter_mut()
            .find(|i| i.order_id == order_id && i.product_type_id == product_type_id)
        {
            row.quantity = quantity;
            row.subtotal = subtotal;
            return Ok(());
        }
        self.order_items.push(OrderItemRow {
            order_id,
            product_type_id,
            quantity,
            subtotal,
        });
        Ok(())
    }
}
