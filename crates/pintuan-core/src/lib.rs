#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod model;
pub mod store;
pub mod validation;

pub use model::{ImportData, Order, OrderItem, ProductType};
pub use store::{
    ImportStore, ImportSummary, MemoryStore, OrderItemRow, OrderRow, PeriodRow, PersistError,
    ProductTypeRow, import_into,
};
pub use validation::{ValidationError, ValidationIssue, validate_import};

/// Returns the current version of the pintuan-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
