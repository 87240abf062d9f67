/// Order summary sheet import for group-buy periods.
///
/// This crate reads an `.xlsx` order summary workbook and produces a
/// [`pintuan_core::ImportData`]. The `calamine` dependency is confined to
/// this crate and does not bleed into `pintuan-core` or `pintuan-cli`.
///
/// # Sheet layout
///
/// | Row | Content |
/// |---|---|
/// | title | any cell containing `汇总表`; text before the marker names the period |
/// | `种类` | marker in column B; product names from column C onward |
/// | `单价` | marker in column B; unit price under each product column |
/// | `总金额` | optional header in column A; data rows start below it |
/// | data | column A order total, column B nickname, per-product quantities after |
///
/// None of the rows sit at fixed offsets; [`layout::locate`] finds them by
/// scanning. Rows sharing a nickname are merged by [`aggregate`].
pub mod aggregate;
pub mod cell;
pub mod error;
pub mod layout;
pub mod rows;
pub mod sheet;

pub use error::ParseError;
pub use pintuan_core::model::{ImportData, Order, OrderItem, ProductType};

/// Options for [`parse_import`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions<'a> {
    /// Sheet to parse. Defaults to the first sheet in the workbook.
    pub sheet_name: Option<&'a str>,
}

/// Parses an order summary workbook into an [`ImportData`].
///
/// Runs the full pipeline: decode the workbook, pick the sheet, locate the
/// layout anchors, parse the data rows, and aggregate orders by nickname.
/// The result is deterministic for identical bytes and options.
///
/// # Errors
///
/// Returns [`ParseError`] for:
/// - An undecodable payload or unknown sheet name
/// - Missing layout anchors or anchors in the wrong order
/// - Named products without a numeric unit price, or no products at all
/// - Data rows with meaningful values but no nickname
/// - Non-integer quantities
/// - No data rows, or rows that disagree on product order under one nickname
pub fn parse_import(bytes: &[u8], options: ParseOptions<'_>) -> Result<ImportData, ParseError> {
    let mut workbook = sheet::Workbook::open(bytes)?;
    let grid = workbook.grid(options.sheet_name)?;

    let layout = layout::locate(&grid)?;
    let raw_orders = rows::parse_rows(&grid, &layout)?;
    let orders = aggregate::aggregate_orders(raw_orders)?;

    let product_types = layout
        .columns
        .into_iter()
        .map(|column| ProductType {
            name: column.name,
            unit_price: column.unit_price,
        })
        .collect();

    Ok(ImportData {
        period_name: layout.period_name,
        product_types,
        orders,
    })
}
