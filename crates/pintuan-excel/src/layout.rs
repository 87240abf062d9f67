/// Locates the structural anchors of an order summary sheet.
///
/// Nothing in a summary sheet sits at a fixed offset. The sheet is
/// recognized by four anchors, each found by an independent forward scan
/// with first match winning:
///
/// 1. the title row, any cell containing `汇总表`;
/// 2. the product name row, `种类` in its second column;
/// 3. the unit price row, `单价` in its second column, strictly below the
///    product name row;
/// 4. optionally the totals header row, `总金额` in its first column, which
///    fixes where data rows begin.
use crate::cell::Cell;
use crate::error::ParseError;

/// Substring that marks the title row.
pub const TITLE_MARKER: &str = "汇总表";
/// Marker in the second column of the product name row.
pub const PRODUCT_ROW_MARKER: &str = "种类";
/// Marker in the second column of the unit price row.
pub const UNIT_PRICE_ROW_MARKER: &str = "单价";
/// Marker in the first column of the totals header row.
pub const TOTALS_HEADER_MARKER: &str = "总金额";

/// Column index holding member nicknames in data rows.
pub const NICKNAME_COLUMN: usize = 1;
/// First column index that can hold a product.
pub const FIRST_PRODUCT_COLUMN: usize = 2;

// ---------------------------------------------------------------------------
// ProductColumn / Layout
// ---------------------------------------------------------------------------

/// One product column extracted from the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductColumn {
    /// Product name from the `种类` row, trimmed and non-empty.
    pub name: String,
    /// Unit price from the `单价` row. Always finite.
    pub unit_price: f64,
    /// 0-based column index the product occupies.
    pub column_index: usize,
}

/// The located structure of a summary sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Row index of the title row.
    pub title_row: usize,
    /// Period name: the text before `汇总表` in the title cell, trimmed.
    pub period_name: String,
    /// Row index of the `种类` row.
    pub product_row: usize,
    /// Row index of the `单价` row.
    pub unit_price_row: usize,
    /// Row index of the `总金额` header row, when present.
    pub totals_header_row: Option<usize>,
    /// Index of the first data row.
    pub data_start: usize,
    /// Product columns in ascending column order.
    pub columns: Vec<ProductColumn>,
}

// ---------------------------------------------------------------------------
// locate
// ---------------------------------------------------------------------------

/// Scans a sheet grid for the summary layout.
///
/// When the totals header row is present, data rows start immediately below
/// it; otherwise they start immediately below the unit price row.
///
/// # Errors
///
/// - [`ParseError::MissingTitleRow`] / [`ParseError::MissingPeriodName`] for
///   a missing or text-free title
/// - [`ParseError::MissingProductRow`] / [`ParseError::MissingUnitPriceRow`]
///   for missing marker rows
/// - [`ParseError::InvalidLayout`] if `单价` does not come strictly after
///   `种类`
/// - [`ParseError::MissingUnitPrice`] for a named product without a numeric
///   price
/// - [`ParseError::MissingProductTypes`] if no product column survives
pub fn locate(grid: &[Vec<Cell>]) -> Result<Layout, ParseError> {
    let title_row = grid
        .iter()
        .position(|row| row.iter().any(|cell| cell.to_text().contains(TITLE_MARKER)))
        .ok_or(ParseError::MissingTitleRow)?;
    let period_name =
        extract_period_name(&grid[title_row]).ok_or(ParseError::MissingPeriodName)?;

    let product_row = find_marker_row(grid, NICKNAME_COLUMN, PRODUCT_ROW_MARKER)
        .ok_or(ParseError::MissingProductRow)?;
    let unit_price_row = find_marker_row(grid, NICKNAME_COLUMN, UNIT_PRICE_ROW_MARKER)
        .ok_or(ParseError::MissingUnitPriceRow)?;
    if unit_price_row <= product_row {
        return Err(ParseError::InvalidLayout);
    }

    let totals_header_row = find_marker_row(grid, 0, TOTALS_HEADER_MARKER);
    let data_start = match totals_header_row {
        Some(row) => row + 1,
        None => unit_price_row + 1,
    };

    let columns = product_columns(&grid[product_row], &grid[unit_price_row])?;

    Ok(Layout {
        title_row,
        period_name,
        product_row,
        unit_price_row,
        totals_header_row,
        data_start,
        columns,
    })
}

/// Takes the text before the first `汇总表` in the title cell.
fn extract_period_name(row: &[Cell]) -> Option<String> {
    let text = row
        .iter()
        .map(Cell::to_text)
        .find(|t| t.contains(TITLE_MARKER))?;
    let before = text.split(TITLE_MARKER).next().unwrap_or("");
    let trimmed = before.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// First row whose cell at `column` equals `marker` exactly (after trim).
fn find_marker_row(grid: &[Vec<Cell>], column: usize, marker: &str) -> Option<usize> {
    grid.iter()
        .position(|row| row.get(column).is_some_and(|cell| cell.to_text() == marker))
}

/// Extracts product columns from the name and price rows.
///
/// Columns whose name cell is empty are spacer columns: they are skipped
/// entirely and their price cell is never looked at.
fn product_columns(names: &[Cell], prices: &[Cell]) -> Result<Vec<ProductColumn>, ParseError> {
    let width = names.len().max(prices.len());
    let mut columns = Vec::new();

    for index in FIRST_PRODUCT_COLUMN..width {
        let name = names.get(index).map_or_else(String::new, Cell::to_text);
        if name.is_empty() {
            continue;
        }
        let unit_price = prices
            .get(index)
            .and_then(Cell::as_number)
            .ok_or_else(|| ParseError::MissingUnitPrice {
                product: name.clone(),
            })?;
        columns.push(ProductColumn {
            name,
            unit_price,
            column_index: index,
        });
    }

    if columns.is_empty() {
        return Err(ParseError::MissingProductTypes);
    }
    Ok(columns)
}
