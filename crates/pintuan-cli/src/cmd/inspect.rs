//! Implementation of `pintuan inspect <file>`.
//!
//! Opens a workbook, locates the summary layout, and prints statistics to
//! stdout without extracting any orders:
//! - resolved sheet name and workbook sheet count
//! - period name from the title row
//! - 1-based positions of the anchor rows
//! - data row and product column counts
//! - the product catalogue with unit prices
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
//!
//! Exit codes: 0 = success, 1 = malformed sheet, 2 = unreadable workbook.
use pintuan_excel::ParseError;
use pintuan_excel::cell::Cell;
use pintuan_excel::layout::Layout;
use pintuan_excel::sheet::Workbook;

use super::parse_error_to_cli;
use crate::OutputFormat;
use crate::error::CliError;

/// Statistics gathered from a located sheet layout.
pub struct InspectStats {
    /// Resolved worksheet name.
    pub sheet: String,
    /// Number of worksheets in the workbook.
    pub sheet_count: usize,
    /// Period name extracted from the title row.
    pub period_name: String,
    /// Total number of rows in the sheet grid.
    pub row_count: usize,
    /// 1-based row number of the title row.
    pub title_row: usize,
    /// 1-based row number of the `种类` row.
    pub product_row: usize,
    /// 1-based row number of the `单价` row.
    pub unit_price_row: usize,
    /// 1-based row number of the `总金额` header row, when present.
    pub totals_header_row: Option<usize>,
    /// Number of rows in the data region.
    pub data_row_count: usize,
    /// Product names with their unit prices, in column order.
    pub products: Vec<(String, f64)>,
}

impl InspectStats {
    /// Computes statistics from a sheet grid and its located layout.
    pub fn from_parts(
        sheet: String,
        sheet_count: usize,
        grid: &[Vec<Cell>],
        layout: &Layout,
    ) -> Self {
        let products = layout
            .columns
            .iter()
            .map(|column| (column.name.clone(), column.unit_price))
            .collect();

        Self {
            sheet,
            sheet_count,
            period_name: layout.period_name.clone(),
            row_count: grid.len(),
            title_row: layout.title_row + 1,
            product_row: layout.product_row + 1,
            unit_price_row: layout.unit_price_row + 1,
            totals_header_row: layout.totals_header_row.map(|row| row + 1),
            data_row_count: grid.len().saturating_sub(layout.data_start),
            products,
        }
    }
}

/// Runs the `inspect` command.
///
/// Opens `bytes` as a workbook, locates the summary layout on the requested
/// sheet, and writes statistics to stdout in the requested format.
///
/// # Errors
///
/// - [`CliError::WorkbookUnreadable`] (exit code 2) if the bytes are not a
///   workbook.
/// - [`CliError::ParseFailed`] (exit code 1) if the layout cannot be located.
pub fn run(bytes: &[u8], sheet: Option<&str>, format: &OutputFormat) -> Result<(), CliError> {
    let mut workbook = Workbook::open(bytes).map_err(parse_error_to_cli)?;
    let sheet_count = workbook.sheet_names().len();

    let resolved = match sheet {
        Some(name) => name.to_owned(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| parse_error_to_cli(ParseError::EmptyWorkbook))?,
    };

    let grid = workbook.grid(Some(&resolved)).map_err(parse_error_to_cli)?;
    let layout = pintuan_excel::layout::locate(&grid).map_err(parse_error_to_cli)?;
    let stats = InspectStats::from_parts(resolved, sheet_count, &grid, &layout);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => print_json(&mut out, &stats),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Writes inspect statistics in human-readable aligned format.
fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "sheet:          {}", stats.sheet)?;
    writeln!(w, "sheets:         {}", stats.sheet_count)?;
    writeln!(w, "period:         {}", stats.period_name)?;
    writeln!(w, "rows:           {}", stats.row_count)?;
    writeln!(w, "title_row:      {}", stats.title_row)?;
    writeln!(w, "product_row:    {}", stats.product_row)?;
    writeln!(w, "price_row:      {}", stats.unit_price_row)?;
    if let Some(row) = stats.totals_header_row {
        writeln!(w, "totals_row:     {row}")?;
    }
    writeln!(w, "data_rows:      {}", stats.data_row_count)?;
    writeln!(w, "products:       {}", stats.products.len())?;
    for (name, price) in &stats.products {
        writeln!(w, "  {name}: {price}")?;
    }
    Ok(())
}

/// Writes inspect statistics as a single JSON object to stdout.
fn print_json<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    let mut obj = serde_json::Map::new();

    obj.insert(
        "sheet".to_owned(),
        serde_json::Value::String(stats.sheet.clone()),
    );
    obj.insert(
        "sheet_count".to_owned(),
        serde_json::Value::Number(stats.sheet_count.into()),
    );
    obj.insert(
        "period_name".to_owned(),
        serde_json::Value::String(stats.period_name.clone()),
    );
    obj.insert(
        "row_count".to_owned(),
        serde_json::Value::Number(stats.row_count.into()),
    );
    obj.insert(
        "title_row".to_owned(),
        serde_json::Value::Number(stats.title_row.into()),
    );
    obj.insert(
        "product_row".to_owned(),
        serde_json::Value::Number(stats.product_row.into()),
    );
    obj.insert(
        "unit_price_row".to_owned(),
        serde_json::Value::Number(stats.unit_price_row.into()),
    );
    if let Some(row) = stats.totals_header_row {
        obj.insert(
            "totals_header_row".to_owned(),
            serde_json::Value::Number(row.into()),
        );
    }
    obj.insert(
        "data_row_count".to_owned(),
        serde_json::Value::Number(stats.data_row_count.into()),
    );
    obj.insert(
        "product_count".to_owned(),
        serde_json::Value::Number(stats.products.len().into()),
    );

    let products: Vec<serde_json::Value> = stats
        .products
        .iter()
        .map(|(name, price)| {
            let mut product = serde_json::Map::new();
            product.insert(
                "name".to_owned(),
                serde_json::Value::String(name.clone()),
            );
            product.insert(
                "unit_price".to_owned(),
                serde_json::Number::from_f64(*price)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number),
            );
            serde_json::Value::Object(product)
        })
        .collect();
    obj.insert("products".to_owned(), serde_json::Value::Array(products));

    let json = serde_json::to_string_pretty(&serde_json::Value::Object(obj))
        .map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
