/// Workbook adapter: decodes `.xlsx` bytes into cell grids.
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};

use crate::cell::Cell;
use crate::error::ParseError;

/// An open workbook ready to yield sheet grids.
///
/// Row and column indices in a grid are relative to the sheet's used range,
/// which is how the rest of the parser addresses cells.
pub struct Workbook<'a> {
    inner: Xlsx<Cursor<&'a [u8]>>,
    sheet_names: Vec<String>,
}

impl std::fmt::Debug for Workbook<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `Xlsx` has no `Debug` impl, so only the sheet names are shown.
        f.debug_struct("Workbook")
            .field("sheet_names", &self.sheet_names)
            .finish_non_exhaustive()
    }
}

impl<'a> Workbook<'a> {
    /// Opens a workbook from an in-memory `.xlsx` payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::WorkbookRead`] when the payload cannot be
    /// decoded as a workbook.
    pub fn open(bytes: &'a [u8]) -> Result<Self, ParseError> {
        let inner: Xlsx<Cursor<&'a [u8]>> = open_workbook_from_rs(Cursor::new(bytes)).map_err(
            |e: calamine::XlsxError| ParseError::WorkbookRead {
                detail: e.to_string(),
            },
        )?;
        let sheet_names = inner.sheet_names().clone();
        Ok(Self { inner, sheet_names })
    }

    /// Sheet names in document order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Reads one sheet into a grid of typed cells.
    ///
    /// With `None`, the first sheet in document order is used.
    ///
    /// # Errors
    ///
    /// - [`ParseError::EmptyWorkbook`] if no sheet name was given and the
    ///   workbook has no sheets
    /// - [`ParseError::MissingSheet`] if the named sheet is not present
    /// - [`ParseError::WorkbookRead`] if the sheet fails to decode
    pub fn grid(&mut self, sheet_name: Option<&str>) -> Result<Vec<Vec<Cell>>, ParseError> {
        let name: &str = match sheet_name {
            Some(name) => {
                if !self.sheet_names.iter().any(|s| s == name) {
                    return Err(ParseError::MissingSheet {
                        sheet: name.to_owned(),
                    });
                }
                name
            }
            None => self
                .sheet_names
                .first()
                .map(String::as_str)
                .ok_or(ParseError::EmptyWorkbook)?,
        };

        let range: Range<Data> =
            self.inner
                .worksheet_range(name)
                .map_err(|e| ParseError::WorkbookRead {
                    detail: format!("failed to read sheet {name:?}: {e}"),
                })?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(Cell::from).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn garbage_bytes_fail_with_workbook_read() {
        let err = Workbook::open(b"definitely not a workbook").expect_err("garbage payload");
        assert!(matches!(err, ParseError::WorkbookRead { .. }), "got {err:?}");
        assert_eq!(err.code(), "INVALID_WORKBOOK");
    }

    #[test]
    fn empty_payload_fails_with_workbook_read() {
        let err = Workbook::open(b"").expect_err("empty payload");
        assert_eq!(err.code(), "INVALID_WORKBOOK");
    }
}
