/// Errors produced while parsing an order summary workbook.
use thiserror::Error;

/// All error conditions the workbook parser can report.
///
/// Every variant maps to a stable machine-readable code via
/// [`ParseError::code`]; the application layer keys on the code, so codes
/// never change. The `Display` messages are advisory and may be reworded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The workbook contains no sheets at all.
    #[error("workbook has no sheets")]
    EmptyWorkbook,

    /// The requested sheet is not present in the workbook.
    #[error("missing sheet {sheet:?}")]
    MissingSheet {
        /// The requested sheet name.
        sheet: String,
    },

    /// No row contains the title marker `汇总表`.
    #[error("cannot find title row containing \"汇总表\"")]
    MissingTitleRow,

    /// The title cell has no text before the `汇总表` marker.
    #[error("cannot extract period name from title row")]
    MissingPeriodName,

    /// No row carries the `种类` marker in its second column.
    #[error("cannot find product row containing \"种类\"")]
    MissingProductRow,

    /// No row carries the `单价` marker in its second column.
    #[error("cannot find unit price row containing \"单价\"")]
    MissingUnitPriceRow,

    /// The `单价` row appears at or before the `种类` row.
    #[error("\"单价\" row must appear after \"种类\" row")]
    InvalidLayout,

    /// A named product column has no numeric unit price beneath it.
    #[error("missing unit price for product {product:?}")]
    MissingUnitPrice {
        /// The product whose price cell is blank or non-numeric.
        product: String,
    },

    /// The product row names no products at all.
    #[error("no product types found")]
    MissingProductTypes,

    /// A data row carries meaningful values but no nickname.
    #[error("missing nickname at row {row}")]
    MissingNickname {
        /// 1-based row number in the parsed grid.
        row: usize,
    },

    /// A quantity cell holds a finite non-integer number.
    #[error("invalid quantity {value} at row {row}")]
    InvalidQuantity {
        /// 1-based row number in the parsed grid.
        row: usize,
        /// The rejected value.
        value: f64,
    },

    /// No data row produced an order.
    #[error("no orders found")]
    NoOrders,

    /// Rows merged under one nickname disagree on product order.
    #[error("product mismatch while merging nickname {nickname:?}")]
    ProductMismatch {
        /// The nickname whose rows conflict.
        nickname: String,
    },

    /// The payload could not be decoded as a workbook.
    #[error("cannot read workbook: {detail}")]
    WorkbookRead {
        /// Decoder failure description.
        detail: String,
    },
}

impl ParseError {
    /// Returns the stable machine-readable code for this error.
    ///
    /// Both sheet-selection failures share `MISSING_SHEET`; an undecodable
    /// payload reports `INVALID_WORKBOOK`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyWorkbook | Self::MissingSheet { .. } => "MISSING_SHEET",
            Self::MissingTitleRow => "MISSING_TITLE_ROW",
            Self::MissingPeriodName => "MISSING_PERIOD_NAME",
            Self::MissingProductRow => "MISSING_PRODUCT_ROW",
            Self::MissingUnitPriceRow => "MISSING_UNIT_PRICE_ROW",
            Self::InvalidLayout => "INVALID_LAYOUT",
            Self::MissingUnitPrice { .. } => "MISSING_UNIT_PRICE",
            Self::MissingProductTypes => "MISSING_PRODUCT_TYPES",
            Self::MissingNickname { .. } => "MISSING_NICKNAME",
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::NoOrders => "NO_ORDERS",
            Self::ProductMismatch { .. } => "PRODUCT_MISMATCH",
            Self::WorkbookRead { .. } => "INVALID_WORKBOOK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let cases: Vec<(ParseError, &str)> = vec![
            (ParseError::EmptyWorkbook, "MISSING_SHEET"),
            (
                ParseError::MissingSheet {
                    sheet: "不存在".to_owned(),
                },
                "MISSING_SHEET",
            ),
            (ParseError::MissingTitleRow, "MISSING_TITLE_ROW"),
            (ParseError::MissingPeriodName, "MISSING_PERIOD_NAME"),
            (ParseError::MissingProductRow, "MISSING_PRODUCT_ROW"),
            (ParseError::MissingUnitPriceRow, "MISSING_UNIT_PRICE_ROW"),
            (ParseError::InvalidLayout, "INVALID_LAYOUT"),
            (
                ParseError::MissingUnitPrice {
                    product: "A".to_owned(),
                },
                "MISSING_UNIT_PRICE",
            ),
            (ParseError::MissingProductTypes, "MISSING_PRODUCT_TYPES"),
            (ParseError::MissingNickname { row: 5 }, "MISSING_NICKNAME"),
            (
                ParseError::InvalidQuantity { row: 5, value: 1.5 },
                "INVALID_QUANTITY",
            ),
            (ParseError::NoOrders, "NO_ORDERS"),
            (
                ParseError::ProductMismatch {
                    nickname: "alice".to_owned(),
                },
                "PRODUCT_MISMATCH",
            ),
            (
                ParseError::WorkbookRead {
                    detail: "zip: bad header".to_owned(),
                },
                "INVALID_WORKBOOK",
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code, "for {err:?}");
        }
    }

    #[test]
    fn messages_name_the_offender() {
        let msg = ParseError::MissingUnitPrice {
            product: "奶茶".to_owned(),
        }
        .to_string();
        assert!(msg.contains("奶茶"), "message: {msg}");

        let msg = ParseError::MissingNickname { row: 7 }.to_string();
        assert!(msg.contains("row 7"), "message: {msg}");

        let msg = ParseError::InvalidQuantity { row: 3, value: 1.5 }.to_string();
        assert!(msg.contains("1.5"), "message: {msg}");
        assert!(msg.contains("row 3"), "message: {msg}");

        let msg = ParseError::ProductMismatch {
            nickname: "alice".to_owned(),
        }
        .to_string();
        assert!(msg.contains("alice"), "message: {msg}");
    }

    #[test]
    fn sheet_variants_have_distinct_messages() {
        let empty = ParseError::EmptyWorkbook.to_string();
        let named = ParseError::MissingSheet {
            sheet: "汇总表".to_owned(),
        }
        .to_string();
        assert_ne!(empty, named);
        assert!(named.contains("汇总表"), "message: {named}");
    }
}
