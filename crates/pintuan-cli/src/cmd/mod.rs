/// Command module for the `pintuan` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the input bytes and the relevant flags and returns `Ok(())`
/// on success or a [`crate::error::CliError`] on failure.
pub mod check;
pub mod convert;
pub mod inspect;

use pintuan_excel::ParseError;

use crate::error::CliError;

/// Maps a sheet parsing error to a [`CliError`].
///
/// A workbook that cannot be opened at all is an input failure (exit code 2).
/// Every other parse error means the workbook was readable but the order
/// sheet inside it is malformed, which is a logical failure (exit code 1)
/// carrying the stable machine-readable code.
pub fn parse_error_to_cli(err: ParseError) -> CliError {
    match err {
        ParseError::WorkbookRead { detail } => CliError::WorkbookUnreadable { detail },
        ParseError::EmptyWorkbook
        | ParseError::MissingSheet { .. }
        | ParseError::MissingTitleRow
        | ParseError::MissingPeriodName
        | ParseError::MissingProductRow
        | ParseError::MissingUnitPriceRow
        | ParseError::InvalidLayout
        | ParseError::MissingUnitPrice { .. }
        | ParseError::MissingProductTypes
        | ParseError::MissingNickname { .. }
        | ParseError::InvalidQuantity { .. }
        | ParseError::NoOrders
        | ParseError::ProductMismatch { .. } => CliError::ParseFailed {
            code: err.code(),
            detail: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use super::*;

    #[test]
    fn workbook_read_maps_to_exit_2() {
        let err = parse_error_to_cli(ParseError::WorkbookRead {
            detail: "zip header not found".to_owned(),
        });
        assert_eq!(err.exit_code(), 2);
        match err {
            CliError::WorkbookUnreadable { detail } => {
                assert!(detail.contains("zip header"), "detail: {detail}");
            }
            other => panic!("expected WorkbookUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn layout_errors_map_to_exit_1_with_code() {
        let err = parse_error_to_cli(ParseError::MissingTitleRow);
        assert_eq!(err.exit_code(), 1);
        match err {
            CliError::ParseFailed { code, .. } => assert_eq!(code, "MISSING_TITLE_ROW"),
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn row_errors_keep_their_detail() {
        let err = parse_error_to_cli(ParseError::InvalidQuantity { row: 5, value: 1.5 });
        match err {
            CliError::ParseFailed { code, detail } => {
                assert_eq!(code, "INVALID_QUANTITY");
                assert!(detail.contains("1.5"), "detail: {detail}");
                assert!(detail.contains("row 5"), "detail: {detail}");
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }
}
