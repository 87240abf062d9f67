/// Loose cell typing and the coercion rules shared by the whole parser.
///
/// Order sheets are filled in by hand, so any cell can hold any type. All
/// reads go through [`Cell`] and its two coercions: [`Cell::as_number`] for
/// prices and totals, [`Cell::to_text`] for names and markers. Quantity
/// coercion has an extra boolean rule and lives in the row parser.
use calamine::Data;

/// A single sheet cell, reduced to the four shapes the parser cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A numeric cell. Date and time cells surface as their serial value.
    Number(f64),
    /// A text cell, trimmed. Never empty; whitespace-only text becomes
    /// [`Cell::Empty`].
    Text(String),
    /// A boolean cell.
    Bool(bool),
    /// An empty, blank, or formula-error cell.
    Empty,
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Self::Number(*i as f64),
            Data::Float(f) => Self::Number(*f),
            Data::String(s) => Self::from_text(s),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Self::from_text(s),
            Data::Error(_) | Data::Empty => Self::Empty,
        }
    }
}

impl Cell {
    fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_owned())
        }
    }

    /// Numeric coercion for price and total cells.
    ///
    /// Numbers pass through when finite. Text passes when it fully parses as
    /// a finite decimal (`"2"`, `".5"`, `"1e3"`). Booleans and empty cells
    /// yield nothing; boolean-to-quantity coercion is a row-parser rule, not
    /// a general numeric one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Bool(_) | Self::Empty => None,
        }
    }

    /// Text coercion for nickname, product name, and marker cells.
    ///
    /// Whole numbers render without a fractional part so a numeric nickname
    /// cell reads as `"123"`, not `"123.0"`. Empty cells render as `""`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(f) => {
                if *f == f.floor() && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            Self::Bool(b) => b.to_string(),
            Self::Empty => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;

    use super::*;

    // ── construction ───────────────────────────────────────────────────────

    #[test]
    fn text_cells_are_trimmed() {
        let cell = Cell::from(&Data::String("  alice  ".to_owned()));
        assert_eq!(cell, Cell::Text("alice".to_owned()));
    }

    #[test]
    fn whitespace_only_text_becomes_empty() {
        let cell = Cell::from(&Data::String("   ".to_owned()));
        assert_eq!(cell, Cell::Empty);
    }

    #[test]
    fn formula_errors_become_empty() {
        let cell = Cell::from(&Data::Error(CellErrorType::Div0));
        assert_eq!(cell, Cell::Empty);
    }

    #[test]
    fn integers_become_numbers() {
        let cell = Cell::from(&Data::Int(42));
        assert_eq!(cell, Cell::Number(42.0));
    }

    // ── as_number ──────────────────────────────────────────────────────────

    #[test]
    fn numeric_text_coerces() {
        assert_eq!(Cell::Text("2".to_owned()).as_number(), Some(2.0));
        assert_eq!(Cell::Text(".5".to_owned()).as_number(), Some(0.5));
        assert_eq!(Cell::Text("-1.25".to_owned()).as_number(), Some(-1.25));
        assert_eq!(Cell::Text("1e3".to_owned()).as_number(), Some(1000.0));
    }

    #[test]
    fn non_numeric_text_does_not_coerce() {
        assert_eq!(Cell::Text("abc".to_owned()).as_number(), None);
        assert_eq!(Cell::Text("1,000".to_owned()).as_number(), None);
        assert_eq!(Cell::Text("3 apples".to_owned()).as_number(), None);
    }

    #[test]
    fn non_finite_values_do_not_coerce() {
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert_eq!(Cell::Number(f64::INFINITY).as_number(), None);
        assert_eq!(Cell::Text("inf".to_owned()).as_number(), None);
        assert_eq!(Cell::Text("NaN".to_owned()).as_number(), None);
    }

    #[test]
    fn booleans_and_empty_do_not_coerce() {
        assert_eq!(Cell::Bool(true).as_number(), None);
        assert_eq!(Cell::Bool(false).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    // ── to_text ────────────────────────────────────────────────────────────

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(5.0).to_text(), "5");
        assert_eq!(Cell::Number(-3.0).to_text(), "-3");
    }

    #[test]
    fn fractional_numbers_render_as_is() {
        assert_eq!(Cell::Number(1.5).to_text(), "1.5");
    }

    #[test]
    fn booleans_render_lowercase() {
        assert_eq!(Cell::Bool(true).to_text(), "true");
        assert_eq!(Cell::Bool(false).to_text(), "false");
    }

    #[test]
    fn empty_renders_as_empty_string() {
        assert_eq!(Cell::Empty.to_text(), "");
    }
}
