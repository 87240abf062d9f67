/// Structural validation of parsed import data.
///
/// The parser already enforces most constraints while building an
/// [`ImportData`]; this module re-checks the finished value at the
/// persistence boundary so hand-built or deserialized data gets the same
/// guarantees as parsed data. All violations are collected into one
/// [`ValidationError`] rather than stopping at the first.
use std::fmt;

use serde::Serialize;

use crate::model::ImportData;

// ---------------------------------------------------------------------------
// ValidationIssue / ValidationError
// ---------------------------------------------------------------------------

/// A single validation finding, located by a field path.
///
/// Paths use the serialized (camelCase) field names with bracketed indices,
/// e.g. `orders[1].items[0].productName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path to the offending field.
    pub path: String,
    /// What the field failed to satisfy.
    pub message: String,
}

/// The full set of findings for an invalid [`ImportData`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Every violation found, in document order.
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.issues.len();
        let plural = if n == 1 { "" } else { "s" };
        write!(f, "invalid import data ({n} issue{plural})")?;
        for issue in &self.issues {
            write!(f, "; {}: {}", issue.path, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// validate_import
// ---------------------------------------------------------------------------

/// Checks an [`ImportData`] against the import contract.
///
/// Rules:
/// - `periodName` is non-empty after trimming;
/// - `productTypes` is non-empty; every name is non-empty after trimming and
///   every unit price is finite;
/// - `orders` is non-empty; every nickname is non-empty after trimming,
///   every total is finite, and every order has at least one item;
/// - every item has a non-empty trimmed product name, a finite unit price,
///   and a finite subtotal.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated rule with its field
/// path.
pub fn validate_import(data: &ImportData) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    require_non_empty(&mut issues, "periodName", &data.period_name);

    if data.product_types.is_empty() {
        require_entries(&mut issues, "productTypes");
    }
    for (i, product) in data.product_types.iter().enumerate() {
        require_non_empty(&mut issues, &format!("productTypes[{i}].name"), &product.name);
        require_finite(
            &mut issues,
            &format!("productTypes[{i}].unitPrice"),
            product.unit_price,
        );
    }

    if data.orders.is_empty() {
        require_entries(&mut issues, "orders");
    }
    for (i, order) in data.orders.iter().enumerate() {
        require_non_empty(&mut issues, &format!("orders[{i}].nickname"), &order.nickname);
        require_finite(
            &mut issues,
            &format!("orders[{i}].totalAmount"),
            order.total_amount,
        );
        if order.items.is_empty() {
            require_entries(&mut issues, &format!("orders[{i}].items"));
        }
        for (j, item) in order.items.iter().enumerate() {
            require_non_empty(
                &mut issues,
                &format!("orders[{i}].items[{j}].productName"),
                &item.product_name,
            );
            require_finite(
                &mut issues,
                &format!("orders[{i}].items[{j}].unitPrice"),
                item.unit_price,
            );
            require_finite(
                &mut issues,
                &format!("orders[{i}].items[{j}].subtotal"),
                item.subtotal,
            );
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn require_non_empty(issues: &mut Vec<ValidationIssue>, path: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue {
            path: path.to_owned(),
            message: "must not be empty".to_owned(),
        });
    }
}

fn require_finite(issues: &mut Vec<ValidationIssue>, path: &str, value: f64) {
    if !value.is_finite() {
        issues.push(ValidationIssue {
            path: path.to_owned(),
            message: "must be a finite number".to_owned(),
        });
    }
}

fn require_entries(issues: &mut Vec<ValidationIssue>, path: &str) {
    issues.push(ValidationIssue {
        path: path.to_owned(),
        message: "must contain at least one entry".to_owned(),
    });
}
