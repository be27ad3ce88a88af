//! In-memory dataset normalization.
//!
//! The processing layer operates on the [`crate::types::DataSet`] produced by the collector.
//! [`normalize()`] applies, in order:
//!
//! 1. [`columns::lowercase_columns`]: lowercase every column name (colliding names are merged)
//! 2. [`text::clean_text_columns`]: strip escape sequences, trim, and lowercase text columns
//! 3. [`coerce::parse_date_column`]: parse the date column as day/month/year
//! 4. [`coerce::parse_amount_column`]: parse the amount column as a number
//!
//! ## Example
//!
//! ```rust
//! use tabular_pg_loader::processing::{normalize, NormalizeOptions};
//! use tabular_pg_loader::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("Merchant", DataType::Utf8),
//!         Field::new("Date", DataType::Utf8),
//!         Field::new("Amount_In_USD", DataType::Utf8),
//!     ]),
//!     vec![vec![
//!         Value::Utf8("  ACME\\n ".to_string()),
//!         Value::Utf8("31/01/2023".to_string()),
//!         Value::Utf8("1,234.50".to_string()),
//!     ]],
//! );
//!
//! let out = normalize(ds, &NormalizeOptions::default());
//! assert_eq!(out.rows[0][0], Value::Utf8("acme".to_string()));
//! assert_eq!(out.rows[0][2], Value::Float64(1234.5));
//! ```

pub mod coerce;
pub mod columns;
pub mod text;

use crate::types::DataSet;

pub use coerce::{parse_amount_column, parse_date_column};
pub use columns::lowercase_columns;
pub use text::{clean_text, clean_text_columns};

/// Column names and formats used by [`normalize()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Column parsed as a date (matched after lowercasing).
    pub date_column: String,
    /// `chrono` format string for the date column.
    pub date_format: String,
    /// Column parsed as a decimal amount (matched after lowercasing).
    pub amount_column: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_column: "date".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            amount_column: "amount_in_usd".to_string(),
        }
    }
}

/// Normalize a dataset. Never fails: unconvertible values degrade to their fallbacks.
pub fn normalize(dataset: DataSet, options: &NormalizeOptions) -> DataSet {
    let mut out = lowercase_columns(dataset);
    let text_columns = clean_text_columns(&mut out);
    let dates = parse_date_column(&mut out, &options.date_column, &options.date_format);
    let amounts = parse_amount_column(&mut out, &options.amount_column);

    tracing::info!(
        rows = out.row_count(),
        columns = out.column_count(),
        text_columns,
        date_column_parsed = dates,
        amount_column_parsed = amounts,
        "normalized dataset"
    );
    out
}
