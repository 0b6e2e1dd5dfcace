use crate::{ColumnDef, Error, Result, Row, Value};
use std::any;

/// A plain struct that maps to one table row.
///
/// Usually implemented by `#[derive(Record)]`. The columns are listed in field declaration order
/// with nested records (`#[dal(flatten)]`) spliced in place, and both [`Record::row`] and
/// [`Record::from_values`] follow that same order. Column names are not checked for uniqueness:
/// two fields with the same name produce two identical columns.
pub trait Record {
    fn columns() -> &'static [ColumnDef];

    /// Values of the record, one per column.
    fn row(&self) -> Row;

    /// Build a record consuming one value per column from `values`.
    fn from_values<I: Iterator<Item = Value>>(values: &mut I) -> Result<Self>
    where
        Self: Sized;

    /// Build a record from a row holding exactly one value per column.
    fn from_row(row: Row) -> Result<Self>
    where
        Self: Sized,
    {
        let expected = Self::columns().len();
        if row.len() != expected {
            return Err(Error::msg(format!(
                "The row has {} values while `{}` has {} columns",
                row.len(),
                any::type_name::<Self>(),
                expected
            )));
        }
        Self::from_values(&mut row.into_vec().into_iter())
    }
}

/// Take the value of the next column, used by the derived `from_values`.
pub fn next_value<I: Iterator<Item = Value>>(values: &mut I, column: &str) -> Result<Value> {
    values
        .next()
        .ok_or_else(|| Error::msg(format!("Column `{column}` is missing from the row")))
}
