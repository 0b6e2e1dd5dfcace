use crate::ValueWrap;
use dal_core::{Context, Error, Failure, Result, Row, RowLabeled, RowNames, Value};

/// Convert a MySQL result row, a value that cannot be represented fails the row with
/// [`Failure::Scan`].
pub(crate) fn row_labeled(mut row: mysql_async::Row) -> Result<RowLabeled> {
    let labels: RowNames = row
        .columns_ref()
        .iter()
        .map(|v| v.name_str().into_owned())
        .collect();
    let values: Row = (0..row.len())
        .map(|i| {
            let value = row
                .take::<mysql_async::Value, _>(i)
                .ok_or_else(|| Error::msg(format!("Column {i} was already taken from the row")))?;
            ValueWrap::try_from(value)
                .map(Value::from)
                .with_context(|| format!("While reading column `{}`", labels[i]))
        })
        .collect::<Result<_>>()
        .context(Failure::Scan)?;
    Ok(RowLabeled::new(labels, values))
}
