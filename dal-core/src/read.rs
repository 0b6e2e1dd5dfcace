use crate::{
    Driver, Executor, Failure, Query, Record, Result, Row, SqlWriter, stream::StreamExt,
};
use std::{any, pin::pin};

/// Records decoded by [`read_records`] together with the raw rows they were built from.
#[derive(Debug)]
pub struct ReadResult<R> {
    pub rows: Vec<Row>,
    pub records: Vec<R>,
}

impl<R> Default for ReadResult<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            records: Vec::new(),
        }
    }
}

/// Select `columns` from `table` and decode every row into a fresh `R`.
///
/// Values are assigned to the record positionally: `columns` must follow the flattened field
/// order of `R`. `condition` is raw SQL appended to the query. Rows that fail to decode are
/// logged and skipped, a failing query aborts the read.
pub async fn read_records<E, R>(
    executor: &mut E,
    table: &str,
    columns: &[&str],
    condition: &str,
) -> Result<ReadResult<R>>
where
    E: Executor,
    R: Record,
{
    let mut sql = String::with_capacity(64);
    executor
        .driver()
        .sql_writer()
        .write_select(&mut sql, table, columns, condition);
    let expected = R::columns().len();
    if columns.len() != expected {
        log::warn!(
            "dal.read: selecting {} columns from `{table}` into `{}` which has {expected}, every row will be skipped",
            columns.len(),
            any::type_name::<R>(),
        );
    }
    let mut result = ReadResult::default();
    let mut stream = pin!(executor.fetch(Query::Raw(sql)));
    while let Some(row) = stream.next().await {
        let row: Row = match row {
            Ok(row) => row.into(),
            Err(e) if Failure::of(&e) == Some(Failure::Scan) => {
                log::error!("{:#}", e.context(format!("dal.read: skipped a row of `{table}`")));
                continue;
            }
            Err(e) => {
                let error = e.context(format!("dal.read: failed to query `{table}`"));
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        match R::from_row(row.clone()) {
            Ok(record) => {
                result.rows.push(row);
                result.records.push(record);
            }
            Err(e) => log::error!(
                "{:#}",
                e.context(Failure::Scan).context(format!(
                    "dal.read: skipped a row of `{table}` that does not fit `{}`",
                    any::type_name::<R>()
                ))
            ),
        }
    }
    Ok(result)
}
