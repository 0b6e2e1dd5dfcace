use crate::{
    Connection, Context, Driver, Error, Executor, Failure, Query, Record, Result, RowsAffected,
    SqlWriter, Transaction, WriteMode,
};
use std::any;

/// Rows per statement when the caller does not configure a batch size.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Number of rows bound into one statement.
///
/// It is the configured batch size (`0` means [`DEFAULT_BATCH_SIZE`]) capped so that
/// `columns * rows` never exceeds `max_parameters`.
pub fn chunk_size(columns: usize, batch_size: usize, max_parameters: usize) -> Result<usize> {
    if columns == 0 {
        return Err(Error::msg("The record has no columns to write"));
    }
    let batch_size = if batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        batch_size
    };
    let fitting = max_parameters / columns;
    if fitting == 0 {
        return Err(Error::msg(format!(
            "The record has {columns} columns, more than the {max_parameters} parameters a statement can bind"
        )));
    }
    Ok(batch_size.min(fitting))
}

/// Fail with [`Failure::InputShape`] when `records` cannot be written at all.
///
/// Runs before anything touches the database.
pub fn check_records<R: Record>(table: &str, records: &[R], mode: WriteMode) -> Result<()> {
    if records.is_empty() {
        let error = Error::msg(format!(
            "dal.{}: `records` has no elements, nothing to write into `{table}`",
            mode.operation()
        ))
        .context(Failure::InputShape);
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(())
}

/// Write `records` into `table` inside a single transaction, one statement per chunk.
///
/// Returns the sum of the affected rows reported for each chunk. Under
/// [`WriteMode::InsertOrUpdate`] that count follows the backend convention and is only advisory.
/// If any chunk fails the transaction is rolled back and no further chunk is sent. If the commit
/// fails no rows are credited.
pub async fn write_records<C, R>(
    connection: &mut C,
    table: &str,
    records: &[R],
    mode: WriteMode,
    batch_size: usize,
) -> Result<RowsAffected>
where
    C: Connection,
    R: Record,
{
    let operation = mode.operation();
    check_records(table, records, mode)?;
    let columns = R::columns();
    let size = chunk_size(
        columns.len(),
        batch_size,
        <C::Driver as Driver>::MAX_PARAMETERS,
    )
    .with_context(|| {
        format!(
            "dal.{operation}: cannot write `{}` into `{table}`",
            any::type_name::<R>()
        )
    })
    .context(Failure::InputShape)
    .map_err(|e| {
        log::error!("{:#}", e);
        e
    })?;
    let template = connection
        .driver()
        .sql_writer()
        .insert_template(table, columns, mode);
    let mut transaction = connection
        .begin()
        .await
        .map_err(|e| Failure::Execution.attach(e))
        .with_context(|| format!("dal.{operation}: could not begin a transaction on `{table}`"))?;
    let mut total = RowsAffected::default();
    for (i, chunk) in records.chunks(size).enumerate() {
        let sql = template.render(chunk.len());
        let mut params = Vec::with_capacity(chunk.len() * columns.len());
        for record in chunk {
            params.extend(record.row().into_vec());
        }
        match transaction.execute(Query::Bound(sql, params)).await {
            Ok(affected) => total.extend([affected]),
            Err(e) => {
                let error = Failure::Execution.attach(e).context(format!(
                    "dal.{operation}: chunk {i} failed on `{table}` after {} rows affected by the previous chunks, nothing was committed",
                    total.rows_affected
                ));
                log::error!("{:#}", error);
                if let Err(e) = transaction.rollback().await {
                    log::error!("{:#}", e.context("While rolling back the failed write"));
                }
                return Err(error);
            }
        }
    }
    if let Err(e) = transaction.commit().await {
        let error = Failure::Commit.attach(e).context(format!(
            "dal.{operation}: failed to commit the transaction on `{table}`, no rows were written"
        ));
        log::error!("{:#}", error);
        return Err(error);
    }
    log::debug!(
        "dal.{operation}: {} records written into `{table}` ({} rows affected)",
        records.len(),
        total.rows_affected
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_defaults_and_caps() {
        assert_eq!(chunk_size(2, 0, 65535).unwrap(), DEFAULT_BATCH_SIZE);
        assert_eq!(chunk_size(2, 10, 65535).unwrap(), 10);
        assert_eq!(chunk_size(20, 0, 65535).unwrap(), 3276);
        assert_eq!(chunk_size(65535, 0, 65535).unwrap(), 1);
    }

    #[test]
    fn chunk_size_rejects_unwritable_records() {
        assert!(chunk_size(0, 0, 65535).is_err());
        assert!(chunk_size(65536, 0, 65535).is_err());
    }
}
