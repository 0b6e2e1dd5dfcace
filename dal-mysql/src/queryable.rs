use crate::{MySQLDriver, ValueWrap, row_labeled};
use async_stream::stream;
use dal_core::{
    Context, Error, Executor, Failure, Query, Result, RowLabeled, RowsAffected, Value,
    stream::{Stream, StreamExt},
};
use mysql_async::{Params, prelude::Queryable};

/// Executor over anything mysql_async can query: a plain connection or a transaction.
pub(crate) struct MySQLQueryable<T: Queryable> {
    pub(crate) executor: T,
}

fn params(values: Vec<Value>) -> Result<Params> {
    if values.is_empty() {
        return Ok(Params::Empty);
    }
    Ok(Params::Positional(
        values
            .into_iter()
            .map(|v| ValueWrap(v).try_into())
            .collect::<Result<_>>()?,
    ))
}

impl<T: Queryable> Executor for MySQLQueryable<T> {
    type Driver = MySQLDriver;

    fn driver(&self) -> &Self::Driver {
        &MySQLDriver {}
    }

    async fn execute(&mut self, query: Query) -> Result<RowsAffected> {
        let context = format!("While executing the query:\n{}", query);
        let executor = &mut self.executor;
        let result = async move {
            match query {
                Query::Raw(sql) => {
                    let result = executor.query_iter(sql).await.context(Failure::Execution)?;
                    let affected = RowsAffected {
                        rows_affected: result.affected_rows(),
                    };
                    result.drop_result().await.context(Failure::Execution)?;
                    Ok::<_, Error>(affected)
                }
                Query::Bound(sql, values) => {
                    let statement = executor.prep(sql).await.context(Failure::Statement)?;
                    let params = params(values).context(Failure::Statement)?;
                    let result = executor
                        .exec_iter(&statement, params)
                        .await
                        .context(Failure::Execution)?;
                    let affected = RowsAffected {
                        rows_affected: result.affected_rows(),
                    };
                    result.drop_result().await.context(Failure::Execution)?;
                    Ok(affected)
                }
            }
        }
        .await;
        result.context(context)
    }

    fn fetch<'s>(
        &'s mut self,
        query: Query,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send + 's {
        let context = format!("While fetching the query:\n{}", query);
        stream! {
            let (sql, values) = match query {
                Query::Raw(sql) => (sql, Vec::new()),
                Query::Bound(sql, values) => (sql, values),
            };
            let params = match params(values) {
                Ok(params) => params,
                Err(e) => {
                    yield Err(e.context(Failure::Statement).context(context));
                    return;
                }
            };
            let mut rows = match self
                .executor
                .exec_stream::<mysql_async::Row, _, _>(sql, params)
                .await
            {
                Ok(rows) => rows,
                Err(e) => {
                    yield Err(Error::from(e).context(Failure::Execution).context(context));
                    return;
                }
            };
            while let Some(row) = rows.next().await {
                match row {
                    Ok(row) => yield row_labeled(row),
                    Err(e) => {
                        yield Err(Error::from(e).context(Failure::Execution).context(context));
                        return;
                    }
                }
            }
        }
    }
}
