use crate::{MySQLConnection, ModelConfig, PoolManager, redact};
use dal_core::{
    AsValue, Context, Driver, Error, Executor, Failure, Query, Record, Result, Row, SqlWriter,
    WriteMode,
    check_records, read_records, stream::StreamExt, write_records,
};
use mysql_async::Pool;
use std::{
    any::Any,
    pin::pin,
    sync::{Arc, OnceLock},
};

/// A session mapping records to the tables of one database.
///
/// The model binds lazily to the pool registered in its [`PoolManager`] for its driver and data
/// source, the first operation creates the pool when needed. Writes take `&self` and check out
/// their own connection, so they can run concurrently. [`Model::read`] keeps its result on the
/// model until the next read.
///
/// ```no_run
/// # use dal::Record;
/// # use dal_mysql::{Model, ModelConfig, PoolManager};
/// # use std::sync::Arc;
/// #[derive(Record, Debug, Clone, PartialEq)]
/// struct User {
///     id: i32,
///     name: String,
/// }
///
/// # async fn run() -> dal::Result<()> {
/// let pools = Arc::new(PoolManager::new());
/// let mut model = Model::new(pools, ModelConfig::new("mysql", "mysql://root:pw@localhost:3306/app"));
/// model
///     .update("user", &[User { id: 1, name: "a".into() }, User { id: 2, name: "b".into() }])
///     .await?;
/// model.read::<User>("user", &["id", "name"], "order by id").await?;
/// assert_eq!(model.records::<User>().map(|v| v.len()), Some(2));
/// # Ok(())
/// # }
/// ```
pub struct Model {
    config: ModelConfig,
    pools: Arc<PoolManager>,
    pool: OnceLock<Arc<Pool>>,
    rows: Vec<Row>,
    records: Option<Box<dyn Any + Send + Sync>>,
}

impl Model {
    pub fn new(pools: Arc<PoolManager>, config: ModelConfig) -> Self {
        Self {
            config,
            pools,
            pool: OnceLock::new(),
            rows: Vec::new(),
            records: None,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Change the identity and batch size, the next operation binds to the matching pool.
    pub fn configure(
        &mut self,
        driver: impl Into<String>,
        data_source: impl Into<String>,
        batch_size: usize,
    ) {
        self.config = ModelConfig {
            driver: driver.into(),
            data_source: data_source.into(),
            batch_size,
        };
        self.pool = OnceLock::new();
    }

    fn pool(&self) -> Result<Arc<Pool>> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool.clone());
        }
        let pool = self
            .pools
            .pool(&self.config.driver, &self.config.data_source)?;
        Ok(self.pool.get_or_init(|| pool).clone())
    }

    async fn connection(&self) -> Result<MySQLConnection> {
        let pool = self.pool()?;
        match pool.get_conn().await {
            Ok(conn) => Ok(MySQLConnection::new(conn)),
            Err(e) => {
                let error = Error::new(e).context(Failure::Execution).context(format!(
                    "dal: could not connect to `{}`",
                    redact(&self.config.data_source)
                ));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    /// Run `sql` as is, for example a `create table if not exists`.
    pub async fn exec_raw(&self, sql: &str) -> Result<()> {
        let mut connection = self.connection().await?;
        connection
            .execute(Query::Raw(sql.into()))
            .await
            .map(|_| ())
            .context("dal.exec_raw failed")
            .map_err(|e| {
                log::error!("{:#}", e);
                e
            })
    }

    async fn write<R: Record>(&self, table: &str, records: &[R], mode: WriteMode) -> Result<u64> {
        check_records(table, records, mode)?;
        let mut connection = self.connection().await?;
        let affected =
            write_records(&mut connection, table, records, mode, self.config.batch_size).await?;
        Ok(affected.rows_affected)
    }

    /// Insert `records`, rows colliding with an existing unique key are skipped.
    ///
    /// Returns the number of rows inserted.
    pub async fn create<R: Record>(&self, table: &str, records: &[R]) -> Result<u64> {
        self.write(table, records, WriteMode::InsertIgnore).await
    }

    /// Insert `records`, rows colliding with an existing unique key overwrite every column.
    ///
    /// The returned count follows the MySQL convention: 1 per inserted row, 2 per changed row.
    pub async fn update<R: Record>(&self, table: &str, records: &[R]) -> Result<u64> {
        self.write(table, records, WriteMode::InsertOrUpdate).await
    }

    /// Select `columns` from `table` and keep the decoded records on the model.
    ///
    /// `columns` must follow the flattened field order of `R` and `condition` is raw SQL like
    /// `where id > 10 order by id`. Rows that cannot be decoded are logged and skipped. On error
    /// the previous result is left untouched.
    pub async fn read<R>(&mut self, table: &str, columns: &[&str], condition: &str) -> Result<()>
    where
        R: Record + Send + Sync + 'static,
    {
        let mut connection = self.connection().await?;
        let result = read_records::<_, R>(&mut connection, table, columns, condition).await?;
        log::debug!(
            "dal.read: {} records read from `{table}`",
            result.records.len()
        );
        self.rows = result.rows;
        self.records = Some(Box::new(result.records));
        Ok(())
    }

    /// Records of the last [`Model::read`], `None` if nothing was read or it was read as a
    /// different type.
    pub fn records<R: 'static>(&self) -> Option<&[R]> {
        self.records
            .as_ref()?
            .downcast_ref::<Vec<R>>()
            .map(Vec::as_slice)
    }

    /// Move the records of the last [`Model::read`] out of the model.
    pub fn take_records<R: 'static>(&mut self) -> Option<Vec<R>> {
        match self.records.take()?.downcast::<Vec<R>>() {
            Ok(records) => {
                self.rows.clear();
                Some(*records)
            }
            Err(records) => {
                self.records = Some(records);
                None
            }
        }
    }

    /// Raw values of the rows decoded by the last [`Model::read`], aligned with its records.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Delete the rows of `table` whose `time_column` is older than `cutoff`.
    ///
    /// Returns the number of rows deleted.
    pub async fn cleanup(
        &self,
        table: &str,
        time_column: &str,
        cutoff: impl AsValue,
    ) -> Result<u64> {
        let mut connection = self.connection().await?;
        let mut sql = String::with_capacity(32 + table.len() + time_column.len());
        connection
            .driver()
            .sql_writer()
            .write_delete_before(&mut sql, table, time_column);
        let affected = connection
            .execute(Query::Bound(sql, vec![cutoff.as_value()]))
            .await
            .with_context(|| format!("dal.cleanup: failed to delete outdated rows of `{table}`"))
            .map_err(|e| {
                log::error!("{:#}", e);
                e
            })?;
        log::info!(
            "dal.cleanup: removed {} rows from `{table}`",
            affected.rows_affected
        );
        Ok(affected.rows_affected)
    }

    /// Version of the database server, one `system db version: <version>` entry per row.
    pub async fn info(&self) -> Result<Vec<String>> {
        let mut connection = self.connection().await?;
        let mut sql = String::new();
        connection.driver().sql_writer().write_version_query(&mut sql);
        let mut info = Vec::new();
        let mut rows = pin!(connection.fetch(Query::Raw(sql)));
        while let Some(row) = rows.next().await {
            let version = row
                .and_then(|row| {
                    let value = row.values.into_vec().into_iter().next().unwrap_or_default();
                    String::try_from_value(value)
                })
                .context("dal.info: cannot read the database version")
                .map_err(|e| {
                    log::error!("{:#}", e);
                    e
                })?;
            info.push(format!("system db version: {version}"));
        }
        Ok(info)
    }
}
