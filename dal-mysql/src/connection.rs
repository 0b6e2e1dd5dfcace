use crate::{MySQLQueryable, MySQLTransaction};
use dal_core::{Connection, Context, Failure, Result};
use mysql_async::{Conn, TxOpts};

/// A connection checked out of a pool, it goes back to the pool when dropped.
pub struct MySQLConnection {
    pub(crate) conn: MySQLQueryable<Conn>,
}

impl MySQLConnection {
    pub fn new(conn: Conn) -> Self {
        Self {
            conn: MySQLQueryable { executor: conn },
        }
    }
}

impl_executor_delegate!(MySQLConnection, conn);

impl Connection for MySQLConnection {
    type Transaction<'c> = MySQLTransaction<'c>;

    async fn begin(&mut self) -> Result<MySQLTransaction<'_>> {
        let transaction = self
            .conn
            .executor
            .start_transaction(TxOpts::default())
            .await
            .context(Failure::Execution)
            .context("While starting a transaction")?;
        Ok(MySQLTransaction::new(transaction))
    }
}
