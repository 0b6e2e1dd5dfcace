use crate::MySQLQueryable;
use dal_core::{Context, Failure, Result, Transaction};

pub struct MySQLTransaction<'c> {
    pub(crate) transaction: MySQLQueryable<mysql_async::Transaction<'c>>,
}

impl<'c> MySQLTransaction<'c> {
    pub(crate) fn new(transaction: mysql_async::Transaction<'c>) -> Self {
        Self {
            transaction: MySQLQueryable {
                executor: transaction,
            },
        }
    }
}

impl_executor_delegate!(MySQLTransaction<'c>, transaction, 'c);

impl<'c> Transaction<'c> for MySQLTransaction<'c> {
    async fn commit(self) -> Result<()> {
        self.transaction
            .executor
            .commit()
            .await
            .context(Failure::Commit)
            .context("While committing the transaction")
    }

    async fn rollback(self) -> Result<()> {
        self.transaction
            .executor
            .rollback()
            .await
            .context(Failure::Execution)
            .context("While rolling back the transaction")
    }
}
