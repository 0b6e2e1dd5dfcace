use crate::{Executor, Result};
use std::future::Future;

pub trait Connection: Executor {
    type Transaction<'c>: Transaction<'c, Driver = Self::Driver>
    where
        Self: 'c;

    fn begin(&mut self) -> impl Future<Output = Result<Self::Transaction<'_>>> + Send;
}

/// Dropping a transaction without committing leaves the rollback to the driver.
pub trait Transaction<'c>: Executor {
    fn commit(self) -> impl Future<Output = Result<()>> + Send;
    fn rollback(self) -> impl Future<Output = Result<()>> + Send;
}
