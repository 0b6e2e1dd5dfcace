use crate::{Driver, Query, Result, RowLabeled, RowsAffected, stream::Stream};
use std::future::Future;

pub trait Executor: Send {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: Query) -> impl Future<Output = Result<RowsAffected>> + Send;

    /// Execute the query and return the rows.
    ///
    /// Rows that cannot be decoded are yielded as errors carrying [`crate::Failure::Scan`],
    /// any other error means the query itself failed.
    fn fetch<'s>(&'s mut self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send + 's;
}
