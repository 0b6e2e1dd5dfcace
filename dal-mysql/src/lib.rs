/// Implement `Executor` for a wrapper by delegating to its `MySQLQueryable` field.
macro_rules! impl_executor_delegate {
    ($type:ty, $field:ident $(, $lt:lifetime)?) => {
        impl$(<$lt>)? ::dal_core::Executor for $type {
            type Driver = $crate::MySQLDriver;

            fn driver(&self) -> &Self::Driver {
                ::dal_core::Executor::driver(&self.$field)
            }

            fn execute(
                &mut self,
                query: ::dal_core::Query,
            ) -> impl ::std::future::Future<Output = ::dal_core::Result<::dal_core::RowsAffected>>
            + Send {
                ::dal_core::Executor::execute(&mut self.$field, query)
            }

            fn fetch<'s>(
                &'s mut self,
                query: ::dal_core::Query,
            ) -> impl ::dal_core::stream::Stream<Item = ::dal_core::Result<::dal_core::RowLabeled>>
            + Send
            + 's {
                ::dal_core::Executor::fetch(&mut self.$field, query)
            }
        }
    };
}

mod config;
mod connection;
mod driver;
mod model;
mod pool;
mod queryable;
mod row_wrap;
mod sql_writer;
mod transaction;
mod value_wrap;

pub use config::*;
pub use connection::*;
pub use driver::*;
pub use model::*;
pub use pool::*;
pub(crate) use queryable::*;
pub(crate) use row_wrap::*;
pub use sql_writer::*;
pub use transaction::*;
pub(crate) use value_wrap::*;
