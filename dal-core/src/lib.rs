mod as_value;
mod column;
mod connection;
mod driver;
mod error;
mod executor;
mod query;
mod read;
mod record;
mod sql_writer;
mod util;
mod value;
mod write;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use query::*;
pub use read::*;
pub use record::*;
pub use sql_writer::*;
pub use util::*;
pub use value::*;
pub use write::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
