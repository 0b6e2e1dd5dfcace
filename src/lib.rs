//! dal: a minimal data access layer mapping plain Rust records to relational tables.
//!
//! A record is any struct implementing [`Record`], usually through `#[derive(Record)]`. Its
//! columns are the struct fields in declaration order, renamed with `#[dal(name = "..")]` and
//! nested records spliced in place with `#[dal(flatten)]`. Backends (like `dal-mysql`) build on
//! [`write_records`] and [`read_records`] to batch writes and decode query results.
pub use dal_core::*;
pub use dal_macros::*;
