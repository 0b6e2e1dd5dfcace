use crate::SqlWriter;

pub trait Driver {
    type SqlWriter: SqlWriter;

    /// Identity the driver answers to, e.g. `"mysql"`.
    const NAME: &'static str;
    /// Hard ceiling on bound parameters per statement.
    const MAX_PARAMETERS: usize;

    fn sql_writer(&self) -> Self::SqlWriter;
}
