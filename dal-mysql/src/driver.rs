use crate::MySQLSqlWriter;
use dal_core::Driver;

#[derive(Debug, Clone, Copy, Default)]
pub struct MySQLDriver;

impl Driver for MySQLDriver {
    type SqlWriter = MySQLSqlWriter;

    const NAME: &'static str = "mysql";
    const MAX_PARAMETERS: usize = 65_535;

    fn sql_writer(&self) -> Self::SqlWriter {
        MySQLSqlWriter::default()
    }
}
