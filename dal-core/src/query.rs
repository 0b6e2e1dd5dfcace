use crate::{Value, truncate_long};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// A statement ready to be sent to an [`crate::Executor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// SQL text without parameters.
    Raw(String),
    /// SQL text with positional parameters, bound in order.
    Bound(String, Vec<Value>),
}

impl Query {
    pub fn sql(&self) -> &str {
        match self {
            Query::Raw(sql) | Query::Bound(sql, ..) => sql,
        }
    }
    pub fn params(&self) -> &[Value] {
        match self {
            Query::Raw(..) => &[],
            Query::Bound(_, params) => params,
        }
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::Raw(value.into())
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::Raw(value)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate_long!(self.sql()))?;
        if let Query::Bound(_, params) = self {
            write!(f, " ({} parameters)", params.len())?;
        }
        Ok(())
    }
}

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted, as reported by the backend.
    pub rows_affected: u64,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
        }
    }
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_affected_accumulate() {
        let mut total = RowsAffected::default();
        total.extend([
            RowsAffected { rows_affected: 3 },
            RowsAffected { rows_affected: 0 },
            RowsAffected { rows_affected: 2 },
        ]);
        assert_eq!(total.rows_affected, 5);
    }

    #[test]
    fn labeled_row_into_values() {
        let row = RowLabeled::new(
            ["id".to_string(), "name".to_string()].into(),
            [Value::Int32(Some(1)), Value::Varchar(Some("a".into()))].into(),
        );
        let values: Row = row.into();
        assert_eq!(
            values.as_ref(),
            [Value::Int32(Some(1)), Value::Varchar(Some("a".into()))]
        );
    }

    #[test]
    fn query_display_counts_parameters() {
        let query = Query::Bound("insert into t(a) values (?)".into(), vec![Value::Null]);
        assert_eq!(query.to_string(), "insert into t(a) values (?) (1 parameters)");
        assert_eq!(Query::from("select 1").params().len(), 0);
    }
}
