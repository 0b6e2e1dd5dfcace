use crate::{ColumnDef, separated_by};

/// How a write treats rows that collide with an existing unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Skip conflicting rows, existing data is left untouched.
    InsertIgnore,
    /// Overwrite every listed column of the conflicting row.
    InsertOrUpdate,
}

impl WriteMode {
    /// Name of the public operation using this mode.
    pub fn operation(&self) -> &'static str {
        match self {
            WriteMode::InsertIgnore => "create",
            WriteMode::InsertOrUpdate => "update",
        }
    }
}

/// Insert statement split around its `VALUES` list, reusable for chunks of any size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTemplate {
    /// Everything up to and including `values `.
    pub head: String,
    /// Placeholder group for a single row, e.g. `(?,?)`.
    pub group: String,
    /// Everything after the values list, including the terminating `;`.
    pub tail: String,
}

impl InsertTemplate {
    /// Statement text for `rows` rows.
    pub fn render(&self, rows: usize) -> String {
        let mut out = String::with_capacity(
            self.head.len() + (self.group.len() + 1) * rows + self.tail.len(),
        );
        out.push_str(&self.head);
        separated_by(&mut out, (0..rows).map(|_| &self.group), |out, v| out.push_str(v), ",");
        out.push_str(&self.tail);
        out
    }
}

/// Produces the SQL text of a backend.
///
/// Table names, column names and conditions are written verbatim: quoting, if needed, is up to
/// the caller.
pub trait SqlWriter {
    fn write_placeholder(&self, out: &mut String) {
        out.push('?');
    }

    fn write_placeholder_group(&self, out: &mut String, columns: usize) {
        out.push('(');
        separated_by(out, 0..columns, |out, _| self.write_placeholder(out), ",");
        out.push(')');
    }

    fn write_column_list(&self, out: &mut String, columns: &[ColumnDef]) {
        out.push('(');
        separated_by(out, columns, |out, v| out.push_str(v.name()), ",");
        out.push(')');
    }

    /// Write the insert statement up to and including the `values` keyword.
    fn write_insert_head(
        &self,
        out: &mut String,
        table: &str,
        columns: &[ColumnDef],
        mode: WriteMode,
    );

    /// Write what follows the values list (conflict handling).
    fn write_insert_tail(&self, out: &mut String, columns: &[ColumnDef], mode: WriteMode);

    fn write_version_query(&self, out: &mut String);

    fn insert_template(&self, table: &str, columns: &[ColumnDef], mode: WriteMode) -> InsertTemplate {
        let mut head = String::with_capacity(32 + table.len() + columns.len() * 16);
        self.write_insert_head(&mut head, table, columns, mode);
        let mut group = String::with_capacity(2 + columns.len() * 2);
        self.write_placeholder_group(&mut group, columns.len());
        let mut tail = String::with_capacity(columns.len() * 32);
        self.write_insert_tail(&mut tail, columns, mode);
        tail.push(';');
        InsertTemplate { head, group, tail }
    }

    /// `condition` is raw SQL appended after the table, e.g. `where id > 3 order by id`.
    fn write_select(&self, out: &mut String, table: &str, columns: &[&str], condition: &str) {
        out.push_str("select ");
        separated_by(out, columns, |out, v| out.push_str(v), ",");
        out.push_str(" from ");
        out.push_str(table);
        let condition = condition.trim();
        if !condition.is_empty() {
            out.push(' ');
            out.push_str(condition);
        }
    }

    /// Delete statement removing the rows where `column` is older than one bound parameter.
    fn write_delete_before(&self, out: &mut String, table: &str, column: &str) {
        out.push_str("delete from ");
        out.push_str(table);
        out.push_str(" where ");
        out.push_str(column);
        out.push_str(" < ");
        self.write_placeholder(out);
        out.push(';');
    }
}
