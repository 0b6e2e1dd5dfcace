use dal_core::{ColumnDef, SqlWriter, WriteMode, separated_by};

#[derive(Debug, Clone, Copy, Default)]
pub struct MySQLSqlWriter {}

impl SqlWriter for MySQLSqlWriter {
    fn write_insert_head(
        &self,
        out: &mut String,
        table: &str,
        columns: &[ColumnDef],
        mode: WriteMode,
    ) {
        out.push_str(match mode {
            WriteMode::InsertIgnore => "insert ignore into ",
            WriteMode::InsertOrUpdate => "insert into ",
        });
        out.push_str(table);
        self.write_column_list(out, columns);
        out.push_str(" values ");
    }

    fn write_insert_tail(&self, out: &mut String, columns: &[ColumnDef], mode: WriteMode) {
        if mode != WriteMode::InsertOrUpdate {
            return;
        }
        out.push_str(" on duplicate key update ");
        separated_by(
            out,
            columns,
            |out, v| {
                out.push_str(v.name());
                out.push_str("=values(");
                out.push_str(v.name());
                out.push(')');
            },
            ",",
        );
    }

    fn write_version_query(&self, out: &mut String) {
        out.push_str("select version();");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dal_core::Value;

    const WRITER: MySQLSqlWriter = MySQLSqlWriter {};

    fn columns(names: &[&'static str]) -> Vec<ColumnDef> {
        names
            .iter()
            .map(|&name| ColumnDef {
                field: name,
                name,
                value: Value::Int32(None),
            })
            .collect()
    }

    #[test]
    fn insert_or_update_template() {
        let template =
            WRITER.insert_template("staff", &columns(&["name", "age"]), WriteMode::InsertOrUpdate);
        assert_eq!(template.group, "(?,?)");
        assert_eq!(
            template.render(1),
            "insert into staff(name,age) values (?,?) on duplicate key update name=values(name),age=values(age);"
        );
        assert_eq!(
            template.render(3),
            "insert into staff(name,age) values (?,?),(?,?),(?,?) on duplicate key update name=values(name),age=values(age);"
        );
    }

    #[test]
    fn insert_ignore_template() {
        let template = WRITER.insert_template("user", &columns(&["id", "name"]), WriteMode::InsertIgnore);
        assert_eq!(
            template.render(2),
            "insert ignore into user(id,name) values (?,?),(?,?);"
        );
    }

    #[test]
    fn duplicate_columns_are_kept() {
        let template = WRITER.insert_template("t", &columns(&["a", "a"]), WriteMode::InsertIgnore);
        assert_eq!(template.render(1), "insert ignore into t(a,a) values (?,?);");
    }

    #[test]
    fn select_delete_and_version() {
        let mut out = String::new();
        WRITER.write_select(&mut out, "user", &["id", "name"], "");
        assert_eq!(out, "select id,name from user");
        out.clear();
        WRITER.write_select(&mut out, "user", &["id"], " where id > 1 order by id ");
        assert_eq!(out, "select id from user where id > 1 order by id");
        out.clear();
        WRITER.write_delete_before(&mut out, "events", "created_at");
        assert_eq!(out, "delete from events where created_at < ?;");
        out.clear();
        WRITER.write_version_query(&mut out);
        assert_eq!(out, "select version();");
    }
}
