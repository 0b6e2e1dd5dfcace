use crate::Value;

/// Column descriptor extracted from a record type.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Rust field the column is read from and written to.
    pub field: &'static str,
    /// Column name used in generated SQL, the field name unless overridden.
    pub name: &'static str,
    /// Empty `Value` describing the field type.
    ///
    /// Only describes the record for callers inspecting [`crate::Record::columns`]. Decoding does
    /// not depend on it: each value returned by the backend goes through the field's
    /// [`crate::AsValue::try_from_value`], whatever its variant.
    pub value: Value,
}

impl ColumnDef {
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn field(&self) -> &'static str {
        self.field
    }
}
