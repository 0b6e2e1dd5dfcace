use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, parse::ParseBuffer};

/// How a field takes part in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    /// One column holding the field value.
    Value,
    /// A nested record whose columns are spliced in place.
    Flatten,
    /// Not mapped, filled with `Default::default()` when decoding.
    Ignore,
}

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) name: String,
    pub(crate) kind: ColumnKind,
}

pub fn decode_column(field: &Field) -> ColumnMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut metadata = ColumnMetadata {
        name: ident.to_string(),
        ident,
        ty: field.ty.clone(),
        kind: ColumnKind::Value,
    };
    let mut renamed = false;
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("dal") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `dal`, use it like: `#[dal(attribute = value, ...)]`");
        };
        let result = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `name`, use it like: `#[dal(name = \"my_column\")]`");
                };
                metadata.name = v.value();
                renamed = true;
            } else if arg.path.is_ident("flatten") {
                let Err(..) = arg.value() else {
                    // value() is Err for Meta::Path
                    panic!("Error while parsing `flatten`, use it like: `#[dal(flatten)]`");
                };
                metadata.kind = ColumnKind::Flatten;
            } else if arg.path.is_ident("ignore") {
                let Err(..) = arg.value() else {
                    panic!("Error while parsing `ignore`, use it like: `#[dal(ignore)]`");
                };
                metadata.kind = ColumnKind::Ignore;
            } else {
                panic!(
                    "Unknown attribute `{}` inside dal macro",
                    arg.path.to_token_stream().to_string()
                );
            }
            Ok(())
        });
        if let Err(e) = result {
            panic!("Error while parsing `dal`: {e}");
        }
    }
    if renamed && metadata.kind != ColumnKind::Value {
        panic!(
            "Field `{}` cannot have a column name because it does not map to a single column",
            metadata.ident
        );
    }
    metadata
}
