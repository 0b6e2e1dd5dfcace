use crate::decode_column::{ColumnKind, ColumnMetadata};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

pub(crate) fn encode_record(name: &Ident, columns: &[ColumnMetadata]) -> TokenStream {
    let columns_defs = columns.iter().filter_map(|c| {
        let field = c.ident.to_string();
        let column = &c.name;
        let ty = &c.ty;
        match c.kind {
            ColumnKind::Value => Some(quote! {
                columns.push(::dal::ColumnDef {
                    field: #field,
                    name: #column,
                    value: <#ty as ::dal::AsValue>::as_empty_value(),
                });
            }),
            ColumnKind::Flatten => Some(quote! {
                columns.extend(<#ty as ::dal::Record>::columns().iter().cloned());
            }),
            ColumnKind::Ignore => None,
        }
    });
    let row_values = columns.iter().filter_map(|c| {
        let ident = &c.ident;
        match c.kind {
            ColumnKind::Value => Some(quote! {
                row.push(::dal::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)));
            }),
            ColumnKind::Flatten => Some(quote! {
                row.extend(::dal::Record::row(&self.#ident).into_vec());
            }),
            ColumnKind::Ignore => None,
        }
    });
    let fields_init = columns.iter().map(|c| {
        let ident = &c.ident;
        let field = ident.to_string();
        let column = &c.name;
        let ty = &c.ty;
        match c.kind {
            ColumnKind::Value => quote! {
                #ident: <#ty as ::dal::AsValue>::try_from_value(::dal::next_value(values, #column)?)
                    .map_err(|e| e.context(format!(
                        "While decoding column `{}` into field `{}`",
                        #column,
                        #field,
                    )))?
            },
            ColumnKind::Flatten => quote! {
                #ident: <#ty as ::dal::Record>::from_values(values)?
            },
            ColumnKind::Ignore => quote! {
                #ident: ::std::default::Default::default()
            },
        }
    });
    quote! {
        impl ::dal::Record for #name {
            fn columns() -> &'static [::dal::ColumnDef] {
                static RESULT: ::std::sync::LazyLock<Box<[::dal::ColumnDef]>> =
                    ::std::sync::LazyLock::new(|| {
                        let mut columns: Vec<::dal::ColumnDef> = Vec::new();
                        #(#columns_defs)*
                        columns.into_boxed_slice()
                    });
                &RESULT
            }

            fn row(&self) -> ::dal::Row {
                let mut row: Vec<::dal::Value> =
                    Vec::with_capacity(<Self as ::dal::Record>::columns().len());
                #(#row_values)*
                row.into_boxed_slice()
            }

            fn from_values<I: Iterator<Item = ::dal::Value>>(
                values: &mut I,
            ) -> ::dal::Result<Self> {
                Ok(Self {
                    #(#fields_init,)*
                })
            }
        }
    }
}
