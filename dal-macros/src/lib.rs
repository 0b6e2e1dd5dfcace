mod decode_column;
mod encode_record;

use decode_column::decode_column;
use encode_record::encode_record;
use proc_macro::TokenStream;
use syn::{Fields, ItemStruct, parse_macro_input};

/// Implements `dal::Record` for a struct with named fields.
///
/// Field attributes:
/// - `#[dal(name = "column")]` column name, defaults to the field name verbatim.
/// - `#[dal(flatten)]` the field is itself a `Record`, its columns are spliced in place.
/// - `#[dal(ignore)]` the field is not mapped and decodes to `Default::default()`.
#[proc_macro_derive(Record, attributes(dal))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    if !item.generics.params.is_empty() {
        panic!("Record `{}` cannot be generic", item.ident);
    }
    let Fields::Named(fields) = &item.fields else {
        panic!("Record `{}` must have named fields", item.ident);
    };
    let columns: Vec<_> = fields.named.iter().map(decode_column).collect();
    encode_record(&item.ident, &columns).into()
}
