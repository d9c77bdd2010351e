extern crate proc_macro;

mod fromrow;
mod paths;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `FromRow`, hydrating a struct from a result row.
///
/// Named fields are read by column name (`#[prowl(rename = "col")]` to
/// override); tuple struct fields by position. Every field type must
/// implement `FromValue`.
///
/// ```ignore
/// #[derive(FromRow)]
/// struct User {
///     #[prowl(rename = "_id")]
///     id: i64,
///     name: String,
///     email: Option<String>,
/// }
/// ```
#[proc_macro_derive(FromRow, attributes(prowl))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match fromrow::generate(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
