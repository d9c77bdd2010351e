//! Paths used in generated code.
//!
//! Using the `prowl::` prefix (without leading `::`) lets crates that cannot
//! depend on the facade declare a `mod prowl { pub use prowl_core as core; }`
//! shim and still use the derive.

use proc_macro2::TokenStream;
use quote::quote;

pub fn result() -> TokenStream {
    quote!(prowl::core::error::Result)
}

pub fn from_row() -> TokenStream {
    quote!(prowl::core::row::FromRow)
}

pub fn row() -> TokenStream {
    quote!(prowl::core::row::Row)
}
