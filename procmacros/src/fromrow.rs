//! `#[derive(FromRow)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, LitStr, Result};

use crate::paths;

/// Column name for a named field: `#[prowl(rename = "...")]` or the field name.
fn column_name(field: &Field) -> Result<String> {
    let mut rename = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("prowl")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported prowl attribute, expected `rename`"))
            }
        })?;
    }
    match (rename, &field.ident) {
        (Some(name), _) => Ok(name),
        (None, Some(ident)) => Ok(ident.to_string().trim_start_matches("r#").to_string()),
        (None, None) => Err(Error::new_spanned(field, "tuple fields cannot be renamed")),
    }
}

pub(crate) fn generate(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new_spanned(
                struct_name,
                "FromRow can only be derived for structs",
            ));
        }
    };

    let construct = match fields {
        Fields::Named(named) => {
            let assignments = named
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    let column = column_name(field)?;
                    Ok(quote! { #ident: row.take(#column)?, })
                })
                .collect::<Result<Vec<_>>>()?;
            quote! { Self { #(#assignments)* } }
        }
        Fields::Unnamed(unnamed) => {
            let assignments = (0..unnamed.unnamed.len()).map(|idx| quote! { row.take_at(#idx)?, });
            quote! { Self(#(#assignments)*) }
        }
        Fields::Unit => {
            return Err(Error::new_spanned(
                struct_name,
                "FromRow cannot be derived for unit structs",
            ));
        }
    };

    let from_row = paths::from_row();
    let row = paths::row();
    let result = paths::result();

    Ok(quote! {
        impl #impl_generics #from_row for #struct_name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn from_row(mut row: #row) -> #result<Self> {
                ::std::result::Result::Ok(#construct)
            }
        }
    })
}
