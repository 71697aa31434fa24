//! Record derive macro implementation

use crate::attrs::{parse_field_attr, parse_record_attr};
use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let record_attr = parse_record_attr(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let type_name = name.unraw().to_string();
    let table = record_attr
        .table
        .unwrap_or_else(|| type_name.to_snake_case());

    let mut field_defs = Vec::with_capacity(fields.len());
    let mut value_arms = Vec::with_capacity(fields.len());
    let mut zero_arms = Vec::with_capacity(fields.len());
    let mut set_arms = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_name = ident.unraw().to_string();
        let column = parse_field_attr(field)?
            .column
            .unwrap_or_else(|| field_name.to_snake_case());

        field_defs.push(quote! {
            ::cqlorm::FieldDef::new(#field_name, ::core::option::Option::Some(#column))
        });
        value_arms.push(quote! {
            #index => ::cqlorm::ToCql::to_cql(&self.#ident),
        });
        zero_arms.push(quote! {
            #index => ::cqlorm::ToCql::is_zero(&self.#ident),
        });
        set_arms.push(quote! {
            #index => {
                self.#ident = ::cqlorm::FromCql::from_cql(value)?;
                ::core::result::Result::Ok(())
            }
        });
    }

    Ok(quote! {
        impl #impl_generics ::cqlorm::Record for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const TABLE: ::core::option::Option<&'static str> = ::core::option::Option::Some(#table);
            const FIELDS: &'static [::cqlorm::FieldDef] = &[#(#field_defs),*];

            #[allow(unused_variables)]
            fn field_value(&self, index: usize) -> ::cqlorm::OrmResult<::cqlorm::CqlValue> {
                match index {
                    #(#value_arms)*
                    _ => ::core::result::Result::Err(::cqlorm::OrmError::mapping(
                        ::std::format!("{} has no field at index {}", #type_name, index),
                    )),
                }
            }

            #[allow(unused_variables)]
            fn field_is_zero(&self, index: usize) -> bool {
                match index {
                    #(#zero_arms)*
                    _ => true,
                }
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                index: usize,
                value: ::cqlorm::CqlValue,
            ) -> ::core::result::Result<(), ::cqlorm::TypeMismatch> {
                match index {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(::cqlorm::TypeMismatch::new(
                        "a mapped field",
                        "an unmapped field index",
                    )),
                }
            }
        }
    })
}
