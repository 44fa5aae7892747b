use crate::parse::{loggable_impl_block, snake_case, EnumInput, Variant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse_macro_input;

fn enum_variant(variant: &Variant) -> TokenStream2 {
    let name = &variant.name;
    let attributes = variant.forwarded_attributes();
    let fields = variant.fields.iter().map(|(field, ty)| quote! { #field: #ty });

    if variant.has_attribute("no_source") {
        if variant.fields.is_empty() {
            quote! {
                #(#attributes)*
                #name
            }
        } else {
            quote! {
                #(#attributes)*
                #name { #(#fields,)* }
            }
        }
    } else {
        quote! {
            #(#attributes)*
            #name {
                #(#fields,)*
                err: String
            }
        }
    }
}

fn constructor(variant: &Variant) -> Option<TokenStream2> {
    let no_source = variant.has_attribute("no_source");
    if no_source && variant.fields.is_empty() {
        return None;
    }

    let name = &variant.name;
    let function = snake_case(name);
    let params = variant
        .fields
        .iter()
        .map(|(field, ty)| quote! { #field: impl Into<#ty> });
    let assignments = variant
        .fields
        .iter()
        .map(|(field, _)| quote! { #field: #field.into() });

    if no_source {
        Some(quote! {
            pub fn #function(#(#params),*) -> Self {
                Self::#name {
                    #(#assignments,)*
                }
            }
        })
    } else {
        Some(quote! {
            pub fn #function(#(#params,)* err: impl std::fmt::Display) -> Self {
                Self::#name {
                    #(#assignments,)*
                    err: err.to_string(),
                }
            }
        })
    }
}

pub fn traceable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as EnumInput);

    let enum_name = &input.name;
    let enum_variants = input.variants.iter().map(enum_variant);
    let constructors = input.variants.iter().filter_map(constructor);
    let loggable = loggable_impl_block(&input);

    quote! {
        #[allow(dead_code)]
        #[derive(Debug, Clone, thiserror::Error, serde::Serialize, serde::Deserialize)]
        pub enum #enum_name {
            #(#enum_variants,)*
        }

        #[allow(dead_code)]
        impl #enum_name {
            #(#constructors)*
        }

        #loggable
    }
    .into()
}
