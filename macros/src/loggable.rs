use crate::parse::{loggable_impl_block, EnumInput};
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

pub fn loggable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as EnumInput);

    let enum_name = &input.name;

    let enum_variants = input.variants.iter().map(|variant| {
        let name = &variant.name;
        let attributes = variant.forwarded_attributes();
        let fields = variant.fields.iter().map(|(field, ty)| quote! { #field: #ty });
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
    });

    let loggable = loggable_impl_block(&input);

    quote! {
        #[allow(dead_code)]
        #[derive(Debug, Clone, thiserror::Error, serde::Serialize, serde::Deserialize)]
        pub enum #enum_name {
            #(#enum_variants,)*
        }

        #loggable
    }
    .into()
}
