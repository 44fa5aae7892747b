use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Attribute, Error, Expr, Ident, Result, Token, Type};

pub struct Variant {
    pub attributes: Vec<Attribute>,
    pub name: Ident,
    pub fields: Vec<(Ident, Type)>,
    pub severity: Expr,
}

pub struct EnumInput {
    pub name: Ident,
    pub variants: Vec<Variant>,
}

impl Parse for EnumInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<Ident>()?;

        let content;
        braced!(content in input);

        let mut variants = Vec::new();
        while !content.is_empty() {
            let attributes = content.call(Attribute::parse_outer)?;
            if !attributes.iter().any(|attr| attr.path().is_ident("error")) {
                return Err(Error::new(content.span(), "Missing #[error(...)] attribute"));
            }

            let name = content.parse::<Ident>()?;

            let mut fields = Vec::new();
            if content.peek(syn::token::Brace) {
                let field_content;
                braced!(field_content in content);
                while !field_content.is_empty() {
                    let field_name = field_content.parse::<Ident>()?;
                    field_content.parse::<Token![:]>()?;
                    let field_type = field_content.parse::<Type>()?;
                    fields.push((field_name, field_type));
                    if !field_content.is_empty() {
                        field_content.parse::<Token![,]>()?;
                    }
                }
            }

            content.parse::<Token![=>]>()?;
            let severity = content.parse::<Expr>()?;

            if !content.is_empty() {
                content.parse::<Token![,]>()?;
            }

            variants.push(Variant {
                attributes,
                name,
                fields,
                severity,
            });
        }

        Ok(EnumInput { name, variants })
    }
}

impl Variant {
    pub fn has_attribute(&self, ident: &str) -> bool {
        self.attributes.iter().any(|attr| attr.path().is_ident(ident))
    }

    /// Attributes forwarded onto the generated enum variant.
    pub fn forwarded_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|attr| !attr.path().is_ident("no_source"))
    }

    pub fn severity_arm(&self) -> TokenStream {
        let name = &self.name;
        let severity = &self.severity;
        quote! { Self::#name { .. } => #severity }
    }
}

/// Generates the `Loggable` implementation shared by both macros.
pub fn loggable_impl_block(input: &EnumInput) -> TokenStream {
    let enum_name = &input.name;
    let arms = input.variants.iter().map(Variant::severity_arm);
    quote! {
        impl crate::interface::loggable::Loggable for #enum_name {
            fn severity(&self) -> crate::model::log::severity::Severity {
                match self {
                    #(#arms,)*
                }
            }
        }
    }
}

pub fn snake_case(ident: &Ident) -> Ident {
    let source = ident.to_string();
    let mut snake = String::with_capacity(source.len() + 4);
    let mut previous_lower = false;
    for character in source.chars() {
        if character.is_uppercase() {
            if previous_lower {
                snake.push('_');
            }
            snake.extend(character.to_lowercase());
            previous_lower = false;
        } else {
            snake.push(character);
            previous_lower = character.is_lowercase() || character.is_ascii_digit();
        }
    }
    Ident::new(&snake, ident.span())
}
