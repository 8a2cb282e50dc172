use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, Field, Fields, GenericArgument, GenericParam, Ident, Lifetime,
    LifetimeParam, PathArguments, Result, Type, WhereClause, parse_quote, parse2,
};

use crate::meta::{self, MetaAttributeType};

// Usage:
// #[derive(FromSentence)]
// pub struct MySentence<'a> {
//     pub count: u8,
//     #[nmea(parse_as(Option<u16>), map(|x: Option<u16>| x.unwrap_or(0)))]
//     pub id: u16,
//     #[nmea(cond(count > 1))]
//     pub extra: Option<&'a str>,
//     #[nmea(ignore)]
//     pub computed: u32,
// }

enum Parser {
    Cond {
        parser: Box<Parser>,
        condition: TokenStream,
    },
    Into(Box<Parser>),
    Map {
        parser: Box<Parser>,
        map: TokenStream,
    },
    Raw(TokenStream),
    Type(Box<Type>),
}

impl Parser {
    fn from_field(field: &Field) -> Result<Option<Self>> {
        let attributes = meta::parse_field_attributes(&field.attrs)?;
        let find = |r#type: MetaAttributeType| attributes.iter().find(|meta| meta.r#type == r#type);

        if find(MetaAttributeType::Ignore).is_some() {
            return Ok(None);
        }

        let condition = find(MetaAttributeType::Cond);
        let ty = match condition {
            Some(meta) => option_inner(&field.ty).ok_or_else(|| {
                Error::new(
                    meta.span(),
                    "nmea0183-dma-derive: Attribute `cond` requires an `Option` field",
                )
            })?,
            None => field.ty.clone(),
        };

        let mut parser = if let Some(meta) = find(MetaAttributeType::Parser) {
            Self::Raw(meta.arg()?.clone())
        } else if let Some(meta) = find(MetaAttributeType::ParseAs) {
            Self::Type(Box::new(parse2(meta.arg()?.clone())?))
        } else {
            Self::Type(Box::new(ty))
        };

        if let Some(meta) = find(MetaAttributeType::Map) {
            parser = Self::Map {
                parser: Box::new(parser),
                map: meta.arg()?.clone(),
            };
        } else if find(MetaAttributeType::ParseAs).is_some() {
            parser = Self::Into(Box::new(parser));
        }

        if let Some(meta) = condition {
            parser = Self::Cond {
                parser: Box::new(parser),
                condition: meta.arg()?.clone(),
            };
        }

        Ok(Some(parser))
    }

    fn to_expr(&self, input: &Ident, lifetime: &Lifetime) -> TokenStream {
        match self {
            Self::Cond { parser, condition } => {
                let parser = parser.to_expr(input, lifetime);
                quote! {
                    if #condition {
                        ::core::option::Option::Some(#parser)
                    } else {
                        ::core::option::Option::None
                    }
                }
            }
            Self::Into(parser) => {
                let parser = parser.to_expr(input, lifetime);
                quote! { ::core::convert::Into::into(#parser) }
            }
            Self::Map { parser, map } => {
                let parser = parser.to_expr(input, lifetime);
                quote! { (#map)(#parser) }
            }
            Self::Raw(parser) => quote! { (#parser)(#input)? },
            Self::Type(ty) => {
                quote! { <#ty as nmea0183_dma::FromSentence<#lifetime>>::from_fields(#input)? }
            }
        }
    }
}

fn option_inner(ty: &Type) -> Option<Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner.clone()),
            _ => None,
        },
        _ => None,
    }
}

pub fn generate_from_sentence_impl(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new(
            input.ident.span(),
            "nmea0183-dma-derive: Only structs are supported",
        ));
    };

    let name = &input.ident;
    let fields_name = Ident::new("nmea_fields", Span::call_site());

    // Borrow fields for the struct's own lifetime when it has one.
    let (lifetime, declare_lifetime) = match input.generics.lifetimes().next() {
        Some(param) => (param.lifetime.clone(), false),
        None => (Lifetime::new("'nmea", Span::call_site()), true),
    };

    let mut bindings = Vec::new();
    let mut variables = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        let variable = field
            .ident
            .clone()
            .unwrap_or_else(|| format_ident!("field_{index}"));
        let value = match Parser::from_field(field)? {
            Some(parser) => parser.to_expr(&fields_name, &lifetime),
            None => quote! { ::core::default::Default::default() },
        };

        bindings.push(quote! { let #variable = #value; });
        variables.push(variable);
    }

    let construct = match &data.fields {
        Fields::Named(_) => quote! { #name { #(#variables),* } },
        Fields::Unnamed(_) => quote! { #name(#(#variables),*) },
        Fields::Unit => quote! { #name },
    };

    let mut generics = input.generics.clone();
    if declare_lifetime {
        generics
            .params
            .insert(0, GenericParam::Lifetime(LifetimeParam::new(lifetime.clone())));
    }
    let (impl_generics, _, _) = generics.split_for_impl();
    let (_, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut impl_where: WhereClause = match where_clause {
        Some(where_clause) => where_clause.clone(),
        None => parse_quote!(where),
    };
    for param in input.generics.type_params() {
        let param = &param.ident;
        impl_where
            .predicates
            .push(parse_quote!(#param: nmea0183_dma::FromSentence<#lifetime>));
    }

    Ok(quote! {
        impl #impl_generics nmea0183_dma::FromSentence<#lifetime> for #name #ty_generics #impl_where {
            #[allow(unused_variables)]
            fn from_fields(
                #fields_name: &mut nmea0183_dma::Fields<#lifetime>,
            ) -> nmea0183_dma::ContentResult<&#lifetime str, Self> {
                #(#bindings)*
                Ok(#construct)
            }
        }
    })
}
