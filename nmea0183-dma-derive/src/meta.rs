use std::{collections::HashSet, fmt::Display};

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{
    Attribute, Error, Expr, Ident, Lit, Result, Token, Type, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Paren,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MetaAttributeType {
    Cond,
    Ignore,
    Map,
    ParseAs,
    Parser,
}

impl MetaAttributeType {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "cond" => Some(Self::Cond),
            "ignore" => Some(Self::Ignore),
            "map" => Some(Self::Map),
            "parse_as" => Some(Self::ParseAs),
            "parser" => Some(Self::Parser),
            _ => None,
        }
    }

    fn takes_argument(&self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

impl Display for MetaAttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cond => "cond",
            Self::Ignore => "ignore",
            Self::Map => "map",
            Self::ParseAs => "parse_as",
            Self::Parser => "parser",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub struct MetaAttribute {
    pub r#type: MetaAttributeType,
    arg: Option<TokenStream>,
    span: Span,
}

impl MetaAttribute {
    pub fn arg(&self) -> Result<&TokenStream> {
        self.arg.as_ref().ok_or_else(|| {
            Error::new(
                self.span,
                format!("nmea0183-dma-derive: Attribute `{}` needs an argument", self.r#type),
            )
        })
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl Parse for MetaAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        let r#type = MetaAttributeType::from_ident(&ident).ok_or_else(|| {
            Error::new(ident.span(), "nmea0183-dma-derive: Unknown nmea attribute")
        })?;

        let arg = if r#type.takes_argument() {
            let token_stream = match r#type {
                MetaAttributeType::ParseAs => parse_argument::<Type>(input)?,
                _ => parse_argument::<Expr>(input)?,
            };
            Some(token_stream)
        } else {
            None
        };

        Ok(Self {
            r#type,
            arg,
            span: ident.span(),
        })
    }
}

fn parse_argument<P>(input: ParseStream) -> Result<TokenStream>
where
    P: Parse + ToTokens,
{
    if input.peek(Token![=]) {
        let _: Token![=] = input.parse()?;
        match Lit::parse(input)? {
            Lit::Str(string) => {
                let parsed: P = string.parse()?;
                Ok(quote! { #parsed })
            }
            value => Err(Error::new(
                value.span(),
                "nmea0183-dma-derive: Expected a string literal",
            )),
        }
    } else if input.peek(Paren) {
        let content;
        parenthesized!(content in input);
        let parsed: P = content.parse()?;
        Ok(quote! { #parsed })
    } else {
        Err(Error::new(
            input.span(),
            "nmea0183-dma-derive: Expected '= <value>' or '(<value>)' for nmea attribute",
        ))
    }
}

/// Collects the `#[nmea(...)]` attributes of a field.
pub fn parse_field_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    let mut seen = HashSet::new();
    let mut attributes = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("nmea")) {
        let list = attr.parse_args_with(Punctuated::<MetaAttribute, Token![,]>::parse_terminated)?;

        for meta in list {
            if !seen.insert(meta.r#type) {
                return Err(Error::new(
                    meta.span(),
                    format!("nmea0183-dma-derive: Duplicate nmea attribute `{}`", meta.r#type),
                ));
            }
            attributes.push(meta);
        }
    }

    if seen.contains(&MetaAttributeType::Parser) && seen.contains(&MetaAttributeType::ParseAs) {
        return Err(Error::new(
            Span::call_site(),
            "nmea0183-dma-derive: Attributes `parser` and `parse_as` cannot be combined",
        ));
    }

    if seen.contains(&MetaAttributeType::Ignore) && seen.len() > 1 {
        return Err(Error::new(
            Span::call_site(),
            "nmea0183-dma-derive: Attribute `ignore` cannot be combined with other attributes",
        ));
    }

    Ok(attributes)
}
