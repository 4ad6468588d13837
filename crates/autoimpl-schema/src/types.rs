use crate::prelude::*;
use derive_more::{Display, FromStr};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::fmt;

///
/// ItemKind
/// the declaration kind of a blueprint item
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum ItemKind {
    Enum,
    #[default]
    Struct,
    Trait,
}

///
/// Visibility
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl ToTokens for Visibility {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Self::Public => quote!(pub),
            Self::Crate => quote!(pub(crate)),
            Self::Private => quote!(),
        });
    }
}

///
/// Receiver
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    #[default]
    Ref,
    RefMut,
    Value,
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ref => "&self",
            Self::RefMut => "&mut self",
            Self::Value => "self",
        })
    }
}

impl ToTokens for Receiver {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Self::Ref => quote!(&self),
            Self::RefMut => quote!(&mut self),
            Self::Value => quote!(self),
        });
    }
}

///
/// TypeRef
///
/// A type as written in the schema, e.g. `String` or `Box<dyn crate::Speaker>`.
/// Parsed lazily into a `syn::Type` when rendering.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeRef(pub String);

impl TypeRef {
    pub fn new(ty: impl Into<String>) -> Self {
        Self(ty.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<syn::Type, syn::Error> {
        syn::parse_str(&self.0)
    }

    /// True when the type is the unit type `()`.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.0.chars().all(|c| c.is_whitespace() || c == '(' || c == ')') && !self.0.is_empty()
    }

    /// True when the type is a non-`'static` reference, which keeps it out of
    /// `dyn Any` factories. References nested inside an owned type
    /// (`Box<dyn Fn(&str)>`) do not count.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        self.parse().is_ok_and(|ty| is_borrowed_type(&ty))
    }
}

fn is_borrowed_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Reference(r) => r.lifetime.as_ref().is_none_or(|lt| lt.ident != "static"),
        syn::Type::Paren(p) => is_borrowed_type(&p.elem),
        syn::Type::Group(g) => is_borrowed_type(&g.elem),
        _ => false,
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl ToTokens for TypeRef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self.parse() {
            Ok(ty) => ty.to_tokens(tokens),
            Err(e) => tokens.extend(e.to_compile_error()),
        }
    }
}

///
/// ReturnType
///
/// `Unit` is the distinguished "no value" return kind.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "Option<TypeRef>", into = "Option<TypeRef>")]
pub enum ReturnType {
    #[default]
    Unit,
    Value(TypeRef),
}

impl ReturnType {
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

impl From<Option<TypeRef>> for ReturnType {
    fn from(ty: Option<TypeRef>) -> Self {
        match ty {
            Some(ty) if !ty.is_unit() => Self::Value(ty),
            _ => Self::Unit,
        }
    }
}

impl From<ReturnType> for Option<TypeRef> {
    fn from(ret: ReturnType) -> Self {
        match ret {
            ReturnType::Unit => None,
            ReturnType::Value(ty) => Some(ty),
        }
    }
}

impl ToTokens for ReturnType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        if let Self::Value(ty) = self {
            tokens.extend(quote!(-> #ty));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_refs_collapse_to_unit_return() {
        assert_eq!(ReturnType::from(Some(TypeRef::new("()"))), ReturnType::Unit);
        assert_eq!(ReturnType::from(Some(TypeRef::new("( )"))), ReturnType::Unit);
        assert_eq!(ReturnType::from(None), ReturnType::Unit);
        assert_eq!(
            ReturnType::from(Some(TypeRef::new("String"))),
            ReturnType::Value(TypeRef::new("String"))
        );
    }

    #[test]
    fn visibility_renders_rust_tokens() {
        assert_eq!(Visibility::Public.to_token_stream().to_string(), "pub");
        assert_eq!(
            Visibility::Crate.to_token_stream().to_string(),
            "pub (crate)"
        );
        assert!(Visibility::Private.to_token_stream().is_empty());
    }

    #[test]
    fn only_top_level_non_static_references_are_borrowed() {
        for ty in ["&str", "&'a [u8]", "&mut Vec<u8>", "(&str)"] {
            assert!(TypeRef::new(ty).is_borrowed(), "{ty} should borrow");
        }
        for ty in [
            "&'static str",
            "Box<dyn Fn(&str)>",
            "String",
            "Vec<u8>",
            "fn(&u8) -> bool",
        ] {
            assert!(!TypeRef::new(ty).is_borrowed(), "{ty} should be owned");
        }
    }

    #[test]
    fn invalid_type_ref_renders_compile_error() {
        let tokens = TypeRef::new("Vec<").to_token_stream().to_string();
        assert!(tokens.contains("compile_error"), "got: {tokens}");
    }
}
