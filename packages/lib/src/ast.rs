use crate::{kw, utils::Errors, utils::NamedArg};
use syn::{
    parse::{Parse, ParseStream},
    parse_quote,
    punctuated::Punctuated,
    Attribute, Field, Path, Result, Token, Variant,
};

const ATTR: &str = "scope";

pub enum ScopeArg {
    /// `crate = path::to::scopefn`
    Crate(NamedArg<Token![crate], Path>),
    /// `nullish`
    Nullish(kw::nullish),
}

impl Parse for ScopeArg {
    fn parse(input: ParseStream) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(Token![crate]) {
            input.parse().map(ScopeArg::Crate)
        } else if lookahead.peek(kw::nullish) {
            input.parse().map(ScopeArg::Nullish)
        } else {
            Err(lookahead.error())
        }
    }
}

fn scope_args(attrs: &[Attribute], errors: &mut Errors) -> Vec<ScopeArg> {
    let mut args = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path.is_ident(ATTR)) {
        match attr.parse_args_with(Punctuated::<ScopeArg, Token![,]>::parse_terminated) {
            Ok(parsed) => args.extend(parsed),
            Err(err) => errors.push(err),
        }
    }
    args
}

pub struct Container {
    pub krate: Path,
}

impl Container {
    pub fn from_attrs(attrs: &[Attribute], errors: &mut Errors) -> Self {
        let mut krate = None;
        for arg in scope_args(attrs, errors) {
            match arg {
                ScopeArg::Crate(arg) if krate.is_some() => {
                    errors.push_spanned(arg, "duplicate `crate` argument")
                }
                ScopeArg::Crate(arg) => krate = Some(arg.content),
                ScopeArg::Nullish(kw) => {
                    errors.push_spanned(kw, "`nullish` is only supported on enum variants")
                }
            }
        }
        Self {
            krate: krate.unwrap_or_else(|| parse_quote!(::scopefn)),
        }
    }
}

/// Whether the variant carries `#[scope(nullish)]`.
pub fn is_nullish(variant: &Variant, errors: &mut Errors) -> bool {
    let mut nullish = false;
    for arg in scope_args(&variant.attrs, errors) {
        match arg {
            ScopeArg::Nullish(kw) if nullish => {
                errors.push_spanned(kw, "duplicate `nullish` argument")
            }
            ScopeArg::Nullish(_) => nullish = true,
            ScopeArg::Crate(arg) => {
                errors.push_spanned(arg, "`crate` is only supported on the container")
            }
        }
    }
    check_fields(variant.fields.iter(), errors);
    nullish
}

pub fn check_fields<'a>(fields: impl IntoIterator<Item = &'a Field>, errors: &mut Errors) {
    for field in fields {
        for attr in field.attrs.iter().filter(|attr| attr.path.is_ident(ATTR)) {
            errors.push_spanned(attr, "`#[scope]` is not supported on fields");
        }
    }
}
