use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `SkipNullish` for a struct, enum or union.
///
/// Enum variants tagged `#[scope(nullish)]` count as absent values. Use
/// `#[scope(crate = path)]` when `scopefn` is reachable under another name.
#[proc_macro_derive(SkipNullish, attributes(scope))]
pub fn skip_nullish(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    scopefn_lib::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
