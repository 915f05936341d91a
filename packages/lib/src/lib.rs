mod ast;
mod skip_nullish;
mod utils;

#[doc(inline)]
pub use skip_nullish::expand;

mod kw {
    use syn::custom_keyword;

    custom_keyword!(nullish);
}
