use crate::{
    ast::{self, Container},
    utils::Errors,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Result};

/// Expands `#[derive(SkipNullish)]` into `SkipNullish` and `SkipNullishRef`
/// impls.
///
/// Types without `#[scope(nullish)]` variants are never empty, so they narrow
/// to `Scope<Self>`. Otherwise the output is `Option<Scope<Self>>` and a marked
/// variant yields `None`.
pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let mut errors = Errors::default();
    let Container { krate } = Container::from_attrs(&input.attrs, &mut errors);
    let nullish = match &input.data {
        Data::Enum(data) => data
            .variants
            .iter()
            .filter(|variant| ast::is_nullish(variant, &mut errors))
            .map(|variant| &variant.ident)
            .collect::<Vec<_>>(),
        Data::Struct(data) => {
            ast::check_fields(&data.fields, &mut errors);
            Vec::new()
        }
        Data::Union(data) => {
            ast::check_fields(&data.fields.named, &mut errors);
            Vec::new()
        }
    };
    errors.finish()?;

    let nullable = !nullish.is_empty();
    let kept = |inner: TokenStream| {
        if nullable {
            quote!(::core::option::Option<#krate::Scope<#inner>>)
        } else {
            quote!(#krate::Scope<#inner>)
        }
    };
    let output = kept(quote!(Self));
    let keep = kept(quote!(__P));
    let by_ref = kept(quote!(&'__scope Self));
    let by_mut = kept(quote!(&'__scope mut Self));

    let (skip_body, keep_body, is_nullish) = if nullable {
        (
            quote!(
                if <Self as #krate::SkipNullishRef>::is_nullish(scope.get()) {
                    ::core::option::Option::None
                } else {
                    ::core::option::Option::Some(scope)
                }
            ),
            quote!(#krate::private::keep_present(scope)),
            quote!(::core::matches!(self, #(Self::#nullish { .. })|*)),
        )
    } else {
        (quote!(scope), quote!(scope), quote!(false))
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote!(
        impl #impl_generics #krate::SkipNullish for #name #ty_generics #where_clause {
            type Output = #output;

            #[inline]
            fn skip_nullish(scope: #krate::Scope<Self>) -> Self::Output {
                #skip_body
            }
        }

        impl #impl_generics #krate::SkipNullishRef for #name #ty_generics #where_clause {
            type Keep<__P> = #keep;
            type Ref<'__scope> = #by_ref where Self: '__scope;
            type Mut<'__scope> = #by_mut where Self: '__scope;

            #[inline]
            fn is_nullish(&self) -> bool {
                #is_nullish
            }

            #[inline]
            fn keep<__P: ::core::ops::Deref<Target = Self>>(
                scope: #krate::Scope<__P>,
            ) -> Self::Keep<__P> {
                #keep_body
            }

            #[inline]
            fn skip_nullish_ref(scope: #krate::Scope<&Self>) -> Self::Ref<'_> {
                #keep_body
            }

            #[inline]
            fn skip_nullish_mut(scope: #krate::Scope<&mut Self>) -> Self::Mut<'_> {
                #keep_body
            }
        }
    ))
}
