// Copyright (C) 2019-2021 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

#![deny(rustdoc::broken_intra_doc_links, missing_docs)]

//! The attribute macro behind `seqlist_test_log::test`.
//!
//! It wraps a test function so that the seqlist tracing subscriber is
//! installed before the test body runs.

use darling::ast::NestedMeta;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, ItemFn, Meta, ReturnType};

/// A replacement for the `test` attribute that initializes tracing.
///
/// Override `#[test]` for a whole test file by importing it:
/// ```ignore
/// # mod fordoctest {
/// use seqlist_test_log::test;
///
/// #[test]
/// fn it_still_works() {
///   // ...
/// }
/// # }
/// ```
///
/// Another test attribute can be wrapped by passing it as argument, e.g.
/// `#[test(tokio::test)]` for async tests.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(args) => args,
        Err(err) => return TokenStream::from(err.to_compile_error()),
    };
    let input = parse_macro_input!(item as ItemFn);

    let inner_test = match inner_test_attribute(&args) {
        Ok(inner_test) => inner_test,
        Err(err) => return TokenStream::from(err.to_compile_error()),
    };

    expand_wrapper(&inner_test, &input).into()
}

/// Picks the attribute the generated wrapper is annotated with.
fn inner_test_attribute(args: &[NestedMeta]) -> syn::Result<NestedMeta> {
    match args {
        [] => Ok(NestedMeta::Meta(Meta::Path(
            parse_quote! { ::core::prelude::v1::test },
        ))),
        [inner] => Ok(inner.clone()),
        [_, extra, ..] => Err(syn::Error::new_spanned(
            quote! { #extra },
            "at most one inner test attribute is supported",
        )),
    }
}

/// Emit code for a wrapper function around a test function.
fn expand_wrapper(inner_test: &NestedMeta, wrappee: &ItemFn) -> TokenStream2 {
    let attrs = &wrappee.attrs;
    let async_ = &wrappee.sig.asyncness;
    let await_ = if async_.is_some() {
        quote! {.await}
    } else {
        quote! {}
    };
    let body = &wrappee.block;
    let test_name = &wrappee.sig.ident;

    // `#[should_panic]` tests need a unit return type, keep whatever the test declares.
    let ret = match &wrappee.sig.output {
        ReturnType::Default => quote! {},
        ReturnType::Type(_, type_) => quote! {-> #type_},
    };

    quote! {
      #[#inner_test]
      #(#attrs)*
      #async_ fn #test_name() #ret {
        #async_ fn test_impl() #ret {
          #body
        }

        ::seqlist_test_log::initialize();

        test_impl()#await_
      }
    }
}
