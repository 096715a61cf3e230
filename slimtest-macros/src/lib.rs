//! Procedural macros for the slimtest harness
//!
//! This crate provides the `#[def_test]` attribute macro for marking test functions.
//! Tests are collected into a link-time slice and run with `slimtest::run_tests()`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, ItemFn, LitStr};

/// Marks a function as a test case and registers it before `main` runs.
///
/// # Example
///
/// ```rust,ignore
/// use slimtest::{assert_equal, def_test};
///
/// #[def_test]
/// fn test_addition() {
///     let a = 2 + 2;
///     assert_equal!(a, 4);
/// }
/// ```
///
/// The function must take no arguments and return nothing; its outcome is read
/// from the assertion counters. It stays an ordinary function and can still
/// be called directly.
///
/// # Attributes
/// - `#[def_test]` - reported under the function's name
/// - `#[def_test(name = "...")]` - reported under the given name
#[proc_macro_attribute]
pub fn def_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let mut display_name: Option<LitStr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            display_name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported def_test attribute, expected `name = \"...\"`"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    expand(display_name, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(display_name: Option<LitStr>, input: ItemFn) -> syn::Result<TokenStream2> {
    check_signature(&input)?;

    let fn_name = &input.sig.ident;
    let fn_name_str = match display_name {
        Some(lit) => lit.value(),
        None => fn_name.to_string(),
    };

    // Generate a unique identifier for the test descriptor
    let descriptor_name = format_ident!(
        "__SLIMTEST_DESCRIPTOR_{}",
        fn_name.to_string().to_uppercase()
    );

    Ok(quote! {
        #input

        #[::slimtest::__private::distributed_slice(::slimtest::__private::TEST_CASES)]
        #[linkme(crate = ::slimtest::__private::linkme)]
        #[allow(non_upper_case_globals)]
        static #descriptor_name: ::slimtest::TestCase = ::slimtest::TestCase::new(
            #fn_name_str,
            module_path!(),
            file!(),
            line!(),
            #fn_name,
        );
    })
}

fn check_signature(input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;
    if !sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "test functions take no arguments",
        ));
    }
    if !matches!(sig.output, syn::ReturnType::Default) {
        return Err(syn::Error::new_spanned(
            &sig.output,
            "test functions return nothing; failures are recorded by the assertion macros",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig.asyncness,
            "async test functions are not supported",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "test functions cannot be generic",
        ));
    }
    Ok(())
}
