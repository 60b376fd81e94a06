//! jwtkit macros
//!
//! This crate provides the `#[claims]` attribute macro.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Turns a struct into a structured claims type.
///
/// Adds the registered claim fields, each optional and skipped when absent on
/// serialization:
/// - Issuer (`iss`) as `issuer: Option<String>`
/// - Subject (`sub`) as `subject: Option<String>`
/// - Audience (`aud`) as `audience: Option<Audience>`
/// - Expiration (`exp`) as `expiration: Option<NumericDate>`
/// - Not Before (`nbf`) as `not_before: Option<NumericDate>`
/// - Issued At (`iat`) as `issued_at: Option<NumericDate>`
/// - JWT ID (`jti`) as `jwt_id: Option<String>`
///
/// Derives `Debug`, `Clone`, `Serialize` and `Deserialize`, and implements
/// `StandardClaims` and `StructuredClaims`. Other attributes on the struct,
/// such as extra derives, are kept.
#[proc_macro_attribute]
pub fn claims(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[claims] does not take arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let generics = &input.generics;

    let existing_fields = if let syn::Data::Struct(syn::DataStruct {
        fields: syn::Fields::Named(fields),
        ..
    }) = &input.data
    {
        &fields.named
    } else {
        return syn::Error::new_spanned(
            struct_name,
            "#[claims] can only be applied to structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let expanded = quote! {
        #(#attrs)*
        #[derive(
            Debug,
            Clone,
            ::jwtkit::__private::serde::Serialize,
            ::jwtkit::__private::serde::Deserialize
        )]
        #[serde(crate = "::jwtkit::__private::serde")]
        #vis struct #struct_name #generics #where_clause {
            #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
            pub issuer: Option<String>,
            #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
            pub subject: Option<String>,
            #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
            pub audience: Option<::jwtkit::claims::Audience>,
            #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
            pub expiration: Option<::jwtkit::claims::NumericDate>,
            #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
            pub not_before: Option<::jwtkit::claims::NumericDate>,
            #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
            pub issued_at: Option<::jwtkit::claims::NumericDate>,
            #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
            pub jwt_id: Option<String>,

            #existing_fields
        }

        impl #impl_generics ::jwtkit::claims::StandardClaims for #struct_name #ty_generics #where_clause {
            fn expiration(&self) -> ::core::result::Result<Option<::jwtkit::claims::NumericDate>, ::jwtkit::ClaimError> {
                Ok(self.expiration)
            }

            fn not_before(&self) -> ::core::result::Result<Option<::jwtkit::claims::NumericDate>, ::jwtkit::ClaimError> {
                Ok(self.not_before)
            }

            fn issued_at(&self) -> ::core::result::Result<Option<::jwtkit::claims::NumericDate>, ::jwtkit::ClaimError> {
                Ok(self.issued_at)
            }

            fn audience(&self) -> ::core::result::Result<Option<::jwtkit::claims::Audience>, ::jwtkit::ClaimError> {
                Ok(self.audience.clone())
            }

            fn issuer(&self) -> ::core::result::Result<Option<&str>, ::jwtkit::ClaimError> {
                Ok(self.issuer.as_deref())
            }

            fn subject(&self) -> ::core::result::Result<Option<&str>, ::jwtkit::ClaimError> {
                Ok(self.subject.as_deref())
            }

            fn jwt_id(&self) -> ::core::result::Result<Option<&str>, ::jwtkit::ClaimError> {
                Ok(self.jwt_id.as_deref())
            }
        }

        impl #impl_generics ::jwtkit::claims::StructuredClaims for #struct_name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
