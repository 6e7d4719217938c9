//! `Convert` generation for derived structs.

use super::{FieldInfo, FieldMode};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::Fields;

pub fn generate(
    name: &syn::Ident,
    generics: &syn::Generics,
    shape: &Fields,
    fields: &[FieldInfo<'_>],
) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let encoded: Vec<_> = fields.iter().filter(|f| f.mode != FieldMode::Skip).collect();

    let writes = encoded.iter().map(|f| {
        let member = &f.member;
        let ty = f.ty;
        match f.mode {
            FieldMode::Raw => quote! {
                <fieldcast::Raw as fieldcast::Convertor<#ty>>::encode(&fieldcast::Raw, &self.#member, cursor)?;
            },
            _ => quote! {
                <#ty as fieldcast::Convert>::encode(&self.#member, cursor)?;
            },
        }
    });

    let reads = fields.iter().map(|f| {
        let binding = &f.binding;
        let ty = f.ty;
        match f.mode {
            FieldMode::Native => quote! {
                let #binding = <#ty as fieldcast::Convert>::decode(reader)?;
            },
            FieldMode::Raw => quote! {
                let #binding = <fieldcast::Raw as fieldcast::Convertor<#ty>>::decode(&fieldcast::Raw, reader)?;
            },
            FieldMode::Skip => quote! {
                let #binding: #ty = ::core::default::Default::default();
            },
        }
    });

    let bindings = fields.iter().map(|f| &f.binding);
    let constructor = match shape {
        Fields::Named(_) => {
            let members = fields.iter().map(|f| &f.member);
            quote! { #name { #(#members: #bindings),* } }
        }
        Fields::Unnamed(_) => quote! { #name(#(#bindings),*) },
        Fields::Unit => quote! { #name },
    };

    let sizes = encoded.iter().map(|f| {
        let ty = f.ty;
        match f.mode {
            FieldMode::Raw => quote! { ::core::option::Option::Some(::core::mem::size_of::<#ty>()) },
            _ => quote! { <#ty as fieldcast::Convert>::MAX_SIZE },
        }
    });

    let lens = encoded.iter().map(|f| {
        let member = &f.member;
        let ty = f.ty;
        match f.mode {
            FieldMode::Raw => quote! { ::core::mem::size_of::<#ty>() },
            _ => quote! { <#ty as fieldcast::Convert>::byte_len(&self.#member)? },
        }
    });

    quote! {
        impl #impl_generics fieldcast::Convert for #name #ty_generics #where_clause {
            const KIND: fieldcast::Kind = fieldcast::Kind::Value;
            const MAX_SIZE: ::core::option::Option<usize> = {
                let total: ::core::option::Option<usize> = ::core::option::Option::Some(0);
                #(
                    let total = match (total, #sizes) {
                        (::core::option::Option::Some(a), ::core::option::Option::Some(b)) => a.checked_add(b),
                        _ => ::core::option::Option::None,
                    };
                )*
                total
            };

            #[allow(unused_variables)]
            fn encode(&self, cursor: &mut fieldcast::ByteCursor<'_>) -> fieldcast::Result<()> {
                #(#writes)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn decode(reader: &mut fieldcast::ByteReader<'_>) -> fieldcast::Result<Self> {
                #(#reads)*
                ::core::result::Result::Ok(#constructor)
            }

            // In place, so nullable pointer fields release before re-decode.
            fn decode_into(&mut self, reader: &mut fieldcast::ByteReader<'_>) -> fieldcast::Result<()> {
                fieldcast::Serializable::attributes(self).decode_all(reader)
            }

            fn byte_len(&self) -> ::core::option::Option<usize> {
                let total = 0usize;
                #(let total = total.checked_add(#lens)?;)*
                ::core::option::Option::Some(total)
            }
        }
    }
}
