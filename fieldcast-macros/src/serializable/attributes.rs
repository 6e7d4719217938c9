//! `Serializable::attributes` generation.

use super::{FieldInfo, FieldMode};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

pub fn generate(name: &syn::Ident, generics: &syn::Generics, fields: &[FieldInfo<'_>]) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let nodes: Vec<_> = fields
        .iter()
        .filter_map(|f| {
            let member = &f.member;
            let label = &f.name;
            match f.mode {
                FieldMode::Native => Some(quote! {
                    .field(#label, &mut self.#member)
                }),
                FieldMode::Raw => Some(quote! {
                    .field_with(#label, &mut self.#member, fieldcast::Raw)
                }),
                FieldMode::Skip => None,
            }
        })
        .collect();

    quote! {
        impl #impl_generics fieldcast::Serializable for #name #ty_generics #where_clause {
            fn attributes(&mut self) -> fieldcast::AttributeList<'_> {
                fieldcast::AttributeList::new()
                    #(#nodes)*
            }
        }
    }
}
