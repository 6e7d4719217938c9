//! `Serializable` derive: attribute list plus `Convert` impl.

mod attributes;
mod convert;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input, parse_quote};

/// How one field is encoded.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Through the field type's own `Convert` impl.
    Native,
    /// Raw memory copy.
    Raw,
    /// Not encoded at all.
    Skip,
}

/// One struct field as the generators see it.
pub struct FieldInfo<'a> {
    /// `self.#member` access path.
    pub member: syn::Member,
    /// Local binding used while constructing on decode.
    pub binding: syn::Ident,
    /// Registered attribute name.
    pub name: String,
    pub ty: &'a syn::Type,
    pub mode: FieldMode,
}

/// Derive `Serializable` and `Convert` for a struct.
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Serializable derive is not supported for enums; encode them with a custom attribute.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Serializable derive is not supported for unions.",
            ));
        }
    };

    let fields = collect_fields(&data.fields)?;
    let generics = add_convert_bounds(input.generics.clone());

    let attributes = attributes::generate(&input.ident, &generics, &fields);
    let convert = convert::generate(&input.ident, &generics, &data.fields, &fields);

    Ok(quote! {
        #attributes
        #convert
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo<'_>>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let (member, name) = match &f.ident {
                Some(ident) => (
                    syn::Member::Named(ident.clone()),
                    syn::ext::IdentExt::unraw(ident).to_string(),
                ),
                None => (syn::Member::Unnamed(syn::Index::from(i)), i.to_string()),
            };
            Ok(FieldInfo {
                member,
                binding: format_ident!("__field{}", i),
                name,
                ty: &f.ty,
                mode: field_mode(f)?,
            })
        })
        .collect()
}

/// Read `#[fieldcast(skip)]` / `#[fieldcast(raw)]` off a field.
pub fn field_mode(field: &syn::Field) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Native;
    for attr in &field.attrs {
        if !attr.path().is_ident("fieldcast") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let next = if meta.path.is_ident("skip") {
                FieldMode::Skip
            } else if meta.path.is_ident("raw") {
                FieldMode::Raw
            } else {
                return Err(meta.error("expected `skip` or `raw`"));
            };
            if mode != FieldMode::Native && mode != next {
                return Err(meta.error("`skip` and `raw` cannot be combined"));
            }
            mode = next;
            Ok(())
        })?;
    }
    Ok(mode)
}

// Every type parameter must itself be encodable.
fn add_convert_bounds(mut generics: syn::Generics) -> syn::Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(fieldcast::Convert));
    }
    generics
}
