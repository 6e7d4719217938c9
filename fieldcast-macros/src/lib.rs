//! Derive macro for fieldcast.

use proc_macro::TokenStream;
mod serializable;

/// Derive `Serializable` and `Convert` for a struct.
///
/// Fields are encoded in declaration order. Field attributes:
///
/// - `#[fieldcast(skip)]`: not encoded; `Default::default()` on decode
/// - `#[fieldcast(raw)]`: raw memory copy through `fieldcast::Raw`
#[proc_macro_derive(Serializable, attributes(fieldcast))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    serializable::derive_serializable(input)
}
