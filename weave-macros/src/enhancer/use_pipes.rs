use proc_macro::TokenStream;

/// Attribute macro for applying pipes to a route handler method or controller impl
/// block. See [`super::use_guards::use_guards_impl`] for why this is a passthrough.
pub fn use_pipes_impl(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
