use proc_macro::TokenStream;

/// Attribute macro for applying guards to a route handler method or controller impl block.
///
/// `#[controller_struct]`/`#[provider_struct]` read this attribute directly off the raw,
/// unexpanded method/impl tokens while building wrapper metadata, so this macro itself
/// is a passthrough: it exists only so `#[use_guards(...)]` is a recognized attribute
/// when written standalone (e.g. on a handler not wrapped in a generated controller).
///
/// # Example
/// ```rust,ignore
/// #[use_guards(AuthGuard, RoleGuard)]
/// #[get("/admin")]
/// fn admin_panel(&self, req: HttpRequest) -> HttpResponse {
///     // ...
/// }
/// ```
pub fn use_guards_impl(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
