extern crate proc_macro2;

use controller_macro::controller_struct::handle_controller_struct;
use enhancer::use_guards::use_guards_impl;
use enhancer::use_interceptors::use_interceptors_impl;
use enhancer::use_pipes::use_pipes_impl;
use middleware_macro::middleware_struct::handle_middleware_struct;
use proc_macro::TokenStream;
use proc_macro2::Span;
use provider_macro::provider_struct::handle_provider_struct;
use syn::Ident;

mod config_macro;
mod controller_macro;
mod enhancer;
mod markers_params;
mod middleware_macro;
mod module_macro;
mod provider_macro;
mod provider_variants;
mod shared;
mod utils;

/// Declares a module, wiring its controllers, providers and imports into
/// the dependency graph the container scans at boot.
#[proc_macro_attribute]
pub fn module(attr: TokenStream, item: TokenStream) -> TokenStream {
    module_macro::module_struct::module(attr, item)
}

/// Turns a struct + impl block into a fully wired controller: one manager
/// per HTTP handler, with constructor/field dependencies resolved through
/// the container and scope elevated to Request where a dependency demands it.
///
/// ```rust,ignore
/// #[controller_struct(pub struct AppController { service: AppService })]
/// #[controller("/app")]
/// impl AppController {
///     #[get("/info")]
///     async fn get_info(&self, req: HttpRequest) -> HttpResponse {
///         self.service.get_app_info()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller_struct(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    let item = proc_macro2::TokenStream::from(item);
    let trait_name = Ident::new("ControllerTrait", Span::call_site());
    let output = handle_controller_struct(attr, item, trait_name);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Marks the route prefix on a controller impl block. Consumed as raw,
/// unexpanded syntax by `#[controller_struct]`, never invoked independently.
#[proc_macro_attribute]
pub fn controller(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Turns a struct + impl block into a provider: a manager that resolves the
/// struct's constructor/field dependencies from the container and exposes the
/// instance (or a fresh one, per scope) to consumers.
#[proc_macro_attribute]
pub fn provider_struct(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    let item = proc_macro2::TokenStream::from(item);
    let trait_name = Ident::new("ProviderTrait", Span::call_site());
    let output = handle_provider_struct(attr, item, trait_name);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Alias for `#[provider_struct]` matching the common "injectable" decorator name.
#[proc_macro_attribute]
pub fn injectable(attr: TokenStream, item: TokenStream) -> TokenStream {
    provider_struct(attr, item)
}

/// Registers a non-struct provider: a constant/computed value bound to a token.
#[proc_macro]
pub fn provider_value(input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    let output = provider_variants::handle_provider_value(input);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Registers a factory provider: a closure evaluated (with its own
/// dependencies resolved) the first time the token is requested.
#[proc_macro]
pub fn provider_factory(input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    let output = provider_variants::handle_provider_factory(input);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Registers an alias provider: a second token resolving to an existing provider's instance.
#[proc_macro]
pub fn provider_alias(input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    let output = provider_variants::handle_provider_alias(input);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Registers a provider under an explicit string token rather than a type name.
#[proc_macro]
pub fn provider_token(input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    let output = provider_variants::handle_provider_token(input);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Unified `provide!` entry point dispatching to the value/factory/alias/token
/// provider variant based on the shape of its arguments.
#[proc_macro]
pub fn provide(input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    let output = provider_variants::handle_provide(input);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Turns a struct + impl block into a `Middleware` implementation invoked on
/// the request path leading up to the matched route's handler.
#[proc_macro_attribute]
pub fn middleware_struct(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    let item = proc_macro2::TokenStream::from(item);
    let output = handle_middleware_struct(attr, item);
    proc_macro::TokenStream::from(output.unwrap_or_else(|e| e.to_compile_error()))
}

/// Derives `FromEnv`/`Validate` for a typed configuration struct, reading
/// `#[env("KEY")]`/`#[default(..)]`/`#[nested]` field attributes.
#[proc_macro_derive(Config, attributes(env, default, nested))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    config_macro::derive_config(input)
}

#[proc_macro_attribute]
pub fn get(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
#[proc_macro_attribute]
pub fn post(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
#[proc_macro_attribute]
pub fn put(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
#[proc_macro_attribute]
pub fn delete(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
#[proc_macro_attribute]
pub fn patch(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
#[proc_macro_attribute]
pub fn options(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
#[proc_macro_attribute]
pub fn head(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Attaches guards to a handler method or controller impl block.
///
/// `#[controller_struct]` reads `#[use_guards(...)]` directly off the raw,
/// unexpanded method/impl attributes while building wrapper metadata, so
/// this macro itself only needs to be a recognized, inert passthrough.
#[proc_macro_attribute]
pub fn use_guards(attr: TokenStream, item: TokenStream) -> TokenStream {
    use_guards_impl(attr, item)
}

/// Attaches interceptors to a handler method or controller impl block. See
/// [`use_guards`] for why this is a passthrough.
#[proc_macro_attribute]
pub fn use_interceptors(attr: TokenStream, item: TokenStream) -> TokenStream {
    use_interceptors_impl(attr, item)
}

/// Attaches pipes to a handler method or controller impl block. See
/// [`use_guards`] for why this is a passthrough.
#[proc_macro_attribute]
pub fn use_pipes(attr: TokenStream, item: TokenStream) -> TokenStream {
    use_pipes_impl(attr, item)
}
