//! Ahead-of-time route compiler: classifies each route into one of three tiers
//! so the executor can take the cheapest correct path.
//!
//! Classification runs once, right after the instance loader pre-instantiates
//! singleton controllers and the scope resolver has bubbled effective scopes.
//! `RouteProfile` captures exactly the facts the tier rule depends on —
//! everything else about a route (path, method, the `InstanceWrapper` itself) is
//! irrelevant to the classification and deliberately left out so the rule stays
//! easy to test in isolation.

use crate::injector::InstanceWrapper;
use crate::provider_scope::ProviderScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Singleton controller, no middleware, no guard/interceptor/pipe, no
    /// `onRequest`/`onResponse` hook registered anywhere in the application.
    /// Dispatch touches only the router lookup, the bound handler, and response
    /// shaping.
    Simple,
    /// Singleton controller, but middleware, an enhancer, or a hook is present.
    Standard,
    /// Controller scope bubbled to `Request` (or is `Transient`) — not
    /// instantiable once at compile time, so a fresh instance is needed per
    /// resolution.
    Complex,
}

/// The facts a route's tier depends on, gathered once at compile time.
#[derive(Debug, Clone, Copy)]
pub struct RouteProfile {
    pub scope: ProviderScope,
    pub has_middleware: bool,
    pub has_enhancers: bool,
    pub has_request_hooks: bool,
    pub has_response_hooks: bool,
}

impl RouteProfile {
    /// Reads the middleware/enhancer facts straight off an already-built
    /// `InstanceWrapper`; hook presence is an application-wide fact the caller
    /// supplies from the [`crate::hooks::HookDispatcher`].
    pub fn from_instance(
        instance: &InstanceWrapper,
        scope: ProviderScope,
        has_request_hooks: bool,
        has_response_hooks: bool,
    ) -> Self {
        Self {
            scope,
            has_middleware: instance.has_middleware(),
            has_enhancers: instance.has_enhancers(),
            has_request_hooks,
            has_response_hooks,
        }
    }
}

/// The binding source a route parameter is declared against — produced from a
/// handler argument's marker attribute instead of left to a call-time
/// `FromRequest` impl. `Headers`/`Req`/`Locals`/`Di` are carried here as
/// destinations the binder recognizes, but today only `#[body]`, `#[query]`,
/// and `#[param]` are ever produced by the macro expansion (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Body,
    Query,
    Param,
    Headers,
    Req,
    Locals,
    Di,
}

/// One handler argument's parameter binding, as the macro expansion records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamBinding {
    pub kind: ParamKind,
    /// The query/path key this binding reads, where applicable (`None` for
    /// `Body`/`Req`/`Locals`/`Di`).
    pub key: Option<String>,
    pub declared_type: String,
}

/// Classification decision plus the flags the executor needs to drive dispatch
/// without re-deriving them. Pure data: no reference back to the route itself,
/// so compiling the same profile twice is trivially idempotent (see tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    pub tier: Tier,
    /// Whether the handler may touch request-scoped providers or middleware
    /// state. Always false for `Simple`.
    pub needs_locals: bool,
    pub has_middlewares: bool,
    /// Per-parameter binding analysis, in declaration order.
    pub param_infos: Vec<ParamBinding>,
    /// Whether any parameter binds the body — the only binding kind the
    /// `Validatable` blanket impl can run validation against today.
    pub has_validation: bool,
    /// Indices into `param_infos` that need validation.
    pub validation_indices: Vec<usize>,
    /// True whenever a body binding is present. A body binding always needs an
    /// async read off the `BodyReader`, so this tracks "the bound invoker must
    /// await the body" rather than literal `async fn`-ness (every generated
    /// `ControllerTrait::execute` is `async fn` regardless).
    pub is_async: bool,
}

pub fn classify(profile: &RouteProfile) -> Tier {
    if profile.scope != ProviderScope::Singleton {
        return Tier::Complex;
    }
    if profile.has_middleware
        || profile.has_enhancers
        || profile.has_request_hooks
        || profile.has_response_hooks
    {
        return Tier::Standard;
    }
    Tier::Simple
}

pub fn compile(profile: RouteProfile, param_infos: Vec<ParamBinding>) -> CompiledRoute {
    let tier = classify(&profile);

    let validation_indices: Vec<usize> = param_infos
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == ParamKind::Body)
        .map(|(i, _)| i)
        .collect();
    let has_validation = !validation_indices.is_empty();
    let is_async = has_validation;

    CompiledRoute {
        tier,
        needs_locals: tier != Tier::Simple,
        has_middlewares: profile.has_middleware,
        param_infos,
        has_validation,
        validation_indices,
        is_async,
    }
}
