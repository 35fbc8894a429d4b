//! The request executor: the thin per-request driver that sits between a
//! matched, compiled route and [`InstanceWrapper`]'s guard/interceptor/pipe/
//! middleware pipeline.
//!
//! A [`Tier::Simple`] route skips hook dispatch entirely and goes straight to
//! the handler — that is the whole point of compiling the tier ahead of time.
//! `Standard` and `Complex` routes run `onRequest`/`onResponse` hooks (if any
//! are registered) around the same call. [`RequestState`] transitions are
//! recorded on a best-effort basis for observability; a skipped or out-of-order
//! transition is logged, never panics (see [`crate::lifecycle`]'s own doc
//! comment on why these state machines are advisory).

use crate::compiler::{CompiledRoute, Tier};
use crate::error::WeaveError;
use crate::hooks::HookDispatcher;
use crate::http_helpers::{HttpRequest, HttpResponse, IntoResponse};
use crate::injector::{Context, InstanceWrapper, LocalsContainer, SeedLocals};
use crate::lifecycle::RequestState;
use crate::traits_helpers::CorsPolicy;

fn advance(current: RequestState, next: RequestState) -> RequestState {
    if !current.can_transition_to(next) {
        tracing::trace!(?current, ?next, "non-standard request state transition");
    }
    next
}

fn error_response(err: WeaveError) -> HttpResponse {
    HttpResponse {
        status: err.status_code(),
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: Some(crate::http_helpers::Body::Json(err.to_envelope())),
    }
}

/// Drives a single request through its compiled route.
pub struct Executor<'a> {
    hooks: &'a HookDispatcher,
    cors: Option<&'a dyn CorsPolicy>,
}

impl<'a> Executor<'a> {
    pub fn new(hooks: &'a HookDispatcher) -> Self {
        Self { hooks, cors: None }
    }

    /// Registers the optional CORS collaborator. Preflight `OPTIONS` requests are
    /// answered before routing; every other response is stamped via `apply` after
    /// shaping. No-op when no policy is registered.
    pub fn with_cors(mut self, cors: &'a dyn CorsPolicy) -> Self {
        self.cors = Some(cors);
        self
    }

    pub async fn execute(
        &self,
        compiled: &CompiledRoute,
        instance: &InstanceWrapper,
        req: HttpRequest,
    ) -> HttpResponse {
        if let Some(cors) = self.cors {
            if cors.is_preflight(&req) {
                return cors.handle_preflight(&req);
            }
        }

        let origin = req
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("origin"))
            .map(|(_, v)| v.clone());

        let mut state = RequestState::Received;
        state = advance(state, RequestState::Routed);

        if compiled.tier == Tier::Simple {
            state = advance(state, RequestState::Invoked);
            let boxed = instance.handle_request(req, SeedLocals::new()).await;
            let response = boxed.to_response();
            advance(state, RequestState::Shaped);
            return self.apply_cors(response, origin.as_deref());
        }

        // `needs_locals` routes get a real `LocalsContainer` for the `onRequest`
        // stage; middleware only ever sees the raw `HttpRequest`/`HttpResponse`,
        // so whatever the hook sets is exported and re-seeded into the `Context`
        // the guard/interceptor/pipe/controller stage builds after middleware runs.
        let mut seed_locals = SeedLocals::new();
        if self.hooks.has_request_hooks() {
            state = advance(state, RequestState::HookPre);
            let mut locals = LocalsContainer::new(Context::from_request(req.clone()));
            if let Err(err) = self.hooks.run_on_request(locals.context_mut()).await {
                return error_response(err);
            }
            seed_locals = locals.into_context().export_locals();
        }

        let response_req = req.clone();
        state = advance(state, RequestState::Invoked);
        let boxed = instance.handle_request(req, seed_locals).await;
        let response = boxed.to_response();

        state = advance(state, RequestState::HookPost);
        let response = if self.hooks.has_response_hooks() {
            let mut ctx = Context::from_request(response_req);
            ctx.set_response(Box::new(response));
            if let Err(err) = self.hooks.run_on_response(&mut ctx).await {
                return error_response(err);
            }
            ctx.get_response().to_response()
        } else {
            response
        };

        advance(state, RequestState::Shaped);
        self.apply_cors(response, origin.as_deref())
    }

    fn apply_cors(&self, response: HttpResponse, origin: Option<&str>) -> HttpResponse {
        match self.cors {
            Some(cors) => cors.apply(response, origin),
            None => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, RouteProfile};
    use crate::provider_scope::ProviderScope;
    use crate::structs_helpers::EnhancerMetadata;
    use crate::traits_helpers::ControllerTrait;
    use crate::http_helpers::{Body, HttpMethod};
    use std::sync::Arc;

    #[derive(Debug)]
    struct PingController;

    #[async_trait::async_trait]
    impl ControllerTrait for PingController {
        fn get_token(&self) -> String {
            "PingController".to_string()
        }

        fn get_path(&self) -> String {
            "/ping".to_string()
        }

        fn get_method(&self) -> HttpMethod {
            HttpMethod::GET
        }

        async fn execute(
            &self,
            _req: HttpRequest,
        ) -> Box<dyn IntoResponse<Response = HttpResponse> + Send> {
            Box::new(Body::Text("pong".to_string()))
        }
    }

    fn make_instance() -> InstanceWrapper {
        InstanceWrapper::new(
            Arc::new(Box::new(PingController) as Box<dyn ControllerTrait>),
            EnhancerMetadata::default(),
            EnhancerMetadata::default(),
        )
    }

    #[tokio::test]
    async fn simple_tier_skips_hooks_and_still_invokes_the_handler() {
        let hooks = HookDispatcher::new();
        let instance = make_instance();
        let profile = RouteProfile {
            scope: ProviderScope::Singleton,
            has_middleware: false,
            has_enhancers: false,
            has_request_hooks: false,
            has_response_hooks: false,
        };
        let compiled = compile(profile, Vec::new());
        assert_eq!(compiled.tier, Tier::Simple);

        let executor = Executor::new(&hooks);
        let response = executor
            .execute(&compiled, &instance, HttpRequest::new("GET", "/ping"))
            .await;

        assert_eq!(response.status, 200);
        assert!(matches!(response.body, Some(Body::Text(ref s)) if s == "pong"));
    }

    struct AllowAllCors;

    impl crate::traits_helpers::CorsPolicy for AllowAllCors {
        fn is_preflight(&self, request: &HttpRequest) -> bool {
            request.method.eq_ignore_ascii_case("OPTIONS")
        }

        fn handle_preflight(&self, _request: &HttpRequest) -> HttpResponse {
            HttpResponse {
                status: 204,
                headers: vec![("Access-Control-Allow-Origin".to_string(), "*".to_string())],
                body: None,
            }
        }

        fn apply(&self, mut response: HttpResponse, _origin: Option<&str>) -> HttpResponse {
            response
                .headers
                .push(("Access-Control-Allow-Origin".to_string(), "*".to_string()));
            response
        }

        fn is_origin_allowed(&self, _origin: &str) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn preflight_request_short_circuits_before_routing() {
        let hooks = HookDispatcher::new();
        let instance = make_instance();
        let cors = AllowAllCors;
        let profile = RouteProfile {
            scope: ProviderScope::Singleton,
            has_middleware: false,
            has_enhancers: false,
            has_request_hooks: false,
            has_response_hooks: false,
        };
        let compiled = compile(profile, Vec::new());

        let executor = Executor::new(&hooks).with_cors(&cors);
        let response = executor
            .execute(&compiled, &instance, HttpRequest::new("OPTIONS", "/ping"))
            .await;

        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn non_preflight_response_is_stamped_by_the_cors_policy() {
        let hooks = HookDispatcher::new();
        let instance = make_instance();
        let cors = AllowAllCors;
        let profile = RouteProfile {
            scope: ProviderScope::Singleton,
            has_middleware: false,
            has_enhancers: false,
            has_request_hooks: false,
            has_response_hooks: false,
        };
        let compiled = compile(profile, Vec::new());

        let executor = Executor::new(&hooks).with_cors(&cors);
        let response = executor
            .execute(&compiled, &instance, HttpRequest::new("GET", "/ping"))
            .await;

        assert!(response
            .headers
            .iter()
            .any(|(k, v)| k == "Access-Control-Allow-Origin" && v == "*"));
    }

    #[tokio::test]
    async fn hook_failure_short_circuits_into_an_error_response() {
        struct FailingHook;

        #[async_trait::async_trait]
        impl crate::hooks::RequestHook for FailingHook {
            async fn run(&self, _ctx: &mut Context) -> anyhow::Result<()> {
                anyhow::bail!("rejected by policy")
            }
        }

        let mut hooks = HookDispatcher::new();
        hooks.register_on_request("guard", 0, Arc::new(FailingHook));
        let instance = make_instance();
        let profile = RouteProfile {
            scope: ProviderScope::Singleton,
            has_middleware: false,
            has_enhancers: false,
            has_request_hooks: true,
            has_response_hooks: false,
        };
        let compiled = compile(profile, Vec::new());
        assert_eq!(compiled.tier, Tier::Standard);

        let executor = Executor::new(&hooks);
        let response = executor
            .execute(&compiled, &instance, HttpRequest::new("GET", "/ping"))
            .await;

        assert_eq!(response.status, 500);
    }
}
