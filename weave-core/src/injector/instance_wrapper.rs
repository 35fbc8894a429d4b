use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    async_trait,
    compiler::ParamBinding,
    http_helpers::{HttpMethod, HttpRequest, HttpResponse, IntoResponse},
    middleware::{Middleware, MiddlewareChain},
    structs_helpers::EnhancerMetadata,
    traits_helpers::{ControllerTrait, Guard, Interceptor, InterceptorNext, Pipe},
};

/// Locals an `onRequest` hook set on its own pre-middleware `Context`, carried
/// forward so the guard/interceptor/pipe/controller stage's `Context` — built
/// fresh after middleware, which only ever sees the raw `HttpRequest` — still
/// sees them. Empty whenever no hook ran (e.g. `Tier::Simple`).
pub type SeedLocals = HashMap<String, Box<dyn Any + Send + Sync>>;

use super::Context;

/// Represents the next step in the interceptor chain
struct ChainNext {
    interceptors: Vec<Arc<dyn Interceptor>>,
    instance: Arc<Box<dyn ControllerTrait>>,
    pipes: Vec<Arc<dyn Pipe>>,
}

#[async_trait]
impl InterceptorNext for ChainNext {
    async fn run(self: Box<Self>, context: &mut Context) {
        InstanceWrapper::execute_with_interceptors(
            context,
            &self.interceptors,
            &self.instance,
            &self.pipes,
        )
        .await;
    }
}

pub struct InstanceWrapper {
    instance: Arc<Box<dyn ControllerTrait>>,
    guards: Vec<Arc<dyn Guard>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    pipes: Vec<Arc<dyn Pipe>>,
    middleware_chain: MiddlewareChain,
}

impl InstanceWrapper {
    pub fn new(
        instance: Arc<Box<dyn ControllerTrait>>,
        enhancer_metadata: EnhancerMetadata,
        global_enhancers: EnhancerMetadata,
    ) -> Self {
        // Merge enhancers: global first, then controller/method
        // Execution order: global < controller < method
        let mut guards = global_enhancers.guards;
        guards.extend(enhancer_metadata.guards);

        let mut interceptors = global_enhancers.interceptors;
        interceptors.extend(enhancer_metadata.interceptors);

        let mut pipes = global_enhancers.pipes;
        pipes.extend(enhancer_metadata.pipes);

        Self {
            instance,
            guards,
            interceptors,
            pipes,
            middleware_chain: MiddlewareChain::new(),
        }
    }

    pub fn get_path(&self) -> String {
        self.instance.get_path()
    }

    pub fn get_method(&self) -> HttpMethod {
        self.instance.get_method()
    }

    /// Whether any middleware is attached to this route — one input to the route
    /// compiler's tier classification (see [`crate::compiler`]).
    pub fn has_middleware(&self) -> bool {
        !self.middleware_chain.is_empty()
    }

    /// Whether any guard, interceptor, or pipe is attached — the other input to
    /// tier classification alongside [`Self::has_middleware`].
    pub fn has_enhancers(&self) -> bool {
        !self.guards.is_empty() || !self.interceptors.is_empty() || !self.pipes.is_empty()
    }

    /// Whether the underlying controller was constructed per-request — the
    /// scope input to tier classification alongside middleware/enhancer/hook
    /// presence.
    pub fn is_request_scoped(&self) -> bool {
        self.instance.is_request_scoped()
    }

    /// The route's per-parameter binding analysis, forwarded from the
    /// underlying controller for the route compiler to fold into its
    /// `CompiledRoute`.
    pub fn param_bindings(&self) -> Vec<ParamBinding> {
        self.instance.param_bindings()
    }

    pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware_chain.use_middleware(middleware);
    }

    pub fn set_middleware(&mut self, middleware: Vec<Arc<dyn Middleware>>) {
        for m in middleware {
            self.middleware_chain.use_middleware(m);
        }
    }

    pub async fn handle_request(
        &self,
        req: HttpRequest,
        seed_locals: SeedLocals,
    ) -> Box<dyn IntoResponse<Response = HttpResponse> + Send> {
        let instance = self.instance.clone();
        let guards = self.guards.clone();
        let interceptors = self.interceptors.clone();
        let pipes = self.pipes.clone();

        // `seed_locals` only has one consumer (the final handler below), but the
        // middleware chain's `Next` contract calls it through a plain `Fn`, so it
        // has to tolerate being a callable type even though it only ever runs
        // once per request; a `Mutex` lets it be taken without cloning.
        let seed_locals = std::sync::Mutex::new(Some(seed_locals));

        // Execute middleware chain with controller as the final handler
        let middleware_result = self
            .middleware_chain
            .execute(req, move |req| {
                let instance = instance.clone();
                let guards = guards.clone();
                let interceptors = interceptors.clone();
                let pipes = pipes.clone();
                let seed_locals = seed_locals.lock().unwrap().take().unwrap_or_default();

                Box::pin(async move {
                    Self::execute_controller_logic(req, instance, guards, interceptors, pipes, seed_locals).await
                })
            })
            .await;

        // Handle the result from middleware chain
        match middleware_result {
            Ok(response) => Box::new(response),
            Err(e) => {
                // Convert error to HTTP response
                tracing::error!(error = %e, "middleware chain failed");
                let mut error_response = HttpResponse::new();
                error_response.status = 500;
                error_response.body = Some(crate::http_helpers::Body::Json(serde_json::json!({
                    "error": "Internal Server Error",
                    "message": "An error occurred while processing the request"
                })));
                Box::new(error_response)
            }
        }
    }

    /// Execute the controller logic with guards, interceptors, and pipes
    async fn execute_controller_logic(
        req: HttpRequest,
        instance: Arc<Box<dyn ControllerTrait>>,
        guards: Vec<Arc<dyn Guard>>,
        interceptors: Vec<Arc<dyn Interceptor>>,
        pipes: Vec<Arc<dyn Pipe>>,
        seed_locals: SeedLocals,
    ) -> HttpResponse {
        let mut context = Context::from_request(req);
        context.import_locals(seed_locals);

        // Execute guards
        for guard in &guards {
            if !guard.can_activate(&context) {
                return context.get_response().to_response();
            }
        }

        // Execute interceptors wrapping the handler
        Self::execute_with_interceptors(&mut context, &interceptors, &instance, &pipes).await;

        context.get_response().to_response()
    }

    /// Execute handler wrapped by interceptors (onion/Russian doll pattern)
    async fn execute_with_interceptors(
        context: &mut Context,
        interceptors: &[Arc<dyn Interceptor>],
        instance: &Arc<Box<dyn ControllerTrait>>,
        pipes: &[Arc<dyn Pipe>],
    ) {
        // If no interceptors, execute handler directly
        if interceptors.is_empty() {
            Self::execute_handler(context, instance, pipes).await;
            return;
        }

        // Get first interceptor and remaining
        let (first, rest) = interceptors.split_first().unwrap();

        // Create the "next" handler that wraps the rest of the chain
        let next = ChainNext {
            interceptors: rest.to_vec(),
            instance: instance.clone(),
            pipes: pipes.to_vec(),
        };

        // Execute this interceptor with the next chain
        first.intercept(context, Box::new(next)).await;
    }

    /// Execute the actual handler (pipes + controller)
    async fn execute_handler(
        context: &mut Context,
        instance: &Arc<Box<dyn ControllerTrait>>,
        pipes: &[Arc<dyn Pipe>],
    ) {
        // Get and validate DTO
        let dto = instance.get_body_dto(context.take_request()).await;
        if let Some(dto) = dto {
            context.set_dto(dto);
        }

        // Execute pipes
        for pipe in pipes {
            pipe.process(context);
            if context.should_abort() {
                return;
            }
        }

        // Execute controller
        let req = context.take_request().clone();
        let controller_response = instance.execute(req).await;
        context.set_response(controller_response);
    }
}
