use anyhow::{Context as _, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

use axum::{Router, body::Body, http::Request};

use crate::{
    compiler::{compile, CompiledRoute, RouteProfile},
    error::WeaveError,
    hooks::HookDispatcher,
    http_adapter::HttpAdapter,
    http_helpers::{Body as WeaveBody, HttpMethod, HttpResponse},
    injector::InstanceWrapper,
    provider_scope::ProviderScope,
    router::{Matched, RadixRouter},
};

use super::{AxumRouteAdapter, RouteAdapter};

/// The store held at each radix-tree terminal: the route's `InstanceWrapper`
/// alongside the `CompiledRoute` the compiler produced for it at registration
/// time — the compile-time-specialized stand-in for the "bound handler".
struct CompiledRouteEntry {
    instance: Arc<InstanceWrapper>,
    compiled: CompiledRoute,
}

#[derive(Clone)]
pub struct AxumAdapter {
    router: Arc<RadixRouter<Arc<CompiledRouteEntry>>>,
    hooks: Arc<HookDispatcher>,
}

impl HttpAdapter for AxumAdapter {
    fn new() -> Self {
        Self {
            router: Arc::new(RadixRouter::new()),
            hooks: Arc::new(HookDispatcher::new()),
        }
    }

    fn set_hooks(&mut self, hooks: Arc<HookDispatcher>) {
        self.hooks = hooks;
    }

    /// Classifies the route (scope + middleware/enhancer/hook facts, per
    /// [`crate::compiler`]) and inserts it into the radix router under
    /// `(method, path)`. Registration runs sequentially before `listen` ever
    /// shares the router with request-handling tasks, so the `Arc::get_mut`
    /// here never actually contends.
    fn add_route(&mut self, path: &str, method: HttpMethod, handler: Arc<InstanceWrapper>) {
        let scope = if handler.is_request_scoped() {
            ProviderScope::Request
        } else {
            ProviderScope::Singleton
        };
        let profile = RouteProfile::from_instance(
            &handler,
            scope,
            self.hooks.has_request_hooks(),
            self.hooks.has_response_hooks(),
        );
        let compiled = compile(profile, handler.param_bindings());

        tracing::debug!(%path, ?method, tier = ?compiled.tier, "registering route");

        let entry = Arc::new(CompiledRouteEntry {
            instance: handler,
            compiled,
        });

        let router = Arc::get_mut(&mut self.router)
            .expect("route registration runs before the router is shared with request handlers");
        if let Err(err) = router.add(method, path, entry) {
            tracing::error!(%path, ?method, error = %err, "failed to register route");
        }
    }

    async fn listen(self, port: u16, hostname: &str) -> Result<()> {
        let AxumAdapter { router, hooks } = self;

        let app: Router = Router::new().fallback(move |req: Request<Body>| {
            let router = router.clone();
            let hooks = hooks.clone();
            async move { dispatch(req, router, hooks).await }
        });

        let addr = format!("{}:{}", hostname, port);
        let listener: TcpListener = TcpListener::bind(&addr).await?;

        tracing::info!(%addr, "listening");

        axum::serve(listener, app)
            .await
            .with_context(|| "Axum server encountered an error")?;
        Ok(())
    }
}

/// The live request path: radix-router match, executor dispatch (which itself
/// runs tier-appropriate hook/middleware handling), then response shaping.
/// Replaces axum's own per-route registration and `Path` extraction entirely —
/// every request, matched or not, flows through here.
async fn dispatch(
    req: Request<Body>,
    router: Arc<RadixRouter<Arc<CompiledRouteEntry>>>,
    hooks: Arc<HookDispatcher>,
) -> axum::response::Response {
    let method_str = req.method().to_string();
    let path = req.uri().path().to_string();

    let Some(method) = HttpMethod::from_string(&method_str) else {
        return error_response(WeaveError::NoMatchingRoute {
            method: method_str,
            path,
        });
    };

    let Some(Matched { store, params }) = router.find(method, &path) else {
        return error_response(WeaveError::NoMatchingRoute {
            method: method_str,
            path,
        });
    };
    let entry = store.clone();

    let adapted = match AxumRouteAdapter::adapt_request(req).await {
        Ok(req) => req,
        Err(err) => {
            tracing::error!(error = %err, "failed to adapt request");
            return error_response(WeaveError::Unclassified(err));
        }
    };
    let adapted = adapted.with_path_params(params.into_iter().collect());

    let executor = crate::executor::Executor::new(&hooks);
    let response = executor.execute(&entry.compiled, &entry.instance, adapted).await;

    match AxumRouteAdapter::adapt_response(Box::new(response)) {
        Ok(res) => res,
        Err(err) => {
            tracing::error!(error = %err, "failed to adapt response");
            error_response(WeaveError::Unclassified(err))
        }
    }
}

fn error_response(err: WeaveError) -> axum::response::Response {
    let response = HttpResponse {
        status: err.status_code(),
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: Some(WeaveBody::Json(err.to_envelope())),
    };
    AxumRouteAdapter::adapt_response(Box::new(response)).unwrap_or_else(|_| {
        axum::response::Response::builder()
            .status(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::empty())
            .expect("static response is always well-formed")
    })
}
