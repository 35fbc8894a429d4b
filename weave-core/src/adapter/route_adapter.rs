use std::sync::Arc;

use anyhow::Result;

use crate::http_helpers::{HttpRequest, HttpResponse, IntoResponse};
use crate::injector::{InstanceWrapper, SeedLocals};

pub trait RouteAdapter {
    type Request;
    type Response;

    fn adapt_request(request: Self::Request) -> impl Future<Output = Result<HttpRequest>>;

    fn adapt_response(
        response: Box<dyn IntoResponse<Response = HttpResponse>>,
    ) -> Result<Self::Response>;

    /// Bypasses tier classification and hook dispatch entirely — useful only for
    /// an adapter that has no `RadixRouter`/`Executor` of its own to dispatch
    /// through. `AxumAdapter` does not use this; its `listen` fallback calls
    /// `Executor::execute` directly against the compiled route it matched.
    fn handle_request(
        request: Self::Request,
        controller: Arc<InstanceWrapper>,
    ) -> impl Future<Output = Result<Self::Response>> {
        async move {
            let http_request = Self::adapt_request(request).await?;
            let http_response = controller.handle_request(http_request, SeedLocals::new()).await;
            Self::adapt_response(http_response)
        }
    }
}
