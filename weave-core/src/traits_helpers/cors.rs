use crate::http_helpers::{HttpRequest, HttpResponse};

/// Optional collaborator the executor consults around dispatch: once before
/// routing, to answer and short-circuit a CORS preflight `OPTIONS` request, and
/// once after response shaping, to stamp the allow-origin/headers onto whatever
/// the route produced. Applications that don't register one get neither step —
/// CORS is opt-in, not a default middleware layer.
pub trait CorsPolicy: Send + Sync {
    fn is_preflight(&self, request: &HttpRequest) -> bool;

    fn handle_preflight(&self, request: &HttpRequest) -> HttpResponse;

    fn apply(&self, response: HttpResponse, origin: Option<&str>) -> HttpResponse;

    fn is_origin_allowed(&self, origin: &str) -> bool;
}
