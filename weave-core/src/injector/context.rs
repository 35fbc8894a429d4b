//! The per-request bag threaded through middleware, hooks, pipes, and handlers.

use std::any::Any;
use std::collections::HashMap;

use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    http_helpers::{Body, HttpRequest, HttpResponse, IntoResponse},
    traits_helpers::Validatable,
};

const TRACKING_ID_HEADER: &str = "x-tracking-id";

/// Per-request state: path params, query, headers, lazy body, locals, tracking id,
/// response status. One `Context` is built per request and dropped when the
/// response is produced (or the request fails).
#[derive(Debug)]
pub struct Context {
    original_request: HttpRequest,
    tracking_id: String,
    locals: HashMap<String, Box<dyn Any + Send + Sync>>,
    body_cache: OnceCell<(Body, Vec<u8>)>,
    response: Option<Box<dyn IntoResponse<Response = HttpResponse> + Send>>,
    response_status: Option<u16>,
    should_abort: bool,
    dto: Option<Box<dyn Validatable>>,
}

impl Context {
    pub fn from_request(req: HttpRequest) -> Self {
        let tracking_id = req
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(TRACKING_ID_HEADER))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            original_request: req,
            tracking_id,
            locals: HashMap::new(),
            body_cache: OnceCell::new(),
            response: None,
            response_status: None,
            should_abort: false,
            dto: None,
        }
    }

    pub fn take_request(&self) -> &HttpRequest {
        &self.original_request
    }

    pub fn method(&self) -> &str {
        &self.original_request.method
    }

    /// Path portion of the URI, with any query string stripped.
    pub fn pathname(&self) -> &str {
        self.original_request
            .uri
            .split('?')
            .next()
            .unwrap_or(&self.original_request.uri)
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.original_request.query_params
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.original_request.path_params
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.original_request.headers
    }

    /// Request tracking id: the `x-tracking-id` header if present, else a UUID v4
    /// generated once at `Context` construction.
    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }

    /// Materializes the body on first access; subsequent calls return the cached
    /// result without touching the underlying `BodyReader` again.
    pub async fn body(&self) -> anyhow::Result<&Body> {
        let (body, _raw) = self
            .body_cache
            .get_or_try_init(|| self.original_request.body_reader.read())
            .await?;
        Ok(body)
    }

    /// The raw, unparsed body bytes (for callers that need the wire form, e.g.
    /// signature verification).
    pub async fn raw_body(&self) -> anyhow::Result<&[u8]> {
        let (_body, raw) = self
            .body_cache
            .get_or_try_init(|| self.original_request.body_reader.read())
            .await?;
        Ok(raw.as_slice())
    }

    /// Stores a request-scoped value under `key` (request-scoped provider instances,
    /// values set by middleware for downstream consumers, etc).
    pub fn set_local<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.locals.insert(key.into(), Box::new(value));
    }

    pub fn get_local<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.locals.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Drains this `Context`'s locals so they can be seeded into a later
    /// `Context` built for the same request (e.g. carrying an `onRequest` hook's
    /// locals forward past the middleware boundary, which only ever sees the
    /// raw `HttpRequest`/`HttpResponse`, never a `Context`).
    pub fn export_locals(&mut self) -> HashMap<String, Box<dyn Any + Send + Sync>> {
        std::mem::take(&mut self.locals)
    }

    /// Seeds this `Context`'s locals from a previously exported map, without
    /// discarding anything already set on `self`.
    pub fn import_locals(&mut self, locals: HashMap<String, Box<dyn Any + Send + Sync>>) {
        self.locals.extend(locals);
    }

    pub fn set_response_status(&mut self, status: u16) {
        self.response_status = Some(status);
    }

    pub fn response_status(&self) -> Option<u16> {
        self.response_status
    }

    pub fn set_response(
        &mut self,
        response: Box<dyn IntoResponse<Response = HttpResponse> + Send>,
    ) {
        self.response = Some(response);
    }

    pub fn get_response(self) -> Box<dyn IntoResponse<Response = HttpResponse> + Send> {
        self.response
            .expect("Context::get_response called before a response was set")
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    pub fn abort(&mut self) {
        self.should_abort = true;
    }

    pub fn should_abort(&self) -> bool {
        self.should_abort
    }

    pub fn set_dto(&mut self, dto: Box<dyn Validatable>) {
        self.dto = Some(dto);
    }

    pub fn get_dto(&self) -> Option<&dyn Validatable> {
        self.dto.as_deref()
    }
}
