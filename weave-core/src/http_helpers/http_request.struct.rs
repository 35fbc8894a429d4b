use std::collections::HashMap;
use std::sync::Arc;

use super::{Body, BodyReader, Extensions, StaticBodyReader};

/// The wire-level request handed to the framework by an [`crate::adapter::HttpAdapter`].
///
/// Path/query parameters and headers are cheap to extract eagerly and are always
/// populated by the time a route is dispatched. The body is the one field that is
/// genuinely expensive (a full read off the connection plus a parse), so it is kept
/// behind a [`BodyReader`] and only drained when a route's compiled parameter
/// bindings actually reference it (see `Context::body`).
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub headers: Vec<(String, String)>,
    pub method: String,
    pub uri: String,
    pub query_params: HashMap<String, String>,
    pub path_params: HashMap<String, String>,
    pub extensions: Extensions,
    pub(crate) body_reader: Arc<dyn BodyReader>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            headers: Vec::new(),
            method: method.into(),
            uri: uri.into(),
            query_params: HashMap::new(),
            path_params: HashMap::new(),
            extensions: Extensions::new(),
            body_reader: Arc::new(StaticBodyReader::empty()),
        }
    }

    /// Convenience constructor for tests and bodyless in-process callers: wraps an
    /// already-materialized body so no lazy read ever happens.
    pub fn with_materialized_body(mut self, body: Body, raw: Vec<u8>) -> Self {
        self.body_reader = Arc::new(StaticBodyReader::new(body, raw));
        self
    }

    pub fn with_body_reader(mut self, reader: Arc<dyn BodyReader>) -> Self {
        self.body_reader = reader;
        self
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_query_params(mut self, query_params: HashMap<String, String>) -> Self {
        self.query_params = query_params;
        self
    }

    pub fn with_path_params(mut self, path_params: HashMap<String, String>) -> Self {
        self.path_params = path_params;
        self
    }

    /// Drains the body reader. Each call re-reads (and, for a real connection,
    /// re-parses) the body — callers that need it more than once within a
    /// request should go through `Context::body`'s cache instead.
    pub async fn body(&self) -> anyhow::Result<Body> {
        let (body, _raw) = self.body_reader.read().await?;
        Ok(body)
    }
}
