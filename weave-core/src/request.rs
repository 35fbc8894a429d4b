//! Built-in request-scoped provider for accessing HTTP request data.
//!
//! The `Request` provider is automatically available in every application and
//! gives handlers convenient access to HTTP request data without coupling
//! business logic to HTTP types.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use weave_core::{controller_struct, controller, get, Request, Body as WeaveBody, HttpRequest};
//!
//! #[controller_struct(pub struct UserController {
//!     #[inject]
//!     request: Request,  // Built-in, automatically available!
//! })]
//! #[controller("/users")]
//! impl UserController {
//!     #[get("/me")]
//!     fn get_current_user(&self, _req: HttpRequest) -> WeaveBody {
//!         let method = self.request.method();
//!         let uri = self.request.uri();
//!
//!         WeaveBody::Text(format!("Method: {}, URI: {}", method, uri))
//!     }
//! }
//! ```
//!
//! ## Accessing Extensions
//!
//! ```rust
//! use weave_core::{controller_struct, controller, get, Request, Body as WeaveBody, HttpRequest};
//!
//! #[derive(Clone)]
//! struct UserId(String);
//!
//! #[controller_struct(pub struct ProfileController {
//!     #[inject]
//!     request: Request,
//! })]
//! #[controller("/profile")]
//! impl ProfileController {
//!     #[get("/")]
//!     fn get_profile(&self, _req: HttpRequest) -> WeaveBody {
//!         if let Some(user_id) = self.request.extensions().get::<UserId>() {
//!             WeaveBody::Text(format!("Profile for user: {}", user_id.0))
//!         } else {
//!             WeaveBody::Text("Anonymous user".to_string())
//!         }
//!     }
//! }
//! ```
//!
//! ## Accessing Headers
//!
//! ```rust
//! use weave_core::{controller_struct, controller, get, Request, Body as WeaveBody, HttpRequest};
//!
//! #[controller_struct(pub struct ApiController {
//!     #[inject]
//!     request: Request,
//! })]
//! #[controller("/api")]
//! impl ApiController {
//!     #[get("/data")]
//!     fn get_data(&self, _req: HttpRequest) -> WeaveBody {
//!         let auth = self.request.header("authorization");
//!
//!         if auth.is_some() {
//!             WeaveBody::Text("Authenticated".to_string())
//!         } else {
//!             WeaveBody::Text("Not authenticated".to_string())
//!         }
//!     }
//! }
//! ```
//!
//! # Scope
//!
//! `Request` is a request-scoped provider:
//! - A fresh instance is created for each HTTP request.
//! - It can only be injected into request-scoped providers or controllers whose
//!   effective scope has bubbled to request (see [`crate::injector::scope_resolver`]).
//! - Attempting to inject it into a singleton that never bubbles is a startup-time
//!   `CircularDependency`-class configuration error, not a panic.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::FxHashMap;
use crate::async_trait;
use crate::http_helpers::{Body, Extensions, HttpRequest, StaticBodyReader};
use crate::provider_scope::ProviderScope;
use crate::traits_helpers::{Provider, ProviderTrait};

/// Built-in request-scoped provider for accessing HTTP request data.
///
/// Wraps `Arc<HttpRequest>` so cloning a `Request` instance is just a refcount bump.
#[derive(Clone)]
pub struct Request {
    inner: Arc<HttpRequest>,
}

#[async_trait]
impl ProviderTrait for Request {
    fn get_token(&self) -> String {
        "Request".to_string()
    }

    async fn execute(
        &self,
        _params: Vec<Box<dyn Any + Send>>,
        req: Option<&HttpRequest>,
    ) -> Box<dyn Any + Send> {
        let http_req = req.expect("Request provider requires HttpRequest");
        Box::new(Request::from_request(http_req))
    }

    fn get_token_manager(&self) -> String {
        "RequestManager".to_string()
    }

    fn get_scope(&self) -> ProviderScope {
        ProviderScope::Request
    }
}

impl Request {
    /// Creates a `Request` from an `HttpRequest`. Called by the framework during
    /// request dispatch; tests may call it directly.
    ///
    /// ```rust
    /// use weave_core::HttpRequest;
    /// use weave_core::Request;
    ///
    /// let http_req = HttpRequest::new("GET", "/users/123")
    ///     .with_headers(vec![("content-type".to_string(), "application/json".to_string())]);
    ///
    /// let request = Request::from_request(&http_req);
    /// assert_eq!(request.method(), "GET");
    /// ```
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            inner: Arc::new(req.clone()),
        }
    }

    /// The HTTP method (GET, POST, PUT, DELETE, ...).
    pub fn method(&self) -> &str {
        &self.inner.method
    }

    /// The request URI, including any query string.
    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    /// A header value by name, case-insensitive.
    ///
    /// ```rust
    /// use weave_core::HttpRequest;
    /// use weave_core::Request;
    ///
    /// let http_req = HttpRequest::new("GET", "/").with_headers(vec![
    ///     ("Content-Type".to_string(), "application/json".to_string()),
    ///     ("Authorization".to_string(), "Bearer token123".to_string()),
    /// ]);
    ///
    /// let request = Request::from_request(&http_req);
    /// assert_eq!(request.header("content-type"), Some("application/json"));
    /// assert_eq!(request.header("AUTHORIZATION"), Some("Bearer token123"));
    /// assert_eq!(request.header("X-Custom"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.inner
            .headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }

    /// All headers as a slice of `(name, value)` pairs.
    pub fn headers(&self) -> &[(String, String)] {
        &self.inner.headers
    }

    /// Query parameters parsed from the URI.
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.inner.query_params
    }

    /// Path parameters bound by the matched route.
    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.inner.path_params
    }

    /// Materializes the request body.
    ///
    /// This is the one operation on `Request` that is not free: it drains and
    /// parses the body at most once per request (the underlying
    /// [`crate::http_helpers::BodyReader`] is itself one-shot), regardless of how
    /// many times `body()` is called.
    pub async fn body(&self) -> anyhow::Result<Body> {
        let (body, _raw) = self.inner.body_reader.read().await?;
        Ok(body)
    }

    /// Access request extensions set by earlier middleware or enhancers.
    ///
    /// ```rust
    /// use weave_core::HttpRequest;
    /// use weave_core::Request;
    ///
    /// #[derive(Clone)]
    /// struct UserId(String);
    ///
    /// let mut http_req = HttpRequest::new("GET", "/");
    /// http_req.extensions.insert(UserId("alice".to_string()));
    ///
    /// let request = Request::from_request(&http_req);
    /// assert_eq!(request.extensions().get::<UserId>().unwrap().0, "alice");
    /// ```
    pub fn extensions(&self) -> &Extensions {
        &self.inner.extensions
    }

    /// The inner `HttpRequest`, for advanced use cases.
    pub fn inner(&self) -> &HttpRequest {
        &self.inner
    }
}

/// Manager for the built-in Request provider.
///
/// Used internally to register `Request` in the dependency injection container.
/// The instance registered here is a placeholder; the real instance is built in
/// [`ProviderTrait::execute`] from the live `HttpRequest`.
pub struct RequestManager;

impl Provider for RequestManager {
    fn get_all_providers(
        &self,
        _dependencies: &FxHashMap<String, Arc<Box<dyn ProviderTrait>>>,
    ) -> FxHashMap<String, Arc<Box<dyn ProviderTrait>>> {
        let mut providers = FxHashMap::default();

        let provider_wrapper = Request {
            inner: Arc::new(HttpRequest::new("", "").with_body_reader(Arc::new(
                StaticBodyReader::empty(),
            ))),
        };

        providers.insert(
            "Request".to_string(),
            Arc::new(Box::new(provider_wrapper) as Box<dyn ProviderTrait>),
        );

        providers
    }

    fn get_name(&self) -> String {
        "Request".to_string()
    }

    fn get_token(&self) -> String {
        "Request".to_string()
    }

    fn get_dependencies(&self) -> Vec<String> {
        vec![]
    }
}
