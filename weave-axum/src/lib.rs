//! # weave-axum
//!
//! Axum adapter for the Weave framework.
//!
//! This crate provides an implementation of Weave's `HttpAdapter` trait for the Axum web framework,
//! allowing you to use Axum as the HTTP server for your Weave applications.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use weave_core::WeaveFactory;
//! use weave_axum::AxumAdapter;
//!
//! #[tokio::main]
//! async fn main() {
//!     let adapter = AxumAdapter::new();
//!     let factory = WeaveFactory::new();
//!     let app = factory.create(AppModule::module_definition(), adapter).await;
//!     app.listen(3000, "127.0.0.1").await.unwrap();
//! }
//! ```

// The actual adapter implementation lives in `weave_core::adapter`; this crate
// exists as the axum-flavored counterpart to `weave-actix`/`weave-juniper` in the
// wider Weave ecosystem, so users depend on `weave-axum` rather than reaching
// into `weave-core`'s internals directly.
pub use weave_core::adapter::{AxumAdapter, AxumRouteAdapter};

// Re-export commonly used types from weave-core
pub use weave_core::{HttpAdapter, RouteAdapter};
