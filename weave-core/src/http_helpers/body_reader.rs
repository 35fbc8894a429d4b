//! The collaborator interface that materializes a request body on demand.
//!
//! Per the framework's laziness contract, nothing above this trait reads a single
//! byte off the wire until a route's compiled parameter bindings actually need the
//! body. `weave-axum` supplies the concrete implementation that drains the
//! underlying `axum`/`hyper` body stream exactly once.

use std::fmt;

use async_trait::async_trait;

use super::Body;

#[async_trait]
pub trait BodyReader: Send + Sync {
    /// Drain and parse the body, returning the parsed [`Body`] alongside the raw
    /// bytes (needed by extractors that want the unparsed wire form, e.g. HMAC
    /// signature verification over the raw payload).
    async fn read(&self) -> anyhow::Result<(Body, Vec<u8>)>;
}

impl fmt::Debug for dyn BodyReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<body reader>")
    }
}

/// A [`BodyReader`] that has already materialized its body; used for bodyless
/// methods (GET/HEAD/...) and in tests that construct requests directly.
pub struct StaticBodyReader {
    body: Body,
    raw: Vec<u8>,
}

impl StaticBodyReader {
    pub fn new(body: Body, raw: Vec<u8>) -> Self {
        Self { body, raw }
    }

    pub fn empty() -> Self {
        Self {
            body: Body::Empty,
            raw: Vec::new(),
        }
    }
}

#[async_trait]
impl BodyReader for StaticBodyReader {
    async fn read(&self) -> anyhow::Result<(Body, Vec<u8>)> {
        Ok((self.body.clone(), self.raw.clone()))
    }
}
