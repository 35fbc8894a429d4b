use super::Body;

/// The shaped HTTP response produced by the request executor.
///
/// Despite the filename (this crate's `*.enum.rs` naming convention is used for
/// small wire types generally, not only actual enums), this is a struct: the
/// "enum" in the response model lives in [`Body`], not in the response envelope
/// itself.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::new()
        }
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Marker used by the compiler when a handler returns `()`/`null`/`undefined`.
pub struct HttpResponseDefault;
