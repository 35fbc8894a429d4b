use std::fmt::Debug;

use serde_json::Value;

use super::{Body, HttpResponse};

/// Converts a handler's return value into a shaped [`HttpResponse`].
///
/// The blanket impls below implement the response-shaping table verbatim: strings,
/// numbers, and booleans default to `text/html` (kept for fidelity with the system
/// being modeled, surprising as that default is — see the Open Questions), raw byte
/// sequences pass through with no content type set, and serializable
/// objects/arrays default to `application/json`. A pre-built [`HttpResponse`] is
/// always passed through unchanged.
pub trait IntoResponse: Debug {
    type Response;

    fn to_response(&self) -> Self::Response;
}

fn text_html(body: Body) -> HttpResponse {
    HttpResponse {
        body: Some(body),
        headers: vec![("Content-Type".to_string(), "text/html".to_string())],
        ..HttpResponse::new()
    }
}

impl IntoResponse for HttpResponse {
    type Response = Self;

    fn to_response(&self) -> Self {
        self.clone()
    }
}

impl IntoResponse for Body {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        match self {
            Body::Empty => HttpResponse::new(),
            Body::Text(_) => text_html(self.clone()),
            Body::Json(_) => HttpResponse {
                body: Some(self.clone()),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                ..HttpResponse::new()
            },
            Body::Bytes(_) => HttpResponse {
                body: Some(self.clone()),
                ..HttpResponse::new()
            },
        }
    }
}

impl IntoResponse for u16 {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        HttpResponse {
            status: *self,
            ..HttpResponse::new()
        }
    }
}

impl IntoResponse for Vec<(String, String)> {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        HttpResponse {
            headers: self.clone(),
            ..HttpResponse::new()
        }
    }
}

impl IntoResponse for (u16, Body) {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        let mut response = self.1.to_response();
        response.status = self.0;
        response
    }
}

impl IntoResponse for Value {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        HttpResponse {
            body: Some(Body::Json(self.clone())),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            ..HttpResponse::new()
        }
    }
}

impl IntoResponse for String {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        text_html(Body::Text(self.clone()))
    }
}

impl IntoResponse for &'static str {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        text_html(Body::Text(self.to_string()))
    }
}

impl IntoResponse for bool {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        text_html(Body::Text(self.to_string()))
    }
}

impl IntoResponse for i64 {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        text_html(Body::Text(self.to_string()))
    }
}

impl IntoResponse for f64 {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        text_html(Body::Text(self.to_string()))
    }
}

impl IntoResponse for () {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        HttpResponse::new()
    }
}

impl IntoResponse for Vec<u8> {
    type Response = HttpResponse;

    fn to_response(&self) -> Self::Response {
        HttpResponse {
            body: Some(Body::Bytes(self.clone())),
            ..HttpResponse::new()
        }
    }
}
