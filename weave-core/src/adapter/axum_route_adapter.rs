use std::collections::HashMap;

use anyhow::{Result, anyhow};
use axum::{
    RequestPartsExt,
    body::to_bytes,
    extract::Query,
    http::{HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode}
};
use serde_json::Value;

use crate::http_helpers::{self, Body, HttpRequest, HttpResponse};

use super::RouteAdapter;

pub struct AxumRouteAdapter;

impl RouteAdapter for AxumRouteAdapter {
    type Request = Request<axum::body::Body>;
    type Response = Response<axum::body::Body>;

    /// Adapts the wire request, eagerly materializing the body (this adapter
    /// always fully buffers, so there is nothing to gain from the lazy
    /// `BodyReader` contract here beyond satisfying it). Path params are left
    /// empty — they come from the radix router match, not from axum's own
    /// route pattern, and are attached by the caller via `with_path_params`.
    async fn adapt_request(request: Self::Request) -> Result<HttpRequest> {
        let (mut parts, body) = request.into_parts();
        let raw = to_bytes(body, usize::MAX).await?.to_vec();

        let body = if let Ok(body_str) = String::from_utf8(raw.clone()) {
            if let Ok(json) = serde_json::from_str::<Value>(&body_str) {
                Body::Json(json)
            } else {
                Body::Text(body_str)
            }
        } else {
            Body::Text(String::from_utf8_lossy(&raw).to_string())
        };

        let Query(query_params) = parts
            .extract::<Query<HashMap<String, String>>>()
            .await
            .map_err(|e| anyhow!("Failed to extract query parameters: {:?}", e))?;

        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("").to_string()))
            .collect();

        Ok(HttpRequest::new(parts.method.to_string(), parts.uri.to_string())
            .with_headers(headers)
            .with_query_params(query_params)
            .with_materialized_body(body, raw))
    }

    fn adapt_response(
        response: Box<dyn http_helpers::IntoResponse<Response = HttpResponse>>,
    ) -> Result<Self::Response> {
        let response = response.to_response();

        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match response.body {
            Some(Body::Text(text)) => axum::body::Body::from(text),
            Some(Body::Json(json)) => {
                let vec = serde_json::to_vec(&json)
                    .map_err(|e| anyhow::anyhow!("Failed to serialize JSON: {}", e))?;
                axum::body::Body::from(vec)
            }
            Some(Body::Bytes(bytes)) => axum::body::Body::from(bytes),
            _ => axum::body::Body::empty(),
        };

        // `IntoResponse` already sets `Content-Type` per the response-shaping table
        // (text/html for strings, application/json for objects, unset for raw
        // bytes); honor it here rather than re-deriving it from the wire body.
        let mut headers = HeaderMap::new();
        for (k, v) in &response.headers {
            if let Ok(header_name) = HeaderName::from_bytes(k.as_bytes()) {
                if let Ok(header_value) = HeaderValue::from_str(v) {
                    headers.insert(header_name, header_value);
                }
            }
        }

        let mut res = Response::builder()
            .status(status)
            .body(body)
            .map_err(|e| anyhow::anyhow!("Failed to build response: {}", e))?;

        res.headers_mut().extend(headers);

        Ok(res)
    }
}
