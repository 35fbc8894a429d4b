use serde_json::Value;

/// The framework's transport-agnostic body representation.
///
/// `Text`/`Json` are produced once a body has actually been materialized and parsed;
/// `Bytes` carries an opaque payload (e.g. multipart, images) that response shaping
/// passes through as-is; `Empty` is the default for bodyless requests/responses.
#[derive(Clone, Debug)]
pub enum Body {
    Empty,
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Empty
    }
}
