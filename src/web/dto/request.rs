//! Request DTOs for the HTTP interface.

use serde::Deserialize;
use serde_json::Value;

use crate::file::UploadInput;

/// Upload request body for `POST /files`.
///
/// Fields are kept as raw JSON values so that a field of the wrong shape is
/// reported by upload validation with its own reason instead of failing
/// extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, rename = "type")]
    pub file_type: Option<Value>,
    #[serde(default)]
    pub parent_id: Option<Value>,
    #[serde(default)]
    pub is_public: Option<Value>,
    /// Base64 content.
    #[serde(default)]
    pub data: Option<Value>,
}

/// A string field; any other JSON shape counts as absent.
fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Raw parent id. `null` is the root; numbers and strings are passed through
/// for parsing, and anything else is kept verbatim so that it matches no
/// folder.
fn parent_ref(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl From<UploadRequest> for UploadInput {
    fn from(req: UploadRequest) -> Self {
        UploadInput {
            name: text(req.name),
            file_type: text(req.file_type),
            parent_id: parent_ref(req.parent_id),
            is_public: matches!(req.is_public, Some(Value::Bool(true))),
            data: text(req.data),
        }
    }
}

/// Query parameters for `GET /files`.
///
/// Kept as strings so that malformed values fall back instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuery {
    pub parent_id: Option<String>,
    pub page: Option<String>,
}

impl IndexQuery {
    /// Requested page; absent, negative or malformed values are page 0.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 0)
            .unwrap_or(0)
    }
}
