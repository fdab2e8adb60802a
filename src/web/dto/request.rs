//! Request DTOs for Web API.

use serde::Deserialize;
use serde_json::Value;

use crate::auth::RegistrationRequest;
use crate::file::{ObjectId, ParentId, UploadRequest};

/// File upload request.
///
/// Fields are kept as raw JSON so that any body object reaches the service,
/// which reports missing or mistyped input in a fixed order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<Value>,
    /// `folder`, `file` or `image`.
    #[serde(default, rename = "type")]
    pub file_type: Option<Value>,
    /// `0`, `"0"`, `""`, `null` or a folder id.
    #[serde(default)]
    pub parent_id: Option<Value>,
    /// Initial visibility; any truthy value makes the entry public.
    #[serde(default)]
    pub is_public: Option<Value>,
    /// Base64 content.
    #[serde(default)]
    pub data: Option<Value>,
}

/// A string field, or `None` for anything else.
fn string_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Interpret the JSON `parentId` of an upload.
///
/// Only the number `0` means root among numbers; any other number names a
/// parent that cannot exist.
pub fn parse_parent_id(value: Option<&Value>) -> ParentId {
    match value {
        None | Some(Value::Null) => ParentId::Root,
        Some(Value::Number(n)) if n.as_u64() == Some(0) => ParentId::Root,
        Some(Value::String(s)) => ParentId::from_client(s),
        Some(_) => ParentId::Id(ObjectId::null()),
    }
}

impl From<UploadFileRequest> for UploadRequest {
    fn from(req: UploadFileRequest) -> Self {
        UploadRequest {
            parent_id: parse_parent_id(req.parent_id.as_ref()),
            is_public: is_truthy(req.is_public.as_ref()),
            name: string_field(req.name),
            file_type: string_field(req.file_type),
            data: string_field(req.data),
        }
    }
}

/// Query parameters for listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Folder to list; root when absent.
    pub parent_id: Option<String>,
    /// Zero-based page number, kept raw so garbage falls back to page 0.
    pub page: Option<String>,
}

/// Query parameters for content retrieval.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    /// Size variant suffix.
    pub size: Option<String>,
}

/// User registration request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Password.
    #[serde(default)]
    pub password: Option<String>,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(req: RegisterRequest) -> Self {
        RegistrationRequest {
            email: req.email,
            password: req.password,
        }
    }
}
