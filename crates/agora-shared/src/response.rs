//! Standardized API response types (RFC 7807 compliant for errors).

use serde::{Deserialize, Serialize};

/// Standard API response wrapper, used where a call has no entity to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<()> {
    /// Success body that carries only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Confirmation body of a successful delete, e.g. "User 1 deleted".
    pub fn deleted(entity: &str, id: i64) -> Self {
        Self::message(format!("{} {} deleted", entity, id))
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Entity kind the problem concerns, e.g. "User".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Identifier of the record the problem concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Request ID for debugging purposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            entity: None,
            id: None,
            request_id: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_record(mut self, entity: impl Into<String>, id: i64) -> Self {
        self.entity = Some(entity.into());
        self.id = Some(id);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_message() {
        let value = serde_json::to_value(ApiResponse::<()>::deleted("User", 1)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "data": null, "message": "User 1 deleted" })
        );
    }

    #[test]
    fn test_error_body_omits_absent_fields() {
        let value = serde_json::to_value(
            ErrorResponse::not_found("User with id 7 not found")
                .with_record("User", 7)
                .with_request_id("abc"),
        )
        .unwrap();

        assert_eq!(value["type"], "about:blank");
        assert_eq!(value["status"], 404);
        assert_eq!(value["entity"], "User");
        assert_eq!(value["id"], 7);
        assert_eq!(value["requestId"], "abc");

        let bare = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert!(bare.get("detail").is_none());
        assert!(bare.get("entity").is_none());
    }
}
