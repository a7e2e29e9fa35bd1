//! API request/response types
//!
//! Wire shapes for the backend's JSON REST contract. This layer consumes
//! the contract; it does not define it.

use serde::{Deserialize, Serialize};

/// Standard API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message, present on some responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error information (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error),
        }
    }

    /// Best-effort error code and message for a failed response.
    pub fn error_parts(&self) -> (String, String) {
        match (&self.error, &self.message) {
            (Some(err), _) => (err.code.clone(), err.message.clone()),
            (None, Some(msg)) => ("UNKNOWN".to_string(), msg.clone()),
            (None, None) => ("UNKNOWN".to_string(), "request failed".to_string()),
        }
    }
}

/// API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code (e.g., `UNAUTHORIZED`, `QUOTA_EXCEEDED`)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Pagination block attached to list responses
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Items per page
    pub limit: u32,
    /// Offset of the first item
    pub offset: u32,
    /// Whether more items exist past this page
    pub has_more: bool,
}

/// Collection payload returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items in this page
    pub data: Vec<T>,
    /// Total number of matching items
    pub count: u64,
    /// Pagination window
    pub pagination: Pagination,
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order
    Asc,
    /// Descending order (default)
    #[default]
    Desc,
}

/// Query parameters accepted by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Filter by category wire name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Filter by status wire name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Earliest creation date (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Latest creation date (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Field to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Offset of the first item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ListQuery {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Free-text search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sort by a field in the given direction.
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Page window.
    #[must_use]
    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_roundtrip() {
        let json = r#"{"success":true,"data":{"count":1}}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert!(response.data.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_envelope_error_parts() {
        let json = r#"{"success":false,"error":{"code":"QUOTA_EXCEEDED","message":"limit reached"}}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        let (code, message) = response.error_parts();
        assert_eq!(code, "QUOTA_EXCEEDED");
        assert_eq!(message, "limit reached");

        let bare: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(bare.error_parts().0, "UNKNOWN");
    }

    #[test]
    fn test_pagination_wire_names() {
        let json = r#"{"data":[],"count":0,"pagination":{"limit":20,"offset":0,"hasMore":false}}"#;
        let list: ListResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(list.pagination.limit, 20);
        assert!(!list.pagination.has_more);
    }

    #[test]
    fn test_list_query_camel_case_and_skipping() {
        let query = ListQuery::new()
            .with_category("work")
            .with_sort("createdAt", SortOrder::Desc)
            .with_page(20, 40);
        let json = serde_json::to_string(&query).unwrap();
        assert!(json.contains("sortBy"));
        assert!(json.contains("sortOrder"));
        assert!(!json.contains("fromDate"));
        assert!(!json.contains("search"));
    }
}
