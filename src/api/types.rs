//! Wire types for the document QA backend

use crate::documents::DocumentMap;
use serde::{Deserialize, Serialize};

/// Body of `GET /get_all_files` and `POST /upload`
///
/// The backend answers the first upload into a fresh index with only
/// `{"message": "Index created"}`, so `document_ids` is optional here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub document_ids: Option<DocumentMap>,
}

/// Body of `/remove_file`
///
/// Unlike [`ApiResponse`], the document map is returned under `message`.
/// Kept as a raw value so a non-map `message` can be reported rather than
/// failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveFileResponse {
    pub message: serde_json::Value,
}

/// Body of `POST /query`
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Response of `POST /query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /chat/message`
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageRequest<'a> {
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_response_with_document_ids() {
        let body = json!({
            "message": "File uploaded",
            "document_ids": {
                "0": {"active": true, "name": "a.pdf"},
                "1": {"active": false, "name": "b.pdf"}
            }
        });
        let parsed: ApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.message.as_deref(), Some("File uploaded"));
        let ids = parsed.document_ids.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(!ids["1"].active);
    }

    #[test]
    fn test_api_response_index_created_has_no_ids() {
        let parsed: ApiResponse =
            serde_json::from_value(json!({"message": "Index created"})).unwrap();
        assert!(parsed.document_ids.is_none());
    }

    #[test]
    fn test_query_request_shape() {
        let body = serde_json::to_value(QueryRequest { query: "What is V1?" }).unwrap();
        assert_eq!(body, json!({"query": "What is V1?"}));
    }

    #[test]
    fn test_remove_response_keeps_raw_message() {
        let parsed: RemoveFileResponse =
            serde_json::from_value(json!({"message": "nothing removed"})).unwrap();
        assert!(parsed.message.is_string());
    }
}
