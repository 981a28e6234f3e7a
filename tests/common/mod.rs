//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use gander::api::ApiClient;
use gander::config::{ApiConfig, RemoveMethod};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Build a client pointed at a wiremock server
pub fn client_for(base_url: &str) -> ApiClient {
    client_with_method(base_url, RemoveMethod::Post)
}

/// Build a client with an explicit `/remove_file` method
pub fn client_with_method(base_url: &str, remove_method: RemoveMethod) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        remove_method,
        timeout_seconds: Some(5),
    };
    ApiClient::new(&config).expect("client should build")
}

/// A backend document map from `(id, name, active)` triples
pub fn document_map(entries: &[(&str, &str, bool)]) -> Value {
    let mut map = serde_json::Map::new();
    for (id, name, active) in entries {
        map.insert(id.to_string(), json!({ "active": active, "name": name }));
    }
    Value::Object(map)
}

/// Write a file into `dir` and return its path
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
