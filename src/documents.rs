//! Document list model
//!
//! The backend keeps a map of document id to `{active, name}`. Inactive
//! entries are soft-deleted documents and are never shown. Every list,
//! upload and remove response is normalized into a [`DocumentCollection`]
//! that fully replaces whatever the client showed before.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One document entry as the backend reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Whether the document is available for querying
    pub active: bool,
    /// Original file name
    pub name: String,
}

/// Document id → entry map, as found under `document_ids` or `message`
pub type DocumentMap = HashMap<String, DocumentEntry>;

/// A document shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Backend document id
    pub id: String,
    /// File name
    pub name: String,
    /// Always true for files that made it into a collection
    pub active: bool,
    /// Placeholder, the backend does not report sizes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Time the list containing this file was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<DateTime<Utc>>,
    /// MIME type derived from the file extension
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// Derive a MIME type from a file name's extension
///
/// # Examples
///
/// ```
/// use gander::documents::mime_type_for;
///
/// assert_eq!(mime_type_for("Manual.PDF"), "application/pdf");
/// assert_eq!(mime_type_for("notes"), "application/octet-stream");
/// ```
pub fn mime_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" | "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        "xls" | "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Integer ids sort numerically and before any non-integer id.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// The active documents from one backend response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentCollection {
    files: Vec<DocumentFile>,
}

impl DocumentCollection {
    /// Build a collection from a backend document map
    ///
    /// Drops inactive entries, fills the placeholder fields and orders the
    /// result by document id.
    pub fn from_map(map: DocumentMap) -> Self {
        let received_at = Utc::now();
        let mut files: Vec<DocumentFile> = map
            .into_iter()
            .filter(|(_, entry)| entry.active)
            .map(|(id, entry)| DocumentFile {
                file_type: Some(mime_type_for(&entry.name).to_string()),
                id,
                name: entry.name,
                active: true,
                size: Some(0),
                upload_date: Some(received_at),
            })
            .collect();
        files.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Self { files }
    }

    /// Files in display order
    pub fn files(&self) -> &[DocumentFile] {
        &self.files
    }

    /// File names in display order
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
