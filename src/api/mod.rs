//! Backend API module for Gander
//!
//! This module contains the [`DocumentApi`] abstraction used by the chat
//! screen and its HTTP implementation, [`ApiClient`].

pub mod client;
pub mod types;

pub use client::{read_upload_files, ApiClient, UploadFile};
pub use types::{ApiResponse, QueryResponse, RemoveFileResponse};

use crate::documents::DocumentCollection;
use crate::error::Result;
use async_trait::async_trait;

/// Operations the chat screen performs against the backend
///
/// Every file operation returns the complete active document set as the
/// backend sees it after the call; callers replace their list with it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Fetch the current document set (`GET /get_all_files`)
    async fn list_files(&self) -> Result<DocumentCollection>;

    /// Upload files in one multipart request (`POST /upload`)
    async fn upload_files(&self, files: Vec<UploadFile>) -> Result<DocumentCollection>;

    /// Soft-delete every document with this name (`/remove_file`)
    async fn remove_file(&self, file_name: &str) -> Result<DocumentCollection>;

    /// Ask a question about the active documents (`POST /query`)
    async fn query(&self, question: &str) -> Result<String>;
}
