//! HTTP client for the document QA backend
//!
//! Thin wrappers over `reqwest`: each call checks the status, maps any
//! non-success to a generic per-operation [`GanderError::Api`] and parses
//! the JSON body.

use crate::api::types::{
    ApiResponse, ChatMessageRequest, LoginRequest, QueryRequest, QueryResponse,
    RemoveFileResponse,
};
use crate::api::DocumentApi;
use crate::auth::User;
use crate::config::{ApiConfig, RemoveMethod};
use crate::documents::{mime_type_for, DocumentCollection, DocumentMap};
use crate::error::{GanderError, Result};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Multipart field name the backend reads uploads from
const UPLOAD_FIELD: &str = "file";

/// A file ready to be sent to `/upload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the multipart part
    pub name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create an upload from in-memory contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a local file, using its file name as the upload name
    ///
    /// # Errors
    ///
    /// Returns error if the path has no file name or cannot be read
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                GanderError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Not a file path: {}", path.display()),
                ))
            })?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(GanderError::Io)?;
        tracing::debug!("Read {} ({} bytes) for upload", name, bytes.len());
        Ok(Self { name, bytes })
    }

    fn into_part(self) -> Result<Part> {
        let mime = mime_type_for(&self.name);
        Part::bytes(self.bytes)
            .file_name(self.name)
            .mime_str(mime)
            .map_err(|e| GanderError::Http(e).into())
    }
}

/// Read several local files concurrently
///
/// # Errors
///
/// Fails on the first file that cannot be read
pub async fn read_upload_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<UploadFile>> {
    futures::future::try_join_all(paths.iter().map(|p| UploadFile::from_path(p.as_ref()))).await
}

/// Document QA backend client
///
/// # Examples
///
/// ```no_run
/// use gander::api::{ApiClient, DocumentApi};
/// use gander::config::ApiConfig;
///
/// # async fn example() -> gander::error::Result<()> {
/// let client = ApiClient::new(&ApiConfig::default())?;
/// let files = client.list_files().await?;
/// let answer = client.query("What is the maximum takeoff weight?").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    remove_method: RemoveMethod,
}

impl ApiClient {
    /// Create a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GanderError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            remove_method: config.remove_method,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success status into the generic `failure` error
    async fn ensure_success(response: Response, failure: &str) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Backend returned error {}: {}", status, error_text);
            return Err(GanderError::Api(failure.to_string()).into());
        }
        Ok(response)
    }

    async fn parse_body<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", what, e);
            GanderError::UnexpectedResponse(format!("{}: {}", what, e)).into()
        })
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            tracing::warn!("Request to backend failed: {}", e);
            GanderError::Http(e).into()
        })
    }

    /// `POST /auth/login`
    ///
    /// The chat screen signs in through [`crate::auth::MockAuthenticator`];
    /// this call is the backend-side counterpart.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest { email, password });
        let response = Self::ensure_success(Self::send(request).await?, "Login failed").await?;
        Self::parse_body(response, "login").await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<()> {
        let request = self.client.post(self.endpoint("/auth/logout"));
        Self::ensure_success(Self::send(request).await?, "Logout failed").await?;
        Ok(())
    }

    /// `POST /chat/message`
    ///
    /// The response shape is not defined by the backend, so the raw JSON
    /// value is returned.
    pub async fn send_message(&self, message: &str) -> Result<serde_json::Value> {
        let request = self
            .client
            .post(self.endpoint("/chat/message"))
            .json(&ChatMessageRequest { message });
        let response =
            Self::ensure_success(Self::send(request).await?, "Failed to send message").await?;
        Self::parse_body(response, "chat message").await
    }
}

#[async_trait]
impl DocumentApi for ApiClient {
    async fn list_files(&self) -> Result<DocumentCollection> {
        let url = self.endpoint("/get_all_files");
        tracing::debug!("Fetching documents from {}", url);

        let response =
            Self::ensure_success(Self::send(self.client.get(&url)).await?, "Failed to fetch files")
                .await?;
        let body: ApiResponse = Self::parse_body(response, "file list").await?;

        let map = body.document_ids.ok_or_else(|| {
            GanderError::UnexpectedResponse("file list has no document_ids".to_string())
        })?;
        Ok(DocumentCollection::from_map(map))
    }

    async fn upload_files(&self, files: Vec<UploadFile>) -> Result<DocumentCollection> {
        if files.is_empty() {
            return Err(GanderError::InvalidInput("No files to upload".to_string()).into());
        }

        let url = self.endpoint("/upload");
        tracing::info!("Uploading {} file(s) to {}", files.len(), url);

        let mut form = Form::new();
        for file in files {
            form = form.part(UPLOAD_FIELD, file.into_part()?);
        }

        let request = self.client.post(&url).multipart(form);
        let response = Self::ensure_success(Self::send(request).await?, "Upload failed").await?;
        let body: ApiResponse = Self::parse_body(response, "upload").await?;

        match body.document_ids {
            Some(map) => Ok(DocumentCollection::from_map(map)),
            None => {
                // A brand new index answers without the document map.
                tracing::info!(
                    "Upload response carried no document_ids ({}), refreshing list",
                    body.message.as_deref().unwrap_or("no message")
                );
                self.list_files()
                    .await
                    .context("Files were uploaded, but refreshing the document list failed")
            }
        }
    }

    async fn remove_file(&self, file_name: &str) -> Result<DocumentCollection> {
        let url = self.endpoint("/remove_file");
        tracing::info!("Removing {} via {:?} {}", file_name, self.remove_method, url);

        let request = match self.remove_method {
            RemoveMethod::Post => self.client.post(&url),
            RemoveMethod::Get => self.client.get(&url),
        }
        .query(&[("file_name", file_name)]);

        let response =
            Self::ensure_success(Self::send(request).await?, "Failed to remove file").await?;
        let body: RemoveFileResponse = Self::parse_body(response, "remove file").await?;

        if !body.message.is_object() {
            tracing::error!("Unexpected remove_file response format: {}", body.message);
            return Err(GanderError::UnexpectedResponse(
                "remove_file message is not a document map".to_string(),
            )
            .into());
        }
        tracing::debug!("remove_file returned the document map under `message`");

        let map: DocumentMap = serde_json::from_value(body.message).map_err(|e| {
            GanderError::UnexpectedResponse(format!("remove_file document map: {}", e))
        })?;
        Ok(DocumentCollection::from_map(map))
    }

    async fn query(&self, question: &str) -> Result<String> {
        let url = self.endpoint("/query");
        tracing::debug!("Querying {} ({} chars)", url, question.len());

        let request = self
            .client
            .post(&url)
            .json(&QueryRequest { query: question });
        let response = Self::ensure_success(Self::send(request).await?, "Query failed").await?;
        let body: QueryResponse = Self::parse_body(response, "query").await?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("/query"), "http://localhost:8000/query");
    }

    #[test]
    fn test_upload_file_new() {
        let file = UploadFile::new("a.pdf", b"%PDF-1.4".to_vec());
        assert_eq!(file.name, "a.pdf");
        assert_eq!(file.bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_upload_file_from_path_uses_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("manual.pdf");
        std::fs::write(&path, "content").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "manual.pdf");
        assert_eq!(file.bytes, b"content");
    }

    #[tokio::test]
    async fn test_read_upload_files_fails_on_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let present = dir.path().join("a.pdf");
        std::fs::write(&present, "a").unwrap();
        let missing = dir.path().join("missing.pdf");

        let result = read_upload_files(&[present, missing]).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GanderError>(),
            Some(GanderError::Io(_))
        ));
    }
}
