//! Chat screen view-state and controller
//!
//! [`ViewState`] is everything the screen shows: the current question and
//! answer, the document sidebar and the loading flags. [`Assistant`] owns
//! it together with a [`DocumentApi`] and turns user actions into backend
//! calls. Its methods take `&self` and never hold the state lock across an
//! `.await`, so a question and a file operation can be in flight at once.

use crate::api::{read_upload_files, DocumentApi, UploadFile};
use crate::chat::{ChatState, Message};
use crate::documents::DocumentCollection;
use crate::error::Result;

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Sidebar state
#[derive(Debug, Clone, Default)]
pub struct FileState {
    files: DocumentCollection,
    in_flight: usize,
}

impl FileState {
    /// Documents currently listed
    pub fn files(&self) -> &DocumentCollection {
        &self.files
    }

    /// True while any list/upload/remove request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Everything the chat screen renders
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub chat: ChatState,
    pub files: FileState,
}

/// Controller for the chat screen
pub struct Assistant {
    api: Arc<dyn DocumentApi>,
    state: RwLock<ViewState>,
}

impl Assistant {
    /// Create a controller with an empty screen
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            api,
            state: RwLock::new(ViewState::default()),
        }
    }

    // A poisoned lock still holds usable view data.
    fn read_state(&self) -> RwLockReadGuard<'_, ViewState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current view-state for rendering
    pub fn snapshot(&self) -> ViewState {
        self.read_state().clone()
    }

    /// Submit a question
    ///
    /// Returns the answer this turn produced (the fallback on failure), or
    /// `None` if the input was blank or a newer question superseded it.
    pub async fn ask(&self, input: &str) -> Option<Message> {
        let token = self.write_state().chat.begin_turn(input)?;
        tracing::info!("Submitting question ({} chars)", input.len());

        let outcome = self.api.query(input).await;

        let mut state = self.write_state();
        if state.chat.complete_turn(token, outcome) {
            state.chat.current_answer().cloned()
        } else {
            None
        }
    }

    /// Reload the document list from the backend
    pub async fn refresh_files(&self) -> Result<DocumentCollection> {
        self.run_file_op("fetching files", self.api.list_files()).await
    }

    /// Upload already-read files in one request
    ///
    /// An empty selection is a no-op that returns the current list.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<DocumentCollection> {
        if files.is_empty() {
            tracing::debug!("No files selected, skipping upload");
            return Ok(self.read_state().files.files.clone());
        }
        self.run_file_op("uploading files", self.api.upload_files(files)).await
    }

    /// Read local files and upload them in one request
    ///
    /// An empty selection is a no-op that returns the current list.
    pub async fn upload_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<DocumentCollection> {
        if paths.is_empty() {
            tracing::debug!("No files selected, skipping upload");
            return Ok(self.read_state().files.files.clone());
        }
        let api = Arc::clone(&self.api);
        self.run_file_op("uploading files", async move {
            let files = read_upload_files(paths).await?;
            api.upload_files(files).await
        })
        .await
    }

    /// Remove a document by name
    pub async fn remove(&self, file_name: &str) -> Result<DocumentCollection> {
        self.run_file_op("removing file", self.api.remove_file(file_name)).await
    }

    /// Track a file operation and swap the list in on success
    ///
    /// On failure the previous list stays and the error is logged and
    /// returned.
    async fn run_file_op<F>(&self, action: &str, op: F) -> Result<DocumentCollection>
    where
        F: Future<Output = Result<DocumentCollection>>,
    {
        self.write_state().files.in_flight += 1;

        let outcome = op.await;

        let mut state = self.write_state();
        state.files.in_flight = state.files.in_flight.saturating_sub(1);
        match outcome {
            Ok(collection) => {
                tracing::debug!("Document list replaced ({} active)", collection.len());
                state.files.files = collection.clone();
                Ok(collection)
            }
            Err(e) => {
                tracing::error!("Error {}: {:#}", action, e);
                Err(e)
            }
        }
    }
}
