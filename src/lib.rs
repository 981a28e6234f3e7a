//! Gander - document question-answering chat client library
//!
//! This library provides the client side of a document QA assistant:
//! HTTP calls to the backend, the chat screen's view-state, mock sign-in
//! and terminal rendering.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Backend abstraction (`DocumentApi`) and its HTTP client
//! - `documents`: Document list model and normalization
//! - `chat`: Current question/answer state with stale-response protection
//! - `view`: Screen view-state and the `Assistant` controller
//! - `auth`: Mock authentication and explicit sessions
//! - `render`: Text rendering for the terminal
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use gander::{ApiClient, Assistant, Config};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let assistant = Assistant::new(Arc::new(ApiClient::new(&config.api)?));
//!     assistant.refresh_files().await?;
//!     if let Some(answer) = assistant.ask("What is the maximum range?").await {
//!         println!("{}", answer.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod documents;
pub mod error;
pub mod render;
pub mod view;

// Re-export commonly used types
pub use api::{ApiClient, DocumentApi, UploadFile};
pub use auth::{AuthState, MockAuthenticator, Session, User};
pub use chat::{ChatState, Message, Sender, FALLBACK_ANSWER};
pub use config::Config;
pub use documents::{DocumentCollection, DocumentFile};
pub use error::{GanderError, Result};
pub use view::{Assistant, ViewState};
