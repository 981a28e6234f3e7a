//! Chat turn state
//!
//! Only the most recent question and its answer are kept. Each submit
//! replaces both, and each submit gets a [`TurnToken`]; an answer is applied
//! only if it carries the latest token, so a slow response to an older
//! question can never land under a newer one.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer shown when a query fails for any reason
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't process your question. Please try again.";

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One side of a question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// A question typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    /// An answer from the assistant
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Assistant)
    }
}

/// Where the current turn is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// Nothing asked yet
    #[default]
    Idle,
    /// Question sent, waiting for the backend
    AwaitingResponse,
    /// The backend answered
    Answered,
    /// The query failed and the fallback answer is shown
    Errored,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingResponse => write!(f, "waiting"),
            Self::Answered => write!(f, "answered"),
            Self::Errored => write!(f, "error"),
        }
    }
}

/// Identifies one submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnToken(u64);

/// Current question/answer pair plus the turn bookkeeping
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    current_question: Option<Message>,
    current_answer: Option<Message>,
    phase: TurnPhase,
    latest: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a turn for `input`
    ///
    /// Stores `input` as the current question, clears the answer and
    /// returns the token the response must carry. Blank input is ignored
    /// and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gander::chat::{ChatState, TurnPhase};
    ///
    /// let mut chat = ChatState::new();
    /// assert!(chat.begin_turn("   ").is_none());
    ///
    /// let token = chat.begin_turn("What is V1?").unwrap();
    /// assert_eq!(chat.phase(), TurnPhase::AwaitingResponse);
    /// assert!(chat.complete_turn(token, Ok("Decision speed".to_string())));
    /// assert_eq!(chat.current_answer().unwrap().content, "Decision speed");
    /// ```
    pub fn begin_turn(&mut self, input: &str) -> Option<TurnToken> {
        if input.trim().is_empty() {
            return None;
        }

        self.latest += 1;
        self.current_question = Some(Message::user(input));
        self.current_answer = None;
        self.phase = TurnPhase::AwaitingResponse;
        Some(TurnToken(self.latest))
    }

    /// Apply the outcome of the query started with `token`
    ///
    /// Failures are logged and replaced by [`FALLBACK_ANSWER`]. Returns
    /// `false` (and changes nothing) when a newer turn has started since.
    pub fn complete_turn(&mut self, token: TurnToken, outcome: Result<String>) -> bool {
        if token.0 != self.latest {
            tracing::debug!(
                "Discarding stale answer for turn {} (latest is {})",
                token.0,
                self.latest
            );
            return false;
        }

        match outcome {
            Ok(answer) => {
                self.current_answer = Some(Message::assistant(answer));
                self.phase = TurnPhase::Answered;
            }
            Err(e) => {
                tracing::error!("Error querying: {:#}", e);
                self.current_answer = Some(Message::assistant(FALLBACK_ANSWER));
                self.phase = TurnPhase::Errored;
            }
        }
        true
    }

    pub fn current_question(&self) -> Option<&Message> {
        self.current_question.as_ref()
    }

    pub fn current_answer(&self) -> Option<&Message> {
        self.current_answer.as_ref()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// True while the latest question is unanswered
    pub fn is_loading(&self) -> bool {
        self.phase == TurnPhase::AwaitingResponse
    }
}
