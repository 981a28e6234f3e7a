//! Mock authentication
//!
//! A stand-in for real sign-in: [`MockAuthenticator::login`] accepts any
//! non-empty email/password pair after a simulated delay and hands back a
//! [`Session`]. No password is checked, no token is issued and nothing is
//! persisted. The session lives in an [`AuthState`] owned by the caller.

use crate::config::AuthConfig;
use crate::error::{GanderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Role of a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Inspector,
    Pilot,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inspector => write!(f, "inspector"),
            Self::Pilot => write!(f, "pilot"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A user record, as returned by `/auth/login` or the mock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Proof of a successful login
///
/// Created only by [`MockAuthenticator::login`] and consumed by
/// [`MockAuthenticator::logout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    /// The signed-in user
    pub fn user(&self) -> &User {
        &self.user
    }
}

/// Simulated login/logout with fixed delays
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    login_delay: Duration,
    logout_delay: Duration,
}

impl MockAuthenticator {
    /// Create an authenticator with explicit delays
    pub fn new(login_delay: Duration, logout_delay: Duration) -> Self {
        Self {
            login_delay,
            logout_delay,
        }
    }

    /// Create an authenticator from configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            Duration::from_millis(config.login_delay_ms),
            Duration::from_millis(config.logout_delay_ms),
        )
    }

    /// Sign in after the login delay
    ///
    /// # Errors
    ///
    /// Returns [`GanderError::Authentication`] if either field is empty
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gander::auth::MockAuthenticator;
    /// use std::time::Duration;
    ///
    /// # async fn example() -> gander::error::Result<()> {
    /// let auth = MockAuthenticator::new(Duration::ZERO, Duration::ZERO);
    /// let session = auth.login("a@b.com", "p").await?;
    /// assert_eq!(session.user().email, "a@b.com");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        tokio::time::sleep(self.login_delay).await;

        if email.is_empty() || password.is_empty() {
            tracing::warn!("Mock login rejected: empty email or password");
            return Err(GanderError::Authentication("Invalid credentials".to_string()).into());
        }

        tracing::info!("Mock login succeeded for {}", email);
        Ok(Session {
            user: User {
                id: "1".to_string(),
                name: "John Doe".to_string(),
                email: email.to_string(),
                role: Role::Inspector,
            },
        })
    }

    /// Sign out after the logout delay, consuming the session
    pub async fn logout(&self, session: Session) {
        tokio::time::sleep(self.logout_delay).await;
        tracing::info!("Mock logout for {}", session.user.email);
    }
}

/// Holder for the current session, if any
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    session: Option<Session>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session after login, replacing any previous one
    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Remove and return the current session for logout
    pub fn sign_out(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(Session::user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
