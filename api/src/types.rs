//! Wire payload types for the backend's auth endpoints.
//!
//! Task and comment bodies reuse the domain types directly - their field
//! names and enum casing already match the backend.

use serde::{Deserialize, Serialize};

use taskhive_domain::{TaskId, TaskStatus, UserId};

/// `POST /token/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// `POST /token/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

/// `POST /token/refresh/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    /// The held refresh token.
    pub refresh: String,
}

/// `POST /token/refresh/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    /// The new access token.
    pub access: String,
    /// A rotated refresh token, when the backend rotates them.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// `POST /signup/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SignupBody {
    /// Desired username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; the backend checks the two match.
    pub password2: String,
}

/// `POST /signup/` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    /// Confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /comments/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct CommentBody {
    /// Parent task id.
    pub task: TaskId,
    /// Author's user id.
    pub author: UserId,
    /// Comment text.
    pub content: String,
    /// Resolved mentioned user ids.
    pub mentions: Vec<UserId>,
}

/// `PATCH /tasks/:id/` request body (status-only path).
#[derive(Debug, Clone, Serialize)]
pub struct StatusBody {
    /// The new status.
    pub status: TaskStatus,
}

/// Error body shape used by the backend (`{"detail": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error detail.
    pub detail: String,
}
