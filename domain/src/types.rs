//! Domain entity types.
//!
//! Wire form matches the backend: snake_case field names, lowercase enum
//! values (`pending`/`in_progress`/`completed`, `high`/`medium`/`low`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
pub use taskhive_session::{Role, UserId};

// ═══════════════════════════════════════════════════════════════════════
// ID types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a task, assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a comment, assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub i64);

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a notification.
///
/// Notifications are client-side entities; ids are allocated from a counter
/// in domain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub i64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Enumerations
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// The status as the backend spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Needs attention first.
    High,
    /// Normal.
    Medium,
    /// Whenever there is time.
    Low,
}

impl TaskPriority {
    /// The priority as the backend spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════

/// Reference to a known user, as embedded in tasks and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Backend user id.
    pub id: UserId,

    /// Display name (e.g. "Jane Developer"), matched by mentions.
    pub username: String,

    /// Role, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// A task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Backend id.
    pub id: TaskId,

    /// Short title.
    pub title: String,

    /// Longer description.
    pub description: String,

    /// Lifecycle state.
    pub status: TaskStatus,

    /// Priority.
    pub priority: TaskPriority,

    /// The user the task is assigned to.
    pub assigned_to: UserRef,

    /// The user who created the task.
    pub created_by: UserRef,

    /// Creation timestamp, set by the backend.
    pub created_at: DateTime<Utc>,

    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    /// Reference to an uploaded attachment, if any.
    #[serde(default)]
    pub attachment: Option<String>,
}

/// A comment on a task.
///
/// Comments are never edited; they are removed only when their parent task is
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Backend id.
    pub id: CommentId,

    /// The task this comment belongs to.
    pub task: TaskId,

    /// The comment's author.
    pub author: UserRef,

    /// Comment text; may embed `@First Last` mentions.
    pub content: String,

    /// Creation timestamp, set by the backend.
    pub created_at: DateTime<Utc>,
}

/// A client-side notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Client-allocated id.
    pub id: NotificationId,

    /// The user this notification is for.
    pub recipient: UserId,

    /// Notification text.
    pub text: String,

    /// Read flag; transitions only false→true.
    pub is_read: bool,

    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Mutation inputs
// ═══════════════════════════════════════════════════════════════════════

/// A file to upload with a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// File name sent in the multipart part.
    pub file_name: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Input for creating a task.
///
/// `created_by` and `created_at` are set by the backend from the
/// authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    /// Short title. Must be non-empty.
    pub title: String,

    /// Longer description.
    pub description: String,

    /// Initial lifecycle state.
    pub status: TaskStatus,

    /// Priority.
    pub priority: TaskPriority,

    /// Assignee. Required; validated by the store before any request is made.
    pub assigned_to: Option<UserRef>,

    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,

    /// Optional attachment to upload.
    pub attachment: Option<AttachmentUpload>,
}

/// A partial update merged over an existing task.
///
/// The backend's update endpoint is a full replace; the store merges the
/// patch over its current copy and sends the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New lifecycle state.
    pub status: Option<TaskStatus>,

    /// New priority.
    pub priority: Option<TaskPriority>,

    /// New assignee.
    pub assigned_to: Option<UserRef>,

    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// A patch changing only the status (the card view's quick path).
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merge this patch over a task, producing the replacement candidate.
    #[must_use]
    pub fn apply_to(&self, task: &Task) -> Task {
        Task {
            id: task.id,
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| task.description.clone()),
            status: self.status.unwrap_or(task.status),
            priority: self.priority.unwrap_or(task.priority),
            assigned_to: self
                .assigned_to
                .clone()
                .unwrap_or_else(|| task.assigned_to.clone()),
            created_by: task.created_by.clone(),
            created_at: task.created_at,
            due_date: self.due_date.or(task.due_date),
            attachment: task.attachment.clone(),
        }
    }
}

/// Payload for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Parent task.
    pub task: TaskId,

    /// Author's user id.
    pub author: UserId,

    /// Comment text.
    pub content: String,

    /// Resolved mentioned user ids, sent along for the backend's records.
    pub mentions: Vec<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(id: i64, name: &str) -> UserRef {
        UserRef {
            id: UserId(id),
            username: name.to_string(),
            role: None,
        }
    }

    fn task() -> Task {
        Task {
            id: TaskId(1),
            title: "Implement User Authentication".to_string(),
            description: "Create a secure authentication system".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assigned_to: user(2, "Jane Developer"),
            created_by: user(1, "John Manager"),
            created_at: Utc.with_ymd_and_hms(2023, 11, 1, 10, 0, 0).single().unwrap_or(DateTime::<Utc>::MIN_UTC),
            due_date: None,
            attachment: None,
        }
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap_or_default();
        assert_eq!(json, "\"in_progress\"");

        let parsed: Result<TaskStatus, _> = serde_json::from_str("\"pending\"");
        assert!(matches!(parsed, Ok(TaskStatus::Pending)));
    }

    #[test]
    fn priority_uses_lowercase_on_the_wire() {
        let json = serde_json::to_string(&TaskPriority::High).unwrap_or_default();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn task_deserializes_backend_shape() {
        let json = r#"{
            "id": 7,
            "title": "API Documentation",
            "description": "Document all API endpoints",
            "status": "pending",
            "priority": "low",
            "assigned_to": {"id": 2, "username": "Jane Developer", "role": "developer"},
            "created_by": {"id": 1, "username": "John Manager", "role": "manager"},
            "created_at": "2023-11-03T13:15:00Z",
            "due_date": null,
            "attachment": null
        }"#;

        let parsed: Result<Task, _> = serde_json::from_str(json);
        let Ok(parsed) = parsed else {
            unreachable!("backend-shaped task must parse");
        };
        assert_eq!(parsed.id, TaskId(7));
        assert_eq!(parsed.status, TaskStatus::Pending);
        assert_eq!(parsed.assigned_to.role, Some(Role::Developer));
    }

    #[test]
    fn patch_merges_over_current_task() {
        let current = task();
        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            assigned_to: Some(user(3, "Mark Tester")),
            ..TaskPatch::default()
        };

        let merged = patch.apply_to(&current);
        assert_eq!(merged.status, TaskStatus::Completed);
        assert_eq!(merged.assigned_to.id, UserId(3));
        // Untouched fields carried over
        assert_eq!(merged.title, current.title);
        assert_eq!(merged.created_by, current.created_by);
    }

    #[test]
    fn status_patch_changes_nothing_else() {
        let current = task();
        let merged = TaskPatch::status(TaskStatus::Completed).apply_to(&current);
        assert_eq!(merged.status, TaskStatus::Completed);
        assert_eq!(merged.priority, current.priority);
        assert_eq!(merged.assigned_to, current.assigned_to);
    }
}
