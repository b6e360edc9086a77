//! Offline demo dataset.
//!
//! Installed only when the backend is unreachable at initial load, so the
//! view layer has something to render instead of crashing on an empty store.
//! The data is clearly provenance-labeled ([`crate::state::DataSource::Fallback`])
//! and is never merged with server data - the next successful load replaces
//! it wholesale.

use chrono::{DateTime, TimeZone, Utc};
use taskhive_session::Role;

use crate::types::{
    Comment, CommentId, Notification, NotificationId, Task, TaskId, TaskPriority, TaskStatus,
    UserId, UserRef,
};

/// The demo collections: tasks, comments, notifications and the user
/// directory.
#[derive(Debug, Clone)]
pub struct FallbackSnapshot {
    /// Demo tasks, newest first.
    pub tasks: Vec<Task>,
    /// Demo comments, newest first.
    pub comments: Vec<Comment>,
    /// Demo notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Demo assignable users.
    pub users: Vec<UserRef>,
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn manager() -> UserRef {
    UserRef {
        id: UserId(1),
        username: "John Manager".to_string(),
        role: Some(Role::Manager),
    }
}

fn developer() -> UserRef {
    UserRef {
        id: UserId(2),
        username: "Jane Developer".to_string(),
        role: Some(Role::Developer),
    }
}

fn tester() -> UserRef {
    UserRef {
        id: UserId(3),
        username: "Mark Tester".to_string(),
        role: Some(Role::Tester),
    }
}

#[allow(clippy::too_many_lines)]
fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId(5),
            title: "Fix Notification Bug".to_string(),
            description: "Notifications are not showing real-time updates properly".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            assigned_to: developer(),
            created_by: manager(),
            created_at: ts(2023, 11, 4, 9, 45),
            due_date: Some(ts(2023, 11, 9, 17, 0)),
            attachment: None,
        },
        Task {
            id: TaskId(4),
            title: "API Documentation".to_string(),
            description: "Document all API endpoints with request and response examples"
                .to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Low,
            assigned_to: developer(),
            created_by: manager(),
            created_at: ts(2023, 11, 3, 13, 15),
            due_date: Some(ts(2023, 11, 18, 17, 0)),
            attachment: None,
        },
        Task {
            id: TaskId(3),
            title: "Design Task Management UI".to_string(),
            description: "Create wireframes and UI components for the task management interface"
                .to_string(),
            status: TaskStatus::Completed,
            priority: TaskPriority::Medium,
            assigned_to: developer(),
            created_by: manager(),
            created_at: ts(2023, 11, 1, 11, 20),
            due_date: Some(ts(2023, 11, 8, 17, 0)),
            attachment: None,
        },
        Task {
            id: TaskId(2),
            title: "Test Login Functionality".to_string(),
            description: "Perform thorough testing of the login and registration flows"
                .to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            assigned_to: tester(),
            created_by: manager(),
            created_at: ts(2023, 11, 2, 9, 30),
            due_date: Some(ts(2023, 11, 12, 17, 0)),
            attachment: None,
        },
        Task {
            id: TaskId(1),
            title: "Implement User Authentication".to_string(),
            description: "Create a secure authentication system with JWT tokens".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assigned_to: developer(),
            created_by: manager(),
            created_at: ts(2023, 11, 1, 10, 0),
            due_date: Some(ts(2023, 11, 10, 17, 0)),
            attachment: None,
        },
    ]
}

fn demo_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: CommentId(5),
            task: TaskId(3),
            author: manager(),
            content: "They look great! @Mark Tester can you verify usability?".to_string(),
            created_at: ts(2023, 11, 5, 17, 15),
        },
        Comment {
            id: CommentId(4),
            task: TaskId(3),
            author: developer(),
            content: "UI components are completed and ready for review.".to_string(),
            created_at: ts(2023, 11, 5, 16, 30),
        },
        Comment {
            id: CommentId(3),
            task: TaskId(2),
            author: tester(),
            content: "I've started the testing process and found a few edge cases we need to handle.".to_string(),
            created_at: ts(2023, 11, 4, 10, 12),
        },
        Comment {
            id: CommentId(2),
            task: TaskId(1),
            author: manager(),
            content: "Great! Make sure to include refresh token functionality. @Jane Developer"
                .to_string(),
            created_at: ts(2023, 11, 3, 15, 45),
        },
        Comment {
            id: CommentId(1),
            task: TaskId(1),
            author: developer(),
            content: "I'm working on implementing JWT authentication. Should be done by tomorrow."
                .to_string(),
            created_at: ts(2023, 11, 3, 14, 22),
        },
    ]
}

fn demo_notifications(recipient: UserId) -> Vec<Notification> {
    vec![
        Notification {
            id: NotificationId(3),
            recipient,
            text: "Task \"Design Task Management UI\" has been marked as completed".to_string(),
            is_read: false,
            created_at: ts(2023, 11, 5, 16, 35),
        },
        Notification {
            id: NotificationId(2),
            recipient,
            text: "John Manager mentioned you in a comment".to_string(),
            is_read: true,
            created_at: ts(2023, 11, 3, 15, 46),
        },
        Notification {
            id: NotificationId(1),
            recipient,
            text: "You have been assigned a new task: \"Implement User Authentication\""
                .to_string(),
            is_read: false,
            created_at: ts(2023, 11, 1, 10, 5),
        },
    ]
}

/// Build the offline demo dataset.
///
/// Demo notifications are addressed to `viewer` when known so the
/// notification bell has something to show.
#[must_use]
pub fn snapshot(viewer: Option<UserId>) -> FallbackSnapshot {
    FallbackSnapshot {
        tasks: demo_tasks(),
        comments: demo_comments(),
        notifications: demo_notifications(viewer.unwrap_or(UserId(1))),
        users: vec![developer(), tester()],
    }
}
