//! Domain store state and derived accessors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    Comment, CommentId, Notification, Task, TaskId, TaskPriority, TaskStatus, UserId, UserRef,
};

/// Where the current collections came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataSource {
    /// Nothing loaded yet.
    #[default]
    Unloaded,

    /// Collections hold backend data.
    Server,

    /// The backend was unreachable at initial load; collections hold the
    /// built-in offline demo dataset. Never merged with server data - the
    /// next successful load replaces it wholesale.
    Fallback,
}

/// Counts over the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    /// All tasks.
    pub total: usize,
    /// Tasks not started.
    pub pending: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Tasks done.
    pub completed: usize,
    /// High-priority tasks.
    pub high_priority: usize,
    /// Medium-priority tasks.
    pub medium_priority: usize,
    /// Low-priority tasks.
    pub low_priority: usize,
    /// `completed / total * 100`; `0.0` for an empty collection.
    pub completion_rate: f64,
}

/// Root domain state: the single source of truth for tasks, comments and
/// notifications.
///
/// Collections are only mutated by the reducer (under the store's write
/// lock), so readers never observe a half-applied update. Comments are kept
/// newest-first: creation prepends, and [`DomainState::comments_for_task`]
/// returns display order directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainState {
    /// The signed-in user, mirrored from the session store.
    pub viewer: Option<UserRef>,

    /// All known tasks, newest first.
    pub tasks: Vec<Task>,

    /// All known comments, newest first.
    pub comments: Vec<Comment>,

    /// Client-side notifications, newest first.
    pub notifications: Vec<Notification>,

    /// Assignable users (the developer/tester directory).
    pub users: Vec<UserRef>,

    /// Provenance of the current collections.
    pub source: DataSource,

    /// Whether a load is in flight.
    pub loading: bool,

    /// Last user-visible transient notice (failures, degraded mode).
    pub last_notice: Option<String>,

    /// Latest initiated mutation sequence per task. Responses carrying an
    /// older sequence are stale and discarded.
    pub update_seqs: HashMap<TaskId, u64>,

    /// Next client-allocated notification id.
    pub next_notification_id: i64,
}

impl Default for DomainState {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainState {
    /// Create an empty, unloaded state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewer: None,
            tasks: Vec::new(),
            comments: Vec::new(),
            notifications: Vec::new(),
            users: Vec::new(),
            source: DataSource::Unloaded,
            loading: false,
            last_notice: None,
            update_seqs: HashMap::new(),
            next_notification_id: 1,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Derived accessors (pure, computed per call)
    // ═══════════════════════════════════════════════════════════════════

    /// The task with the given id, if known.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Whether a task with the given id is known.
    #[must_use]
    pub fn task_exists(&self, id: TaskId) -> bool {
        self.task(id).is_some()
    }

    /// The comment with the given id, if known.
    #[must_use]
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Tasks assigned to the given user.
    #[must_use]
    pub fn tasks_for_user(&self, user_id: UserId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assigned_to.id == user_id)
            .collect()
    }

    /// Comments on the given task, newest first.
    #[must_use]
    pub fn comments_for_task(&self, task_id: TaskId) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.task == task_id)
            .collect()
    }

    /// Notifications for the given user, newest first.
    #[must_use]
    pub fn notifications_for_user(&self, user_id: UserId) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.recipient == user_id)
            .collect()
    }

    /// Unread notification count for the given user.
    #[must_use]
    pub fn unread_count(&self, user_id: UserId) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.recipient == user_id && !n.is_read)
            .count()
    }

    /// Counts by status and priority over the full task collection.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let count_status =
            |status: TaskStatus| self.tasks.iter().filter(|t| t.status == status).count();
        let count_priority =
            |priority: TaskPriority| self.tasks.iter().filter(|t| t.priority == priority).count();

        let completed = count_status(TaskStatus::Completed);

        // Avoid dividing by zero on an empty collection
        #[allow(clippy::cast_precision_loss)]
        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        TaskStats {
            total,
            pending: count_status(TaskStatus::Pending),
            in_progress: count_status(TaskStatus::InProgress),
            completed,
            high_priority: count_priority(TaskPriority::High),
            medium_priority: count_priority(TaskPriority::Medium),
            low_priority: count_priority(TaskPriority::Low),
            completion_rate,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reducer-internal helpers
    // ═══════════════════════════════════════════════════════════════════

    /// Allocate the next mutation sequence for a task and record it as the
    /// latest initiated.
    pub fn next_update_seq(&mut self, id: TaskId) -> u64 {
        let seq = self.update_seqs.entry(id).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Whether `seq` is the latest initiated mutation for `id`.
    #[must_use]
    pub fn is_latest_update(&self, id: TaskId, seq: u64) -> bool {
        self.update_seqs.get(&id) == Some(&seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use taskhive_session::Role;

    fn user(id: i64, name: &str) -> UserRef {
        UserRef {
            id: UserId(id),
            username: name.to_string(),
            role: Some(Role::Developer),
        }
    }

    fn task(id: i64, assignee: i64, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: TaskId(id),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            priority,
            assigned_to: user(assignee, "Jane Developer"),
            created_by: user(1, "John Manager"),
            created_at: DateTime::<Utc>::MIN_UTC,
            due_date: None,
            attachment: None,
        }
    }

    #[test]
    fn stats_on_empty_collection_are_all_zero() {
        let state = DomainState::new();
        let stats = state.stats();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.high_priority, 0);
        assert_eq!(stats.medium_priority, 0);
        assert_eq!(stats.low_priority, 0);
        assert!((stats.completion_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_count_by_status_and_priority() {
        let mut state = DomainState::new();
        state.tasks = vec![
            task(1, 2, TaskStatus::Completed, TaskPriority::High),
            task(2, 2, TaskStatus::Completed, TaskPriority::Medium),
            task(3, 3, TaskStatus::InProgress, TaskPriority::Medium),
            task(4, 3, TaskStatus::Pending, TaskPriority::Low),
        ];

        let stats = state.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.high_priority, 1);
        assert_eq!(stats.medium_priority, 2);
        assert_eq!(stats.low_priority, 1);
        assert!((stats.completion_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tasks_for_user_filters_by_assignee() {
        let mut state = DomainState::new();
        state.tasks = vec![
            task(1, 2, TaskStatus::Pending, TaskPriority::High),
            task(2, 3, TaskStatus::Pending, TaskPriority::High),
            task(3, 2, TaskStatus::Pending, TaskPriority::High),
        ];

        let jane = state.tasks_for_user(UserId(2));
        assert_eq!(jane.len(), 2);
        assert!(jane.iter().all(|t| t.assigned_to.id == UserId(2)));

        assert!(state.tasks_for_user(UserId(99)).is_empty());
    }

    #[test]
    fn comments_for_task_preserves_store_order() {
        let mut state = DomainState::new();
        let author = user(2, "Jane Developer");
        state.comments = vec![
            Comment {
                id: CommentId(2),
                task: TaskId(1),
                author: author.clone(),
                content: "newer".to_string(),
                created_at: DateTime::<Utc>::MIN_UTC,
            },
            Comment {
                id: CommentId(1),
                task: TaskId(1),
                author,
                content: "older".to_string(),
                created_at: DateTime::<Utc>::MIN_UTC,
            },
        ];

        let comments = state.comments_for_task(TaskId(1));
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "newer");
        assert_eq!(comments[1].content, "older");

        assert!(state.comments_for_task(TaskId(42)).is_empty());
    }

    #[test]
    fn update_seq_is_monotonic_per_task() {
        let mut state = DomainState::new();

        let a1 = state.next_update_seq(TaskId(1));
        let a2 = state.next_update_seq(TaskId(1));
        let b1 = state.next_update_seq(TaskId(2));

        assert_eq!((a1, a2, b1), (1, 2, 1));
        assert!(state.is_latest_update(TaskId(1), 2));
        assert!(!state.is_latest_update(TaskId(1), 1));
        assert!(state.is_latest_update(TaskId(2), 1));
    }
}
