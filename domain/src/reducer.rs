//! Domain reducer.
//!
//! Implements the task/comment/notification lifecycle: loading with an
//! offline fallback, validated mutations with server-confirmed merges,
//! comment mentions, and notification bookkeeping.
//!
//! # Consistency rules
//!
//! - Collections are replaced or merged only here, under the store's write
//!   lock, so readers never observe a half-applied update.
//! - Server-confirmed results are merged immediately; nothing forces a full
//!   reload on success.
//! - Every task mutation carries a per-task sequence assigned at command
//!   time. A response is merged only if its sequence is still the latest
//!   initiated for that task; responses overtaken by a newer mutation are
//!   discarded, so the final state reflects the later-*initiated* call even
//!   when responses arrive out of order.

use chrono::{DateTime, Utc};
use taskhive_core::effect::Effect;
use taskhive_core::reducer::{Effects, Reducer};
use taskhive_core::smallvec;

use crate::actions::DomainAction;
use crate::environment::DomainEnvironment;
use crate::error::DomainError;
use crate::fallback;
use crate::mention::{mention_candidates, resolve_mentions};
use crate::providers::TaskApi;
use crate::state::{DataSource, DomainState};
use crate::types::{NewComment, Notification, NotificationId, UserId, UserRef};

/// Reducer for the domain store.
#[derive(Debug, Clone)]
pub struct DomainReducer<T> {
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<T>,
}

impl<T> DomainReducer<T> {
    /// Create a new domain reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> Default for DomainReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Record a user-visible transient notice.
fn notice(state: &mut DomainState, text: impl Into<String>) {
    state.last_notice = Some(text.into());
}

/// Prepend a notification for `recipient`.
fn push_notification(
    state: &mut DomainState,
    recipient: UserId,
    text: String,
    now: DateTime<Utc>,
) {
    let id = NotificationId(state.next_notification_id);
    state.next_notification_id += 1;
    state.notifications.insert(
        0,
        Notification {
            id,
            recipient,
            text,
            is_read: false,
            created_at: now,
        },
    );
}

/// The user directory mentions are resolved against: the assignable-user
/// directory plus every task participant.
fn mention_directory(state: &DomainState) -> Vec<UserRef> {
    let mut directory = state.users.clone();
    for task in &state.tasks {
        directory.push(task.assigned_to.clone());
        directory.push(task.created_by.clone());
    }
    directory
}

impl<T> DomainReducer<T> {
    /// Applies a resolved event to state. Returns follow-up effects (only
    /// the failed-mutation refetch produces any).
    #[allow(clippy::too_many_lines)]
    fn apply_event(
        state: &mut DomainState,
        event: &DomainAction,
        now: DateTime<Utc>,
    ) -> Effects<DomainAction> {
        match event {
            DomainAction::SnapshotLoaded {
                tasks,
                comments,
                users,
            } => {
                state.tasks = tasks.clone();
                state.comments = comments.clone();
                state.users = users.clone();
                state.source = DataSource::Server;
                state.loading = false;
                state.last_notice = None;
                tracing::info!(
                    tasks = tasks.len(),
                    comments = comments.len(),
                    users = users.len(),
                    "Loaded snapshot from backend"
                );
                smallvec![]
            },

            DomainAction::LoadFailed { reason } => {
                state.loading = false;

                if state.source == DataSource::Unloaded {
                    // Initial load: degrade to the labeled offline dataset so
                    // the view layer has something to render.
                    let snapshot = fallback::snapshot(state.viewer.as_ref().map(|v| v.id));
                    let max_notification_id = snapshot
                        .notifications
                        .iter()
                        .map(|n| n.id.0)
                        .max()
                        .unwrap_or(0);

                    state.tasks = snapshot.tasks;
                    state.comments = snapshot.comments;
                    state.notifications = snapshot.notifications;
                    state.users = snapshot.users;
                    state.source = DataSource::Fallback;
                    state.next_notification_id = max_notification_id + 1;

                    tracing::warn!(%reason, "Backend unreachable at initial load, using offline demo data");
                    notice(
                        state,
                        format!("Backend unreachable, showing offline demo data ({reason})"),
                    );
                } else {
                    tracing::warn!(%reason, "Refresh failed, keeping current data");
                    notice(state, format!("Failed to refresh: {reason}"));
                }
                smallvec![]
            },

            DomainAction::TaskCreated { task } => {
                state.tasks.insert(0, task.clone());
                push_notification(
                    state,
                    task.assigned_to.id,
                    format!("You have been assigned a new task: \"{}\"", task.title),
                    now,
                );
                notice(state, "Task created");
                smallvec![]
            },

            DomainAction::CreateTaskFailed { reason } => {
                notice(state, format!("Failed to create task: {reason}"));
                smallvec![]
            },

            DomainAction::TaskUpdateResolved { id, seq, task } => {
                if !state.is_latest_update(*id, *seq) {
                    tracing::warn!(task = %id, seq, "Discarding stale task update response");
                    return smallvec![];
                }

                let Some(pos) = state.tasks.iter().position(|t| t.id == *id) else {
                    // Deleted locally while the update was in flight
                    tracing::warn!(task = %id, "Update resolved for a task no longer known");
                    return smallvec![];
                };

                let old = state.tasks[pos].clone();

                if old.status != task.status {
                    push_notification(
                        state,
                        old.assigned_to.id,
                        format!("Task \"{}\" has been updated to {}", old.title, task.status),
                        now,
                    );
                }

                if task.assigned_to.id != old.assigned_to.id {
                    push_notification(
                        state,
                        task.assigned_to.id,
                        format!("You have been assigned to the task: \"{}\"", old.title),
                        now,
                    );
                }

                state.tasks[pos] = task.clone();
                notice(state, "Task updated");
                smallvec![]
            },

            DomainAction::TaskUpdateFailed { id, seq, reason } => {
                if !state.is_latest_update(*id, *seq) {
                    // A newer mutation superseded this one; its outcome is
                    // the one that matters.
                    tracing::debug!(task = %id, seq, "Ignoring failure of a superseded mutation");
                    return smallvec![];
                }

                tracing::warn!(task = %id, %reason, "Task update failed, refetching");
                notice(state, format!("Failed to update task: {reason}"));
                // Roll back optimistic bookkeeping by refetching
                smallvec![Effect::future(async { Some(DomainAction::Load) })]
            },

            DomainAction::TaskDeleted { id } => {
                state.tasks.retain(|t| t.id != *id);
                state.comments.retain(|c| c.task != *id);
                state.update_seqs.remove(id);
                notice(state, "Task deleted");
                smallvec![]
            },

            DomainAction::DeleteTaskFailed { id, reason } => {
                tracing::warn!(task = %id, %reason, "Task deletion failed");
                notice(state, format!("Failed to delete task: {reason}"));
                smallvec![]
            },

            DomainAction::CommentAdded { comment, mentioned } => {
                state.comments.insert(0, comment.clone());

                if let Some(task) = state.task(comment.task).cloned() {
                    for user_id in mentioned {
                        if *user_id == task.assigned_to.id || *user_id == task.created_by.id {
                            push_notification(
                                state,
                                *user_id,
                                format!(
                                    "{} mentioned you in a comment on task \"{}\"",
                                    comment.author.username, task.title
                                ),
                                now,
                            );
                        }
                    }
                }

                notice(state, "Comment added");
                smallvec![]
            },

            DomainAction::AddCommentFailed { reason } => {
                notice(state, format!("Failed to add comment: {reason}"));
                smallvec![]
            },

            // Commands are not applied to state
            DomainAction::SetViewer { .. }
            | DomainAction::Load
            | DomainAction::CreateTask { .. }
            | DomainAction::UpdateTask { .. }
            | DomainAction::SetTaskStatus { .. }
            | DomainAction::DeleteTask { .. }
            | DomainAction::AddComment { .. }
            | DomainAction::MarkNotificationRead { .. }
            | DomainAction::MarkAllNotificationsRead => smallvec![],
        }
    }
}

impl<T> Reducer for DomainReducer<T>
where
    T: TaskApi + Clone + 'static,
{
    type State = DomainState;
    type Action = DomainAction;
    type Environment = DomainEnvironment<T>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        tracing::trace!(action = action.name(), "Reducing domain action");
        let now = env.clock.now();

        match action {
            // ═══════════════════════════════════════════════════════════════
            // SetViewer: session identity changed; load when signed in
            // ═══════════════════════════════════════════════════════════════
            DomainAction::SetViewer { viewer } => {
                let signed_in = viewer.is_some();
                state.viewer = viewer;

                if signed_in {
                    smallvec![Effect::future(async { Some(DomainAction::Load) })]
                } else {
                    smallvec![]
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Load: fetch tasks, comments and the user directory
            // ═══════════════════════════════════════════════════════════════
            DomainAction::Load => {
                state.loading = true;
                let api = env.api.clone();

                smallvec![Effect::future(async move {
                    let result = async {
                        let tasks = api.fetch_tasks().await?;
                        let comments = api.fetch_comments().await?;
                        let users = api.fetch_assignable_users().await?;
                        Ok::<_, DomainError>((tasks, comments, users))
                    }
                    .await;

                    match result {
                        Ok((tasks, comments, users)) => Some(DomainAction::SnapshotLoaded {
                            tasks,
                            comments,
                            users,
                        }),
                        Err(error) => Some(DomainAction::LoadFailed {
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // CreateTask: validate, then create and merge the confirmation
            // ═══════════════════════════════════════════════════════════════
            DomainAction::CreateTask { input } => {
                if input.title.trim().is_empty() {
                    notice(state, DomainError::Validation("a task title is required".to_string()).to_string());
                    return smallvec![];
                }
                if input.assigned_to.is_none() {
                    notice(state, DomainError::Validation("an assignee is required".to_string()).to_string());
                    return smallvec![];
                }

                let api = env.api.clone();

                smallvec![Effect::future(async move {
                    match api.create_task(input).await {
                        Ok(task) => Some(DomainAction::TaskCreated { task }),
                        Err(error) => Some(DomainAction::CreateTaskFailed {
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // UpdateTask / SetTaskStatus: sequence-tagged mutations
            // ═══════════════════════════════════════════════════════════════
            DomainAction::UpdateTask { id, patch } => {
                let Some(current) = state.task(id).cloned() else {
                    notice(state, DomainError::TaskNotFound(id).to_string());
                    return smallvec![];
                };

                let candidate = patch.apply_to(&current);
                let seq = state.next_update_seq(id);
                let api = env.api.clone();

                smallvec![Effect::future(async move {
                    match api.update_task(id, candidate).await {
                        Ok(task) => Some(DomainAction::TaskUpdateResolved { id, seq, task }),
                        Err(error) => Some(DomainAction::TaskUpdateFailed {
                            id,
                            seq,
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            DomainAction::SetTaskStatus { id, status } => {
                if !state.task_exists(id) {
                    notice(state, DomainError::TaskNotFound(id).to_string());
                    return smallvec![];
                }

                let seq = state.next_update_seq(id);
                let api = env.api.clone();

                smallvec![Effect::future(async move {
                    match api.set_task_status(id, status).await {
                        Ok(task) => Some(DomainAction::TaskUpdateResolved { id, seq, task }),
                        Err(error) => Some(DomainAction::TaskUpdateFailed {
                            id,
                            seq,
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // DeleteTask: cascade removal of the task's comments on success
            // ═══════════════════════════════════════════════════════════════
            DomainAction::DeleteTask { id } => {
                if !state.task_exists(id) {
                    notice(state, DomainError::TaskNotFound(id).to_string());
                    return smallvec![];
                }

                let api = env.api.clone();

                smallvec![Effect::future(async move {
                    match api.delete_task(id).await {
                        Ok(()) => Some(DomainAction::TaskDeleted { id }),
                        Err(error) => Some(DomainAction::DeleteTaskFailed {
                            id,
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // AddComment: mention scan, then create and merge
            // ═══════════════════════════════════════════════════════════════
            DomainAction::AddComment { task_id, content } => {
                let Some(viewer) = state.viewer.clone() else {
                    notice(state, DomainError::Validation("sign in to comment".to_string()).to_string());
                    return smallvec![];
                };

                if content.trim().is_empty() {
                    notice(state, DomainError::Validation("a comment cannot be empty".to_string()).to_string());
                    return smallvec![];
                }

                if !state.task_exists(task_id) {
                    notice(state, DomainError::TaskNotFound(task_id).to_string());
                    return smallvec![];
                }

                let directory = mention_directory(state);
                let candidates = mention_candidates(&content);
                let mentioned: Vec<UserId> = resolve_mentions(&candidates, &directory)
                    .into_iter()
                    .map(|u| u.id)
                    .collect();

                let payload = NewComment {
                    task: task_id,
                    author: viewer.id,
                    content,
                    mentions: mentioned.clone(),
                };
                let api = env.api.clone();

                smallvec![Effect::future(async move {
                    match api.create_comment(payload).await {
                        Ok(comment) => Some(DomainAction::CommentAdded { comment, mentioned }),
                        Err(error) => Some(DomainAction::AddCommentFailed {
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // Notification read-marking: local, idempotent
            // ═══════════════════════════════════════════════════════════════
            DomainAction::MarkNotificationRead { id } => {
                if let Some(notification) =
                    state.notifications.iter_mut().find(|n| n.id == id)
                {
                    if !notification.is_read {
                        notification.is_read = true;
                    }
                }
                smallvec![]
            },

            DomainAction::MarkAllNotificationsRead => {
                if let Some(viewer_id) = state.viewer.as_ref().map(|v| v.id) {
                    for notification in &mut state.notifications {
                        if notification.recipient == viewer_id && !notification.is_read {
                            notification.is_read = true;
                        }
                    }
                }
                smallvec![]
            },

            // ═══════════════════════════════════════════════════════════════
            // Events: already resolved, apply to state
            // ═══════════════════════════════════════════════════════════════
            DomainAction::SnapshotLoaded { .. }
            | DomainAction::LoadFailed { .. }
            | DomainAction::TaskCreated { .. }
            | DomainAction::CreateTaskFailed { .. }
            | DomainAction::TaskUpdateResolved { .. }
            | DomainAction::TaskUpdateFailed { .. }
            | DomainAction::TaskDeleted { .. }
            | DomainAction::DeleteTaskFailed { .. }
            | DomainAction::CommentAdded { .. }
            | DomainAction::AddCommentFailed { .. } => Self::apply_event(state, &action, now),
        }
    }
}
