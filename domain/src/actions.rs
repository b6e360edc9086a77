//! Domain actions: commands issued by the view layer and events resolved by
//! effects.

use taskhive_macros::Action;

use crate::types::{
    Comment, NewTask, NotificationId, Task, TaskId, TaskPatch, TaskStatus, UserId, UserRef,
};

/// All inputs to the domain reducer.
#[derive(Action, Clone, Debug, PartialEq)]
pub enum DomainAction {
    // ========== Commands ==========
    /// Command: mirror the session identity into the store.
    ///
    /// Becoming `Some` triggers a load (the store loads on session-identity
    /// change); becoming `None` leaves collections in place for the next
    /// login to replace.
    #[command]
    SetViewer {
        /// The signed-in user, or `None` after logout.
        viewer: Option<UserRef>,
    },

    /// Command: fetch tasks, comments and the user directory.
    #[command]
    Load,

    /// Command: create a task.
    #[command]
    CreateTask {
        /// The task input; validated before any request is made.
        input: NewTask,
    },

    /// Command: update a task (full replace on the backend).
    #[command]
    UpdateTask {
        /// Task to update.
        id: TaskId,
        /// Fields to change.
        patch: TaskPatch,
    },

    /// Command: change only a task's status (the card view's quick path).
    #[command]
    SetTaskStatus {
        /// Task to update.
        id: TaskId,
        /// The new status.
        status: TaskStatus,
    },

    /// Command: delete a task and its comments.
    #[command]
    DeleteTask {
        /// Task to delete.
        id: TaskId,
    },

    /// Command: comment on a task.
    #[command]
    AddComment {
        /// Parent task; must exist locally.
        task_id: TaskId,
        /// Comment text; may embed `@First Last` mentions.
        content: String,
    },

    /// Command: mark one notification as read. No-op when already read.
    #[command]
    MarkNotificationRead {
        /// Notification to mark.
        id: NotificationId,
    },

    /// Command: mark all of the viewer's notifications as read.
    #[command]
    MarkAllNotificationsRead,

    // ========== Events ==========
    /// Event: a load completed; collections are replaced wholesale.
    #[event]
    SnapshotLoaded {
        /// Tasks from the backend.
        tasks: Vec<Task>,
        /// Comments from the backend.
        comments: Vec<Comment>,
        /// Assignable users from the backend.
        users: Vec<UserRef>,
    },

    /// Event: a load failed.
    #[event]
    LoadFailed {
        /// User-visible reason.
        reason: String,
    },

    /// Event: the backend confirmed a created task.
    #[event]
    TaskCreated {
        /// The created task, with its server-assigned id.
        task: Task,
    },

    /// Event: task creation failed.
    #[event]
    CreateTaskFailed {
        /// User-visible reason.
        reason: String,
    },

    /// Event: the backend confirmed a task mutation.
    ///
    /// Applied only when `seq` is still the latest initiated mutation for
    /// the task; responses overtaken by a newer mutation are discarded.
    #[event]
    TaskUpdateResolved {
        /// The mutated task's id.
        id: TaskId,
        /// Mutation sequence assigned when the command was issued.
        seq: u64,
        /// The server-confirmed task.
        task: Task,
    },

    /// Event: a task mutation failed.
    #[event]
    TaskUpdateFailed {
        /// The task's id.
        id: TaskId,
        /// Mutation sequence assigned when the command was issued.
        seq: u64,
        /// User-visible reason.
        reason: String,
    },

    /// Event: the backend confirmed a task deletion.
    #[event]
    TaskDeleted {
        /// The deleted task's id.
        id: TaskId,
    },

    /// Event: task deletion failed.
    #[event]
    DeleteTaskFailed {
        /// The task's id.
        id: TaskId,
        /// User-visible reason.
        reason: String,
    },

    /// Event: the backend confirmed a created comment.
    #[event]
    CommentAdded {
        /// The created comment, with its server-assigned id.
        comment: Comment,
        /// Uniquely resolved mentioned users.
        mentioned: Vec<UserId>,
    },

    /// Event: comment creation failed.
    #[event]
    AddCommentFailed {
        /// User-visible reason.
        reason: String,
    },
}
