//! Task API trait.

use crate::error::Result;
use crate::types::{Comment, NewComment, NewTask, Task, TaskId, TaskStatus, UserRef};

/// Backend task, comment and user-directory endpoints.
///
/// Implemented by the remote client; mocked for reducer and store tests.
/// All methods map a non-completing request to `DomainError::Network` /
/// `DomainError::Timeout` and a rejection to `DomainError::Rejected`.
pub trait TaskApi: Send + Sync {
    /// Fetch all tasks.
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn fetch_tasks(&self) -> impl std::future::Future<Output = Result<Vec<Task>>> + Send;

    /// Fetch all comments.
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn fetch_comments(&self) -> impl std::future::Future<Output = Result<Vec<Comment>>> + Send;

    /// Fetch the assignable-user directory (developers and testers).
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn fetch_assignable_users(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<UserRef>>> + Send;

    /// Create a task. The input has been validated by the store
    /// (`assigned_to` is `Some`, title non-empty).
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn create_task(
        &self,
        input: NewTask,
    ) -> impl std::future::Future<Output = Result<Task>> + Send;

    /// Replace a task (the backend's PUT endpoint).
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn update_task(
        &self,
        id: TaskId,
        task: Task,
    ) -> impl std::future::Future<Output = Result<Task>> + Send;

    /// Change only a task's status (the backend's PATCH endpoint).
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn set_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> impl std::future::Future<Output = Result<Task>> + Send;

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn delete_task(&self, id: TaskId) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Create a comment.
    ///
    /// # Errors
    ///
    /// Returns error if the request does not complete or is rejected.
    fn create_comment(
        &self,
        comment: NewComment,
    ) -> impl std::future::Future<Output = Result<Comment>> + Send;
}
