//! Mock task API for testing.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{DomainError, Result};
use crate::providers::TaskApi;
use crate::types::{Comment, NewComment, NewTask, Task, TaskId, TaskStatus, UserRef};

/// Mock task API.
///
/// Results are queued per endpoint; an empty queue answers a network error.
/// Mutation results can carry an artificial delay, which makes out-of-order
/// response arrival reproducible under paused tokio time.
#[derive(Debug, Clone, Default)]
pub struct MockTaskApi {
    tasks: Arc<Mutex<VecDeque<Result<Vec<Task>>>>>,
    comments: Arc<Mutex<VecDeque<Result<Vec<Comment>>>>>,
    users: Arc<Mutex<VecDeque<Result<Vec<UserRef>>>>>,
    created_tasks: Arc<Mutex<VecDeque<Result<Task>>>>,
    updated_tasks: Arc<Mutex<VecDeque<(Result<Task>, Duration)>>>,
    deleted_tasks: Arc<Mutex<VecDeque<Result<()>>>>,
    created_comments: Arc<Mutex<VecDeque<Result<Comment>>>>,
    create_calls: Arc<Mutex<Vec<NewTask>>>,
    comment_calls: Arc<Mutex<Vec<NewComment>>>,
}

fn pop<T>(queue: &Arc<Mutex<VecDeque<T>>>) -> Option<T> {
    queue
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .pop_front()
}

fn push<T>(queue: &Arc<Mutex<VecDeque<T>>>, value: T) {
    queue
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .push_back(value);
}

fn no_response<T>() -> Result<T> {
    Err(DomainError::Network("no response queued".to_string()))
}

impl MockTaskApi {
    /// Create a new mock with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full successful snapshot (tasks, comments, users).
    pub fn queue_snapshot(&self, tasks: Vec<Task>, comments: Vec<Comment>, users: Vec<UserRef>) {
        push(&self.tasks, Ok(tasks));
        push(&self.comments, Ok(comments));
        push(&self.users, Ok(users));
    }

    /// Queue the next `fetch_tasks` result.
    pub fn queue_tasks(&self, result: Result<Vec<Task>>) {
        push(&self.tasks, result);
    }

    /// Queue the next `create_task` result.
    pub fn queue_create_task(&self, result: Result<Task>) {
        push(&self.created_tasks, result);
    }

    /// Queue the next `update_task`/`set_task_status` result.
    pub fn queue_task_mutation(&self, result: Result<Task>) {
        push(&self.updated_tasks, (result, Duration::ZERO));
    }

    /// Queue a mutation result that resolves only after `delay`.
    pub fn queue_task_mutation_delayed(&self, result: Result<Task>, delay: Duration) {
        push(&self.updated_tasks, (result, delay));
    }

    /// Queue the next `delete_task` result.
    pub fn queue_delete_task(&self, result: Result<()>) {
        push(&self.deleted_tasks, result);
    }

    /// Queue the next `create_comment` result.
    pub fn queue_create_comment(&self, result: Result<Comment>) {
        push(&self.created_comments, result);
    }

    /// Task inputs seen by `create_task`, in call order.
    #[must_use]
    pub fn create_calls(&self) -> Vec<NewTask> {
        self.create_calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Comment payloads seen by `create_comment`, in call order.
    #[must_use]
    pub fn comment_calls(&self) -> Vec<NewComment> {
        self.comment_calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl TaskApi for MockTaskApi {
    fn fetch_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send {
        let queue = Arc::clone(&self.tasks);
        async move { pop(&queue).unwrap_or_else(no_response) }
    }

    fn fetch_comments(&self) -> impl Future<Output = Result<Vec<Comment>>> + Send {
        let queue = Arc::clone(&self.comments);
        async move { pop(&queue).unwrap_or_else(no_response) }
    }

    fn fetch_assignable_users(&self) -> impl Future<Output = Result<Vec<UserRef>>> + Send {
        let queue = Arc::clone(&self.users);
        async move { pop(&queue).unwrap_or_else(no_response) }
    }

    fn create_task(&self, input: NewTask) -> impl Future<Output = Result<Task>> + Send {
        let queue = Arc::clone(&self.created_tasks);
        let calls = Arc::clone(&self.create_calls);

        async move {
            calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(input);
            pop(&queue).unwrap_or_else(no_response)
        }
    }

    fn update_task(&self, _id: TaskId, _task: Task) -> impl Future<Output = Result<Task>> + Send {
        let queue = Arc::clone(&self.updated_tasks);

        async move {
            let Some((result, delay)) = pop(&queue) else {
                return no_response();
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn set_task_status(
        &self,
        _id: TaskId,
        _status: TaskStatus,
    ) -> impl Future<Output = Result<Task>> + Send {
        let queue = Arc::clone(&self.updated_tasks);

        async move {
            let Some((result, delay)) = pop(&queue) else {
                return no_response();
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn delete_task(&self, _id: TaskId) -> impl Future<Output = Result<()>> + Send {
        let queue = Arc::clone(&self.deleted_tasks);
        async move { pop(&queue).unwrap_or_else(no_response) }
    }

    fn create_comment(&self, comment: NewComment) -> impl Future<Output = Result<Comment>> + Send {
        let queue = Arc::clone(&self.created_comments);
        let calls = Arc::clone(&self.comment_calls);

        async move {
            calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(comment);
            pop(&queue).unwrap_or_else(no_response)
        }
    }
}
