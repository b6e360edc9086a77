//! [`TaskApi`] implementation for the remote client.

use std::future::Future;

use taskhive_domain::error::Result;
use taskhive_domain::providers::TaskApi;
use taskhive_domain::{Comment, NewComment, NewTask, Task, TaskId, TaskStatus, UserRef};
use taskhive_session::providers::CredentialStore;

use crate::client::ApiClient;
use crate::types::{CommentBody, StatusBody};

impl<C> TaskApi for ApiClient<C>
where
    C: CredentialStore + Clone,
{
    fn fetch_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send {
        let client = self.clone();

        async move {
            let url = client.url("/tasks/");
            let response = client.send_authorized(|http| http.get(&url)).await?;
            let tasks = Self::expect_json(response).await?;
            Ok(tasks)
        }
    }

    fn fetch_comments(&self) -> impl Future<Output = Result<Vec<Comment>>> + Send {
        let client = self.clone();

        async move {
            let url = client.url("/comments/");
            let response = client.send_authorized(|http| http.get(&url)).await?;
            let comments = Self::expect_json(response).await?;
            Ok(comments)
        }
    }

    fn fetch_assignable_users(&self) -> impl Future<Output = Result<Vec<UserRef>>> + Send {
        let client = self.clone();

        async move {
            let url = client.url("/users/developers-testers/");
            let response = client.send_authorized(|http| http.get(&url)).await?;
            let users = Self::expect_json(response).await?;
            Ok(users)
        }
    }

    fn create_task(&self, input: NewTask) -> impl Future<Output = Result<Task>> + Send {
        let client = self.clone();

        async move {
            let url = client.url("/tasks/");
            let response = client
                .send_authorized(|http| http.post(&url).multipart(Self::creation_form(&input)))
                .await?;
            let task = Self::expect_json(response).await?;
            Ok(task)
        }
    }

    fn update_task(&self, id: TaskId, task: Task) -> impl Future<Output = Result<Task>> + Send {
        let client = self.clone();

        async move {
            let url = client.url(&format!("/tasks/{id}/"));
            let response = client
                .send_authorized(|http| http.put(&url).multipart(Self::replacement_form(&task)))
                .await?;
            let task = Self::expect_json(response).await?;
            Ok(task)
        }
    }

    fn set_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> impl Future<Output = Result<Task>> + Send {
        let client = self.clone();

        async move {
            let url = client.url(&format!("/tasks/{id}/"));
            let response = client
                .send_authorized(|http| http.patch(&url).json(&StatusBody { status }))
                .await?;
            let task = Self::expect_json(response).await?;
            Ok(task)
        }
    }

    fn delete_task(&self, id: TaskId) -> impl Future<Output = Result<()>> + Send {
        let client = self.clone();

        async move {
            let url = client.url(&format!("/tasks/{id}/"));
            let response = client.send_authorized(|http| http.delete(&url)).await?;
            Self::expect_success(response).await?;
            Ok(())
        }
    }

    fn create_comment(&self, comment: NewComment) -> impl Future<Output = Result<Comment>> + Send {
        let client = self.clone();
        let body = CommentBody {
            task: comment.task,
            author: comment.author,
            content: comment.content,
            mentions: comment.mentions,
        };

        async move {
            let url = client.url("/comments/");
            let response = client
                .send_authorized(|http| http.post(&url).json(&body))
                .await?;
            let comment = Self::expect_json(response).await?;
            Ok(comment)
        }
    }
}
