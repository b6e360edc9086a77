//! Store-level domain flows: create, update-with-merge, and out-of-order
//! mutation resolution.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use taskhive_core::environment::SystemClock;
use taskhive_domain::mocks::MockTaskApi;
use taskhive_domain::{
    Comment, CommentId, DomainAction, DomainEnvironment, DomainReducer, DomainState, NewTask,
    Role, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, UserId, UserRef,
};
use taskhive_runtime::Store;

type TestStore = Store<DomainState, DomainAction, DomainEnvironment<MockTaskApi>, DomainReducer<MockTaskApi>>;

fn user(id: i64, name: &str, role: Role) -> UserRef {
    UserRef {
        id: UserId(id),
        username: name.to_string(),
        role: Some(role),
    }
}

fn manager() -> UserRef {
    user(1, "John Manager", Role::Manager)
}

fn developer() -> UserRef {
    user(2, "Jane Developer", Role::Developer)
}

fn task(id: i64, title: &str, status: TaskStatus) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        description: String::new(),
        status,
        priority: TaskPriority::Medium,
        assigned_to: developer(),
        created_by: manager(),
        created_at: DateTime::<Utc>::MIN_UTC,
        due_date: None,
        attachment: None,
    }
}

fn store_with(api: MockTaskApi) -> TestStore {
    let env = DomainEnvironment::new(api, Arc::new(SystemClock));
    Store::new(DomainState::new(), DomainReducer::new(), env)
}

/// Sign the manager in and load the queued snapshot.
async fn boot(store: &TestStore, api: &MockTaskApi, tasks: Vec<Task>, comments: Vec<Comment>) {
    api.queue_snapshot(tasks, comments, vec![developer()]);

    let outcome = store
        .send_and_wait_for(
            DomainAction::SetViewer {
                viewer: Some(manager()),
            },
            |a| {
                matches!(
                    a,
                    DomainAction::SnapshotLoaded { .. } | DomainAction::LoadFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(DomainAction::SnapshotLoaded { .. })));
}

#[tokio::test]
async fn created_task_appears_in_assignee_views_with_notification() {
    taskhive_testing::init_tracing();

    let api = MockTaskApi::new();
    let store = store_with(api.clone());
    boot(&store, &api, vec![], vec![]).await;

    // The backend will confirm the creation with a 201 body
    let mut confirmed = task(10, "Write docs", TaskStatus::Pending);
    confirmed.created_at = Utc::now();
    confirmed.due_date = Some(Utc::now() + chrono::Duration::days(7));
    api.queue_create_task(Ok(confirmed));

    let outcome = store
        .send_and_wait_for(
            DomainAction::CreateTask {
                input: NewTask {
                    title: "Write docs".to_string(),
                    description: String::new(),
                    status: TaskStatus::Pending,
                    priority: TaskPriority::Medium,
                    assigned_to: Some(developer()),
                    due_date: Some(Utc::now() + chrono::Duration::days(7)),
                    attachment: None,
                },
            },
            |a| {
                matches!(
                    a,
                    DomainAction::TaskCreated { .. } | DomainAction::CreateTaskFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(DomainAction::TaskCreated { .. })));

    store
        .state(|state| {
            // The task shows up in the assignee's task view
            let developer_tasks = state.tasks_for_user(UserId(2));
            assert_eq!(developer_tasks.len(), 1);
            assert_eq!(developer_tasks[0].title, "Write docs");

            // ... and the assignee was notified
            let notifications = state.notifications_for_user(UserId(2));
            assert_eq!(notifications.len(), 1);
            assert!(notifications[0].text.contains("Write docs"));
        })
        .await;
}

#[tokio::test]
async fn status_update_merges_and_notifies_original_assignee() {
    let api = MockTaskApi::new();
    let store = store_with(api.clone());
    boot(
        &store,
        &api,
        vec![task(1, "Implement User Authentication", TaskStatus::InProgress)],
        vec![],
    )
    .await;

    api.queue_task_mutation(Ok(task(1, "Implement User Authentication", TaskStatus::Completed)));

    let outcome = store
        .send_and_wait_for(
            DomainAction::UpdateTask {
                id: TaskId(1),
                patch: TaskPatch::status(TaskStatus::Completed),
            },
            |a| {
                matches!(
                    a,
                    DomainAction::TaskUpdateResolved { .. } | DomainAction::TaskUpdateFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(DomainAction::TaskUpdateResolved { .. })));

    store
        .state(|state| {
            // Merged without any reload
            assert_eq!(
                state.task(TaskId(1)).map(|t| t.status),
                Some(TaskStatus::Completed)
            );

            // The original assignee learned about the new status
            let notifications = state.notifications_for_user(UserId(2));
            assert_eq!(notifications.len(), 1);
            assert!(notifications[0].text.contains("completed"));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn later_initiated_update_wins_when_responses_arrive_out_of_order() {
    let api = MockTaskApi::new();
    let store = store_with(api.clone());
    boot(&store, &api, vec![task(1, "Race", TaskStatus::Pending)], vec![]).await;

    // Mutation A resolves slowly with in_progress; mutation B resolves fast
    // with completed. B's response arrives first.
    api.queue_task_mutation_delayed(
        Ok(task(1, "Race", TaskStatus::InProgress)),
        Duration::from_millis(200),
    );
    api.queue_task_mutation_delayed(
        Ok(task(1, "Race", TaskStatus::Completed)),
        Duration::from_millis(10),
    );

    let handle_a = store
        .send(DomainAction::UpdateTask {
            id: TaskId(1),
            patch: TaskPatch::status(TaskStatus::InProgress),
        })
        .await;
    assert!(handle_a.is_ok());

    let handle_b = store
        .send(DomainAction::UpdateTask {
            id: TaskId(1),
            patch: TaskPatch::status(TaskStatus::Completed),
        })
        .await;
    assert!(handle_b.is_ok());

    // Let both responses land
    for mut handle in [handle_a, handle_b].into_iter().flatten() {
        let waited = handle.wait_with_timeout(Duration::from_secs(5)).await;
        assert!(waited.is_ok());
    }

    // Final state reflects B, the later-initiated mutation, even though A's
    // response arrived last.
    store
        .state(|state| {
            assert_eq!(
                state.task(TaskId(1)).map(|t| t.status),
                Some(TaskStatus::Completed)
            );
        })
        .await;
}

#[tokio::test]
async fn comment_flow_posts_resolved_mentions() {
    let api = MockTaskApi::new();
    let store = store_with(api.clone());
    boot(
        &store,
        &api,
        vec![task(1, "Implement User Authentication", TaskStatus::InProgress)],
        vec![],
    )
    .await;

    let confirmed = Comment {
        id: CommentId(50),
        task: TaskId(1),
        author: manager(),
        content: "Great! @Jane Developer can you check?".to_string(),
        created_at: Utc::now(),
    };
    api.queue_create_comment(Ok(confirmed));

    let outcome = store
        .send_and_wait_for(
            DomainAction::AddComment {
                task_id: TaskId(1),
                content: "Great! @Jane Developer can you check?".to_string(),
            },
            |a| {
                matches!(
                    a,
                    DomainAction::CommentAdded { .. } | DomainAction::AddCommentFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(DomainAction::CommentAdded { .. })));

    // The wire payload carried the resolved mention
    let calls = api.comment_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].mentions, vec![UserId(2)]);
    assert_eq!(calls[0].author, UserId(1));

    store
        .state(|state| {
            assert_eq!(state.comments_for_task(TaskId(1)).len(), 1);
            // Jane (assignee) was notified of the mention
            let notifications = state.notifications_for_user(UserId(2));
            assert_eq!(notifications.len(), 1);
            assert!(notifications[0].text.contains("mentioned you"));
        })
        .await;
}

#[tokio::test]
async fn failed_initial_load_degrades_to_offline_data() {
    let api = MockTaskApi::new();
    let store = store_with(api.clone());

    // Nothing queued: every fetch fails
    let outcome = store
        .send_and_wait_for(
            DomainAction::SetViewer {
                viewer: Some(developer()),
            },
            |a| {
                matches!(
                    a,
                    DomainAction::SnapshotLoaded { .. } | DomainAction::LoadFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(DomainAction::LoadFailed { .. })));

    store
        .state(|state| {
            assert_eq!(state.source, taskhive_domain::DataSource::Fallback);
            assert!(!state.tasks.is_empty());
            assert!(state.last_notice.is_some());
            // The store remains usable: derived views still answer
            let stats = state.stats();
            assert_eq!(stats.total, state.tasks.len());
        })
        .await;
}

#[tokio::test]
async fn delete_flow_cascades_comments() {
    let api = MockTaskApi::new();
    let store = store_with(api.clone());
    boot(
        &store,
        &api,
        vec![
            task(1, "Implement User Authentication", TaskStatus::InProgress),
            task(2, "Test Login Functionality", TaskStatus::Pending),
        ],
        vec![
            Comment {
                id: CommentId(1),
                task: TaskId(1),
                author: developer(),
                content: "on it".to_string(),
                created_at: Utc::now(),
            },
            Comment {
                id: CommentId(2),
                task: TaskId(2),
                author: manager(),
                content: "status?".to_string(),
                created_at: Utc::now(),
            },
        ],
    )
    .await;

    api.queue_delete_task(Ok(()));

    let outcome = store
        .send_and_wait_for(
            DomainAction::DeleteTask { id: TaskId(1) },
            |a| {
                matches!(
                    a,
                    DomainAction::TaskDeleted { .. } | DomainAction::DeleteTaskFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(DomainAction::TaskDeleted { .. })));

    store
        .state(|state| {
            assert!(!state.task_exists(TaskId(1)));
            assert!(state.comments_for_task(TaskId(1)).is_empty());
            assert_eq!(state.comments_for_task(TaskId(2)).len(), 1);
        })
        .await;
}
