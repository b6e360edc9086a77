//! # TaskHive Domain
//!
//! The domain store: the single source of truth for tasks, comments and
//! notifications, synchronized with the backend, with derived views and
//! mutation helpers.
//!
//! # Architecture
//!
//! The domain store is a reducer over [`DomainState`] driven by
//! [`DomainAction`]s. The backend is reached through the
//! [`providers::TaskApi`] trait (the remote client in production, a mock in
//! tests), injected via [`DomainEnvironment`].
//!
//! # Consistency
//!
//! - Server-confirmed results are merged into local state immediately; no
//!   full reload on success.
//! - Task mutations are sequence-tagged; responses overtaken by a newer
//!   mutation for the same task are discarded (see [`reducer`]).
//! - When the backend is unreachable at initial load, a clearly labeled
//!   offline demo dataset is installed instead of crashing on an empty store
//!   (see [`fallback`]).

pub mod actions;
pub mod environment;
pub mod error;
pub mod fallback;
pub mod mention;
pub mod providers;
pub mod reducer;
pub mod state;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use actions::DomainAction;
pub use environment::DomainEnvironment;
pub use error::{DomainError, Result};
pub use reducer::DomainReducer;
pub use state::{DataSource, DomainState, TaskStats};
pub use types::{
    AttachmentUpload, Comment, CommentId, NewComment, NewTask, Notification, NotificationId, Role,
    Task, TaskId, TaskPatch, TaskPriority, TaskStatus, UserId, UserRef,
};
