//! # TaskHive Session
//!
//! The session store: holds the authenticated identity and credential pair,
//! and exposes login, signup, logout, restore-on-boot and expiry checking.
//!
//! # Architecture
//!
//! The session store is a reducer over [`SessionState`] driven by
//! [`SessionAction`]s. External dependencies are injected through the
//! [`SessionEnvironment`]:
//!
//! - [`providers::AuthApi`] - the backend authentication endpoints
//! - [`providers::CredentialStore`] - durable storage for the token pair
//!   (the browser-localStorage analogue; see [`stores::FsCredentialStore`])
//!
//! The invariant maintained throughout: `identity` is `Some` iff a non-expired
//! credential is held. Both are set and cleared together by the reducer.
//!
//! Token expiry is re-checked in the background by an [`expiry::ExpiryWatcher`]
//! that periodically sends [`SessionAction::CheckExpiry`] into the store.

pub mod actions;
pub mod environment;
pub mod error;
pub mod expiry;
pub mod providers;
pub mod reducer;
pub mod state;
pub mod stores;
pub mod token;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use actions::SessionAction;
pub use environment::SessionEnvironment;
pub use error::{Result, SessionError};
pub use expiry::ExpiryWatcher;
pub use reducer::SessionReducer;
pub use state::{Identity, Role, SessionState, TokenPair, UserId};
pub use token::is_expired;
