//! # TaskHive API
//!
//! Remote REST client for the TaskHive backend.
//!
//! One shared [`ApiClient`] over a single `reqwest::Client`:
//!
//! - base address and fixed 10-second timeout from [`ApiConfig`]
//!   (externalized via the `TASKHIVE_API_URL` environment variable)
//! - JSON `Content-Type`/`Accept` defaults; multipart task submissions
//!   override the content type per request
//! - before every request the persisted credential is re-read and attached
//!   as a bearer authorization header; unauthenticated requests simply omit
//!   the header
//! - a 401 triggers one refresh-token exchange and one replay of the
//!   original request; a second 401 surfaces as unauthorized. No other
//!   automatic retry.
//!
//! The client implements the stores' provider traits
//! ([`taskhive_session::providers::AuthApi`] and
//! [`taskhive_domain::providers::TaskApi`]), translating [`ApiError`] into
//! their error types.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

mod session_api;
mod task_api;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
