//! Durable provider implementations.

pub mod fs;

pub use fs::FsCredentialStore;
