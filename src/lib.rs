//! # bsky-session
//!
//! Persisted login session manager for AT Protocol clients.
//!
//! A [`SessionManager`] holds the current [`Session`] together with the
//! network client paired with it, persists the session to a
//! [`KeyValueStore`], and restores it on the next start.
//!
//! ## Features
//!
//! - **Three transitions**: log in, log out, restore at startup
//! - **Replace, don't mutate**: every transition builds a fresh client
//! - **Observable resume**: the background resume request can be awaited or
//!   ignored, and never rolls back the login state
//! - **Pluggable persistence**: in-memory or one-file-per-key on disk
//!
//! ## Quick Start
//!
//! ```no_run
//! use bsky_session::{FileStorage, SessionManager, XrpcClientFactory, DEFAULT_SERVICE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     bsky_session::logging::try_init().ok();
//!
//!     let storage = FileStorage::open("/tmp/bsky-session")?;
//!     let mut manager = SessionManager::new(storage, XrpcClientFactory::new()?, DEFAULT_SERVICE);
//!
//!     let outcome = manager.initialize().await?;
//!     println!("logged in: {} ({:?})", manager.is_logged_in(), outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use client::{
    ClientFactory, ClientHandle, ClientId, SessionClient, XrpcClient, XrpcClientFactory,
    DEFAULT_SERVICE,
};
pub use error::{ResumeError, Result, SessionError};
pub use session::{AuthState, InitOutcome, PendingResume, Session, SessionManager};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, SESSION_KEY};
