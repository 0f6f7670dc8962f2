//! Session management module.
//!
//! This module holds the persisted login record, the derived login state
//! and the [`SessionManager`] that moves between them.

mod data;
mod manager;
mod resume;
mod state;

pub use data::Session;
pub use manager::SessionManager;
pub use resume::{InitOutcome, PendingResume};
pub use state::AuthState;
