//! Outcomes of asking a client to resume a session.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Session;
use crate::client::{ClientHandle, ClientId};
use crate::error::ResumeError;

/// A resume request running in the background.
///
/// Dropping this leaves the request running unobserved. Awaiting
/// [`PendingResume::outcome`] reports how it settled; either way the
/// manager's login state is not rolled back.
#[derive(Debug)]
#[must_use = "drop explicitly to ignore the resume outcome"]
pub struct PendingResume {
    client_id: ClientId,
    task: JoinHandle<Result<(), ResumeError>>,
}

impl PendingResume {
    pub(crate) fn spawn(runtime: &Handle, handle: &ClientHandle, session: Session) -> Self {
        let client = Arc::clone(handle.client());
        let client_id = handle.id();

        let task = runtime.spawn(async move {
            let result = client.resume_session(&session).await;
            log_outcome(client_id, &result);
            result
        });

        Self { client_id, task }
    }

    /// ID of the client handle the request was issued on.
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Wait for the request to settle.
    pub async fn outcome(self) -> Result<(), ResumeError> {
        match self.task.await {
            Ok(result) => result,
            Err(_) => Err(ResumeError::Aborted),
        }
    }
}

/// Result of [`SessionManager::initialize`](super::SessionManager::initialize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Nothing was persisted; the manager is logged out.
    NoSession,
    /// The persisted session was restored and the service accepted it.
    Resumed,
    /// The persisted session was restored but the service did not accept
    /// it. The manager still reports logged in.
    ResumeFailed(ResumeError),
}

impl InitOutcome {
    /// Whether the service confirmed the restored session.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, InitOutcome::Resumed)
    }
}

pub(crate) fn log_outcome(client_id: ClientId, result: &Result<(), ResumeError>) {
    match result {
        Ok(()) => debug!(client = %client_id, "session resumed"),
        Err(e) => warn!(client = %client_id, error = %e, "session resume failed"),
    }
}
