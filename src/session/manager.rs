//! The login session holder.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::resume::log_outcome;
use super::{AuthState, InitOutcome, PendingResume, Session};
use crate::client::{ClientFactory, ClientHandle};
use crate::error::SessionError;
use crate::storage::{KeyValueStore, SESSION_KEY};
use crate::Result;

/// Holds the current session and the client paired with it.
///
/// Construct one per process at the composition root and pass it by
/// reference. Every transition builds a new client handle; the previous
/// handle is never reused once the session changes.
pub struct SessionManager {
    session: Option<Session>,
    client: ClientHandle,
    storage: Box<dyn KeyValueStore>,
    factory: Box<dyn ClientFactory>,
    service: String,
    key: String,
}

impl SessionManager {
    /// Create a logged-out manager for `service`.
    pub fn new(
        storage: impl KeyValueStore + 'static,
        factory: impl ClientFactory + 'static,
        service: impl Into<String>,
    ) -> Self {
        let service = service.into();
        let client = ClientHandle::create(&factory, &service);

        Self {
            session: None,
            client,
            storage: Box::new(storage),
            factory: Box::new(factory),
            service,
            key: SESSION_KEY.to_string(),
        }
    }

    /// Store the session under `key` instead of the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> AuthState {
        AuthState::of(self.session.as_ref())
    }

    /// The client paired with the current session.
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Log in with freshly obtained session data.
    ///
    /// The session is held and persisted, a new client replaces the old
    /// one, and a resume request is started on the current Tokio runtime.
    /// The returned [`PendingResume`] may be dropped; a failed resume does
    /// not log the manager out.
    ///
    /// If persisting fails the error is returned and the manager keeps its
    /// previous session and client.
    pub fn set_session(&mut self, session: Session) -> Result<PendingResume> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let raw = session.to_json()?;

        let previous = self.session.replace(session.clone());
        if let Err(e) = self.storage.set(&self.key, &raw) {
            self.session = previous;
            return Err(e);
        }

        self.client = self.fresh_client();
        info!(client = %self.client.id(), "session set");

        Ok(PendingResume::spawn(&runtime, &self.client, session))
    }

    /// Log out.
    ///
    /// The in-memory session is cleared and the client replaced even if
    /// removing the persisted entry fails; that failure is still returned.
    pub fn clear_session(&mut self) -> Result<()> {
        self.session = None;
        let removed = self.storage.remove(&self.key);
        self.client = self.fresh_client();

        match &removed {
            Ok(()) => info!(client = %self.client.id(), "session cleared"),
            Err(e) => warn!(error = %e, "session cleared in memory only"),
        }
        removed
    }

    /// Restore the persisted session at startup.
    ///
    /// A malformed entry is reported as [`SessionError::Deserialization`]
    /// and leaves the manager logged out; the entry itself is kept. A
    /// restored session stays held even if the service rejects it.
    pub async fn initialize(&mut self) -> Result<InitOutcome> {
        let stored = self.storage.get(&self.key)?;

        let Some(raw) = stored else {
            self.session = None;
            self.client = self.fresh_client();
            debug!("no persisted session");
            return Ok(InitOutcome::NoSession);
        };

        let session = match Session::from_json(&raw) {
            Ok(session) => session,
            Err(e) => {
                self.session = None;
                self.client = self.fresh_client();
                warn!(key = %self.key, error = %e, "ignoring malformed persisted session");
                return Err(e);
            }
        };

        self.session = Some(session.clone());
        self.client = self.fresh_client();
        info!(client = %self.client.id(), "persisted session restored");

        let client = Arc::clone(self.client.client());
        let result = client.resume_session(&session).await;
        log_outcome(self.client.id(), &result);

        Ok(match result {
            Ok(()) => InitOutcome::Resumed,
            Err(e) => InitOutcome::ResumeFailed(e),
        })
    }

    fn fresh_client(&self) -> ClientHandle {
        ClientHandle::create(self.factory.as_ref(), &self.service)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("client", &self.client)
            .field("key", &self.key)
            .finish()
    }
}
