//! Network client collaborator.
//!
//! The manager never talks to the service itself. It asks a
//! [`ClientFactory`] for a fresh [`SessionClient`] on every transition and
//! wraps it in a [`ClientHandle`] so the instance can be told apart from
//! the one it replaced.

mod id;
mod xrpc;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

pub use id::ClientId;
pub use xrpc::{XrpcClient, XrpcClientFactory};

use crate::error::ResumeError;
use crate::session::Session;

/// Default AT Protocol service endpoint.
pub const DEFAULT_SERVICE: &str = "https://bsky.social";

/// A client bound to one service endpoint that can resume a session.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Endpoint this client talks to.
    fn service(&self) -> &str;

    /// Ask the service to accept `session` for subsequent requests.
    async fn resume_session(&self, session: &Session) -> Result<(), ResumeError>;
}

/// Builds fresh, unauthenticated clients.
pub trait ClientFactory: Send + Sync {
    fn create(&self, service: &str) -> Arc<dyn SessionClient>;
}

impl<F> ClientFactory for F
where
    F: Fn(&str) -> Arc<dyn SessionClient> + Send + Sync,
{
    fn create(&self, service: &str) -> Arc<dyn SessionClient> {
        self(service)
    }
}

/// One client instance paired with its identity.
#[derive(Clone)]
pub struct ClientHandle {
    id: ClientId,
    client: Arc<dyn SessionClient>,
}

impl ClientHandle {
    /// Create a new handle from the factory.
    pub fn create(factory: &dyn ClientFactory, service: &str) -> Self {
        Self {
            id: ClientId::next(),
            client: factory.create(service),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn service(&self) -> &str {
        self.client.service()
    }

    pub fn client(&self) -> &Arc<dyn SessionClient> {
        &self.client
    }

    /// Whether both handles refer to the same client instance.
    pub fn same_instance(&self, other: &ClientHandle) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.client, &other.client)
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("id", &self.id)
            .field("service", &self.client.service())
            .finish()
    }
}
