//! HTTP client for the AT Protocol XRPC session endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{ClientFactory, SessionClient};
use crate::error::ResumeError;
use crate::session::Session;

const GET_SESSION: &str = "com.atproto.server.getSession";

/// Error body returned by XRPC endpoints.
#[derive(Debug, Default, Deserialize)]
struct XrpcErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Client for one XRPC service endpoint.
#[derive(Debug, Clone)]
pub struct XrpcClient {
    service: String,
    http: reqwest::Client,
}

impl XrpcClient {
    /// Create a client sharing the given connection pool.
    pub fn new(service: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            service: service.into(),
            http,
        }
    }

    /// Full URL of an XRPC method on this service.
    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.service.trim_end_matches('/'), method)
    }
}

#[async_trait]
impl SessionClient for XrpcClient {
    fn service(&self) -> &str {
        &self.service
    }

    async fn resume_session(&self, session: &Session) -> Result<(), ResumeError> {
        let url = self.endpoint(GET_SESSION);
        debug!(%url, "resuming session");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&session.access_jwt)
            .send()
            .await
            .map_err(|e| ResumeError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.json::<XrpcErrorBody>().await.unwrap_or_default();
        Err(ResumeError::Rejected {
            status: status.as_u16(),
            error: body.error,
            message: body.message,
        })
    }
}

/// Hands out [`XrpcClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct XrpcClientFactory {
    http: reqwest::Client,
}

impl XrpcClientFactory {
    /// Build the factory and its underlying HTTP client.
    pub fn new() -> Result<Self, ResumeError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bsky-session/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResumeError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Use an existing HTTP client.
    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl ClientFactory for XrpcClientFactory {
    fn create(&self, service: &str) -> Arc<dyn SessionClient> {
        Arc::new(XrpcClient::new(service, self.http.clone()))
    }
}
