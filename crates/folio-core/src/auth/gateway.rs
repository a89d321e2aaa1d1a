//! Authentication gateway trait.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;

/// The HTTP side of authentication, as the session manager sees it.
///
/// Implemented by the transport layer; decouples session policy from the
/// HTTP client so the manager can be tested against a mock.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a bearer token.
    ///
    /// # Returns
    ///
    /// - `Ok(token)`: the backend accepted the credentials
    /// - `Err(FolioError::Auth(_))`: rejected, with the backend's
    ///   human-readable message
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Attaches `Authorization: Bearer <token>` to every subsequent
    /// request.
    async fn set_bearer(&self, token: &str);

    /// Stops attaching the authorization header.
    async fn clear_bearer(&self);

    /// Subscribes to unauthorized notices. The transport sends one
    /// whenever a request that carried a bearer token comes back with an
    /// authorization-failure status.
    fn subscribe_unauthorized(&self) -> broadcast::Receiver<()>;
}
