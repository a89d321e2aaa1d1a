//! Token persistence trait.

use async_trait::async_trait;

use crate::error::Result;

/// Persistent storage for the single session token.
///
/// Presence of a stored token is the sole session-continuity mechanism
/// across restarts.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the persisted token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))`: a token is stored
    /// - `Ok(None)`: nothing stored
    /// - `Err(_)`: storage access failed
    async fn load(&self) -> Result<Option<String>>;

    /// Persists the token, replacing any previous one.
    async fn save(&self, token: &str) -> Result<()>;

    /// Removes the persisted token. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
