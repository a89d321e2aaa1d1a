//! Typed HTTP client for the portfolio backend.
//!
//! The crate provides:
//! - [`Transport`]: the shared HTTP layer (base URL, default bearer
//!   header, response checkpoint)
//! - [`PortfolioApi`]: the public read endpoints and the contact form
//! - [`AdminApi`]: the authenticated CRUD endpoints
//! - [`FileTokenStore`]: file-backed token persistence
//! - [`FolioClient`]: the assembled stack, wired through one transport

pub mod admin;
pub mod api;
pub mod http;
pub mod token_file;

pub use admin::AdminApi;
pub use api::{Ack, PortfolioApi};
pub use http::Transport;
pub use token_file::FileTokenStore;

use std::sync::Arc;

use folio_core::auth::SessionManager;
use folio_core::config::ClientConfig;
use folio_core::error::Result;

/// The assembled client: one transport shared by the public API, the
/// admin API, and the session manager, so the bearer header set at
/// login is attached to every subsequent admin call.
pub struct FolioClient {
    api: PortfolioApi,
    admin: AdminApi,
    session: Arc<SessionManager>,
}

impl FolioClient {
    /// Wires the client from configuration with the default token store
    /// and restores any persisted session.
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        let transport = Transport::new(config);
        let store = FileTokenStore::default_location()?;
        Self::with_parts(transport, store).await
    }

    /// Wires the client from explicit parts. Lets tests place the token
    /// store in a temporary directory.
    pub async fn with_parts(transport: Transport, store: FileTokenStore) -> Result<Self> {
        let session = Arc::new(SessionManager::new(
            Arc::new(store),
            Arc::new(transport.clone()),
        ));
        // A failed restore leaves the session unauthenticated; the rest
        // of the client (public browsing, a fresh login) stays usable.
        if let Err(e) = session.initialize().await {
            tracing::warn!("session restore failed, continuing unauthenticated: {}", e);
        }

        Ok(Self {
            api: PortfolioApi::new(transport.clone()),
            admin: AdminApi::new(transport),
            session,
        })
    }

    pub fn api(&self) -> &PortfolioApi {
        &self.api
    }

    pub fn admin(&self) -> &AdminApi {
        &self.admin
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }
}
