//! Typed public API surface.

use serde::Deserialize;

use folio_core::error::Result;
use folio_core::model::{BlogPost, ContactDraft, Experience, Project, Skill};

use crate::http::Transport;

/// Acknowledgement body returned by mutating endpoints.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub message: String,
}

/// The public, unauthenticated endpoints.
#[derive(Clone)]
pub struct PortfolioApi {
    transport: Transport,
}

impl PortfolioApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetches all projects.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.transport.get_json("/api/projects").await
    }

    /// Fetches published blog posts. The backend filters out drafts.
    pub async fn blog_posts(&self) -> Result<Vec<BlogPost>> {
        self.transport.get_json("/api/blog").await
    }

    pub async fn skills(&self) -> Result<Vec<Skill>> {
        self.transport.get_json("/api/skills").await
    }

    pub async fn experience(&self) -> Result<Vec<Experience>> {
        self.transport.get_json("/api/experience").await
    }

    /// Validates and submits a contact-form draft, returning the
    /// backend's acknowledgement message.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call when the draft
    /// is incomplete or the email address is malformed.
    pub async fn submit_contact(&self, draft: &ContactDraft) -> Result<String> {
        draft.validate()?;
        let ack: Ack = self.transport.post_json("/api/contact", draft).await?;
        Ok(ack.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::config::ClientConfig;

    #[tokio::test]
    async fn test_invalid_contact_draft_never_reaches_the_network() {
        // Unroutable base URL: a network attempt would fail with a
        // transport error, not a validation error.
        let transport = Transport::new(&ClientConfig::with_base_url("http://127.0.0.1:1"));
        let api = PortfolioApi::new(transport);

        let err = api
            .submit_contact(&ContactDraft::default())
            .await
            .unwrap_err();

        assert!(err.is_validation());
    }
}
