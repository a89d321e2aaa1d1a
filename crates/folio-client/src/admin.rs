//! Typed admin API surface.
//!
//! Every endpoint here requires the bearer header; calling one with an
//! expired or missing token produces an authorization failure, which the
//! transport reports to the session manager.

use folio_core::error::Result;
use folio_core::model::{BlogPost, BlogPostDraft, ContactMessage, Project, ProjectDraft};

use crate::api::Ack;
use crate::http::Transport;

/// The authenticated CRUD endpoints under `/api/admin`.
#[derive(Clone)]
pub struct AdminApi {
    transport: Transport,
}

impl AdminApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists all projects, including unfeatured ones.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.transport.get_json("/api/admin/projects").await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<String> {
        let ack: Ack = self.transport.post_json("/api/admin/projects", draft).await?;
        Ok(ack.message)
    }

    pub async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<String> {
        let path = format!("/api/admin/projects/{}", id);
        let ack: Ack = self.transport.put_json(&path, draft).await?;
        Ok(ack.message)
    }

    pub async fn delete_project(&self, id: &str) -> Result<String> {
        let path = format!("/api/admin/projects/{}", id);
        let ack: Ack = self.transport.delete_json(&path).await?;
        Ok(ack.message)
    }

    /// Lists all blog posts, drafts included.
    pub async fn blog_posts(&self) -> Result<Vec<BlogPost>> {
        self.transport.get_json("/api/admin/blog").await
    }

    pub async fn create_post(&self, draft: &BlogPostDraft) -> Result<String> {
        let ack: Ack = self.transport.post_json("/api/admin/blog", draft).await?;
        Ok(ack.message)
    }

    pub async fn update_post(&self, id: &str, draft: &BlogPostDraft) -> Result<String> {
        let path = format!("/api/admin/blog/{}", id);
        let ack: Ack = self.transport.put_json(&path, draft).await?;
        Ok(ack.message)
    }

    pub async fn delete_post(&self, id: &str) -> Result<String> {
        let path = format!("/api/admin/blog/{}", id);
        let ack: Ack = self.transport.delete_json(&path).await?;
        Ok(ack.message)
    }

    /// Fetches the contact-form inbox.
    pub async fn contacts(&self) -> Result<Vec<ContactMessage>> {
        self.transport.get_json("/api/admin/contacts").await
    }
}
