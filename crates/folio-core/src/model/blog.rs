//! Blog post models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::view::Card;

/// A blog post as served by the backend. The public listing endpoint
/// only returns published posts; drafts are visible through the admin
/// surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: String,

    pub title: String,

    /// Full post body.
    pub content: String,

    /// Short teaser shown in list views; the searchable summary.
    pub excerpt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub published: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "crate::model::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Card for BlogPost {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.excerpt
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Outgoing payload for creating or updating a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlogPostDraft {
    pub title: String,

    pub content: String,

    pub excerpt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tags_deserialize_as_empty() {
        let json = r#"{
            "id": "b1",
            "title": "Untagged thoughts",
            "content": "...",
            "excerpt": "short"
        }"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert!(post.tags.is_empty());
        assert!(!post.published);
    }
}
