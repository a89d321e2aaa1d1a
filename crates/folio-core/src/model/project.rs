//! Project models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::view::Card;

/// A portfolio project as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,

    pub title: String,

    pub description: String,

    /// Technologies used, in display order. Doubles as the tag list
    /// for filtering.
    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,

    /// Whether the project is highlighted on the landing view.
    #[serde(default)]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "crate::model::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Returns the featured subset in backing order.
    pub fn featured(projects: &[Project]) -> Vec<&Project> {
        projects.iter().filter(|p| p.featured).collect()
    }
}

impl Card for Project {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.technologies
    }
}

/// Outgoing payload for creating or updating a project. The backend
/// assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectDraft {
    pub title: String,

    pub description: String,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let json = r#"{
            "id": "p1",
            "title": "E-Commerce Platform",
            "description": "A storefront"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.technologies.is_empty());
        assert!(!project.featured);
        assert!(project.github_url.is_none());
        assert!(project.created_at.is_none());
    }

    #[test]
    fn test_fetched_list_accepts_backend_timestamp_shapes() {
        use chrono::TimeZone;

        // A naive utcnow() datetime and a seeded bare date in one list;
        // either row would previously have failed the whole fetch.
        let json = r#"[
            {"id": "p1", "title": "E-Commerce Platform", "description": "A storefront",
             "created_at": "2023-12-01T04:16:32"},
            {"id": "p2", "title": "Weather Dashboard", "description": "Forecasts",
             "created_at": "2023-11-15"}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        assert_eq!(
            projects[0].created_at,
            Some(Utc.with_ymd_and_hms(2023, 12, 1, 4, 16, 32).unwrap())
        );
        assert_eq!(
            projects[1].created_at,
            Some(Utc.with_ymd_and_hms(2023, 11, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_draft_serializes_without_empty_optionals() {
        let draft = ProjectDraft {
            title: "Weather Dashboard".to_string(),
            description: "Forecasts".to_string(),
            technologies: vec!["React".to_string(), "D3.js".to_string()],
            ..ProjectDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["featured"], false);
    }
}
