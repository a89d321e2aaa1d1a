//! Contact form draft and client-side validation.
//!
//! Validation runs before any network call; a draft that fails here is
//! never sent.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap()
});

/// A stored contact-form submission, as served by the admin inbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub id: String,

    pub name: String,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "crate::model::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outgoing contact-form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,

    pub email: String,

    /// Optional subject line; the backend substitutes a default when
    /// absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    pub message: String,
}

impl ContactDraft {
    /// Validates the draft. Returns a single [`FolioError::Validation`]
    /// when one field fails, or [`FolioError::Multiple`] collecting all
    /// failures so every problem can be shown at once.
    pub fn validate(&self) -> Result<()> {
        let mut failures = Vec::new();

        if self.name.trim().is_empty() {
            failures.push(FolioError::validation("name", "Name is required"));
        }

        // The anchored pattern runs against the raw value, so padded
        // input fails inline instead of at the backend.
        if self.email.trim().is_empty() {
            failures.push(FolioError::validation("email", "Email is required"));
        } else if !EMAIL_RE.is_match(&self.email) {
            failures.push(FolioError::validation("email", "Invalid email address"));
        }

        if self.message.trim().is_empty() {
            failures.push(FolioError::validation("message", "Message is required"));
        }

        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(FolioError::Multiple(failures)),
        }
    }
}
