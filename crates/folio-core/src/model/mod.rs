//! Domain models for the portfolio backend's resources.

pub mod blog;
pub mod contact;
pub mod experience;
pub mod project;
pub mod skill;
pub(crate) mod timestamp;

pub use blog::{BlogPost, BlogPostDraft};
pub use contact::{ContactDraft, ContactMessage};
pub use experience::Experience;
pub use project::{Project, ProjectDraft};
pub use skill::Skill;
