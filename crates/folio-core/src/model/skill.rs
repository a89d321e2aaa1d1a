//! Skill model and category grouping.

use serde::{Deserialize, Serialize};

/// A single skill entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub id: String,

    pub name: String,

    /// Category bucket, e.g. "frontend", "backend", "tools", "languages".
    pub category: String,

    /// Proficiency on a 1-5 scale.
    pub level: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Skill {
    /// Groups skills by category, categories ordered by first occurrence
    /// and skills kept in their original order within each group.
    pub fn group_by_category(skills: &[Skill]) -> Vec<(String, Vec<Skill>)> {
        let mut groups: Vec<(String, Vec<Skill>)> = Vec::new();
        for skill in skills {
            match groups.iter_mut().find(|(name, _)| *name == skill.category) {
                Some((_, members)) => members.push(skill.clone()),
                None => groups.push((skill.category.clone(), vec![skill.clone()])),
            }
        }
        groups
    }
}
