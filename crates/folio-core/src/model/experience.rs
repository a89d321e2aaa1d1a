//! Work experience model.

use serde::{Deserialize, Serialize};

/// A role in the work history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub id: String,

    pub company: String,

    pub position: String,

    pub description: String,

    /// Start of the role as "YYYY-MM" (lexicographic order is
    /// chronological order).
    pub start_date: String,

    /// `None` while the role is current.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Experience {
    /// Whether this is the currently held role.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }

    /// Sorts the history newest-first by start date.
    pub fn sort_newest_first(items: &mut [Experience]) {
        items.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str, start: &str, end: Option<&str>) -> Experience {
        Experience {
            id: id.to_string(),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            description: "Built things".to_string(),
            start_date: start.to_string(),
            end_date: end.map(|s| s.to_string()),
            technologies: Vec::new(),
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut history = vec![
            role("a", "2019-06", Some("2021-01")),
            role("b", "2023-02", None),
            role("c", "2021-01", Some("2023-02")),
        ];
        Experience::sort_newest_first(&mut history);
        let ids: Vec<&str> = history.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(history[0].is_current());
    }
}
