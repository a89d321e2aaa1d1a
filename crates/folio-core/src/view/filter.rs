//! Filter state and the derived visible subset.

use super::Card;

/// Sentinel tag meaning "no tag filter".
pub const ALL_TAG: &str = "All";

/// The two predicate inputs. Both default to "match everything".
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFilter {
    /// Case-insensitive substring matched against title, summary, and
    /// tags. Empty matches everything.
    pub search_term: String,

    /// Selected tag; [`ALL_TAG`] disables the predicate.
    pub tag: String,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            tag: ALL_TAG.to_string(),
        }
    }
}

impl ItemFilter {
    /// True when the item satisfies both predicates.
    pub fn matches<T: Card>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_tag(item)
    }

    fn matches_search<T: Card>(&self, item: &T) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        item.title().to_lowercase().contains(&term)
            || item.summary().to_lowercase().contains(&term)
            || item.tags().iter().any(|tag| tag.to_lowercase().contains(&term))
    }

    fn matches_tag<T: Card>(&self, item: &T) -> bool {
        self.tag == ALL_TAG || item.tags().iter().any(|tag| *tag == self.tag)
    }
}

/// A fetched collection plus its filter state.
///
/// The backing items are replaced wholesale by [`set_items`]; a failed
/// re-fetch simply never calls it, leaving the previous collection
/// visible.
///
/// [`set_items`]: CollectionView::set_items
#[derive(Debug, Clone)]
pub struct CollectionView<T: Card> {
    items: Vec<T>,
    filter: ItemFilter,
}

impl<T: Card> Default for CollectionView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Card> CollectionView<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filter: ItemFilter::default(),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items,
            filter: ItemFilter::default(),
        }
    }

    /// Replaces the full backing collection. The filter state is kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.filter.tag = tag.into();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    /// The visible subset: items satisfying both predicates, in backing
    /// order. Recomputed on every call.
    pub fn visible(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(*item))
            .collect()
    }

    /// Distinct tags across the full collection, ordered by first
    /// occurrence and prefixed with the [`ALL_TAG`] sentinel.
    pub fn available_tags(&self) -> Vec<String> {
        let mut tags = vec![ALL_TAG.to_string()];
        for item in &self.items {
            for tag in item.tags() {
                if !tags.iter().any(|seen| seen == tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }
}
