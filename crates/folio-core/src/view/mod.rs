//! Filtered collection view.
//!
//! A [`CollectionView`] owns a fetched list of items and derives the
//! visible subset from two independent predicates (free-text search and
//! tag selection). The computation is pure; it has no I/O and no hidden
//! state.

pub mod filter;

pub use filter::{CollectionView, ItemFilter, ALL_TAG};

/// What the filtered view needs to know about an item.
///
/// Projects expose their description and technology list here; blog
/// posts their excerpt and tags.
pub trait Card {
    /// Display title, searched as a case-insensitive substring.
    fn title(&self) -> &str;

    /// Short descriptive text (description or excerpt), also searched.
    fn summary(&self) -> &str;

    /// Tag list used for both tag filtering and search. May be empty.
    fn tags(&self) -> &[String];
}
