//! Insertion-ordered slide storage keyed by opaque identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::Slide;

/// Opaque, stable identifier of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(Uuid);

impl SlideId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlideId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SlideId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Slides in presentation order.
///
/// Slide numbers are 1-based positions in this order. Removing a slide
/// renumbers the ones after it; identifiers never change.
#[derive(Debug, Clone, Default)]
pub struct SlideRegistry {
    entries: Vec<(SlideId, Slide)>,
}

impl SlideRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a slide under a new identifier.
    pub fn insert(&mut self, slide: Slide) -> SlideId {
        let id = SlideId::new();
        self.entries.push((id, slide));
        id
    }

    /// Slide with the given identifier.
    #[must_use]
    pub fn get(&self, id: SlideId) -> Option<&Slide> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, slide)| slide)
    }

    /// Mutable slide with the given identifier.
    pub fn get_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, slide)| slide)
    }

    /// Removes a slide, returning it if it existed.
    pub fn remove(&mut self, id: SlideId) -> Option<Slide> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Identifiers in presentation order.
    #[must_use]
    pub fn ids(&self) -> Vec<SlideId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Slide at 1-based position `number`.
    #[must_use]
    pub fn by_number(&self, number: i64) -> Option<&Slide> {
        self.index_of(number).map(|i| &self.entries[i].1)
    }

    /// Mutable slide at 1-based position `number`.
    pub fn by_number_mut(&mut self, number: i64) -> Option<&mut Slide> {
        self.index_of(number).map(move |i| &mut self.entries[i].1)
    }

    fn index_of(&self, number: i64) -> Option<usize> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        (index < self.entries.len()).then_some(index)
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        self.entries.iter().map(|(_, slide)| slide)
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every slide.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlideLayout;

    #[test]
    fn test_numbers_follow_insertion_order() {
        let mut registry = SlideRegistry::new();
        let a = registry.insert(Slide::new(SlideLayout::TitleOnly));
        let b = registry.insert(Slide::new(SlideLayout::Blank));
        assert_eq!(registry.ids(), vec![a, b]);
        assert_eq!(registry.by_number(2).map(|s| s.layout), Some(SlideLayout::Blank));
        assert!(registry.by_number(0).is_none());
        assert!(registry.by_number(3).is_none());
        assert!(registry.by_number(-1).is_none());
    }

    #[test]
    fn test_remove_renumbers_remaining() {
        let mut registry = SlideRegistry::new();
        let a = registry.insert(Slide::new(SlideLayout::TitleOnly));
        let b = registry.insert(Slide::new(SlideLayout::Blank));
        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.ids(), vec![b]);
        assert_eq!(registry.by_number(1).map(|s| s.layout), Some(SlideLayout::Blank));
        assert!(registry.get(a).is_none());
    }

    #[test]
    fn test_slide_id_parses_display_form() {
        let id = SlideId::new();
        assert_eq!(id.to_string().parse::<SlideId>().unwrap(), id);
        assert!("not-a-uuid".parse::<SlideId>().is_err());
    }
}
