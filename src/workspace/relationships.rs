//! Relationships between model elements.

use indexmap::IndexMap;

use super::elements::ElementId;

/// Handle to a relationship in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationshipId(pub(crate) u32);

impl RelationshipId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A directed relationship between two elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: RelationshipId,
    pub source: ElementId,
    pub destination: ElementId,
    pub description: Option<String>,
    pub technology: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub properties: IndexMap<String, String>,
    pub perspectives: IndexMap<String, String>,
}

impl Relationship {
    pub(crate) fn new(id: RelationshipId, source: ElementId, destination: ElementId) -> Self {
        Self {
            id,
            source,
            destination,
            description: None,
            technology: None,
            tags: vec!["Relationship".to_string()],
            url: None,
            properties: IndexMap::new(),
            perspectives: IndexMap::new(),
        }
    }

    /// Append comma-separated tags, skipping blanks and duplicates.
    pub fn add_tags(&mut self, tags: &str) {
        for tag in tags.split(',') {
            let tag = tag.trim();
            if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
                self.tags.push(tag.to_string());
            }
        }
    }
}
