//! Model elements: people, software systems, containers, components, and
//! the deployment-side kinds.

use indexmap::IndexMap;

/// Handle to an element in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Person,
    SoftwareSystem,
    Container,
    Component,
    DeploymentNode,
    InfrastructureNode,
    SoftwareSystemInstance,
    ContainerInstance,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::SoftwareSystem => "software system",
            Self::Container => "container",
            Self::Component => "component",
            Self::DeploymentNode => "deployment node",
            Self::InfrastructureNode => "infrastructure node",
            Self::SoftwareSystemInstance => "software system instance",
            Self::ContainerInstance => "container instance",
        }
    }

    /// Tags every element of this kind carries from birth.
    pub(crate) fn default_tags(self) -> &'static [&'static str] {
        match self {
            Self::Person => &["Element", "Person"],
            Self::SoftwareSystem => &["Element", "Software System"],
            Self::Container => &["Element", "Container"],
            Self::Component => &["Element", "Component"],
            Self::DeploymentNode => &["Element", "Deployment Node"],
            Self::InfrastructureNode => &["Element", "Infrastructure Node"],
            Self::SoftwareSystemInstance => &["Software System Instance"],
            Self::ContainerInstance => &["Container Instance"],
        }
    }
}

/// One node in the architecture model.
///
/// All kinds share a single struct; kind-specific data lives in the
/// optional fields (`environment`, `instance_of`, ...). The arena owns
/// every element, and `parent` links express the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub name: String,
    pub description: Option<String>,
    pub technology: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
    /// Group the element was declared in, if any.
    pub group: Option<String>,
    pub parent: Option<ElementId>,
    /// Deployment environment (deployment-side kinds only).
    pub environment: Option<String>,
    /// Number of instances a deployment node represents.
    pub instances: Option<u32>,
    /// The modelled element an instance deploys (instance kinds only).
    pub instance_of: Option<ElementId>,
    /// 1-based ordinal among instances of the same element in the same
    /// environment (instance kinds only).
    pub instance_id: Option<u32>,
    pub properties: IndexMap<String, String>,
    pub perspectives: IndexMap<String, String>,
}

impl Element {
    pub(crate) fn new(id: ElementId, kind: ElementKind, name: String) -> Self {
        Self {
            id,
            kind,
            name,
            description: None,
            technology: None,
            tags: kind.default_tags().iter().map(|t| t.to_string()).collect(),
            url: None,
            group: None,
            parent: None,
            environment: None,
            instances: None,
            instance_of: None,
            instance_id: None,
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

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tags() {
        let element = Element::new(ElementId(0), ElementKind::Person, "User".into());
        assert_eq!(element.tags, vec!["Element", "Person"]);
    }

    #[test]
    fn test_add_tags_deduplicates() {
        let mut element = Element::new(ElementId(0), ElementKind::Container, "API".into());
        element.add_tags("Database, Database, , Critical");
        assert_eq!(
            element.tags,
            vec!["Element", "Container", "Database", "Critical"]
        );
    }
}
