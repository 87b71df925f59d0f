//! The model arena: single source of truth for elements and relationships.

use super::elements::{Element, ElementId, ElementKind};
use super::error::ModelError;
use super::relationships::{Relationship, RelationshipId};

/// How DSL binding identifiers are registered for elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierMode {
    /// Bindings are registered exactly as written.
    #[default]
    Flat,
    /// Bindings are prefixed with the enclosing element's binding,
    /// producing keys such as `bank.web.controller`.
    Hierarchical,
}

/// The architecture model: an arena of elements and relationships.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    elements: Vec<Element>,
    relationships: Vec<Relationship>,
    pub enterprise: Option<String>,
    /// Whether relationships between nested elements should imply
    /// relationships between their parents when rendered.
    pub implied_relationships: bool,
    pub identifier_mode: IdentifierMode,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            relationships: Vec::new(),
            enterprise: None,
            implied_relationships: true,
            identifier_mode: IdentifierMode::Flat,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    pub fn relationship(&self, id: RelationshipId) -> &Relationship {
        &self.relationships[id.index()]
    }

    pub fn relationship_mut(&mut self, id: RelationshipId) -> &mut Relationship {
        &mut self.relationships[id.index()]
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Children of `parent`, in declaration order.
    pub fn children(&self, parent: ElementId) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |e| e.parent == Some(parent))
    }

    pub fn find_element(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }

    /// First relationship from `source` to `destination`, if any.
    pub fn find_relationship(
        &self,
        source: ElementId,
        destination: ElementId,
    ) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|r| r.source == source && r.destination == destination)
    }

    // ========================================================================
    // ELEMENT CREATION
    // ========================================================================

    pub fn add_person(
        &mut self,
        name: String,
        description: Option<String>,
    ) -> Result<ElementId, ModelError> {
        self.check_top_level_name(&name)?;
        let id = self.push_element(ElementKind::Person, name);
        self.elements[id.index()].description = description;
        Ok(id)
    }

    pub fn add_software_system(
        &mut self,
        name: String,
        description: Option<String>,
    ) -> Result<ElementId, ModelError> {
        self.check_top_level_name(&name)?;
        let id = self.push_element(ElementKind::SoftwareSystem, name);
        self.elements[id.index()].description = description;
        Ok(id)
    }

    pub fn add_container(
        &mut self,
        parent: ElementId,
        name: String,
        description: Option<String>,
        technology: Option<String>,
    ) -> Result<ElementId, ModelError> {
        self.check_child_name(parent, ElementKind::Container, &name)?;
        let id = self.push_element(ElementKind::Container, name);
        let element = &mut self.elements[id.index()];
        element.parent = Some(parent);
        element.description = description;
        element.technology = technology;
        Ok(id)
    }

    pub fn add_component(
        &mut self,
        parent: ElementId,
        name: String,
        description: Option<String>,
        technology: Option<String>,
    ) -> Result<ElementId, ModelError> {
        self.check_child_name(parent, ElementKind::Component, &name)?;
        let id = self.push_element(ElementKind::Component, name);
        let element = &mut self.elements[id.index()];
        element.parent = Some(parent);
        element.description = description;
        element.technology = technology;
        Ok(id)
    }

    pub fn add_deployment_node(
        &mut self,
        environment: String,
        parent: Option<ElementId>,
        name: String,
        description: Option<String>,
        technology: Option<String>,
    ) -> Result<ElementId, ModelError> {
        let duplicate = self.elements.iter().any(|e| {
            e.kind == ElementKind::DeploymentNode
                && e.parent == parent
                && e.environment.as_deref() == Some(environment.as_str())
                && e.name == name
        });
        if duplicate {
            return Err(ModelError::DuplicateName {
                kind: ElementKind::DeploymentNode.as_str(),
                name,
            });
        }
        let id = self.push_element(ElementKind::DeploymentNode, name);
        let element = &mut self.elements[id.index()];
        element.parent = parent;
        element.environment = Some(environment);
        element.description = description;
        element.technology = technology;
        Ok(id)
    }

    pub fn add_infrastructure_node(
        &mut self,
        parent: ElementId,
        name: String,
        description: Option<String>,
        technology: Option<String>,
    ) -> Result<ElementId, ModelError> {
        self.check_child_name(parent, ElementKind::InfrastructureNode, &name)?;
        let environment = self.elements[parent.index()].environment.clone();
        let id = self.push_element(ElementKind::InfrastructureNode, name);
        let element = &mut self.elements[id.index()];
        element.parent = Some(parent);
        element.environment = environment;
        element.description = description;
        element.technology = technology;
        Ok(id)
    }

    pub fn add_software_system_instance(
        &mut self,
        node: ElementId,
        system: ElementId,
    ) -> Result<ElementId, ModelError> {
        if self.elements[system.index()].kind != ElementKind::SoftwareSystem {
            return Err(ModelError::TypeMismatch {
                expected: "software system",
                name: self.elements[system.index()].name.clone(),
            });
        }
        self.add_instance(ElementKind::SoftwareSystemInstance, node, system)
    }

    pub fn add_container_instance(
        &mut self,
        node: ElementId,
        container: ElementId,
    ) -> Result<ElementId, ModelError> {
        if self.elements[container.index()].kind != ElementKind::Container {
            return Err(ModelError::TypeMismatch {
                expected: "container",
                name: self.elements[container.index()].name.clone(),
            });
        }
        self.add_instance(ElementKind::ContainerInstance, node, container)
    }

    fn add_instance(
        &mut self,
        kind: ElementKind,
        node: ElementId,
        of: ElementId,
    ) -> Result<ElementId, ModelError> {
        if self.elements[node.index()].kind != ElementKind::DeploymentNode {
            return Err(ModelError::TypeMismatch {
                expected: "deployment node",
                name: self.elements[node.index()].name.clone(),
            });
        }
        let environment = self.elements[node.index()].environment.clone();
        let ordinal = 1 + self
            .elements
            .iter()
            .filter(|e| e.instance_of == Some(of) && e.environment == environment)
            .count() as u32;
        let name = self.elements[of.index()].name.clone();
        let tags = self.elements[of.index()].tags.join(",");
        let id = self.push_element(kind, name);
        let element = &mut self.elements[id.index()];
        element.parent = Some(node);
        element.environment = environment;
        element.instance_of = Some(of);
        element.instance_id = Some(ordinal);
        element.add_tags(&tags);
        Ok(id)
    }

    // ========================================================================
    // RELATIONSHIP CREATION
    // ========================================================================

    pub fn add_relationship(
        &mut self,
        source: ElementId,
        destination: ElementId,
        description: Option<String>,
        technology: Option<String>,
    ) -> RelationshipId {
        let id = RelationshipId(self.relationships.len() as u32);
        let mut relationship = Relationship::new(id, source, destination);
        relationship.description = description;
        relationship.technology = technology;
        self.relationships.push(relationship);
        id
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn push_element(&mut self, kind: ElementKind, name: String) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element::new(id, kind, name));
        id
    }

    /// People and software systems share one flat namespace.
    fn check_top_level_name(&self, name: &str) -> Result<(), ModelError> {
        if let Some(existing) = self.elements.iter().find(|e| {
            matches!(e.kind, ElementKind::Person | ElementKind::SoftwareSystem) && e.name == name
        }) {
            return Err(ModelError::DuplicateName {
                kind: existing.kind.as_str(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_child_name(
        &self,
        parent: ElementId,
        kind: ElementKind,
        name: &str,
    ) -> Result<(), ModelError> {
        let duplicate = self
            .elements
            .iter()
            .any(|e| e.kind == kind && e.parent == Some(parent) && e.name == name);
        if duplicate {
            return Err(ModelError::DuplicateName {
                kind: kind.as_str(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_top_level_name_rejected() {
        let mut model = Model::new();
        model.add_person("User".into(), None).unwrap();
        let err = model.add_software_system("User".into(), None).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { .. }));
    }

    #[test]
    fn test_same_container_name_in_different_systems() {
        let mut model = Model::new();
        let a = model.add_software_system("A".into(), None).unwrap();
        let b = model.add_software_system("B".into(), None).unwrap();
        model.add_container(a, "API".into(), None, None).unwrap();
        assert!(model.add_container(b, "API".into(), None, None).is_ok());
        assert!(model.add_container(a, "API".into(), None, None).is_err());
    }

    #[test]
    fn test_instance_ordinals_count_per_environment() {
        let mut model = Model::new();
        let system = model.add_software_system("S".into(), None).unwrap();
        let live = model
            .add_deployment_node("Live".into(), None, "Server 1".into(), None, None)
            .unwrap();
        let live2 = model
            .add_deployment_node("Live".into(), None, "Server 2".into(), None, None)
            .unwrap();
        let first = model.add_software_system_instance(live, system).unwrap();
        let second = model.add_software_system_instance(live2, system).unwrap();
        assert_eq!(model.element(first).instance_id, Some(1));
        assert_eq!(model.element(second).instance_id, Some(2));
    }

    #[test]
    fn test_instance_requires_deployment_node() {
        let mut model = Model::new();
        let system = model.add_software_system("S".into(), None).unwrap();
        let person = model.add_person("P".into(), None).unwrap();
        let err = model
            .add_software_system_instance(person, system)
            .unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { .. }));
    }
}
