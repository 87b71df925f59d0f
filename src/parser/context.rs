//! The context stack: which block is currently open.
//!
//! Each variant represents one open nested block. The dispatcher never
//! matches on variants directly when deciding whether a keyword is legal;
//! it asks for *capabilities* ("is the top groupable?", "does it name a
//! model item?") so that contexts sharing behaviour share one code path.

use crate::workspace::{ElementId, RelationshipId, ViewId};

use super::error::ParseFailure;

/// A model item that fields like `tags` and `url` can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModelItem {
    Element(ElementId),
    Relationship(RelationshipId),
}

/// One open block.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Context {
    Workspace,
    Model { group: Option<String> },
    Enterprise { group: Option<String> },
    Person { element: ElementId },
    SoftwareSystem { element: ElementId, group: Option<String> },
    Container { element: ElementId, group: Option<String> },
    Component { element: ElementId },
    DeploymentEnvironment { name: String },
    DeploymentNode { element: ElementId },
    InfrastructureNode { element: ElementId },
    SoftwareSystemInstance { element: ElementId },
    ContainerInstance { element: ElementId },
    Relationship { relationship: RelationshipId },
    Views,
    View { view: ViewId },
    Animation { view: ViewId },
    Styles,
    ElementStyle { index: usize },
    RelationshipStyle { index: usize },
    Branding,
    Terminology,
    Configuration,
    Users,
    Properties { item: ModelItem },
    Perspectives { item: ModelItem },
    MultilineComment,
}

impl Context {
    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Model { .. } => "model",
            Self::Enterprise { .. } => "enterprise",
            Self::Person { .. } => "person",
            Self::SoftwareSystem { .. } => "softwareSystem",
            Self::Container { .. } => "container",
            Self::Component { .. } => "component",
            Self::DeploymentEnvironment { .. } => "deploymentEnvironment",
            Self::DeploymentNode { .. } => "deploymentNode",
            Self::InfrastructureNode { .. } => "infrastructureNode",
            Self::SoftwareSystemInstance { .. } => "softwareSystemInstance",
            Self::ContainerInstance { .. } => "containerInstance",
            Self::Relationship { .. } => "relationship",
            Self::Views => "views",
            Self::View { .. } => "view",
            Self::Animation { .. } => "animation",
            Self::Styles => "styles",
            Self::ElementStyle { .. } => "element style",
            Self::RelationshipStyle { .. } => "relationship style",
            Self::Branding => "branding",
            Self::Terminology => "terminology",
            Self::Configuration => "configuration",
            Self::Users => "users",
            Self::Properties { .. } => "properties",
            Self::Perspectives { .. } => "perspectives",
            Self::MultilineComment => "comment",
        }
    }

    /// The group this context is scoped to, if any.
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Model { group }
            | Self::Enterprise { group }
            | Self::SoftwareSystem { group, .. }
            | Self::Container { group, .. } => group.as_deref(),
            _ => None,
        }
    }

    /// Whether a `group` block may open here: the context accepts groups
    /// and is not already inside one.
    pub fn groupable(&self) -> bool {
        matches!(
            self,
            Self::Model { group: None }
                | Self::Enterprise { group: None }
                | Self::SoftwareSystem { group: None, .. }
                | Self::Container { group: None, .. }
        )
    }

    /// A copy of this context scoped to `group`, for contexts that accept
    /// a `group` block and are not already inside one.
    pub fn with_group(&self, group: String) -> Option<Context> {
        match self {
            Self::Model { group: None } => Some(Self::Model { group: Some(group) }),
            Self::Enterprise { group: None } => Some(Self::Enterprise { group: Some(group) }),
            Self::SoftwareSystem {
                element,
                group: None,
            } => Some(Self::SoftwareSystem {
                element: *element,
                group: Some(group),
            }),
            Self::Container {
                element,
                group: None,
            } => Some(Self::Container {
                element: *element,
                group: Some(group),
            }),
            _ => None,
        }
    }

    /// The single element this context is the body of, if any. This is
    /// what `this` and implicit relationships resolve to.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Self::Person { element }
            | Self::SoftwareSystem { element, .. }
            | Self::Container { element, .. }
            | Self::Component { element }
            | Self::DeploymentNode { element }
            | Self::InfrastructureNode { element }
            | Self::SoftwareSystemInstance { element }
            | Self::ContainerInstance { element } => Some(*element),
            _ => None,
        }
    }

    /// The model item that `tags`, `url`, `properties` and `perspectives`
    /// apply to in this context.
    pub fn model_item(&self) -> Option<ModelItem> {
        match self {
            Self::Relationship { relationship } => Some(ModelItem::Relationship(*relationship)),
            _ => self.element().map(ModelItem::Element),
        }
    }

    /// The view this context belongs to, if any.
    pub fn view(&self) -> Option<ViewId> {
        match self {
            Self::View { view } | Self::Animation { view } => Some(*view),
            _ => None,
        }
    }

    /// Whether `source -> destination` lines declare model relationships
    /// here.
    pub fn allows_relationship(&self) -> bool {
        matches!(
            self,
            Self::Model { .. } | Self::Enterprise { .. } | Self::DeploymentEnvironment { .. }
        ) || self.element().is_some()
    }

    /// Whether every line in this context is consumed by a single
    /// dedicated parser rather than the keyword table.
    pub fn consumes_all_lines(&self) -> bool {
        matches!(
            self,
            Self::Users | Self::Properties { .. } | Self::Perspectives { .. } | Self::Animation { .. }
        )
    }
}

/// LIFO of open blocks. The top reflects the innermost block; the base
/// state (outside `workspace { }`) is empty.
#[derive(Debug, Default)]
pub(crate) struct ContextStack {
    stack: Vec<Context>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, context: Context) {
        self.stack.push(context);
    }

    pub fn pop(&mut self) -> Result<Context, ParseFailure> {
        self.stack
            .pop()
            .ok_or_else(|| ParseFailure::Structural("Unexpected }".to_string()))
    }

    pub fn peek(&self) -> Option<&Context> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
