//! The workspace: the root object the parser builds.

use std::path::PathBuf;

use super::model::Model;
use super::views::ViewSet;

/// Access level for a workspace user. The DSL tokens `write` and
/// `read-write` both grant [`Role::ReadWrite`]; `read` grants
/// [`Role::ReadOnly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub role: Role,
}

/// Workspace-level configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub name: String,
    pub url: Option<String>,
}

/// Branding applied when views are rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Branding {
    pub logo: Option<String>,
    pub font: Option<Font>,
}

/// Overrides for the nouns used when rendering diagram metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Terminology {
    pub enterprise: Option<String>,
    pub person: Option<String>,
    pub software_system: Option<String>,
    pub container: Option<String>,
    pub component: Option<String>,
    pub deployment_node: Option<String>,
    pub infrastructure_node: Option<String>,
    pub relationship: Option<String>,
}

/// Paths registered by the `!docs` and `!adrs` directives. The content is
/// ingested by downstream tooling, not by the parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Documentation {
    pub docs: Vec<PathBuf>,
    pub adrs: Vec<PathBuf>,
}

/// A software architecture workspace: the model, the views over it, and
/// the DSL source it was built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    pub name: Option<String>,
    pub description: Option<String>,
    pub model: Model,
    pub views: ViewSet,
    pub configuration: Configuration,
    pub documentation: Documentation,
    /// The preserved DSL source, attached after a successful parse.
    pub source: Option<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            model: Model::new(),
            ..Self::default()
        }
    }

    pub fn set_source(&mut self, source: String) {
        self.source = Some(source);
    }
}
