//! Views over the model, and the set that owns them.

use super::elements::ElementId;
use super::error::ModelError;
use super::styles::Styles;
use super::workspace::{Branding, Terminology};

/// Handle to a view in the view set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub(crate) u32);

impl ViewId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    SystemLandscape,
    SystemContext,
    Container,
    Component,
    Dynamic,
    Deployment,
}

impl ViewKind {
    /// Prefix used when generating a key for a view declared without one.
    fn key_prefix(self) -> &'static str {
        match self {
            Self::SystemLandscape => "SystemLandscape",
            Self::SystemContext => "SystemContext",
            Self::Container => "Container",
            Self::Component => "Component",
            Self::Dynamic => "Dynamic",
            Self::Deployment => "Deployment",
        }
    }

    /// Whether the view carries include/exclude element expressions.
    pub fn has_element_expressions(self) -> bool {
        !matches!(self, Self::Dynamic)
    }
}

/// One entry in a view's include or exclude list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewExpression {
    /// `*` - everything in scope.
    Wildcard,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl RankDirection {
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "tb" => Ok(Self::TopBottom),
            "bt" => Ok(Self::BottomTop),
            "lr" => Ok(Self::LeftRight),
            "rl" => Ok(Self::RightLeft),
            other => Err(ModelError::invalid_value("rank direction", other)),
        }
    }
}

/// Automatic layout settings for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoLayout {
    pub rank_direction: RankDirection,
    pub rank_separation: u32,
    pub node_separation: u32,
}

impl Default for AutoLayout {
    fn default() -> Self {
        Self {
            rank_direction: RankDirection::TopBottom,
            rank_separation: 300,
            node_separation: 300,
        }
    }
}

/// One interaction in a dynamic view, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicStep {
    pub order: u32,
    pub source: ElementId,
    pub destination: ElementId,
    pub description: Option<String>,
}

/// A rendered view of some slice of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub key: String,
    /// Scope element: the software system or container the view centres
    /// on. `None` for landscape views and wildcard-scoped views.
    pub subject: Option<ElementId>,
    /// Deployment environment (deployment views only).
    pub environment: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub includes: Vec<ViewExpression>,
    pub excludes: Vec<ViewExpression>,
    pub auto_layout: Option<AutoLayout>,
    /// Animation steps; each step reveals the listed elements.
    pub animations: Vec<Vec<ElementId>>,
    /// Interaction steps (dynamic views only).
    pub steps: Vec<DynamicStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Include,
    Exclude,
}

impl FilterMode {
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            other => Err(ModelError::invalid_value("filter mode", other)),
        }
    }
}

/// A view defined as a tag filter over another view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub key: String,
    pub base_key: String,
    pub mode: FilterMode,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// All views in the workspace, plus the visual configuration that the DSL
/// nests inside the `views` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSet {
    views: Vec<View>,
    pub filtered: Vec<FilteredView>,
    pub themes: Vec<String>,
    pub styles: Styles,
    pub branding: Branding,
    pub terminology: Terminology,
}

impl ViewSet {
    pub fn view(&self, id: ViewId) -> &View {
        &self.views[id.index()]
    }

    pub fn view_mut(&mut self, id: ViewId) -> &mut View {
        &mut self.views[id.index()]
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn find_by_key(&self, key: &str) -> Option<&View> {
        self.views.iter().find(|v| v.key == key)
    }

    pub fn add_view(
        &mut self,
        kind: ViewKind,
        key: Option<String>,
        subject: Option<ElementId>,
        environment: Option<String>,
        description: Option<String>,
    ) -> Result<ViewId, ModelError> {
        let key = match key {
            Some(key) => {
                self.check_key(&key)?;
                key
            }
            None => self.generate_key(kind),
        };
        let id = ViewId(self.views.len() as u32);
        self.views.push(View {
            id,
            kind,
            key,
            subject,
            environment,
            description,
            title: None,
            includes: Vec::new(),
            excludes: Vec::new(),
            auto_layout: None,
            animations: Vec::new(),
            steps: Vec::new(),
        });
        Ok(id)
    }

    pub fn add_filtered_view(
        &mut self,
        base_key: String,
        mode: FilterMode,
        tags: Vec<String>,
        key: Option<String>,
        description: Option<String>,
    ) -> Result<(), ModelError> {
        let key = match key {
            Some(key) => {
                self.check_key(&key)?;
                key
            }
            None => format!("Filtered-{}", self.views.len() + self.filtered.len() + 1),
        };
        self.filtered.push(FilteredView {
            key,
            base_key,
            mode,
            tags,
            description,
        });
        Ok(())
    }

    fn check_key(&self, key: &str) -> Result<(), ModelError> {
        let taken = self.views.iter().any(|v| v.key == key)
            || self.filtered.iter().any(|v| v.key == key);
        if taken {
            return Err(ModelError::DuplicateViewKey(key.to_string()));
        }
        Ok(())
    }

    fn generate_key(&self, kind: ViewKind) -> String {
        format!(
            "{}-{}",
            kind.key_prefix(),
            self.views.len() + self.filtered.len() + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_view_key_rejected() {
        let mut views = ViewSet::default();
        views
            .add_view(ViewKind::SystemLandscape, Some("k".into()), None, None, None)
            .unwrap();
        let err = views
            .add_view(ViewKind::Dynamic, Some("k".into()), None, None, None)
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateViewKey("k".into()));
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let mut views = ViewSet::default();
        let a = views
            .add_view(ViewKind::SystemContext, None, None, None, None)
            .unwrap();
        let b = views
            .add_view(ViewKind::SystemContext, None, None, None, None)
            .unwrap();
        assert_ne!(views.view(a).key, views.view(b).key);
    }
}
