//! Workspace domain model.
//!
//! The parser drives this model through a narrow façade: element and
//! relationship creation on [`Model`], view creation on [`ViewSet`], and
//! style/branding/terminology setters. Storage is arena-based; elements
//! and relationships live in vectors and are addressed by copyable ids,
//! so the parser's symbol tables hold handles, not references.

mod elements;
mod error;
mod model;
mod relationships;
mod styles;
mod views;
mod workspace;

pub use elements::{Element, ElementId, ElementKind};
pub use error::ModelError;
pub use model::{IdentifierMode, Model};
pub use relationships::{Relationship, RelationshipId};
pub use styles::{parse_color, Border, ElementStyle, RelationshipStyle, Routing, Shape, Styles};
pub use views::{
    AutoLayout, DynamicStep, FilterMode, FilteredView, RankDirection, View, ViewExpression,
    ViewId, ViewKind, ViewSet,
};
pub use workspace::{
    Branding, Configuration, Documentation, Font, Role, Terminology, User, Workspace,
};
