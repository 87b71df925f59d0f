//! View declarations and view content, plus the branding and terminology
//! blocks that the DSL nests inside `views`.

use crate::workspace::{
    AutoLayout, DynamicStep, ElementId, ElementKind, FilterMode, Font, RankDirection,
    ViewExpression, ViewId, ViewKind,
};

use super::super::context::Context;
use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};
use super::{parse_u32, require_block};

const SYSTEM_LANDSCAPE_GRAMMAR: &str = "systemLandscape [key] [description]";
const SYSTEM_CONTEXT_GRAMMAR: &str = "systemContext <software system identifier> [key] [description]";
const CONTAINER_VIEW_GRAMMAR: &str = "container <software system identifier> [key] [description]";
const COMPONENT_VIEW_GRAMMAR: &str = "component <container identifier> [key] [description]";
const DYNAMIC_GRAMMAR: &str = "dynamic <*|software system identifier|container identifier> [key] [description]";
const DEPLOYMENT_GRAMMAR: &str =
    "deployment <*|software system identifier> <environment> [key] [description]";
const FILTERED_GRAMMAR: &str = "filtered <base key> <include|exclude> <tags> [key] [description]";
const INCLUDE_GRAMMAR: &str = "include <*|identifier> [*|identifier...]";
const EXCLUDE_GRAMMAR: &str = "exclude <*|identifier> [*|identifier...]";
const AUTOLAYOUT_GRAMMAR: &str = "autoLayout [tb|bt|lr|rl] [rank separation] [node separation]";
const ANIMATION_GRAMMAR: &str = "animation";
const ANIMATION_STEP_GRAMMAR: &str = "<identifier> [identifier...]";
const TITLE_GRAMMAR: &str = "title <title>";
const VIEW_DESCRIPTION_GRAMMAR: &str = "description <description>";
const DYNAMIC_STEP_GRAMMAR: &str = "<identifier> -> <identifier> [description]";
const THEMES_GRAMMAR: &str = "themes <url> [url...]";
const LOGO_GRAMMAR: &str = "logo <path|url>";
const FONT_GRAMMAR: &str = "font <name> [url]";
const TERM_GRAMMAR: &str = "<keyword> <term>";

// ============================================================================
// VIEW CREATION
// ============================================================================

pub(crate) fn parse_system_landscape_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(3, SYSTEM_LANDSCAPE_GRAMMAR)?;
    let key = line.get(1).map(str::to_string);
    let description = line.get(2).map(str::to_string);
    push_view(p, line, ViewKind::SystemLandscape, key, None, None, description)
}

pub(crate) fn parse_system_context_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, SYSTEM_CONTEXT_GRAMMAR)?;
    let subject = scoped_element(p, line.require(1, SYSTEM_CONTEXT_GRAMMAR)?, ElementKind::SoftwareSystem)?;
    let key = line.get(2).map(str::to_string);
    let description = line.get(3).map(str::to_string);
    push_view(p, line, ViewKind::SystemContext, key, Some(subject), None, description)
}

pub(crate) fn parse_container_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, CONTAINER_VIEW_GRAMMAR)?;
    let subject = scoped_element(p, line.require(1, CONTAINER_VIEW_GRAMMAR)?, ElementKind::SoftwareSystem)?;
    let key = line.get(2).map(str::to_string);
    let description = line.get(3).map(str::to_string);
    push_view(p, line, ViewKind::Container, key, Some(subject), None, description)
}

pub(crate) fn parse_component_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, COMPONENT_VIEW_GRAMMAR)?;
    let subject = scoped_element(p, line.require(1, COMPONENT_VIEW_GRAMMAR)?, ElementKind::Container)?;
    let key = line.get(2).map(str::to_string);
    let description = line.get(3).map(str::to_string);
    push_view(p, line, ViewKind::Component, key, Some(subject), None, description)
}

pub(crate) fn parse_dynamic_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, DYNAMIC_GRAMMAR)?;
    let scope = line.require(1, DYNAMIC_GRAMMAR)?;
    let subject = if scope == "*" {
        None
    } else {
        let id = p.find_element(scope)?;
        let kind = p.workspace.model.element(id).kind;
        if !matches!(kind, ElementKind::SoftwareSystem | ElementKind::Container) {
            return Err(ParseFailure::Reference(format!(
                "The element \"{scope}\" is not a software system or container"
            )));
        }
        Some(id)
    };
    let key = line.get(2).map(str::to_string);
    let description = line.get(3).map(str::to_string);
    push_view(p, line, ViewKind::Dynamic, key, subject, None, description)
}

pub(crate) fn parse_deployment_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(5, DEPLOYMENT_GRAMMAR)?;
    let scope = line.require(1, DEPLOYMENT_GRAMMAR)?;
    let subject = if scope == "*" {
        None
    } else {
        Some(scoped_element(p, scope, ElementKind::SoftwareSystem)?)
    };
    let environment = line.require(2, DEPLOYMENT_GRAMMAR)?.to_string();
    let key = line.get(3).map(str::to_string);
    let description = line.get(4).map(str::to_string);
    push_view(
        p,
        line,
        ViewKind::Deployment,
        key,
        subject,
        Some(environment),
        description,
    )
}

pub(crate) fn parse_filtered_view(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(6, FILTERED_GRAMMAR)?;
    let base_key = line.require(1, FILTERED_GRAMMAR)?.to_string();
    if p.workspace.views.find_by_key(&base_key).is_none() {
        return Err(ParseFailure::Reference(format!(
            "The view \"{base_key}\" does not exist"
        )));
    }
    let mode = FilterMode::parse(line.require(2, FILTERED_GRAMMAR)?)?;
    let tags = line
        .require(3, FILTERED_GRAMMAR)?
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let key = line.get(4).map(str::to_string);
    let description = line.get(5).map(str::to_string);
    p.workspace
        .views
        .add_filtered_view(base_key, mode, tags, key, description)?;
    Ok(None)
}

// ============================================================================
// VIEW CONTENT
// ============================================================================

pub(crate) fn parse_include(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let expressions = element_expressions(p, line, INCLUDE_GRAMMAR)?;
    p.current_view_mut()?.includes.extend(expressions);
    Ok(None)
}

pub(crate) fn parse_exclude(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let expressions = element_expressions(p, line, EXCLUDE_GRAMMAR)?;
    p.current_view_mut()?.excludes.extend(expressions);
    Ok(None)
}

pub(crate) fn parse_auto_layout(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, AUTOLAYOUT_GRAMMAR)?;
    let mut layout = AutoLayout::default();
    if let Some(direction) = line.get(1) {
        layout.rank_direction = RankDirection::parse(direction)?;
    }
    if let Some(separation) = line.get(2) {
        layout.rank_separation = parse_u32("rank separation", separation)?;
    }
    if let Some(separation) = line.get(3) {
        layout.node_separation = parse_u32("node separation", separation)?;
    }
    p.current_view_mut()?.auto_layout = Some(layout);
    Ok(None)
}

pub(crate) fn parse_animation_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if !line.block_start() || line.len() != 1 {
        return Err(ParseFailure::Expected(ANIMATION_GRAMMAR));
    }
    let view = p
        .stack
        .peek()
        .and_then(Context::view)
        .ok_or_else(|| ParseFailure::Internal("expected a view context".to_string()))?;
    p.stack.push(Context::Animation { view });
    Ok(None)
}

/// One line inside an `animation` block: the elements revealed together.
pub(crate) fn parse_animation_step(
    p: &mut DslParser,
    line: &TokenLine,
    view: ViewId,
) -> Result<Option<Binding>, ParseFailure> {
    if line.len() == 0 {
        return Err(ParseFailure::Expected(ANIMATION_STEP_GRAMMAR));
    }
    let mut step = Vec::with_capacity(line.len());
    for identifier in line.rest(0) {
        step.push(p.find_element(identifier)?);
    }
    p.workspace.views.view_mut(view).animations.push(step);
    Ok(None)
}

pub(crate) fn parse_title(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let title = line.require(1, TITLE_GRAMMAR)?.to_string();
    line.at_most(2, TITLE_GRAMMAR)?;
    p.current_view_mut()?.title = Some(title);
    Ok(None)
}

pub(crate) fn parse_view_description(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let description = line.require(1, VIEW_DESCRIPTION_GRAMMAR)?.to_string();
    line.at_most(2, VIEW_DESCRIPTION_GRAMMAR)?;
    p.current_view_mut()?.description = Some(description);
    Ok(None)
}

/// `source -> destination [description]` inside a dynamic view. The
/// relationship must already exist in the model.
pub(crate) fn parse_dynamic_step(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, DYNAMIC_STEP_GRAMMAR)?;
    let source = p.find_element(line.require(0, DYNAMIC_STEP_GRAMMAR)?)?;
    let destination = p.find_element(line.require(2, DYNAMIC_STEP_GRAMMAR)?)?;
    let Some(relationship) = p.workspace.model.find_relationship(source, destination) else {
        let from = &p.workspace.model.element(source).name;
        let to = &p.workspace.model.element(destination).name;
        return Err(ParseFailure::Reference(format!(
            "A relationship between \"{from}\" and \"{to}\" does not exist in the model"
        )));
    };
    let description = line
        .get(3)
        .map(str::to_string)
        .or_else(|| relationship.description.clone());
    let view = p.current_view_mut()?;
    let order = view.steps.len() as u32 + 1;
    view.steps.push(DynamicStep {
        order,
        source,
        destination,
        description,
    });
    Ok(None)
}

pub(crate) fn parse_themes(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if line.len() < 2 {
        return Err(ParseFailure::Expected(THEMES_GRAMMAR));
    }
    for url in line.rest(1) {
        p.workspace.views.themes.push(url.clone());
    }
    Ok(None)
}

// ============================================================================
// BRANDING AND TERMINOLOGY
// ============================================================================

pub(crate) fn parse_branding_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Branding);
    Ok(None)
}

pub(crate) fn parse_logo(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let logo = line.require(1, LOGO_GRAMMAR)?.to_string();
    line.at_most(2, LOGO_GRAMMAR)?;
    if p.is_restricted() {
        return Ok(None);
    }
    p.workspace.views.branding.logo = Some(logo);
    Ok(None)
}

pub(crate) fn parse_font(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let name = line.require(1, FONT_GRAMMAR)?.to_string();
    line.at_most(3, FONT_GRAMMAR)?;
    let url = line.get(2).map(str::to_string);
    p.workspace.views.branding.font = Some(Font { name, url });
    Ok(None)
}

pub(crate) fn parse_terminology_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Terminology);
    Ok(None)
}

/// A noun override inside a `terminology` block; the keyword selects the
/// field.
pub(crate) fn parse_terminology_term(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let keyword = line.require(0, TERM_GRAMMAR)?.to_lowercase();
    let term = line.require(1, TERM_GRAMMAR)?.to_string();
    line.at_most(2, TERM_GRAMMAR)?;
    let terminology = &mut p.workspace.views.terminology;
    match keyword.as_str() {
        "enterprise" => terminology.enterprise = Some(term),
        "person" => terminology.person = Some(term),
        "softwaresystem" => terminology.software_system = Some(term),
        "container" => terminology.container = Some(term),
        "component" => terminology.component = Some(term),
        "deploymentnode" => terminology.deployment_node = Some(term),
        "infrastructurenode" => terminology.infrastructure_node = Some(term),
        "relationship" => terminology.relationship = Some(term),
        _ => {
            return Err(ParseFailure::Internal(
                "unhandled terminology keyword".to_string(),
            ));
        }
    }
    Ok(None)
}

// ============================================================================
// HELPERS
// ============================================================================

fn push_view(
    p: &mut DslParser,
    line: &TokenLine,
    kind: ViewKind,
    key: Option<String>,
    subject: Option<ElementId>,
    environment: Option<String>,
    description: Option<String>,
) -> Result<Option<Binding>, ParseFailure> {
    let view = p
        .workspace
        .views
        .add_view(kind, key, subject, environment, description)?;
    if line.block_start() {
        p.stack.push(Context::View { view });
    }
    Ok(None)
}

/// Resolve an identifier and require it to be of `kind`.
fn scoped_element(
    p: &DslParser,
    identifier: &str,
    kind: ElementKind,
) -> Result<ElementId, ParseFailure> {
    let id = p.find_element(identifier)?;
    if p.workspace.model.element(id).kind != kind {
        return Err(ParseFailure::Reference(format!(
            "The element \"{identifier}\" is not a {}",
            kind.as_str()
        )));
    }
    Ok(id)
}

fn element_expressions(
    p: &DslParser,
    line: &TokenLine,
    grammar: &'static str,
) -> Result<Vec<ViewExpression>, ParseFailure> {
    if line.len() < 2 {
        return Err(ParseFailure::Expected(grammar));
    }
    let mut expressions = Vec::with_capacity(line.len() - 1);
    for token in line.rest(1) {
        if token == "*" {
            expressions.push(ViewExpression::Wildcard);
        } else {
            expressions.push(ViewExpression::Element(p.find_element(token)?));
        }
    }
    Ok(expressions)
}
