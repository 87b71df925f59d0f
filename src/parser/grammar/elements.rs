//! Static model elements: enterprise, groups, people, software systems,
//! containers, components, and the fields shared by all model items.

use crate::workspace::ElementId;

use super::super::context::{Context, ModelItem};
use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};
use super::require_block;

const ENTERPRISE_GRAMMAR: &str = "enterprise [name]";
const GROUP_GRAMMAR: &str = "group <name>";
const PERSON_GRAMMAR: &str = "person <name> [description] [tags]";
const SOFTWARE_SYSTEM_GRAMMAR: &str = "softwareSystem <name> [description] [tags]";
const CONTAINER_GRAMMAR: &str = "container <name> [description] [technology] [tags]";
const COMPONENT_GRAMMAR: &str = "component <name> [description] [technology] [tags]";
const DESCRIPTION_GRAMMAR: &str = "description <description>";
const TECHNOLOGY_GRAMMAR: &str = "technology <technology>";
const TAGS_GRAMMAR: &str = "tags <tags> [tags]";
const URL_GRAMMAR: &str = "url <url>";
const PROPERTY_GRAMMAR: &str = "<name> <value>";
const PERSPECTIVE_GRAMMAR: &str = "<name> <description>";

pub(crate) fn parse_enterprise(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if !line.block_start() {
        return Err(ParseFailure::Expected(ENTERPRISE_GRAMMAR));
    }
    line.at_most(2, ENTERPRISE_GRAMMAR)?;
    p.workspace.model.enterprise = line.get(1).map(str::to_string);
    p.stack.push(Context::Enterprise { group: None });
    Ok(None)
}

/// `group <name> {` re-enters the enclosing context with the group set;
/// the matching `}` pops back out of it.
pub(crate) fn parse_group(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if !line.block_start() {
        return Err(ParseFailure::Expected(GROUP_GRAMMAR));
    }
    let name = line.require(1, GROUP_GRAMMAR)?.to_string();
    line.at_most(2, GROUP_GRAMMAR)?;
    let grouped = p
        .stack
        .peek()
        .and_then(|c| c.with_group(name))
        .ok_or_else(|| ParseFailure::Internal("expected a groupable context".to_string()))?;
    p.stack.push(grouped);
    Ok(None)
}

pub(crate) fn parse_person(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, PERSON_GRAMMAR)?;
    let name = line.require(1, PERSON_GRAMMAR)?.to_string();
    let description = line.get(2).map(str::to_string);
    let group = current_group(p);
    let id = p.workspace.model.add_person(name, description)?;
    decorate(p, id, group, line.get(3));
    if line.block_start() {
        p.stack.push(Context::Person { element: id });
    }
    Ok(Some(Binding::Element(id)))
}

pub(crate) fn parse_software_system(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(4, SOFTWARE_SYSTEM_GRAMMAR)?;
    let name = line.require(1, SOFTWARE_SYSTEM_GRAMMAR)?.to_string();
    let description = line.get(2).map(str::to_string);
    let group = current_group(p);
    let id = p.workspace.model.add_software_system(name, description)?;
    decorate(p, id, group, line.get(3));
    if line.block_start() {
        p.stack.push(Context::SoftwareSystem {
            element: id,
            group: None,
        });
    }
    Ok(Some(Binding::Element(id)))
}

pub(crate) fn parse_container(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(5, CONTAINER_GRAMMAR)?;
    let parent = enclosing_element(p)?;
    let name = line.require(1, CONTAINER_GRAMMAR)?.to_string();
    let description = line.get(2).map(str::to_string);
    let technology = line.get(3).map(str::to_string);
    let group = current_group(p);
    let id = p
        .workspace
        .model
        .add_container(parent, name, description, technology)?;
    decorate(p, id, group, line.get(4));
    if line.block_start() {
        p.stack.push(Context::Container {
            element: id,
            group: None,
        });
    }
    Ok(Some(Binding::Element(id)))
}

pub(crate) fn parse_component(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(5, COMPONENT_GRAMMAR)?;
    let parent = enclosing_element(p)?;
    let name = line.require(1, COMPONENT_GRAMMAR)?.to_string();
    let description = line.get(2).map(str::to_string);
    let technology = line.get(3).map(str::to_string);
    let group = current_group(p);
    let id = p
        .workspace
        .model
        .add_component(parent, name, description, technology)?;
    decorate(p, id, group, line.get(4));
    if line.block_start() {
        p.stack.push(Context::Component { element: id });
    }
    Ok(Some(Binding::Element(id)))
}

// ============================================================================
// FIELDS ON MODEL ITEMS
// ============================================================================

pub(crate) fn parse_description(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let value = line.require(1, DESCRIPTION_GRAMMAR)?.to_string();
    line.at_most(2, DESCRIPTION_GRAMMAR)?;
    match current_item(p)? {
        ModelItem::Element(id) => p.workspace.model.element_mut(id).description = Some(value),
        ModelItem::Relationship(id) => {
            p.workspace.model.relationship_mut(id).description = Some(value)
        }
    }
    Ok(None)
}

pub(crate) fn parse_technology(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let value = line.require(1, TECHNOLOGY_GRAMMAR)?.to_string();
    line.at_most(2, TECHNOLOGY_GRAMMAR)?;
    let id = p
        .stack
        .peek()
        .and_then(Context::element)
        .ok_or_else(|| ParseFailure::Internal("expected an element context".to_string()))?;
    p.workspace.model.element_mut(id).technology = Some(value);
    Ok(None)
}

pub(crate) fn parse_tags(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if line.len() < 2 {
        return Err(ParseFailure::Expected(TAGS_GRAMMAR));
    }
    let item = current_item(p)?;
    for tags in line.rest(1) {
        match item {
            ModelItem::Element(id) => p.workspace.model.element_mut(id).add_tags(tags),
            ModelItem::Relationship(id) => p.workspace.model.relationship_mut(id).add_tags(tags),
        }
    }
    Ok(None)
}

pub(crate) fn parse_url(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let value = line.require(1, URL_GRAMMAR)?.to_string();
    line.at_most(2, URL_GRAMMAR)?;
    match current_item(p)? {
        ModelItem::Element(id) => p.workspace.model.element_mut(id).url = Some(value),
        ModelItem::Relationship(id) => p.workspace.model.relationship_mut(id).url = Some(value),
    }
    Ok(None)
}

pub(crate) fn parse_properties_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    let item = current_item(p)?;
    p.stack.push(Context::Properties { item });
    Ok(None)
}

/// One line inside a `properties` block.
pub(crate) fn parse_property(
    p: &mut DslParser,
    line: &TokenLine,
    item: ModelItem,
) -> Result<Option<Binding>, ParseFailure> {
    let name = line.require(0, PROPERTY_GRAMMAR)?.to_string();
    let value = line.require(1, PROPERTY_GRAMMAR)?.to_string();
    line.at_most(2, PROPERTY_GRAMMAR)?;
    match item {
        ModelItem::Element(id) => {
            p.workspace.model.element_mut(id).properties.insert(name, value);
        }
        ModelItem::Relationship(id) => {
            p.workspace
                .model
                .relationship_mut(id)
                .properties
                .insert(name, value);
        }
    }
    Ok(None)
}

pub(crate) fn parse_perspectives_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    let item = current_item(p)?;
    p.stack.push(Context::Perspectives { item });
    Ok(None)
}

/// One line inside a `perspectives` block.
pub(crate) fn parse_perspective(
    p: &mut DslParser,
    line: &TokenLine,
    item: ModelItem,
) -> Result<Option<Binding>, ParseFailure> {
    let name = line.require(0, PERSPECTIVE_GRAMMAR)?.to_string();
    let value = line.require(1, PERSPECTIVE_GRAMMAR)?.to_string();
    line.at_most(2, PERSPECTIVE_GRAMMAR)?;
    match item {
        ModelItem::Element(id) => {
            p.workspace
                .model
                .element_mut(id)
                .perspectives
                .insert(name, value);
        }
        ModelItem::Relationship(id) => {
            p.workspace
                .model
                .relationship_mut(id)
                .perspectives
                .insert(name, value);
        }
    }
    Ok(None)
}

// ============================================================================
// HELPERS
// ============================================================================

fn current_group(p: &DslParser) -> Option<String> {
    p.stack
        .peek()
        .and_then(Context::group)
        .map(str::to_string)
}

fn enclosing_element(p: &DslParser) -> Result<ElementId, ParseFailure> {
    p.stack
        .peek()
        .and_then(Context::element)
        .ok_or_else(|| ParseFailure::Internal("expected an element context".to_string()))
}

fn current_item(p: &DslParser) -> Result<ModelItem, ParseFailure> {
    p.stack
        .peek()
        .and_then(Context::model_item)
        .ok_or_else(|| ParseFailure::Internal("expected a model item context".to_string()))
}

/// Apply the group and trailing tags shared by all element declarations.
fn decorate(p: &mut DslParser, id: ElementId, group: Option<String>, tags: Option<&str>) {
    let element = p.workspace.model.element_mut(id);
    element.group = group;
    if let Some(tags) = tags {
        element.add_tags(tags);
    }
}
