//! Element and relationship styles.

use crate::workspace::{parse_color, Border, Routing, Shape};

use super::super::context::Context;
use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};
use super::{parse_bool, parse_u32, require_block};

const ELEMENT_STYLE_GRAMMAR: &str = "element <tag>";
const RELATIONSHIP_STYLE_GRAMMAR: &str = "relationship <tag>";
const PROPERTY_GRAMMAR: &str = "<property> <value>";

pub(crate) fn parse_styles_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Styles);
    Ok(None)
}

pub(crate) fn parse_element_style(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let tag = line.require(1, ELEMENT_STYLE_GRAMMAR)?.to_string();
    line.at_most(2, ELEMENT_STYLE_GRAMMAR)?;
    let index = p.workspace.views.styles.add_element_style(tag);
    if line.block_start() {
        p.stack.push(Context::ElementStyle { index });
    }
    Ok(None)
}

pub(crate) fn parse_relationship_style(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let tag = line.require(1, RELATIONSHIP_STYLE_GRAMMAR)?.to_string();
    line.at_most(2, RELATIONSHIP_STYLE_GRAMMAR)?;
    let index = p.workspace.views.styles.add_relationship_style(tag);
    if line.block_start() {
        p.stack.push(Context::RelationshipStyle { index });
    }
    Ok(None)
}

/// One field line inside an `element` style block; the keyword selects
/// the field.
pub(crate) fn parse_element_style_property(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let keyword = line.require(0, PROPERTY_GRAMMAR)?.to_lowercase();
    let value = line.require(1, PROPERTY_GRAMMAR)?.to_string();
    line.at_most(2, PROPERTY_GRAMMAR)?;
    // Icons reference files or URLs, which restricted mode rules out.
    if keyword == "icon" && p.is_restricted() {
        return Ok(None);
    }
    let style = p.current_element_style()?;
    match keyword.as_str() {
        "shape" => style.shape = Some(Shape::parse(&value)?),
        "icon" => style.icon = Some(value),
        "width" => style.width = Some(parse_u32("width", &value)?),
        "height" => style.height = Some(parse_u32("height", &value)?),
        "background" => style.background = Some(parse_color(&value)?),
        "color" | "colour" => style.color = Some(parse_color(&value)?),
        "fontsize" => style.font_size = Some(parse_u32("font size", &value)?),
        "border" => style.border = Some(Border::parse(&value)?),
        "opacity" => style.opacity = Some(parse_u32("opacity", &value)?),
        "metadata" => style.metadata = Some(parse_bool("metadata", &value)?),
        "description" => style.description = Some(parse_bool("description", &value)?),
        _ => {
            return Err(ParseFailure::Internal(
                "unhandled element style keyword".to_string(),
            ));
        }
    }
    Ok(None)
}

/// One field line inside a `relationship` style block.
pub(crate) fn parse_relationship_style_property(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let keyword = line.require(0, PROPERTY_GRAMMAR)?.to_lowercase();
    let value = line.require(1, PROPERTY_GRAMMAR)?.to_string();
    line.at_most(2, PROPERTY_GRAMMAR)?;
    let style = p.current_relationship_style()?;
    match keyword.as_str() {
        "thickness" => style.thickness = Some(parse_u32("thickness", &value)?),
        "color" | "colour" => style.color = Some(parse_color(&value)?),
        "dashed" => style.dashed = Some(parse_bool("dashed", &value)?),
        "routing" => style.routing = Some(Routing::parse(&value)?),
        "fontsize" => style.font_size = Some(parse_u32("font size", &value)?),
        "width" => style.width = Some(parse_u32("width", &value)?),
        "position" => style.position = Some(parse_u32("position", &value)?),
        "opacity" => style.opacity = Some(parse_u32("opacity", &value)?),
        _ => {
            return Err(ParseFailure::Internal(
                "unhandled relationship style keyword".to_string(),
            ));
        }
    }
    Ok(None)
}
