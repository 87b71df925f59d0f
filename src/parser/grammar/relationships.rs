//! Relationship declarations.
//!
//! Explicit: `source -> destination [description] [technology] [tags]`.
//! Implicit: `-> destination ...` inside an element body, with the
//! enclosing element as the source.

use crate::workspace::ElementId;

use super::super::context::Context;
use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};

const EXPLICIT_GRAMMAR: &str =
    "<identifier> -> <identifier> [description] [technology] [tags]";
const IMPLICIT_GRAMMAR: &str = "-> <identifier> [description] [technology] [tags]";

pub(crate) fn parse_explicit(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(6, EXPLICIT_GRAMMAR)?;
    let source = p.find_element(line.require(0, EXPLICIT_GRAMMAR)?)?;
    let destination = p.find_element(line.require(2, EXPLICIT_GRAMMAR)?)?;
    create(p, line, source, destination, 3)
}

pub(crate) fn parse_implicit(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(5, IMPLICIT_GRAMMAR)?;
    let source = p
        .stack
        .peek()
        .and_then(Context::element)
        .ok_or_else(|| ParseFailure::Internal("expected an element context".to_string()))?;
    let destination = p.find_element(line.require(1, IMPLICIT_GRAMMAR)?)?;
    create(p, line, source, destination, 2)
}

fn create(
    p: &mut DslParser,
    line: &TokenLine,
    source: ElementId,
    destination: ElementId,
    tail: usize,
) -> Result<Option<Binding>, ParseFailure> {
    let description = line.get(tail).map(str::to_string);
    let technology = line.get(tail + 1).map(str::to_string);
    let id = p
        .workspace
        .model
        .add_relationship(source, destination, description, technology);
    if let Some(tags) = line.get(tail + 2) {
        p.workspace.model.relationship_mut(id).add_tags(tags);
    }
    if line.block_start() {
        p.stack.push(Context::Relationship { relationship: id });
    }
    Ok(Some(Binding::Relationship(id)))
}
