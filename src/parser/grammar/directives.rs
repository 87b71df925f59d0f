//! `!`-prefixed directives other than `!include`.

use std::path::PathBuf;

use crate::base::is_valid_constant_name;
use crate::workspace::IdentifierMode;

use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};
use super::parse_bool;

const CONSTANT_GRAMMAR: &str = "!constant <name> <value>";
const IDENTIFIERS_GRAMMAR: &str = "!identifiers <flat|hierarchical>";
const IMPLIED_RELATIONSHIPS_GRAMMAR: &str = "!impliedRelationships <true|false>";
const DOCS_GRAMMAR: &str = "!docs <path>";
const ADRS_GRAMMAR: &str = "!adrs <path>";

/// Define a constant. Redefinition is allowed; the last write wins.
pub(crate) fn parse_constant(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let name = line.require(1, CONSTANT_GRAMMAR)?.to_string();
    let value = line.require(2, CONSTANT_GRAMMAR)?.to_string();
    line.at_most(3, CONSTANT_GRAMMAR)?;
    if !is_valid_constant_name(&name) {
        return Err(ParseFailure::Identifier(format!(
            "Constant name \"{name}\" contains invalid characters"
        )));
    }
    p.constants.insert(name, value);
    Ok(None)
}

pub(crate) fn parse_identifiers(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let mode = match line.require(1, IDENTIFIERS_GRAMMAR)? {
        "flat" => IdentifierMode::Flat,
        "hierarchical" => IdentifierMode::Hierarchical,
        _ => return Err(ParseFailure::Expected(IDENTIFIERS_GRAMMAR)),
    };
    line.at_most(2, IDENTIFIERS_GRAMMAR)?;
    p.workspace.model.identifier_mode = mode;
    Ok(None)
}

pub(crate) fn parse_implied_relationships(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let value = parse_bool(
        "implied relationships flag",
        line.require(1, IMPLIED_RELATIONSHIPS_GRAMMAR)?,
    )?;
    line.at_most(2, IMPLIED_RELATIONSHIPS_GRAMMAR)?;
    p.workspace.model.implied_relationships = value;
    Ok(None)
}

/// Register a documentation directory. Content ingestion happens in
/// downstream tooling; the parser validates and records the path.
pub(crate) fn parse_docs(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if let Some(path) = directory_argument(p, line, DOCS_GRAMMAR)? {
        p.workspace.documentation.docs.push(path);
    }
    Ok(None)
}

/// Register an architecture decision record directory.
pub(crate) fn parse_adrs(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if let Some(path) = directory_argument(p, line, ADRS_GRAMMAR)? {
        p.workspace.documentation.adrs.push(path);
    }
    Ok(None)
}

fn directory_argument(
    p: &DslParser,
    line: &TokenLine,
    grammar: &'static str,
) -> Result<Option<PathBuf>, ParseFailure> {
    let target = line.require(1, grammar)?;
    line.at_most(2, grammar)?;
    if p.is_restricted() {
        return Ok(None);
    }
    let path = match p.current_file().and_then(std::path::Path::parent) {
        Some(dir) => dir.join(target),
        None => PathBuf::from(target),
    };
    if !path.is_dir() {
        return Err(ParseFailure::Io(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(Some(path))
}
