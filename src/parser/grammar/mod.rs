//! Production parsers, one module per construct family.
//!
//! Every parser takes the shared engine state and the token line with the
//! trailing `{` already stripped, and returns the element or relationship
//! it produced (for identifier binding) or `None` for pure side effects.
//! The dispatcher guarantees the context the parser requires is on top of
//! the stack; a parser finding otherwise reports an internal error.

pub(crate) mod deployment;
pub(crate) mod directives;
pub(crate) mod elements;
pub(crate) mod relationships;
pub(crate) mod styles;
pub(crate) mod views;
pub(crate) mod workspace;

use super::error::ParseFailure;
use super::tokens::TokenLine;

/// Blocks that carry no tokens of their own: `model {`, `styles {`, ...
pub(crate) fn require_block(line: &TokenLine) -> Result<(), ParseFailure> {
    if !line.block_start() || line.len() != 1 {
        return Err(ParseFailure::UnexpectedTokens);
    }
    Ok(())
}

pub(crate) fn parse_bool(what: &'static str, value: &str) -> Result<bool, ParseFailure> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(crate::workspace::ModelError::invalid_value(what, other).into()),
    }
}

pub(crate) fn parse_u32(what: &'static str, value: &str) -> Result<u32, ParseFailure> {
    value
        .parse()
        .map_err(|_| crate::workspace::ModelError::invalid_value(what, value).into())
}
