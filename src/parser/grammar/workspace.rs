//! Workspace structure: the header, the top-level blocks, and users.

use crate::workspace::{Role, User};

use super::super::context::Context;
use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};
use super::require_block;

const WORKSPACE_GRAMMAR: &str = "workspace [name] [description]";
const USER_GRAMMAR: &str = "<username> <read|write|read-write>";

pub(crate) fn parse_workspace(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if !line.block_start() {
        return Err(ParseFailure::Expected(WORKSPACE_GRAMMAR));
    }
    line.at_most(3, WORKSPACE_GRAMMAR)?;
    p.workspace.name = line.get(1).map(str::to_string);
    p.workspace.description = line.get(2).map(str::to_string);
    p.stack.push(Context::Workspace);
    Ok(None)
}

pub(crate) fn parse_model(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Model { group: None });
    Ok(None)
}

pub(crate) fn parse_views(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Views);
    Ok(None)
}

pub(crate) fn parse_configuration(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Configuration);
    Ok(None)
}

pub(crate) fn parse_users_block(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    require_block(line)?;
    p.stack.push(Context::Users);
    Ok(None)
}

/// One line inside a `users` block.
pub(crate) fn parse_user(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    let username = line.require(0, USER_GRAMMAR)?.to_string();
    let role = match line.require(1, USER_GRAMMAR)? {
        "read" => Role::ReadOnly,
        "write" | "read-write" => Role::ReadWrite,
        other => {
            return Err(crate::workspace::ModelError::invalid_value("role", other).into());
        }
    };
    line.at_most(2, USER_GRAMMAR)?;
    p.workspace.configuration.users.push(User { username, role });
    Ok(None)
}
