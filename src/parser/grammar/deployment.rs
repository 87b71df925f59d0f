//! Deployment elements: environments, nodes, infrastructure, instances.

use crate::workspace::ElementId;

use super::super::context::Context;
use super::super::error::ParseFailure;
use super::super::tokens::TokenLine;
use super::super::{Binding, DslParser};
use super::parse_u32;

const ENVIRONMENT_GRAMMAR: &str = "deploymentEnvironment <name>";
const NODE_GRAMMAR: &str =
    "deploymentNode <name> [description] [technology] [tags] [instances]";
const INFRASTRUCTURE_GRAMMAR: &str = "infrastructureNode <name> [description] [technology] [tags]";
const SYSTEM_INSTANCE_GRAMMAR: &str = "softwareSystemInstance <identifier> [tags]";
const CONTAINER_INSTANCE_GRAMMAR: &str = "containerInstance <identifier> [tags]";

pub(crate) fn parse_environment(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    if !line.block_start() {
        return Err(ParseFailure::Expected(ENVIRONMENT_GRAMMAR));
    }
    let name = line.require(1, ENVIRONMENT_GRAMMAR)?.to_string();
    line.at_most(2, ENVIRONMENT_GRAMMAR)?;
    p.stack.push(Context::DeploymentEnvironment { name });
    Ok(None)
}

pub(crate) fn parse_node(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(6, NODE_GRAMMAR)?;
    let name = line.require(1, NODE_GRAMMAR)?.to_string();
    let description = line.get(2).map(str::to_string);
    let technology = line.get(3).map(str::to_string);

    let (environment, parent) = match p.stack.peek() {
        Some(Context::DeploymentEnvironment { name }) => (name.clone(), None),
        Some(Context::DeploymentNode { element }) => {
            let environment = p
                .workspace
                .model
                .element(*element)
                .environment
                .clone()
                .unwrap_or_default();
            (environment, Some(*element))
        }
        _ => {
            return Err(ParseFailure::Internal(
                "expected a deployment context".to_string(),
            ));
        }
    };

    let id = p
        .workspace
        .model
        .add_deployment_node(environment, parent, name, description, technology)?;
    if let Some(tags) = line.get(4) {
        p.workspace.model.element_mut(id).add_tags(tags);
    }
    if let Some(instances) = line.get(5) {
        p.workspace.model.element_mut(id).instances =
            Some(parse_u32("instance count", instances)?);
    }
    if line.block_start() {
        p.stack.push(Context::DeploymentNode { element: id });
    }
    Ok(Some(Binding::Element(id)))
}

pub(crate) fn parse_infrastructure_node(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(5, INFRASTRUCTURE_GRAMMAR)?;
    let parent = enclosing_node(p)?;
    let name = line.require(1, INFRASTRUCTURE_GRAMMAR)?.to_string();
    let description = line.get(2).map(str::to_string);
    let technology = line.get(3).map(str::to_string);
    let id = p
        .workspace
        .model
        .add_infrastructure_node(parent, name, description, technology)?;
    if let Some(tags) = line.get(4) {
        p.workspace.model.element_mut(id).add_tags(tags);
    }
    if line.block_start() {
        p.stack.push(Context::InfrastructureNode { element: id });
    }
    Ok(Some(Binding::Element(id)))
}

pub(crate) fn parse_software_system_instance(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(3, SYSTEM_INSTANCE_GRAMMAR)?;
    let node = enclosing_node(p)?;
    let system = p.find_element(line.require(1, SYSTEM_INSTANCE_GRAMMAR)?)?;
    let id = p.workspace.model.add_software_system_instance(node, system)?;
    if let Some(tags) = line.get(2) {
        p.workspace.model.element_mut(id).add_tags(tags);
    }
    if line.block_start() {
        p.stack.push(Context::SoftwareSystemInstance { element: id });
    }
    Ok(Some(Binding::Element(id)))
}

pub(crate) fn parse_container_instance(
    p: &mut DslParser,
    line: &TokenLine,
) -> Result<Option<Binding>, ParseFailure> {
    line.at_most(3, CONTAINER_INSTANCE_GRAMMAR)?;
    let node = enclosing_node(p)?;
    let container = p.find_element(line.require(1, CONTAINER_INSTANCE_GRAMMAR)?)?;
    let id = p.workspace.model.add_container_instance(node, container)?;
    if let Some(tags) = line.get(2) {
        p.workspace.model.element_mut(id).add_tags(tags);
    }
    if line.block_start() {
        p.stack.push(Context::ContainerInstance { element: id });
    }
    Ok(Some(Binding::Element(id)))
}

fn enclosing_node(p: &DslParser) -> Result<ElementId, ParseFailure> {
    match p.stack.peek() {
        Some(Context::DeploymentNode { element }) => Ok(*element),
        _ => Err(ParseFailure::Internal(
            "expected a deployment node context".to_string(),
        )),
    }
}
