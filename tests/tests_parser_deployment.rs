//! Parser tests - deployment model
//!
//! Environments, nodes, infrastructure nodes, and element instances.

use blueprint::workspace::{ElementKind, Workspace};
use blueprint::DslParser;

fn parse(source: &str) -> Workspace {
    let mut parser = DslParser::new();
    parser.parse_str(source).unwrap();
    parser.into_workspace()
}

const DEPLOYMENT: &str = r#"
workspace {
    model {
        s = softwareSystem "S" {
            db = container "Database"
        }
        deploymentEnvironment "Live" {
            aws = deploymentNode "AWS" "Cloud" "AWS" {
                ec2 = deploymentNode "EC2" "" "Ubuntu" {
                    softwareSystemInstance s
                    containerInstance db
                }
                lb = infrastructureNode "ELB" "Load balancer" "ALB"
            }
        }
    }
}
"#;

#[test]
fn test_deployment_node_hierarchy() {
    let workspace = parse(DEPLOYMENT);

    let aws = workspace
        .model
        .find_element(ElementKind::DeploymentNode, "AWS")
        .unwrap();
    let ec2 = workspace
        .model
        .find_element(ElementKind::DeploymentNode, "EC2")
        .unwrap();
    assert_eq!(aws.parent, None);
    assert_eq!(aws.environment.as_deref(), Some("Live"));
    assert_eq!(ec2.parent, Some(aws.id));
    assert_eq!(ec2.environment.as_deref(), Some("Live"));
    assert_eq!(ec2.technology.as_deref(), Some("Ubuntu"));
}

#[test]
fn test_infrastructure_node_inherits_environment() {
    let workspace = parse(DEPLOYMENT);

    let lb = workspace
        .model
        .find_element(ElementKind::InfrastructureNode, "ELB")
        .unwrap();
    let aws = workspace
        .model
        .find_element(ElementKind::DeploymentNode, "AWS")
        .unwrap();
    assert_eq!(lb.parent, Some(aws.id));
    assert_eq!(lb.environment.as_deref(), Some("Live"));
    assert_eq!(lb.technology.as_deref(), Some("ALB"));
}

#[test]
fn test_instances_reference_their_elements() {
    let workspace = parse(DEPLOYMENT);

    let system = workspace
        .model
        .find_element(ElementKind::SoftwareSystem, "S")
        .unwrap();
    let db = workspace
        .model
        .find_element(ElementKind::Container, "Database")
        .unwrap();
    let system_instance = workspace
        .model
        .find_element(ElementKind::SoftwareSystemInstance, "S")
        .unwrap();
    let db_instance = workspace
        .model
        .find_element(ElementKind::ContainerInstance, "Database")
        .unwrap();

    assert_eq!(system_instance.instance_of, Some(system.id));
    assert_eq!(system_instance.instance_id, Some(1));
    assert_eq!(system_instance.environment.as_deref(), Some("Live"));
    assert_eq!(db_instance.instance_of, Some(db.id));
    assert!(db_instance.has_tag("Container Instance"));
    // instances copy the tags of the element they deploy
    assert!(db_instance.has_tag("Container"));
}

#[test]
fn test_second_instance_gets_next_ordinal() {
    let workspace = parse(
        r#"
        workspace {
            model {
                s = softwareSystem "S"
                deploymentEnvironment "Live" {
                    deploymentNode "A" {
                        softwareSystemInstance s
                    }
                    deploymentNode "B" {
                        softwareSystemInstance s
                    }
                }
            }
        }
        "#,
    );

    let ordinals: Vec<_> = workspace
        .model
        .elements()
        .filter(|e| e.kind == ElementKind::SoftwareSystemInstance)
        .map(|e| e.instance_id)
        .collect();
    assert_eq!(ordinals, vec![Some(1), Some(2)]);
}

#[test]
fn test_deployment_node_instance_count() {
    let workspace = parse(
        r#"
        workspace {
            model {
                deploymentEnvironment "Live" {
                    deploymentNode "Web Farm" "" "Ubuntu" "Farm" 4 {
                    }
                }
            }
        }
        "#,
    );

    let farm = workspace
        .model
        .find_element(ElementKind::DeploymentNode, "Web Farm")
        .unwrap();
    assert_eq!(farm.instances, Some(4));
    assert!(farm.has_tag("Farm"));
}

#[test]
fn test_relationship_between_deployment_elements() {
    let workspace = parse(
        r#"
        workspace {
            model {
                deploymentEnvironment "Live" {
                    a = deploymentNode "A" {
                        lb = infrastructureNode "LB"
                    }
                    b = deploymentNode "B"
                    lb -> b "Routes to"
                }
            }
        }
        "#,
    );

    assert_eq!(workspace.model.relationships().count(), 1);
}

#[test]
fn test_instance_of_wrong_kind_fails() {
    let mut parser = DslParser::new();
    let err = parser
        .parse_str(
            r#"
            workspace {
                model {
                    u = person "User"
                    deploymentEnvironment "Live" {
                        deploymentNode "A" {
                            softwareSystemInstance u
                        }
                    }
                }
            }
            "#,
        )
        .unwrap_err();
    assert!(err.message.contains("is not a software system"));
    assert_eq!(err.line_number, 7);
}
