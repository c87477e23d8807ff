// openbadges-validate/tests/scenarios.rs
// ============================================================================
// Module: End-to-End Scenario Tests
// Description: Literal scenarios S1-S6 against the full driver loop.
// Purpose: Exercise the reducer, class validator registry, and task handlers
//          together, the way unit tests on individual handlers cannot.
// Dependencies: openbadges_validate
// ============================================================================

//! ## Overview
//! Builds a small graph by hand for each scenario and runs it through
//! [`Driver::run`], checking the resulting [`Report`].

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions are permitted."
)]

use openbadges_validate::Driver;
use openbadges_validate::EngineConfig;
use openbadges_validate::InMemoryExtensionRegistry;
use openbadges_validate::Node;
use openbadges_validate::NodeId;
use openbadges_validate::ObV2Context;
use openbadges_validate::StaticHttpNodeFetcher;
use serde_json::json;

fn full_graph() -> Vec<(NodeId, Node)> {
    vec![
        (
            NodeId::new("http://e/a1"),
            Node::from_json(&json!({
                "id": "http://e/a1",
                "type": "Assertion",
                "recipient": "_:b0",
                "badge": "http://e/bc1",
                "verification": "_:b1",
                "issuedOn": "2018-01-01T00:00:00Z",
            })),
        ),
        (
            NodeId::new("_:b0"),
            Node::from_json(&json!({"type": "email", "identity": "a@b.c", "hashed": false})),
        ),
        (
            NodeId::new("http://e/bc1"),
            Node::from_json(&json!({
                "id": "http://e/bc1",
                "type": "BadgeClass",
                "issuer": "http://e/issuer1",
                "name": "Test Badge",
                "description": "A badge for testing",
                "image": "https://e.example/badge.png",
                "criteria": "http://e/criteria1",
            })),
        ),
        (
            NodeId::new("http://e/issuer1"),
            Node::from_json(&json!({
                "id": "http://e/issuer1",
                "type": "Profile",
                "name": "Test Issuer",
                "url": "https://issuer.example",
                "email": "issuer@example.com",
            })),
        ),
        (
            NodeId::new("http://e/criteria1"),
            Node::from_json(&json!({"id": "http://e/criteria1", "narrative": "Do the thing"})),
        ),
        (NodeId::new("_:b1"), Node::from_json(&json!({"type": "HostedBadge"}))),
    ]
}

fn run(nodes: Vec<(NodeId, Node)>) -> openbadges_validate::Report {
    let fetcher = StaticHttpNodeFetcher::new();
    for (node_id, node) in &nodes {
        if node_id.as_str() == "http://e/bc1" || node_id.as_str() == "http://e/issuer1" {
            fetcher.register(node_id.as_str(), node.clone());
        }
    }
    let driver = Driver::seeded(
        nodes,
        &NodeId::new("http://e/a1"),
        EngineConfig::default(),
        fetcher,
        InMemoryExtensionRegistry::new(),
        ObV2Context,
    );
    driver.run().unwrap_or_else(|err| panic!("engine halted: {err}"))
}

#[test]
fn s1_minimal_valid_assertion_is_valid_and_checks_hosted_scope() {
    let report = run(full_graph());
    assert!(report.valid, "expected valid report, got: {report:#?}");
    assert!(
        report.tasks.iter().any(|task| task.name == "HOSTED_ID_IN_VERIFICATION_SCOPE"),
        "expected a HOSTED_ID_IN_VERIFICATION_SCOPE task, got: {report:#?}"
    );
}

#[test]
fn s2_missing_required_property_fails_validation() {
    let mut nodes = full_graph();
    let badge_class = nodes.iter_mut().find(|(id, _)| id.as_str() == "http://e/bc1").expect("badge class seeded");
    badge_class.1 = Node::from_json(&json!({
        "id": "http://e/bc1",
        "type": "BadgeClass",
        "issuer": "http://e/issuer1",
        "description": "A badge for testing",
        "image": "https://e.example/badge.png",
        "criteria": "http://e/criteria1",
    }));
    let report = run(nodes);
    assert!(!report.valid);
    let failed = report
        .tasks
        .iter()
        .find(|task| task.name == "VALIDATE_PROPERTY" && task.prop_name.as_deref() == Some("name"))
        .expect("a VALIDATE_PROPERTY task for name");
    assert!(!failed.success);
    assert!(failed.message.contains("Required property name not present"));
}

#[test]
fn s3_criteria_type_default_is_applied_via_patch_node() {
    let report = run(full_graph());
    assert!(report.valid);
    let criteria_type_task = report
        .tasks
        .iter()
        .find(|task| task.name == "VALIDATE_RDF_TYPE_PROPERTY" && task.node_id.as_ref().map(NodeId::as_str) == Some("http://e/criteria1"))
        .expect("a type validator task for the criteria node");
    assert!(criteria_type_task.success);
}

#[test]
fn s4_hash_hashed_mismatch_fails() {
    let mut nodes = full_graph();
    let identity = nodes.iter_mut().find(|(id, _)| id.as_str() == "_:b0").expect("identity object seeded");
    identity.1 = Node::from_json(&json!({"type": "email", "identity": "a@b.c", "hashed": true}));
    let report = run(nodes);
    assert!(!report.valid);
    let failed = report
        .tasks
        .iter()
        .find(|task| task.name == "IDENTITY_OBJECT_PROPERTY_DEPENDENCIES")
        .expect("an identity object dependency task");
    assert!(!failed.success);
    assert!(failed.message.contains("must match known hash style"));
}

#[test]
fn s5_future_issued_on_fails() {
    let mut nodes = full_graph();
    let assertion = nodes.iter_mut().find(|(id, _)| id.as_str() == "http://e/a1").expect("assertion seeded");
    assertion.1 = Node::from_json(&json!({
        "id": "http://e/a1",
        "type": "Assertion",
        "recipient": "_:b0",
        "badge": "http://e/bc1",
        "verification": "_:b1",
        "issuedOn": "2999-01-01T00:00:00Z",
    }));
    let report = run(nodes);
    assert!(!report.valid);
    let failed = report
        .tasks
        .iter()
        .find(|task| task.name == "ASSERTION_TIMESTAMP_CHECKS")
        .expect("a timestamp check task");
    assert!(!failed.success);
    assert!(failed.message.contains("future"));
}

#[test]
fn s6_duplicate_validate_property_actions_are_suppressed() {
    use openbadges_validate::Action;
    use openbadges_validate::ObClass;
    use openbadges_validate::PropertyParams;
    use openbadges_validate::TaskKind;
    use openbadges_validate::ValueType;
    use openbadges_validate::runtime::EngineState;
    use openbadges_validate::runtime::reduce;

    let params = PropertyParams {
        node_id: NodeId::new("http://e/bc1"),
        node_class: Some(ObClass::BadgeClass),
        prop_name: "name".to_owned(),
        prop_type: ValueType::Text,
        required: true,
        many: false,
        expected_class: None,
        fetch: false,
        allow_remote_url: false,
    };
    let mut state = EngineState::new();
    let before = state.tasks.len();
    state = reduce(state, Action::AddTask { kind: TaskKind::ValidateProperty(params.clone()) });
    state = reduce(state, Action::AddTask { kind: TaskKind::ValidateProperty(params) });
    assert_eq!(state.tasks.len(), before + 1);
}
