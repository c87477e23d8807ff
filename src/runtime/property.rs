// openbadges-validate/src/runtime/property.rs
// ============================================================================
// Module: Property Validation Tasks
// Description: The four node/property-shaped task handlers.
// Purpose: Implement validate_property, validate_rdf_type_property,
//          detect_and_validate_node_class, validate_expected_node_class.
// Dependencies: crate::{core, interfaces, runtime::{driver, primitives,
//               reducer}}, serde_json
// ============================================================================

//! ## Overview
//! These four handlers are the hardest part of the engine: primitive type
//! checking plus cross-node reference resolution, and JSON-LD-aware type
//! normalization with defaults. Each returns an
//! [`Outcome`] rather than mutating state directly; the driver applies the
//! resulting actions.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde_json::Value;

use crate::core::action::Action;
use crate::core::error::HandlerError;
use crate::core::identifiers::NodeId;
use crate::core::ob_classes::ObClass;
use crate::core::task::PropertyParams;
use crate::core::task::RdfTypeParams;
use crate::core::task::TaskKind;
use crate::core::value_types::ValueType;
use crate::core::class_spec;
use crate::interfaces::JsonLdCodec;
use crate::runtime::driver::Outcome;
use crate::runtime::driver::abbreviate;
use crate::runtime::primitives;
use crate::runtime::reducer::EngineState;

fn values_to_test(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

fn all_null(values: &[Value]) -> bool {
    values.iter().all(Value::is_null)
}

/// Handles `VALIDATE_PROPERTY` (and, via [`validate_rdf_type_property`],
/// the property half of `VALIDATE_RDF_TYPE_PROPERTY`).
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when `params.node_id` is not in
/// the store.
pub fn validate_property(
    state: &EngineState,
    params: &PropertyParams,
    codec: &dyn JsonLdCodec,
) -> Result<Outcome, HandlerError> {
    let node = state
        .nodes
        .get(&params.node_id)
        .ok_or_else(|| HandlerError::Prerequisite(format!("node {} not present", params.node_id)))?;

    let Some(raw_value) = node.get(&params.prop_name) else {
        return Ok(if params.required {
            Outcome::failure(format!("Required property {} not present on node {}", params.prop_name, params.node_id))
        } else {
            Outcome::success(format!("Optional property {} not present on node {}", params.prop_name, params.node_id))
        });
    };

    let values = values_to_test(raw_value);
    if values.is_empty() || all_null(&values) {
        return Ok(if params.required {
            Outcome::failure(format!("Required property {} not present on node {}", params.prop_name, params.node_id))
        } else {
            Outcome::success(format!("Optional property {} is null on node {}", params.prop_name, params.node_id))
        });
    }

    if !params.many && values.len() > 1 {
        return Ok(Outcome::failure(format!(
            "Property {} on node {} has more than the single allowed value",
            params.prop_name, params.node_id
        )));
    }

    let mut actions = Vec::new();
    for value in &values {
        if params.prop_type == ValueType::Id {
            let Some(candidate) = value.as_str() else {
                return Ok(Outcome::failure(format!(
                    "ID property {} value {} on node {} not in IRI format",
                    params.prop_name,
                    abbreviate(&value.to_string()),
                    params.node_id
                )));
            };
            if !primitives::is_valid(ValueType::Iri, value, codec) {
                return Ok(Outcome::failure(format!(
                    "ID property {} value {} on node {} not in IRI format",
                    params.prop_name,
                    abbreviate(candidate),
                    params.node_id
                )));
            }
            if params.fetch {
                actions.push(Action::AddTask {
                    kind: TaskKind::FetchHttpNode {
                        url: candidate.to_owned(),
                        expected_class: params.expected_class,
                    },
                });
                continue;
            }
            let target_id = NodeId::new(candidate);
            if state.nodes.contains(&target_id) {
                actions.push(Action::AddTask {
                    kind: TaskKind::ValidateExpectedNodeClass {
                        node_id: target_id,
                        expected_class: params.expected_class,
                    },
                });
            } else if params.allow_remote_url && primitives::is_valid(ValueType::Url, value, codec) {
                // Acceptable remote reference the engine does not resolve locally.
            } else {
                return Ok(Outcome::failure(format!(
                    "Property {} value {} on node {} not in URI format or no known local node",
                    params.prop_name,
                    abbreviate(candidate),
                    params.node_id
                )));
            }
        } else if !primitives::is_valid(params.prop_type, value, codec) {
            return Ok(Outcome::failure(format!(
                "{:?} property {} value {} on node {} not valid",
                params.prop_type,
                params.prop_name,
                abbreviate(&value.to_string()),
                params.node_id
            )));
        }
    }

    Ok(Outcome::success_with(
        format!("Property {} on node {} is valid", params.prop_name, params.node_id),
        actions,
    ))
}

/// Handles `VALIDATE_RDF_TYPE_PROPERTY`.
///
/// # Errors
///
/// Propagates [`validate_property`]'s errors, and returns
/// [`HandlerError::Internal`] if the node vanished between the property
/// check succeeding and the type-list check (a reducer invariant
/// violation).
pub fn validate_rdf_type_property(
    state: &EngineState,
    params: &RdfTypeParams,
    codec: &dyn JsonLdCodec,
) -> Result<Outcome, HandlerError> {
    let outcome = validate_property(state, &params.property, codec)?;
    if !outcome.success {
        return Ok(outcome);
    }

    let node_id = &params.property.node_id;
    let node = state
        .nodes
        .get(node_id)
        .ok_or_else(|| HandlerError::Internal(format!("node {node_id} vanished mid-validation")))?;

    if node.get("type").is_none() {
        if let Some(default) = &params.default {
            let patch: BTreeMap<String, Value> = [("type".to_owned(), Value::String(default.clone()))]
                .into_iter()
                .collect();
            let mut actions = outcome.actions;
            actions.push(Action::PatchNode { node_id: node_id.clone(), patch });
            return Ok(Outcome::success_with(
                format!("Applied default type {default} to node {node_id}"),
                actions,
            ));
        }
    }

    if !params.must_contain_one.is_empty() {
        let declared: BTreeSet<&str> = node.type_list().iter().map(String::as_str).collect();
        let allowed: BTreeSet<&str> = params.must_contain_one.iter().map(String::as_str).collect();
        if declared.is_disjoint(&allowed) {
            return Ok(Outcome::failure(format!(
                "Node {node_id} does not have type among allowed values: {:?}",
                params.must_contain_one
            )));
        }
    }

    Ok(Outcome::success_with(format!("Node {node_id} type is valid"), outcome.actions))
}

/// Handles `DETECT_AND_VALIDATE_NODE_CLASS`.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when `node_id` is not in the
/// store.
pub fn detect_and_validate_node_class(state: &EngineState, node_id: &NodeId) -> Result<Outcome, HandlerError> {
    let node = state
        .nodes
        .get(node_id)
        .ok_or_else(|| HandlerError::Prerequisite(format!("node {node_id} not present")))?;

    // Only a scalar `type` participates in class detection; an array-typed
    // node is left with node_class = None, matching the source behavior.
    let node_class = match node.get("type") {
        Some(Value::String(type_str)) => ObClass::from_type_str(type_str),
        _ => None,
    };

    let actions = class_spec::get_validation_actions(node_id, node_class);
    let message = node_class.map_or_else(
        || format!("Node {node_id} has no detectable class"),
        |class| format!("Detected node {node_id} as {class}"),
    );
    Ok(Outcome::success_with(message, actions))
}

/// Handles `VALIDATE_EXPECTED_NODE_CLASS`.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when `node_id` is not in the
/// store.
pub fn validate_expected_node_class(
    state: &EngineState,
    node_id: &NodeId,
    expected_class: Option<ObClass>,
) -> Result<Outcome, HandlerError> {
    state.nodes.get(node_id).ok_or_else(|| HandlerError::Prerequisite(format!("node {node_id} not present")))?;
    let actions = class_spec::get_validation_actions(node_id, expected_class);
    let message = expected_class.map_or_else(
        || format!("Node {node_id} validated with no expected class"),
        |class| format!("Node {node_id} validated against expected class {class}"),
    );
    Ok(Outcome::success_with(message, actions))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::detect_and_validate_node_class;
    use super::validate_expected_node_class;
    use super::validate_property;
    use super::validate_rdf_type_property;
    use crate::core::identifiers::NodeId;
    use crate::core::node::Node;
    use crate::core::ob_classes::ObClass;
    use crate::core::task::PropertyParams;
    use crate::core::task::RdfTypeParams;
    use crate::core::value_types::ValueType;
    use crate::runtime::jsonld::ObV2Context;
    use crate::runtime::reducer::EngineState;

    fn state_with(node_id: &str, node_json: Value) -> EngineState {
        let mut state = EngineState::new();
        state.nodes.insert(NodeId::new(node_id), Node::from_json(&node_json));
        state
    }

    #[test]
    fn missing_required_property_fails() {
        let state = state_with("http://e/bc1", json!({"id": "http://e/bc1"}));
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
        let codec = ObV2Context;
        let outcome = validate_property(&state, &params, &codec).unwrap_or_else(|err| panic!("{err}"));
        assert!(!outcome.success);
        assert!(outcome.message.contains("Required property name"));
    }

    #[test]
    fn missing_optional_property_succeeds() {
        let state = state_with("http://e/bc1", json!({"id": "http://e/bc1"}));
        let params = PropertyParams {
            node_id: NodeId::new("http://e/bc1"),
            node_class: Some(ObClass::BadgeClass),
            prop_name: "description".to_owned(),
            prop_type: ValueType::Text,
            required: false,
            many: false,
            expected_class: None,
            fetch: false,
            allow_remote_url: false,
        };
        let codec = ObV2Context;
        let outcome = validate_property(&state, &params, &codec).unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
    }

    #[test]
    fn id_property_emits_validate_expected_node_class_when_target_is_local() {
        let mut state = state_with(
            "http://e/a1",
            json!({"id": "http://e/a1", "recipient": "_:b0"}),
        );
        state.nodes.insert(NodeId::new("_:b0"), Node::from_json(&json!({"id": "_:b0"})));
        let params = PropertyParams {
            node_id: NodeId::new("http://e/a1"),
            node_class: Some(ObClass::Assertion),
            prop_name: "recipient".to_owned(),
            prop_type: ValueType::Id,
            required: true,
            many: false,
            expected_class: Some(ObClass::IdentityObject),
            fetch: false,
            allow_remote_url: false,
        };
        let codec = ObV2Context;
        let outcome = validate_property(&state, &params, &codec).unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
        assert_eq!(outcome.actions.len(), 1);
    }

    #[test]
    fn id_property_fetch_emits_fetch_http_node() {
        let state = state_with("http://e/bc1", json!({"id": "http://e/bc1", "issuer": "http://e/issuer"}));
        let params = PropertyParams {
            node_id: NodeId::new("http://e/bc1"),
            node_class: Some(ObClass::BadgeClass),
            prop_name: "issuer".to_owned(),
            prop_type: ValueType::Id,
            required: true,
            many: false,
            expected_class: Some(ObClass::Profile),
            fetch: true,
            allow_remote_url: false,
        };
        let codec = ObV2Context;
        let outcome = validate_property(&state, &params, &codec).unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
        assert_eq!(outcome.actions.len(), 1);
    }

    #[test]
    fn rdf_type_applies_default_when_type_is_absent() {
        let state = state_with("http://e/crit1", json!({"id": "http://e/crit1", "narrative": "Do the thing"}));
        let params = RdfTypeParams {
            property: PropertyParams {
                node_id: NodeId::new("http://e/crit1"),
                node_class: Some(ObClass::Criteria),
                prop_name: "type".to_owned(),
                prop_type: ValueType::RdfType,
                required: false,
                many: true,
                expected_class: None,
                fetch: false,
                allow_remote_url: false,
            },
            must_contain_one: Vec::new(),
            default: Some("Criteria".to_owned()),
        };
        let codec = ObV2Context;
        let outcome = validate_rdf_type_property(&state, &params, &codec).unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
        assert_eq!(outcome.actions.len(), 1);
    }

    #[test]
    fn rdf_type_rejects_types_outside_must_contain_one() {
        let state = state_with("http://e/a1", json!({"id": "http://e/a1", "type": "NotAnAssertion"}));
        let params = RdfTypeParams {
            property: PropertyParams {
                node_id: NodeId::new("http://e/a1"),
                node_class: Some(ObClass::Assertion),
                prop_name: "type".to_owned(),
                prop_type: ValueType::RdfType,
                required: true,
                many: true,
                expected_class: None,
                fetch: false,
                allow_remote_url: false,
            },
            must_contain_one: vec!["Assertion".to_owned()],
            default: None,
        };
        let codec = ObV2Context;
        let outcome = validate_rdf_type_property(&state, &params, &codec).unwrap_or_else(|err| panic!("{err}"));
        assert!(!outcome.success);
    }

    #[test]
    fn detect_and_validate_node_class_finds_no_class_for_array_typed_nodes() {
        let state = state_with("http://e/a1", json!({"id": "http://e/a1", "type": ["Assertion"]}));
        let outcome = detect_and_validate_node_class(&state, &NodeId::new("http://e/a1"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn detect_and_validate_node_class_finds_scalar_class() {
        let state = state_with("http://e/a1", json!({"id": "http://e/a1", "type": "Assertion"}));
        let outcome = detect_and_validate_node_class(&state, &NodeId::new("http://e/a1"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
        assert!(!outcome.actions.is_empty());
    }

    #[test]
    fn validate_expected_node_class_fails_prerequisite_on_missing_node() {
        let state = EngineState::new();
        let result = validate_expected_node_class(&state, &NodeId::new("http://e/missing"), None);
        assert!(result.is_err());
    }
}
