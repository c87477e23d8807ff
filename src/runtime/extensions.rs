// openbadges-validate/src/runtime/extensions.rs
// ============================================================================
// Module: Extension Validation
// Description: `VALIDATE_EXTENSION_NODE` handler and a default registry.
// Purpose: Dispatch extension nodes to their registered JSON-Schema.
// Dependencies: crate::{core, interfaces, runtime::driver}, jsonschema,
//               serde_json, std::sync
// ============================================================================

//! ## Overview
//! Resolves the target node, determines which extension type(s) apply, and
//! either fans out one task per candidate type or validates the single
//! candidate against its registered JSON-Schema.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;

use jsonschema::Draft;
use serde_json::Value;

use crate::core::action::Action;
use crate::core::error::HandlerError;
use crate::core::node::Node;
use crate::core::task::ExtensionParams;
use crate::core::task::TaskKind;
use crate::interfaces::ExtensionRegistry;
use crate::interfaces::ExtensionRegistryError;
use crate::interfaces::JsonLdCodec;
use crate::runtime::driver::Outcome;
use crate::runtime::reducer::EngineState;

/// An `ExtensionRegistry` backed by a fixed, caller-populated map of
/// extension type to `(schema, context)`.
#[derive(Debug, Default)]
pub struct InMemoryExtensionRegistry {
    extensions: Mutex<BTreeMap<String, (Value, Value)>>,
}

impl InMemoryExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { extensions: Mutex::new(BTreeMap::new()) }
    }

    /// Registers `extension_type` with its JSON-Schema and JSON-LD
    /// context.
    pub fn register(&self, extension_type: impl Into<String>, schema: Value, context: Value) {
        let mut extensions = self.extensions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        extensions.insert(extension_type.into(), (schema, context));
    }
}

impl ExtensionRegistry for InMemoryExtensionRegistry {
    fn known_types(&self) -> Vec<String> {
        let extensions = self.extensions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        extensions.keys().cloned().collect()
    }

    fn schema_for(&self, extension_type: &str) -> Result<Option<Value>, ExtensionRegistryError> {
        let extensions = self.extensions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(extensions.get(extension_type).map(|(schema, _)| schema.clone()))
    }

    fn context_for(&self, extension_type: &str) -> Result<Option<Value>, ExtensionRegistryError> {
        let extensions = self.extensions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(extensions.get(extension_type).map(|(_, context)| context.clone()))
    }
}

fn resolve_extension_node(state: &EngineState, params: &ExtensionParams) -> Result<Node, HandlerError> {
    if let Some(node_json) = &params.node_json {
        return Ok(Node::from_json(node_json));
    }
    if let Some(node_id) = &params.node_id {
        return state
            .nodes
            .get(node_id)
            .cloned()
            .ok_or_else(|| HandlerError::Prerequisite(format!("node {node_id} not present for extension validation")));
    }
    if let Some(path) = &params.node_path {
        return state.nodes.get(&path.as_str().into()).cloned().ok_or_else(|| {
            HandlerError::Prerequisite(format!("node path {path} not present for extension validation"))
        });
    }
    Err(HandlerError::Internal(
        "extension task has neither node_id, node_path, nor node_json".to_owned(),
    ))
}

fn describe_target(params: &ExtensionParams) -> String {
    params
        .node_id
        .as_ref()
        .map(|id| id.to_string())
        .or_else(|| params.node_path.clone())
        .unwrap_or_else(|| "<inline extension node>".to_owned())
}

/// Handles a `VALIDATE_EXTENSION_NODE` task.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when the target node cannot be
/// resolved, and [`HandlerError::Internal`] for malformed task parameters.
pub fn validate_extension_node(
    state: &EngineState,
    params: &ExtensionParams,
    registry: &dyn ExtensionRegistry,
    codec: &dyn JsonLdCodec,
) -> Result<Outcome, HandlerError> {
    let node = resolve_extension_node(state, params)?;
    let target = describe_target(params);

    let candidate_types: BTreeSet<String> = if let Some(type_to_test) = &params.type_to_test {
        [type_to_test.clone()].into_iter().collect()
    } else {
        let declared: BTreeSet<String> = node.type_list().into_iter().collect();
        let known: BTreeSet<String> = registry.known_types().into_iter().collect();
        declared.intersection(&known).cloned().collect()
    };

    if candidate_types.is_empty() {
        return Ok(Outcome::failure(format!(
            "Could not determine extension type to test for node {target}"
        )));
    }

    if candidate_types.len() > 1 {
        let actions = candidate_types
            .into_iter()
            .map(|extension_type| Action::AddTask {
                kind: TaskKind::ValidateExtensionNode(ExtensionParams {
                    node_id: params.node_id.clone(),
                    node_path: params.node_path.clone(),
                    node_json: params.node_json.clone(),
                    type_to_test: Some(extension_type),
                }),
            })
            .collect();
        return Ok(Outcome::success_with(
            format!("Multiple extension types declared for node {target}; split into per-type tasks"),
            actions,
        ));
    }

    #[allow(clippy::unwrap_used, reason = "len() == 1 was just checked above")]
    let extension_type = candidate_types.into_iter().next().unwrap();

    let schema = registry
        .schema_for(&extension_type)
        .map_err(|err| HandlerError::Internal(err.to_string()))?
        .ok_or_else(|| HandlerError::Prerequisite(format!("no schema registered for extension type {extension_type}")))?;
    let extension_context = registry
        .context_for(&extension_type)
        .map_err(|err| HandlerError::Internal(err.to_string()))?
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    let ob_context = Value::String("https://w3id.org/openbadges/v2".to_owned());
    let compacted = codec
        .compact(&node.to_json(), &[ob_context, extension_context])
        .map_err(|err| HandlerError::Internal(err.to_string()))?;

    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| HandlerError::Internal(format!("invalid extension schema for {extension_type}: {err}")))?;

    match compiled.validate(&compacted) {
        Ok(()) => Ok(Outcome::success(format!("Extension node {target} validates against {extension_type}"))),
        Err(error) => Ok(Outcome::failure(format!(
            "Extension node {target} failed {extension_type} schema validation: {error}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::InMemoryExtensionRegistry;
    use super::validate_extension_node;
    use crate::core::node::Node;
    use crate::core::task::ExtensionParams;
    use crate::runtime::jsonld::ObV2Context;
    use crate::runtime::reducer::EngineState;

    #[test]
    fn no_matching_extension_type_fails() {
        let state = EngineState::default();
        let registry = InMemoryExtensionRegistry::new();
        let codec = ObV2Context;
        let params = ExtensionParams {
            node_id: None,
            node_path: None,
            node_json: Some(json!({"type": ["Extension"]})),
            type_to_test: None,
        };
        let outcome = validate_extension_node(&state, &params, &registry, &codec).unwrap_or_else(|err| {
            panic!("unexpected handler error: {err}")
        });
        assert!(!outcome.success);
    }

    #[test]
    fn a_single_matching_type_validates_against_its_schema() {
        let state = EngineState::default();
        let registry = InMemoryExtensionRegistry::new();
        registry.register(
            "extensions:ExampleExtension",
            json!({"type": "object", "required": ["exampleProperty"]}),
            json!({}),
        );
        let codec = ObV2Context;
        let params = ExtensionParams {
            node_id: None,
            node_path: None,
            node_json: Some(json!({
                "type": ["Extension", "extensions:ExampleExtension"],
                "exampleProperty": "present",
            })),
            type_to_test: None,
        };
        let outcome = validate_extension_node(&state, &params, &registry, &codec).unwrap_or_else(|err| {
            panic!("unexpected handler error: {err}")
        });
        assert!(outcome.success);
    }
}
