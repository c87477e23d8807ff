// openbadges-validate/src/runtime/class_tasks.rs
// ============================================================================
// Module: Class-Dependency Tasks
// Description: The five class-dependency handlers plus FETCH_HTTP_NODE and
//              the hosted-id verification-scope check.
// Purpose: Implement each class's cross-property dependency rules.
// Dependencies: crate::{core, interfaces, runtime::{driver, primitives,
//               reducer}}, serde_json, time
// ============================================================================

//! ## Overview
//! Unlike the property handlers, these checks reach across more than one
//! property on a single node (or across a node reference), so they are not
//! expressible as a single `ValidatorSpec` entry; the class validator table
//! declares them as standalone task specs instead.

use serde_json::Value;

use crate::core::action::Action;
use crate::core::error::HandlerError;
use crate::core::identifiers::NodeId;
use crate::core::node::Node;
use crate::core::ob_classes::ObClass;
use crate::core::task::TaskKind;
use crate::interfaces::HttpNodeFetcher;
use crate::runtime::driver::Outcome;
use crate::runtime::primitives;
use crate::runtime::reducer::EngineState;

fn node_or_prerequisite<'state>(
    state: &'state EngineState,
    node_id: &NodeId,
) -> Result<&'state Node, HandlerError> {
    state.nodes.get(node_id).ok_or_else(|| HandlerError::Prerequisite(format!("node {node_id} not present")))
}

/// Handles `FETCH_HTTP_NODE`, the engine's sole I/O boundary. When remote
/// fetching is disabled by
/// [`crate::core::config::EngineConfig::allow_remote_url_fetch`], resolves
/// immediately as a prerequisite error rather than calling the fetcher.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when fetching is disabled or the
/// fetcher itself fails.
pub fn fetch_http_node<F: HttpNodeFetcher>(
    fetcher: &F,
    url: &str,
    expected_class: Option<ObClass>,
    allow_remote_url_fetch: bool,
) -> Result<Outcome, HandlerError> {
    if !allow_remote_url_fetch {
        return Err(HandlerError::Prerequisite(format!("remote fetching is disabled; cannot fetch {url}")));
    }
    let node = fetcher.fetch(url).map_err(|err| HandlerError::Prerequisite(err.to_string()))?;
    let node_id = NodeId::new(node.declared_id().unwrap_or(url));
    let actions = vec![
        Action::AddNode { node_id: node_id.clone(), node },
        Action::AddTask { kind: TaskKind::ValidateExpectedNodeClass { node_id, expected_class } },
    ];
    Ok(Outcome::success_with(format!("Fetched node at {url}"), actions))
}

/// Handles `ASSERTION_VERIFICATION_DEPENDENCIES`.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when the assertion or its
/// verification target node is missing.
pub fn assertion_verification_dependencies(state: &EngineState, node_id: &NodeId) -> Result<Outcome, HandlerError> {
    let node = node_or_prerequisite(state, node_id)?;
    let verification_id = node
        .get("verification")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::Prerequisite(format!("assertion {node_id} has no verification property")))?;
    let verification_node = state
        .nodes
        .get(&NodeId::new(verification_id))
        .ok_or_else(|| HandlerError::Prerequisite(format!("verification node {verification_id} not present")))?;

    let actions = if verification_node.type_list().iter().any(|t| t == "HostedBadge") {
        vec![Action::AddTask { kind: TaskKind::HostedIdInVerificationScope { node_id: node_id.clone() } }]
    } else {
        Vec::new()
    };
    Ok(Outcome::success_with(format!("Assertion {node_id} verification dependencies checked"), actions))
}

/// Handles `ASSERTION_TIMESTAMP_CHECKS`.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when the assertion is missing or
/// `issuedOn` is absent/unparseable.
pub fn assertion_timestamp_checks(state: &EngineState, node_id: &NodeId) -> Result<Outcome, HandlerError> {
    let node = node_or_prerequisite(state, node_id)?;
    let issued_on_str = node
        .get("issuedOn")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::Prerequisite(format!("assertion {node_id} has no issuedOn timestamp")))?;
    let issued_on = primitives::parse_datetime(issued_on_str)
        .ok_or_else(|| HandlerError::Prerequisite(format!("assertion {node_id} issuedOn is not a valid datetime")))?;

    let now = time::OffsetDateTime::now_utc();
    if issued_on > now {
        return Ok(Outcome::failure(format!("Assertion {node_id} issue date {issued_on_str} is in the future")));
    }

    if let Some(expires_str) = node.get("expires").and_then(Value::as_str) {
        let Some(expires) = primitives::parse_datetime(expires_str) else {
            return Ok(Outcome::failure(format!("Assertion {node_id} expires value {expires_str} is not a valid datetime")));
        };
        if expires < issued_on {
            return Ok(Outcome::failure(format!(
                "Assertion {node_id} expiration {expires_str} is prior to its issue date {issued_on_str}"
            )));
        }
        if expires < now {
            return Ok(Outcome::failure(format!("Assertion {node_id} expired on {expires_str}")));
        }
    }

    Ok(Outcome::success(format!("Assertion {node_id} timestamps are valid")))
}

/// Handles `CRITERIA_PROPERTY_DEPENDENCIES`.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when the criteria node is
/// missing.
pub fn criteria_property_dependencies(state: &EngineState, node_id: &NodeId) -> Result<Outcome, HandlerError> {
    let node = node_or_prerequisite(state, node_id)?;
    if node_id.is_blank() && node.get("narrative").is_none() {
        return Ok(Outcome::failure(format!(
            "Either external id or narrative is required for criteria node {node_id}."
        )));
    }
    Ok(Outcome::success(format!("Criteria {node_id} dependencies checked")))
}

/// Handles `IDENTITY_OBJECT_PROPERTY_DEPENDENCIES`.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when the identity object node is
/// missing.
pub fn identity_object_property_dependencies(state: &EngineState, node_id: &NodeId) -> Result<Outcome, HandlerError> {
    let node = node_or_prerequisite(state, node_id)?;
    let hashed = node.get("hashed").and_then(Value::as_bool).unwrap_or(false);
    let identity = node.get("identity").and_then(Value::as_str).unwrap_or_default();
    let is_hashed = primitives::is_hashed_identity_hash(identity);

    if hashed && !is_hashed {
        return Ok(Outcome::failure(format!(
            "Identity {identity} must match known hash style if hashed is true"
        )));
    }
    if is_hashed && !hashed {
        return Ok(Outcome::failure(format!(
            "Identity {identity} appears hashed but node {node_id} declares hashed as false"
        )));
    }
    if !hashed && node.type_list().iter().any(|t| t == "email") && !primitives::is_email(identity) {
        return Ok(Outcome::failure(format!("Identity {identity} is not a valid email address")));
    }

    Ok(Outcome::success(format!("Identity object {node_id} dependencies checked")))
}

/// Handles `ISSUER_PROPERTY_DEPENDENCIES`. Always succeeds; a placeholder
/// hook preserved from the original for downstream `HOSTED_ID_IN_VERIFICATION_SCOPE`
/// sequencing.
pub fn issuer_property_dependencies(node_id: &NodeId) -> Result<Outcome, HandlerError> {
    Ok(Outcome::success(format!("Issuer {node_id} dependencies checked")))
}

/// Handles `HOSTED_ID_IN_VERIFICATION_SCOPE`: a hosted assertion's declared
/// `id` must agree with the node identifier it was addressed by, modulo a
/// trailing fragment.
///
/// # Errors
///
/// Returns [`HandlerError::Prerequisite`] when the assertion node is
/// missing.
pub fn hosted_id_in_verification_scope(state: &EngineState, node_id: &NodeId) -> Result<Outcome, HandlerError> {
    let node = node_or_prerequisite(state, node_id)?;
    let Some(declared_id) = node.declared_id() else {
        return Ok(Outcome::failure(format!("Assertion {node_id} has no declared id to check against its verification scope")));
    };
    let strip_fragment = |s: &str| s.split('#').next().unwrap_or(s).to_owned();
    if strip_fragment(declared_id) != strip_fragment(node_id.as_str()) {
        return Ok(Outcome::failure(format!(
            "Assertion {node_id} declared id {declared_id} does not match its hosted verification scope"
        )));
    }
    Ok(Outcome::success(format!("Assertion {node_id} hosted id is within its verification scope")))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use serde_json::json;

    use super::assertion_timestamp_checks;
    use super::criteria_property_dependencies;
    use super::hosted_id_in_verification_scope;
    use super::identity_object_property_dependencies;
    use super::issuer_property_dependencies;
    use crate::core::identifiers::NodeId;
    use crate::core::node::Node;
    use crate::runtime::reducer::EngineState;

    fn state_with(node_id: &str, node_json: Value) -> EngineState {
        let mut state = EngineState::new();
        state.nodes.insert(NodeId::new(node_id), Node::from_json(&node_json));
        state
    }

    #[test]
    fn identity_hashed_true_with_non_hash_value_fails() {
        let state = state_with("_:b0", json!({"hashed": true, "identity": "a@b.c"}));
        let outcome = identity_object_property_dependencies(&state, &NodeId::new("_:b0"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(!outcome.success);
        assert!(outcome.message.contains("must match known hash style"));
    }

    #[test]
    fn identity_cleartext_email_passes() {
        let state = state_with("_:b0", json!({"hashed": false, "identity": "a@b.c", "type": "email"}));
        let outcome = identity_object_property_dependencies(&state, &NodeId::new("_:b0"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
    }

    #[test]
    fn criteria_blank_node_without_narrative_fails() {
        let state = state_with("_:b2", json!({}));
        let outcome =
            criteria_property_dependencies(&state, &NodeId::new("_:b2")).unwrap_or_else(|err| panic!("{err}"));
        assert!(!outcome.success);
    }

    #[test]
    fn criteria_with_external_id_does_not_require_narrative() {
        let state = state_with("http://e/criteria1", json!({}));
        let outcome = criteria_property_dependencies(&state, &NodeId::new("http://e/criteria1"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
    }

    #[test]
    fn issuer_property_dependencies_always_succeeds() {
        let outcome =
            issuer_property_dependencies(&NodeId::new("http://e/issuer")).unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
    }

    #[test]
    fn future_issued_on_fails_timestamp_checks() {
        let state = state_with("http://e/a1", json!({"issuedOn": "2999-01-01T00:00:00Z"}));
        let outcome =
            assertion_timestamp_checks(&state, &NodeId::new("http://e/a1")).unwrap_or_else(|err| panic!("{err}"));
        assert!(!outcome.success);
        assert!(outcome.message.contains("future"));
    }

    #[test]
    fn hosted_id_matches_its_own_node_id() {
        let state = state_with("http://e/a1", json!({"id": "http://e/a1"}));
        let outcome = hosted_id_in_verification_scope(&state, &NodeId::new("http://e/a1"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(outcome.success);
    }

    #[test]
    fn hosted_id_mismatch_fails() {
        let state = state_with("http://e/a1", json!({"id": "http://e/a1-different"}));
        let outcome = hosted_id_in_verification_scope(&state, &NodeId::new("http://e/a1"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert!(!outcome.success);
    }
}
