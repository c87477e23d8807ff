// openbadges-validate/src/core/node.rs
// ============================================================================
// Module: Node Store
// Description: The JSON-LD node graph addressed by IRI or blank node id.
// Purpose: Back the engine's sole mutable entity, mutated only through the
//          reducer's PATCH_NODE and node-insertion actions.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Node`] is a property bag (string key to [`serde_json::Value`]) plus
//! convenience accessors used throughout the validation handlers. A
//! [`NodeStore`] is an immutable-by-convention map from [`NodeId`] to
//! [`Node`]; the reducer is the only code that constructs a new `NodeStore`
//! from an old one.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::identifiers::NodeId;

/// A JSON-LD node: a property bag keyed by property name.
///
/// # Invariants
/// - Values are plain `serde_json::Value`; scalars, arrays, and nested
///   objects are all legal, matching the source graph's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    properties: BTreeMap<String, Value>,
}

impl Node {
    /// Creates a node from an already-assembled property map.
    #[must_use]
    pub const fn new(properties: BTreeMap<String, Value>) -> Self {
        Self { properties }
    }

    /// Creates a node from a `serde_json::Value::Object`. Non-object values
    /// produce an empty node.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let properties = value
            .as_object()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Self { properties }
    }

    /// Returns the raw value for `prop_name`, if present.
    #[must_use]
    pub fn get(&self, prop_name: &str) -> Option<&Value> {
        self.properties.get(prop_name)
    }

    /// Merges `patch` into this node's properties, overwriting any keys
    /// already present. Mirrors `PATCH_NODE`'s "merges the patch mapping
    /// into the named node" semantics.
    pub fn patch(&mut self, patch: &BTreeMap<String, Value>) {
        for (key, value) in patch {
            self.properties.insert(key.clone(), value.clone());
        }
    }

    /// Returns the node's `type` property normalized to a list of strings.
    /// A missing `type`, a non-string scalar, or a non-string array entry
    /// is simply omitted rather than causing an error here; callers treat
    /// an empty list as "no declared type".
    #[must_use]
    pub fn type_list(&self) -> Vec<String> {
        match self.properties.get("type") {
            Some(Value::String(single)) => vec![single.clone()],
            Some(Value::Array(items)) => {
                items.iter().filter_map(Value::as_str).map(str::to_owned).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Returns the node's declared `id` property, if it is a string.
    #[must_use]
    pub fn declared_id(&self) -> Option<&str> {
        self.properties.get("id").and_then(Value::as_str)
    }

    /// Returns all property names, in lexical order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Returns the node as a `serde_json::Value::Object`, used when a node
    /// body must be passed to the JSON-LD codec or the extension schema
    /// validator.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.properties.clone().into_iter().collect())
    }
}

/// The graph of JSON-LD nodes, addressed by [`NodeId`].
///
/// # Invariants
/// - Insertion and patching are the only mutation paths; both are invoked
///   exclusively from [`crate::runtime::reducer::reduce`].
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: BTreeMap<NodeId, Node>,
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: BTreeMap::new() }
    }

    /// Inserts or replaces a node. Used for the initial document seed and
    /// for `FETCH_HTTP_NODE` re-entry.
    pub fn insert(&mut self, node_id: NodeId, node: Node) {
        self.nodes.insert(node_id, node);
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn get(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Applies a property patch to an existing node. No-op if the node is
    /// absent, matching `PATCH_NODE`'s "does not create nodes" invariant.
    pub fn patch(&mut self, node_id: &NodeId, patch: &BTreeMap<String, Value>) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.patch(patch);
        }
    }

    /// Returns true when `node_id` is present in the store.
    #[must_use]
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Returns the number of nodes in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the store holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Node;
    use super::NodeStore;
    use crate::core::identifiers::NodeId;

    #[test]
    fn patch_merges_without_removing_other_keys() {
        let mut node = Node::from_json(&json!({"id": "http://e/a1", "name": "A"}));
        node.patch(&[("type".to_owned(), json!("Criteria"))].into_iter().collect());
        assert_eq!(node.get("name"), Some(&json!("A")));
        assert_eq!(node.get("type"), Some(&json!("Criteria")));
    }

    #[test]
    fn store_patch_is_a_no_op_for_missing_nodes() {
        let mut store = NodeStore::new();
        let node_id = NodeId::new("http://e/missing");
        store.patch(&node_id, &[("type".to_owned(), json!("Criteria"))].into_iter().collect());
        assert!(!store.contains(&node_id));
    }

    #[test]
    fn type_list_normalizes_scalar_and_array_forms() {
        let scalar = Node::from_json(&json!({"type": "Assertion"}));
        assert_eq!(scalar.type_list(), vec!["Assertion".to_owned()]);

        let array = Node::from_json(&json!({"type": ["Assertion", "Extension"]}));
        assert_eq!(array.type_list(), vec!["Assertion".to_owned(), "Extension".to_owned()]);
    }
}
