// openbadges-validate/src/core/action.rs
// ============================================================================
// Module: Action Model
// Description: The tagged action records that drive state transitions.
// Purpose: Provide the sole mutators of engine state.
// Dependencies: crate::core::{identifiers, node, task}, serde, serde_json
// ============================================================================

//! ## Overview
//! `Action` is the closed set of records `reduce` accepts. There is no
//! "mutate anything" escape hatch: every state change is one of these five
//! shapes.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;
use crate::core::node::Node;
use crate::core::task::TaskKind;

/// An action consumed by [`crate::runtime::reducer::reduce`].
///
/// # Invariants
/// - Actions are the sole mutators of engine state; no other code path
///   changes `nodes` or `tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Appends a new task, subject to deduplication.
    AddTask {
        /// The kind and parameters of the task to add.
        kind: TaskKind,
    },
    /// Resolves an existing task with a final outcome.
    ResolveTask {
        /// The task to resolve.
        task_id: TaskId,
        /// Whether the task succeeded.
        success: bool,
        /// A human-readable explanation.
        result: String,
        /// Whether this resolution represents a prerequisite error rather
        /// than a validation failure.
        prerequisite_failure: bool,
    },
    /// Updates fields on an existing, still-unresolved task.
    UpdateTask {
        /// The task to update.
        task_id: TaskId,
        /// The replacement kind and parameters.
        kind: TaskKind,
    },
    /// Merges a property patch into an existing node.
    PatchNode {
        /// The node to patch.
        node_id: NodeId,
        /// The properties to merge in.
        patch: BTreeMap<String, Value>,
    },
    /// Inserts a node into the store, used for the initial document seed
    /// and for `FETCH_HTTP_NODE` re-entry. Modeled as its own action rather
    /// than overloading `AddTask`, since node insertion has no task
    /// identity to deduplicate against.
    AddNode {
        /// The node's identifier.
        node_id: NodeId,
        /// The node body.
        node: Node,
    },
}
