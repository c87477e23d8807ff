// openbadges-validate/src/runtime/reducer.rs
// ============================================================================
// Module: Reducer
// Description: The pure state-transition function over engine state.
// Purpose: Apply one Action to one EngineState, enforcing task identity,
//          dedup, and completion invariants.
// Dependencies: crate::core::{action, identifiers, node, task}
// ============================================================================

//! ## Overview
//! `reduce` is the engine's sole mutator. It is a plain function of its two
//! arguments; no hidden input. [`EngineState`] bundles
//! the node store and task queue the driver threads through the loop.

use tracing::debug;

use crate::core::action::Action;
use crate::core::node::NodeStore;
use crate::core::task::Task;

/// The engine's full mutable state: the node graph and the task queue.
///
/// # Invariants
/// - Constructed fresh by [`reduce`] on every transition; no code path
///   mutates a prior `EngineState` in place.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    /// The graph of JSON-LD nodes.
    pub nodes: NodeStore,
    /// The task queue, in `task_id` order.
    pub tasks: Vec<Task>,
}

impl EngineState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn task_to_add_exists(&self, kind: &crate::core::task::TaskKind) -> bool {
        let Some(key) = kind.dedup_key() else {
            return false;
        };
        self.tasks.iter().any(|task| task.kind.dedup_key().as_ref() == Some(&key))
    }

    fn next_task_id(&self) -> crate::core::identifiers::TaskId {
        self.tasks
            .iter()
            .map(|task| task.task_id)
            .max()
            .map_or_else(|| crate::core::identifiers::TaskId::new(1), crate::core::identifiers::TaskId::next)
    }
}

/// Applies `action` to `state`, returning the resulting state. Pure: the
/// result depends only on `state` and `action`.
#[must_use]
pub fn reduce(mut state: EngineState, action: Action) -> EngineState {
    match action {
        Action::AddTask { kind } => {
            if state.task_to_add_exists(&kind) {
                debug!(kind = kind.name(), "dropped duplicate task");
            } else {
                let task_id = state.next_task_id();
                debug!(task_id = task_id.value(), kind = kind.name(), "added task");
                state.tasks.push(Task::new(task_id, kind));
            }
            state
        }
        Action::ResolveTask { task_id, success, result, prerequisite_failure } => {
            if let Some(task) = state.tasks.iter_mut().find(|task| task.task_id == task_id) {
                debug!(task_id = task_id.value(), success, "resolved task");
                task.complete = true;
                task.success = Some(success);
                task.result = Some(result);
                task.prerequisite_failure = prerequisite_failure;
            }
            state
        }
        Action::UpdateTask { task_id, kind } => {
            if let Some(task) = state.tasks.iter_mut().find(|task| task.task_id == task_id) {
                debug!(task_id = task_id.value(), kind = kind.name(), "updated task");
                task.kind = kind;
            }
            state
        }
        Action::PatchNode { node_id, patch } => {
            debug!(node_id = node_id.as_str(), "patched node");
            state.nodes.patch(&node_id, &patch);
            state
        }
        Action::AddNode { node_id, node } => {
            debug!(node_id = node_id.as_str(), "inserted node");
            state.nodes.insert(node_id, node);
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineState;
    use super::reduce;
    use crate::core::action::Action;
    use crate::core::identifiers::NodeId;
    use crate::core::identifiers::TaskId;
    use crate::core::task::PropertyParams;
    use crate::core::task::TaskKind;
    use crate::core::value_types::ValueType;

    fn property_task(node_id: &str, prop_name: &str) -> TaskKind {
        TaskKind::ValidateProperty(PropertyParams {
            node_id: NodeId::new(node_id),
            node_class: None,
            prop_name: prop_name.to_owned(),
            prop_type: ValueType::Text,
            required: true,
            many: false,
            expected_class: None,
            fetch: false,
            allow_remote_url: false,
        })
    }

    #[test]
    fn task_ids_start_at_one_and_increase_by_one() {
        let state = EngineState::new();
        let state = reduce(state, Action::AddTask { kind: property_task("http://e/a1", "name") });
        let state = reduce(state, Action::AddTask { kind: property_task("http://e/a1", "description") });
        assert_eq!(state.tasks[0].task_id, TaskId::new(1));
        assert_eq!(state.tasks[1].task_id, TaskId::new(2));
    }

    #[test]
    fn duplicate_property_tasks_are_silently_dropped() {
        let state = EngineState::new();
        let state = reduce(state, Action::AddTask { kind: property_task("http://e/a1", "name") });
        let state = reduce(state, Action::AddTask { kind: property_task("http://e/a1", "name") });
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn resolve_task_is_a_no_op_for_an_unknown_task_id() {
        let state = EngineState::new();
        let state = reduce(
            state,
            Action::ResolveTask {
                task_id: TaskId::new(99),
                success: true,
                result: "n/a".to_owned(),
                prerequisite_failure: false,
            },
        );
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn resolve_task_sets_complete_and_is_monotonic() {
        let state = EngineState::new();
        let state = reduce(state, Action::AddTask { kind: property_task("http://e/a1", "name") });
        let task_id = state.tasks[0].task_id;
        let state = reduce(
            state,
            Action::ResolveTask { task_id, success: true, result: "ok".to_owned(), prerequisite_failure: false },
        );
        assert!(state.tasks[0].complete);
    }
}
