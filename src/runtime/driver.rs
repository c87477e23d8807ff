// openbadges-validate/src/runtime/driver.rs
// ============================================================================
// Module: Driver
// Description: The main task-selection/dispatch loop and its handler outcome
//              type.
// Purpose: Drive an EngineState to completion by repeatedly resolving the
//          lowest-task_id active task and applying its follow-up actions.
// Dependencies: crate::{core, interfaces, runtime::*}, tracing
// ============================================================================

//! ## Overview
//! [`Driver`] mirrors the corpus's generic-over-collaborators engine
//! pattern: it is parameterized by its three external interfaces rather
//! than boxing them, so a caller pays no dynamic dispatch cost for its own
//! concrete types. Each iteration selects the lowest-`task_id` incomplete
//! task, dispatches it, applies its `RESOLVE_TASK` action, then applies any
//! follow-up actions in order, until no incomplete task remains.

use tracing::debug;
use tracing::warn;

use crate::core::action::Action;
use crate::core::config::EngineConfig;
use crate::core::error::EngineError;
use crate::core::identifiers::NodeId;
use crate::core::node::Node;
use crate::core::report::Report;
use crate::core::task::TaskKind;
use crate::interfaces::ExtensionRegistry;
use crate::interfaces::HttpNodeFetcher;
use crate::interfaces::JsonLdCodec;
use crate::runtime::class_tasks;
use crate::runtime::extensions;
use crate::runtime::property;
use crate::runtime::reducer::EngineState;
use crate::runtime::reducer::reduce;

/// A task handler's result: whether it succeeded, a human-readable message,
/// and any follow-up actions to apply in order.
///
/// # Invariants
/// - `actions` are applied in the order they appear, after the task's own
///   `RESOLVE_TASK` action has already been applied.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// Whether the task succeeded.
    pub success: bool,
    /// A human-readable explanation.
    pub message: String,
    /// Follow-up actions to apply after this task resolves.
    pub actions: Vec<Action>,
}

impl Outcome {
    /// A successful outcome with no follow-up actions.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), actions: Vec::new() }
    }

    /// A failed outcome with no follow-up actions.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), actions: Vec::new() }
    }

    /// A successful outcome carrying follow-up actions.
    #[must_use]
    pub fn success_with(message: impl Into<String>, actions: Vec<Action>) -> Self {
        Self { success: true, message: message.into(), actions }
    }
}

/// Truncates `s` to 50 characters with an ellipsis, for use in compact
/// failure messages.
#[must_use]
pub fn abbreviate(s: &str) -> String {
    const LIMIT: usize = 50;
    if s.chars().count() <= LIMIT {
        return s.to_owned();
    }
    let truncated: String = s.chars().take(LIMIT).collect();
    format!("{truncated}…")
}

/// The driver loop, generic over the three external collaborators the
/// engine consumes without owning: the HTTP node fetcher, the extension
/// schema registry, and the JSON-LD codec.
#[derive(Debug)]
pub struct Driver<F, X, J>
where
    F: HttpNodeFetcher,
    X: ExtensionRegistry,
    J: JsonLdCodec,
{
    state: EngineState,
    config: EngineConfig,
    fetcher: F,
    registry: X,
    codec: J,
}

impl<F, X, J> Driver<F, X, J>
where
    F: HttpNodeFetcher,
    X: ExtensionRegistry,
    J: JsonLdCodec,
{
    /// Builds a driver seeded from an input JSON-LD document: every
    /// distinct node keyed by `id` is loaded, and a
    /// `DETECT_AND_VALIDATE_NODE_CLASS` task is queued for `root_id`.
    #[must_use]
    pub fn seeded(
        document_nodes: impl IntoIterator<Item = (NodeId, Node)>,
        root_id: &NodeId,
        config: EngineConfig,
        fetcher: F,
        registry: X,
        codec: J,
    ) -> Self {
        let mut state = EngineState::new();
        for (node_id, node) in document_nodes {
            state.nodes.insert(node_id, node);
        }
        state = reduce(
            state,
            Action::AddTask { kind: TaskKind::DetectAndValidateNodeClass { node_id: root_id.clone() } },
        );
        Self { state, config, fetcher, registry, codec }
    }

    fn dispatch(&self, kind: &TaskKind) -> Result<Outcome, crate::core::error::HandlerError> {
        match kind {
            TaskKind::DetectAndValidateNodeClass { node_id } => {
                property::detect_and_validate_node_class(&self.state, node_id)
            }
            TaskKind::ValidateExpectedNodeClass { node_id, expected_class } => {
                property::validate_expected_node_class(&self.state, node_id, *expected_class)
            }
            TaskKind::ValidateProperty(params) => {
                property::validate_property(&self.state, params, &self.codec)
            }
            TaskKind::ValidateRdfTypeProperty(params) => {
                property::validate_rdf_type_property(&self.state, params, &self.codec)
            }
            TaskKind::ValidateExtensionNode(params) => {
                extensions::validate_extension_node(&self.state, params, &self.registry, &self.codec)
            }
            TaskKind::FetchHttpNode { url, expected_class } => {
                class_tasks::fetch_http_node(&self.fetcher, url, *expected_class, self.config.allow_remote_url_fetch)
            }
            TaskKind::AssertionVerificationDependencies { node_id } => {
                class_tasks::assertion_verification_dependencies(&self.state, node_id)
            }
            TaskKind::AssertionTimestampChecks { node_id } => {
                class_tasks::assertion_timestamp_checks(&self.state, node_id)
            }
            TaskKind::CriteriaPropertyDependencies { node_id } => {
                class_tasks::criteria_property_dependencies(&self.state, node_id)
            }
            TaskKind::IdentityObjectPropertyDependencies { node_id } => {
                class_tasks::identity_object_property_dependencies(&self.state, node_id)
            }
            TaskKind::IssuerPropertyDependencies { node_id } => {
                class_tasks::issuer_property_dependencies(node_id)
            }
            TaskKind::HostedIdInVerificationScope { node_id } => {
                class_tasks::hosted_id_in_verification_scope(&self.state, node_id)
            }
        }
    }

    /// Runs the driver loop to completion and produces a [`Report`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TaskBudgetExceeded`] if the run exceeds
    /// [`EngineConfig::max_tasks`], and [`EngineError::Internal`] if any
    /// handler reports an internal (programmer) error.
    pub fn run(mut self) -> Result<Report, EngineError> {
        let mut processed = 0_usize;
        loop {
            let next = self
                .state
                .tasks
                .iter()
                .filter(|task| !task.complete)
                .min_by_key(|task| task.task_id)
                .map(|task| (task.task_id, task.kind.clone()));

            let Some((task_id, kind)) = next else {
                break;
            };

            processed += 1;
            if processed > self.config.max_tasks {
                return Err(EngineError::TaskBudgetExceeded(self.config.max_tasks));
            }

            debug!(task_id = task_id.value(), kind = kind.name(), "dispatching task");

            let (success, message, follow_up, prerequisite_failure) = match self.dispatch(&kind) {
                Ok(outcome) if outcome.success => (true, outcome.message, outcome.actions, false),
                Ok(outcome) => {
                    warn!(task_id = task_id.value(), kind = kind.name(), message = %outcome.message, "task failed");
                    (false, outcome.message, outcome.actions, false)
                }
                Err(crate::core::error::HandlerError::Prerequisite(message)) => {
                    warn!(task_id = task_id.value(), kind = kind.name(), %message, "task prerequisite error");
                    (false, message, Vec::new(), true)
                }
                Err(crate::core::error::HandlerError::Internal(message)) => {
                    tracing::error!(task_id = task_id.value(), kind = kind.name(), %message, "halting on internal error");
                    return Err(EngineError::Internal(message));
                }
            };

            self.state = reduce(
                self.state,
                Action::ResolveTask { task_id, success, result: message, prerequisite_failure },
            );
            for action in follow_up {
                self.state = reduce(self.state, action);
            }
        }
        let report = Report::from_tasks(&self.state.tasks);
        let prerequisite_failed = self.state.tasks.iter().filter(|task| task.prerequisite_failure).count();
        let passed = self.state.tasks.iter().filter(|task| task.success == Some(true)).count();
        tracing::info!(
            total = report.tasks.len(),
            passed,
            failed = report.tasks.len() - passed,
            prerequisite_failed,
            valid = report.valid,
            "run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::abbreviate;

    #[test]
    fn abbreviate_leaves_short_strings_untouched() {
        assert_eq!(abbreviate("short"), "short");
    }

    #[test]
    fn abbreviate_truncates_long_strings_with_an_ellipsis() {
        let long = "a".repeat(80);
        let truncated = abbreviate(&long);
        assert_eq!(truncated.chars().count(), 51);
        assert!(truncated.ends_with('…'));
    }
}
