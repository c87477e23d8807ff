// openbadges-validate/src/core/report.rs
// ============================================================================
// Module: Report
// Description: The aggregated validation verdict produced by a run.
// Purpose: Summarize completed task outcomes into a single pass/fail result.
// Dependencies: crate::core::{identifiers, task}, serde
// ============================================================================

//! ## Overview
//! A [`Report`] is built once, at the end of a [`crate::runtime::driver::Driver`]
//! run, from the final task list. A run is valid iff every resolved task
//! succeeded and none failed as a prerequisite error.

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;
use crate::core::task::Task;

/// A single completed task's contribution to the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// The task's identifier.
    pub task_id: TaskId,
    /// The task's kind tag.
    pub name: &'static str,
    /// The node this task concerned, if any.
    pub node_id: Option<NodeId>,
    /// The property this task concerned, if the kind carries one.
    pub prop_name: Option<String>,
    /// Whether the task succeeded.
    pub success: bool,
    /// A human-readable explanation.
    pub message: String,
    /// Whether this failure was a prerequisite error rather than a
    /// validation failure.
    pub prerequisite_failure: bool,
}

/// The aggregated verdict for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// `true` iff every task succeeded and none failed as a prerequisite
    /// error.
    pub valid: bool,
    /// Per-task records, in `task_id` order.
    pub tasks: Vec<TaskRecord>,
}

impl Report {
    /// Builds a report from a run's final task list.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut records = Vec::with_capacity(tasks.len());
        let mut valid = true;
        for task in tasks {
            let success = task.success.unwrap_or(false);
            if !success || task.prerequisite_failure {
                valid = false;
            }
            let prop_name = match &task.kind {
                crate::core::task::TaskKind::ValidateProperty(params) => Some(params.prop_name.clone()),
                crate::core::task::TaskKind::ValidateRdfTypeProperty(params) => {
                    Some(params.property.prop_name.clone())
                }
                _ => None,
            };
            records.push(TaskRecord {
                task_id: task.task_id,
                name: task.kind.name(),
                node_id: task.kind.node_id().cloned(),
                prop_name,
                success,
                message: task.result.clone().unwrap_or_default(),
                prerequisite_failure: task.prerequisite_failure,
            });
        }
        Self { valid, tasks: records }
    }
}

#[cfg(test)]
mod tests {
    use super::Report;
    use crate::core::identifiers::TaskId;
    use crate::core::task::Task;
    use crate::core::task::TaskKind;

    #[test]
    fn a_prerequisite_failure_makes_the_report_invalid_even_if_marked_successful_by_mistake() {
        let mut task = Task::new(
            TaskId::new(1),
            TaskKind::DetectAndValidateNodeClass { node_id: crate::core::identifiers::NodeId::new("n") },
        );
        task.complete = true;
        task.success = Some(true);
        task.prerequisite_failure = true;
        let report = Report::from_tasks(std::slice::from_ref(&task));
        assert!(!report.valid);
    }
}
