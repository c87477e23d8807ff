// openbadges-validate/src/core/error.rs
// ============================================================================
// Module: Error Model
// Description: The engine's two error types, keeping validation failures,
//              prerequisite errors, and internal errors distinct.
// Purpose: Distinguish validation failures (data), prerequisite errors
//          (non-fatal), and internal errors (fatal) as typed results rather
//          than exceptions.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`HandlerError`] gives prerequisite errors and internal errors typed
//! variants; a plain validation failure is not a Rust error at all; it is
//! the `success: false` case of a handler's ordinary `Ok` return. See
//! [`crate::runtime::driver::Outcome`].

use thiserror::Error;

/// An error a task handler may return instead of a normal outcome.
///
/// # Invariants
/// - `Prerequisite` is never fatal: the driver catches it, resolves the
///   task as failed with `prerequisite_failure = true`, and continues.
/// - `Internal` is always fatal: the driver halts the run.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The task could not run because data it needs is absent (missing
    /// node, missing mandatory property).
    #[error("{0}")]
    Prerequisite(String),
    /// A programmer bug: an unknown class, a malformed validator spec, a
    /// collaborator failure that should never happen in practice, or
    /// similar.
    #[error("{0}")]
    Internal(String),
}

/// A fatal, run-terminating error surfaced by the engine.
///
/// # Invariants
/// - Constructing this value always means the driver halted before
///   producing a [`crate::core::report::Report`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A handler reported an internal (programmer) error.
    #[error("internal error: {0}")]
    Internal(String),
    /// The run exceeded its configured task budget.
    #[error("task budget of {0} exceeded")]
    TaskBudgetExceeded(usize),
}

impl From<HandlerError> for EngineError {
    fn from(error: HandlerError) -> Self {
        match error {
            HandlerError::Internal(message) => Self::Internal(message),
            HandlerError::Prerequisite(message) => {
                Self::Internal(format!("prerequisite error escaped handler dispatch: {message}"))
            }
        }
    }
}
