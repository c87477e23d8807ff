// openbadges-validate/src/core/config.rs
// ============================================================================
// Module: Engine Configuration
// Description: Construction-time knobs for the driver.
// Purpose: Let callers bound remote fetching and total task fan-out.
// Dependencies: none
// ============================================================================

//! ## Overview
//! `EngineConfig` plays the same role as `ControlPlaneConfig` in sibling
//! engines: a small, `Default`-implementing struct of behavior switches
//! passed once at construction, not threaded through every call.

/// Construction-time configuration for [`crate::runtime::driver::Driver`].
///
/// # Invariants
/// - `max_tasks` bounds total task fan-out per run; exceeding it surfaces
///   as [`crate::core::error::EngineError::TaskBudgetExceeded`] rather than
///   running unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether `FETCH_HTTP_NODE` tasks are dispatched to the injected
    /// fetcher. When `false`, they resolve immediately as a prerequisite
    /// error.
    pub allow_remote_url_fetch: bool,
    /// The maximum number of tasks a single run may process.
    pub max_tasks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { allow_remote_url_fetch: true, max_tasks: 10_000 }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn default_config_allows_remote_fetch_with_a_bounded_task_budget() {
        let config = EngineConfig::default();
        assert!(config.allow_remote_url_fetch);
        assert!(config.max_tasks > 0);
    }
}
