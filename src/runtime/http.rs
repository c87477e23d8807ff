// openbadges-validate/src/runtime/http.rs
// ============================================================================
// Module: In-Memory HTTP Node Fetcher
// Description: A deterministic, non-networked `HttpNodeFetcher`.
// Purpose: Provide a usable default for callers and tests that pre-seed
//          remote node bodies rather than performing real network I/O.
// Dependencies: crate::{core::node, interfaces}, serde_json, std::sync
// ============================================================================

//! ## Overview
//! The engine never performs network I/O itself. This module's
//! `StaticHttpNodeFetcher` mirrors the pattern the corpus uses for its own
//! in-memory store trait implementation: a `Mutex`-guarded map pre-populated
//! by the caller, returning a typed error for unregistered URLs rather than
//! attempting a real fetch.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::core::node::Node;
use crate::interfaces::HttpNodeFetcher;
use crate::interfaces::HttpNodeFetcherError;

/// An `HttpNodeFetcher` backed by a fixed, caller-populated map of URL to
/// node body. Suitable for tests and for callers who resolve remote nodes
/// out of band and pre-seed the results.
#[derive(Debug, Default)]
pub struct StaticHttpNodeFetcher {
    nodes: Mutex<BTreeMap<String, Node>>,
}

impl StaticHttpNodeFetcher {
    /// Creates an empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Mutex::new(BTreeMap::new()) }
    }

    /// Registers the node body that should be returned for `url`.
    pub fn register(&self, url: impl Into<String>, node: Node) {
        let mut nodes = self.nodes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        nodes.insert(url.into(), node);
    }
}

impl HttpNodeFetcher for StaticHttpNodeFetcher {
    fn fetch(&self, url: &str) -> Result<Node, HttpNodeFetcherError> {
        let nodes = self.nodes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        nodes.get(url).cloned().ok_or_else(|| HttpNodeFetcherError::Fetch {
            url: url.to_owned(),
            reason: "no node registered for this url".to_owned(),
        })
    }
}

/// An `HttpNodeFetcher` that always fails, used when
/// [`crate::core::config::EngineConfig::allow_remote_url_fetch`] is
/// `false` but a fetcher value is still required by the driver's generic
/// signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyHttpNodeFetcher;

impl HttpNodeFetcher for DenyHttpNodeFetcher {
    fn fetch(&self, url: &str) -> Result<Node, HttpNodeFetcherError> {
        Err(HttpNodeFetcherError::Fetch {
            url: url.to_owned(),
            reason: "remote url fetching is disabled".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::DenyHttpNodeFetcher;
    use super::StaticHttpNodeFetcher;
    use crate::core::node::Node;
    use crate::interfaces::HttpNodeFetcher;

    #[test]
    fn static_fetcher_returns_registered_nodes() {
        let fetcher = StaticHttpNodeFetcher::new();
        fetcher.register("http://e/bc1", Node::from_json(&json!({"id": "http://e/bc1"})));
        assert!(fetcher.fetch("http://e/bc1").is_ok());
        assert!(fetcher.fetch("http://e/missing").is_err());
    }

    #[test]
    fn deny_fetcher_always_fails() {
        assert!(DenyHttpNodeFetcher.fetch("http://e/bc1").is_err());
    }
}
