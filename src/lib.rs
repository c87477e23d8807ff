// openbadges-validate/src/lib.rs
// ============================================================================
// Module: Open Badges Validation Library
// Description: Public API surface for the validation engine.
// Purpose: Expose core types, collaborator interfaces, and the runtime driver.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! `openbadges-validate` validates Open Badges v2 credential graphs: a
//! task-driven, reducer-based state machine decomposes an input JSON-LD
//! document into typed validation work items, executes them (each may emit
//! further work or patch the graph), and aggregates the outcomes into a
//! single [`Report`]. Network fetching, JSON-LD processing, and extension
//! schema validation are consumed through small traits in [`interfaces`]
//! rather than implemented inline; callers provide their own, or use the
//! in-memory defaults in [`runtime`] for tests and offline validation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ExtensionRegistry;
pub use interfaces::ExtensionRegistryError;
pub use interfaces::HttpNodeFetcher;
pub use interfaces::HttpNodeFetcherError;
pub use interfaces::JsonLdCodec;
pub use interfaces::JsonLdError;
pub use runtime::Driver;
pub use runtime::DenyHttpNodeFetcher;
pub use runtime::InMemoryExtensionRegistry;
pub use runtime::ObV2Context;
pub use runtime::Outcome;
pub use runtime::StaticHttpNodeFetcher;
