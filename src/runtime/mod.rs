// openbadges-validate/src/runtime/mod.rs
// ============================================================================
// Module: Validation Runtime
// Description: Primitive validators, reducer, task handlers, and the driver
//              loop that executes them.
// Purpose: Turn the declarative core types into a running validation engine.
// Dependencies: crate::{core, interfaces}, jsonschema, regex, time, tracing,
//               url
// ============================================================================

//! ## Overview
//! Runtime modules implement the engine's behavior over the plain data in
//! [`crate::core`]: term expansion, primitive predicates, the reducer, the
//! per-task-kind handlers, and the driver loop that ties them together into
//! a single [`driver::Driver::run`] call.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod class_tasks;
pub mod driver;
pub mod extensions;
pub mod http;
pub mod jsonld;
pub mod primitives;
pub mod property;
pub mod reducer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use driver::Driver;
pub use driver::Outcome;
pub use driver::abbreviate;
pub use extensions::InMemoryExtensionRegistry;
pub use http::DenyHttpNodeFetcher;
pub use http::StaticHttpNodeFetcher;
pub use jsonld::ObV2Context;
pub use primitives::is_hashed_identity_hash;
pub use primitives::is_valid;
pub use reducer::EngineState;
pub use reducer::reduce;
