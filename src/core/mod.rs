// openbadges-validate/src/core/mod.rs
// ============================================================================
// Module: Core Types
// Description: Canonical node/task/action/report schema for the validation
//              engine.
// Purpose: Provide stable, serializable types that runtime handlers operate
//          on.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types define the engine's three substates (node store, task queue,
//! report), the action records that mutate them, and the canonical class
//! validator tables. These types are the source of truth for every handler
//! in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod action;
pub mod class_spec;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod node;
pub mod ob_classes;
pub mod report;
pub mod task;
pub mod value_types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::Action;
pub use class_spec::ClassTaskKind;
pub use class_spec::ClassTaskSpec;
pub use class_spec::PropertySpec;
pub use class_spec::ValidatorSpec;
pub use class_spec::class_validators;
pub use class_spec::get_validation_actions;
pub use config::EngineConfig;
pub use error::EngineError;
pub use error::HandlerError;
pub use identifiers::NodeId;
pub use identifiers::TaskId;
pub use node::Node;
pub use node::NodeStore;
pub use ob_classes::ALL_CLASSES;
pub use ob_classes::ObClass;
pub use report::Report;
pub use report::TaskRecord;
pub use task::DedupKey;
pub use task::ExtensionParams;
pub use task::PropertyParams;
pub use task::RdfTypeParams;
pub use task::Task;
pub use task::TaskKind;
pub use value_types::PRIMITIVES;
pub use value_types::ValueType;
