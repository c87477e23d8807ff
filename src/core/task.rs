// openbadges-validate/src/core/task.rs
// ============================================================================
// Module: Task Model
// Description: The closed task-kind enumeration and per-kind parameter
//              records.
// Purpose: Replace the source's free-form keyword payloads with a tagged
//          union.
// Dependencies: crate::core::{identifiers, ob_classes, value_types}, serde,
//               serde_json
// ============================================================================

//! ## Overview
//! Each [`TaskKind`] variant carries exactly the parameters its handler
//! needs, rather than the source's single open map of keyword arguments. A
//! small amount of openness remains only for the extension payload
//! (`node_json`), since its shape depends on which extension type is being
//! tested.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::NodeId;
use crate::core::identifiers::TaskId;
use crate::core::ob_classes::ObClass;
use crate::core::value_types::ValueType;

/// Shared parameters for a property-shaped validator spec, carried by both
/// `ValidateProperty` and `ValidateRdfTypeProperty` tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyParams {
    /// The node whose property is under test.
    pub node_id: NodeId,
    /// The class the node was validated or expected as, if known.
    pub node_class: Option<ObClass>,
    /// The property name under test.
    pub prop_name: String,
    /// The expected value type.
    pub prop_type: ValueType,
    /// Whether the property must be present.
    pub required: bool,
    /// Whether more than one value is permitted.
    pub many: bool,
    /// For `Id`-typed properties, the class the referenced node is
    /// expected to satisfy.
    pub expected_class: Option<ObClass>,
    /// For `Id`-typed properties, whether the referenced node must be
    /// fetched over HTTP rather than resolved locally.
    pub fetch: bool,
    /// For `Id`-typed properties, whether an unresolvable local reference
    /// may be tolerated as an acceptable remote URL.
    pub allow_remote_url: bool,
}

/// Parameters for a `VALIDATE_RDF_TYPE_PROPERTY` task: a [`PropertyParams`]
/// plus the RDF-type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdfTypeParams {
    /// The shared property parameters (`prop_type` is always `RdfType`).
    pub property: PropertyParams,
    /// If non-empty, the node's normalized `type` list must intersect this
    /// set.
    pub must_contain_one: Vec<String>,
    /// A type value to apply via `PATCH_NODE` when `type` is absent.
    pub default: Option<String>,
}

/// Parameters for a `VALIDATE_EXTENSION_NODE` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionParams {
    /// The node to validate, addressed by id.
    pub node_id: Option<NodeId>,
    /// The node to validate, addressed by a graph path (used when the
    /// extension is nested and has no independent id).
    pub node_path: Option<String>,
    /// A pre-serialized node body, used instead of looking the node up in
    /// the store when present.
    pub node_json: Option<Value>,
    /// A single extension type to test, bypassing registry intersection.
    pub type_to_test: Option<String>,
}

/// The closed set of task kinds the engine can execute.
///
/// # Invariants
/// - This enumeration is closed; dispatch in
///   [`crate::runtime::driver::Driver`] is an exhaustive match with no
///   default arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum TaskKind {
    /// Detect a node's class from its `type` and emit its validation
    /// actions.
    DetectAndValidateNodeClass {
        /// The node to classify.
        node_id: NodeId,
    },
    /// Confirm a node satisfies an already-expected class and emit its
    /// validation actions.
    ValidateExpectedNodeClass {
        /// The node expected to satisfy `expected_class`.
        node_id: NodeId,
        /// The class the node is expected to satisfy, if any.
        expected_class: Option<ObClass>,
    },
    /// Validate a single non-RDF-type property.
    ValidateProperty(PropertyParams),
    /// Validate the `type` property against an RDF-type spec.
    ValidateRdfTypeProperty(RdfTypeParams),
    /// Validate an extension node against its registered JSON-Schema.
    ValidateExtensionNode(ExtensionParams),
    /// Fetch a node over HTTP; the sole I/O boundary, executed by an
    /// injected [`crate::interfaces::HttpNodeFetcher`].
    FetchHttpNode {
        /// The URL to fetch.
        url: String,
        /// The class the fetched node is expected to satisfy, if any.
        expected_class: Option<ObClass>,
    },
    /// Check an assertion's verification node for hosted/signed badge
    /// follow-up work.
    AssertionVerificationDependencies {
        /// The assertion node.
        node_id: NodeId,
    },
    /// Check an assertion's `issuedOn`/`expires` timestamps.
    AssertionTimestampChecks {
        /// The assertion node.
        node_id: NodeId,
    },
    /// Check a criteria node's blank-node/narrative dependency.
    CriteriaPropertyDependencies {
        /// The criteria node.
        node_id: NodeId,
    },
    /// Check an identity object's hash/cleartext consistency.
    IdentityObjectPropertyDependencies {
        /// The identity object node.
        node_id: NodeId,
    },
    /// Placeholder hook for downstream hosted-id check sequencing.
    IssuerPropertyDependencies {
        /// The profile node.
        node_id: NodeId,
    },
    /// Confirm a hosted assertion's verification scope matches its own id.
    HostedIdInVerificationScope {
        /// The assertion node.
        node_id: NodeId,
    },
}

/// The dedup key a task kind contributes to `_task_to_add_exists`. Only
/// `VALIDATE_EXPECTED_NODE_CLASS`, `VALIDATE_PROPERTY`, and
/// `VALIDATE_RDF_TYPE_PROPERTY` participate; everything else returns
/// `None` and is never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupKey {
    /// Deduplicates `VALIDATE_EXPECTED_NODE_CLASS` by `node_id` alone.
    ExpectedNodeClass(NodeId),
    /// Deduplicates `VALIDATE_PROPERTY` and `VALIDATE_RDF_TYPE_PROPERTY`
    /// jointly by `(node_id, prop_name)`, matching the source reducer's
    /// cross-kind comparison rather than a per-kind one.
    PropertyTask(NodeId, String),
}

impl TaskKind {
    /// Returns the stable kind tag used in reports and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DetectAndValidateNodeClass { .. } => "DETECT_AND_VALIDATE_NODE_CLASS",
            Self::ValidateExpectedNodeClass { .. } => "VALIDATE_EXPECTED_NODE_CLASS",
            Self::ValidateProperty(_) => "VALIDATE_PROPERTY",
            Self::ValidateRdfTypeProperty(_) => "VALIDATE_RDF_TYPE_PROPERTY",
            Self::ValidateExtensionNode(_) => "VALIDATE_EXTENSION_NODE",
            Self::FetchHttpNode { .. } => "FETCH_HTTP_NODE",
            Self::AssertionVerificationDependencies { .. } => "ASSERTION_VERIFICATION_DEPENDENCIES",
            Self::AssertionTimestampChecks { .. } => "ASSERTION_TIMESTAMP_CHECKS",
            Self::CriteriaPropertyDependencies { .. } => "CRITERIA_PROPERTY_DEPENDENCIES",
            Self::IdentityObjectPropertyDependencies { .. } => "IDENTITY_OBJECT_PROPERTY_DEPENDENCIES",
            Self::IssuerPropertyDependencies { .. } => "ISSUER_PROPERTY_DEPENDENCIES",
            Self::HostedIdInVerificationScope { .. } => "HOSTED_ID_IN_VERIFICATION_SCOPE",
        }
    }

    /// Returns the node this task concerns, where the kind names exactly
    /// one (most kinds); `FetchHttpNode` has no node id yet, and
    /// `ValidateExtensionNode` may be addressed by path instead.
    #[must_use]
    pub const fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::DetectAndValidateNodeClass { node_id }
            | Self::ValidateExpectedNodeClass { node_id, .. }
            | Self::AssertionVerificationDependencies { node_id }
            | Self::AssertionTimestampChecks { node_id }
            | Self::CriteriaPropertyDependencies { node_id }
            | Self::IdentityObjectPropertyDependencies { node_id }
            | Self::IssuerPropertyDependencies { node_id }
            | Self::HostedIdInVerificationScope { node_id } => Some(node_id),
            Self::ValidateProperty(params) => Some(&params.node_id),
            Self::ValidateRdfTypeProperty(params) => Some(&params.property.node_id),
            Self::ValidateExtensionNode(params) => params.node_id.as_ref(),
            Self::FetchHttpNode { .. } => None,
        }
    }

    /// Returns the dedup key this task contributes, if any.
    #[must_use]
    pub fn dedup_key(&self) -> Option<DedupKey> {
        match self {
            Self::ValidateExpectedNodeClass { node_id, .. } => {
                Some(DedupKey::ExpectedNodeClass(node_id.clone()))
            }
            Self::ValidateProperty(params) => {
                Some(DedupKey::PropertyTask(params.node_id.clone(), params.prop_name.clone()))
            }
            Self::ValidateRdfTypeProperty(params) => Some(DedupKey::PropertyTask(
                params.property.node_id.clone(),
                params.property.prop_name.clone(),
            )),
            _ => None,
        }
    }
}

/// A task in the task queue.
///
/// # Invariants
/// - `complete` is monotonic: once `true`, never reset to `false`.
/// - `success`/`result` are set only alongside the transition to
///   `complete = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable, monotonically increasing identifier.
    pub task_id: TaskId,
    /// The task's kind and kind-specific parameters.
    pub kind: TaskKind,
    /// Whether this task has resolved.
    pub complete: bool,
    /// The resolution outcome, set alongside `complete = true`.
    pub success: Option<bool>,
    /// A human-readable explanation, set alongside `complete = true`.
    pub result: Option<String>,
    /// Whether this task's failure was a prerequisite error (missing node
    /// or missing required data) rather than a validation failure.
    pub prerequisite_failure: bool,
}

impl Task {
    /// Creates a new, unresolved task.
    #[must_use]
    pub const fn new(task_id: TaskId, kind: TaskKind) -> Self {
        Self { task_id, kind, complete: false, success: None, result: None, prerequisite_failure: false }
    }
}
