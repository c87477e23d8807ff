// openbadges-validate/src/interfaces/mod.rs
// ============================================================================
// Module: Interfaces
// Description: Backend-agnostic interfaces for JSON-LD processing, HTTP node
//              fetching, and extension schema validation.
// Purpose: Define the contract surfaces the engine consumes without
//          embedding backend-specific details.
// Dependencies: crate::core::node, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The engine never implements JSON-LD expansion/compaction, network I/O,
//! or JSON-Schema fetching itself; it consumes them through the traits in
//! this module. Implementations must be deterministic given their own
//! inputs; the engine itself never retries or caches across calls.

use serde_json::Value;
use thiserror::Error;

use crate::core::node::Node;

// ============================================================================
// SECTION: JSON-LD Codec
// ============================================================================

/// JSON-LD codec errors.
#[derive(Debug, Error)]
pub enum JsonLdError {
    /// The document could not be expanded or compacted, e.g. because it
    /// references an unrecognized term.
    #[error("json-ld processing error: {0}")]
    Processing(String),
}

/// A JSON-LD expansion/compaction capability, consumed as an opaque library
/// primitive: the engine must not depend on the internals of whatever
/// implements this.
pub trait JsonLdCodec {
    /// Expands `doc` against this codec's context, producing absolute-IRI
    /// term forms. Used by `VALIDATE_RDF_TYPE_PROPERTY` to check whether an
    /// `RDF_TYPE` value expands to an absolute IRI.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError`] when `doc` cannot be expanded.
    fn expand(&self, doc: &Value) -> Result<Value, JsonLdError>;

    /// Compacts `doc` against the supplied context documents, in order.
    /// Used by extension validation to compact a node body against `[OB
    /// context, extension context]` before schema validation.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError`] when `doc` cannot be compacted.
    fn compact(&self, doc: &Value, contexts: &[Value]) -> Result<Value, JsonLdError>;
}

// ============================================================================
// SECTION: HTTP Node Fetcher
// ============================================================================

/// HTTP node fetcher errors.
#[derive(Debug, Error)]
pub enum HttpNodeFetcherError {
    /// The URL could not be fetched or the response was not a usable JSON
    /// node.
    #[error("fetch of {url} failed: {reason}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// A human-readable failure reason.
        reason: String,
    },
}

/// The sole I/O boundary in the engine: fetches a remote node so a
/// `FETCH_HTTP_NODE` task can resolve. The engine calls this synchronously
/// from the driver loop; it never retries or schedules work itself.
pub trait HttpNodeFetcher {
    /// Fetches the node at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpNodeFetcherError`] when the URL cannot be retrieved or
    /// parsed as a JSON-LD node.
    fn fetch(&self, url: &str) -> Result<Node, HttpNodeFetcherError>;
}

// ============================================================================
// SECTION: Extension Schema Registry
// ============================================================================

/// Extension registry errors.
#[derive(Debug, Error)]
pub enum ExtensionRegistryError {
    /// The registry could not produce a schema/context for the requested
    /// extension type, for a reason other than "not registered" (which is
    /// represented as `Ok(None)`, not an error).
    #[error("extension registry error for {extension_type}: {reason}")]
    Lookup {
        /// The extension type that was requested.
        extension_type: String,
        /// A human-readable failure reason.
        reason: String,
    },
}

/// Registered Open Badges extension types, each with a JSON-LD context and
/// a JSON-Schema document. Consumed by `VALIDATE_EXTENSION_NODE`; schema
/// validation itself is delegated to the `jsonschema` crate, not
/// implemented here.
pub trait ExtensionRegistry {
    /// Returns every registered extension type string, used to intersect
    /// against a node's declared types.
    fn known_types(&self) -> Vec<String>;

    /// Returns the JSON-Schema document for `extension_type`, if
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionRegistryError`] when the lookup itself fails
    /// (e.g. a backing store is unavailable); an unregistered type is
    /// `Ok(None)`, not an error.
    fn schema_for(&self, extension_type: &str) -> Result<Option<Value>, ExtensionRegistryError>;

    /// Returns the JSON-LD context document for `extension_type`, if
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionRegistryError`] on lookup failure, as in
    /// [`ExtensionRegistry::schema_for`].
    fn context_for(&self, extension_type: &str) -> Result<Option<Value>, ExtensionRegistryError>;
}
