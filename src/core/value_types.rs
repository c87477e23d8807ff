// openbadges-validate/src/core/value_types.rs
// ============================================================================
// Module: Value Types
// Description: The closed set of primitive value types the engine validates.
// Purpose: Drive dispatch in the primitive value validator and class specs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! `ValueType` is the closed enumeration of scalar kinds a property value can
//! be checked against. `PRIMITIVES` names the subset validated directly by
//! [`crate::runtime::primitives::is_valid`] rather than by node-reference
//! resolution (`ID`) or schema-specific logic (`RDF_TYPE`).

use serde::Deserialize;
use serde::Serialize;

/// The closed set of scalar value kinds used by class validator specs.
///
/// # Invariants
/// - This enumeration is closed; there is no "unknown" variant. Any new
///   value type requires a code change here and in
///   [`crate::runtime::primitives::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// A boolean literal.
    Boolean,
    /// A `data:` URI.
    DataUri,
    /// Either a `DataUri` or a `Url`.
    DataUriOrUrl,
    /// An ISO-8601 timestamp with an explicit timezone.
    Datetime,
    /// An address matching `^[^@]+@[^@]+$`.
    Email,
    /// An IRI referencing another node, resolved locally or fetched.
    Id,
    /// An identity hash string (`md5$…` or `sha256$…`).
    IdentityHash,
    /// An absolute or blank-node IRI.
    Iri,
    /// A markdown-flavored text string.
    MarkdownText,
    /// A JSON-LD `type` value, checked via term expansion.
    RdfType,
    /// A plain text string.
    Text,
    /// A well-formed `http`/`https` URL.
    Url,
}

/// Value types validated directly by `is_valid`, as opposed to `Id` (node
/// reference resolution) or `RdfType` (term expansion).
pub const PRIMITIVES: [ValueType; 8] = [
    ValueType::Boolean,
    ValueType::Datetime,
    ValueType::Id,
    ValueType::IdentityHash,
    ValueType::Iri,
    ValueType::MarkdownText,
    ValueType::Text,
    ValueType::Url,
];

impl ValueType {
    /// Returns true when this value type is validated by
    /// [`crate::runtime::primitives::is_valid`] rather than by reference
    /// resolution or term expansion.
    #[must_use]
    pub fn is_primitive(self) -> bool {
        PRIMITIVES.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::PRIMITIVES;
    use super::ValueType;

    #[test]
    fn id_and_rdf_type_are_not_primitives() {
        assert!(!PRIMITIVES.contains(&ValueType::RdfType));
        assert!(PRIMITIVES.contains(&ValueType::Id));
    }

    #[test]
    fn is_primitive_matches_the_table() {
        assert!(ValueType::Text.is_primitive());
        assert!(!ValueType::DataUriOrUrl.is_primitive());
    }
}
