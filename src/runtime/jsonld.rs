// openbadges-validate/src/runtime/jsonld.rs
// ============================================================================
// Module: Open Badges v2 JSON-LD Context
// Description: A closed-vocabulary JSON-LD codec sufficient for this
//              engine's own term expansion needs.
// Purpose: Default implementation of `JsonLdCodec`, grounded in the fixed
//          set of terms the class validator tables reference.
// Dependencies: crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! `ObV2Context` is not a general JSON-LD processor; the engine treats
//! expansion/compaction as an opaque capability with two operations. This
//! is one concrete, minimal
//! implementation of that capability: a fixed term table covering exactly
//! the vocabulary used anywhere in the canonical class validator tables,
//! plus the `schema:` CURIE prefix `BadgeClass`'s `Image` default relies
//! on. Callers integrating a real JSON-LD processor provide their own
//! [`JsonLdCodec`] instead.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::interfaces::JsonLdCodec;
use crate::interfaces::JsonLdError;

fn vocabulary() -> BTreeMap<&'static str, String> {
    const BASE: &str = "https://w3id.org/openbadges#";
    [
        ("Assertion", "Assertion"),
        ("BadgeClass", "BadgeClass"),
        ("Profile", "Profile"),
        ("Issuer", "Profile"),
        ("IdentityObject", "IdentityObject"),
        ("Criteria", "Criteria"),
        ("Evidence", "Evidence"),
        ("AlignmentObject", "AlignmentObject"),
        ("Image", "Image"),
        ("VerificationObject", "VerificationObject"),
        ("HostedBadge", "VerificationObject#Hosted"),
        ("SignedBadge", "VerificationObject#Signed"),
        ("Extension", "Extension"),
        ("id", "id"),
        ("email", "email"),
        ("url", "url"),
        ("telephone", "telephone"),
    ]
    .into_iter()
    .map(|(term, suffix)| (term, format!("{BASE}{suffix}")))
    .collect()
}

/// A fixed, closed-vocabulary JSON-LD codec for the Open Badges v2 context.
#[derive(Debug, Clone, Default)]
pub struct ObV2Context;

impl ObV2Context {
    fn expand_term(term: &str) -> String {
        if term.contains("://") {
            return term.to_owned();
        }
        if let Some(rest) = term.strip_prefix("schema:") {
            return format!("http://schema.org/{rest}");
        }
        vocabulary().get(term).cloned().unwrap_or_else(|| term.to_owned())
    }

    fn expand_type_field(value: &Value) -> Value {
        match value {
            Value::String(term) => Value::String(Self::expand_term(term)),
            Value::Array(items) => {
                Value::Array(items.iter().map(Self::expand_type_field).collect())
            }
            other => other.clone(),
        }
    }
}

impl JsonLdCodec for ObV2Context {
    fn expand(&self, doc: &Value) -> Result<Value, JsonLdError> {
        let Some(object) = doc.as_object() else {
            return Err(JsonLdError::Processing("expand requires a JSON object".to_owned()));
        };
        let mut expanded = object.clone();
        for key in ["type", "@type"] {
            if let Some(value) = object.get(key) {
                expanded.insert(key.to_owned(), Self::expand_type_field(value));
            }
        }
        Ok(Value::Object(expanded))
    }

    fn compact(&self, doc: &Value, _contexts: &[Value]) -> Result<Value, JsonLdError> {
        // This closed-vocabulary codec has no general compaction algorithm;
        // extension bodies already arrive in short (compacted) form, so
        // identity is the correct behavior for this implementation.
        Ok(doc.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ObV2Context;
    use crate::interfaces::JsonLdCodec;

    #[test]
    fn expand_maps_known_terms_to_absolute_iris() {
        let codec = ObV2Context;
        let expanded = codec.expand(&json!({"type": "Assertion"})).unwrap_or_else(|_| json!({}));
        assert_eq!(expanded.get("type"), Some(&json!("https://w3id.org/openbadges#Assertion")));
    }

    #[test]
    fn expand_leaves_unknown_terms_unexpanded() {
        let codec = ObV2Context;
        let expanded = codec.expand(&json!({"type": "NotARealTerm"})).unwrap_or_else(|_| json!({}));
        assert_eq!(expanded.get("type"), Some(&json!("NotARealTerm")));
    }

    #[test]
    fn schema_prefixed_terms_expand_to_schema_org() {
        let codec = ObV2Context;
        let expanded =
            codec.expand(&json!({"type": "schema:ImageObject"})).unwrap_or_else(|_| json!({}));
        assert_eq!(expanded.get("type"), Some(&json!("http://schema.org/ImageObject")));
    }
}
