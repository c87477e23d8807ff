// openbadges-validate/src/runtime/primitives.rs
// ============================================================================
// Module: Primitive Value Validator
// Description: Pure predicates over scalar property value types.
// Purpose: Back `validate_property`'s per-value type check.
// Dependencies: crate::{core::value_types, interfaces}, regex, serde_json,
//               time, url
// ============================================================================

//! ## Overview
//! `is_valid` is the pure per-value-type predicate backing property
//! validation. Every variant is a plain predicate over a `serde_json::Value`
//! except `RdfType`, which delegates to the injected [`JsonLdCodec`] to
//! check whether the value expands to an absolute IRI in the Open Badges v2
//! context — the one primitive check that is not self-contained.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::core::value_types::ValueType;
use crate::interfaces::JsonLdCodec;

#[allow(clippy::unwrap_used, reason = "fixed regex literals; construction cannot fail at runtime")]
pub(crate) static BLANK_NODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^_:b\d+$").unwrap());

#[allow(clippy::unwrap_used, reason = "fixed regex literals; construction cannot fail at runtime")]
static URN_UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

#[allow(clippy::unwrap_used, reason = "fixed regex literals; construction cannot fail at runtime")]
static DATA_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:(?:[-\w.+]+/[-\w.+]+)?;?(?:base64)?,").unwrap());

#[allow(clippy::unwrap_used, reason = "fixed regex literals; construction cannot fail at runtime")]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+$").unwrap());

#[allow(clippy::unwrap_used, reason = "fixed regex literals; construction cannot fail at runtime")]
static ISO8601_TZ_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[Tt]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|z|[+-]\d{2}:?\d{2})$").unwrap()
});

#[allow(clippy::unwrap_used, reason = "fixed regex literals; construction cannot fail at runtime")]
static IDENTITY_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:md5\$[0-9a-fA-F]{32}|sha256\$[0-9a-fA-F]{64})$").unwrap());

/// Returns true when `s` is a string matching `md5$<32 hex>` or
/// `sha256$<64 hex>`, the "tight semantics enforced elsewhere" the
/// `IDENTITY_HASH` primitive row defers to.
#[must_use]
pub fn is_hashed_identity_hash(s: &str) -> bool {
    IDENTITY_HASH_RE.is_match(s)
}

fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn is_iri(s: &str) -> bool {
    is_url(s) || BLANK_NODE_RE.is_match(s) || URN_UUID_RE.is_match(s)
}

fn is_data_uri(s: &str) -> bool {
    DATA_URI_RE.is_match(s) && url::Url::parse(s).is_ok()
}

fn is_datetime(s: &str) -> bool {
    parse_datetime(s).is_some()
}

/// Parses `s` as an ISO-8601 timestamp with an explicit timezone, returning
/// `None` if it does not match that shape or fails a real calendar-field
/// parse. Shared by the `DATETIME` primitive check and
/// `ASSERTION_TIMESTAMP_CHECKS`, which needs the parsed value, not just a
/// boolean.
#[must_use]
pub fn parse_datetime(s: &str) -> Option<time::OffsetDateTime> {
    if !ISO8601_TZ_RE.is_match(s) {
        return None;
    }
    // The regex above accepts non-colon offsets (`+0100`) that `Rfc3339`
    // rejects; normalize before the real parse so the calendar fields
    // themselves (month/day/hour ranges) are checked, not just the shape.
    let normalized = if let Some(sign_pos) = s.rfind(['+', '-']) {
        let (head, offset) = s.split_at(sign_pos);
        if offset.len() == 5 && !offset.contains(':') {
            format!("{head}{}:{}", &offset[..3], &offset[3..])
        } else {
            s.to_owned()
        }
    } else {
        s.to_owned()
    };
    time::OffsetDateTime::parse(&normalized, &time::format_description::well_known::Rfc3339).ok()
}

/// Returns true when `s` matches `^[^@]+@[^@]+$`, the `EMAIL` primitive's
/// contract. Exposed directly for `IDENTITY_OBJECT_PROPERTY_DEPENDENCIES`,
/// which has no codec handy to route through [`is_valid`].
#[must_use]
pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

fn rdf_type_is_absolute(value: &Value, codec: &dyn JsonLdCodec) -> bool {
    let Ok(expanded) = codec.expand(&serde_json::json!({ "type": value })) else {
        return false;
    };
    let Some(expanded_type) = expanded.get("type") else {
        return false;
    };
    let candidates: Vec<&str> = match expanded_type {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    !candidates.is_empty() && candidates.iter().all(|term| term.contains("://"))
}

/// The pure per-value-type predicate backing property validation.
#[must_use]
pub fn is_valid(value_type: ValueType, value: &Value, codec: &dyn JsonLdCodec) -> bool {
    match value_type {
        ValueType::Boolean => value.is_boolean(),
        ValueType::Text | ValueType::MarkdownText | ValueType::IdentityHash => value.is_string(),
        ValueType::Iri | ValueType::Id => value.as_str().is_some_and(is_iri),
        ValueType::Url => value.as_str().is_some_and(is_url),
        ValueType::DataUri => value.as_str().is_some_and(is_data_uri),
        ValueType::DataUriOrUrl => {
            value.as_str().is_some_and(|s| is_url(s) || is_data_uri(s))
        }
        ValueType::Datetime => value.as_str().is_some_and(is_datetime),
        ValueType::Email => value.as_str().is_some_and(|s| EMAIL_RE.is_match(s)),
        ValueType::RdfType => rdf_type_is_absolute(value, codec),
    }
}
