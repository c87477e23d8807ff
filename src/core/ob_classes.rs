// openbadges-validate/src/core/ob_classes.rs
// ============================================================================
// Module: Open Badges Classes
// Description: The closed set of expected class names used by validators.
// Purpose: Provide a typed, exhaustive alternative to string class dispatch.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! `ObClass` replaces the source implementation's string-keyed class
//! dispatch with a closed enumeration: validator tables in
//! [`crate::core::class_spec`] are keyed by this type rather than by `&str`.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The closed set of Open Badges v2 class names recognized by the engine.
///
/// # Invariants
/// - `ALL_CLASSES` enumerates every variant; [`ObClass::from_type_str`]
///   matches against exactly that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObClass {
    /// `AlignmentObject` — an educational/competency framework alignment.
    AlignmentObject,
    /// `Assertion` — a badge awarded to a recipient.
    Assertion,
    /// `BadgeClass` — the definition/template of a badge.
    BadgeClass,
    /// `Criteria` — the narrative describing how a badge is earned.
    Criteria,
    /// `CryptographicKey` — a key used for signed badge verification.
    CryptographicKey,
    /// `Extension` — an Open Badges extension node.
    Extension,
    /// `Evidence` — supporting evidence for an assertion.
    Evidence,
    /// `IdentityObject` — a recipient identifier.
    IdentityObject,
    /// `Image` — an image reference (badge or criteria illustration).
    Image,
    /// `Profile` — an issuer or recipient profile.
    Profile,
    /// `RevocationList` — a badge revocation list.
    RevocationList,
    /// `VerificationObject` — base verification metadata.
    VerificationObject,
    /// `VerificationObjectAssertion` — verification metadata on an
    /// assertion.
    VerificationObjectAssertion,
    /// `VerificationObjectIssuer` — verification metadata on a profile.
    VerificationObjectIssuer,
}

/// Every recognized class, in declaration order.
pub const ALL_CLASSES: [ObClass; 14] = [
    ObClass::AlignmentObject,
    ObClass::Assertion,
    ObClass::BadgeClass,
    ObClass::Criteria,
    ObClass::CryptographicKey,
    ObClass::Extension,
    ObClass::Evidence,
    ObClass::IdentityObject,
    ObClass::Image,
    ObClass::Profile,
    ObClass::RevocationList,
    ObClass::VerificationObject,
    ObClass::VerificationObjectAssertion,
    ObClass::VerificationObjectIssuer,
];

impl ObClass {
    /// Returns the canonical JSON-LD type string for this class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlignmentObject => "AlignmentObject",
            Self::Assertion => "Assertion",
            Self::BadgeClass => "BadgeClass",
            Self::Criteria => "Criteria",
            Self::CryptographicKey => "CryptographicKey",
            Self::Extension => "Extension",
            Self::Evidence => "Evidence",
            Self::IdentityObject => "IdentityObject",
            Self::Image => "Image",
            Self::Profile => "Profile",
            Self::RevocationList => "RevocationList",
            Self::VerificationObject => "VerificationObject",
            Self::VerificationObjectAssertion => "VerificationObjectAssertion",
            Self::VerificationObjectIssuer => "VerificationObjectIssuer",
        }
    }

    /// Finds the first class in [`ALL_CLASSES`] whose string form equals
    /// `type_str`, mirroring `detect_and_validate_node_class`'s scalar
    /// `type` lookup.
    #[must_use]
    pub fn from_type_str(type_str: &str) -> Option<Self> {
        ALL_CLASSES.into_iter().find(|class| class.as_str() == type_str)
    }
}

impl fmt::Display for ObClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
