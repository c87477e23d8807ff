// openbadges-validate/src/core/class_spec.rs
// ============================================================================
// Module: Class Validator Registry
// Description: The declarative, per-class table of property and
//              task-dependency validators, reproduced bit-for-bit from the
//              canonical tables.
// Purpose: Drive validation task generation for a classified node.
// Dependencies: crate::core::{action, identifiers, ob_classes, task,
//               value_types}
// ============================================================================

//! ## Overview
//! `CLASS_VALIDATORS` is a finite, hand-authored table keyed by [`ObClass`],
//! reproducing the canonical per-class validator lists verbatim.
//! [`get_validation_actions`] walks a class's spec list and emits the
//! corresponding `ADD_TASK` actions.

use crate::core::action::Action;
use crate::core::identifiers::NodeId;
use crate::core::ob_classes::ObClass;
use crate::core::task::PropertyParams;
use crate::core::task::RdfTypeParams;
use crate::core::task::TaskKind;
use crate::core::value_types::ValueType;

/// A single property validator spec within a class's validator list.
///
/// # Invariants
/// - `must_contain_one` and `default` are only meaningful when `prop_type`
///   is [`ValueType::RdfType`].
/// - `expected_class`, `fetch`, and `allow_remote_url` are only meaningful
///   when `prop_type` is [`ValueType::Id`].
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    /// The property name under test.
    pub prop_name: &'static str,
    /// The expected value type.
    pub prop_type: ValueType,
    /// Whether the property must be present.
    pub required: bool,
    /// Whether more than one value is permitted.
    pub many: bool,
    /// For `RdfType` properties, the set the node's `type` list must
    /// intersect.
    pub must_contain_one: &'static [&'static str],
    /// For `RdfType` properties, a default applied via `PATCH_NODE` when
    /// `type` is absent.
    pub default: Option<&'static str>,
    /// For `Id` properties, the class the referenced node must satisfy.
    pub expected_class: Option<ObClass>,
    /// For `Id` properties, whether the reference must be fetched over
    /// HTTP.
    pub fetch: bool,
    /// For `Id` properties, whether an unresolvable local reference may be
    /// tolerated as an acceptable remote URL.
    pub allow_remote_url: bool,
}

/// The subset of [`TaskKind`] that a class validator list may declare
/// directly, independent of any property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTaskKind {
    /// `ASSERTION_VERIFICATION_DEPENDENCIES`.
    AssertionVerificationDependencies,
    /// `ASSERTION_TIMESTAMP_CHECKS`.
    AssertionTimestampChecks,
    /// `CRITERIA_PROPERTY_DEPENDENCIES`.
    CriteriaPropertyDependencies,
    /// `IDENTITY_OBJECT_PROPERTY_DEPENDENCIES`.
    IdentityObjectPropertyDependencies,
    /// `ISSUER_PROPERTY_DEPENDENCIES`.
    IssuerPropertyDependencies,
}

/// A class-dependency task spec within a class's validator list.
#[derive(Debug, Clone, Copy)]
pub struct ClassTaskSpec {
    /// The task kind to emit.
    pub task_kind: ClassTaskKind,
    /// Other task kinds this one is documented as depending on. Advisory
    /// only: the driver has no blocking-prerequisite mechanism, so this is
    /// carried as metadata rather than enforced ordering (see the
    /// project's own resolution of this open question).
    pub prerequisites: &'static [ClassTaskKind],
}

/// A single entry in a class's validator list: either a property check or
/// a standalone task.
#[derive(Debug, Clone, Copy)]
pub enum ValidatorSpec {
    /// A property validator spec.
    Property(PropertySpec),
    /// A class-dependency task spec.
    Task(ClassTaskSpec),
}

const fn prop(
    prop_name: &'static str,
    prop_type: ValueType,
    required: bool,
    many: bool,
) -> PropertySpec {
    PropertySpec {
        prop_name,
        prop_type,
        required,
        many,
        must_contain_one: &[],
        default: None,
        expected_class: None,
        fetch: false,
        allow_remote_url: false,
    }
}

const ASSERTION: &[ValidatorSpec] = &[
    ValidatorSpec::Property(prop("id", ValueType::Iri, true, false)),
    ValidatorSpec::Property(PropertySpec {
        must_contain_one: &["Assertion"],
        ..prop("type", ValueType::RdfType, true, true)
    }),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::IdentityObject),
        ..prop("recipient", ValueType::Id, true, false)
    }),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::BadgeClass),
        fetch: true,
        ..prop("badge", ValueType::Id, true, false)
    }),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::VerificationObjectAssertion),
        ..prop("verification", ValueType::Id, true, false)
    }),
    ValidatorSpec::Property(prop("issuedOn", ValueType::Datetime, true, false)),
    ValidatorSpec::Property(prop("expires", ValueType::Datetime, false, false)),
    ValidatorSpec::Property(prop("image", ValueType::Url, false, false)),
    ValidatorSpec::Property(prop("narrative", ValueType::MarkdownText, false, false)),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::Evidence),
        allow_remote_url: true,
        ..prop("evidence", ValueType::Id, false, true)
    }),
    ValidatorSpec::Task(ClassTaskSpec {
        task_kind: ClassTaskKind::AssertionVerificationDependencies,
        prerequisites: &[ClassTaskKind::IssuerPropertyDependencies],
    }),
    ValidatorSpec::Task(ClassTaskSpec {
        task_kind: ClassTaskKind::AssertionTimestampChecks,
        prerequisites: &[],
    }),
];

const BADGE_CLASS: &[ValidatorSpec] = &[
    ValidatorSpec::Property(prop("id", ValueType::Iri, true, false)),
    ValidatorSpec::Property(PropertySpec {
        must_contain_one: &["BadgeClass"],
        ..prop("type", ValueType::RdfType, true, true)
    }),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::Profile),
        fetch: true,
        ..prop("issuer", ValueType::Id, true, false)
    }),
    ValidatorSpec::Property(prop("name", ValueType::Text, true, false)),
    ValidatorSpec::Property(prop("description", ValueType::Text, true, false)),
    ValidatorSpec::Property(prop("image", ValueType::DataUriOrUrl, true, false)),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::Criteria),
        allow_remote_url: true,
        ..prop("criteria", ValueType::Id, true, false)
    }),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::AlignmentObject),
        ..prop("alignment", ValueType::Id, false, true)
    }),
    ValidatorSpec::Property(prop("tags", ValueType::Text, false, true)),
];

const PROFILE: &[ValidatorSpec] = &[
    ValidatorSpec::Property(prop("id", ValueType::Iri, true, false)),
    ValidatorSpec::Property(PropertySpec {
        must_contain_one: &["Issuer", "Profile"],
        ..prop("type", ValueType::RdfType, true, true)
    }),
    ValidatorSpec::Property(prop("name", ValueType::Text, true, false)),
    ValidatorSpec::Property(prop("description", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("image", ValueType::DataUriOrUrl, false, false)),
    ValidatorSpec::Property(prop("url", ValueType::Url, true, false)),
    ValidatorSpec::Property(prop("email", ValueType::Text, true, false)),
    ValidatorSpec::Property(prop("telephone", ValueType::Text, false, false)),
    ValidatorSpec::Property(PropertySpec {
        expected_class: Some(ObClass::VerificationObjectIssuer),
        ..prop("verification", ValueType::Id, false, false)
    }),
    ValidatorSpec::Task(ClassTaskSpec {
        task_kind: ClassTaskKind::IssuerPropertyDependencies,
        prerequisites: &[],
    }),
];

const ALIGNMENT_OBJECT: &[ValidatorSpec] = &[
    ValidatorSpec::Property(PropertySpec {
        default: Some("AlignmentObject"),
        ..prop("type", ValueType::RdfType, false, true)
    }),
    ValidatorSpec::Property(prop("targetName", ValueType::Text, true, false)),
    ValidatorSpec::Property(prop("targetUrl", ValueType::Url, true, false)),
    ValidatorSpec::Property(prop("description", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("targetFramework", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("targetCode", ValueType::Text, false, false)),
];

const CRITERIA: &[ValidatorSpec] = &[
    ValidatorSpec::Property(PropertySpec {
        default: Some("Criteria"),
        ..prop("type", ValueType::RdfType, false, true)
    }),
    ValidatorSpec::Property(prop("id", ValueType::Iri, false, false)),
    ValidatorSpec::Property(prop("narrative", ValueType::MarkdownText, false, false)),
    ValidatorSpec::Task(ClassTaskSpec {
        task_kind: ClassTaskKind::CriteriaPropertyDependencies,
        prerequisites: &[],
    }),
];

const IDENTITY_OBJECT: &[ValidatorSpec] = &[
    ValidatorSpec::Property(PropertySpec {
        must_contain_one: &["id", "email", "url", "telephone"],
        ..prop("type", ValueType::RdfType, true, false)
    }),
    ValidatorSpec::Property(prop("identity", ValueType::IdentityHash, true, false)),
    ValidatorSpec::Property(prop("hashed", ValueType::Boolean, true, false)),
    ValidatorSpec::Property(prop("salt", ValueType::Text, false, false)),
    ValidatorSpec::Task(ClassTaskSpec {
        task_kind: ClassTaskKind::IdentityObjectPropertyDependencies,
        prerequisites: &[],
    }),
];

const EVIDENCE: &[ValidatorSpec] = &[
    ValidatorSpec::Property(PropertySpec {
        default: Some("Evidence"),
        ..prop("type", ValueType::RdfType, false, true)
    }),
    ValidatorSpec::Property(prop("id", ValueType::Iri, false, false)),
    ValidatorSpec::Property(prop("narrative", ValueType::MarkdownText, false, false)),
    ValidatorSpec::Property(prop("name", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("description", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("genre", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("audience", ValueType::Text, false, false)),
];

const IMAGE: &[ValidatorSpec] = &[
    ValidatorSpec::Property(PropertySpec {
        default: Some("schema:ImageObject"),
        ..prop("type", ValueType::RdfType, false, true)
    }),
    ValidatorSpec::Property(prop("id", ValueType::DataUriOrUrl, true, false)),
    ValidatorSpec::Property(prop("caption", ValueType::Text, false, false)),
    ValidatorSpec::Property(prop("author", ValueType::Iri, false, false)),
];

const VERIFICATION_OBJECT_ASSERTION: &[ValidatorSpec] = &[ValidatorSpec::Property(PropertySpec {
    must_contain_one: &["HostedBadge", "SignedBadge"],
    ..prop("type", ValueType::RdfType, true, false)
})];

const VERIFICATION_OBJECT_ISSUER: &[ValidatorSpec] = &[
    ValidatorSpec::Property(PropertySpec {
        default: Some("VerificationObject"),
        ..prop("type", ValueType::RdfType, false, true)
    }),
    ValidatorSpec::Property(prop("verificationProperty", ValueType::Iri, false, false)),
    ValidatorSpec::Property(prop("startsWith", ValueType::Url, false, false)),
    ValidatorSpec::Property(prop("allowedOrigins", ValueType::Text, false, true)),
];

/// Returns the canonical validator list for `class`, or an empty list for
/// classes with no property/task validators of their own
/// (`CryptographicKey`, `Extension`, `RevocationList`, `VerificationObject`)
/// and for `node_class = None`.
#[must_use]
pub fn class_validators(class: Option<ObClass>) -> &'static [ValidatorSpec] {
    match class {
        Some(ObClass::Assertion) => ASSERTION,
        Some(ObClass::BadgeClass) => BADGE_CLASS,
        Some(ObClass::Profile) => PROFILE,
        Some(ObClass::AlignmentObject) => ALIGNMENT_OBJECT,
        Some(ObClass::Criteria) => CRITERIA,
        Some(ObClass::IdentityObject) => IDENTITY_OBJECT,
        Some(ObClass::Evidence) => EVIDENCE,
        Some(ObClass::Image) => IMAGE,
        Some(ObClass::VerificationObjectAssertion) => VERIFICATION_OBJECT_ASSERTION,
        Some(ObClass::VerificationObjectIssuer) => VERIFICATION_OBJECT_ISSUER,
        _ => &[],
    }
}

fn task_kind_for_class_task(class_task: ClassTaskKind, node_id: NodeId) -> TaskKind {
    match class_task {
        ClassTaskKind::AssertionVerificationDependencies => {
            TaskKind::AssertionVerificationDependencies { node_id }
        }
        ClassTaskKind::AssertionTimestampChecks => TaskKind::AssertionTimestampChecks { node_id },
        ClassTaskKind::CriteriaPropertyDependencies => {
            TaskKind::CriteriaPropertyDependencies { node_id }
        }
        ClassTaskKind::IdentityObjectPropertyDependencies => {
            TaskKind::IdentityObjectPropertyDependencies { node_id }
        }
        ClassTaskKind::IssuerPropertyDependencies => TaskKind::IssuerPropertyDependencies { node_id },
    }
}

/// Builds the `ADD_TASK` actions a classified node should receive, per
/// §4.3's dispatch rule: `RdfType` properties become
/// `VALIDATE_RDF_TYPE_PROPERTY`, other primitives (including `Id`) become
/// `VALIDATE_PROPERTY`, and task specs become their named task.
#[must_use]
pub fn get_validation_actions(node_id: &NodeId, node_class: Option<ObClass>) -> Vec<Action> {
    class_validators(node_class)
        .iter()
        .map(|spec| match spec {
            ValidatorSpec::Property(property) if property.prop_type == ValueType::RdfType => {
                Action::AddTask {
                    kind: TaskKind::ValidateRdfTypeProperty(RdfTypeParams {
                        property: PropertyParams {
                            node_id: node_id.clone(),
                            node_class,
                            prop_name: property.prop_name.to_owned(),
                            prop_type: property.prop_type,
                            required: property.required,
                            many: property.many,
                            expected_class: property.expected_class,
                            fetch: property.fetch,
                            allow_remote_url: property.allow_remote_url,
                        },
                        must_contain_one: property.must_contain_one.iter().map(|s| (*s).to_owned()).collect(),
                        default: property.default.map(str::to_owned),
                    }),
                }
            }
            ValidatorSpec::Property(property) => Action::AddTask {
                kind: TaskKind::ValidateProperty(PropertyParams {
                    node_id: node_id.clone(),
                    node_class,
                    prop_name: property.prop_name.to_owned(),
                    prop_type: property.prop_type,
                    required: property.required,
                    many: property.many,
                    expected_class: property.expected_class,
                    fetch: property.fetch,
                    allow_remote_url: property.allow_remote_url,
                }),
            },
            ValidatorSpec::Task(task_spec) => Action::AddTask {
                kind: task_kind_for_class_task(task_spec.task_kind, node_id.clone()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::class_validators;
    use super::get_validation_actions;
    use crate::core::identifiers::NodeId;
    use crate::core::ob_classes::ObClass;

    #[test]
    fn unspecified_classes_have_no_validators() {
        assert!(class_validators(Some(ObClass::Extension)).is_empty());
        assert!(class_validators(None).is_empty());
    }

    #[test]
    fn assertion_emits_one_action_per_spec_entry() {
        let actions = get_validation_actions(&NodeId::new("http://e/a1"), Some(ObClass::Assertion));
        assert_eq!(actions.len(), super::ASSERTION.len());
    }
}
