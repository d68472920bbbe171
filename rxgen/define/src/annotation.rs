//! Annotation payloads and declaration categories.
//!
//! Every annotated declaration carries exactly one [`Annotation`]. The
//! annotation decides which [`DeclarationCategory`] the declaration belongs
//! to, and with it which validator and synthesizer applies.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::types::TypeRef;

/// The six annotation categories the generator understands.
///
/// ## Examples
///
/// ```
/// use rxgen_define::DeclarationCategory;
///
/// assert_eq!(DeclarationCategory::ParameterBuilder.to_string(), "Param");
/// assert!(DeclarationCategory::Converter.is_field());
/// assert!(!DeclarationCategory::Parser.is_field());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum DeclarationCategory {
    /// A request-parameter builder class.
    #[strum(serialize = "Param")]
    ParameterBuilder,
    /// A response parser class.
    #[strum(serialize = "Parser")]
    Parser,
    /// A static converter field.
    #[strum(serialize = "Converter")]
    Converter,
    /// A static HTTP-client field.
    #[strum(serialize = "OkClient")]
    ClientProvider,
    /// A static base-URL field.
    #[strum(serialize = "Domain")]
    BaseUrlField,
    /// The single static default base-URL field.
    #[strum(serialize = "DefaultDomain")]
    DefaultBaseUrlField,
}

impl DeclarationCategory {
    /// Returns true for categories annotating fields rather than types.
    pub fn is_field(&self) -> bool {
        !matches!(self, Self::ParameterBuilder | Self::Parser)
    }
}

/// The annotation payload attached to a declaration.
///
/// Serialized with a `kind` tag:
///
/// ```
/// use rxgen_define::{Annotation, DeclarationCategory};
///
/// let json = r#"{"kind": "param", "method_name": "postEncryptForm"}"#;
/// let annotation: Annotation = serde_json::from_str(json).unwrap();
/// assert_eq!(annotation.category(), DeclarationCategory::ParameterBuilder);
/// assert_eq!(annotation.alias(), Some("postEncryptForm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// `@Param(methodName = ...)`
    Param { method_name: String },
    /// `@Parser(name = ..., wrappers = {...})`
    Parser {
        name: String,
        /// Extra container types used for wrapped accessor variants.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        wrappers: Vec<TypeRef>,
    },
    /// `@Converter(name = ...)`
    Converter {
        #[serde(default)]
        name: String,
    },
    /// `@OkClient(name = ...)`
    OkClient {
        #[serde(default)]
        name: String,
    },
    /// `@Domain(name = ...)`
    Domain {
        #[serde(default)]
        name: String,
    },
    /// `@DefaultDomain`
    DefaultDomain,
}

impl Annotation {
    pub fn category(&self) -> DeclarationCategory {
        match self {
            Self::Param { .. } => DeclarationCategory::ParameterBuilder,
            Self::Parser { .. } => DeclarationCategory::Parser,
            Self::Converter { .. } => DeclarationCategory::Converter,
            Self::OkClient { .. } => DeclarationCategory::ClientProvider,
            Self::Domain { .. } => DeclarationCategory::BaseUrlField,
            Self::DefaultDomain => DeclarationCategory::DefaultBaseUrlField,
        }
    }

    /// The user-supplied name carried by the annotation, if the category has one.
    ///
    /// An empty string is returned as-is; callers decide whether empty is an
    /// error (type categories) or falls back to the field name (field categories).
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Param { method_name } => Some(method_name),
            Self::Parser { name, .. }
            | Self::Converter { name }
            | Self::OkClient { name }
            | Self::Domain { name } => Some(name),
            Self::DefaultDomain => None,
        }
    }

    /// The declared wrapper container types (parsers only).
    pub fn wrappers(&self) -> &[TypeRef] {
        match self {
            Self::Parser { wrappers, .. } => wrappers,
            _ => &[],
        }
    }
}
