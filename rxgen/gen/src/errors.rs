//! Error types for the RxHttp generator.
//!
//! Two families of failure exist:
//!
//! - [`ValidationError`] - an annotated declaration breaks its structural
//!   contract. Always tagged with the offending declaration and user-fixable.
//! - [`GeneratorError`] - everything else: configuration, I/O, malformed
//!   input, and internal synthesis failures.

use std::fmt;

use rxgen_define::{DeclarationCategory, TypeSyntaxError};
use thiserror::Error;

/// Why a declaration failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The declaration is not public.
    NotPublic,
    /// The class is abstract.
    Abstract,
    /// The supertype chain never reaches the required marker.
    MissingMarker { marker: &'static str },
    /// A generic parser was declared final.
    FinalGenericParser,
    /// A generic parser declares no zero-argument constructor.
    MissingNoArgConstructor,
    /// The zero-argument constructor is public or private.
    NoArgConstructorNotRestricted,
    /// A generic parser has no constructor taking one type token per type parameter.
    MissingTypeTokenConstructor { signature: String },
    /// The field is not static.
    NotStatic,
    /// A client-provider field has a type other than the client type.
    WrongClientType { found: String },
    /// A converter field's type never reaches the converter marker.
    NotAConverter,
    /// The annotation's alias is empty.
    EmptyAlias,
    /// More than one default base URL was declared.
    DuplicateDefaultBaseUrl { count: usize },
    /// A class annotation on a field, or a field annotation on a class.
    MisplacedAnnotation { expected: &'static str },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPublic => f.write_str("is not public"),
            Self::Abstract => f.write_str("is abstract; abstract classes cannot be annotated"),
            Self::MissingMarker { marker } => write!(f, "must inherit from {marker}"),
            Self::FinalGenericParser => {
                f.write_str("declares type parameters and cannot be declared final")
            }
            Self::MissingNoArgConstructor => {
                f.write_str("must declare a protected no-argument constructor")
            }
            Self::NoArgConstructorNotRestricted => {
                f.write_str("no-argument constructor must be declared protected")
            }
            Self::MissingTypeTokenConstructor { signature } => {
                write!(f, "must declare a '{signature}' constructor")
            }
            Self::NotStatic => f.write_str("is not static"),
            Self::WrongClientType { found } => {
                write!(f, "is a {found}, not an okhttp3.OkHttpClient")
            }
            Self::NotAConverter => f.write_str("is not an rxhttp.wrapper.callback.IConverter"),
            Self::EmptyAlias => f.write_str("has an empty name in its annotation"),
            Self::DuplicateDefaultBaseUrl { count } => write!(
                f,
                "is one of {count} @DefaultDomain declarations; the annotation can only be used once"
            ),
            Self::MisplacedAnnotation { expected } => {
                write!(f, "carries an annotation that only applies to a {expected}")
            }
        }
    }
}

/// A structural contract violation by one annotated declaration.
///
/// ## Examples
///
/// ```
/// use rxgen_define::DeclarationCategory;
/// use rxgen_gen::errors::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(
///     DeclarationCategory::ParameterBuilder,
///     "com.example.HiddenParam",
///     ValidationErrorKind::NotPublic,
/// );
/// assert_eq!(err.to_string(), "@Param com.example.HiddenParam is not public");
/// assert!(!err.is_round_fatal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("@{category} {declaration} {kind}")]
pub struct ValidationError {
    pub category: DeclarationCategory,
    /// Qualified name of the offending declaration.
    pub declaration: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(
        category: DeclarationCategory,
        declaration: impl Into<String>,
        kind: ValidationErrorKind,
    ) -> Self {
        Self {
            category,
            declaration: declaration.into(),
            kind,
        }
    }

    /// Returns true when the error halts the whole round rather than only
    /// its declaration group.
    pub fn is_round_fatal(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::DuplicateDefaultBaseUrl { .. })
    }
}

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// An annotated declaration failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Synthesis failed for a reason that is not the user's fault
    #[error("Internal generator error: {0}")]
    Internal(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to parse round input
    #[error("Failed to parse round input '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read round input
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A type expression could not be parsed
    #[error(transparent)]
    TypeSyntax(#[from] TypeSyntaxError),
}

/// Result alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
