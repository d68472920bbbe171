//! The per-round input record.

use serde::{Deserialize, Serialize};

use crate::annotation::DeclarationCategory;
use crate::declaration::{FieldDecl, TypeDecl};

/// Everything the host discovered in one generation round.
///
/// `types` holds both annotated declarations and the unannotated context
/// types (superclasses, converter implementations) the chain walks need.
/// Order is significant: it is the order annotated declarations are
/// registered, and therefore the order output is emitted in.
///
/// ## Examples
///
/// ```
/// use rxgen_define::{DeclarationCategory, RoundInput};
///
/// let round: RoundInput = serde_json::from_str(r#"{"types": [], "fields": []}"#).unwrap();
/// assert!(round.is_empty());
/// assert_eq!(round.annotated_types(DeclarationCategory::Parser).count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInput {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl RoundInput {
    pub fn new(types: Vec<TypeDecl>, fields: Vec<FieldDecl>) -> Self {
        Self { types, fields }
    }

    /// Type declarations annotated with `category`, in input order.
    pub fn annotated_types(
        &self,
        category: DeclarationCategory,
    ) -> impl Iterator<Item = &TypeDecl> {
        self.types
            .iter()
            .filter(move |decl| decl.category() == Some(category))
    }

    /// Field declarations annotated with `category`, in input order.
    pub fn annotated_fields(
        &self,
        category: DeclarationCategory,
    ) -> impl Iterator<Item = &FieldDecl> {
        self.fields
            .iter()
            .filter(move |field| field.category() == Some(category))
    }

    /// Number of annotated declarations (types and fields).
    pub fn annotated_count(&self) -> usize {
        self.types.iter().filter(|t| t.annotation.is_some()).count()
            + self.fields.iter().filter(|f| f.annotation.is_some()).count()
    }

    /// Returns true when the round carries no annotated declarations.
    pub fn is_empty(&self) -> bool {
        self.annotated_count() == 0
    }
}
