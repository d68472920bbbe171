//! Convenient re-exports for building declaration rounds.
//!
//! ## Examples
//!
//! ```
//! use rxgen_define::prelude::*;
//!
//! let mut decl = TypeDecl::new("com.example.GetEncryptParam");
//! decl.modifiers = Modifiers::from_iter([Modifier::Public]);
//! decl.superclass = Some(TypeRef::known(KnownType::NoBodyParam, vec![]));
//! decl.annotation = Some(Annotation::Param { method_name: "getEncrypt".to_string() });
//!
//! let round = RoundInput::new(vec![decl], vec![]);
//! assert_eq!(round.annotated_count(), 1);
//! ```

pub use crate::annotation::{Annotation, DeclarationCategory};
pub use crate::declaration::{ConstructorDecl, FieldDecl, Member, MethodDecl, ParamDecl, TypeDecl};
pub use crate::graph::DeclarationGraph;
pub use crate::known::KnownType;
pub use crate::modifier::{Modifier, Modifiers};
pub use crate::round::RoundInput;
pub use crate::types::{ClassType, Primitive, TypeParam, TypeRef};
