//! RxGen Declaration Model
//!
//! This crate provides the types the host toolchain uses to describe one
//! generation round to the `rxgen-gen` generator: annotated classes and
//! fields, their supertypes and members, and the annotation payloads that
//! decide what gets generated for them.
//!
//! ## Core Types
//!
//! ### Type vocabulary
//!
//! - [`TypeRef`] - Any type that can appear in a signature
//! - [`ClassType`] - A class reference, tagged with its [`KnownType`] when it names a library type
//! - [`KnownType`] - Fixed marker and library types, resolved once at construction
//! - [`TypeParam`] - A generic parameter with bounds
//! - [`Modifiers`] - Visibility and other modifiers
//!
//! ### Declarations
//!
//! - [`TypeDecl`] - A class with supertypes, constructors and methods
//! - [`FieldDecl`] - A static field (converters, clients, base URLs)
//! - [`Annotation`] - The annotation payload attached to a declaration
//! - [`DeclarationCategory`] - Which validator and synthesizer applies
//! - [`RoundInput`] - Everything discovered in one round
//! - [`DeclarationGraph`] - Immutable supertype adjacency for chain walks
//!
//! ## Examples
//!
//! A round with one parameter builder, read from JSON:
//!
//! ```
//! use rxgen_define::{DeclarationCategory, DeclarationGraph, KnownType, RoundInput};
//!
//! let round: RoundInput = serde_json::from_str(r#"{
//!     "types": [{
//!         "name": "com.example.PostEncryptFormParam",
//!         "modifiers": ["public"],
//!         "superclass": "rxhttp.wrapper.param.FormParam",
//!         "annotation": {"kind": "param", "method_name": "postEncryptForm"}
//!     }]
//! }"#).unwrap();
//!
//! let graph = DeclarationGraph::new(&round);
//! let decl = round.annotated_types(DeclarationCategory::ParameterBuilder).next().unwrap();
//! assert!(graph.reaches(decl, KnownType::ParamMarker));
//! ```

pub mod annotation;
pub mod declaration;
pub mod graph;
pub mod known;
pub mod modifier;
pub mod parser;
pub mod prelude;
pub mod round;
pub mod types;

// Re-export main types at crate root
pub use annotation::{Annotation, DeclarationCategory};
pub use declaration::{
    ConstructorDecl, FieldDecl, Member, MethodDecl, ParamDecl, TypeDecl, upper_first,
};
pub use graph::DeclarationGraph;
pub use known::KnownType;
pub use modifier::{Modifier, Modifiers};
pub use parser::{TypeSyntaxError, parse_type};
pub use round::RoundInput;
pub use types::{ClassType, Primitive, TypeParam, TypeRef};
