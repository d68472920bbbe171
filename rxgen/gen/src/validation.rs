//! Structural validation of annotated declarations.
//!
//! Each annotation category carries a structural contract. A declaration
//! that breaks it is rejected with a [`ValidationError`] naming the
//! declaration; nothing is synthesized from it.
//!
//! ## Validation Checks
//!
//! - **Param**: public, not abstract, supertypes reach `rxhttp.wrapper.param.Param`
//! - **Parser**: public, not abstract, supertypes reach `rxhttp.wrapper.parse.Parser`.
//!   Generic parsers must also not be final, must declare a protected (or
//!   package-private) no-argument constructor and, with reactive integration
//!   enabled, a constructor taking one `java.lang.reflect.Type` per type parameter
//! - **Converter**: public static field whose type reaches `IConverter`
//! - **OkClient**: public static field of type `okhttp3.OkHttpClient`
//! - **Domain / DefaultDomain**: public static field
//!
//! ## Examples
//!
//! ```
//! use rxgen_define::{DeclarationCategory, DeclarationGraph, RoundInput, TypeDecl};
//! use rxgen_gen::config::GeneratorConfig;
//! use rxgen_gen::errors::ValidationErrorKind;
//! use rxgen_gen::validation::Validator;
//!
//! let hidden = TypeDecl::new("com.example.HiddenParam");
//! let round = RoundInput::new(vec![hidden.clone()], vec![]);
//! let graph = DeclarationGraph::new(&round);
//! let config = GeneratorConfig::default();
//!
//! let err = Validator::new(&graph, &config)
//!     .validate_type(&hidden, DeclarationCategory::ParameterBuilder)
//!     .unwrap_err();
//! assert_eq!(err.kind, ValidationErrorKind::NotPublic);
//! ```

use rxgen_define::{
    DeclarationCategory, DeclarationGraph, FieldDecl, KnownType, Modifier, TypeDecl,
};

use crate::config::GeneratorConfig;
use crate::errors::{ValidationError, ValidationErrorKind};

/// Checks declarations against their category's contract.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    graph: &'a DeclarationGraph<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> Validator<'a> {
    pub fn new(graph: &'a DeclarationGraph<'a>, config: &'a GeneratorConfig) -> Self {
        Self { graph, config }
    }

    /// Validates a class declaration as a member of `category`.
    ///
    /// ## Errors
    ///
    /// Returns the first contract violation found. Field categories are
    /// rejected with `ValidationErrorKind::MisplacedAnnotation`.
    pub fn validate_type(
        &self,
        decl: &TypeDecl,
        category: DeclarationCategory,
    ) -> Result<(), ValidationError> {
        match category {
            DeclarationCategory::ParameterBuilder => self.validate_param(decl),
            DeclarationCategory::Parser => self.validate_parser(decl),
            _ => Err(reject(
                category,
                &decl.name,
                ValidationErrorKind::MisplacedAnnotation { expected: "field" },
            )),
        }
    }

    /// Validates a field declaration as a member of `category`.
    ///
    /// ## Errors
    ///
    /// Returns the first contract violation found. Class categories are
    /// rejected with `ValidationErrorKind::MisplacedAnnotation`.
    pub fn validate_field(
        &self,
        field: &FieldDecl,
        category: DeclarationCategory,
    ) -> Result<(), ValidationError> {
        let name = field.qualified_name();

        if !category.is_field() {
            return Err(reject(
                category,
                &name,
                ValidationErrorKind::MisplacedAnnotation { expected: "class" },
            ));
        }

        // Check 1: every field category requires `public static`
        if !field.modifiers.is_public() {
            return Err(reject(category, &name, ValidationErrorKind::NotPublic));
        }
        if !field.modifiers.is_static() {
            return Err(reject(category, &name, ValidationErrorKind::NotStatic));
        }

        // Check 2: category-specific type rules
        match category {
            DeclarationCategory::ClientProvider => {
                let exact = field
                    .ty
                    .as_class()
                    .is_some_and(|class| class.is(KnownType::OkHttpClient) && class.args().is_empty());
                if !exact {
                    return Err(reject(
                        category,
                        &name,
                        ValidationErrorKind::WrongClientType {
                            found: field.ty.to_string(),
                        },
                    ));
                }
            }
            DeclarationCategory::Converter => {
                if !self.graph.type_reaches(&field.ty, KnownType::ConverterMarker) {
                    return Err(reject(category, &name, ValidationErrorKind::NotAConverter));
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn validate_param(&self, decl: &TypeDecl) -> Result<(), ValidationError> {
        let category = DeclarationCategory::ParameterBuilder;
        check_concrete_public(decl, category)?;

        if !self.graph.reaches(decl, KnownType::ParamMarker) {
            return Err(reject(
                category,
                &decl.name,
                ValidationErrorKind::MissingMarker {
                    marker: KnownType::ParamMarker.qualified_name(),
                },
            ));
        }
        Ok(())
    }

    fn validate_parser(&self, decl: &TypeDecl) -> Result<(), ValidationError> {
        let category = DeclarationCategory::Parser;
        check_concrete_public(decl, category)?;

        if decl.is_generic() {
            // Check 1: generic parsers are instantiated through anonymous subclasses
            if decl.modifiers.is_final() {
                return Err(reject(category, &decl.name, ValidationErrorKind::FinalGenericParser));
            }

            // Check 2: ...which need a restricted no-argument constructor
            let no_arg = decl.no_arg_constructor().ok_or_else(|| {
                reject(category, &decl.name, ValidationErrorKind::MissingNoArgConstructor)
            })?;
            if !no_arg.modifiers.is_restricted() {
                return Err(reject(
                    category,
                    &decl.name,
                    ValidationErrorKind::NoArgConstructorNotRestricted,
                ));
            }

            // Check 3: reactive accessors pass type tokens explicitly
            if self.config.reactive.is_enabled() {
                let count = decl.type_params.len();
                let found = decl
                    .constructors()
                    .filter(|ctor| !ctor.modifiers.contains(Modifier::Private))
                    .any(|ctor| ctor.takes_type_tokens(count));
                if !found {
                    return Err(reject(
                        category,
                        &decl.name,
                        ValidationErrorKind::MissingTypeTokenConstructor {
                            signature: type_token_signature(decl.simple_name(), count),
                        },
                    ));
                }
            }
        }

        if !self.graph.reaches(decl, KnownType::ParserMarker) {
            return Err(reject(
                category,
                &decl.name,
                ValidationErrorKind::MissingMarker {
                    marker: KnownType::ParserMarker.qualified_name(),
                },
            ));
        }
        Ok(())
    }
}

fn check_concrete_public(
    decl: &TypeDecl,
    category: DeclarationCategory,
) -> Result<(), ValidationError> {
    if !decl.modifiers.is_public() {
        return Err(reject(category, &decl.name, ValidationErrorKind::NotPublic));
    }
    if decl.modifiers.is_abstract() {
        return Err(reject(category, &decl.name, ValidationErrorKind::Abstract));
    }
    Ok(())
}

fn reject(category: DeclarationCategory, name: &str, kind: ValidationErrorKind) -> ValidationError {
    ValidationError::new(category, name, kind)
}

/// `public Foo(java.lang.reflect.Type, java.lang.reflect.Type)`
fn type_token_signature(simple_name: &str, count: usize) -> String {
    let tokens = vec![KnownType::ReflectType.qualified_name(); count].join(", ");
    format!("public {simple_name}({tokens})")
}
