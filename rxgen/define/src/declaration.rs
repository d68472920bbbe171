//! Annotated declarations as reported by the host toolchain.
//!
//! A round hands the generator two kinds of declaration:
//!
//! - [`TypeDecl`] - a class with its supertypes and members. Parameter
//!   builders and parsers are type declarations; so are the context types
//!   (superclasses, converter implementations) the chain walks need.
//! - [`FieldDecl`] - a field of some class. Converters, client providers
//!   and base URLs are field declarations.
//!
//! Declarations are immutable once read. Identity is the qualified name.

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, DeclarationCategory};
use crate::known::KnownType;
use crate::modifier::Modifiers;
use crate::types::{ClassType, TypeParam, TypeRef};

/// A named, typed parameter of a method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A method declared directly on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default = "void")]
    pub return_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<TypeRef>,
    /// The last parameter was declared with `...`.
    #[serde(default)]
    pub varargs: bool,
    /// The method carries `@Override`.
    #[serde(default)]
    pub overrides: bool,
}

fn void() -> TypeRef {
    TypeRef::Void
}

/// A constructor declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<TypeRef>,
    #[serde(default)]
    pub varargs: bool,
}

impl ConstructorDecl {
    /// Returns true when this is a constructor accepting one reflective type
    /// token per generic parameter.
    ///
    /// Both shapes are accepted: `count` individual `Type` parameters, or a
    /// single `Type[]` (or `Type...`) parameter.
    pub fn takes_type_tokens(&self, count: usize) -> bool {
        let all_tokens = self.params.len() == count
            && self.params.iter().all(|p| p.ty.is(KnownType::ReflectType));
        let token_array =
            self.params.len() == 1 && self.params[0].ty.is_array_of(KnownType::ReflectType);
        all_tokens || token_array
    }
}

/// A member enclosed by a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

/// A class declaration.
///
/// ## Examples
///
/// ```
/// use rxgen_define::TypeDecl;
///
/// let json = r#"{
///     "name": "com.example.param.PostEncryptFormParam",
///     "modifiers": ["public"],
///     "superclass": "rxhttp.wrapper.param.FormParam",
///     "members": [
///         {"kind": "constructor", "modifiers": ["public"],
///          "params": [{"name": "url", "type": "java.lang.String"}]}
///     ],
///     "annotation": {"kind": "param", "method_name": "postEncryptForm"}
/// }"#;
///
/// let decl: TypeDecl = serde_json::from_str(json).unwrap();
/// assert_eq!(decl.simple_name(), "PostEncryptFormParam");
/// assert_eq!(decl.public_constructors().count(), 1);
/// assert_eq!(decl.alias(), Some("postEncryptForm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Fully qualified name.
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    /// `None` is the root of a chain (no superclass).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl TypeDecl {
    /// Creates a bare declaration with no members, supertypes or annotation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(),
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            annotation: None,
        }
    }

    /// The raw class reference naming this declaration.
    pub fn class_type(&self) -> ClassType {
        ClassType::new(self.name.clone())
    }

    /// The declaration's own type, parameterized by its type variables
    /// (`Foo<T>` for `class Foo<T>`).
    pub fn self_type(&self) -> TypeRef {
        TypeRef::parameterized(
            self.name.clone(),
            self.type_params.iter().map(TypeParam::as_var).collect(),
        )
    }

    pub fn simple_name(&self) -> &str {
        let tail = self.name.rsplit('.').next().unwrap_or(&self.name);
        tail.rsplit('$').next().unwrap_or(tail)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn category(&self) -> Option<DeclarationCategory> {
        self.annotation.as_ref().map(Annotation::category)
    }

    /// The annotation alias (method name or parser name), if annotated.
    pub fn alias(&self) -> Option<&str> {
        self.annotation.as_ref().and_then(Annotation::alias)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Constructor(ctor) => Some(ctor),
            Member::Method(_) => None,
        })
    }

    pub fn public_constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.constructors().filter(|ctor| ctor.modifiers.is_public())
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            Member::Constructor(_) => None,
        })
    }

    /// Public, non-static methods that do not override a base contract.
    pub fn mirrored_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods().filter(|method| {
            method.modifiers.is_public() && !method.modifiers.is_static() && !method.overrides
        })
    }

    /// Finds the zero-argument constructor, if one is declared.
    pub fn no_arg_constructor(&self) -> Option<&ConstructorDecl> {
        self.constructors().find(|ctor| ctor.params.is_empty())
    }

    /// Returns the element type produced by the parser's `onParse(okhttp3.Response)`.
    ///
    /// The method must be public and non-static and take exactly one
    /// response-message parameter.
    pub fn parse_return_type(&self) -> Option<&TypeRef> {
        self.methods()
            .find(|method| {
                method.name == "onParse"
                    && method.modifiers.is_public()
                    && !method.modifiers.is_static()
                    && method.params.len() == 1
                    && method.params[0].ty.is(KnownType::Response)
            })
            .map(|method| &method.return_type)
    }
}

/// A field declaration.
///
/// ## Examples
///
/// ```
/// use rxgen_define::FieldDecl;
///
/// let json = r#"{
///     "owner": "com.example.RxHttpManager",
///     "name": "fastJsonConverter",
///     "modifiers": ["public", "static"],
///     "type": "rxhttp.wrapper.callback.IConverter",
///     "annotation": {"kind": "converter", "name": "FastJson"}
/// }"#;
///
/// let field: FieldDecl = serde_json::from_str(json).unwrap();
/// assert_eq!(field.qualified_name(), "com.example.RxHttpManager.fastJsonConverter");
/// assert_eq!(field.alias(), "FastJson");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Qualified name of the enclosing class.
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl FieldDecl {
    /// `Owner.field`, used to identify the field in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    pub fn category(&self) -> Option<DeclarationCategory> {
        self.annotation.as_ref().map(Annotation::category)
    }

    /// The annotation name, falling back to the field name with its first
    /// letter uppercased when the annotation leaves it empty.
    pub fn alias(&self) -> String {
        match self.annotation.as_ref().and_then(Annotation::alias) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => upper_first(&self.name),
        }
    }
}

/// Uppercases the first character of `s`.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
