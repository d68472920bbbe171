//! Semantic type references.
//!
//! This module provides the type vocabulary shared by declarations and by
//! the generator's synthetic output:
//!
//! - [`TypeRef`] - Any type that can appear in a signature
//! - [`ClassType`] - A (possibly parameterized) class or interface reference
//! - [`Primitive`] - The eight primitive types
//! - [`TypeParam`] - A declared generic parameter with its bounds
//!
//! Type references are written and read as Java-like type expressions, so a
//! declaration file can say `"java.util.List<T>"` instead of spelling out the
//! tree. See [`crate::parser`] for the grammar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::known::KnownType;
use crate::parser::{TypeSyntaxError, parse_type};

/// The eight primitive types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

/// A class or interface reference with optional type arguments.
///
/// The [`KnownType`] tag is resolved once, when the reference is built, so
/// later checks compare enum tags instead of names.
///
/// ## Examples
///
/// ```
/// use rxgen_define::{ClassType, KnownType, TypeRef};
///
/// let list = ClassType::with_args("java.util.List", vec![TypeRef::var("T")]);
/// assert_eq!(list.known(), Some(KnownType::List));
/// assert_eq!(list.simple_name(), "List");
/// assert_eq!(list.to_string(), "java.util.List<T>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    name: String,
    args: Vec<TypeRef>,
    known: Option<KnownType>,
}

impl ClassType {
    /// Creates a raw (non-parameterized) class reference.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self::with_args(qualified_name, Vec::new())
    }

    /// Creates a parameterized class reference.
    pub fn with_args(qualified_name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        let name = qualified_name.into();
        let known = KnownType::resolve(&name);
        Self { name, args, known }
    }

    /// Creates a reference to a known library type.
    pub fn known_type(known: KnownType, args: Vec<TypeRef>) -> Self {
        Self {
            name: known.qualified_name().to_string(),
            args,
            known: Some(known),
        }
    }

    /// The fully qualified name, without type arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type arguments (empty for raw references).
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// The known-type tag, if this names a fixed library type.
    pub fn known(&self) -> Option<KnownType> {
        self.known
    }

    /// Returns true when this names `known`, ignoring type arguments.
    pub fn is(&self, known: KnownType) -> bool {
        self.known == Some(known)
    }

    /// The last segment of the qualified name.
    ///
    /// Nested classes written with `$` keep only the innermost name.
    pub fn simple_name(&self) -> &str {
        let tail = self.name.rsplit('.').next().unwrap_or(&self.name);
        tail.rsplit('$').next().unwrap_or(tail)
    }

    /// The package portion of the qualified name (empty for the default package).
    pub fn package(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    /// Returns the same class with its type arguments removed.
    pub fn raw(&self) -> ClassType {
        Self {
            name: self.name.clone(),
            args: Vec::new(),
            known: self.known,
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (idx, arg) in self.args.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Any type that can appear in a declaration or a synthetic signature.
///
/// Serialized as a Java-like type expression string.
///
/// ## Examples
///
/// ```
/// use rxgen_define::TypeRef;
///
/// let ty: TypeRef = "java.lang.reflect.Type[]".parse().unwrap();
/// assert!(ty.is_array());
/// assert_eq!(ty.to_string(), "java.lang.reflect.Type[]");
///
/// let var: TypeRef = "T".parse().unwrap();
/// assert_eq!(var, TypeRef::var("T"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// The absence of a value (`void`).
    Void,
    Primitive(Primitive),
    Class(ClassType),
    Array(Box<TypeRef>),
    /// A type variable such as `T`.
    Var(String),
    /// A wildcard argument, optionally bounded.
    Wildcard {
        extends: Option<Box<TypeRef>>,
        super_bound: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    /// A raw class reference.
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::Class(ClassType::new(qualified_name))
    }

    /// A parameterized class reference.
    pub fn parameterized(qualified_name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Class(ClassType::with_args(qualified_name, args))
    }

    /// A reference to a known library type.
    pub fn known(known: KnownType, args: Vec<TypeRef>) -> Self {
        Self::Class(ClassType::known_type(known, args))
    }

    /// A type variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// An array of `component`.
    pub fn array_of(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    /// Returns the class reference if this is a class type.
    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Returns the known-type tag of a class reference.
    pub fn known_type(&self) -> Option<KnownType> {
        self.as_class().and_then(ClassType::known)
    }

    /// Returns true when this is a class reference naming `known`.
    pub fn is(&self, known: KnownType) -> bool {
        self.known_type() == Some(known)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns true for an array whose component is the known type `known`.
    pub fn is_array_of(&self, known: KnownType) -> bool {
        match self {
            Self::Array(component) => component.is(known),
            _ => false,
        }
    }

    /// Returns true when this is a class reference whose raw name is `qualified_name`.
    pub fn has_raw_name(&self, qualified_name: &str) -> bool {
        self.as_class().is_some_and(|class| class.name() == qualified_name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Class(class) => write!(f, "{class}"),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Var(name) => f.write_str(name),
            Self::Wildcard {
                extends,
                super_bound,
            } => {
                f.write_str("?")?;
                if let Some(bound) = extends {
                    write!(f, " extends {bound}")?;
                }
                if let Some(bound) = super_bound {
                    write!(f, " super {bound}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeSyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_type(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// A generic parameter declared on a type or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParam {
    /// The parameter name, e.g. `T`.
    pub name: String,
    /// Upper bounds (`T extends A & B`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    /// Creates an unbounded type parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Creates a bounded type parameter.
    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// The type variable referring to this parameter.
    pub fn as_var(&self) -> TypeRef {
        TypeRef::var(self.name.clone())
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (idx, bound) in self.bounds.iter().enumerate() {
            f.write_str(if idx == 0 { " extends " } else { " & " })?;
            write!(f, "{bound}")?;
        }
        Ok(())
    }
}
