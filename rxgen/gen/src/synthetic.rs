//! Synthetic types and members.
//!
//! Synthesizers describe generated classes with the types in this module and
//! never produce text. Method bodies are small statement and expression
//! trees; turning them into source is the renderer's job (see
//! [`crate::render`]).
//!
//! ## Examples
//!
//! ```
//! use rxgen_define::{Modifier, ParamDecl, TypeRef};
//! use rxgen_gen::synthetic::{Expr, Stmt, SyntheticMember};
//!
//! // public String getUrl() { return param.getUrl(); }
//! let getter = SyntheticMember::method("getUrl", TypeRef::class("java.lang.String"))
//!     .with_modifier(Modifier::Public)
//!     .with_body(vec![Stmt::Return(Expr::call(Expr::var("param"), "getUrl", vec![]))]);
//!
//! assert!(!getter.is_constructor());
//! assert_eq!(getter.arity(), 0);
//! ```

use rxgen_define::{ClassType, Modifier, Modifiers, ParamDecl, TypeParam, TypeRef};

/// A generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticType {
    pub package: String,
    /// Simple name.
    pub name: String,
    /// Class-level documentation, one line per entry.
    pub doc: Vec<String>,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParam>,
    pub superclass: Option<TypeRef>,
    pub fields: Vec<SyntheticField>,
    pub members: Vec<SyntheticMember>,
}

impl SyntheticType {
    /// Creates an empty public class.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            doc: Vec::new(),
            modifiers: Modifiers::new().with(Modifier::Public),
            type_params: Vec::new(),
            superclass: None,
            fields: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// The raw class reference naming this type.
    pub fn class_type(&self) -> ClassType {
        ClassType::new(self.qualified_name())
    }

    /// This type parameterized by its own type variables.
    pub fn self_type(&self) -> TypeRef {
        TypeRef::parameterized(
            self.qualified_name(),
            self.type_params.iter().map(TypeParam::as_var).collect(),
        )
    }

    pub fn methods(&self) -> impl Iterator<Item = &SyntheticMember> {
        self.members.iter().filter(|m| !m.is_constructor())
    }

    pub fn constructors(&self) -> impl Iterator<Item = &SyntheticMember> {
        self.members.iter().filter(|m| m.is_constructor())
    }

    /// All methods named `name`, in member order.
    pub fn methods_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s SyntheticMember> {
        self.methods().filter(move |m| m.name == name)
    }
}

/// A generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticField {
    pub name: String,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
}

impl SyntheticField {
    pub fn new(name: impl Into<String>, modifiers: Modifiers, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            modifiers,
            ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Constructor,
    Method,
}

/// A generated method or constructor.
///
/// Constructors carry the simple name of their class and a `void` return
/// type, which the renderer omits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticMember {
    pub kind: MemberKind,
    pub name: String,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<ParamDecl>,
    /// The last parameter is rendered as `T...`.
    pub varargs: bool,
    pub return_type: TypeRef,
    pub throws: Vec<TypeRef>,
    pub body: Vec<Stmt>,
}

impl SyntheticMember {
    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            modifiers: Modifiers::new(),
            type_params: Vec::new(),
            params: Vec::new(),
            varargs: false,
            return_type,
            throws: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Constructor,
            ..Self::method(class_name, TypeRef::Void)
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParam>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_params(mut self, params: Vec<ParamDecl>) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(ParamDecl::new(name, ty));
        self
    }

    /// Marks the member varargs. Only honored when the last parameter is an array.
    pub fn with_varargs(mut self, varargs: bool) -> Self {
        self.varargs = varargs && self.params.last().is_some_and(|p| p.ty.is_array());
        self
    }

    pub fn with_throws(mut self, throws: Vec<TypeRef>) -> Self {
        self.throws = throws;
        self
    }

    pub fn with_body(mut self, body: Vec<Stmt>) -> Self {
        self.body = body;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A statement in a generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(Expr),
    Return(Expr),
    /// `Type name = init;`
    Local { ty: TypeRef, name: String, init: Expr },
    Assign { target: Expr, value: Expr },
    /// `if (condition) { then }`
    If { condition: Expr, then: Vec<Stmt> },
    Throw(Expr),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Null,
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
}

/// An expression in a generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    This,
    /// `super(args)`
    Super(Vec<Expr>),
    /// A local, parameter, or unqualified field.
    Var(String),
    Literal(Literal),
    /// `target.name`
    Field { target: Box<Expr>, name: String },
    /// `Class.name`
    StaticField { class: ClassType, name: String },
    /// `target.method(args)`, or `method(args)` when `target` is `None`.
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    /// `Class.method(args)`
    StaticCall {
        class: ClassType,
        method: String,
        args: Vec<Expr>,
    },
    /// `new Class(args)`, or `new Class<>(args)` with `diamond`.
    New {
        class: ClassType,
        diamond: bool,
        args: Vec<Expr>,
    },
    /// `new Type(args) {}`
    AnonymousSubclass { ty: TypeRef, args: Vec<Expr> },
    /// `new Component[]{elements}`
    NewArray { component: TypeRef, elements: Vec<Expr> },
    /// `(Type) expr`
    Cast { ty: TypeRef, expr: Box<Expr> },
    /// `Type.class`
    ClassLiteral(TypeRef),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    pub fn int(value: i64) -> Self {
        Self::Literal(Literal::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::Str(value.into()))
    }

    pub fn call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: Some(Box::new(target)),
            method: method.into(),
            args,
        }
    }

    /// An unqualified call to a method of the enclosing class.
    pub fn local_call(method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: None,
            method: method.into(),
            args,
        }
    }

    pub fn static_call(class: ClassType, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::StaticCall {
            class,
            method: method.into(),
            args,
        }
    }

    pub fn static_field(class: ClassType, name: impl Into<String>) -> Self {
        Self::StaticField {
            class,
            name: name.into(),
        }
    }

    pub fn new_instance(class: ClassType, args: Vec<Expr>) -> Self {
        Self::New {
            class,
            diamond: false,
            args,
        }
    }

    pub fn cast(ty: TypeRef, expr: Expr) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn equals(lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op: BinaryOp::Eq,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varargs_requires_trailing_array() {
        let scalar = SyntheticMember::method("add", TypeRef::Void)
            .with_param("value", TypeRef::class("java.lang.Object"))
            .with_varargs(true);
        assert!(!scalar.varargs);

        let array = SyntheticMember::method("addAll", TypeRef::Void)
            .with_param(
                "values",
                TypeRef::array_of(TypeRef::class("java.lang.Object")),
            )
            .with_varargs(true);
        assert!(array.varargs);

        let empty = SyntheticMember::method("none", TypeRef::Void).with_varargs(true);
        assert!(!empty.varargs);
    }

    #[test]
    fn constructors_and_methods_are_separated() {
        let mut ty = SyntheticType::new("rxhttp.wrapper.param", "RxHttpFooParam");
        ty.members.push(SyntheticMember::constructor("RxHttpFooParam"));
        ty.members.push(SyntheticMember::method("add", TypeRef::Void));
        ty.members.push(SyntheticMember::method("add", TypeRef::Void));

        assert_eq!(ty.constructors().count(), 1);
        assert_eq!(ty.methods().count(), 2);
        assert_eq!(ty.methods_named("add").count(), 2);
        assert_eq!(ty.qualified_name(), "rxhttp.wrapper.param.RxHttpFooParam");
    }

    #[test]
    fn self_type_uses_type_variables() {
        let mut ty = SyntheticType::new("p", "RxHttpGenericParam");
        ty.type_params.push(TypeParam::new("T"));
        assert_eq!(ty.self_type().to_string(), "p.RxHttpGenericParam<T>");
    }
}
