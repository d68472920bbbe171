//! Method-surface synthesis for parameter builders.
//!
//! Every `@Param` class `X` gets a fluent wrapper `RxHttpX` that:
//!
//! - extends a wrapper base chosen from `X`'s immediate superclass,
//! - has one constructor `RxHttpX(X param)` delegating to `super(param)`,
//! - mirrors each public, non-static, non-overriding method of `X`.
//!
//! Mirrored methods that return `X` return the wrapper instead (`return this`
//! after delegating), so calls keep chaining on the wrapper type.
//!
//! In addition each public constructor of `X` becomes a static factory named
//! by the annotation alias. The factories live on the umbrella `RxHttp` type,
//! see [`crate::codegen::umbrella`].
//!
//! ## Wrapper bases
//!
//! | Superclass of `X` | Wrapper base | Delegate |
//! |-------------------|--------------|----------|
//! | `BodyParam`, `FormParam`, `JsonParam`, `JsonArrayParam`, `NoBodyParam` | `RxHttp{Superclass}` | `((X) param)` |
//! | `AbstractBodyParam<..>` | `RxHttpAbstractBodyParam<X, RxHttpX>` | `param` |
//! | anything else | `RxHttp<X, RxHttpX>` | `param` |

use rxgen_define::{
    ConstructorDecl, KnownType, MethodDecl, Modifier, ParamDecl, TypeDecl, TypeRef,
};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::synthetic::{Expr, Stmt, SyntheticMember, SyntheticType};

/// Prefix of every generated wrapper and of the umbrella type.
pub const WRAPPER_PREFIX: &str = "RxHttp";

/// Name of the trailing format-arguments parameter on string factories.
pub const FORMAT_ARGS: &str = "formatArgs";

/// The wrapper type and the factories synthesized for one parameter builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSurface {
    pub wrapper: SyntheticType,
    /// Static factories, one per public constructor, for the umbrella type.
    pub factories: Vec<SyntheticMember>,
}

/// The resolved wrapper base and how mirrored calls reach the wrapped instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperBase {
    pub superclass: TypeRef,
    /// Receiver expression for delegated calls.
    pub delegate: Expr,
}

/// Synthesizes the wrapper type and factories for a validated `@Param` class.
///
/// ## Arguments
///
/// * `alias` - The annotation's `method_name`; names every factory
/// * `decl` - The parameter builder declaration
/// * `config` - Supplies the target package
///
/// ## Examples
///
/// ```
/// use rxgen_define::TypeDecl;
/// use rxgen_gen::codegen::surface::synthesize_param;
/// use rxgen_gen::config::GeneratorConfig;
///
/// let decl: TypeDecl = serde_json::from_str(r#"{
///     "name": "com.example.PostEncryptFormParam",
///     "modifiers": ["public"],
///     "superclass": "rxhttp.wrapper.param.FormParam",
///     "members": [{"kind": "constructor", "modifiers": ["public"],
///                  "params": [{"name": "url", "type": "java.lang.String"}]}]
/// }"#).unwrap();
///
/// let surface = synthesize_param("postEncryptForm", &decl, &GeneratorConfig::default());
/// assert_eq!(surface.wrapper.name, "RxHttpPostEncryptFormParam");
/// assert_eq!(surface.factories.len(), 1);
/// assert_eq!(surface.factories[0].params.len(), 2);
/// ```
pub fn synthesize_param(alias: &str, decl: &TypeDecl, config: &GeneratorConfig) -> ParamSurface {
    let mut wrapper = SyntheticType::new(
        config.package.clone(),
        format!("{WRAPPER_PREFIX}{}", decl.simple_name()),
    );
    wrapper.type_params = decl.type_params.clone();
    wrapper.doc = vec![format!(
        "Fluent wrapper around {{@link {}}}.",
        decl.name
    )];

    let base = resolve_base(decl, &wrapper, config);
    wrapper.superclass = Some(base.superclass.clone());

    // Constructor: RxHttpX(X param) { super(param); }
    wrapper.members.push(
        SyntheticMember::constructor(wrapper.name.clone())
            .with_modifier(Modifier::Public)
            .with_param("param", decl.self_type())
            .with_body(vec![Stmt::Expr(Expr::Super(vec![Expr::var("param")]))]),
    );

    let wrapper_type = wrapper.self_type();
    for method in decl.mirrored_methods() {
        wrapper
            .members
            .push(mirror_method(method, decl, &wrapper_type, &base.delegate));
    }

    let factories: Vec<_> = decl
        .public_constructors()
        .map(|ctor| synthesize_factory(alias, ctor, decl, &wrapper))
        .collect();

    debug!(
        alias,
        wrapper = %wrapper.name,
        methods = wrapper.members.len() - 1,
        factories = factories.len(),
        "synthesized parameter wrapper"
    );

    ParamSurface { wrapper, factories }
}

/// Chooses the wrapper base from the declaration's immediate superclass.
pub fn resolve_base(decl: &TypeDecl, wrapper: &SyntheticType, config: &GeneratorConfig) -> WrapperBase {
    let known = decl.superclass.as_ref().and_then(TypeRef::known_type);
    let fixed = match known {
        Some(
            base @ (KnownType::BodyParam
            | KnownType::FormParam
            | KnownType::JsonParam
            | KnownType::JsonArrayParam
            | KnownType::NoBodyParam),
        ) => Some(base),
        _ => None,
    };

    if let Some(base) = fixed {
        let simple = base.qualified_name().rsplit('.').next().unwrap_or_default();
        return WrapperBase {
            superclass: TypeRef::class(config.qualified(&format!("{WRAPPER_PREFIX}{simple}"))),
            delegate: Expr::cast(decl.self_type(), Expr::var("param")),
        };
    }

    let generic_base = if known == Some(KnownType::AbstractBodyParam) {
        format!("{WRAPPER_PREFIX}AbstractBodyParam")
    } else {
        WRAPPER_PREFIX.to_string()
    };
    WrapperBase {
        superclass: TypeRef::parameterized(
            config.qualified(&generic_base),
            vec![decl.self_type(), wrapper.self_type()],
        ),
        delegate: Expr::var("param"),
    }
}

fn mirror_method(
    method: &MethodDecl,
    decl: &TypeDecl,
    wrapper_type: &TypeRef,
    delegate: &Expr,
) -> SyntheticMember {
    let call = Expr::call(
        delegate.clone(),
        method.name.clone(),
        method.params.iter().map(|p| Expr::var(p.name.clone())).collect(),
    );

    let returns_self = method.return_type.has_raw_name(&decl.name);
    let (return_type, body) = if returns_self {
        (
            wrapper_type.clone(),
            vec![Stmt::Expr(call), Stmt::Return(Expr::This)],
        )
    } else if method.return_type.is_void() {
        (TypeRef::Void, vec![Stmt::Expr(call)])
    } else {
        (method.return_type.clone(), vec![Stmt::Return(call)])
    };

    SyntheticMember::method(method.name.clone(), return_type)
        .with_modifiers(method.modifiers.clone())
        .with_type_params(method.type_params.clone())
        .with_params(method.params.clone())
        .with_varargs(method.varargs)
        .with_throws(method.throws.clone())
        .with_body(body)
}

fn synthesize_factory(
    alias: &str,
    ctor: &ConstructorDecl,
    decl: &TypeDecl,
    wrapper: &SyntheticType,
) -> SyntheticMember {
    let mut params = ctor.params.clone();
    let mut args: Vec<Expr> = ctor.params.iter().map(|p| Expr::var(p.name.clone())).collect();

    let formatted = params
        .first()
        .is_some_and(|first| first.ty.is(KnownType::String));
    if formatted {
        args[0] = Expr::local_call(
            "format",
            vec![args[0].clone(), Expr::var(FORMAT_ARGS)],
        );
        params.push(ParamDecl::new(
            FORMAT_ARGS,
            TypeRef::array_of(TypeRef::known(KnownType::Object, vec![])),
        ));
    }

    let generic = decl.is_generic();
    let inner = Expr::New {
        class: decl.class_type(),
        diamond: generic,
        args,
    };
    let outer = Expr::New {
        class: wrapper.class_type(),
        diamond: generic,
        args: vec![inner],
    };

    SyntheticMember::method(alias, wrapper.self_type())
        .with_modifier(Modifier::Public)
        .with_modifier(Modifier::Static)
        .with_type_params(decl.type_params.clone())
        .with_params(params)
        .with_varargs(formatted || ctor.varargs)
        .with_throws(ctor.throws.clone())
        .with_body(vec![Stmt::Return(outer)])
}
