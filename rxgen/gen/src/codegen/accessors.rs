//! Generic-type accessor synthesis for parsers.
//!
//! With reactive integration enabled, every `@Parser` class `X` producing
//! `R` (the return type of its `onParse(okhttp3.Response)`) contributes
//! `as{Alias}` accessors to the umbrella `RxHttp` type, one per public
//! constructor:
//!
//! ```text
//! public <T> Observable<T> asResponse(Class<T> tType) {
//!     return asParser(new ResponseParser<>(tType));
//! }
//! ```
//!
//! Reflective type tokens in the constructor become class tokens in the
//! accessor, so callers pass `Foo.class` and the parser still receives a
//! `java.lang.reflect.Type`:
//!
//! - a `Type[]` parameter expands to one `Class<V>` parameter per type variable
//! - a `Type` parameter consumes the next unused type variable
//! - every other parameter passes through unchanged
//!
//! A parser with exactly one type variable additionally gets one wrapped
//! variant per wrapper container (always `java.util.List`, then the
//! annotation's `wrappers`), e.g. `asResponseList` returning
//! `Observable<List<T>>`. The class token is wrapped with
//! `ParameterizedTypeImpl.get(List.class, tType)` before it reaches the parser.
//! Wrapped accessors are named by the container's simple name, so two
//! distinct containers sharing one are rejected.

use rxgen_define::{
    ClassType, ConstructorDecl, KnownType, Modifier, ParamDecl, TypeDecl, TypeParam, TypeRef,
};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::errors::{GeneratorError, Result};
use crate::synthetic::{Expr, Stmt, SyntheticMember};

/// Builds parameterized reflective types at runtime.
pub const PARAMETERIZED_TYPE_IMPL: &str = "rxhttp.wrapper.entity.ParameterizedTypeImpl";

/// Prefix of every reactive accessor name.
pub const ACCESSOR_PREFIX: &str = "as";

/// How one constructor argument is produced from accessor parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ArgSource {
    /// Passed through unchanged.
    Plain(String),
    /// A `Type` argument fed by a `Class<V>` parameter.
    Token(String),
    /// A `Type[]` argument rebuilt from several `Class<V>` parameters.
    TokenArray(Vec<String>),
}

impl ArgSource {
    fn is_token(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}

/// Accessor parameters for one constructor, and how to rebuild its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenPlan {
    params: Vec<ParamDecl>,
    sources: Vec<ArgSource>,
}

/// Synthesizes the reactive `as*` accessors for a validated parser.
///
/// Returns `None` when reactive integration is disabled or when the parser
/// declares no qualifying `onParse` method; the caller reports the skip.
///
/// ## Arguments
///
/// * `alias` - The annotation's `name`
/// * `decl` - The parser declaration
/// * `wrappers` - Extra wrapper containers from the annotation
/// * `config` - Supplies the reactive mode
///
/// ## Errors
///
/// Returns `GeneratorError::Internal` when two wrapper containers share a
/// simple name, since both would generate the same accessor.
///
/// ## Examples
///
/// ```
/// use rxgen_define::TypeDecl;
/// use rxgen_gen::codegen::accessors::synthesize_accessors;
/// use rxgen_gen::config::GeneratorConfig;
///
/// let decl: TypeDecl = serde_json::from_str(r#"{
///     "name": "com.example.ResponseParser",
///     "modifiers": ["public"],
///     "type_params": [{"name": "T"}],
///     "superclass": "rxhttp.wrapper.parse.TypeParser<T>",
///     "members": [
///         {"kind": "constructor", "modifiers": ["protected"]},
///         {"kind": "constructor", "modifiers": ["public"],
///          "params": [{"name": "type", "type": "java.lang.reflect.Type"}]},
///         {"kind": "method", "name": "onParse", "modifiers": ["public"],
///          "params": [{"name": "response", "type": "okhttp3.Response"}],
///          "return_type": "T"}
///     ]
/// }"#).unwrap();
///
/// let members = synthesize_accessors("Response", &decl, &[], &GeneratorConfig::default())
///     .unwrap()
///     .unwrap();
/// let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
/// assert_eq!(names, vec!["asResponse", "asResponseList"]);
/// ```
pub fn synthesize_accessors(
    alias: &str,
    decl: &TypeDecl,
    wrappers: &[TypeRef],
    config: &GeneratorConfig,
) -> Result<Option<Vec<SyntheticMember>>> {
    let Some(observable) = config.reactive.observable_class() else {
        return Ok(None);
    };
    let Some(produced) = decl.parse_return_type() else {
        return Ok(None);
    };
    let type_vars = &decl.type_params;

    let containers = if type_vars.len() == 1 {
        wrapper_containers(decl, wrappers)?
    } else {
        Vec::new()
    };
    let mut members = Vec::new();

    for ctor in decl.public_constructors() {
        let plan = plan_tokens(ctor, type_vars);
        let base_name = format!("{ACCESSOR_PREFIX}{alias}");

        let args = plan
            .sources
            .iter()
            .map(|source| rebuild_arg(source, ""))
            .collect();
        members.push(
            accessor(&base_name, decl, ctor, &plan, observable, produced.clone())
                .with_body(vec![Stmt::Return(as_parser(decl, args))]),
        );

        if type_vars.len() != 1 || !plan.sources.iter().any(ArgSource::is_token) {
            continue;
        }

        for container in &containers {
            let simple = container.simple_name().to_string();
            let mut body = Vec::new();

            for source in &plan.sources {
                let names: &[String] = match source {
                    ArgSource::Plain(_) => &[],
                    ArgSource::Token(name) => std::slice::from_ref(name),
                    ArgSource::TokenArray(names) => names,
                };
                for name in names {
                    body.push(Stmt::Local {
                        ty: TypeRef::known(KnownType::ReflectType, vec![]),
                        name: format!("{name}{simple}"),
                        init: Expr::static_call(
                            ClassType::new(PARAMETERIZED_TYPE_IMPL),
                            "get",
                            vec![
                                Expr::ClassLiteral(TypeRef::Class(container.clone())),
                                Expr::var(name.clone()),
                            ],
                        ),
                    });
                }
            }

            let args = plan
                .sources
                .iter()
                .map(|source| rebuild_arg(source, &simple))
                .collect();
            body.push(Stmt::Return(as_parser(decl, args)));

            members.push(
                accessor(
                    &format!("{base_name}{simple}"),
                    decl,
                    ctor,
                    &plan,
                    observable,
                    wrap_produced(produced, container),
                )
                .with_body(body),
            );
        }
    }

    debug!(
        alias,
        parser = %decl.name,
        accessors = members.len(),
        "synthesized reactive accessors"
    );
    Ok(Some(members))
}

/// `java.util.List` first, then the declared wrappers, deduplicated by raw name.
///
/// Wrapped accessors are named after the container's simple name, so two
/// distinct containers sharing one are rejected.
fn wrapper_containers(decl: &TypeDecl, wrappers: &[TypeRef]) -> Result<Vec<ClassType>> {
    let mut containers = vec![ClassType::known_type(KnownType::List, vec![])];
    for wrapper in wrappers {
        let Some(class) = wrapper.as_class() else {
            continue;
        };
        if let Some(existing) = containers
            .iter()
            .find(|c| c.simple_name() == class.simple_name())
        {
            if existing.name() == class.name() {
                continue;
            }
            return Err(GeneratorError::Internal(format!(
                "{} declares wrappers {} and {} sharing the simple name {}; their accessors would collide",
                decl.name,
                existing.name(),
                class.name(),
                class.simple_name()
            )));
        }
        containers.push(class.raw());
    }
    Ok(containers)
}

fn plan_tokens(ctor: &ConstructorDecl, type_vars: &[TypeParam]) -> TokenPlan {
    let mut params = Vec::new();
    let mut sources = Vec::new();
    let mut next_var = 0;

    for param in &ctor.params {
        if param.ty.is_array_of(KnownType::ReflectType) {
            let mut names = Vec::new();
            for var in type_vars {
                let name = format!("{}Type", var.name.to_lowercase());
                params.push(ParamDecl::new(name.clone(), class_token(var)));
                names.push(name);
            }
            sources.push(ArgSource::TokenArray(names));
        } else if param.ty.is(KnownType::ReflectType) && next_var < type_vars.len() {
            params.push(ParamDecl::new(
                param.name.clone(),
                class_token(&type_vars[next_var]),
            ));
            next_var += 1;
            sources.push(ArgSource::Token(param.name.clone()));
        } else {
            params.push(param.clone());
            sources.push(ArgSource::Plain(param.name.clone()));
        }
    }

    TokenPlan { params, sources }
}

fn class_token(var: &TypeParam) -> TypeRef {
    TypeRef::known(KnownType::Class, vec![var.as_var()])
}

/// Rebuilds one constructor argument; `suffix` selects the wrapped locals.
fn rebuild_arg(source: &ArgSource, suffix: &str) -> Expr {
    match source {
        ArgSource::Plain(name) => Expr::var(name.clone()),
        ArgSource::Token(name) => Expr::var(format!("{name}{suffix}")),
        ArgSource::TokenArray(names) => Expr::NewArray {
            component: TypeRef::known(KnownType::ReflectType, vec![]),
            elements: names
                .iter()
                .map(|name| Expr::var(format!("{name}{suffix}")))
                .collect(),
        },
    }
}

/// `W<R>`, or `R<W<A>, W<B>>` when `R` is itself parameterized.
fn wrap_produced(produced: &TypeRef, container: &ClassType) -> TypeRef {
    let wrap = |arg: &TypeRef| TypeRef::parameterized(container.name(), vec![arg.clone()]);
    match produced.as_class() {
        Some(class) if !class.args().is_empty() => TypeRef::parameterized(
            class.name(),
            class.args().iter().map(wrap).collect(),
        ),
        _ => wrap(produced),
    }
}

fn as_parser(decl: &TypeDecl, args: Vec<Expr>) -> Expr {
    Expr::local_call(
        "asParser",
        vec![Expr::New {
            class: decl.class_type(),
            diamond: decl.is_generic(),
            args,
        }],
    )
}

fn accessor(
    name: &str,
    decl: &TypeDecl,
    ctor: &ConstructorDecl,
    plan: &TokenPlan,
    observable: &str,
    element: TypeRef,
) -> SyntheticMember {
    SyntheticMember::method(name, TypeRef::parameterized(observable, vec![element]))
        .with_modifier(Modifier::Public)
        .with_type_params(decl.type_params.clone())
        .with_params(plan.params.clone())
        .with_varargs(ctor.varargs)
        .with_throws(ctor.throws.clone())
}
