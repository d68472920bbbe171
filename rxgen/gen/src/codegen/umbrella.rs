//! The umbrella `RxHttp` type.
//!
//! Everything that is not a per-builder wrapper lands here: the static
//! factories of every parameter builder, setters for converters and
//! clients, base-URL helpers, and (in reactive mode) the parser accessors.
//!
//! ```text
//! public class RxHttp<P extends Param<P>, R extends RxHttp<P, R>> extends BaseRxHttp {
//!     protected final P param;
//!     protected OkHttpClient okClient;
//!     ...
//! }
//! ```
//!
//! Member order is fixed: infrastructure, factories, converters, clients,
//! base URLs, accessors. Within each group the registry order applies.

use rxgen_define::{
    ClassType, FieldDecl, KnownType, Modifier, Modifiers, TypeParam, TypeRef, upper_first,
};
use tracing::debug;

use crate::codegen::surface::{FORMAT_ARGS, WRAPPER_PREFIX};
use crate::config::GeneratorConfig;
use crate::registry::Registry;
use crate::synthetic::{Expr, Stmt, SyntheticField, SyntheticMember, SyntheticType};

const BASE_RXHTTP: &str = "rxhttp.BaseRxHttp";
const BUILD_UTIL: &str = "rxhttp.wrapper.utils.BuildUtil";
const ILLEGAL_ARGUMENT: &str = "java.lang.IllegalArgumentException";
const PARAM_FIELD: &str = "param";
const CLIENT_FIELD: &str = "okClient";
const ADD_DOMAIN: &str = "addDomainIfAbsent";
const CONVERTER_SUFFIX: &str = "Converter";

/// Members contributed by per-declaration synthesizers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UmbrellaContributions {
    /// Static factories from every parameter builder, in registry order.
    pub factories: Vec<SyntheticMember>,
    /// Reactive accessors from every parser, in registry order.
    pub accessors: Vec<SyntheticMember>,
}

/// Assembles the umbrella type from the registry and the per-declaration members.
///
/// ## Examples
///
/// ```
/// use rxgen_gen::codegen::umbrella::{synthesize_umbrella, UmbrellaContributions};
/// use rxgen_gen::config::GeneratorConfig;
/// use rxgen_gen::registry::Registry;
///
/// let umbrella = synthesize_umbrella(
///     &Registry::new(),
///     UmbrellaContributions::default(),
///     &GeneratorConfig::default(),
/// );
/// assert_eq!(umbrella.qualified_name(), "rxhttp.wrapper.param.RxHttp");
/// assert_eq!(umbrella.fields.len(), 2);
/// assert!(umbrella.methods_named("format").next().is_some());
/// ```
pub fn synthesize_umbrella(
    registry: &Registry<'_>,
    contributions: UmbrellaContributions,
    config: &GeneratorConfig,
) -> SyntheticType {
    let mut umbrella = SyntheticType::new(config.package.clone(), WRAPPER_PREFIX);
    umbrella.doc = vec!["Entry point for building and executing requests.".to_string()];
    umbrella.type_params = vec![
        TypeParam::bounded(
            "P",
            vec![TypeRef::known(KnownType::ParamMarker, vec![TypeRef::var("P")])],
        ),
        TypeParam::bounded(
            "R",
            vec![TypeRef::parameterized(
                umbrella.qualified_name(),
                vec![TypeRef::var("P"), TypeRef::var("R")],
            )],
        ),
    ];
    umbrella.superclass = Some(TypeRef::class(BASE_RXHTTP));

    umbrella.fields = vec![
        SyntheticField::new(
            PARAM_FIELD,
            Modifiers::new().with(Modifier::Protected).with(Modifier::Final),
            TypeRef::var("P"),
        ),
        SyntheticField::new(
            CLIENT_FIELD,
            Modifiers::new().with(Modifier::Protected),
            TypeRef::known(KnownType::OkHttpClient, vec![]),
        ),
    ];

    umbrella.members.push(constructor());
    umbrella.members.push(format_helper());
    umbrella.members.extend(contributions.factories);

    for field in registry.converters() {
        umbrella.members.push(converter_setter(field));
    }
    for field in registry.clients() {
        umbrella.members.push(client_setter(field));
    }
    for field in registry.domains() {
        umbrella.members.push(domain_setter(field));
    }
    if let Some(field) = registry.default_domain() {
        umbrella.members.push(default_domain(field));
    }
    if registry.has_domains() {
        umbrella.members.push(add_domain_helper());
    }

    umbrella.members.extend(contributions.accessors);

    debug!(members = umbrella.members.len(), "synthesized umbrella type");
    umbrella
}

/// `protected RxHttp(P param) { this.param = param; }`
fn constructor() -> SyntheticMember {
    SyntheticMember::constructor(WRAPPER_PREFIX)
        .with_modifier(Modifier::Protected)
        .with_param(PARAM_FIELD, TypeRef::var("P"))
        .with_body(vec![Stmt::Assign {
            target: this_field(PARAM_FIELD),
            value: Expr::var(PARAM_FIELD),
        }])
}

/// `public static String format(String url, Object... formatArgs)`
fn format_helper() -> SyntheticMember {
    let url = || Expr::var("url");
    let args = || Expr::var(FORMAT_ARGS);
    let string = TypeRef::known(KnownType::String, vec![]);

    SyntheticMember::method("format", string.clone())
        .with_modifier(Modifier::Public)
        .with_modifier(Modifier::Static)
        .with_param("url", string)
        .with_param(
            FORMAT_ARGS,
            TypeRef::array_of(TypeRef::known(KnownType::Object, vec![])),
        )
        .with_varargs(true)
        .with_body(vec![
            Stmt::If {
                condition: Expr::equals(args(), Expr::null()),
                then: vec![Stmt::Return(url())],
            },
            Stmt::If {
                condition: Expr::equals(
                    Expr::Field {
                        target: Box::new(args()),
                        name: "length".to_string(),
                    },
                    Expr::int(0),
                ),
                then: vec![Stmt::Return(url())],
            },
            Stmt::Return(Expr::static_call(
                ClassType::known_type(KnownType::String, vec![]),
                "format",
                vec![url(), args()],
            )),
        ])
}

/// `public R set{Alias}Converter()`
fn converter_setter(field: &FieldDecl) -> SyntheticMember {
    let alias = upper_first(&field.alias());
    let name = if alias.ends_with(CONVERTER_SUFFIX) {
        format!("set{alias}")
    } else {
        format!("set{alias}{CONVERTER_SUFFIX}")
    };

    let tag = Expr::call(
        Expr::var(PARAM_FIELD),
        "tag",
        vec![
            Expr::ClassLiteral(TypeRef::known(KnownType::ConverterMarker, vec![])),
            field_ref(field),
        ],
    );
    fluent_setter(name, vec![null_guard(field, "converter"), Stmt::Expr(tag)])
}

/// `public R set{Alias}()`
fn client_setter(field: &FieldDecl) -> SyntheticMember {
    let assign = Stmt::Assign {
        target: this_field(CLIENT_FIELD),
        value: field_ref(field),
    };
    fluent_setter(
        format!("set{}", upper_first(&field.alias())),
        vec![null_guard(field, "OkHttpClient"), assign],
    )
}

/// `public R setDomainTo{Alias}IfAbsent()`
fn domain_setter(field: &FieldDecl) -> SyntheticMember {
    fluent_setter(
        format!("setDomainTo{}IfAbsent", upper_first(&field.alias())),
        merge_into_url(field),
    )
}

/// `protected P addDefaultDomainIfAbsent(P param)`
fn default_domain(field: &FieldDecl) -> SyntheticMember {
    let mut body = merge_into_url(field);
    body.push(Stmt::Return(Expr::var(PARAM_FIELD)));

    SyntheticMember::method("addDefaultDomainIfAbsent", TypeRef::var("P"))
        .with_modifier(Modifier::Protected)
        .with_param(PARAM_FIELD, TypeRef::var("P"))
        .with_body(body)
}

/// `private static String addDomainIfAbsent(String url, String domain)`
fn add_domain_helper() -> SyntheticMember {
    let string = TypeRef::known(KnownType::String, vec![]);
    SyntheticMember::method(ADD_DOMAIN, string.clone())
        .with_modifier(Modifier::Private)
        .with_modifier(Modifier::Static)
        .with_param("url", string.clone())
        .with_param("domain", string)
        .with_body(vec![
            Stmt::If {
                condition: Expr::call(Expr::var("url"), "startsWith", vec![Expr::string("http")]),
                then: vec![Stmt::Return(Expr::var("url"))],
            },
            Stmt::Return(Expr::static_call(
                ClassType::new(BUILD_UTIL),
                "mergeUrl",
                vec![Expr::var("domain"), Expr::var("url")],
            )),
        ])
}

/// `String newUrl = addDomainIfAbsent(param.getSimpleUrl(), Owner.field); param.setUrl(newUrl);`
fn merge_into_url(field: &FieldDecl) -> Vec<Stmt> {
    let simple_url = Expr::call(Expr::var(PARAM_FIELD), "getSimpleUrl", vec![]);
    vec![
        Stmt::Local {
            ty: TypeRef::known(KnownType::String, vec![]),
            name: "newUrl".to_string(),
            init: Expr::local_call(ADD_DOMAIN, vec![simple_url, field_ref(field)]),
        },
        Stmt::Expr(Expr::call(
            Expr::var(PARAM_FIELD),
            "setUrl",
            vec![Expr::var("newUrl")],
        )),
    ]
}

/// Public method returning `(R) this` after `body`.
fn fluent_setter(name: String, mut body: Vec<Stmt>) -> SyntheticMember {
    body.push(Stmt::Return(Expr::cast(TypeRef::var("R"), Expr::This)));
    SyntheticMember::method(name, TypeRef::var("R"))
        .with_modifier(Modifier::Public)
        .with_body(body)
}

fn null_guard(field: &FieldDecl, what: &str) -> Stmt {
    Stmt::If {
        condition: Expr::equals(field_ref(field), Expr::null()),
        then: vec![Stmt::Throw(Expr::new_instance(
            ClassType::new(ILLEGAL_ARGUMENT),
            vec![Expr::string(format!(
                "{what} can not be null: {}",
                field.qualified_name()
            ))],
        ))],
    }
}

fn field_ref(field: &FieldDecl) -> Expr {
    Expr::static_field(ClassType::new(field.owner.clone()), field.name.clone())
}

fn this_field(name: &str) -> Expr {
    Expr::Field {
        target: Box::new(Expr::This),
        name: name.to_string(),
    }
}
