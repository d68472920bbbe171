//! Suspend-style `to*` accessors.
//!
//! Independent of the reactive mode, every parser contributes static
//! accessors to `RxHttpExtensions`, callable from Java and Kotlin alike:
//!
//! ```text
//! public static <T> IAwait<T> toResponse(IRxHttp rxHttp) {
//!     return IRxHttpKt.toParser(rxHttp, new ResponseParser<T>() {}, rxHttp.getOkHttpClient());
//! }
//! ```
//!
//! Generic parsers are instantiated as anonymous subclasses through their
//! restricted no-argument constructor, which captures the type arguments
//! without type tokens. Non-generic parsers get one accessor per public
//! constructor.

use rxgen_define::{ClassType, ConstructorDecl, Modifier, ParamDecl, TypeDecl, TypeRef};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::synthetic::{Expr, Stmt, SyntheticMember, SyntheticType};

/// Simple name of the extensions holder.
pub const EXTENSIONS_CLASS: &str = "RxHttpExtensions";

/// Prefix of every suspend-style accessor name.
pub const EXTENSION_PREFIX: &str = "to";

const IRXHTTP: &str = "rxhttp.IRxHttp";
const IRXHTTP_KT: &str = "rxhttp.IRxHttpKt";
const IAWAIT: &str = "rxhttp.IAwait";
const RECEIVER: &str = "rxHttp";

/// Synthesizes the `to*` accessors for a validated parser.
///
/// Returns `None` when the parser declares no qualifying `onParse` method.
///
/// ## Examples
///
/// ```
/// use rxgen_define::TypeDecl;
/// use rxgen_gen::codegen::extensions::synthesize_extensions;
///
/// let decl: TypeDecl = serde_json::from_str(r#"{
///     "name": "com.example.TextParser",
///     "modifiers": ["public"],
///     "superclass": "rxhttp.wrapper.parse.AbstractParser<java.lang.String>",
///     "members": [
///         {"kind": "constructor", "modifiers": ["public"]},
///         {"kind": "method", "name": "onParse", "modifiers": ["public"],
///          "params": [{"name": "response", "type": "okhttp3.Response"}],
///          "return_type": "java.lang.String"}
///     ]
/// }"#).unwrap();
///
/// let members = synthesize_extensions("Text", &decl).unwrap();
/// assert_eq!(members.len(), 1);
/// assert_eq!(members[0].name, "toText");
/// assert_eq!(members[0].return_type.to_string(), "rxhttp.IAwait<java.lang.String>");
/// ```
pub fn synthesize_extensions(alias: &str, decl: &TypeDecl) -> Option<Vec<SyntheticMember>> {
    let produced = decl.parse_return_type()?;
    let name = format!("{EXTENSION_PREFIX}{alias}");

    let members: Vec<_> = if decl.is_generic() {
        let parser = Expr::AnonymousSubclass {
            ty: decl.self_type(),
            args: vec![],
        };
        vec![extension(&name, decl, produced, &ConstructorDecl::default(), parser)]
    } else {
        decl.public_constructors()
            .map(|ctor| {
                let parser = Expr::new_instance(
                    decl.class_type(),
                    ctor.params.iter().map(|p| Expr::var(p.name.clone())).collect(),
                );
                extension(&name, decl, produced, ctor, parser)
            })
            .collect()
    };

    debug!(
        alias,
        parser = %decl.name,
        accessors = members.len(),
        "synthesized extension accessors"
    );
    Some(members)
}

/// Wraps the accessors of every parser into the `RxHttpExtensions` holder.
///
/// The holder is final and cannot be instantiated.
pub fn extensions_type(members: Vec<SyntheticMember>, config: &GeneratorConfig) -> SyntheticType {
    let mut holder = SyntheticType::new(config.package.clone(), EXTENSIONS_CLASS);
    holder.modifiers.insert(Modifier::Final);
    holder.doc = vec!["Suspend-style parser accessors for {@link rxhttp.IRxHttp}.".to_string()];
    holder
        .members
        .push(SyntheticMember::constructor(EXTENSIONS_CLASS).with_modifier(Modifier::Private));
    holder.members.extend(members);
    holder
}

fn extension(
    name: &str,
    decl: &TypeDecl,
    produced: &TypeRef,
    ctor: &ConstructorDecl,
    parser: Expr,
) -> SyntheticMember {
    let mut params = vec![ParamDecl::new(RECEIVER, TypeRef::class(IRXHTTP))];
    params.extend(ctor.params.iter().cloned());

    let client = Expr::call(Expr::var(RECEIVER), "getOkHttpClient", vec![]);
    let body = vec![Stmt::Return(Expr::static_call(
        ClassType::new(IRXHTTP_KT),
        "toParser",
        vec![Expr::var(RECEIVER), parser, client],
    ))];

    SyntheticMember::method(name, TypeRef::parameterized(IAWAIT, vec![produced.clone()]))
        .with_modifier(Modifier::Public)
        .with_modifier(Modifier::Static)
        .with_type_params(decl.type_params.clone())
        .with_params(params)
        .with_varargs(ctor.varargs)
        .with_throws(ctor.throws.clone())
        .with_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_ctor, make_parser, param, ty};
    use rxgen_define::Member;

    #[test]
    fn generic_parser_uses_anonymous_subclass() {
        let decl = make_parser("com.example.ResponseParser", "Response", &["T"]);
        let members = synthesize_extensions("Response", &decl).unwrap();

        assert_eq!(members.len(), 1);
        let accessor = &members[0];
        assert_eq!(accessor.name, "toResponse");
        assert_eq!(accessor.params, vec![param("rxHttp", "rxhttp.IRxHttp")]);
        assert_eq!(accessor.return_type, ty("rxhttp.IAwait<T>"));
        assert!(accessor.modifiers.is_static());

        let Stmt::Return(Expr::StaticCall { method, args, .. }) = &accessor.body[0] else {
            panic!("extension must return IRxHttpKt.toParser(..)");
        };
        assert_eq!(method, "toParser");
        assert_eq!(
            args[1],
            Expr::AnonymousSubclass {
                ty: ty("com.example.ResponseParser<T>"),
                args: vec![],
            }
        );
    }

    #[test]
    fn non_generic_parser_gets_one_accessor_per_public_constructor() {
        let mut decl = make_parser("com.example.TextParser", "Text", &[]);
        decl.members.push(make_ctor(
            &[Modifier::Public],
            vec![param("charset", "java.lang.String")],
        ));
        decl.members.push(make_ctor(
            &[Modifier::Private],
            vec![param("hidden", "int")],
        ));

        let members = synthesize_extensions("Text", &decl).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(
            members[1].params,
            vec![
                param("rxHttp", "rxhttp.IRxHttp"),
                param("charset", "java.lang.String"),
            ]
        );
        assert_eq!(members[1].return_type, ty("rxhttp.IAwait<java.lang.String>"));
    }

    #[test]
    fn holder_is_final_with_private_constructor() {
        let decl = make_parser("com.example.ResponseParser", "Response", &["T"]);
        let members = synthesize_extensions("Response", &decl).unwrap();
        let holder = extensions_type(members, &GeneratorConfig::default());

        assert_eq!(holder.qualified_name(), "rxhttp.wrapper.param.RxHttpExtensions");
        assert!(holder.modifiers.is_final());
        let ctor = holder.constructors().next().unwrap();
        assert!(ctor.modifiers.contains(Modifier::Private));
        assert_eq!(holder.methods().count(), 1);
    }

    #[test]
    fn parser_without_on_parse_is_skipped() {
        let mut decl = make_parser("com.example.TextParser", "Text", &[]);
        decl.members.retain(|m| matches!(m, Member::Constructor(_)));
        assert!(synthesize_extensions("Text", &decl).is_none());
    }
}
