//! Shared test utilities for rxgen-gen tests.
//!
//! This module provides common helper functions for creating declaration
//! fixtures across the codebase, reducing duplication and ensuring consistency.

use rxgen_define::{
    Annotation, ConstructorDecl, FieldDecl, Member, MethodDecl, Modifier, Modifiers, ParamDecl,
    TypeDecl, TypeParam, TypeRef,
};

/// Parses a type expression, panicking on malformed test input.
pub fn ty(expr: &str) -> TypeRef {
    expr.parse()
        .unwrap_or_else(|e| panic!("bad test type '{expr}': {e}"))
}

pub fn modifiers(list: &[Modifier]) -> Modifiers {
    list.iter().copied().collect()
}

/// Creates a parameter from a name and a type expression.
pub fn param(name: &str, expr: &str) -> ParamDecl {
    ParamDecl::new(name, ty(expr))
}

/// Creates a constructor member.
pub fn make_ctor(visibility: &[Modifier], params: Vec<ParamDecl>) -> Member {
    Member::Constructor(ConstructorDecl {
        modifiers: modifiers(visibility),
        params,
        throws: vec![],
        varargs: false,
    })
}

/// Creates a public, non-overriding method member.
pub fn make_method(name: &str, params: Vec<ParamDecl>, return_type: &str) -> Member {
    Member::Method(MethodDecl {
        name: name.to_string(),
        modifiers: modifiers(&[Modifier::Public]),
        type_params: vec![],
        params,
        return_type: ty(return_type),
        throws: vec![],
        varargs: false,
        overrides: false,
    })
}

/// Creates a public `@Param` declaration extending `FormParam` with a
/// single `(String url)` constructor.
///
/// ## Arguments
///
/// * `name` - Qualified class name
/// * `alias` - The `method_name` of the annotation
pub fn make_param(name: &str, alias: &str) -> TypeDecl {
    let mut decl = TypeDecl::new(name);
    decl.modifiers = modifiers(&[Modifier::Public]);
    decl.superclass = Some(ty("rxhttp.wrapper.param.FormParam"));
    decl.members = vec![make_ctor(
        &[Modifier::Public],
        vec![param("url", "java.lang.String")],
    )];
    decl.annotation = Some(Annotation::Param {
        method_name: alias.to_string(),
    });
    decl
}

/// Creates a public `@Parser` declaration.
///
/// Generic parsers get a protected no-argument constructor and a public
/// constructor taking one `java.lang.reflect.Type` per type parameter.
/// Non-generic parsers get a single public no-argument constructor.
/// `onParse` returns `T` for one parameter, `java.util.Map<K, V>` for two,
/// and `java.lang.String` for none.
///
/// ## Arguments
///
/// * `name` - Qualified class name
/// * `alias` - The `name` of the annotation
/// * `type_params` - Type parameter names
pub fn make_parser(name: &str, alias: &str, type_params: &[&str]) -> TypeDecl {
    let mut decl = TypeDecl::new(name);
    decl.modifiers = modifiers(&[Modifier::Public]);
    decl.type_params = type_params.iter().map(|p| TypeParam::new(*p)).collect();

    let produced = match type_params {
        [] => "java.lang.String".to_string(),
        [single] => single.to_string(),
        many => format!("java.util.Map<{}>", many.join(", ")),
    };
    decl.superclass = Some(ty(&format!("rxhttp.wrapper.parse.AbstractParser<{produced}>")));

    if type_params.is_empty() {
        decl.members.push(make_ctor(&[Modifier::Public], vec![]));
    } else {
        decl.members.push(make_ctor(&[Modifier::Protected], vec![]));
        let tokens = type_params
            .iter()
            .map(|p| param(&format!("{}Type", p.to_lowercase()), "java.lang.reflect.Type"))
            .collect();
        decl.members.push(make_ctor(&[Modifier::Public], tokens));
    }
    decl.members.push(make_method(
        "onParse",
        vec![param("response", "okhttp3.Response")],
        &produced,
    ));

    decl.annotation = Some(Annotation::Parser {
        name: alias.to_string(),
        wrappers: vec![],
    });
    decl
}

/// Creates a public static annotated field.
pub fn make_static_field(owner: &str, name: &str, ty: TypeRef, annotation: Annotation) -> FieldDecl {
    FieldDecl {
        owner: owner.to_string(),
        name: name.to_string(),
        modifiers: modifiers(&[Modifier::Public, Modifier::Static]),
        ty,
        annotation: Some(annotation),
    }
}
