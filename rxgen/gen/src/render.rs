//! Java source rendering for synthetic types.
//!
//! The renderer is the only place that knows Java syntax. It is
//! deterministic: imports are sorted, members keep their synthesized order,
//! and nothing depends on hash iteration, so identical synthetic types always
//! render to identical bytes.
//!
//! ## Imports
//!
//! Every class referenced by the type is considered for an import, in
//! sorted order. A simple name is claimed by the first qualified name that
//! uses it (the generated type claims its own name first); later classes
//! with the same simple name stay fully qualified. `java.lang` and
//! same-package classes claim their simple name without an import line.
//!
//! ## Examples
//!
//! ```
//! use rxgen_define::{Modifier, TypeRef};
//! use rxgen_gen::render::render_type;
//! use rxgen_gen::synthetic::{Expr, Stmt, SyntheticMember, SyntheticType};
//!
//! let mut ty = SyntheticType::new("com.example", "Greeter");
//! ty.members.push(
//!     SyntheticMember::method("greeting", TypeRef::class("java.lang.String"))
//!         .with_modifier(Modifier::Public)
//!         .with_body(vec![Stmt::Return(Expr::string("hi"))]),
//! );
//!
//! let source = render_type(&ty);
//! assert!(source.contains("package com.example;"));
//! assert!(source.contains("    public String greeting() {\n        return \"hi\";\n    }"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use rxgen_define::{ClassType, Modifiers, ParamDecl, TypeParam, TypeRef};

use crate::synthetic::{
    BinaryOp, Expr, Literal, Stmt, SyntheticField, SyntheticMember, SyntheticType,
};

const INDENT: &str = "    ";

/// Header line written at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Generated by rxgen. Do not edit.";

/// Renders a synthetic type as a complete Java compilation unit.
pub fn render_type(ty: &SyntheticType) -> String {
    let imports = Imports::collect(ty);
    let writer = JavaWriter {
        imports: &imports,
    };
    writer.compilation_unit(ty)
}

/// Simple-name resolution for one compilation unit.
#[derive(Debug, Default)]
struct Imports {
    /// Simple name to the qualified name that claimed it.
    claimed: BTreeMap<String, String>,
    lines: BTreeSet<String>,
}

impl Imports {
    fn collect(ty: &SyntheticType) -> Self {
        let mut names = BTreeSet::new();
        collect_type_names(ty, &mut names);

        let mut imports = Self::default();
        imports
            .claimed
            .insert(ty.name.clone(), ty.qualified_name());

        for qualified in names {
            let class = ClassType::new(qualified.clone());
            let simple = class.simple_name().to_string();
            if imports.claimed.contains_key(&simple) {
                continue;
            }
            let package = class.package();
            if !package.is_empty()
                && package != "java.lang"
                && package != ty.package
                && !qualified.contains('$')
            {
                imports.lines.insert(qualified.clone());
            }
            imports.claimed.insert(simple, qualified);
        }
        imports
    }

    fn resolve<'n>(&self, class: &'n ClassType) -> &'n str {
        let simple = class.simple_name();
        let claimed = self.claimed.get(simple).map(String::as_str);
        if claimed == Some(class.name()) && !class.name().contains('$') {
            simple
        } else {
            class.name()
        }
    }
}

struct JavaWriter<'i> {
    imports: &'i Imports,
}

impl JavaWriter<'_> {
    fn compilation_unit(&self, ty: &SyntheticType) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push('\n');
        if !ty.package.is_empty() {
            let _ = writeln!(out, "package {};", ty.package);
        }
        out.push('\n');

        if !self.imports.lines.is_empty() {
            for line in &self.imports.lines {
                let _ = writeln!(out, "import {line};");
            }
            out.push('\n');
        }

        if !ty.doc.is_empty() {
            out.push_str("/**\n");
            for line in &ty.doc {
                let _ = writeln!(out, " * {line}");
            }
            out.push_str(" */\n");
        }

        let _ = write!(
            out,
            "{}class {}{}",
            modifiers_prefix(&ty.modifiers),
            ty.name,
            self.type_params(&ty.type_params)
        );
        if let Some(superclass) = &ty.superclass {
            let _ = write!(out, " extends {}", self.ty(superclass));
        }
        out.push_str(" {\n");

        if !ty.fields.is_empty() {
            out.push('\n');
            for field in &ty.fields {
                out.push_str(&self.field(field));
            }
        }
        for member in &ty.members {
            out.push('\n');
            out.push_str(&self.member(member));
        }

        out.push_str("}\n");
        out
    }

    fn field(&self, field: &SyntheticField) -> String {
        format!(
            "{INDENT}{}{} {};\n",
            modifiers_prefix(&field.modifiers),
            self.ty(&field.ty),
            field.name
        )
    }

    fn member(&self, member: &SyntheticMember) -> String {
        let mut signature = format!("{INDENT}{}", modifiers_prefix(&member.modifiers));
        if !member.type_params.is_empty() {
            signature.push_str(&self.type_params(&member.type_params));
            signature.push(' ');
        }
        if !member.is_constructor() {
            signature.push_str(&self.ty(&member.return_type));
            signature.push(' ');
        }
        let _ = write!(
            signature,
            "{}({})",
            member.name,
            self.params(&member.params, member.varargs)
        );
        if !member.throws.is_empty() {
            let throws: Vec<_> = member.throws.iter().map(|t| self.ty(t)).collect();
            let _ = write!(signature, " throws {}", throws.join(", "));
        }

        if member.body.is_empty() {
            return format!("{signature} {{\n{INDENT}}}\n");
        }

        let mut out = format!("{signature} {{\n");
        for stmt in &member.body {
            self.stmt(stmt, 2, &mut out);
        }
        let _ = writeln!(out, "{INDENT}}}");
        out
    }

    fn params(&self, params: &[ParamDecl], varargs: bool) -> String {
        let last = params.len().saturating_sub(1);
        params
            .iter()
            .enumerate()
            .map(|(idx, param)| match &param.ty {
                TypeRef::Array(component) if varargs && idx == last => {
                    format!("{}... {}", self.ty(component), param.name)
                }
                ty => format!("{} {}", self.ty(ty), param.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn type_params(&self, params: &[TypeParam]) -> String {
        if params.is_empty() {
            return String::new();
        }
        let rendered: Vec<_> = params
            .iter()
            .map(|param| {
                let bounds: Vec<_> = param.bounds.iter().map(|b| self.ty(b)).collect();
                if bounds.is_empty() {
                    param.name.clone()
                } else {
                    format!("{} extends {}", param.name, bounds.join(" & "))
                }
            })
            .collect();
        format!("<{}>", rendered.join(", "))
    }

    fn ty(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Class(class) => self.class(class),
            TypeRef::Array(component) => format!("{}[]", self.ty(component)),
            TypeRef::Wildcard {
                extends,
                super_bound,
            } => {
                let mut out = String::from("?");
                if let Some(bound) = extends {
                    let _ = write!(out, " extends {}", self.ty(bound));
                }
                if let Some(bound) = super_bound {
                    let _ = write!(out, " super {}", self.ty(bound));
                }
                out
            }
            TypeRef::Void | TypeRef::Primitive(_) | TypeRef::Var(_) => ty.to_string(),
        }
    }

    fn class(&self, class: &ClassType) -> String {
        let name = self.imports.resolve(class);
        if class.args().is_empty() {
            name.to_string()
        } else {
            let args: Vec<_> = class.args().iter().map(|a| self.ty(a)).collect();
            format!("{name}<{}>", args.join(", "))
        }
    }

    /// Erasure of a type, as used in class literals.
    fn raw(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Class(class) => self.imports.resolve(class).to_string(),
            TypeRef::Array(component) => format!("{}[]", self.raw(component)),
            other => self.ty(other),
        }
    }

    fn stmt(&self, stmt: &Stmt, depth: usize, out: &mut String) {
        let pad = INDENT.repeat(depth);
        match stmt {
            Stmt::Expr(expr) => {
                let _ = writeln!(out, "{pad}{};", self.expr(expr));
            }
            Stmt::Return(expr) => {
                let _ = writeln!(out, "{pad}return {};", self.expr(expr));
            }
            Stmt::Local { ty, name, init } => {
                let _ = writeln!(out, "{pad}{} {name} = {};", self.ty(ty), self.expr(init));
            }
            Stmt::Assign { target, value } => {
                let _ = writeln!(out, "{pad}{} = {};", self.expr(target), self.expr(value));
            }
            Stmt::If { condition, then } => {
                let _ = writeln!(out, "{pad}if ({}) {{", self.expr(condition));
                for inner in then {
                    self.stmt(inner, depth + 1, out);
                }
                let _ = writeln!(out, "{pad}}}");
            }
            Stmt::Throw(expr) => {
                let _ = writeln!(out, "{pad}throw {};", self.expr(expr));
            }
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::This => "this".to_string(),
            Expr::Super(args) => format!("super({})", self.args(args)),
            Expr::Var(name) => name.clone(),
            Expr::Literal(Literal::Null) => "null".to_string(),
            Expr::Literal(Literal::Int(value)) => value.to_string(),
            Expr::Literal(Literal::Str(value)) => quote(value),
            Expr::Field { target, name } => format!("{}.{name}", self.receiver(target)),
            Expr::StaticField { class, name } => {
                format!("{}.{name}", self.imports.resolve(class))
            }
            Expr::Call {
                target,
                method,
                args,
            } => match target {
                Some(target) => {
                    format!("{}.{method}({})", self.receiver(target), self.args(args))
                }
                None => format!("{method}({})", self.args(args)),
            },
            Expr::StaticCall {
                class,
                method,
                args,
            } => format!(
                "{}.{method}({})",
                self.imports.resolve(class),
                self.args(args)
            ),
            Expr::New {
                class,
                diamond,
                args,
            } => {
                let diamond = if *diamond && class.args().is_empty() {
                    "<>"
                } else {
                    ""
                };
                format!("new {}{diamond}({})", self.class(class), self.args(args))
            }
            Expr::AnonymousSubclass { ty, args } => {
                format!("new {}({}) {{}}", self.ty(ty), self.args(args))
            }
            Expr::NewArray {
                component,
                elements,
            } => format!("new {}[]{{{}}}", self.ty(component), self.args(elements)),
            Expr::Cast { ty, expr } => format!("({}) {}", self.ty(ty), self.expr(expr)),
            Expr::ClassLiteral(ty) => format!("{}.class", self.raw(ty)),
            Expr::Binary { op, lhs, rhs } => {
                let op = match op {
                    BinaryOp::Eq => "==",
                    BinaryOp::Ne => "!=",
                };
                format!("{} {op} {}", self.expr(lhs), self.expr(rhs))
            }
        }
    }

    /// A call or field-access receiver, parenthesized when needed.
    fn receiver(&self, target: &Expr) -> String {
        match target {
            Expr::Cast { .. } | Expr::Binary { .. } => format!("({})", self.expr(target)),
            _ => self.expr(target),
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter()
            .map(|arg| self.expr(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn modifiers_prefix(modifiers: &Modifiers) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!("{modifiers} ")
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn collect_type_names(ty: &SyntheticType, names: &mut BTreeSet<String>) {
    for param in &ty.type_params {
        param.bounds.iter().for_each(|b| collect_ref(b, names));
    }
    if let Some(superclass) = &ty.superclass {
        collect_ref(superclass, names);
    }
    for field in &ty.fields {
        collect_ref(&field.ty, names);
    }
    for member in &ty.members {
        for param in &member.type_params {
            param.bounds.iter().for_each(|b| collect_ref(b, names));
        }
        collect_ref(&member.return_type, names);
        member.params.iter().for_each(|p| collect_ref(&p.ty, names));
        member.throws.iter().for_each(|t| collect_ref(t, names));
        member.body.iter().for_each(|s| collect_stmt(s, names));
    }
}

fn collect_ref(ty: &TypeRef, names: &mut BTreeSet<String>) {
    match ty {
        TypeRef::Class(class) => collect_class(class, names),
        TypeRef::Array(component) => collect_ref(component, names),
        TypeRef::Wildcard {
            extends,
            super_bound,
        } => {
            extends.iter().for_each(|b| collect_ref(b, names));
            super_bound.iter().for_each(|b| collect_ref(b, names));
        }
        TypeRef::Void | TypeRef::Primitive(_) | TypeRef::Var(_) => {}
    }
}

fn collect_class(class: &ClassType, names: &mut BTreeSet<String>) {
    names.insert(class.name().to_string());
    class.args().iter().for_each(|a| collect_ref(a, names));
}

fn collect_stmt(stmt: &Stmt, names: &mut BTreeSet<String>) {
    match stmt {
        Stmt::Expr(expr) | Stmt::Return(expr) | Stmt::Throw(expr) => collect_expr(expr, names),
        Stmt::Local { ty, init, .. } => {
            collect_ref(ty, names);
            collect_expr(init, names);
        }
        Stmt::Assign { target, value } => {
            collect_expr(target, names);
            collect_expr(value, names);
        }
        Stmt::If { condition, then } => {
            collect_expr(condition, names);
            then.iter().for_each(|s| collect_stmt(s, names));
        }
    }
}

fn collect_expr(expr: &Expr, names: &mut BTreeSet<String>) {
    match expr {
        Expr::This | Expr::Var(_) | Expr::Literal(_) => {}
        Expr::Super(args) => args.iter().for_each(|a| collect_expr(a, names)),
        Expr::Field { target, .. } => collect_expr(target, names),
        Expr::StaticField { class, .. } => collect_class(class, names),
        Expr::Call { target, args, .. } => {
            target.iter().for_each(|t| collect_expr(t, names));
            args.iter().for_each(|a| collect_expr(a, names));
        }
        Expr::StaticCall { class, args, .. } | Expr::New { class, args, .. } => {
            collect_class(class, names);
            args.iter().for_each(|a| collect_expr(a, names));
        }
        Expr::AnonymousSubclass { ty, args } => {
            collect_ref(ty, names);
            args.iter().for_each(|a| collect_expr(a, names));
        }
        Expr::NewArray {
            component,
            elements,
        } => {
            collect_ref(component, names);
            elements.iter().for_each(|e| collect_expr(e, names));
        }
        Expr::Cast { ty, expr } => {
            collect_ref(ty, names);
            collect_expr(expr, names);
        }
        Expr::ClassLiteral(ty) => collect_ref(ty, names),
        Expr::Binary { lhs, rhs, .. } => {
            collect_expr(lhs, names);
            collect_expr(rhs, names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::synthesize_param;
    use crate::config::GeneratorConfig;
    use crate::test_utils::{make_method, make_param, param, ty};
    use rxgen_define::Modifier;

    // ========================================================================
    // Imports
    // ========================================================================

    #[test]
    fn imports_are_sorted_and_skip_java_lang_and_same_package() {
        let mut synthetic = SyntheticType::new("rxhttp.wrapper.param", "Sample");
        synthetic.members.push(
            SyntheticMember::method("a", ty("java.util.Map<java.lang.String, okhttp3.Response>"))
                .with_param("other", ty("rxhttp.wrapper.param.RxHttpFormParam")),
        );

        let source = render_type(&synthetic);
        assert!(source.contains("import java.util.Map;\nimport okhttp3.Response;\n"));
        assert!(!source.contains("import java.lang"));
        assert!(!source.contains("import rxhttp.wrapper.param"));
        assert!(source.contains("Map<String, Response> a(RxHttpFormParam other)"));
    }

    #[test]
    fn conflicting_simple_names_stay_qualified() {
        let mut synthetic = SyntheticType::new("rxhttp.wrapper.param", "Sample");
        synthetic.members.push(
            SyntheticMember::method("a", ty("com.example.Response"))
                .with_param("raw", ty("okhttp3.Response")),
        );

        let source = render_type(&synthetic);
        assert!(source.contains("import com.example.Response;"));
        assert!(!source.contains("import okhttp3.Response;"));
        assert!(source.contains("Response a(okhttp3.Response raw)"));
    }

    #[test]
    fn own_name_is_never_imported() {
        let mut synthetic = SyntheticType::new("rxhttp.wrapper.param", "RxHttp");
        synthetic.superclass = Some(ty("rxhttp.RxHttp"));

        let source = render_type(&synthetic);
        assert!(source.contains("class RxHttp extends rxhttp.RxHttp {"));
        assert!(!source.contains("import rxhttp.RxHttp;"));
    }

    // ========================================================================
    // Members and expressions
    // ========================================================================

    #[test]
    fn renders_wrapper_with_cast_delegate() {
        let mut decl = make_param("com.example.PostEncryptFormParam", "postEncryptForm");
        decl.members.push(make_method(
            "setSign",
            vec![param("sign", "java.lang.String")],
            "com.example.PostEncryptFormParam",
        ));
        let surface = synthesize_param("postEncryptForm", &decl, &GeneratorConfig::default());
        let source = render_type(&surface.wrapper);

        assert!(source.starts_with(GENERATED_HEADER));
        assert!(source.contains("import com.example.PostEncryptFormParam;"));
        assert!(source.contains(
            "public class RxHttpPostEncryptFormParam extends RxHttpFormParam {"
        ));
        assert!(source.contains(
            "    public RxHttpPostEncryptFormParam(PostEncryptFormParam param) {\n        super(param);\n    }\n"
        ));
        assert!(source.contains(
            "    public RxHttpPostEncryptFormParam setSign(String sign) {\n        ((PostEncryptFormParam) param).setSign(sign);\n        return this;\n    }\n"
        ));
    }

    #[test]
    fn renders_varargs_and_static_modifiers() {
        let member = SyntheticMember::method("postForm", ty("rxhttp.wrapper.param.RxHttpFormParam"))
            .with_modifier(Modifier::Public)
            .with_modifier(Modifier::Static)
            .with_param("url", ty("java.lang.String"))
            .with_param("formatArgs", ty("java.lang.Object[]"))
            .with_varargs(true)
            .with_body(vec![Stmt::Return(Expr::null())]);
        let mut synthetic = SyntheticType::new("rxhttp.wrapper.param", "RxHttp");
        synthetic.members.push(member);

        let source = render_type(&synthetic);
        assert!(source.contains(
            "public static RxHttpFormParam postForm(String url, Object... formatArgs) {"
        ));
    }

    #[test]
    fn renders_control_flow_and_literals() {
        let member = SyntheticMember::method("check", TypeRef::Void).with_body(vec![Stmt::If {
            condition: Expr::equals(Expr::var("value"), Expr::null()),
            then: vec![Stmt::Throw(Expr::new_instance(
                ClassType::new("java.lang.IllegalArgumentException"),
                vec![Expr::string("say \"no\"")],
            ))],
        }]);
        let mut synthetic = SyntheticType::new("p", "Checks");
        synthetic.members.push(member);

        let source = render_type(&synthetic);
        assert!(source.contains(
            "        if (value == null) {\n            throw new IllegalArgumentException(\"say \\\"no\\\"\");\n        }\n"
        ));
    }

    #[test]
    fn renders_generic_constructs() {
        let body = vec![
            Stmt::Local {
                ty: ty("java.lang.reflect.Type"),
                name: "tTypeList".to_string(),
                init: Expr::static_call(
                    ClassType::new("rxhttp.wrapper.entity.ParameterizedTypeImpl"),
                    "get",
                    vec![Expr::ClassLiteral(ty("java.util.List")), Expr::var("tType")],
                ),
            },
            Stmt::Return(Expr::local_call(
                "asParser",
                vec![Expr::New {
                    class: ClassType::new("com.example.ResponseParser"),
                    diamond: true,
                    args: vec![Expr::NewArray {
                        component: ty("java.lang.reflect.Type"),
                        elements: vec![Expr::var("tTypeList")],
                    }],
                }],
            )),
        ];
        let mut synthetic = SyntheticType::new("p", "Accessors");
        synthetic.members.push(
            SyntheticMember::method("asResponseList", ty("java.util.List<T>"))
                .with_modifier(Modifier::Public)
                .with_type_params(vec![TypeParam::new("T")])
                .with_body(body),
        );

        let source = render_type(&synthetic);
        assert!(source.contains("public <T> List<T> asResponseList() {"));
        assert!(source.contains("Type tTypeList = ParameterizedTypeImpl.get(List.class, tType);"));
        assert!(source.contains("return asParser(new ResponseParser<>(new Type[]{tTypeList}));"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let decl = make_param("com.example.PostEncryptFormParam", "postEncryptForm");
        let surface = synthesize_param("postEncryptForm", &decl, &GeneratorConfig::default());
        assert_eq!(render_type(&surface.wrapper), render_type(&surface.wrapper.clone()));
    }
}
