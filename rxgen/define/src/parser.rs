//! Type expression parsing.
//!
//! Declarations name their types with Java-like type expressions. The
//! grammar is deliberately small:
//!
//! ```text
//! type     := primary ("[" "]")*
//! primary  := "void" | primitive | wildcard | name ("<" type ("," type)* ">")?
//! wildcard := "?" (("extends" | "super") type)?
//! name     := ident ("." ident)*
//! ```
//!
//! A dotted name is a class reference; a bare identifier that is neither
//! `void` nor a primitive is a type variable. Classes in the default package
//! are therefore not expressible, which matches how declarations are
//! reported by the host (always fully qualified).

use std::str::FromStr;

use thiserror::Error;

use crate::types::{Primitive, TypeRef};

/// A malformed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression '{input}' at offset {offset}: {reason}")]
pub struct TypeSyntaxError {
    /// The full expression that failed to parse.
    pub input: String,
    /// Byte offset where parsing stopped.
    pub offset: usize,
    /// What was expected.
    pub reason: String,
}

/// Parses a type expression.
///
/// ## Examples
///
/// ```
/// use rxgen_define::parser::parse_type;
/// use rxgen_define::TypeRef;
///
/// let ty = parse_type("java.util.Map<java.lang.String, T[]>").unwrap();
/// assert_eq!(ty.to_string(), "java.util.Map<java.lang.String, T[]>");
///
/// assert_eq!(parse_type("void").unwrap(), TypeRef::Void);
/// assert!(parse_type("java.util.List<").is_err());
/// ```
pub fn parse_type(input: &str) -> Result<TypeRef, TypeSyntaxError> {
    let mut cursor = Cursor { input, pos: 0 };
    let ty = cursor.parse_type()?;
    cursor.skip_whitespace();
    if cursor.pos != input.len() {
        return Err(cursor.error("unexpected trailing input"));
    }
    Ok(ty)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn error(&self, reason: &str) -> TypeSyntaxError {
        TypeSyntaxError {
            input: self.input.to_string(),
            offset: self.pos,
            reason: reason.to_string(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, token: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$'))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        if len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeSyntaxError> {
        let mut ty = self.parse_primary()?;
        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            ty = TypeRef::array_of(ty);
        }
        Ok(ty)
    }

    fn parse_primary(&mut self) -> Result<TypeRef, TypeSyntaxError> {
        if self.eat('?') {
            return self.parse_wildcard();
        }

        let first = self
            .ident()
            .ok_or_else(|| self.error("expected a type name"))?;
        let mut name = first.to_string();
        let mut dotted = false;
        while self.eat('.') {
            let segment = self
                .ident()
                .ok_or_else(|| self.error("expected an identifier after '.'"))?;
            name.push('.');
            name.push_str(segment);
            dotted = true;
        }

        if !dotted {
            if name == "void" {
                return Ok(TypeRef::Void);
            }
            if let Ok(primitive) = Primitive::from_str(&name) {
                return Ok(TypeRef::Primitive(primitive));
            }
        }

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        if dotted {
            Ok(TypeRef::parameterized(name, args))
        } else if args.is_empty() {
            Ok(TypeRef::Var(name))
        } else {
            Err(self.error("type arguments on a type variable"))
        }
    }

    fn parse_wildcard(&mut self) -> Result<TypeRef, TypeSyntaxError> {
        let checkpoint = self.pos;
        match self.ident() {
            Some("extends") => Ok(TypeRef::Wildcard {
                extends: Some(Box::new(self.parse_type()?)),
                super_bound: None,
            }),
            Some("super") => Ok(TypeRef::Wildcard {
                extends: None,
                super_bound: Some(Box::new(self.parse_type()?)),
            }),
            _ => {
                self.pos = checkpoint;
                Ok(TypeRef::Wildcard {
                    extends: None,
                    super_bound: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::known::KnownType;

    #[test]
    fn parses_primitives_and_void() {
        assert_eq!(parse_type("int").unwrap(), TypeRef::Primitive(Primitive::Int));
        assert_eq!(
            parse_type("boolean").unwrap(),
            TypeRef::Primitive(Primitive::Boolean)
        );
        assert_eq!(parse_type(" void ").unwrap(), TypeRef::Void);
    }

    #[test]
    fn parses_type_variables() {
        assert_eq!(parse_type("T").unwrap(), TypeRef::var("T"));
        assert_eq!(parse_type("T[]").unwrap(), TypeRef::array_of(TypeRef::var("T")));
    }

    #[test]
    fn parses_known_classes_with_tags() {
        let ty = parse_type("java.lang.reflect.Type[]").unwrap();
        assert!(ty.is_array_of(KnownType::ReflectType));

        let response = parse_type("okhttp3.Response").unwrap();
        assert!(response.is(KnownType::Response));
    }

    #[test]
    fn parses_nested_arguments() {
        let ty = parse_type("java.util.Map<java.lang.String,java.util.List<T>>").unwrap();
        let class = ty.as_class().unwrap();
        assert_eq!(class.name(), "java.util.Map");
        assert_eq!(class.args().len(), 2);
        assert_eq!(
            class.args()[1],
            TypeRef::parameterized("java.util.List", vec![TypeRef::var("T")])
        );
    }

    #[test]
    fn parses_wildcards() {
        assert_eq!(
            parse_type("java.lang.Class<?>").unwrap().to_string(),
            "java.lang.Class<?>"
        );
        assert_eq!(
            parse_type("java.util.List<? extends java.lang.Number>")
                .unwrap()
                .to_string(),
            "java.util.List<? extends java.lang.Number>"
        );
        assert_eq!(
            parse_type("java.util.List<? super T>").unwrap().to_string(),
            "java.util.List<? super T>"
        );
    }

    #[test]
    fn rejects_malformed_expressions() {
        for input in ["", "java.util.List<", "java.util.", "T<java.lang.String>", "int]", "1abc"] {
            let err = parse_type(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn error_reports_offset() {
        let err = parse_type("java.util.List<T").unwrap_err();
        assert_eq!(err.offset, "java.util.List<T".len());
        assert!(err.to_string().contains("expected ',' or '>'"));
    }
}
