//! The immutable declaration graph.
//!
//! Inheritance checks walk from a declaration up through its superclass and
//! interface edges until a marker type is found. The graph is an adjacency
//! lookup over the round's type declarations; nothing is resolved lazily.
//!
//! A walk stops along a branch when it reaches:
//!
//! - a library type with a [`KnownType`] tag (reports its marker directly),
//! - a type with no superclass (the chain root),
//! - a name the round never declared, or
//! - a node it has already visited.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::declaration::TypeDecl;
use crate::known::KnownType;
use crate::round::RoundInput;
use crate::types::TypeRef;

/// Adjacency lookup from qualified name to declaration.
///
/// ## Examples
///
/// ```
/// use rxgen_define::{DeclarationGraph, KnownType, RoundInput, TypeDecl, TypeRef};
///
/// let mut base = TypeDecl::new("com.example.BaseParam");
/// base.superclass = Some(TypeRef::class("rxhttp.wrapper.param.FormParam"));
/// let mut param = TypeDecl::new("com.example.SignedParam");
/// param.superclass = Some(TypeRef::class("com.example.BaseParam"));
///
/// let round = RoundInput::new(vec![base, param.clone()], vec![]);
/// let graph = DeclarationGraph::new(&round);
/// assert!(graph.reaches(&param, KnownType::ParamMarker));
/// assert!(!graph.reaches(&param, KnownType::ParserMarker));
/// ```
#[derive(Debug, Clone)]
pub struct DeclarationGraph<'a> {
    nodes: HashMap<&'a str, &'a TypeDecl>,
}

impl<'a> DeclarationGraph<'a> {
    /// Builds the graph from every type declaration in the round.
    ///
    /// When two declarations share a name the first one wins.
    pub fn new(round: &'a RoundInput) -> Self {
        let mut nodes = HashMap::with_capacity(round.types.len());
        for decl in &round.types {
            nodes.entry(decl.name.as_str()).or_insert(decl);
        }
        Self { nodes }
    }

    /// Looks up a declaration by qualified name.
    pub fn get(&self, name: &str) -> Option<&'a TypeDecl> {
        self.nodes.get(name).copied()
    }

    /// Returns true when `decl`'s supertypes eventually reach `marker`.
    pub fn reaches(&self, decl: &TypeDecl, marker: KnownType) -> bool {
        let start = decl.superclass.iter().chain(decl.interfaces.iter());
        self.walk(start, marker)
    }

    /// Returns true when `ty` is `marker` or a type whose supertypes reach it.
    ///
    /// Used for field types, where the declared type itself may be the marker.
    pub fn type_reaches(&self, ty: &TypeRef, marker: KnownType) -> bool {
        self.walk(std::iter::once(ty), marker)
    }

    fn walk<'t, I>(&self, start: I, marker: KnownType) -> bool
    where
        I: IntoIterator<Item = &'t TypeRef>,
        'a: 't,
    {
        let mut queue: VecDeque<&'t TypeRef> = start.into_iter().collect();
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some(ty) = queue.pop_front() {
            let Some(class) = ty.as_class() else {
                continue;
            };

            // Library types answer directly; their own declarations are never walked.
            if let Some(known) = class.known() {
                if known.reaches(marker) {
                    return true;
                }
                continue;
            }

            if !visited.insert(class.name()) {
                continue;
            }

            if let Some(node) = self.get(class.name()) {
                queue.extend(node.superclass.iter());
                queue.extend(node.interfaces.iter());
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, superclass: Option<&str>, interfaces: &[&str]) -> TypeDecl {
        let mut decl = TypeDecl::new(name);
        decl.superclass = superclass.map(|s| s.parse().unwrap());
        decl.interfaces = interfaces.iter().map(|i| i.parse().unwrap()).collect();
        decl
    }

    #[test]
    fn direct_marker_interface() {
        let parser = decl(
            "com.example.StringParser",
            Some("java.lang.Object"),
            &["rxhttp.wrapper.parse.Parser<java.lang.String>"],
        );
        let round = RoundInput::new(vec![parser.clone()], vec![]);
        let graph = DeclarationGraph::new(&round);
        assert!(graph.reaches(&parser, KnownType::ParserMarker));
    }

    #[test]
    fn marker_through_library_base_class() {
        let parser = decl(
            "com.example.ResponseParser",
            Some("rxhttp.wrapper.parse.TypeParser<T>"),
            &[],
        );
        let round = RoundInput::new(vec![parser.clone()], vec![]);
        let graph = DeclarationGraph::new(&round);
        assert!(graph.reaches(&parser, KnownType::ParserMarker));
    }

    #[test]
    fn marker_through_interface_of_user_superclass() {
        let base = decl(
            "com.example.BaseParam",
            None,
            &["rxhttp.wrapper.param.Param<P>"],
        );
        let mid = decl("com.example.MidParam", Some("com.example.BaseParam"), &[]);
        let leaf = decl("com.example.LeafParam", Some("com.example.MidParam"), &[]);
        let round = RoundInput::new(vec![base, mid, leaf.clone()], vec![]);
        let graph = DeclarationGraph::new(&round);
        assert!(graph.reaches(&leaf, KnownType::ParamMarker));
    }

    #[test]
    fn chain_root_without_marker() {
        let plain = decl("com.example.Plain", Some("java.lang.Object"), &[]);
        let round = RoundInput::new(vec![plain.clone()], vec![]);
        let graph = DeclarationGraph::new(&round);
        assert!(!graph.reaches(&plain, KnownType::ParamMarker));
    }

    #[test]
    fn unknown_superclass_ends_the_walk() {
        let orphan = decl("com.example.Orphan", Some("com.other.Missing"), &[]);
        let round = RoundInput::new(vec![orphan.clone()], vec![]);
        let graph = DeclarationGraph::new(&round);
        assert!(!graph.reaches(&orphan, KnownType::ParamMarker));
    }

    #[test]
    fn cycles_terminate() {
        let a = decl("com.example.A", Some("com.example.B"), &[]);
        let b = decl("com.example.B", Some("com.example.A"), &[]);
        let round = RoundInput::new(vec![a.clone(), b], vec![]);
        let graph = DeclarationGraph::new(&round);
        assert!(!graph.reaches(&a, KnownType::ParamMarker));
    }

    #[test]
    fn field_type_may_be_the_marker_itself() {
        let round = RoundInput::default();
        let graph = DeclarationGraph::new(&round);
        let converter: TypeRef = "rxhttp.wrapper.callback.IConverter".parse().unwrap();
        assert!(graph.type_reaches(&converter, KnownType::ConverterMarker));

        let string: TypeRef = "java.lang.String".parse().unwrap();
        assert!(!graph.type_reaches(&string, KnownType::ConverterMarker));
    }

    #[test]
    fn field_type_through_user_implementation() {
        let impl_decl = decl(
            "com.example.FastJsonConverter",
            Some("java.lang.Object"),
            &["rxhttp.wrapper.callback.JsonConverter"],
        );
        let round = RoundInput::new(vec![impl_decl], vec![]);
        let graph = DeclarationGraph::new(&round);
        let ty: TypeRef = "com.example.FastJsonConverter".parse().unwrap();
        assert!(graph.type_reaches(&ty, KnownType::ConverterMarker));
    }
}
