//! The per-round declaration registry.
//!
//! Parameter builders and parsers are keyed by their annotation alias in
//! insertion-ordered maps; that order is the order factories and accessors
//! are emitted in. Field categories are kept as plain lists in input order.
//!
//! Re-registering an alias replaces the earlier declaration in place (it
//! keeps the original position). The replacement is reported as a warning
//! rather than an error.

use indexmap::IndexMap;
use rxgen_define::{DeclarationCategory, FieldDecl, TypeDecl};
use tracing::{debug, warn};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::{ValidationError, ValidationErrorKind};

/// Validated declarations for one round, borrowed from the round input.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    params: IndexMap<String, &'a TypeDecl>,
    parsers: IndexMap<String, &'a TypeDecl>,
    converters: Vec<&'a FieldDecl>,
    clients: Vec<&'a FieldDecl>,
    domains: Vec<&'a FieldDecl>,
    default_domain: Option<&'a FieldDecl>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter builder under its `method_name`.
    ///
    /// ## Errors
    ///
    /// Returns `ValidationErrorKind::EmptyAlias` when the alias is empty.
    pub fn register_param(
        &mut self,
        decl: &'a TypeDecl,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), ValidationError> {
        let alias = typed_alias(decl, DeclarationCategory::ParameterBuilder)?;
        insert_aliased(&mut self.params, alias, decl, sink);
        Ok(())
    }

    /// Registers a parser under its `name`.
    ///
    /// ## Errors
    ///
    /// Returns `ValidationErrorKind::EmptyAlias` when the alias is empty.
    pub fn register_parser(
        &mut self,
        decl: &'a TypeDecl,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), ValidationError> {
        let alias = typed_alias(decl, DeclarationCategory::Parser)?;
        insert_aliased(&mut self.parsers, alias, decl, sink);
        Ok(())
    }

    pub fn add_converter(&mut self, field: &'a FieldDecl) {
        self.converters.push(field);
    }

    pub fn add_client(&mut self, field: &'a FieldDecl) {
        self.clients.push(field);
    }

    pub fn add_domain(&mut self, field: &'a FieldDecl) {
        self.domains.push(field);
    }

    /// Fills the single default base URL slot.
    ///
    /// ## Errors
    ///
    /// Returns `ValidationErrorKind::DuplicateDefaultBaseUrl` when the slot is
    /// already taken.
    pub fn set_default_domain(&mut self, field: &'a FieldDecl) -> Result<(), ValidationError> {
        if self.default_domain.is_some() {
            return Err(ValidationError::new(
                DeclarationCategory::DefaultBaseUrlField,
                field.qualified_name(),
                ValidationErrorKind::DuplicateDefaultBaseUrl { count: 2 },
            ));
        }
        self.default_domain = Some(field);
        Ok(())
    }

    /// Parameter builders in registration order, keyed by alias.
    pub fn params(&self) -> impl Iterator<Item = (&str, &'a TypeDecl)> + '_ {
        self.params.iter().map(|(alias, decl)| (alias.as_str(), *decl))
    }

    /// Parsers in registration order, keyed by alias.
    pub fn parsers(&self) -> impl Iterator<Item = (&str, &'a TypeDecl)> + '_ {
        self.parsers.iter().map(|(alias, decl)| (alias.as_str(), *decl))
    }

    pub fn converters(&self) -> &[&'a FieldDecl] {
        &self.converters
    }

    pub fn clients(&self) -> &[&'a FieldDecl] {
        &self.clients
    }

    pub fn domains(&self) -> &[&'a FieldDecl] {
        &self.domains
    }

    pub fn default_domain(&self) -> Option<&'a FieldDecl> {
        self.default_domain
    }

    /// Returns true when any base URL (named or default) was declared.
    pub fn has_domains(&self) -> bool {
        !self.domains.is_empty() || self.default_domain.is_some()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn parser_count(&self) -> usize {
        self.parsers.len()
    }
}

fn typed_alias(decl: &TypeDecl, category: DeclarationCategory) -> Result<&str, ValidationError> {
    match decl.alias() {
        Some(alias) if !alias.is_empty() => Ok(alias),
        _ => Err(ValidationError::new(
            category,
            decl.name.clone(),
            ValidationErrorKind::EmptyAlias,
        )),
    }
}

fn insert_aliased<'a>(
    map: &mut IndexMap<String, &'a TypeDecl>,
    alias: &str,
    decl: &'a TypeDecl,
    sink: &mut dyn DiagnosticSink,
) {
    match map.insert(alias.to_string(), decl) {
        Some(previous) => {
            warn!(alias, replaced = %previous.name, by = %decl.name, "duplicate alias");
            sink.report(Diagnostic::warning(
                Some(&decl.name),
                format!("alias '{alias}' was already registered by {}; it now refers to this declaration", previous.name),
            ));
        }
        None => debug!(alias, declaration = %decl.name, "registered"),
    }
}
