//! The round driver.
//!
//! A [`Processor`] owns the configuration and the little state that spans
//! rounds. Each call to [`Processor::process_round`] runs the whole
//! pipeline on one [`RoundInput`]:
//!
//! 1. Validate and register every annotated declaration, one category at a time
//! 2. Synthesize wrappers, factories and accessors from the registry
//! 3. Aggregate cross-cutting members into the umbrella type
//!
//! Failures never escape as errors. They are reported to the
//! [`DiagnosticSink`] and the round yields [`RoundOutcome::Aborted`].
//!
//! ## Examples
//!
//! ```
//! use rxgen_define::RoundInput;
//! use rxgen_gen::config::GeneratorConfig;
//! use rxgen_gen::diagnostics::CollectingSink;
//! use rxgen_gen::processor::{Processor, RoundOutcome};
//!
//! let mut processor = Processor::new(GeneratorConfig::default());
//! let mut sink = CollectingSink::new();
//!
//! // The first round always generates the umbrella types.
//! let outcome = processor.process_round(&RoundInput::default(), &mut sink);
//! assert_eq!(outcome.types().len(), 2);
//!
//! // Later empty rounds are skipped.
//! let outcome = processor.process_round(&RoundInput::default(), &mut sink);
//! assert_eq!(outcome, RoundOutcome::Skipped);
//! ```

use std::collections::HashSet;

use rxgen_define::{
    Annotation, DeclarationCategory, DeclarationGraph, RoundInput, TypeDecl, TypeRef,
};
use tracing::{debug, info, warn};

use crate::codegen::{
    UmbrellaContributions, extensions_type, synthesize_accessors, synthesize_extensions,
    synthesize_param, synthesize_umbrella,
};
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::{GeneratorError, Result, ValidationError, ValidationErrorKind};
use crate::output::EmissionSink;
use crate::registry::Registry;
use crate::synthetic::SyntheticType;
use crate::validation::Validator;

/// The order categories are validated and registered in.
pub const CATEGORY_ORDER: [DeclarationCategory; 6] = [
    DeclarationCategory::ParameterBuilder,
    DeclarationCategory::Parser,
    DeclarationCategory::Converter,
    DeclarationCategory::ClientProvider,
    DeclarationCategory::BaseUrlField,
    DeclarationCategory::DefaultBaseUrlField,
];

/// The result of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Synthetic types in emission order: wrappers, `RxHttp`, `RxHttpExtensions`.
    Generated(Vec<SyntheticType>),
    /// At least one error was reported; nothing may be emitted.
    Aborted,
    /// The round carried no annotated declarations after output already existed.
    Skipped,
}

impl RoundOutcome {
    /// The generated types, empty unless the round generated output.
    pub fn types(&self) -> &[SyntheticType] {
        match self {
            Self::Generated(types) => types,
            Self::Aborted | Self::Skipped => &[],
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Runs generation rounds with a fixed configuration.
#[derive(Debug)]
pub struct Processor {
    config: GeneratorConfig,
    rounds: usize,
    generated: bool,
}

impl Processor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rounds: 0,
            generated: false,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of rounds processed so far, skipped rounds included.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Processes one round of declarations.
    ///
    /// ## Arguments
    ///
    /// * `round` - The declarations handed over by the host for this round
    /// * `sink` - Receives every error, warning and note
    ///
    /// ## Returns
    ///
    /// The synthetic types to emit, or why there are none.
    pub fn process_round(
        &mut self,
        round: &RoundInput,
        sink: &mut dyn DiagnosticSink,
    ) -> RoundOutcome {
        self.rounds += 1;
        let round_number = self.rounds;

        if self.config.debug {
            sink.report(Diagnostic::note(format!(
                "round {round_number}: {} types, {} fields, {} annotated (package {}, reactive {})",
                round.types.len(),
                round.fields.len(),
                round.annotated_count(),
                self.config.package,
                self.config.reactive,
            )));
        }

        if round.is_empty() && self.generated {
            debug!(round = round_number, "no annotated declarations; skipping");
            return RoundOutcome::Skipped;
        }

        let graph = DeclarationGraph::new(round);
        let validator = Validator::new(&graph, &self.config);
        let mut registry = Registry::new();
        let mut failed = false;

        for category in CATEGORY_ORDER {
            if let Err(err) = collect_category(category, round, &validator, &mut registry, sink) {
                sink.report(Diagnostic::from(&err));
                failed = true;
                if err.is_round_fatal() {
                    warn!(round = round_number, "round halted");
                    return RoundOutcome::Aborted;
                }
            }
        }

        if failed {
            info!(round = round_number, "round aborted by validation errors");
            return RoundOutcome::Aborted;
        }

        match synthesize_round(&registry, &self.config, sink) {
            Ok(types) => {
                self.generated = true;
                info!(
                    round = round_number,
                    params = registry.param_count(),
                    parsers = registry.parser_count(),
                    converters = registry.converters().len(),
                    clients = registry.clients().len(),
                    domains = registry.domains().len(),
                    types = types.len(),
                    "round generated"
                );
                RoundOutcome::Generated(types)
            }
            Err(err) => {
                sink.report(Diagnostic::error(None, err.to_string()));
                RoundOutcome::Aborted
            }
        }
    }

    /// Processes one round and hands any generated types to `emitter`.
    ///
    /// ## Errors
    ///
    /// Returns the first emission failure. Validation and synthesis
    /// failures are reported to `sink` and yield `Ok(RoundOutcome::Aborted)`.
    pub fn process_and_emit(
        &mut self,
        round: &RoundInput,
        sink: &mut dyn DiagnosticSink,
        emitter: &mut dyn EmissionSink,
    ) -> Result<RoundOutcome> {
        let outcome = self.process_round(round, sink);
        for ty in outcome.types() {
            emitter.emit(ty)?;
        }
        Ok(outcome)
    }
}

/// Validates and registers every declaration annotated with `category`.
///
/// Stops at the first failure. Declarations carrying an annotation on the
/// wrong kind of element are rejected here too.
fn collect_category<'a>(
    category: DeclarationCategory,
    round: &'a RoundInput,
    validator: &Validator<'_>,
    registry: &mut Registry<'a>,
    sink: &mut dyn DiagnosticSink,
) -> std::result::Result<(), ValidationError> {
    for decl in round.annotated_types(category) {
        validator.validate_type(decl, category)?;
        match category {
            DeclarationCategory::ParameterBuilder => registry.register_param(decl, sink)?,
            DeclarationCategory::Parser => registry.register_parser(decl, sink)?,
            _ => {}
        }
    }

    let default_count = round
        .annotated_fields(DeclarationCategory::DefaultBaseUrlField)
        .count();

    for field in round.annotated_fields(category) {
        validator.validate_field(field, category)?;
        match category {
            DeclarationCategory::Converter => registry.add_converter(field),
            DeclarationCategory::ClientProvider => registry.add_client(field),
            DeclarationCategory::BaseUrlField => registry.add_domain(field),
            DeclarationCategory::DefaultBaseUrlField => {
                registry.set_default_domain(field).map_err(|mut err| {
                    err.kind = ValidationErrorKind::DuplicateDefaultBaseUrl {
                        count: default_count,
                    };
                    err
                })?
            }
            _ => {}
        }
    }

    Ok(())
}

fn synthesize_round(
    registry: &Registry<'_>,
    config: &GeneratorConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<SyntheticType>> {
    let mut types = Vec::new();
    let mut contributions = UmbrellaContributions::default();
    let mut wrapper_names = HashSet::new();

    for (alias, decl) in registry.params() {
        let surface = synthesize_param(alias, decl, config);
        if !wrapper_names.insert(surface.wrapper.name.clone()) {
            return Err(GeneratorError::Internal(format!(
                "{} would generate {}, which another @Param class already generates",
                decl.name, surface.wrapper.name
            )));
        }
        contributions.factories.extend(surface.factories);
        types.push(surface.wrapper);
    }

    let mut extensions = Vec::new();
    for (alias, decl) in registry.parsers() {
        if decl.parse_return_type().is_none() {
            report_skipped_parser(decl, sink);
            continue;
        }
        if let Some(accessors) = synthesize_accessors(alias, decl, wrappers_of(decl), config)? {
            contributions.accessors.extend(accessors);
        }
        if let Some(members) = synthesize_extensions(alias, decl) {
            extensions.extend(members);
        }
    }

    types.push(synthesize_umbrella(registry, contributions, config));
    types.push(extensions_type(extensions, config));
    Ok(types)
}

fn wrappers_of(decl: &TypeDecl) -> &[TypeRef] {
    decl.annotation
        .as_ref()
        .map(Annotation::wrappers)
        .unwrap_or_default()
}

fn report_skipped_parser(decl: &TypeDecl, sink: &mut dyn DiagnosticSink) {
    warn!(parser = %decl.name, "no onParse(okhttp3.Response); accessors skipped");
    sink.report(Diagnostic::warning(
        Some(&decl.name),
        "declares no public onParse(okhttp3.Response) method; no accessors were generated",
    ));
}
