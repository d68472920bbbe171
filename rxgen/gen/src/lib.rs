//! RxHttp code generator library.
//!
//! This crate turns annotated declarations (described with `rxgen-define`)
//! into the Java sources RxHttp users call at runtime:
//!
//! - One fluent wrapper `RxHttpX` per `@Param` class `X`
//! - The umbrella `RxHttp` type with factories, setters and parser accessors
//! - `RxHttpExtensions` with suspend-style `to*` accessors
//!
//! ## Modules
//!
//! - [`processor`] - The round driver
//! - [`validation`] - Structural checks per declaration category
//! - [`registry`] - Alias-keyed, insertion-ordered declaration storage
//! - [`codegen`] - Synthesizers producing [`synthetic`] types
//! - [`render`] - Deterministic Java rendering
//! - [`output`] - Emission sinks and atomic file writing
//! - [`diagnostics`] - The diagnostics channel
//! - [`config`] - Processor options
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```
//! use rxgen_gen::config::GeneratorConfig;
//! use rxgen_gen::diagnostics::CollectingSink;
//! use rxgen_gen::input::parse_round;
//! use rxgen_gen::output::MemorySink;
//! use rxgen_gen::processor::Processor;
//!
//! let round = parse_round(r#"{"types": [{
//!     "name": "com.example.PostEncryptFormParam",
//!     "modifiers": ["public"],
//!     "superclass": "rxhttp.wrapper.param.FormParam",
//!     "members": [{"kind": "constructor", "modifiers": ["public"],
//!                  "params": [{"name": "url", "type": "java.lang.String"}]}],
//!     "annotation": {"kind": "param", "method_name": "postEncryptForm"}
//! }]}"#, "inline").unwrap();
//!
//! let mut processor = Processor::new(GeneratorConfig::default());
//! let mut diagnostics = CollectingSink::new();
//! let mut emitter = MemorySink::new();
//! processor.process_and_emit(&round, &mut diagnostics, &mut emitter).unwrap();
//!
//! let names: Vec<_> = emitter.types().iter().map(|t| t.name.as_str()).collect();
//! assert_eq!(names, vec!["RxHttpPostEncryptFormParam", "RxHttp", "RxHttpExtensions"]);
//! assert!(!diagnostics.has_errors());
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod input;
pub mod output;
pub mod processor;
pub mod registry;
pub mod render;
pub mod synthetic;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
