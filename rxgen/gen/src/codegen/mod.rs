//! Synthesizers for the generated Java types.
//!
//! Each submodule turns validated declarations into [`crate::synthetic`]
//! descriptions. None of them render text or report diagnostics; the
//! processor decides what to do with a `None` result.
//!
//! ## Submodules
//!
//! - [`surface`] - Per-`@Param` wrapper types and static factories
//! - [`accessors`] - Reactive `as*` accessors for `@Parser` classes
//! - [`extensions`] - Suspend-style `to*` accessors and their holder type
//! - [`umbrella`] - The `RxHttp` umbrella type collecting cross-cutting members
//!
//! ## Synthesis Flow
//!
//! 1. Every registered parameter builder goes through [`synthesize_param`]
//! 2. Every registered parser goes through [`synthesize_accessors`] and [`synthesize_extensions`]
//! 3. Factories and accessors are folded into the umbrella via [`synthesize_umbrella`]
//! 4. Extension accessors are collected into [`extensions_type`]
//!
//! See [`crate::processor`] for the round driver.

pub mod accessors;
pub mod extensions;
pub mod surface;
pub mod umbrella;

pub use accessors::synthesize_accessors;
pub use extensions::{extensions_type, synthesize_extensions};
pub use surface::{ParamSurface, WrapperBase, resolve_base, synthesize_param};
pub use umbrella::{UmbrellaContributions, synthesize_umbrella};
