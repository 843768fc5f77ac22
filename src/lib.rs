#![forbid(unsafe_code)]
//! Build-time code generator turning `.properties` localization files into
//! Rust constant modules.
//!
//! Resource files named `<base>_<lang>[_<REGION>].properties` are grouped
//! by base name; each group becomes one generated type exposing, per key, a
//! locale → value map. Files without a locale suffix can instead be turned
//! into types of plain string constants (flat mode).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use propgen::{Generator, Source};
//!
//! let generator = Generator::new("target/generated")
//!     .with_version(env!("CARGO_PKG_VERSION"));
//! let report = generator.run(&[Source::new("resources/i18n", "app.messages")])?;
//!
//! for warning in &report.diagnostics {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), propgen::Error>(())
//! ```
//!
//! # Design
//!
//! - Recoverable conditions (missing paths, non-matching file names, empty
//!   groups, decode problems) never abort a run; they are collected as
//!   structured [`diagnostics::Diagnostic`] values for the host to log.
//! - Output is deterministic: keys keep first-seen order, locales keep
//!   file processing order, and the header timestamp comes from an
//!   injectable [`provenance::Clock`].
//! - Type naming is pluggable through [`naming::ClassNameStrategy`] and an
//!   explicit [`naming::StrategyRegistry`].

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod escape;
pub mod formats;
pub mod generator;
pub mod grouping;
pub mod naming;
pub mod provenance;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    builder::{CodeFile, CodeFileBuilder, Member},
    diagnostics::{Diagnostic, DiagnosticKind, RunReport},
    error::Error,
    generator::{GenerationMode, Generator, Source, resolve_encoding},
    naming::{ClassNameStrategy, DefaultClassNameStrategy, StrategyRegistry},
    provenance::{Clock, FixedClock, Provenance, SystemClock},
    types::{Entry, LocaleCode, LocaleFileGroup, TranslationTable},
};
