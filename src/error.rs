//! All error types for the propgen crate.
//!
//! These are returned from all fallible operations (key conversion, naming,
//! parsing, assembly, generation). Recoverable per-file conditions are not
//! errors; they are collected as [`crate::diagnostics::Diagnostic`] values.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A resource key is blank or reduces to an empty or underscore-only
    /// constant name. The message carries the original key.
    #[error("invalid property key: {0}")]
    InvalidKey(String),

    /// A resource base name handed to a naming strategy is empty.
    #[error("invalid resource name: {0}")]
    InvalidResourceName(String),

    /// A naming strategy identifier could not be resolved to a registered
    /// implementation.
    #[error("cannot resolve naming strategy `{0}`: no such strategy is registered")]
    StrategyResolution(String),

    /// Two distinct resource keys normalized to the same constant
    /// identifier within one generated type.
    #[error(
        "duplicate constant `{identifier}`: keys `{first_key}` and `{second_key}` normalize to the same name"
    )]
    DuplicateConstant {
        identifier: String,
        first_key: String,
        second_key: String,
    },

    /// The invocation was configured without any sources.
    #[error("no sources configured: at least one source directory is required")]
    NoSources,

    #[error("cannot create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
