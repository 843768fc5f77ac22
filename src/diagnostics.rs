//! Structured, non-fatal diagnostics collected during a generation run.
//!
//! The core never prints; recoverable conditions become [`Diagnostic`]
//! values inside the [`RunReport`], and the host decides how to log them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What kind of recoverable condition a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A configured source path does not exist.
    SourcePathMissing,
    /// A configured source path is a file where a directory was expected.
    SourceNotADirectory,
    /// A source directory could not be listed.
    DirectoryUnreadable,
    /// A file name does not match the locale naming convention.
    FileNameMismatch,
    /// A resource file could not be read; its group continues without it.
    FileUnreadable,
    /// The configured encoding label is unknown; UTF-8 is used instead.
    UnsupportedEncoding,
    /// A file contained byte sequences invalid under the configured
    /// encoding; they were decoded lossily.
    MalformedEncoding,
    /// A group (or flat file) produced no translations; no type is
    /// generated for it.
    EmptyGroup,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::SourcePathMissing => write!(f, "source-path-missing"),
            DiagnosticKind::SourceNotADirectory => write!(f, "source-not-a-directory"),
            DiagnosticKind::DirectoryUnreadable => write!(f, "directory-unreadable"),
            DiagnosticKind::FileNameMismatch => write!(f, "file-name-mismatch"),
            DiagnosticKind::FileUnreadable => write!(f, "file-unreadable"),
            DiagnosticKind::UnsupportedEncoding => write!(f, "unsupported-encoding"),
            DiagnosticKind::MalformedEncoding => write!(f, "malformed-encoding"),
            DiagnosticKind::EmptyGroup => write!(f, "empty-group"),
        }
    }
}

/// One recoverable condition, attributable to the path it arose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            path,
            message: message.into(),
        }
    }

    pub fn source_path_missing(path: &Path) -> Self {
        Diagnostic::new(
            DiagnosticKind::SourcePathMissing,
            Some(path.to_path_buf()),
            format!("source path {} does not exist, skipping", path.display()),
        )
    }

    pub fn source_not_a_directory(path: &Path) -> Self {
        Diagnostic::new(
            DiagnosticKind::SourceNotADirectory,
            Some(path.to_path_buf()),
            format!(
                "source path {} is a file, expected a directory of resource files",
                path.display()
            ),
        )
    }

    pub fn directory_unreadable(path: &Path, error: &std::io::Error) -> Self {
        Diagnostic::new(
            DiagnosticKind::DirectoryUnreadable,
            Some(path.to_path_buf()),
            format!("cannot list directory {}: {}", path.display(), error),
        )
    }

    pub fn file_name_mismatch(path: &Path) -> Self {
        Diagnostic::new(
            DiagnosticKind::FileNameMismatch,
            Some(path.to_path_buf()),
            format!(
                "{} does not match `<base>_<lang>[_<REGION>].properties`, skipping",
                path.display()
            ),
        )
    }

    pub fn file_unreadable(path: &Path, error: &crate::error::Error) -> Self {
        Diagnostic::new(
            DiagnosticKind::FileUnreadable,
            Some(path.to_path_buf()),
            format!("cannot read {}: {}", path.display(), error),
        )
    }

    pub fn unsupported_encoding(label: &str) -> Self {
        Diagnostic::new(
            DiagnosticKind::UnsupportedEncoding,
            None,
            format!("unsupported encoding `{}`, falling back to UTF-8", label),
        )
    }

    pub fn malformed_encoding(path: &Path, encoding_name: &str) -> Self {
        Diagnostic::new(
            DiagnosticKind::MalformedEncoding,
            Some(path.to_path_buf()),
            format!(
                "{} contains byte sequences invalid for {}, decoded lossily",
                path.display(),
                encoding_name
            ),
        )
    }

    pub fn empty_group(base_name: &str) -> Self {
        Diagnostic::new(
            DiagnosticKind::EmptyGroup,
            None,
            format!("no translations found for base name `{}`, nothing generated", base_name),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.kind, self.message)
    }
}

/// The outcome of one generation invocation: every file written and every
/// warning raised along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub generated: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the report as JSON for the host's logging channel.
    pub fn to_json_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), crate::Error> {
        serde_json::to_writer(&mut writer, self)?;
        Ok(())
    }
}
