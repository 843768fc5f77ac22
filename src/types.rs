//! Core types shared across the pipeline: parsed entries, locale codes,
//! file groups, and merged translation tables.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

/// A single key/value pair parsed from a resource file.
///
/// The key is the literal text left of the separator; the value is the raw
/// decoded text with no further transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Entry {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A locale code taken from a resource file name: two lowercase letters,
/// optionally followed by `_` and two uppercase letters (`en`, `en_US`).
///
/// The raw code is preserved verbatim for output; parsing additionally
/// validates it as a well-formed language identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleCode {
    code: String,
}

impl LocaleCode {
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// The code as a `unic_langid` identifier (`en_US` → `en-US`).
    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        self.code.replace('_', "-").parse().ok()
    }
}

impl FromStr for LocaleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = LocaleCode {
            code: s.to_string(),
        };
        match candidate.language_identifier() {
            Some(_) => Ok(candidate),
            None => Err(format!("not a well-formed locale code: {}", s)),
        }
    }
}

impl Display for LocaleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// The locale-qualified files sharing one base name inside a source
/// directory, e.g. `invoice` → `invoice_de.properties`,
/// `invoice_en.properties`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFileGroup {
    pub base_name: String,
    /// Member files, sorted by locale code for reproducible processing.
    pub files: Vec<(LocaleCode, PathBuf)>,
}

impl LocaleFileGroup {
    pub fn new(base_name: impl Into<String>) -> Self {
        LocaleFileGroup {
            base_name: base_name.into(),
            files: Vec::new(),
        }
    }
}

/// Merged translations for one group: resource key → locale code → value.
///
/// Key order is first-seen order across the group's files; locale order
/// within a key is the order the locale files were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    translations: IndexMap<String, IndexMap<String, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates one translation, preserving first-seen key and
    /// locale positions.
    pub fn insert(&mut self, key: impl Into<String>, locale: &LocaleCode, value: impl Into<String>) {
        self.translations
            .entry(key.into())
            .or_default()
            .insert(locale.as_str().to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&IndexMap<String, String>> {
        self.translations.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexMap<String, String>)> {
        self.translations.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.translations.keys()
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}
