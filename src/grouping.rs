//! Discovery and merging of locale-qualified resource file groups.
//!
//! Files named `<base>_<lang>[_<REGION>].properties` inside one directory
//! are grouped by base name; each group's files are parsed and merged into
//! a single [`TranslationTable`].

use std::path::Path;

use encoding_rs::Encoding;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    diagnostics::Diagnostic,
    formats::properties::Format,
    types::{LocaleCode, LocaleFileGroup, TranslationTable},
};

lazy_static! {
    /// `<base>_<lang>[_<REGION>].properties`, where `lang` is exactly two
    /// lowercase letters and `REGION` exactly two uppercase letters.
    static ref LOCALE_FILE_PATTERN: Regex =
        Regex::new(r"^(.+)_([a-z]{2}(?:_[A-Z]{2})?)\.properties$").unwrap();
}

/// Matches a file name against the locale naming convention.
pub fn match_locale_file_name(file_name: &str) -> Option<(String, LocaleCode)> {
    let captures = LOCALE_FILE_PATTERN.captures(file_name)?;
    let base_name = captures.get(1)?.as_str().to_string();
    let locale: LocaleCode = captures.get(2)?.as_str().parse().ok()?;
    Some((base_name, locale))
}

/// Lists a directory (non-recursive) and groups its locale-qualified
/// resource files by base name.
///
/// An unreadable directory yields an empty result plus a diagnostic, not
/// an error. Files that do not match the naming convention are reported
/// and excluded. Groups are sorted by base name and files within a group
/// by locale code, so downstream processing order is reproducible.
pub fn discover_groups(directory: &Path, diagnostics: &mut Vec<Diagnostic>) -> Vec<LocaleFileGroup> {
    let read_dir = match std::fs::read_dir(directory) {
        Ok(read_dir) => read_dir,
        Err(error) => {
            diagnostics.push(Diagnostic::directory_unreadable(directory, &error));
            return Vec::new();
        }
    };

    let mut groups: IndexMap<String, LocaleFileGroup> = IndexMap::new();
    let mut paths: Vec<_> = read_dir
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    for path in paths {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            diagnostics.push(Diagnostic::file_name_mismatch(&path));
            continue;
        };
        match match_locale_file_name(file_name) {
            Some((base_name, locale)) => {
                groups
                    .entry(base_name.clone())
                    .or_insert_with(|| LocaleFileGroup::new(base_name))
                    .files
                    .push((locale, path));
            }
            None => diagnostics.push(Diagnostic::file_name_mismatch(&path)),
        }
    }

    groups.sort_keys();
    let mut groups: Vec<LocaleFileGroup> = groups.into_values().collect();
    for group in &mut groups {
        group.files.sort();
    }
    groups
}

/// Parses each file of a group and merges the entries into one table.
///
/// Per-file read problems are reported and that file skipped; the group
/// continues with its remaining files. Key order is first-seen order
/// across the (locale-sorted) files; locale order within a key is file
/// processing order.
pub fn merge_group(
    group: &LocaleFileGroup,
    encoding: &'static Encoding,
    diagnostics: &mut Vec<Diagnostic>,
) -> TranslationTable {
    let mut table = TranslationTable::new();

    for (locale, path) in &group.files {
        let (format, had_errors) = match Format::read_with_encoding(path, encoding) {
            Ok(result) => result,
            Err(error) => {
                diagnostics.push(Diagnostic::file_unreadable(path, &error));
                continue;
            }
        };
        if had_errors {
            diagnostics.push(Diagnostic::malformed_encoding(path, encoding.name()));
        }

        for entry in format.entries {
            table.insert(entry.key, locale, entry.value);
        }
    }

    table
}

/// Discovers, parses, and merges all locale groups in `directory`.
pub fn group_and_merge(
    directory: &Path,
    encoding: &'static Encoding,
    diagnostics: &mut Vec<Diagnostic>,
) -> IndexMap<String, TranslationTable> {
    let groups = discover_groups(directory, diagnostics);

    let mut tables = IndexMap::new();
    for group in groups {
        let table = merge_group(&group, encoding, diagnostics);
        tables.insert(group.base_name, table);
    }
    tables
}
