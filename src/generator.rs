//! Orchestration: wires naming, grouping, parsing, and assembly together
//! and writes the rendered files.

use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::{
    builder::{CodeFile, CodeFileBuilder},
    diagnostics::{Diagnostic, RunReport},
    error::Error,
    formats::{PROPERTIES_EXTENSION, properties::Format},
    grouping,
    naming::{ClassNameStrategy, DefaultClassNameStrategy, StrategyRegistry},
    provenance::{Clock, Provenance, SystemClock},
    types::{Entry, TranslationTable},
};

/// One configured input: a directory of resource files and the namespace
/// its generated types belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub target_namespace: String,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, target_namespace: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            target_namespace: target_namespace.into(),
        }
    }
}

/// How resource files map to generated types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Group `<base>_<lang>[_<REGION>].properties` files by base name and
    /// generate one type of localized maps per group.
    #[default]
    LocaleGroups,
    /// Generate one type of plain constants per `.properties` file,
    /// ignoring locale suffixes. The degenerate single-file case of the
    /// locale pipeline: same assembly and rendering path, group size one.
    FlatFiles,
}

/// Resolves an encoding label, falling back to UTF-8 with a diagnostic
/// when the label is unknown.
pub fn resolve_encoding(label: &str) -> (&'static Encoding, Option<Diagnostic>) {
    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => (encoding, None),
        None => (UTF_8, Some(Diagnostic::unsupported_encoding(label))),
    }
}

/// The generation pipeline for one invocation.
///
/// Stateless across runs: given identical inputs and an injected fixed
/// clock, two invocations produce byte-identical output.
pub struct Generator {
    output_dir: PathBuf,
    encoding: &'static Encoding,
    strategy: Box<dyn ClassNameStrategy>,
    generator_version: String,
    mode: GenerationMode,
    clock: Box<dyn Clock>,
    pending: Vec<Diagnostic>,
}

impl Generator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Generator {
            output_dir: output_dir.into(),
            encoding: UTF_8,
            strategy: Box::new(DefaultClassNameStrategy),
            generator_version: "unknown".to_string(),
            mode: GenerationMode::default(),
            clock: Box::new(SystemClock),
            pending: Vec::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Configures the encoding from a label such as `UTF-8` or
    /// `ISO-8859-1`. Unknown labels fall back to UTF-8; the warning is
    /// carried into the next run's report.
    pub fn with_encoding_label(mut self, label: &str) -> Self {
        let (encoding, diagnostic) = resolve_encoding(label);
        self.encoding = encoding;
        self.pending.extend(diagnostic);
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn ClassNameStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolves the strategy through a registry. An absent or empty
    /// identifier keeps the default strategy; an unresolvable identifier
    /// is a configuration error.
    pub fn with_strategy_identifier(
        self,
        registry: &StrategyRegistry,
        identifier: Option<&str>,
    ) -> Result<Self, Error> {
        let strategy = registry.resolve(identifier)?;
        Ok(self.with_strategy(strategy))
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.generator_version = if version.is_empty() {
            "unknown".to_string()
        } else {
            version.to_string()
        };
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Processes every source and returns the written paths plus all
    /// collected warnings.
    ///
    /// Recoverable conditions (missing source paths, non-matching files,
    /// empty groups, decode problems) are reported and skipped; only
    /// configuration and output I/O failures abort the run.
    pub fn run(&self, sources: &[Source]) -> Result<RunReport, Error> {
        if sources.is_empty() {
            return Err(Error::NoSources);
        }

        let mut report = RunReport::new();
        report.diagnostics.extend(self.pending.iter().cloned());

        for source in sources {
            self.process_source(source, &mut report)?;
        }

        Ok(report)
    }

    fn process_source(&self, source: &Source, report: &mut RunReport) -> Result<(), Error> {
        let path = source.path.as_path();

        if !path.exists() {
            report.diagnostics.push(Diagnostic::source_path_missing(path));
            return Ok(());
        }
        if path.is_file() {
            report
                .diagnostics
                .push(Diagnostic::source_not_a_directory(path));
            return Ok(());
        }

        match self.mode {
            GenerationMode::LocaleGroups => {
                let tables =
                    grouping::group_and_merge(path, self.encoding, &mut report.diagnostics);
                for (base_name, table) in &tables {
                    if table.is_empty() {
                        report.diagnostics.push(Diagnostic::empty_group(base_name));
                        continue;
                    }
                    let written =
                        self.generate_group(base_name, table, &source.target_namespace)?;
                    report.generated.push(written);
                }
            }
            GenerationMode::FlatFiles => {
                self.process_flat_directory(path, &source.target_namespace, report)?;
            }
        }

        Ok(())
    }

    fn process_flat_directory(
        &self,
        directory: &Path,
        namespace: &str,
        report: &mut RunReport,
    ) -> Result<(), Error> {
        let read_dir = match std::fs::read_dir(directory) {
            Ok(read_dir) => read_dir,
            Err(error) => {
                report
                    .diagnostics
                    .push(Diagnostic::directory_unreadable(directory, &error));
                return Ok(());
            }
        };

        let mut paths: Vec<_> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        for file_path in paths {
            let is_properties = file_path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == PROPERTIES_EXTENSION);
            let Some(file_name) = file_path.file_name().and_then(|n| n.to_str()) else {
                report
                    .diagnostics
                    .push(Diagnostic::file_name_mismatch(&file_path));
                continue;
            };
            if !is_properties {
                report
                    .diagnostics
                    .push(Diagnostic::file_name_mismatch(&file_path));
                continue;
            }

            let (format, had_errors) = match Format::read_with_encoding(&file_path, self.encoding)
            {
                Ok(result) => result,
                Err(error) => {
                    report
                        .diagnostics
                        .push(Diagnostic::file_unreadable(&file_path, &error));
                    continue;
                }
            };
            if had_errors {
                report
                    .diagnostics
                    .push(Diagnostic::malformed_encoding(&file_path, self.encoding.name()));
            }

            if format.entries.is_empty() {
                report.diagnostics.push(Diagnostic::empty_group(file_name));
                continue;
            }

            let written = self.generate_file(file_name, &format.entries, namespace)?;
            report.generated.push(written);
        }

        Ok(())
    }

    /// Generates one type of localized map constants for a merged group.
    pub fn generate_group(
        &self,
        base_name: &str,
        table: &TranslationTable,
        namespace: &str,
    ) -> Result<PathBuf, Error> {
        let type_name = self.strategy.class_name(base_name)?;
        let provenance = Provenance::new(
            format!("{}_*.properties", base_name),
            &self.generator_version,
            self.clock.as_ref(),
        );

        let mut builder = CodeFileBuilder::new(type_name, namespace, provenance);
        for (key, translations) in table.iter() {
            builder = builder.localized(
                key,
                translations
                    .iter()
                    .map(|(locale, value)| (locale.clone(), value.clone())),
            )?;
        }

        self.write_code_file(&builder.build())
    }

    /// Generates one type of plain constants for a single resource file.
    pub fn generate_file(
        &self,
        file_name: &str,
        entries: &[Entry],
        namespace: &str,
    ) -> Result<PathBuf, Error> {
        let type_name = self.strategy.class_name(file_name)?;
        let provenance =
            Provenance::new(file_name, &self.generator_version, self.clock.as_ref());

        let mut builder = CodeFileBuilder::new(type_name, namespace, provenance);
        for entry in entries {
            builder = builder.constant(&entry.key, &entry.value)?;
        }

        self.write_code_file(&builder.build())
    }

    /// Renders and writes one file under
    /// `<output>/<namespace dots → slashes>/<TypeName>.rs`, creating
    /// intermediate directories and overwriting unconditionally.
    fn write_code_file(&self, file: &CodeFile) -> Result<PathBuf, Error> {
        let package_dir = self.output_dir.join(file.namespace().replace('.', "/"));
        std::fs::create_dir_all(&package_dir).map_err(|source| Error::OutputDirectory {
            path: package_dir.clone(),
            source,
        })?;

        let output_path = package_dir.join(format!("{}.rs", file.type_name()));
        write_atomic(&output_path, &file.render())?;
        Ok(output_path)
    }
}

/// Writes through a sibling temp file and renames it into place, so a
/// failed write never leaves a complete-looking partial file.
fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    let tmp = path.with_extension("rs.tmp");

    if let Err(source) = std::fs::write(&tmp, contents) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    if std::fs::rename(&tmp, path).is_err() {
        // Some platforms refuse to rename over an existing file.
        let _ = std::fs::remove_file(path);
        if let Err(source) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::OutputWrite {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_encoding_known_labels() {
        let (encoding, diagnostic) = resolve_encoding("UTF-8");
        assert_eq!(encoding, UTF_8);
        assert!(diagnostic.is_none());

        let (encoding, diagnostic) = resolve_encoding("ISO-8859-1");
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
        assert!(diagnostic.is_none());
    }

    #[test]
    fn test_resolve_encoding_unknown_label_falls_back() {
        let (encoding, diagnostic) = resolve_encoding("EBCDIC-37");
        assert_eq!(encoding, UTF_8);
        let diagnostic = diagnostic.unwrap();
        assert!(diagnostic.message.contains("EBCDIC-37"));
    }

    #[test]
    fn test_run_rejects_empty_source_list() {
        let generator = Generator::new("out");
        assert!(matches!(generator.run(&[]), Err(Error::NoSources)));
    }
}
