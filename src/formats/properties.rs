//! Parser for the Java `.properties` key/value format.
//!
//! Supported subset: line-oriented `key = value` pairs where the separator
//! is the first unescaped `=`, `:`, or whitespace run; comment lines
//! starting with `#` or `!`; backslash line-continuation; and the escape
//! sequences `\t`, `\n`, `\r`, `\f`, `\\`, `\uXXXX` plus `\<any>` → `<any>`
//! in both keys and values. Malformed `\uXXXX` sequences are kept
//! literally. Duplicate keys keep their first position; the last value
//! wins.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;

use crate::{error::Error, traits::Parser, types::Entry};

/// A parsed `.properties` file: its entries in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub entries: Vec<Entry>,
}

impl Format {
    /// Reads a file under an explicit encoding.
    ///
    /// Decoding is BOM-sniffing and never fails: byte sequences invalid
    /// under `encoding` are replaced and the returned flag is set so the
    /// caller can report the file instead of aborting the run.
    pub fn read_with_encoding<P: AsRef<Path>>(
        path: P,
        encoding: &'static Encoding,
    ) -> Result<(Self, bool), Error> {
        let bytes = std::fs::read(path).map_err(Error::Io)?;
        let (decoded, _, had_errors) = encoding.decode(&bytes);
        let format = Self::from_str(&decoded)?;
        Ok((format, had_errors))
    }
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;

        let mut entries: Vec<Entry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let mut iter = lines.into_iter();
        while let Some(line) = iter.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                // Comment and blank lines never continue.
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match iter.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let Some((key, value)) = split_key_value(&logical) else {
                continue;
            };

            match positions.get(&key) {
                Some(&index) => entries[index].value = value,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push(Entry::new(key, value));
                }
            }
        }

        Ok(Format { entries })
    }

    /// Override default file reading to support BOM-aware decoding
    /// (UTF-8 with or without BOM, UTF-16 with BOM).
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// A logical line continues when it ends in an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits one logical line at the first unescaped `=`, `:`, or whitespace
/// and unescapes both sides. Returns `None` for lines with no content.
fn split_key_value(line: &str) -> Option<(String, String)> {
    if line.is_empty() {
        return None;
    }

    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == '=' || c == ':' || c == ' ' || c == '\t' {
            key_end = i;
            break;
        }
    }

    let key_raw = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t']);
    if let Some(first) = rest.chars().next() {
        if first == '=' || first == ':' {
            rest = rest[1..].trim_start_matches([' ', '\t']);
        }
    }

    Some((unescape(key_raw), unescape(rest)))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => break,
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let code = if hex.len() == 4 {
                    u32::from_str_radix(&hex, 16).ok()
                } else {
                    None
                };
                match code.and_then(char::from_u32) {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    // Malformed or surrogate escape, keep the raw text.
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<Entry> {
        Format::from_str(content).unwrap().entries
    }

    #[test]
    fn test_basic_pairs() {
        let entries = parse("greeting=Hello\nfarewell=Goodbye\n");
        assert_eq!(
            entries,
            vec![
                Entry::new("greeting", "Hello"),
                Entry::new("farewell", "Goodbye"),
            ]
        );
    }

    #[test]
    fn test_separator_variants() {
        let entries = parse("a=1\nb: 2\nc 3\nd   =   4\n");
        assert_eq!(
            entries,
            vec![
                Entry::new("a", "1"),
                Entry::new("b", "2"),
                Entry::new("c", "3"),
                Entry::new("d", "4"),
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let entries = parse("# comment\n! also a comment\n\n   # indented comment\nkey=value\n");
        assert_eq!(entries, vec![Entry::new("key", "value")]);
    }

    #[test]
    fn test_line_continuation() {
        let entries = parse("fruits=apple, \\\n    banana, \\\n    cherry\n");
        assert_eq!(entries, vec![Entry::new("fruits", "apple, banana, cherry")]);
    }

    #[test]
    fn test_escaped_backslash_does_not_continue() {
        let entries = parse("path=C:\\\\\nnext=1\n");
        assert_eq!(
            entries,
            vec![Entry::new("path", "C:\\"), Entry::new("next", "1")]
        );
    }

    #[test]
    fn test_escape_sequences() {
        let entries = parse("message=line1\\nline2\\tend\n");
        assert_eq!(entries, vec![Entry::new("message", "line1\nline2\tend")]);
    }

    #[test]
    fn test_unicode_escape() {
        let entries = parse("cafe=Caf\\u00e9\n");
        assert_eq!(entries, vec![Entry::new("cafe", "Café")]);
    }

    #[test]
    fn test_malformed_unicode_escape_kept_literally() {
        let entries = parse("bad=\\u00g9\n");
        assert_eq!(entries, vec![Entry::new("bad", "\\u00g9")]);
    }

    #[test]
    fn test_escaped_separator_in_key() {
        let entries = parse("a\\=b=c\nx\\ y=z\n");
        assert_eq!(
            entries,
            vec![Entry::new("a=b", "c"), Entry::new("x y", "z")]
        );
    }

    #[test]
    fn test_key_without_value() {
        let entries = parse("flag\nother=\n");
        assert_eq!(entries, vec![Entry::new("flag", ""), Entry::new("other", "")]);
    }

    #[test]
    fn test_duplicate_key_last_value_wins_first_position_kept() {
        let entries = parse("a=1\nb=2\na=3\n");
        assert_eq!(entries, vec![Entry::new("a", "3"), Entry::new("b", "2")]);
    }

    #[test]
    fn test_empty_file() {
        assert!(parse("").is_empty());
        assert!(parse("# only comments\n! here\n").is_empty());
    }

    #[test]
    fn test_read_with_encoding_latin1() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        // "café" in ISO-8859-1: the é is a single 0xE9 byte.
        file.write_all(b"drink=caf\xe9\n").unwrap();

        let (format, had_errors) =
            Format::read_with_encoding(file.path(), encoding_rs::WINDOWS_1252).unwrap();
        assert!(!had_errors);
        assert_eq!(format.entries, vec![Entry::new("drink", "café")]);

        // The same bytes are invalid UTF-8: decoded lossily, flagged.
        let (_, had_errors) =
            Format::read_with_encoding(file.path(), encoding_rs::UTF_8).unwrap();
        assert!(had_errors);
    }

    #[test]
    fn test_read_with_encoding_missing_file() {
        let result = Format::read_with_encoding("no/such/file.properties", encoding_rs::UTF_8);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
