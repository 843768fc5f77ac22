//! Traits for parsing resource files in propgen.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing a resource file format into its in-memory shape.
///
/// # Example
///
/// ```rust,no_run
/// use propgen::traits::Parser;
/// let format = propgen::formats::properties::Format::read_from("messages_en.properties")?;
/// for entry in &format.entries {
///     println!("{} = {}", entry.key, entry.value);
/// }
/// Ok::<(), propgen::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
