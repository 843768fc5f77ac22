//! Resource file formats supported by propgen.

pub mod properties;

pub use properties::Format as PropertiesFormat;

/// File extension of the `.properties` resource format.
pub const PROPERTIES_EXTENSION: &str = "properties";
