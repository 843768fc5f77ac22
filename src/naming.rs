//! Naming: resource keys to constant identifiers, resource base names to
//! generated type names.

use std::collections::HashMap;

use crate::error::Error;

/// Converts a resource key into a SCREAMING_SNAKE constant identifier.
///
/// The key is uppercased; `.`, `-`, and space become `_`; every remaining
/// character outside `[A-Z0-9_]` is stripped; a leading digit gets an `_`
/// prefix. Keys that are blank, or that reduce to nothing but underscores,
/// are rejected with an error naming the original key.
///
/// No de-duplication happens here; the code assembler detects identifier
/// collisions across a whole generated type.
pub fn to_constant_name(key: &str) -> Result<String, Error> {
    if key.trim().is_empty() {
        return Err(Error::InvalidKey(key.to_string()));
    }

    let mut name: String = key
        .to_uppercase()
        .chars()
        .filter_map(|c| match c {
            '.' | '-' | ' ' => Some('_'),
            'A'..='Z' | '0'..='9' | '_' => Some(c),
            _ => None,
        })
        .collect();

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    if name.chars().all(|c| c == '_') {
        return Err(Error::InvalidKey(key.to_string()));
    }

    Ok(name)
}

/// Maps a resource base name to the name of the generated type.
pub trait ClassNameStrategy {
    /// Generates a type name from a resource file name or base name.
    ///
    /// Fails with [`Error::InvalidResourceName`] when `resource_name` is
    /// empty.
    fn class_name(&self, resource_name: &str) -> Result<String, Error>;
}

/// Default naming: strip a trailing `.properties`, capitalize the first
/// letter of each dot-separated segment, concatenate, append `Properties`.
///
/// `config.properties` → `ConfigProperties`, `my.config.properties` →
/// `MyConfigProperties`, `a` → `AProperties`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassNameStrategy;

impl ClassNameStrategy for DefaultClassNameStrategy {
    fn class_name(&self, resource_name: &str) -> Result<String, Error> {
        if resource_name.is_empty() {
            return Err(Error::InvalidResourceName(resource_name.to_string()));
        }

        let base_name = resource_name
            .strip_suffix(".properties")
            .unwrap_or(resource_name);

        let mut result = String::with_capacity(base_name.len() + "Properties".len());
        let mut capitalize_next = true;
        for c in base_name.chars() {
            if c == '.' {
                capitalize_next = true;
            } else if capitalize_next {
                result.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                result.push(c);
            }
        }

        result.push_str("Properties");
        Ok(result)
    }
}

/// Constructor for a registered naming strategy.
pub type StrategyConstructor = fn() -> Box<dyn ClassNameStrategy>;

/// Explicit registry resolving strategy identifiers to implementations.
///
/// Hosts register custom strategies under string identifiers at
/// configuration time; no runtime symbol loading is involved. An empty or
/// absent identifier resolves to [`DefaultClassNameStrategy`].
pub struct StrategyRegistry {
    strategies: HashMap<String, StrategyConstructor>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        StrategyRegistry {
            strategies: HashMap::new(),
        }
    }

    /// Registers a strategy constructor under an identifier, replacing any
    /// previous registration for the same identifier.
    pub fn register(&mut self, identifier: impl Into<String>, constructor: StrategyConstructor) {
        self.strategies.insert(identifier.into(), constructor);
    }

    /// Resolves an optional identifier to a strategy instance.
    ///
    /// `None` and `Some("")` yield the default strategy. An identifier
    /// without a registration fails fast with
    /// [`Error::StrategyResolution`].
    pub fn resolve(&self, identifier: Option<&str>) -> Result<Box<dyn ClassNameStrategy>, Error> {
        match identifier {
            None => Ok(Box::new(DefaultClassNameStrategy)),
            Some(id) if id.trim().is_empty() => Ok(Box::new(DefaultClassNameStrategy)),
            Some(id) => self
                .strategies
                .get(id)
                .map(|constructor| constructor())
                .ok_or_else(|| Error::StrategyResolution(id.to_string())),
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
