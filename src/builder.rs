//! Assembly and rendering of generated Rust source files.
//!
//! [`CodeFileBuilder`] accumulates typed member declarations and fails fast
//! on identifier collisions; [`CodeFile`] is the immutable result, rendered
//! to text in a single pass.

use std::collections::HashMap;

use indoc::indoc;

use crate::{
    error::Error,
    escape::escape,
    naming::to_constant_name,
    provenance::Provenance,
};

/// One member of a generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// A single value under one identifier.
    Constant {
        key: String,
        name: String,
        value: String,
    },
    /// One identifier bound to a locale → value mapping.
    Localized {
        key: String,
        name: String,
        translations: Vec<(String, String)>,
    },
}

impl Member {
    fn name(&self) -> &str {
        match self {
            Member::Constant { name, .. } => name,
            Member::Localized { name, .. } => name,
        }
    }
}

/// Accumulates members for one generated type.
pub struct CodeFileBuilder {
    type_name: String,
    namespace: String,
    provenance: Provenance,
    members: Vec<Member>,
    /// Constant identifier → the key that claimed it first.
    claimed: HashMap<String, String>,
}

impl CodeFileBuilder {
    pub fn new(
        type_name: impl Into<String>,
        namespace: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        CodeFileBuilder {
            type_name: type_name.into(),
            namespace: namespace.into(),
            provenance,
            members: Vec::new(),
            claimed: HashMap::new(),
        }
    }

    /// Adds a plain constant for `key`.
    pub fn constant(mut self, key: &str, value: &str) -> Result<Self, Error> {
        let name = self.claim(key)?;
        self.members.push(Member::Constant {
            key: key.to_string(),
            name,
            value: value.to_string(),
        });
        Ok(self)
    }

    /// Adds a localized map constant for `key`, one entry per locale in
    /// the given order.
    pub fn localized<I>(mut self, key: &str, translations: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let name = self.claim(key)?;
        self.members.push(Member::Localized {
            key: key.to_string(),
            name,
            translations: translations.into_iter().collect(),
        });
        Ok(self)
    }

    /// Converts the key and enforces identifier uniqueness across the
    /// whole type.
    fn claim(&mut self, key: &str) -> Result<String, Error> {
        let name = to_constant_name(key)?;
        if let Some(first_key) = self.claimed.get(&name) {
            return Err(Error::DuplicateConstant {
                identifier: name,
                first_key: first_key.clone(),
                second_key: key.to_string(),
            });
        }
        self.claimed.insert(name.clone(), key.to_string());
        Ok(name)
    }

    pub fn build(self) -> CodeFile {
        CodeFile {
            type_name: self.type_name,
            namespace: self.namespace,
            provenance: self.provenance,
            members: self.members,
        }
    }
}

/// A complete generated type, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFile {
    type_name: String,
    namespace: String,
    provenance: Provenance,
    members: Vec<Member>,
}

impl CodeFile {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Renders the complete source text: provenance header, imports (only
    /// when a localized member needs them), type declaration with a
    /// private field, and one `impl` block with all members in insertion
    /// order. An empty member list still renders a compilable file.
    pub fn render(&self) -> String {
        let mut out = format!(
            indoc! {"
                //! Generated by propgen. Do not edit; this file is overwritten on regeneration.
                //!
                //! Source: {}
                //! Namespace: {}
                //! Generator version: {}
                //! Generated: {}
                //! Environment: {}

            "},
            self.provenance.source,
            self.namespace,
            self.provenance.generator_version,
            self.provenance.timestamp,
            self.provenance.runtime,
        );

        let has_localized = self
            .members
            .iter()
            .any(|m| matches!(m, Member::Localized { .. }));
        if has_localized {
            out.push_str("use std::collections::HashMap;\n");
            out.push_str("use std::sync::LazyLock;\n\n");
        }

        out.push_str(&format!(
            indoc! {"
                /// String constants generated from `{}`.
                pub struct {} {{
                    _private: (),
                }}
            "},
            self.provenance.source, self.type_name,
        ));

        if !self.members.is_empty() {
            out.push_str(&format!("\nimpl {} {{\n", self.type_name));
            for (i, member) in self.members.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_member(&mut out, member);
            }
            out.push_str("}\n");
        }

        out
    }
}

fn render_member(out: &mut String, member: &Member) {
    match member {
        Member::Constant { key, name, value } => {
            out.push_str(&format!("    /// `{}`\n", escape(key)));
            out.push_str(&format!(
                "    pub const {}: &'static str = \"{}\";\n",
                name,
                escape(value)
            ));
        }
        Member::Localized {
            key,
            name,
            translations,
        } => {
            out.push_str(&format!(
                "    /// Localized values for `{}`, keyed by locale code.\n",
                escape(key)
            ));
            out.push_str(&format!(
                "    pub fn {}() -> &'static HashMap<&'static str, &'static str> {{\n",
                accessor_name(name)
            ));
            out.push_str(&format!(
                "        static {}: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {{\n",
                name
            ));
            out.push_str("            HashMap::from([\n");
            for (locale, value) in translations {
                out.push_str(&format!(
                    "                (\"{}\", \"{}\"),\n",
                    escape(locale),
                    escape(value)
                ));
            }
            out.push_str("            ])\n");
            out.push_str("        });\n");
            out.push_str(&format!("        &{}\n", name));
            out.push_str("    }\n");
        }
    }
}

/// Rust keywords that need escaping when a constant identifier is
/// lowercased into an accessor function name.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RAW_FORBIDDEN: &[&str] = &["crate", "self", "super"];

fn accessor_name(constant_name: &str) -> String {
    let lower = constant_name.to_ascii_lowercase();
    if RAW_FORBIDDEN.contains(&lower.as_str()) {
        format!("{}_", lower)
    } else if KEYWORDS.contains(&lower.as_str()) {
        format!("r#{}", lower)
    } else {
        lower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::{Clock, FixedClock};

    fn provenance(source: &str) -> Provenance {
        let clock = FixedClock("2024-01-01T00:00:00Z".to_string());
        Provenance {
            source: source.to_string(),
            generator_version: "0.2.0".to_string(),
            timestamp: clock.timestamp(),
            runtime: "rust (x86_64/linux)".to_string(),
        }
    }

    #[test]
    fn test_render_plain_constants() {
        let file = CodeFileBuilder::new("ConfigProperties", "com.example", provenance("config.properties"))
            .constant("app.title", "My App")
            .unwrap()
            .constant("app.version", "1.0")
            .unwrap()
            .build();

        let code = file.render();
        assert!(code.starts_with("//! Generated by propgen."));
        assert!(code.contains("//! Source: config.properties\n"));
        assert!(code.contains("//! Namespace: com.example\n"));
        assert!(code.contains("//! Generator version: 0.2.0\n"));
        assert!(code.contains("//! Generated: 2024-01-01T00:00:00Z\n"));
        assert!(code.contains("pub struct ConfigProperties {\n    _private: (),\n}"));
        assert!(code.contains("    /// `app.title`\n    pub const APP_TITLE: &'static str = \"My App\";\n"));
        assert!(code.contains("pub const APP_VERSION: &'static str = \"1.0\";"));
        // Plain constants need no map support.
        assert!(!code.contains("use std::collections::HashMap;"));
        assert!(!code.contains("LazyLock"));
    }

    #[test]
    fn test_render_localized_member() {
        let file = CodeFileBuilder::new("InvoiceProperties", "com.example", provenance("invoice_*.properties"))
            .localized(
                "total",
                vec![
                    ("de".to_string(), "Summe".to_string()),
                    ("en".to_string(), "Total".to_string()),
                ],
            )
            .unwrap()
            .build();

        let code = file.render();
        assert!(code.contains("use std::collections::HashMap;\nuse std::sync::LazyLock;\n"));
        assert!(code.contains("pub fn total() -> &'static HashMap<&'static str, &'static str> {"));
        assert!(code.contains("static TOTAL: LazyLock<HashMap<&'static str, &'static str>>"));
        assert!(code.contains("(\"de\", \"Summe\"),\n                (\"en\", \"Total\"),"));
        assert!(code.contains("&TOTAL\n"));
    }

    #[test]
    fn test_member_order_follows_insertion_order() {
        let file = CodeFileBuilder::new("T", "ns", provenance("t_*.properties"))
            .localized("zebra", vec![("en".to_string(), "z".to_string())])
            .unwrap()
            .localized("apple", vec![("en".to_string(), "a".to_string())])
            .unwrap()
            .build();

        let code = file.render();
        let zebra = code.find("fn zebra").unwrap();
        let apple = code.find("fn apple").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn test_escapes_values_in_output() {
        let file = CodeFileBuilder::new("T", "ns", provenance("t.properties"))
            .constant("quote", "say \"hi\"\nplease")
            .unwrap()
            .build();

        let code = file.render();
        assert!(code.contains(r#"pub const QUOTE: &'static str = "say \"hi\"\nplease";"#));
    }

    #[test]
    fn test_duplicate_identifier_fails_fast() {
        let result = CodeFileBuilder::new("T", "ns", provenance("t.properties"))
            .constant("a.b", "1")
            .unwrap()
            .constant("a!b", "2");

        match result {
            Err(Error::DuplicateConstant {
                identifier,
                first_key,
                second_key,
            }) => {
                assert_eq!(identifier, "AB");
                assert_eq!(first_key, "a.b");
                assert_eq!(second_key, "a!b");
            }
            other => panic!("expected DuplicateConstant, got {:?}", other.map(|f| f.build())),
        }
    }

    #[test]
    fn test_invalid_key_propagates() {
        let result = CodeFileBuilder::new("T", "ns", provenance("t.properties")).constant("!!!", "x");
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_empty_member_list_still_renders_complete_type() {
        let file = CodeFileBuilder::new("EmptyProperties", "ns", provenance("empty.properties")).build();
        let code = file.render();
        assert!(code.contains("pub struct EmptyProperties {\n    _private: (),\n}"));
        assert!(!code.contains("impl "));
        assert!(!code.contains("use std::"));
    }

    #[test]
    fn test_accessor_name_escapes_keywords() {
        assert_eq!(accessor_name("TOTAL"), "total");
        assert_eq!(accessor_name("TYPE"), "r#type");
        assert_eq!(accessor_name("MATCH"), "r#match");
        assert_eq!(accessor_name("SELF"), "self_");
        assert_eq!(accessor_name("_2FA"), "_2fa");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let build = || {
            CodeFileBuilder::new("T", "ns", provenance("t_*.properties"))
                .localized("total", vec![("en".to_string(), "Total".to_string())])
                .unwrap()
                .build()
                .render()
        };
        assert_eq!(build(), build());
    }
}
