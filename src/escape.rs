//! Escaping of raw resource values into Rust string-literal text.

/// Escapes a raw value so it can be placed verbatim between double quotes
/// in generated Rust source.
///
/// `"`, `\`, newline, carriage return, and tab use their short escapes.
/// Every other character below U+0020 or above U+007F becomes a `\u{xxxx}`
/// escape with lowercase hex, zero-padded to four digits. Printable ASCII
/// passes through unchanged, so typical resource values are untouched.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() * 2);
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => {
                let code = ch as u32;
                if code < 32 || code > 127 {
                    escaped.push_str(&format!("\\u{{{:04x}}}", code));
                } else {
                    escaped.push(ch);
                }
            }
        }
    }
    escaped
}
