//! Property tests for the string-literal escaper: whatever goes in must
//! come back out of the Rust literal grammar unchanged.

use propgen::escape::escape;
use proptest::prelude::*;

/// Decodes the escape subset the generator emits, the way rustc's literal
/// parser would.
fn decode_rust_literal(escaped: &str) -> String {
    let mut out = String::new();
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('u') => {
                assert_eq!(chars.next(), Some('{'), "expected delimited unicode escape");
                let mut hex = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    hex.push(c);
                }
                let code = u32::from_str_radix(&hex, 16).expect("hex digits");
                out.push(char::from_u32(code).expect("valid scalar value"));
            }
            other => panic!("unexpected escape sequence: \\{:?}", other),
        }
    }
    out
}

proptest! {
    #[test]
    fn escape_round_trips_any_string(s in any::<String>()) {
        prop_assert_eq!(decode_rust_literal(&escape(&s)), s);
    }

    #[test]
    fn escaped_output_never_contains_raw_quotes_or_controls(s in any::<String>()) {
        let escaped = escape(&s);
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            prop_assert!(c != '"', "unescaped quote in {:?}", escaped);
            prop_assert!((c as u32) >= 32, "raw control character in {:?}", escaped);
            if c == '\\' {
                // Skip whatever the escape introduces; a quote right after
                // a backslash is fine.
                chars.next();
            }
        }
    }

    #[test]
    fn plain_ascii_passes_through_unchanged(s in "[a-zA-Z0-9 .,;:!?'()_-]*") {
        prop_assert_eq!(escape(&s), s);
    }
}
