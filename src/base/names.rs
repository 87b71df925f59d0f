//! Identifier and constant-name grammars.

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

static CONSTANT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// A binding identifier: `[A-Za-z0-9_]+`.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// A constant name: the identifier grammar plus `.` and `-`.
pub fn is_valid_constant_name(name: &str) -> bool {
    CONSTANT_NAME.is_match(name)
}

/// Identifiers are case-insensitive; the lowercased form is the key used
/// by the symbol tables.
pub fn intern_identifier(name: &str) -> SmolStr {
    SmolStr::new(name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_grammar() {
        assert!(is_valid_identifier("webApp_1"));
        assert!(!is_valid_identifier("web-app"));
        assert!(!is_valid_identifier("a.b"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_constant_name_grammar() {
        assert!(is_valid_constant_name("MY.CONSTANT-1"));
        assert!(!is_valid_constant_name("MY CONSTANT"));
        assert!(!is_valid_constant_name("${X}"));
    }

    #[test]
    fn test_interning_lowercases() {
        assert_eq!(intern_identifier("WebApp"), "webapp");
    }
}
