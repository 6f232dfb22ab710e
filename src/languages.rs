//! Static language code <-> display name table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// (code, display name) pairs. Display names match the page headings exactly.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("la", "Latin"),
];

static CODE_TO_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGES.iter().copied().collect());

static NAME_TO_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGES.iter().map(|&(code, name)| (name, code)).collect());

pub fn language_name(code: &str) -> Option<&'static str> {
    CODE_TO_NAME.get(code).copied()
}

pub fn language_code(name: &str) -> Option<&'static str> {
    NAME_TO_CODE.get(name).copied()
}

/// The target language of an extraction: its code and the heading it appears under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    /// Resolves the display name for `code`; unknown codes use the upper-cased code.
    pub fn from_code(code: &str) -> Self {
        let name = language_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_uppercase());
        Language {
            code: code.to_string(),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_bidirectional() {
        for &(code, name) in LANGUAGES {
            assert_eq!(language_name(code), Some(name));
            assert_eq!(language_code(name), Some(code));
        }
        assert_eq!(language_code("french"), None);
        assert_eq!(language_code("Klingon"), None);
    }

    #[test]
    fn test_unknown_code_falls_back_to_upper_case() {
        assert_eq!(Language::from_code("es").name, "Spanish");
        assert_eq!(Language::from_code("nl").name, "NL");
    }
}
