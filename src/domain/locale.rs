//! Supported content languages

use serde::{Deserialize, Serialize};

/// Language a news partition or assistant reply is produced in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Telugu];

    /// Resolves a user-supplied value, accepting both names and ISO codes.
    /// Anything unrecognized resolves to English.
    pub fn resolve(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "hi" | "hindi" => Language::Hindi,
            "te" | "telugu" => Language::Telugu,
            _ => Language::English,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Telugu => "telugu",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Telugu => "te",
        }
    }

    /// Capitalized English name
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Telugu => "Telugu",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_names_and_codes() {
        assert_eq!(Language::resolve("english"), Language::English);
        assert_eq!(Language::resolve("HI"), Language::Hindi);
        assert_eq!(Language::resolve(" telugu "), Language::Telugu);
        assert_eq!(Language::resolve("te"), Language::Telugu);
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(Language::resolve("klingon"), Language::English);
        assert_eq!(Language::resolve(""), Language::English);
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&Language::Telugu).unwrap(),
            "\"telugu\""
        );
    }
}
