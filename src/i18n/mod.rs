//! i18n - Language Codes
//!
//! The languages the blog is published in, and how raw strings coming from
//! storage or user input map onto them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English, the default language
    #[default]
    En,
    /// French
    Fr,
}

impl Lang {
    /// Normalize a persisted value.
    ///
    /// Only a case-insensitive `fr` selects French. Anything else, including a
    /// missing entry, falls back to English. Whitespace is significant.
    pub fn from_persisted(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("fr") => Lang::Fr,
            _ => Lang::En,
        }
    }

    /// Language code as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Fr => "Français",
        }
    }

    /// Switch between English and French
    pub fn toggle(&self) -> Self {
        match self {
            Lang::En => Lang::Fr,
            Lang::Fr => Lang::En,
        }
    }

    /// All supported languages
    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::Fr]
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parsing for explicit input such as CLI arguments.
impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Lang::all()
            .iter()
            .copied()
            .find(|lang| s.eq_ignore_ascii_case(lang.as_str()))
            .ok_or_else(|| Error::Invalid {
                message: format!("unsupported language `{s}`, expected `en` or `fr`"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_persisted_selects_french_case_insensitively() {
        for raw in ["fr", "FR", "Fr", "fR"] {
            assert_eq!(Lang::from_persisted(Some(raw)), Lang::Fr, "{raw}");
        }
    }

    #[test]
    fn test_from_persisted_defaults_to_english() {
        assert_eq!(Lang::from_persisted(None), Lang::En);
        for raw in ["", "en", "EN", "French", " fr", "fr ", "fra", "de"] {
            assert_eq!(Lang::from_persisted(Some(raw)), Lang::En, "{raw:?}");
        }
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("fr".parse::<Lang>().ok(), Some(Lang::Fr));
        assert_eq!("EN".parse::<Lang>().ok(), Some(Lang::En));
        assert!("french".parse::<Lang>().is_err());
        assert!("".parse::<Lang>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Lang::Fr).ok().as_deref(), Some("\"fr\""));
        let parsed: Lang = serde_json::from_str("\"en\"").unwrap_or(Lang::Fr);
        assert_eq!(parsed, Lang::En);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Lang::En.toggle(), Lang::Fr);
        assert_eq!(Lang::Fr.toggle(), Lang::En);
    }
}
