use std::fmt;
use std::str::FromStr;

use crate::error::{TypeError, TypeResult};

/// A two-letter locale identifier such as `en` or `de`.
///
/// Matching is case-insensitive, so the identifier is stored lowercased:
/// `"DE"`, `"De"` and `"de"` all parse to the same value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleId(String);

impl LocaleId {
    /// Parse a locale identifier. Exactly two ASCII letters are accepted.
    ///
    /// ```
    /// use catsync_types::LocaleId;
    ///
    /// assert_eq!(LocaleId::parse("EN").unwrap().as_str(), "en");
    /// assert!(LocaleId::parse("eng").is_err());
    /// assert!(LocaleId::parse("e1").is_err());
    /// ```
    pub fn parse(input: &str) -> TypeResult<Self> {
        let count = input.chars().count();
        if count != 2 {
            return Err(TypeError::InvalidLocale {
                input: input.to_string(),
                reason: format!("expected exactly two letters, got {count} characters"),
            });
        }
        if let Some(ch) = input.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(TypeError::InvalidLocale {
                input: input.to_string(),
                reason: format!("non-letter character {ch:?}"),
            });
        }
        Ok(Self(input.to_ascii_lowercase()))
    }

    /// The lowercased two-letter form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw file-name segment.
    pub fn matches(&self, segment: &str) -> bool {
        self.0.eq_ignore_ascii_case(segment)
    }
}

impl FromStr for LocaleId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_two_letters_any_case() {
        assert_eq!(LocaleId::parse("ab").unwrap().as_str(), "ab");
        assert_eq!(LocaleId::parse("XY").unwrap().as_str(), "xy");
        assert_eq!(LocaleId::parse("Fr").unwrap(), LocaleId::parse("fR").unwrap());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(LocaleId::parse("").is_err());
        assert!(LocaleId::parse("a").is_err());
        assert!(LocaleId::parse("abc").is_err());
    }

    #[test]
    fn rejects_non_letters() {
        assert!(LocaleId::parse("a1").is_err());
        assert!(LocaleId::parse("_a").is_err());
        assert!(LocaleId::parse("é1").is_err());
        assert!(LocaleId::parse("éa").is_err());
    }

    #[test]
    fn error_names_the_input() {
        let err = LocaleId::parse("abc").unwrap_err();
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn matches_segment_case_insensitively() {
        let locale = LocaleId::parse("de").unwrap();
        assert!(locale.matches("DE"));
        assert!(locale.matches("de"));
        assert!(!locale.matches("da"));
    }

    #[test]
    fn from_str_and_display() {
        let locale: LocaleId = "PT".parse().unwrap();
        assert_eq!(locale.to_string(), "pt");
    }
}
