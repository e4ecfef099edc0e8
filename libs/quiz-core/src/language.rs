//! BCP-47 language tags such as `en-US` or `zh-Hant-TW`.
//!
//! Tags must be well-formed per RFC 5646 and made of subtags registered with
//! IANA. `_` is read as a subtag separator, so `en_US` parses as `en-US`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A valid language tag in canonical casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidLanguageTag(tag.to_string());

        let parsed = language_tags::LanguageTag::parse(&tag.replace('_', "-"))
            .map_err(|_| invalid())?;
        if !parsed.is_valid() {
            return Err(invalid());
        }

        Ok(Self(canonical_case(parsed.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// RFC 5646 casing: regions uppercase, scripts titlecase, everything else
/// lowercase. Subtags after a singleton keep lowercase.
fn canonical_case(tag: &str) -> String {
    let mut after_singleton = false;
    let subtags: Vec<String> = tag
        .split('-')
        .enumerate()
        .map(|(i, subtag)| {
            let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let cased = match subtag.len() {
                _ if i == 0 || after_singleton => subtag.to_ascii_lowercase(),
                2 if alphabetic => subtag.to_ascii_uppercase(),
                4 if alphabetic => titlecase(subtag),
                _ => subtag.to_ascii_lowercase(),
            };
            if subtag.len() == 1 {
                after_singleton = true;
            }
            cased
        })
        .collect();
    subtags.join("-")
}

fn titlecase(subtag: &str) -> String {
    let lower = subtag.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => lower,
    }
}

impl FromStr for LanguageTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
