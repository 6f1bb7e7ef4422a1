//! Occasion to search query mapping
//!
//! Callers pick an occasion tag; each tag selects a canned free-text query.
//! Tags are matched exactly and anything unrecognized falls back to
//! [`DEFAULT_QUERY`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query used for unrecognized occasion tags
pub const DEFAULT_QUERY: &str = "best restaurant Florida";

/// A recognized occasion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    GuysNight,
    DateCouple,
    DateGroup,
    WorkLunch,
    Family,
}

impl Occasion {
    pub const ALL: [Occasion; 5] = [
        Occasion::GuysNight,
        Occasion::DateCouple,
        Occasion::DateGroup,
        Occasion::WorkLunch,
        Occasion::Family,
    ];

    /// Parse a tag; case-sensitive
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.tag() == tag)
    }

    /// The tag callers send
    pub fn tag(&self) -> &'static str {
        match self {
            Self::GuysNight => "GuysNight",
            Self::DateCouple => "DateCouple",
            Self::DateGroup => "DateGroup",
            Self::WorkLunch => "WorkLunch",
            Self::Family => "Family",
        }
    }

    /// The search text for this occasion
    pub fn query(&self) -> &'static str {
        match self {
            Self::GuysNight => "late night restaurant bar Florida",
            Self::DateCouple => "romantic fine dining Florida",
            Self::DateGroup => "share plates upscale Florida",
            Self::WorkLunch => "healthy bowl salad Florida",
            Self::Family => "family friendly restaurant Florida",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Free-text search resolved from an occasion tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Recognized occasion, if any
    pub occasion: Option<Occasion>,
    /// Text sent to every provider
    pub text: String,
}

impl SearchQuery {
    /// Resolve a raw occasion tag
    pub fn for_occasion(tag: &str) -> Self {
        let occasion = Occasion::from_tag(tag);
        let text = occasion
            .map(|o| o.query())
            .unwrap_or(DEFAULT_QUERY)
            .to_string();
        Self { occasion, text }
    }

    /// A query with explicit text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            occasion: None,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_occasions() {
        let cases = [
            ("GuysNight", "late night restaurant bar Florida"),
            ("DateCouple", "romantic fine dining Florida"),
            ("DateGroup", "share plates upscale Florida"),
            ("WorkLunch", "healthy bowl salad Florida"),
            ("Family", "family friendly restaurant Florida"),
        ];

        for (tag, expected) in cases {
            let query = SearchQuery::for_occasion(tag);
            assert_eq!(query.text, expected, "occasion {tag}");
            assert_eq!(query.occasion.map(|o| o.tag()), Some(tag));
        }
    }

    #[test]
    fn test_fallback() {
        for tag in ["Brunch", "", "worklunch", " WorkLunch"] {
            let query = SearchQuery::for_occasion(tag);
            assert_eq!(query.text, DEFAULT_QUERY);
            assert!(query.occasion.is_none());
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for occasion in Occasion::ALL {
            assert_eq!(Occasion::from_tag(occasion.tag()), Some(occasion));
            assert_eq!(occasion.to_string(), occasion.tag());
        }
    }
}
