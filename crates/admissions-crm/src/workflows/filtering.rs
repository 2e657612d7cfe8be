//! Primitives shared by every list surface: free-text search plus "all"-able selectors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a list selector. `"all"` (any case) or a blank string disables the restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    /// Exact, case-sensitive comparison against a record's key.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(value) => value,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        value.as_key().to_string()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Case-insensitive substring match, OR-ed across `fields`. An empty needle matches everything.
pub fn matches_text(needle: &str, fields: &[&str]) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_blank_disable_the_selector() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("ALL"), Selection::All);
        assert_eq!(Selection::parse("  "), Selection::All);
        assert!(Selection::All.admits("anything"));
    }

    #[test]
    fn specific_selection_is_exact() {
        let selection = Selection::parse("Engineering");
        assert!(selection.admits("Engineering"));
        assert!(!selection.admits("engineering"));
        assert!(!selection.admits("Engineering Physics"));
    }

    #[test]
    fn text_matching_ignores_case_and_spans_fields() {
        let fields = ["Sarah Johnson", "sarah@example.com", "Computer Science"];
        assert!(matches_text("sarah", &fields));
        assert!(matches_text("SARAH", &fields));
        assert!(matches_text("science", &fields));
        assert!(matches_text("", &fields));
        assert!(!matches_text("medicine", &fields));
    }

    #[test]
    fn selection_round_trips_through_serde_as_a_plain_string() {
        let parsed: Selection = serde_json::from_str("\"admitted\"").expect("selection parses");
        assert_eq!(parsed, Selection::Only("admitted".to_string()));
        let rendered = serde_json::to_string(&Selection::All).expect("selection renders");
        assert_eq!(rendered, "\"all\"");
    }
}
