//! Slug generation and casing helpers.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

fn hyphen_runs() -> &'static Regex {
    HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Convert a string to a URL-safe, param-cased slug.
///
/// Rules:
/// - Lowercase
/// - Whitespace and underscores become hyphens
/// - Everything that is neither alphabetic nor an ASCII digit is dropped
/// - Runs of hyphens collapse to one; leading/trailing hyphens are trimmed
///
/// # Examples
///
/// ```
/// use docsmith_core::slugify;
///
/// assert_eq!(slugify("Welcome to Redwood"), "welcome-to-redwood");
/// assert_eq!(slugify("Cells & Side Quests"), "cells-side-quests");
/// assert_eq!(slugify("`<Set>` wrappers"), "set-wrappers");
/// ```
pub fn slugify(input: &str) -> String {
    let collected: String = input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' || c == '-' {
                Some("-")
            } else if c.is_ascii_alphanumeric() || c.is_alphabetic() {
                Some(g)
            } else {
                None
            }
        })
        .collect();

    hyphen_runs()
        .replace_all(&collected, "-")
        .trim_matches('-')
        .to_string()
}

/// Uppercase the first letter of each whitespace-separated word.
///
/// Used for page titles ("tutorial" becomes "Tutorial").
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Getting Dynamic"), "getting-dynamic");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Routing & Params"), "routing-params");
        assert_eq!(slugify("What's next?"), "whats-next");
        assert_eq!(slugify("A `createPost` mutation"), "a-createpost-mutation");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(slugify("Café"), "café");
        assert_eq!(slugify("naïve approach"), "naïve-approach");
    }

    #[test]
    fn test_hyphen_collapse_and_trim() {
        assert_eq!(slugify("  Hello    World  "), "hello-world");
        assert_eq!(slugify("--edge--case--"), "edge-case");
        assert_eq!(slugify("under_scored_name"), "under-scored-name");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tutorial"), "Tutorial");
        assert_eq!(title_case("getting started"), "Getting Started");
        assert_eq!(title_case(""), "");
    }
}
