//! Ingredient name normalization.
//!
//! `normalize_ingredient_name` produces the key used for shopping list
//! deduplication, pantry matching and product mapping lookups. Every
//! component must go through it, otherwise aggregation and pricing
//! disagree on what counts as the same ingredient.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)?").expect("valid parenthetical regex"));

static ALTERNATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:and/or|or)\s+.*$").expect("valid alternative regex"));

/// Preparation and quality words dropped from the front of a name.
const LEADING_DESCRIPTORS: &[&str] = &[
    "extra virgin",
    "good quality",
    "free-range",
    "free range",
    "fresh",
    "freshly",
    "chopped",
    "diced",
    "minced",
    "sliced",
    "finely",
    "roughly",
    "thinly",
    "coarsely",
    "grated",
    "crushed",
    "shredded",
    "peeled",
    "trimmed",
    "halved",
    "softened",
    "melted",
    "large",
    "small",
    "medium",
    "ripe",
    "organic",
    "boneless",
    "skinless",
    "lean",
    "raw",
    "cooked",
];

/// Serving notes and preparation words dropped from the end of a name.
const TRAILING_DESCRIPTORS: &[&str] = &[
    "at room temperature",
    "to taste",
    "for serving",
    "for garnish",
    "to serve",
    "optional",
    "chopped",
    "diced",
    "minced",
    "sliced",
    "grated",
    "peeled",
    "drained",
    "rinsed",
    "softened",
    "melted",
];

/// Words that never count towards the reuse key.
const REUSE_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "of", "x", "g", "kg", "ml", "l", "cup", "cups", "tbsp", "tsp", "can", "cans",
    "tin", "tins",
];

/// Normalizes a recipe ingredient name into its deduplication key.
///
/// Lower-cases, drops parenthetical notes, anything after a comma, "or" /
/// "and/or" alternatives, leading and trailing descriptors, and collapses
/// whitespace. May return an empty string when nothing meaningful is left.
pub fn normalize_ingredient_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let without_notes = PARENTHETICAL.replace_all(&lower, " ");
    let before_comma = without_notes.split(',').next().unwrap_or_default();
    let without_alternatives = ALTERNATIVE.replace(before_comma, "");

    let mut name = collapse_whitespace(&without_alternatives);

    loop {
        let stripped = strip_descriptors(&name);
        if stripped == name {
            break;
        }
        name = stripped;
    }

    name
}

fn strip_descriptors(name: &str) -> String {
    let mut current = name;

    for descriptor in LEADING_DESCRIPTORS {
        if current == *descriptor {
            return String::new();
        }
        if let Some(rest) = current.strip_prefix(descriptor) {
            if rest.starts_with(' ') {
                current = rest.trim_start();
            }
        }
    }

    for descriptor in TRAILING_DESCRIPTORS {
        if current == *descriptor {
            return String::new();
        }
        if let Some(rest) = current.strip_suffix(descriptor) {
            if rest.ends_with(' ') {
                current = rest.trim_end();
            }
        }
    }

    current.trim_matches(|c: char| c == '-' || c == '*' || c.is_whitespace()).to_string()
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Key used to spot ingredients shared between recipes while scoring.
///
/// Built from the normalized name with counts and punctuation removed,
/// keeping the first two significant words.
pub fn reuse_key(raw: &str) -> Option<String> {
    let normalized = normalize_ingredient_name(raw);
    let letters_only: String = normalized
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();

    let words: Vec<&str> = letters_only
        .split_whitespace()
        .filter(|w| w.chars().count() > 1 && !REUSE_STOP_WORDS.contains(w))
        .take(2)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_ingredient_name("  Onion  "), "onion");
        assert_eq!(normalize_ingredient_name("TOMATO"), "tomato");
    }

    #[test]
    fn test_strips_alternatives() {
        assert_eq!(normalize_ingredient_name("Butter or margarine"), "butter");
        assert_eq!(normalize_ingredient_name("salt and/or pepper"), "salt");
    }

    #[test]
    fn test_strips_notes_and_comma_clauses() {
        assert_eq!(
            normalize_ingredient_name("Brown onion (about 2), finely chopped"),
            "brown onion"
        );
        assert_eq!(normalize_ingredient_name("garlic, crushed"), "garlic");
    }

    #[test]
    fn test_strips_leading_and_trailing_descriptors() {
        assert_eq!(
            normalize_ingredient_name("freshly chopped flat-leaf parsley"),
            "flat-leaf parsley"
        );
        assert_eq!(
            normalize_ingredient_name("large free-range eggs"),
            "eggs"
        );
        assert_eq!(normalize_ingredient_name("parmesan grated"), "parmesan");
        assert_eq!(
            normalize_ingredient_name("extra virgin olive oil"),
            "olive oil"
        );
    }

    #[test]
    fn test_keeps_meaningful_words() {
        assert_eq!(normalize_ingredient_name("ground beef"), "ground beef");
        assert_eq!(normalize_ingredient_name("frozen peas"), "frozen peas");
        assert_eq!(normalize_ingredient_name("hot sauce"), "hot sauce");
    }

    #[test]
    fn test_descriptor_only_names_become_empty() {
        assert_eq!(normalize_ingredient_name("(optional)"), "");
        assert_eq!(normalize_ingredient_name("fresh"), "");
        assert_eq!(normalize_ingredient_name("   "), "");
    }

    #[test]
    fn test_reuse_key_keeps_two_significant_words() {
        assert_eq!(
            reuse_key("2 x chicken thigh fillets, skin on"),
            Some("chicken thigh".to_string())
        );
        assert_eq!(reuse_key("Brown Onion"), Some("brown onion".to_string()));
        assert_eq!(reuse_key("can of tomatoes"), Some("tomatoes".to_string()));
        assert_eq!(reuse_key("1/2"), None);
    }
}
