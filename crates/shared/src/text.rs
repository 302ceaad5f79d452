//! Small text helpers shared by the keyword tables across the workspace.

/// Returns true when `term` appears in `haystack` as a whole word or phrase.
///
/// A trailing plural `s` or `es` on the haystack side still counts as a match,
/// so `"onion"` matches `"red onions"` but `"egg"` does not match `"eggplant"`.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    let step = term.chars().next().map_or(1, char::len_utf8);
    let mut start = 0;

    while let Some(pos) = haystack[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();

        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());

        let after = &haystack[end..];
        let after_ok = is_word_end(after)
            || after.strip_prefix("es").is_some_and(is_word_end)
            || after.strip_prefix('s').is_some_and(is_word_end);

        if before_ok && after_ok {
            return true;
        }

        start = begin + step;
    }

    false
}

fn is_word_end(rest: &str) -> bool {
    rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
