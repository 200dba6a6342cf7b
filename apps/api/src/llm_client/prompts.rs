// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Closing instruction for prompts whose reply must be a bare JSON array.
pub const JSON_ARRAY_ONLY: &str = "Respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Returns at most `max_chars` leading characters of `text`, on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Replaces each `{name}` in `template` with its value from `values` in a
/// single left-to-right pass. Substituted text is never rescanned, so user
/// input that happens to contain a placeholder stays literal. Braces that do
/// not name a known placeholder are copied through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_every_occurrence() {
        let filled = fill_template("{a} and {b}, then {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(filled, "x and y, then x");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "JD: {jd_text}\nResume: {resume_text}",
            &[("jd_text", "see {resume_text}"), ("resume_text", "{jd_text} here")],
        );
        assert_eq!(filled, "JD: see {resume_text}\nResume: {jd_text} here");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let filled = fill_template(r#"{"skills": [{x}]} {unclosed"#, &[("x", "1")]);
        assert_eq!(filled, r#"{"skills": [1]} {unclosed"#);
    }

    #[test]
    fn test_excerpt_shorter_text_is_unchanged() {
        assert_eq!(excerpt("rust", 10), "rust");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("naïve café", 4), "naïv");
        assert_eq!(excerpt("abcdef", 3), "abc");
    }
}
