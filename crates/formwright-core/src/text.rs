//! Text derivation rules.
//!
//! These functions turn human-facing text (labels, button captions, option
//! names) into the tokens used as `name`, `id`, and option `value` attributes.
//! All of them are pure and deterministic, which is what keeps attribute
//! inference repeatable across renders.

use regex::Regex;
use std::sync::OnceLock;

fn non_alpha() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").unwrap())
}

fn non_alnum_keep_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap())
}

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]").unwrap())
}

fn non_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z_]").unwrap())
}

/// Derives a field name from a label.
///
/// Strips everything that is not an ASCII letter or whitespace, replaces
/// spaces with underscores, and lower-cases the result.
///
/// # Examples
///
/// ```
/// use formwright_core::text::name_from_label;
///
/// assert_eq!(name_from_label("Full Name:"), "full_name");
/// assert_eq!(name_from_label("E-mail"), "email");
/// ```
pub fn name_from_label(label: &str) -> String {
    non_alpha()
        .replace_all(label, "")
        .replace(' ', "_")
        .to_lowercase()
}

/// Derives the shared name of a choice group (radio or checkbox set) from its label.
///
/// Digits survive here, unlike [`name_from_label`], because choice groups are
/// frequently labelled with numbers ("Top 3 picks").
///
/// # Examples
///
/// ```
/// use formwright_core::text::group_name_from_label;
///
/// assert_eq!(group_name_from_label("Top 3 Colors?"), "top_3_colors");
/// ```
pub fn group_name_from_label(label: &str) -> String {
    non_alnum_keep_space()
        .replace_all(label, "")
        .replace(' ', "_")
        .to_lowercase()
}

/// Derives an element id from a field name.
///
/// Spaces become underscores; anything else that is not an ASCII letter or an
/// underscore is dropped, so list markers such as `[]` disappear.
///
/// # Examples
///
/// ```
/// use formwright_core::text::id_from_name;
///
/// assert_eq!(id_from_name("full_name"), "full_name");
/// assert_eq!(id_from_name("colors[]"), "colors");
/// assert_eq!(id_from_name("Address 2"), "address_");
/// ```
pub fn id_from_name(name: &str) -> String {
    non_id()
        .replace_all(&name.replace(' ', "_"), "")
        .to_lowercase()
}

/// Derives an option value from an option name by dropping every
/// non-alphanumeric character. Case is preserved.
///
/// # Examples
///
/// ```
/// use formwright_core::text::value_from_name;
///
/// assert_eq!(value_from_name("Yes!"), "Yes");
/// assert_eq!(value_from_name("Not sure"), "Notsure");
/// ```
pub fn value_from_name(name: &str) -> String {
    non_alnum().replace_all(name, "").into_owned()
}

/// Returns `true` if the string contains any whitespace.
pub fn contains_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Returns `true` if the first character is an ASCII digit.
pub fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Escapes a string for use inside a single-quoted script literal.
///
/// # Examples
///
/// ```
/// use formwright_core::text::escape_script_literal;
///
/// assert_eq!(escape_script_literal("it's"), r"it\'s");
/// ```
pub fn escape_script_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\'' => out.push_str(r"\'"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '<' => out.push_str(r"\x3c"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes the characters that are significant inside HTML attribute values and text.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── name_from_label ──────────────────────────────────────────────

    #[test]
    fn test_name_from_label_strips_punctuation() {
        assert_eq!(name_from_label("Full Name:"), "full_name");
    }

    #[test]
    fn test_name_from_label_drops_digits() {
        assert_eq!(name_from_label("Address 2"), "address_");
    }

    #[test]
    fn test_name_from_label_empty() {
        assert_eq!(name_from_label(""), "");
        assert_eq!(name_from_label("???"), "");
    }

    // ── group_name_from_label ────────────────────────────────────────

    #[test]
    fn test_group_name_keeps_digits() {
        assert_eq!(group_name_from_label("Pick 2:"), "pick_2");
    }

    // ── id_from_name ─────────────────────────────────────────────────

    #[test]
    fn test_id_from_name_is_stable_for_derived_names() {
        let name = name_from_label("Full Name:");
        assert_eq!(id_from_name(&name), name);
    }

    #[test]
    fn test_id_from_name_drops_list_marker() {
        assert_eq!(id_from_name("toppings[]"), "toppings");
    }

    #[test]
    fn test_id_from_name_lowercases() {
        assert_eq!(id_from_name("UserName"), "username");
    }

    // ── value_from_name ──────────────────────────────────────────────

    #[test]
    fn test_value_from_name() {
        assert_eq!(value_from_name("Yes!"), "Yes");
        assert_eq!(value_from_name("$100.00"), "10000");
    }

    // ── predicates ───────────────────────────────────────────────────

    #[test]
    fn test_contains_whitespace() {
        assert!(contains_whitespace("my form"));
        assert!(contains_whitespace("tab\there"));
        assert!(!contains_whitespace("my_form"));
    }

    #[test]
    fn test_starts_with_digit() {
        assert!(starts_with_digit("1form"));
        assert!(!starts_with_digit("form1"));
        assert!(!starts_with_digit(""));
    }

    // ── escaping ─────────────────────────────────────────────────────

    #[test]
    fn test_escape_script_literal() {
        assert_eq!(escape_script_literal(r"a\b"), r"a\\b");
        assert_eq!(escape_script_literal("</script>"), r"\x3c/script>");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }
}
