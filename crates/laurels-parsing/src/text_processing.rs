use once_cell::sync::Lazy;
use regex::Regex;

static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trim pass applied to parts, titles and details.
///
/// Non-breaking spaces become plain spaces, then every leading and trailing
/// `.`, `,` and whitespace character is removed. Stripping punctuation and
/// whitespace in one pass keeps the function idempotent: `" .a"` and `"a"`
/// both clean to `"a"`.
pub fn clean(s: &str) -> String {
    s.replace('\u{a0}', " ")
        .trim_matches(|c: char| c == '.' || c == ',' || c.is_whitespace())
        .to_string()
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_whitespace(s: &str) -> String {
    WS_RE.replace_all(s.trim(), " ").into_owned()
}

/// Canonical form of an author name: whitespace normalized and `ё` folded
/// to `е`, so that "Алёшковский" and "Алешковский" compare equal.
pub fn normalize_name(s: &str) -> String {
    normalize_whitespace(s).replace('ё', "е")
}
