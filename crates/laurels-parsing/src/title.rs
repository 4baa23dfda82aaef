use crate::segment::{QUOTE_CLOSE, QUOTE_OPEN};

/// Pull the quoted title out of `title_part`.
///
/// The text between the first `«` and the first `»` is the title. Non-blank
/// text before the opening quote and after the closing quote is appended,
/// comma-separated and in that order, to `details_seed`.
///
/// Returns `(title, details, from_quotes)`. Without a `«…»` pair the title is
/// empty, `details_seed` is returned unchanged and `from_quotes` is `false`.
pub fn split_title(title_part: &str, details_seed: &str) -> (String, String, bool) {
    let (Some(open), Some(close)) = (title_part.find(QUOTE_OPEN), title_part.find(QUOTE_CLOSE))
    else {
        return (String::new(), details_seed.to_string(), false);
    };
    if close < open {
        return (String::new(), details_seed.to_string(), false);
    }

    let before = title_part[..open].trim();
    let title = &title_part[open + QUOTE_OPEN.len_utf8()..close];
    let after = title_part[close + QUOTE_CLOSE.len_utf8()..].trim();

    let details = [details_seed, before, after]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    (title.to_string(), details, true)
}
