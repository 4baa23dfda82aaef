use laurels_core::Dialect;

use crate::text_processing::clean;

pub const EM_DASH: char = '\u{2014}';
pub const QUOTE_OPEN: char = '\u{ab}';
pub const QUOTE_CLOSE: char = '\u{bb}';

/// Split a citation into its ordered parts using the rules of `dialect`.
pub fn segment(text: &str, dialect: Dialect) -> Vec<String> {
    match dialect {
        Dialect::Dash => segment_dash(text),
        Dialect::Guillemet => segment_guillemet(text),
    }
}

/// Split on em-dashes.
///
/// Every em-dash ends a part, including empty ones, so `"A — — B"` has three
/// parts. The text after the last em-dash is kept only if it is not blank.
/// Parts are returned untrimmed; cleaning is the classifier's job.
pub fn segment_dash(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut buffer = String::new();

    for c in text.chars() {
        if c == EM_DASH {
            parts.push(std::mem::take(&mut buffer));
        } else {
            buffer.push(c);
        }
    }

    if !buffer.trim().is_empty() {
        parts.push(buffer);
    }
    parts
}

/// Split on commas and em-dashes that sit outside a quoted title and outside
/// parentheses. A quoted title (`«…»`, guillemets included) always becomes a
/// part of its own.
///
/// Parenthesis tracking is a single flag, not a depth counter: in `(a (b) c)`
/// the first `)` closes the group and a comma after it splits again.
///
/// Returned parts are cleaned; parts that clean to nothing are dropped.
pub fn segment_guillemet(text: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut bracket_open = false;
    let mut quote_open = false;

    for c in text.chars() {
        match c {
            ',' | EM_DASH => {
                if quote_open || bracket_open {
                    buffer.push(c);
                } else {
                    parts.push(std::mem::take(&mut buffer));
                }
            }
            QUOTE_OPEN if !bracket_open => {
                if !buffer.trim().is_empty() {
                    parts.push(std::mem::take(&mut buffer));
                }
                buffer.clear();
                buffer.push(c);
                quote_open = true;
            }
            QUOTE_CLOSE => {
                buffer.push(c);
                if !bracket_open && quote_open {
                    quote_open = false;
                    parts.push(std::mem::take(&mut buffer));
                }
            }
            '(' => {
                buffer.push(c);
                if !quote_open {
                    bracket_open = true;
                }
            }
            ')' => {
                buffer.push(c);
                bracket_open = false;
            }
            _ => buffer.push(c),
        }
    }

    if !buffer.trim().is_empty() {
        parts.push(buffer);
    }

    parts
        .iter()
        .map(|p| clean(p))
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_three_parts() {
        let parts = segment_dash("Рукопись — Иванов — «Название»");
        assert_eq!(parts, vec!["Рукопись ", " Иванов ", " «Название»"]);
    }

    #[test]
    fn test_dash_ignores_commas_and_brackets() {
        let parts = segment_dash("Иванов (ред., сост.), Петров — «Книга, том 1» — АСТ, 2010");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].trim(), "Иванов (ред., сост.), Петров");
        assert_eq!(parts[1].trim(), "«Книга, том 1»");
        assert_eq!(parts[2].trim(), "АСТ, 2010");
    }

    #[test]
    fn test_dash_splits_inside_brackets() {
        let parts = segment_dash("Автор (наст. имя — Иванов) — «Книга»");
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn test_dash_blank_tail_dropped_inner_empty_kept() {
        assert_eq!(segment_dash("A — «B» — ").len(), 2);
        assert_eq!(segment_dash("A — — B").len(), 3);
        assert_eq!(segment_dash("  "), Vec::<String>::new());
        assert_eq!(segment_dash("Иванов «Книга»"), vec!["Иванов «Книга»"]);
    }

    #[test]
    fn test_guillemet_basic() {
        let parts = segment_guillemet("Виктор Пелевин, «iPhuck 10», роман (отрывок)");
        assert_eq!(parts, vec!["Виктор Пелевин", "«iPhuck 10»", "роман (отрывок)"]);
    }

    #[test]
    fn test_guillemet_comma_inside_brackets() {
        let parts = segment_guillemet("A (x, y), B");
        assert_eq!(parts, vec!["A (x, y)", "B"]);
    }

    #[test]
    fn test_guillemet_delimiters_inside_title() {
        let parts = segment_guillemet("Иванов, «Жизнь — это сон, и только», АСТ");
        assert_eq!(parts, vec!["Иванов", "«Жизнь — это сон, и только»", "АСТ"]);
    }

    #[test]
    fn test_guillemet_title_without_separator() {
        let parts = segment_guillemet("Иванов «Книга» (Москва)");
        assert_eq!(parts, vec!["Иванов", "«Книга»", "(Москва)"]);
    }

    #[test]
    fn test_guillemet_quote_inside_brackets_is_literal() {
        let parts = segment_guillemet("Иванов (автор «Книги»), «Повесть»");
        assert_eq!(parts, vec!["Иванов (автор «Книги»)", "«Повесть»"]);
    }

    #[test]
    fn test_guillemet_bracket_inside_quote_does_not_open() {
        // The `(` inside the title never opened a group, so the stray `)`
        // after the title stands alone.
        let parts = segment_guillemet("«Повесть (черновик»), далее");
        assert_eq!(parts, vec!["«Повесть (черновик»", ")", "далее"]);
    }

    #[test]
    fn test_guillemet_nested_brackets_close_early() {
        // Single-level tracking: the inner `)` closes the group.
        let parts = segment_guillemet("Автор (a (b), c), «T»");
        assert_eq!(parts, vec!["Автор (a (b)", "c)", "«T»"]);
    }

    #[test]
    fn test_guillemet_empty_parts_dropped() {
        let parts = segment_guillemet(",, Иванов ,. , «Книга»,,");
        assert_eq!(parts, vec!["Иванов", "«Книга»"]);
        assert!(segment_guillemet("").is_empty());
        assert!(segment_guillemet(" , — . ").is_empty());
    }

    #[test]
    fn test_guillemet_part_count_bounded_by_boundaries() {
        let samples = [
            "Виктор Пелевин, «iPhuck 10», роман (отрывок)",
            "A, B, C — «T», d, e (f, g)",
            "«T»",
            "no delimiters here",
            "A (x, y), B",
            ",,,——,,",
        ];
        for s in samples {
            let boundaries = s.chars().filter(|&c| c == ',' || c == EM_DASH).count()
                + 2 * s.chars().filter(|&c| c == QUOTE_OPEN).count();
            let parts = segment_guillemet(s);
            assert!(parts.len() <= boundaries + 1, "{s:?} -> {parts:?}");
            assert!(parts.iter().all(|p| !clean(p).is_empty()));
        }
    }

    #[test]
    fn test_segment_dispatch() {
        assert_eq!(segment("A — B", Dialect::Dash).len(), 2);
        assert_eq!(segment("A, B", Dialect::Guillemet).len(), 2);
        assert_eq!(segment("A, B", Dialect::Dash).len(), 1);
    }
}
