use laurels_core::Author;

/// Split an author field into individual authors.
///
/// Handles:
/// - comma-separated names: `Иванов, Петров`
/// - a parenthetical qualifier after a name: `Иванов (составитель)`
///
/// Names and qualifiers are returned as found (untrimmed); normalization is
/// done by the caller. Inside a qualifier a comma discards the qualifier text
/// read so far, so `(переводчик, редактор)` yields the qualifier `редактор`.
/// A comma outside a qualifier finalizes the current author exactly as the
/// end of input does: a name captured before `(` is kept, and any non-blank
/// text between `)` and the comma becomes an author of its own.
pub fn parse_authors(text: &str) -> Vec<Author> {
    let mut authors = Vec::new();
    let mut pending: Option<Author> = None;
    let mut buffer = String::new();
    let mut bracket_open = false;

    for c in text.chars() {
        match c {
            '(' if !bracket_open => {
                bracket_open = true;
                pending = Some(Author::new(std::mem::take(&mut buffer), ""));
            }
            ')' if bracket_open => {
                bracket_open = false;
                let details = std::mem::take(&mut buffer);
                if let Some(author) = pending.as_mut() {
                    author.details = details;
                }
            }
            ',' if bracket_open => buffer.clear(),
            ',' => finish_author(&mut authors, &mut pending, &mut buffer),
            _ => buffer.push(c),
        }
    }

    finish_author(&mut authors, &mut pending, &mut buffer);
    authors
}

fn finish_author(authors: &mut Vec<Author>, pending: &mut Option<Author>, buffer: &mut String) {
    if let Some(author) = pending.take() {
        authors.push(author);
    }
    if !buffer.trim().is_empty() {
        authors.push(Author::new(buffer.as_str(), ""));
    }
    buffer.clear();
}
